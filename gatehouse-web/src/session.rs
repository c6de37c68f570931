//! Cookie-backed session plumbing
//!
//! Adapts tower-sessions to the narrow key-value interface the core flows
//! read and write, and builds the session middleware layer. The cookie only
//! carries a signed session id; values live in the server-side store.

use crate::WebConfig;
use async_trait::async_trait;
use gatehouse_core::{ErrorContext, GatehouseError, GatehouseResult, SessionStore};
use tower_sessions::{cookie::Key, service::SignedCookie, MemoryStore, Session, SessionManagerLayer};
use tracing::warn;

/// Session cookie name
pub const SESSION_COOKIE: &str = "gatehouse_session";

/// Per-request session handle backed by the session cookie.
#[derive(Clone)]
pub struct CookieSession(pub Session);

impl CookieSession {
    fn store_error(e: tower_sessions::session::Error) -> GatehouseError {
        GatehouseError::Session {
            message: e.to_string(),
            context: ErrorContext::new("web_session"),
        }
    }
}

#[async_trait]
impl SessionStore for CookieSession {
    async fn get(&self, key: &str) -> GatehouseResult<Option<String>> {
        self.0.get::<String>(key).await.map_err(Self::store_error)
    }

    async fn set(&self, key: &str, value: String) -> GatehouseResult<()> {
        self.0.insert(key, value).await.map_err(Self::store_error)
    }

    async fn delete(&self, key: &str) -> GatehouseResult<()> {
        self.0
            .remove::<String>(key)
            .await
            .map_err(Self::store_error)?;
        Ok(())
    }
}

/// Build the session middleware layer.
///
/// The cookie is signed. Without a configured secret a fresh key is
/// generated, which invalidates existing sessions on restart.
pub fn session_layer(config: &WebConfig) -> SessionManagerLayer<MemoryStore, SignedCookie> {
    let key = match config.session_secret.as_deref() {
        Some(secret) if secret.len() >= 32 => Key::derive_from(secret.as_bytes()),
        Some(_) => {
            warn!("Session secret is shorter than 32 bytes, generating a fresh key instead");
            Key::generate()
        }
        None => Key::generate(),
    };

    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE)
        .with_secure(false)
        .with_signed(key)
}
