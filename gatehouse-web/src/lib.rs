//! Gatehouse Web Server
//!
//! This module provides the HTTP surface for Gatehouse: a cookie-session
//! sign-in gate in front of the identity directory.

pub mod auth;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod session;
pub mod state;
pub mod templates;

#[cfg(feature = "sqlite")]
pub mod database;

// Re-export main types
pub use server::GatehouseServer;
pub use state::AppState;

use axum::Router;
use tower_http::trace::TraceLayer;

/// Create the main application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::protected_routes(state.clone()))
        .merge(routes::session_routes())
        // The session layer must wrap every route that touches the session
        .layer(session::session_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Configuration for the web server
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Enable development mode (seeds demo identities)
    pub dev_mode: bool,
    /// Database URL for the identity directory (optional)
    pub database_url: Option<String>,
    /// Secret used to sign the session cookie (optional)
    pub session_secret: Option<String>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            dev_mode: false,
            database_url: None,
            session_secret: None,
        }
    }
}

impl WebConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("GATEHOUSE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("GATEHOUSE_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            dev_mode: std::env::var("GATEHOUSE_DEV_MODE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            database_url: std::env::var("DATABASE_URL").ok(),
            session_secret: std::env::var("GATEHOUSE_SESSION_SECRET").ok(),
        }
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Error types for the web server
#[derive(thiserror::Error, Debug)]
pub enum WebError {
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Directory error: {0}")]
    Directory(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for web operations
pub type WebResult<T> = Result<T, WebError>;
