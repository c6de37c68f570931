//! Session authentication and sign-in flows
//!
//! `AuthService` re-validates the caller's session before protected
//! operations, establishes the session key on sign-in, and clears it on
//! sign-out. A failed resolution is never a hard error: the stale key is
//! purged in the same pass and the caller is told to sign in again.

use crate::{
    GatehouseResult, Identity, IdentityDirectory, SessionStore, USER_ID_KEY,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of re-validating a session before a protected operation.
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    /// The session resolved to an existing identity.
    Authenticated(Identity),
    /// No usable session; the caller should be sent to the sign-in entry.
    SignInRequired,
}

/// Result of a sign-in attempt.
#[derive(Debug, Clone)]
pub enum SignInOutcome {
    /// The session key now holds this identity's id.
    SignedIn(Identity),
    /// No identity matches the submitted name; the session is untouched.
    UnknownName,
}

/// Resolves sessions to identities and maintains the session key.
#[derive(Clone)]
pub struct AuthService {
    directory: Arc<dyn IdentityDirectory>,
}

impl AuthService {
    pub fn new(directory: Arc<dyn IdentityDirectory>) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &Arc<dyn IdentityDirectory> {
        &self.directory
    }

    /// Re-validate the caller's session.
    ///
    /// An absent, empty, or unresolvable `user_id` key is cleared in the
    /// same pass, so no stale token survives past this request.
    pub async fn authenticate(&self, session: &dyn SessionStore) -> GatehouseResult<AuthOutcome> {
        let user_id = session.get(USER_ID_KEY).await?;

        let Some(user_id) = user_id.filter(|id| !id.is_empty()) else {
            session.delete(USER_ID_KEY).await?;
            debug!("No session token present");
            return Ok(AuthOutcome::SignInRequired);
        };

        match self.directory.find(&user_id).await {
            Ok(identity) => {
                debug!("Session resolved to identity: {}", identity.name);
                Ok(AuthOutcome::Authenticated(identity))
            }
            Err(e) if e.is_not_found() => {
                warn!("Purging session token for missing identity: {}", user_id);
                session.delete(USER_ID_KEY).await?;
                Ok(AuthOutcome::SignInRequired)
            }
            Err(e) => Err(e),
        }
    }

    /// Sign in by name lookup, establishing the session key on a match.
    ///
    /// The lookup alone is not a credential check; a production deployment
    /// must verify a secret before the key is set.
    pub async fn sign_in(
        &self,
        session: &dyn SessionStore,
        name: &str,
    ) -> GatehouseResult<SignInOutcome> {
        match self.directory.find_by_name(name).await? {
            Some(identity) => {
                session.set(USER_ID_KEY, identity.id.clone()).await?;
                info!("Signed in: {}", identity.name);
                Ok(SignInOutcome::SignedIn(identity))
            }
            None => {
                debug!("Sign-in rejected, no identity named '{}'", name);
                Ok(SignInOutcome::UnknownName)
            }
        }
    }

    /// Clear the session key. Safe to call with no active session.
    pub async fn sign_out(&self, session: &dyn SessionStore) -> GatehouseResult<()> {
        session.delete(USER_ID_KEY).await?;
        info!("Signed out");
        Ok(())
    }
}
