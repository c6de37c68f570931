//! Request authentication: extractor, redirect, and middleware
//!
//! The authenticator runs before every protected route. It resolves the
//! session to an identity and binds it into the request extensions, where
//! downstream handlers read it through the `CurrentUser` extractor.

use crate::{routes::SIGN_IN_PATH, session::CookieSession, AppState};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use gatehouse_core::{AuthOutcome, Identity};
use tower_sessions::Session;
use tracing::error;

/// The identity resolved for this request, readable by any downstream
/// handler in the same request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

/// Authentication redirect for failed auth
#[derive(Debug)]
pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        Redirect::temporary(SIGN_IN_PATH).into_response()
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AuthRedirect)
    }
}

/// Middleware guarding protected routes.
///
/// A failed resolution is not an error: the stale key is already purged by
/// the auth service and the caller is redirected to the sign-in entry point.
/// Only directory hard failures surface as server errors.
pub async fn require_authentication(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Response {
    let session = CookieSession(session);

    match state.auth.authenticate(&session).await {
        Ok(AuthOutcome::Authenticated(identity)) => {
            request.extensions_mut().insert(CurrentUser(identity));
            next.run(request).await
        }
        Ok(AuthOutcome::SignInRequired) => AuthRedirect.into_response(),
        Err(e) => {
            error!("Session authentication failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
