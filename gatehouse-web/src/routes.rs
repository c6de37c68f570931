//! Route definitions for the Gatehouse web server
//!
//! Redirect targets used across the application are the named constants
//! below rather than literals scattered through handlers.

use crate::{auth, handlers, AppState};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

/// Application root, the destination after sign-in and sign-out
pub const ROOT_PATH: &str = "/";
/// Sign-in entry point, the destination for unauthenticated callers
pub const SIGN_IN_PATH: &str = "/user/sign_in";
/// Sign-out endpoint
pub const SIGN_OUT_PATH: &str = "/user/sign_out";

/// Routes guarded by the session authenticator
pub fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(ROOT_PATH, get(handlers::home))
        .route_layer(middleware::from_fn_with_state(
            state,
            auth::require_authentication,
        ))
}

/// Sign-in/sign-out surface and service probes, reachable anonymously
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route(
            SIGN_IN_PATH,
            get(handlers::sign_in_form).post(handlers::sign_in),
        )
        .route(
            SIGN_OUT_PATH,
            post(handlers::sign_out).delete(handlers::sign_out),
        )
        .route("/health", get(handlers::health_check))
}
