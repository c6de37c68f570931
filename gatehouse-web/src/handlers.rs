//! HTTP handlers for the sign-in surface

use crate::{
    auth::CurrentUser,
    routes::ROOT_PATH,
    session::CookieSession,
    templates::{HomeTemplate, SignInTemplate},
    AppState,
};
use askama::Template;
use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use gatehouse_core::SignInOutcome;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{error, info};

/// Sign-in form parameters. Only the name field is honored; anything else a
/// client submits is dropped on deserialization.
#[derive(Debug, Deserialize)]
pub struct SignInForm {
    #[serde(default)]
    pub name: String,
}

/// Health check response
#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

/// Show the current sign-in state (the application root)
pub async fn home(CurrentUser(identity): CurrentUser) -> Response {
    render(HomeTemplate::new(identity.display_string()))
}

/// Display the sign-in entry form
pub async fn sign_in_form() -> Response {
    render(SignInTemplate::new(false))
}

/// Look up the submitted name and establish the session on a match.
///
/// The lookup is name-only; a production deployment must verify a credential
/// before treating this as an authentication check. An unknown name
/// re-renders the entry form without touching the session.
pub async fn sign_in(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignInForm>,
) -> Response {
    let session = CookieSession(session);

    match state.auth.sign_in(&session, &form.name).await {
        Ok(SignInOutcome::SignedIn(identity)) => {
            info!("Sign-in succeeded: {}", identity.name);
            Redirect::to(ROOT_PATH).into_response()
        }
        Ok(SignInOutcome::UnknownName) => render(SignInTemplate::new(true)),
        Err(e) => {
            error!("Sign-in failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Clear the session and return to the application root. Idempotent.
pub async fn sign_out(State(state): State<AppState>, session: Session) -> Response {
    let session = CookieSession(session);

    match state.auth.sign_out(&session).await {
        Ok(()) => Redirect::to(ROOT_PATH).into_response(),
        Err(e) => {
            error!("Sign-out failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn render<T: Template>(template: T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Template rendering failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
