//! Integration test helpers
//!
//! Builds an in-process application around a shared in-memory directory and
//! drives it with tower's oneshot, carrying the session cookie between
//! requests the way a browser would.

use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use gatehouse_core::MemoryDirectory;
use gatehouse_web::{create_app, AppState, WebConfig};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

/// In-process application with direct access to its identity directory
pub struct TestApp {
    pub app: Router,
    pub directory: MemoryDirectory,
}

/// Build an app around a fresh in-memory directory
pub fn spawn_app() -> TestApp {
    let directory = MemoryDirectory::new();
    let state = AppState::with_directory(WebConfig::default(), Arc::new(directory.clone()));
    let app = create_app(state);

    TestApp { app, directory }
}

impl TestApp {
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        self.request(Method::GET, uri, None, cookie).await
    }

    pub async fn post_form(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response<Body> {
        self.request(Method::POST, uri, Some(body), cookie).await
    }

    pub async fn delete(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        self.request(Method::DELETE, uri, None, cookie).await
    }

    async fn request(
        &self,
        method: Method,
        uri: &str,
        form_body: Option<&str>,
        cookie: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if form_body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        }
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let body = form_body
            .map(|form_body| Body::from(form_body.to_string()))
            .unwrap_or_else(Body::empty);

        self.app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }
}

/// Extract the session cookie pair from a response, if one was set
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|pair| pair.to_string())
}

/// Read the full response body as a string
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
