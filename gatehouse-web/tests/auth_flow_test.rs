//! End-to-end tests for the sign-in gate
//!
//! Each test drives the full router: session layer, authenticator
//! middleware, and handlers, with cookies replayed across requests.

mod helpers;

use axum::http::{header, StatusCode};
use gatehouse_core::Identity;
use helpers::{body_string, session_cookie, spawn_app};

#[tokio::test]
async fn home_without_session_redirects_to_sign_in() {
    let app = spawn_app();

    let response = app.get("/", None).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/user/sign_in");
}

#[tokio::test]
async fn sign_in_form_renders() {
    let app = spawn_app();

    let response = app.get("/user/sign_in", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("<form"));
    assert!(body.contains("name=\"name\""));
}

#[tokio::test]
async fn sign_in_round_trip_resolves_same_identity() {
    let app = spawn_app();
    app.directory.insert(Identity::new("alice"));

    let response = app.post_form("/user/sign_in", "name=alice", None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
    let cookie = session_cookie(&response).expect("sign-in should establish a session cookie");

    let response = app.get("/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("alice"));
}

#[tokio::test]
async fn sign_in_with_unknown_name_rerenders_form() {
    let app = spawn_app();

    let response = app.post_form("/user/sign_in", "name=ghost", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        session_cookie(&response).is_none(),
        "a rejected sign-in must not touch the session"
    );
    let body = body_string(response).await;
    assert!(body.contains("No account matches"));
}

#[tokio::test]
async fn sign_in_honors_only_the_name_field() {
    let app = spawn_app();
    app.directory.insert(Identity::new("alice"));

    let response = app
        .post_form("/user/sign_in", "name=alice&admin=true&id=1", None)
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
}

#[tokio::test]
async fn stale_session_is_purged_and_redirected() {
    let app = spawn_app();
    let alice = Identity::new("alice");
    let alice_id = alice.id.clone();
    app.directory.insert(alice);

    let response = app.post_form("/user/sign_in", "name=alice", None).await;
    let cookie = session_cookie(&response).unwrap();

    app.directory.remove(&alice_id);

    let response = app.get("/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/user/sign_in");

    // the key was purged server-side: restoring the identity under the same
    // id does not resurrect the session
    app.directory.insert(Identity {
        id: alice_id,
        name: "alice".to_string(),
        display_name: None,
        created_at: chrono::Utc::now(),
    });
    let response = app.get("/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn sign_out_clears_the_session() {
    let app = spawn_app();
    app.directory.insert(Identity::new("alice"));

    let response = app.post_form("/user/sign_in", "name=alice", None).await;
    let cookie = session_cookie(&response).unwrap();

    let response = app.post_form("/user/sign_out", "", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let response = app.get("/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn sign_out_accepts_the_delete_verb() {
    let app = spawn_app();
    app.directory.insert(Identity::new("alice"));

    let response = app.post_form("/user/sign_in", "name=alice", None).await;
    let cookie = session_cookie(&response).unwrap();

    let response = app.delete("/user/sign_out", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app.get("/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn sign_out_without_a_session_is_harmless() {
    let app = spawn_app();

    let response = app.post_form("/user/sign_out", "", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // a second sign-out is just as uneventful
    let response = app.post_form("/user/sign_out", "", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn health_check_reports_healthy() {
    let app = spawn_app();

    let response = app.get("/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("healthy"));
}
