//! Authentication API integration tests
//!
//! Login, logout, registration and the session side effects of auth
//! failures.

use std::time::Duration;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::json;
use socialfeed::client::{AuthStatus, ClientError, SessionRecord};
use socialfeed::shared::feed::RegisterRequest;
use socialfeed::shared::SharedError;
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{error_response, ok_result, sign_token, TestBackend, JANE};
use crate::{assert_err, assert_ok};

#[tokio::test]
async fn test_login_persists_session_and_goes_home() {
    let backend = TestBackend::start().await;
    let token = sign_token(JANE.id);

    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .and(body_json(json!({"username": JANE.username, "password": JANE.password})))
        .respond_with(ok_result(json!({"token": token, "authenticated": true})))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/introspect"))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .respond_with(ok_result(json!({"valid": true})))
        .expect(1)
        .mount(&backend.server)
        .await;

    let mut app = backend.app();
    let record = assert_ok!(app.login(JANE.username, JANE.password).await);

    let expected_expiry = backend.session.now() + chrono::Duration::seconds(3600);
    assert_eq!(record.token, token);
    assert_eq!(record.expiry, expected_expiry);
    assert_eq!(app.navigator().current(), "/");
    assert_eq!(
        backend.session.status(),
        AuthStatus::Authenticated { expiry: expected_expiry }
    );

    let stored: SessionRecord = serde_json::from_str(&backend.stored_session().unwrap()).unwrap();
    assert_eq!(stored, record);
}

#[tokio::test]
async fn test_login_rejected() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(error_response(401, "Unauthenticated"))
        .mount(&backend.server)
        .await;

    let mut app = backend.app();
    let err = app.login(JANE.username, "wrongpassword").await.unwrap_err();

    assert_matches!(err, ClientError::Api { status: 401, ref message } if message == "Invalid username or password");
    assert_eq!(backend.stored_session(), None);
    assert_eq!(app.navigator().current(), "/");
}

#[tokio::test]
async fn test_login_validation_sends_nothing() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend.server)
        .await;

    let mut app = backend.app();
    assert_err!(
        app.login("jane", "pw").await,
        ClientError::Validation(SharedError::ValidationError { .. })
    );
}

#[tokio::test]
async fn test_login_without_result_is_decode_error() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 1000})))
        .mount(&backend.server)
        .await;

    let mut app = backend.app();
    assert_err!(app.login(JANE.username, JANE.password).await, ClientError::Decode(_));
    assert_eq!(backend.stored_session(), None);
}

#[tokio::test]
async fn test_logout_clears_session_when_backend_fails() {
    let backend = TestBackend::start().await;
    let token = backend.sign_in(JANE.id);
    Mock::given(method("POST"))
        .and(path("/users/logout"))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .respond_with(error_response(500, "boom"))
        .expect(1)
        .mount(&backend.server)
        .await;

    let mut app = backend.app();
    assert_err!(app.logout().await, ClientError::Api { status: 500, .. });

    assert_eq!(backend.stored_session(), None);
    assert_eq!(backend.session.status(), AuthStatus::Unauthenticated);
    assert_eq!(app.navigator().current(), "/login");
}

#[tokio::test]
async fn test_logout_success() {
    let backend = TestBackend::start().await;
    backend.sign_in(JANE.id);
    Mock::given(method("POST"))
        .and(path("/users/logout"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&backend.server)
        .await;

    let mut app = backend.app();
    assert_ok!(app.logout().await);
    assert_eq!(backend.stored_session(), None);
}

fn registration() -> RegisterRequest {
    RegisterRequest {
        username: "newuser".into(),
        password: "password123".into(),
        email: "new@example.com".into(),
        first_name: "New".into(),
        last_name: "User".into(),
        dob: "1990-01-01".into(),
    }
}

#[tokio::test]
async fn test_register_sends_camel_case_body() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_partial_json(json!({
            "username": "newuser",
            "firstName": "New",
            "lastName": "User",
            "dob": "1990-01-01",
        })))
        .respond_with(ok_result(json!({"id": 7, "username": "newuser"})))
        .expect(1)
        .mount(&backend.server)
        .await;

    let created = assert_ok!(backend.app().auth().register(&registration()).await);
    assert_eq!(created.map(|u| u.id), Some("7".to_string()));
    // Registering does not log in.
    assert_eq!(backend.stored_session(), None);
}

#[tokio::test]
async fn test_register_conflict() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(error_response(409, "Username already exists"))
        .mount(&backend.server)
        .await;

    let err = backend.app().auth().register(&registration()).await.unwrap_err();
    assert_eq!(err.user_message(), "Username already exists");
}

#[tokio::test]
async fn test_register_invalid_email_sends_nothing() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend.server)
        .await;

    let mut request = registration();
    request.email = "not-an-email".into();
    assert_err!(backend.app().auth().register(&request).await, ClientError::Validation(_));
}

#[tokio::test]
async fn test_unauthorized_response_clears_session() {
    let backend = TestBackend::start().await;
    backend.sign_in(JANE.id);
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&backend.server)
        .await;

    assert_err!(backend.posts().list_all().await, ClientError::Unauthorized);
    assert_eq!(backend.stored_session(), None);
    assert_eq!(backend.session.status(), AuthStatus::Unauthenticated);
}

#[tokio::test]
async fn test_session_ttl_from_config() {
    let backend = TestBackend::start().await;
    backend.sign_in(JANE.id);

    backend.clock.advance(Duration::from_secs(3599));
    assert!(backend.session.load().unwrap().is_some());

    backend.clock.advance(Duration::from_secs(2));
    assert_eq!(backend.session.load().unwrap(), None);
    assert_eq!(backend.stored_session(), None);
}
