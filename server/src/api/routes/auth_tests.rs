use super::*;
use crate::api::test_support::TestApp;
use crate::domain::messages::{EMAIL_NOT_CONFIRMED, RESEND_SUCCESS, SIGN_UP_SUCCESS};
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_sign_up_auto_confirm_sets_cookie() {
    let app = TestApp::new();
    let response = app
        .post(
            "/api/v1/auth/sign-up",
            json!({ "email": "dev@example.com", "password": "secret1" }),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["message"], SIGN_UP_SUCCESS);
    assert_eq!(body["user"]["email"], "dev@example.com");

    let set_cookie = response.set_cookie.as_deref().unwrap();
    assert!(set_cookie.starts_with("replrepo_session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));

    let refresh = response.set_cookie_named("replrepo_refresh").unwrap();
    assert!(refresh.contains("HttpOnly"));
}

#[tokio::test]
async fn test_sign_up_pending_confirmation_has_no_cookie() {
    let app = TestApp::pending_confirmation();
    let response = app
        .post(
            "/api/v1/auth/sign-up",
            json!({ "email": "dev@example.com", "password": "secret1" }),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.set_cookie.is_none());
    assert!(response.json().get("user").is_none());
}

#[tokio::test]
async fn test_sign_in_unconfirmed_then_confirmed() {
    let app = TestApp::pending_confirmation();
    let credentials = json!({ "email": "dev@example.com", "password": "secret1" });
    app.post("/api/v1/auth/sign-up", credentials.clone(), None)
        .await;

    let rejected = app
        .post("/api/v1/auth/sign-in", credentials.clone(), None)
        .await;
    assert_eq!(rejected.status, StatusCode::UNAUTHORIZED);
    assert_eq!(rejected.json()["message"], EMAIL_NOT_CONFIRMED);

    app.memory.confirm_email("dev@example.com");
    let accepted = app.post("/api/v1/auth/sign-in", credentials, None).await;
    assert_eq!(accepted.status, StatusCode::OK);
    assert_eq!(accepted.json()["message"], "Signed in successfully");

    let status = app
        .get("/api/v1/auth/status", Some(&accepted.cookie()))
        .await;
    assert_eq!(status.json()["authenticated"], true);
    assert_eq!(status.json()["user"]["email"], "dev@example.com");
}

#[tokio::test]
async fn test_sign_in_wrong_password() {
    let app = TestApp::new();
    app.sign_up("dev@example.com").await;

    let response = app
        .post(
            "/api/v1/auth/sign-in",
            json!({ "email": "dev@example.com", "password": "nope" }),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(
        response.json()["message"]
            .as_str()
            .unwrap()
            .starts_with("Failed to sign in:")
    );
}

#[tokio::test]
async fn test_sign_in_rejects_invalid_email() {
    let app = TestApp::new();
    let response = app
        .post(
            "/api/v1/auth/sign-in",
            json!({ "email": "not-an-email", "password": "secret1" }),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_sign_out_clears_session() {
    let app = TestApp::new();
    let cookie = app.sign_up("dev@example.com").await;

    let response = app
        .post("/api/v1/auth/sign-out", json!({}), Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(
        response
            .set_cookie
            .as_deref()
            .unwrap()
            .contains("Max-Age=0")
    );

    // The old token is revoked server-side as well
    let status = app.get("/api/v1/auth/status", Some(&cookie)).await;
    assert_eq!(status.json()["authenticated"], false);
}

#[tokio::test]
async fn test_expired_access_token_is_refreshed() {
    let app = TestApp::new();
    let signed_up = app
        .post(
            "/api/v1/auth/sign-up",
            json!({ "email": "dev@example.com", "password": "secret1" }),
            None,
        )
        .await;
    let access = signed_up.cookie();
    let refresh = signed_up.refresh_cookie();
    let token = access.trim_start_matches("replrepo_session=");
    assert!(app.memory.expire_access_token(token));

    let cookies = format!("{access}; {refresh}");
    let status = app.get("/api/v1/auth/status", Some(&cookies)).await;
    assert_eq!(status.json()["authenticated"], true);
    assert_eq!(status.json()["user"]["email"], "dev@example.com");

    // Both cookies are rotated and the new access token works on its own
    let renewed = status.cookie();
    assert_ne!(renewed, access);
    assert_ne!(status.refresh_cookie(), refresh);
    let again = app.get("/api/v1/auth/status", Some(&renewed)).await;
    assert_eq!(again.json()["authenticated"], true);
    assert!(again.set_cookies.is_empty());
}

#[tokio::test]
async fn test_spent_refresh_token_clears_cookies() {
    let app = TestApp::new();
    let response = app
        .get("/api/v1/auth/status", Some("replrepo_refresh=unknown"))
        .await;
    assert_eq!(response.json()["authenticated"], false);
    assert!(
        response
            .set_cookie_named("replrepo_refresh")
            .unwrap()
            .contains("Max-Age=0")
    );
}

#[tokio::test]
async fn test_sign_out_revokes_refresh_token() {
    let app = TestApp::new();
    let signed_up = app
        .post(
            "/api/v1/auth/sign-up",
            json!({ "email": "dev@example.com", "password": "secret1" }),
            None,
        )
        .await;
    let cookies = format!("{}; {}", signed_up.cookie(), signed_up.refresh_cookie());

    let response = app
        .post("/api/v1/auth/sign-out", json!({}), Some(&cookies))
        .await;
    assert!(
        response
            .set_cookie_named("replrepo_refresh")
            .unwrap()
            .contains("Max-Age=0")
    );

    let status = app
        .get("/api/v1/auth/status", Some(&signed_up.refresh_cookie()))
        .await;
    assert_eq!(status.json()["authenticated"], false);
}

#[tokio::test]
async fn test_status_anonymous() {
    let app = TestApp::new();
    let response = app.get("/api/v1/auth/status", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["authenticated"], false);
    assert!(response.json().get("user").is_none());
}

#[tokio::test]
async fn test_resend_confirmation() {
    let app = TestApp::pending_confirmation();
    app.post(
        "/api/v1/auth/sign-up",
        json!({ "email": "dev@example.com", "password": "secret1" }),
        None,
    )
    .await;

    let response = app
        .post(
            "/api/v1/auth/resend",
            json!({ "email": "dev@example.com" }),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["message"], RESEND_SUCCESS);
}

#[test]
fn test_user_dto_from_auth_user() {
    let dto = UserDto::from(AuthUser {
        id: "user-1".into(),
        email: Some("a@b.co".into()),
    });
    assert_eq!(dto.id, "user-1");
    assert_eq!(dto.email.as_deref(), Some("a@b.co"));
}
