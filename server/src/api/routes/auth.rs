//! Sign-in, sign-up, sign-out and confirmation resend

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::ApiState;
use crate::api::auth::CurrentSession;
use crate::api::extractors::ValidatedJson;
use crate::api::types::{ApiError, MessageResponse};
use crate::data::types::AuthUser;
use crate::domain::session;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CredentialsRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EmailRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserDto {
    pub id: String,
    pub email: Option<String>,
}

impl From<AuthUser> for UserDto {
    fn from(user: AuthUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    /// Present when a session was started
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserDto>,
}

pub fn routes(state: ApiState) -> Router {
    Router::new()
        .route("/sign-in", post(sign_in))
        .route("/sign-up", post(sign_up))
        .route("/sign-out", post(sign_out))
        .route("/resend", post(resend_confirmation))
        .route("/status", get(auth_status))
        .with_state(state)
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-in",
    tag = "auth",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Signed in, session cookie set", body = AuthResponse),
        (status = 401, description = "Credentials rejected or email not confirmed")
    )
)]
pub async fn sign_in(
    State(state): State<ApiState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<CredentialsRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), ApiError> {
    let auth = session::sign_in(&state.backend, request.email.trim(), &request.password).await?;
    let user = UserDto::from(auth.user.clone());

    Ok((
        state.sessions.store(jar, auth),
        Json(AuthResponse {
            success: true,
            message: "Signed in successfully".to_string(),
            user: Some(user),
        }),
    ))
}

/// Create an account
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-up",
    tag = "auth",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Account created", body = AuthResponse),
        (status = 400, description = "Sign-up rejected")
    )
)]
pub async fn sign_up(
    State(state): State<ApiState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<CredentialsRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), ApiError> {
    let result = session::sign_up(&state.backend, request.email.trim(), &request.password).await?;

    // Auto-confirming backends hand back a session right away
    let (jar, user) = match result.session {
        Some(auth) => {
            let user = UserDto::from(auth.user.clone());
            (state.sessions.store(jar, auth), Some(user))
        }
        None => (jar, None),
    };

    Ok((
        jar,
        Json(AuthResponse {
            success: true,
            message: result.message.to_string(),
            user,
        }),
    ))
}

/// Sign out and clear the session cookies
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-out",
    tag = "auth",
    responses(
        (status = 200, description = "Signed out", body = MessageResponse)
    )
)]
pub async fn sign_out(
    State(state): State<ApiState>,
    jar: CookieJar,
    current: CurrentSession,
) -> (CookieJar, Json<MessageResponse>) {
    if let Some(active) = current.session() {
        session::sign_out(&state.backend, active).await;
    }
    (
        state.sessions.clear(jar),
        Json(MessageResponse::ok("Signed out successfully")),
    )
}

/// Resend the sign-up confirmation email
#[utoipa::path(
    post,
    path = "/api/v1/auth/resend",
    tag = "auth",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Confirmation email resent", body = MessageResponse),
        (status = 400, description = "Resend rejected")
    )
)]
pub async fn resend_confirmation(
    State(state): State<ApiState>,
    ValidatedJson(request): ValidatedJson<EmailRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let message = session::resend_confirmation(&state.backend, request.email.trim()).await?;
    Ok(Json(MessageResponse::ok(message)))
}

/// Current session status
#[utoipa::path(
    get,
    path = "/api/v1/auth/status",
    tag = "auth",
    responses(
        (status = 200, description = "Authentication status", body = AuthStatusResponse)
    )
)]
pub async fn auth_status(current: CurrentSession) -> Json<AuthStatusResponse> {
    let user = current.0.map(|s| UserDto::from(s.user));
    Json(AuthStatusResponse {
        authenticated: user.is_some(),
        version: env!("CARGO_PKG_VERSION"),
        user,
    })
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
