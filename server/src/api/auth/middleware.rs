//! Session middleware
//!
//! Resolves the session cookie once per request and rejects cross-origin
//! mutations. Handlers read the result through `CurrentSession`. When the
//! access token is missing or no longer valid, the refresh cookie is traded
//! for a new session and both cookies are re-set on the response.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use serde_json::json;

use super::extractors::CurrentSession;
use super::manager::SessionManager;
use crate::api::middleware::AllowedOrigins;
use crate::core::constants::{REFRESH_COOKIE_NAME, SESSION_COOKIE_NAME};
use crate::data::BackendService;
use crate::domain::Session;

/// Authentication error response
#[derive(Debug)]
pub struct AuthError {
    pub status: StatusCode,
    pub error: &'static str,
    pub code: &'static str,
    pub message: String,
}

impl AuthError {
    pub fn origin_not_allowed() -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            error: "forbidden",
            code: "ORIGIN_NOT_ALLOWED",
            message: "Request origin not allowed".to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.error,
            "code": self.code,
            "message": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}

/// Shared state for the session middleware
#[derive(Clone)]
pub struct SessionState {
    pub sessions: Arc<SessionManager>,
    pub backend: BackendService,
    pub allowed_origins: AllowedOrigins,
}

fn is_mutation(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

fn non_empty<'a>(jar: &'a CookieJar, name: &str) -> Option<&'a str> {
    jar.get(name).map(|c| c.value()).filter(|v| !v.is_empty())
}

/// True when the handler already set or cleared the session cookie
fn sets_session_cookie(headers: &HeaderMap) -> bool {
    let prefix = format!("{}=", SESSION_COOKIE_NAME);
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with(&prefix))
}

/// Resolve the session cookie and inject `CurrentSession`
pub async fn resolve_session(
    State(state): State<SessionState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    if is_mutation(request.method())
        && let Some(origin) = AllowedOrigins::request_origin(request.headers())
        && !state.allowed_origins.is_allowed(&origin)
    {
        tracing::warn!(origin = %origin, "Rejected request from disallowed origin");
        return Err(AuthError::origin_not_allowed());
    }

    let mut session = match non_empty(&jar, SESSION_COOKIE_NAME) {
        Some(token) => state.sessions.resolve(&state.backend, token).await,
        None => None,
    };

    // Cookie changes owed to the response
    let mut renewal: Option<CookieJar> = None;
    if session.is_none()
        && let Some(refresh_token) = non_empty(&jar, REFRESH_COOKIE_NAME)
    {
        match state.sessions.refresh(&state.backend, refresh_token).await {
            Some(auth) => {
                session = Some(Session::from(&auth));
                renewal = Some(state.sessions.store(jar.clone(), auth));
            }
            None => renewal = Some(state.sessions.clear(jar.clone())),
        }
    }
    request.extensions_mut().insert(CurrentSession(session));

    let response = next.run(request).await;
    if sets_session_cookie(response.headers()) {
        return Ok(response);
    }
    Ok(match renewal {
        Some(jar) => (jar, response).into_response(),
        None => response,
    })
}
