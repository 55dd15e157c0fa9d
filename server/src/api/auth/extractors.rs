//! Session extractor for handlers

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::api::types::ApiError;
use crate::domain::Session;

/// The caller's session, if any, as resolved by `resolve_session`.
///
/// Routes outside the session middleware always see `None`.
#[derive(Debug, Clone, Default)]
pub struct CurrentSession(pub Option<Session>);

impl CurrentSession {
    pub fn session(&self) -> Option<&Session> {
        self.0.as_ref()
    }

    /// The session, or 401 with `message`
    pub fn require(self, message: &str) -> Result<Session, ApiError> {
        self.0
            .ok_or_else(|| ApiError::unauthorized("AUTH_REQUIRED", message))
    }
}

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<CurrentSession>()
            .cloned()
            .unwrap_or_default())
    }
}
