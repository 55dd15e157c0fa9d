//! Path and validation extractors for API routes

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::domain::messages::INVALID_REPO_ID;
use crate::domain::repo_detail::parse_repo_id;

#[derive(Debug, Deserialize)]
struct RepoPathRaw {
    #[serde(alias = "repo_id")]
    id: String,
}

/// Validated repo path extractor for `/{id}` and `/{repo_id}` routes.
///
/// Non-numeric or non-positive ids are rejected with 400.
#[derive(Debug, Clone, Copy)]
pub struct RepoPath {
    pub id: i64,
}

impl<S> FromRequestParts<S> for RepoPath
where
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<RepoPathRaw>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Path)?;
        let id = parse_repo_id(&raw.id).map_err(|_| ValidationRejection::InvalidRepoId)?;
        Ok(Self { id })
    }
}

pub enum ValidationRejection {
    Path(PathRejection),
    /// Repo id is not a positive integer
    InvalidRepoId,
    Query(QueryRejection),
    Json(JsonRejection),
    Validation(validator::ValidationErrors),
}

/// Every variant answers 400 with `{error, code, message}`
impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            Self::Path(rejection) => ("PATH_PARSE_ERROR", rejection.body_text()),
            Self::InvalidRepoId => ("INVALID_REPO_ID", INVALID_REPO_ID.to_string()),
            Self::Query(rejection) => ("QUERY_PARSE_ERROR", rejection.body_text()),
            Self::Json(rejection) => ("JSON_PARSE_ERROR", rejection.body_text()),
            Self::Validation(errors) => ("VALIDATION_ERROR", format_validation_errors(&errors)),
        };
        let body = serde_json::json!({
            "error": "bad_request",
            "code": code,
            "message": message,
        });
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            messages.push(match &error.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            });
        }
    }
    messages.sort();
    messages.join("; ")
}

fn validated<T: Validate>(value: T) -> Result<T, ValidationRejection> {
    value.validate().map_err(ValidationRejection::Validation)?;
    Ok(value)
}

/// `Query<T>` followed by `T::validate`
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Query)
            .and_then(|Query(value)| validated(value))
            .map(Self)
    }
}

/// `Json<T>` followed by `T::validate`
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map_err(ValidationRejection::Json)
            .and_then(|Json(value)| validated(value))
            .map(Self)
    }
}
