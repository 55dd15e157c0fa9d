//! Review panel endpoints

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use super::ApiState;
use crate::api::auth::CurrentSession;
use crate::api::extractors::{RepoPath, ValidationRejection};
use crate::api::types::ApiError;
use crate::domain::messages::REVIEW_REQUIRES_LOGIN;
use crate::domain::{ReviewDraft, ReviewPanel, ViewError};

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitReviewResponse {
    pub message: &'static str,
    /// The panel after reloading
    pub panel: ReviewPanel,
}

pub fn routes(state: ApiState) -> Router {
    Router::new()
        .route("/repos/{id}/reviews", get(list_reviews).post(submit_review))
        .with_state(state)
}

/// Reviews for a repo, newest first
#[utoipa::path(
    get,
    path = "/api/v1/repos/{id}/reviews",
    tag = "reviews",
    params(("id" = i64, Path, description = "Repo id")),
    responses(
        (status = 200, description = "Review panel", body = ReviewPanel)
    )
)]
pub async fn list_reviews(
    State(state): State<ApiState>,
    current: CurrentSession,
    path: RepoPath,
) -> Result<Json<ReviewPanel>, ApiError> {
    let panel = ReviewPanel::load(&state.backend, current.session(), path.id).await?;
    Ok(Json(panel))
}

/// Submit a review. The session is checked before the body is parsed or
/// validated.
#[utoipa::path(
    post,
    path = "/api/v1/repos/{id}/reviews",
    tag = "reviews",
    params(("id" = i64, Path, description = "Repo id")),
    request_body = ReviewDraft,
    responses(
        (status = 200, description = "Review submitted", body = SubmitReviewResponse),
        (status = 400, description = "Invalid rating or content"),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn submit_review(
    State(state): State<ApiState>,
    current: CurrentSession,
    path: RepoPath,
    payload: Result<Json<ReviewDraft>, JsonRejection>,
) -> Result<Json<SubmitReviewResponse>, Response> {
    if current.session().is_none() {
        let error = ViewError::unauthenticated(REVIEW_REQUIRES_LOGIN);
        return Err(ApiError::from(error).into_response());
    }
    let Json(draft) = payload.map_err(|e| ValidationRejection::Json(e).into_response())?;
    let mut panel = ReviewPanel {
        repo_id: path.id,
        reviews: Vec::new(),
    };
    let message = panel
        .submit(&state.backend, current.session(), &draft)
        .await
        .map_err(|e| ApiError::from(e).into_response())?;
    Ok(Json(SubmitReviewResponse { message, panel }))
}

#[cfg(test)]
#[path = "reviews_tests.rs"]
mod tests;
