//! Catalog endpoints: listing, detail, save and leaderboard

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::ApiState;
use crate::api::auth::CurrentSession;
use crate::api::extractors::{RepoPath, ValidatedQuery};
use crate::api::types::{ApiError, MessageResponse};
use crate::data::types::RepoRow;
use crate::domain::leaderboard::{LeaderboardEntry, most_used};
use crate::domain::lists::save_to_saved_list;
use crate::domain::rating::StarRow;
use crate::domain::{CategoryFilter, ListingScreen, RepoDetail};

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListReposQuery {
    /// Free-text search over name, description and tags
    #[validate(length(max = 200, message = "Query must be at most 200 characters"))]
    pub q: Option<String>,
    /// `all`, `GitHub` or `Replit`
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl ListReposQuery {
    pub fn category(&self) -> Result<CategoryFilter, ApiError> {
        self.kind
            .as_deref()
            .unwrap_or_default()
            .parse::<CategoryFilter>()
            .map_err(|e| ApiError::bad_request("INVALID_TYPE", e))
    }
}

/// Repo detail with display labels
#[derive(Debug, Serialize, ToSchema)]
pub struct RepoDetailResponse {
    pub repo: RepoRow,
    /// One decimal, or "No rating available"
    pub rating_label: String,
    pub stars: Option<StarRow>,
    /// "No tags available" when the repo has none
    pub tags_label: Option<&'static str>,
    pub link_label: String,
}

impl From<RepoDetail> for RepoDetailResponse {
    fn from(detail: RepoDetail) -> Self {
        Self {
            rating_label: detail.rating_label(),
            stars: detail.stars(),
            tags_label: detail.tags_label(),
            link_label: detail.link_label(),
            repo: detail.repo,
        }
    }
}

pub fn routes(state: ApiState) -> Router {
    Router::new()
        .route("/repos", get(list_repos))
        .route("/repos/{id}", get(get_repo))
        .route("/repos/{id}/save", post(save_repo))
        .route("/leaderboard", get(leaderboard))
        .with_state(state)
}

/// List repos, filtered by text query and category
#[utoipa::path(
    get,
    path = "/api/v1/repos",
    tag = "repos",
    params(ListReposQuery),
    responses(
        (status = 200, description = "Filtered listing", body = ListingScreen),
        (status = 400, description = "Unknown repo type")
    )
)]
pub async fn list_repos(
    State(state): State<ApiState>,
    current: CurrentSession,
    ValidatedQuery(query): ValidatedQuery<ListReposQuery>,
) -> Result<Json<ListingScreen>, ApiError> {
    let category = query.category()?;
    let mut screen = ListingScreen::load(&state.backend, current.session()).await?;
    screen.search(query.q.as_deref().unwrap_or_default());
    screen.set_category(category);
    Ok(Json(screen))
}

/// Get a single repo
#[utoipa::path(
    get,
    path = "/api/v1/repos/{id}",
    tag = "repos",
    params(("id" = i64, Path, description = "Repo id")),
    responses(
        (status = 200, description = "Repo detail", body = RepoDetailResponse),
        (status = 400, description = "Invalid repo id"),
        (status = 404, description = "Repo not found")
    )
)]
pub async fn get_repo(
    State(state): State<ApiState>,
    current: CurrentSession,
    path: RepoPath,
) -> Result<Json<RepoDetailResponse>, ApiError> {
    let detail = RepoDetail::load(&state.backend, current.session(), path.id).await?;
    Ok(Json(detail.into()))
}

/// Save a repo into the caller's "Saved" list
#[utoipa::path(
    post,
    path = "/api/v1/repos/{id}/save",
    tag = "repos",
    params(("id" = i64, Path, description = "Repo id")),
    responses(
        (status = 200, description = "Repo saved", body = MessageResponse),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn save_repo(
    State(state): State<ApiState>,
    current: CurrentSession,
    path: RepoPath,
) -> Result<Json<MessageResponse>, ApiError> {
    let message = save_to_saved_list(&state.backend, current.session(), path.id).await?;
    Ok(Json(MessageResponse::ok(message)))
}

/// Most used templates
#[utoipa::path(
    get,
    path = "/api/v1/leaderboard",
    tag = "repos",
    responses(
        (status = 200, description = "Static leaderboard", body = [LeaderboardEntry])
    )
)]
pub async fn leaderboard() -> Json<&'static [LeaderboardEntry]> {
    Json(most_used())
}

#[cfg(test)]
#[path = "repos_tests.rs"]
mod tests;
