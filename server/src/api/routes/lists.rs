//! "My Lists" endpoints
//!
//! Every route here needs a session; anonymous callers get 401 with the
//! sign-in prompt.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::ApiState;
use crate::api::auth::CurrentSession;
use crate::api::extractors::{RepoPath, ValidatedJson, ValidatedQuery};
use crate::api::types::ApiError;
use crate::data::types::ListRow;
use crate::domain::messages::LISTS_REQUIRE_LOGIN;
use crate::domain::{ListsScreen, MoveTarget, SavedRepo};

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListsQuery {
    /// Show only repos in this list
    #[validate(range(min = 1, message = "list_id must be positive"))]
    pub list_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateListRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MoveRequest {
    /// Target list id; `0` moves the repo to Unsorted
    #[validate(range(min = 0, message = "list_id must be 0 or a list id"))]
    pub list_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListsResponse {
    pub heading: String,
    pub selected: Option<i64>,
    pub lists: Vec<ListRow>,
    /// Saved repos in the selected list (all when nothing is selected)
    pub saved: Vec<SavedRepo>,
}

impl From<&ListsScreen> for ListsResponse {
    fn from(screen: &ListsScreen) -> Self {
        Self {
            heading: screen.heading().to_string(),
            selected: screen.selected(),
            lists: screen.lists().to_vec(),
            saved: screen.visible().cloned().collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MoveResponse {
    pub repo_id: i64,
    /// `None` when the repo is now unsorted
    pub list_id: Option<i64>,
}

pub fn routes(state: ApiState) -> Router {
    Router::new()
        .route("/lists", get(get_lists).post(create_list))
        .route(
            "/lists/saved/{repo_id}",
            put(move_saved_repo).delete(remove_saved_repo),
        )
        .with_state(state)
}

/// The caller's lists and saved repos
#[utoipa::path(
    get,
    path = "/api/v1/lists",
    tag = "lists",
    params(ListsQuery),
    responses(
        (status = 200, description = "Lists screen", body = ListsResponse),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn get_lists(
    State(state): State<ApiState>,
    current: CurrentSession,
    ValidatedQuery(query): ValidatedQuery<ListsQuery>,
) -> Result<Json<ListsResponse>, ApiError> {
    let session = current.require(LISTS_REQUIRE_LOGIN)?;
    let mut screen = ListsScreen::load(&state.backend, &session).await?;
    screen.select(query.list_id);
    Ok(Json(ListsResponse::from(&screen)))
}

/// Create a list owned by the caller
#[utoipa::path(
    post,
    path = "/api/v1/lists",
    tag = "lists",
    request_body = CreateListRequest,
    responses(
        (status = 201, description = "List created", body = ListRow),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn create_list(
    State(state): State<ApiState>,
    current: CurrentSession,
    ValidatedJson(request): ValidatedJson<CreateListRequest>,
) -> Result<(StatusCode, Json<ListRow>), ApiError> {
    let session = current.require(LISTS_REQUIRE_LOGIN)?;
    let mut screen = ListsScreen::default();
    let row = screen
        .create_list(
            &state.backend,
            &session,
            &request.name,
            request.description.as_deref(),
        )
        .await?
        .clone();
    Ok((StatusCode::CREATED, Json(row)))
}

/// Move a saved repo to another list or to Unsorted
#[utoipa::path(
    put,
    path = "/api/v1/lists/saved/{repo_id}",
    tag = "lists",
    params(("repo_id" = i64, Path, description = "Repo id")),
    request_body = MoveRequest,
    responses(
        (status = 200, description = "Repo moved", body = MoveResponse),
        (status = 401, description = "Not signed in"),
        (status = 404, description = "Target list not found")
    )
)]
pub async fn move_saved_repo(
    State(state): State<ApiState>,
    current: CurrentSession,
    path: RepoPath,
    ValidatedJson(request): ValidatedJson<MoveRequest>,
) -> Result<Json<MoveResponse>, ApiError> {
    let session = current.require(LISTS_REQUIRE_LOGIN)?;
    let mut screen = ListsScreen::load(&state.backend, &session).await?;
    let target = MoveTarget::from(request.list_id);
    if let MoveTarget::List(id) = target
        && !screen.lists().iter().any(|l| l.id == id)
    {
        return Err(ApiError::not_found("LIST_NOT_FOUND", "List not found"));
    }

    screen
        .move_repo(&state.backend, &session, path.id, target)
        .await?;
    Ok(Json(MoveResponse {
        repo_id: path.id,
        list_id: target.list_id(),
    }))
}

/// Remove a saved repo from the caller's lists
#[utoipa::path(
    delete,
    path = "/api/v1/lists/saved/{repo_id}",
    tag = "lists",
    params(("repo_id" = i64, Path, description = "Repo id")),
    responses(
        (status = 204, description = "Repo removed"),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn remove_saved_repo(
    State(state): State<ApiState>,
    current: CurrentSession,
    path: RepoPath,
) -> Result<StatusCode, ApiError> {
    let session = current.require(LISTS_REQUIRE_LOGIN)?;
    let mut screen = ListsScreen::load(&state.backend, &session).await?;
    screen
        .remove_repo(&state.backend, &session, path.id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "lists_tests.rs"]
mod tests;
