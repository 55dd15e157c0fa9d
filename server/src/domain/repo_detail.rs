//! Single repo page

use serde::Serialize;
use utoipa::ToSchema;

use crate::data::BackendService;
use crate::data::types::RepoRow;

use super::error::ViewError;
use super::messages::{
    FETCH_REPO_FAILED, INVALID_REPO_ID, NO_RATING_AVAILABLE, NO_TAGS_AVAILABLE, REPO_NOT_FOUND,
};
use super::rating::{StarRow, star_row};
use super::session::{Session, token_of};

/// Parse a path segment into a repo id
pub fn parse_repo_id(raw: &str) -> Result<i64, ViewError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ViewError::invalid(INVALID_REPO_ID))
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RepoDetail {
    pub repo: RepoRow,
}

impl RepoDetail {
    pub async fn load(
        backend: &BackendService,
        session: Option<&Session>,
        id: i64,
    ) -> Result<Self, ViewError> {
        let row = backend
            .repository()
            .get_repo(token_of(session), id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, repo_id = id, "Error fetching repo");
                ViewError::failed(FETCH_REPO_FAILED)
            })?;
        row.map(|repo| Self { repo })
            .ok_or_else(|| ViewError::not_found(REPO_NOT_FOUND))
    }

    pub fn rating_label(&self) -> String {
        self.repo
            .rating
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| NO_RATING_AVAILABLE.to_string())
    }

    pub fn stars(&self) -> Option<StarRow> {
        star_row(self.repo.rating)
    }

    /// Tags to render; empty when the row has none
    pub fn tags(&self) -> &[String] {
        self.repo.tags.as_deref().unwrap_or_default()
    }

    pub fn tags_label(&self) -> Option<&'static str> {
        self.tags().is_empty().then_some(NO_TAGS_AVAILABLE)
    }

    /// "View on GitHub" / "View on Replit"
    pub fn link_label(&self) -> String {
        format!("View on {}", self.repo.kind)
    }
}
