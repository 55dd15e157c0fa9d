//! Listing screen: the full catalog plus search and category filters

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::data::BackendService;
use crate::data::types::{RepoKind, RepoRow};

use super::error::ViewError;
use super::messages::LOAD_INITIAL_FAILED;
use super::session::{Session, token_of};

/// Category selector: every row, or one repo type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Kind(RepoKind),
}

impl CategoryFilter {
    pub fn matches(&self, repo: &RepoRow) -> bool {
        match self {
            Self::All => true,
            Self::Kind(kind) => repo.kind == *kind,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Kind(kind) => kind.as_str(),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(Self::All),
            other => other.parse::<RepoKind>().map(Self::Kind),
        }
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        value.as_str().to_string()
    }
}

/// Case-insensitive substring match on name, description, or any tag.
/// The query is used as typed, so surrounding spaces take part in the match.
pub fn matches_query(repo: &RepoRow, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    repo.name.to_lowercase().contains(&needle)
        || repo.description.to_lowercase().contains(&needle)
        || repo
            .tags
            .iter()
            .flatten()
            .any(|tag| tag.to_lowercase().contains(&needle))
}

/// Rows passing both the text query and the category, in original order
pub fn filter_repos(repos: &[RepoRow], query: &str, category: CategoryFilter) -> Vec<RepoRow> {
    repos
        .iter()
        .filter(|r| category.matches(r) && matches_query(r, query))
        .cloned()
        .collect()
}

/// Listing screen state
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct ListingScreen {
    #[serde(skip)]
    projects: Vec<RepoRow>,
    query: String,
    #[schema(value_type = String, example = "all")]
    category: CategoryFilter,
    /// Rows passing the current query and category
    #[serde(rename = "repos")]
    filtered: Vec<RepoRow>,
}

impl ListingScreen {
    /// Fetch every repo row and show them unfiltered
    pub async fn load(
        backend: &BackendService,
        session: Option<&Session>,
    ) -> Result<Self, ViewError> {
        let rows = backend
            .repository()
            .list_repos(token_of(session))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to load repos");
                ViewError::failed(format!("{}: {}", LOAD_INITIAL_FAILED, e))
            })?;
        tracing::debug!(count = rows.len(), "Loaded repos");
        Ok(Self::from_rows(rows))
    }

    pub fn from_rows(projects: Vec<RepoRow>) -> Self {
        Self {
            filtered: projects.clone(),
            projects,
            query: String::new(),
            category: CategoryFilter::All,
        }
    }

    /// Apply a new text query, keeping the current category
    pub fn search(&mut self, query: &str) {
        self.query = query.to_string();
        self.refilter();
    }

    /// Apply a new category, keeping the current text query
    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = filter_repos(&self.projects, &self.query, self.category);
    }

    pub fn visible(&self) -> &[RepoRow] {
        &self.filtered
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn category(&self) -> CategoryFilter {
        self.category
    }
}
