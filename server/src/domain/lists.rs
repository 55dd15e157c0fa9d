//! Lists screen: the user's lists and the repos saved into them
//!
//! Memberships live in `list_repos`. A move is delete-then-upsert; moving to
//! "Unsorted" only deletes, leaving the repo visible locally with no list
//! until the next reload.

use serde::Serialize;
use utoipa::ToSchema;

use crate::core::constants::SAVED_LIST_NAME;
use crate::data::BackendService;
use crate::data::types::{ListRow, NewList, NewListRepo, SavedRepoRow};

use super::error::ViewError;
use super::messages::{
    ALL_SAVED_HEADING, CREATE_LIST_FAILED, FETCH_LISTS_FAILED, FETCH_SAVED_FAILED,
    LIST_NAME_REQUIRED, MOVE_FAILED, MOVE_TO_UNSORTED_FAILED, REMOVE_FAILED, SAVE_FAILED,
    SAVE_REQUIRES_LOGIN, SAVE_SUCCESS, SAVED_HEADING_FALLBACK,
};
use super::session::Session;

/// A saved repo as shown on the lists screen
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SavedRepo {
    /// Repo id
    pub id: i64,
    pub name: String,
    pub description: String,
    pub url: String,
    /// `None` when the repo is unsorted
    pub list_id: Option<i64>,
}

impl SavedRepo {
    /// Rows whose repo no longer exists are dropped
    fn from_row(row: SavedRepoRow) -> Option<Self> {
        let repo = row.repos?;
        Some(Self {
            id: repo.id,
            name: repo.name,
            description: repo.description,
            url: repo.url,
            list_id: row.list_id,
        })
    }
}

/// Destination of a move. The select control encodes Unsorted as `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTarget {
    Unsorted,
    List(i64),
}

impl From<i64> for MoveTarget {
    fn from(value: i64) -> Self {
        if value == 0 {
            Self::Unsorted
        } else {
            Self::List(value)
        }
    }
}

impl MoveTarget {
    pub fn list_id(self) -> Option<i64> {
        match self {
            Self::Unsorted => None,
            Self::List(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct ListsScreen {
    lists: Vec<ListRow>,
    saved: Vec<SavedRepo>,
    selected: Option<i64>,
}

impl ListsScreen {
    pub async fn load(backend: &BackendService, session: &Session) -> Result<Self, ViewError> {
        let repo = backend.repository();
        let token = session.token();
        let user_id = session.user.id.as_str();

        let lists = async {
            repo.list_lists(token, user_id).await.map_err(|e| {
                tracing::error!(error = %e, user_id, "Failed to fetch lists");
                ViewError::failed(FETCH_LISTS_FAILED)
            })
        };
        let saved = async {
            repo.list_saved_repos(token, user_id).await.map_err(|e| {
                tracing::error!(error = %e, user_id, "Failed to fetch saved repos");
                ViewError::failed(FETCH_SAVED_FAILED)
            })
        };
        let (lists, saved) = futures::try_join!(lists, saved)?;

        Ok(Self {
            lists,
            saved: saved.into_iter().filter_map(SavedRepo::from_row).collect(),
            selected: None,
        })
    }

    pub fn lists(&self) -> &[ListRow] {
        &self.lists
    }

    pub fn saved(&self) -> &[SavedRepo] {
        &self.saved
    }

    pub fn selected(&self) -> Option<i64> {
        self.selected
    }

    pub fn select(&mut self, list_id: Option<i64>) {
        self.selected = list_id;
    }

    pub fn heading(&self) -> &str {
        match self.selected {
            None => ALL_SAVED_HEADING,
            Some(id) => self
                .lists
                .iter()
                .find(|l| l.id == id)
                .map(|l| l.name.as_str())
                .unwrap_or(SAVED_HEADING_FALLBACK),
        }
    }

    /// Saved repos in the selected list, or all of them when nothing is selected
    pub fn visible(&self) -> impl Iterator<Item = &SavedRepo> {
        self.saved
            .iter()
            .filter(move |r| self.selected.is_none() || r.list_id == self.selected)
    }

    pub async fn create_list(
        &mut self,
        backend: &BackendService,
        session: &Session,
        name: &str,
        description: Option<&str>,
    ) -> Result<&ListRow, ViewError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ViewError::invalid(LIST_NAME_REQUIRED));
        }
        let new_list = NewList {
            name: name.to_string(),
            description: description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            user_id: session.user.id.clone(),
        };
        let row = backend
            .repository()
            .insert_list(session.token(), &new_list)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to create list");
                ViewError::failed(CREATE_LIST_FAILED)
            })?;
        tracing::debug!(list_id = row.id, name = %row.name, "Created list");
        self.lists.push(row);
        Ok(&self.lists[self.lists.len() - 1])
    }

    fn owned_list_ids(&self) -> Vec<i64> {
        self.lists.iter().map(|l| l.id).collect()
    }

    pub async fn move_repo(
        &mut self,
        backend: &BackendService,
        session: &Session,
        repo_id: i64,
        target: MoveTarget,
    ) -> Result<(), ViewError> {
        let repo = backend.repository();
        let token = session.token();
        let failure = match target {
            MoveTarget::Unsorted => MOVE_TO_UNSORTED_FAILED,
            MoveTarget::List(_) => MOVE_FAILED,
        };
        let fail = |e: crate::data::error::DataError| {
            tracing::error!(error = %e, repo_id, ?target, "Failed to move repo");
            ViewError::failed(failure)
        };

        repo.delete_list_repos(token, repo_id, &self.owned_list_ids())
            .await
            .map_err(fail)?;
        if let MoveTarget::List(list_id) = target {
            repo.upsert_list_repo(token, &NewListRepo { repo_id, list_id })
                .await
                .map_err(fail)?;
        }

        for entry in self.saved.iter_mut().filter(|r| r.id == repo_id) {
            entry.list_id = target.list_id();
        }
        Ok(())
    }

    pub async fn remove_repo(
        &mut self,
        backend: &BackendService,
        session: &Session,
        repo_id: i64,
    ) -> Result<(), ViewError> {
        let removed = backend
            .repository()
            .delete_list_repos(session.token(), repo_id, &self.owned_list_ids())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, repo_id, "Failed to remove repo");
                ViewError::failed(REMOVE_FAILED)
            })?;
        tracing::debug!(repo_id, removed, "Removed saved repo");
        self.saved.retain(|r| r.id != repo_id);
        Ok(())
    }
}

/// Save a repo into the user's "Saved" list, creating the list on first use
pub async fn save_to_saved_list(
    backend: &BackendService,
    session: Option<&Session>,
    repo_id: i64,
) -> Result<&'static str, ViewError> {
    let session = session.ok_or_else(|| ViewError::unauthenticated(SAVE_REQUIRES_LOGIN))?;
    let repo = backend.repository();
    let token = session.token();
    let user_id = session.user.id.as_str();
    let fail = |e: crate::data::error::DataError| {
        tracing::error!(error = %e, repo_id, "Failed to save repo");
        ViewError::failed(SAVE_FAILED)
    };

    let list = match repo
        .find_list_by_name(token, user_id, SAVED_LIST_NAME)
        .await
        .map_err(fail)?
    {
        Some(list) => list,
        None => {
            tracing::debug!(user_id, "Creating default saved list");
            repo.insert_list(
                token,
                &NewList {
                    name: SAVED_LIST_NAME.to_string(),
                    description: None,
                    user_id: user_id.to_string(),
                },
            )
            .await
            .map_err(fail)?
        }
    };

    repo.insert_list_repo(
        token,
        &NewListRepo {
            repo_id,
            list_id: list.id,
        },
    )
    .await
    .map_err(fail)?;
    Ok(SAVE_SUCCESS)
}
