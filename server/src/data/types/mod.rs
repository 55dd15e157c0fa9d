//! Row types shared by every backend
//!
//! Table rows mirror the remote schema (`repos`, `lists`, `list_repos`,
//! `reviews`); auth types mirror the session payloads of the auth service.

mod auth;
mod catalog;

pub use auth::{AuthSession, AuthUser, SignUpOutcome};
pub use catalog::{
    ListRepoRow, ListRow, NewList, NewListRepo, NewReview, RepoKind, RepoRow, RepoSummary,
    ReviewRow, SavedRepoRow,
};
