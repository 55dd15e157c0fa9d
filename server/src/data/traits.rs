//! Repository traits for data backends
//!
//! Both the Supabase client and the in-memory backend implement these traits.
//! Every table call takes the caller's access token (when signed in) so the
//! remote service can apply its row-level policies.

use async_trait::async_trait;

use crate::data::error::{AuthServiceError, DataError};
use crate::data::types::{
    AuthSession, AuthUser, ListRepoRow, ListRow, NewList, NewListRepo, NewReview, RepoRow,
    ReviewRow, SavedRepoRow, SignUpOutcome,
};

// ============================================================================
// Catalog Repository Trait
// ============================================================================

/// Table operations for repos, lists, list memberships and reviews
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    // ==================== Repos ====================

    /// All repo rows, unfiltered
    async fn list_repos(&self, token: Option<&str>) -> Result<Vec<RepoRow>, DataError>;

    /// A single repo row, `None` when no row matches
    async fn get_repo(&self, token: Option<&str>, id: i64) -> Result<Option<RepoRow>, DataError>;

    // ==================== Reviews ====================

    /// Reviews for a repo, newest first
    async fn list_reviews(
        &self,
        token: Option<&str>,
        repo_id: i64,
    ) -> Result<Vec<ReviewRow>, DataError>;

    /// Insert one review row
    async fn insert_review(
        &self,
        token: Option<&str>,
        review: &NewReview,
    ) -> Result<ReviewRow, DataError>;

    // ==================== Lists ====================

    /// Lists owned by a user, ordered by name
    async fn list_lists(&self, token: Option<&str>, user_id: &str)
    -> Result<Vec<ListRow>, DataError>;

    /// A user's list with exactly this name, `None` when absent
    async fn find_list_by_name(
        &self,
        token: Option<&str>,
        user_id: &str,
        name: &str,
    ) -> Result<Option<ListRow>, DataError>;

    /// Insert one list row
    async fn insert_list(&self, token: Option<&str>, list: &NewList) -> Result<ListRow, DataError>;

    // ==================== List memberships ====================

    /// Memberships in the user's lists joined with their repos, newest first
    async fn list_saved_repos(
        &self,
        token: Option<&str>,
        user_id: &str,
    ) -> Result<Vec<SavedRepoRow>, DataError>;

    /// Insert one membership row
    async fn insert_list_repo(
        &self,
        token: Option<&str>,
        entry: &NewListRepo,
    ) -> Result<ListRepoRow, DataError>;

    /// Upsert one membership row (merge on primary key)
    async fn upsert_list_repo(
        &self,
        token: Option<&str>,
        entry: &NewListRepo,
    ) -> Result<ListRepoRow, DataError>;

    /// Delete the memberships of `repo_id` within the given lists.
    /// Returns the number of rows removed.
    async fn delete_list_repos(
        &self,
        token: Option<&str>,
        repo_id: i64,
        list_ids: &[i64],
    ) -> Result<usize, DataError>;
}

// ============================================================================
// Auth Provider Trait
// ============================================================================

/// Email/password authentication delegated to the auth service
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthServiceError>;

    async fn sign_up(&self, email: &str, password: &str)
    -> Result<SignUpOutcome, AuthServiceError>;

    /// Exchange a refresh token for a new session. The old refresh token is
    /// spent.
    async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, AuthServiceError>;

    /// Revoke the session behind `access_token`
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthServiceError>;

    /// Resolve an access token to its user; `None` for invalid or expired tokens
    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>, AuthServiceError>;

    /// Re-send the sign-up confirmation email
    async fn resend_confirmation(&self, email: &str) -> Result<(), AuthServiceError>;
}
