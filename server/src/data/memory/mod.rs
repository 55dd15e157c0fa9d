//! In-memory backend
//!
//! Holds the four catalog tables and a small user store behind a
//! `parking_lot::RwLock`. Used for local runs without a Supabase project and
//! as the backend in tests. Nothing is persisted.

mod seed;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::core::config::MemoryConfig;
use crate::core::constants::DEFAULT_SESSION_TTL_SECS;
use crate::data::error::{AuthServiceError, DataError};
use crate::data::traits::{AuthProvider, CatalogRepository};
use crate::data::types::{
    AuthSession, AuthUser, ListRepoRow, ListRow, NewList, NewListRepo, NewReview, RepoRow,
    RepoSummary, ReviewRow, SavedRepoRow, SignUpOutcome,
};

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
struct MemoryUser {
    id: String,
    email: String,
    password: String,
    confirmed: bool,
}

#[derive(Debug, Default)]
struct Tables {
    repos: Vec<RepoRow>,
    lists: Vec<ListRow>,
    /// Insertion order doubles as `created_at`
    list_repos: Vec<ListRepoRow>,
    reviews: Vec<ReviewRow>,
    users: HashMap<String, MemoryUser>,
    /// Access token to user id
    sessions: HashMap<String, String>,
    /// Unspent refresh token to user id
    refresh_tokens: HashMap<String, String>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn user_by_id(&self, user_id: &str) -> Option<&MemoryUser> {
        self.users.values().find(|u| u.id == user_id)
    }

    fn issue_session(&mut self, user_id: &str) -> Result<AuthSession, AuthServiceError> {
        let user = self
            .user_by_id(user_id)
            .map(|u| AuthUser {
                id: u.id.clone(),
                email: Some(u.email.clone()),
            })
            .ok_or_else(|| AuthServiceError::rejected(404, "User not found"))?;
        let token = uuid::Uuid::new_v4().to_string();
        let refresh = uuid::Uuid::new_v4().to_string();
        self.sessions.insert(token.clone(), user_id.to_string());
        self.refresh_tokens.insert(refresh.clone(), user_id.to_string());
        Ok(AuthSession {
            access_token: token,
            refresh_token: Some(refresh),
            expires_in: Some(DEFAULT_SESSION_TTL_SECS),
            user,
        })
    }
}

/// In-process implementation of both backend traits
pub struct MemoryService {
    tables: RwLock<Tables>,
    auto_confirm: bool,
}

impl MemoryService {
    pub fn new(config: &MemoryConfig) -> Self {
        let mut tables = Tables::default();
        if config.seed {
            tables.repos = seed::demo_repos();
            tables.next_id = tables.repos.len() as i64;
            tracing::debug!(repos = tables.repos.len(), "Seeded in-memory catalog");
        }
        Self {
            tables: RwLock::new(tables),
            auto_confirm: config.auto_confirm,
        }
    }

    /// Empty tables; sign-ups are confirmed immediately
    pub fn empty() -> Self {
        Self::new(&MemoryConfig {
            seed: false,
            auto_confirm: true,
        })
    }

    /// Replace the repo table
    pub fn with_repos(self, repos: Vec<RepoRow>) -> Self {
        {
            let mut tables = self.tables.write();
            let max_id = repos.iter().map(|r| r.id).max().unwrap_or(0);
            tables.next_id = tables.next_id.max(max_id);
            tables.repos = repos;
        }
        self
    }

    /// Mark an account confirmed, as following the emailed link would
    pub fn confirm_email(&self, email: &str) -> bool {
        let mut tables = self.tables.write();
        match tables.users.get_mut(&email.to_lowercase()) {
            Some(user) => {
                user.confirmed = true;
                true
            }
            None => false,
        }
    }

    /// Revoke an access token while leaving its refresh token usable, as
    /// happens when the token lifetime runs out
    pub fn expire_access_token(&self, access_token: &str) -> bool {
        self.tables.write().sessions.remove(access_token).is_some()
    }

    /// Number of rows in `reviews`
    pub fn review_count(&self) -> usize {
        self.tables.read().reviews.len()
    }

    /// Number of rows in `list_repos`
    pub fn list_repo_count(&self) -> usize {
        self.tables.read().list_repos.len()
    }
}

#[async_trait]
impl CatalogRepository for MemoryService {
    async fn list_repos(&self, _token: Option<&str>) -> Result<Vec<RepoRow>, DataError> {
        Ok(self.tables.read().repos.clone())
    }

    async fn get_repo(&self, _token: Option<&str>, id: i64) -> Result<Option<RepoRow>, DataError> {
        Ok(self.tables.read().repos.iter().find(|r| r.id == id).cloned())
    }

    async fn list_reviews(
        &self,
        _token: Option<&str>,
        repo_id: i64,
    ) -> Result<Vec<ReviewRow>, DataError> {
        let mut reviews: Vec<ReviewRow> = self
            .tables
            .read()
            .reviews
            .iter()
            .filter(|r| r.repo_id == repo_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(reviews)
    }

    async fn insert_review(
        &self,
        _token: Option<&str>,
        review: &NewReview,
    ) -> Result<ReviewRow, DataError> {
        let mut tables = self.tables.write();
        if !tables.repos.iter().any(|r| r.id == review.repo_id) {
            return Err(DataError::NotFound(format!("repo {}", review.repo_id)));
        }
        let row = ReviewRow {
            id: tables.next_id(),
            user_id: review.user_id.clone(),
            repo_id: review.repo_id,
            rating: review.rating,
            content: review.content.clone(),
            created_at: Utc::now(),
        };
        tables.reviews.push(row.clone());
        Ok(row)
    }

    async fn list_lists(
        &self,
        _token: Option<&str>,
        user_id: &str,
    ) -> Result<Vec<ListRow>, DataError> {
        let mut lists: Vec<ListRow> = self
            .tables
            .read()
            .lists
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        lists.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(lists)
    }

    async fn find_list_by_name(
        &self,
        _token: Option<&str>,
        user_id: &str,
        name: &str,
    ) -> Result<Option<ListRow>, DataError> {
        Ok(self
            .tables
            .read()
            .lists
            .iter()
            .find(|l| l.user_id == user_id && l.name == name)
            .cloned())
    }

    async fn insert_list(
        &self,
        _token: Option<&str>,
        list: &NewList,
    ) -> Result<ListRow, DataError> {
        let mut tables = self.tables.write();
        let row = ListRow {
            id: tables.next_id(),
            user_id: list.user_id.clone(),
            name: list.name.clone(),
            description: list.description.clone(),
        };
        tables.lists.push(row.clone());
        Ok(row)
    }

    async fn list_saved_repos(
        &self,
        _token: Option<&str>,
        user_id: &str,
    ) -> Result<Vec<SavedRepoRow>, DataError> {
        let tables = self.tables.read();
        let owned = |list_id: Option<i64>| {
            tables
                .lists
                .iter()
                .any(|l| Some(l.id) == list_id && l.user_id == user_id)
        };
        Ok(tables
            .list_repos
            .iter()
            .rev()
            .filter(|m| owned(m.list_id))
            .map(|m| SavedRepoRow {
                id: m.id,
                list_id: m.list_id,
                repos: tables
                    .repos
                    .iter()
                    .find(|r| r.id == m.repo_id)
                    .map(RepoSummary::from),
            })
            .collect())
    }

    async fn insert_list_repo(
        &self,
        _token: Option<&str>,
        entry: &NewListRepo,
    ) -> Result<ListRepoRow, DataError> {
        let mut tables = self.tables.write();
        let row = ListRepoRow {
            id: tables.next_id(),
            list_id: Some(entry.list_id),
            repo_id: entry.repo_id,
        };
        tables.list_repos.push(row.clone());
        Ok(row)
    }

    async fn upsert_list_repo(
        &self,
        token: Option<&str>,
        entry: &NewListRepo,
    ) -> Result<ListRepoRow, DataError> {
        // No primary key in the payload, so the merge never finds a duplicate
        self.insert_list_repo(token, entry).await
    }

    async fn delete_list_repos(
        &self,
        _token: Option<&str>,
        repo_id: i64,
        list_ids: &[i64],
    ) -> Result<usize, DataError> {
        let mut tables = self.tables.write();
        let before = tables.list_repos.len();
        tables.list_repos.retain(|m| {
            !(m.repo_id == repo_id && m.list_id.is_some_and(|id| list_ids.contains(&id)))
        });
        Ok(before - tables.list_repos.len())
    }
}

#[async_trait]
impl AuthProvider for MemoryService {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthServiceError> {
        let mut tables = self.tables.write();
        let user = tables
            .users
            .get(&email.to_lowercase())
            .filter(|u| u.password == password)
            .cloned()
            .ok_or_else(|| AuthServiceError::rejected(400, "Invalid login credentials"))?;
        if !user.confirmed {
            return Err(AuthServiceError::rejected(400, "Email not confirmed"));
        }
        tables.issue_session(&user.id)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignUpOutcome, AuthServiceError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthServiceError::rejected(
                422,
                format!(
                    "Password should be at least {} characters.",
                    MIN_PASSWORD_LEN
                ),
            ));
        }
        let key = email.to_lowercase();
        let mut tables = self.tables.write();
        if tables.users.contains_key(&key) {
            return Err(AuthServiceError::rejected(422, "User already registered"));
        }
        let user = MemoryUser {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirmed: self.auto_confirm,
        };
        let id = user.id.clone();
        tables.users.insert(key, user);

        if self.auto_confirm {
            return tables.issue_session(&id).map(SignUpOutcome::SignedIn);
        }
        Ok(SignUpOutcome::ConfirmationSent {
            user: Some(AuthUser {
                id,
                email: Some(email.to_string()),
            }),
        })
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, AuthServiceError> {
        let mut tables = self.tables.write();
        let user_id = tables
            .refresh_tokens
            .remove(refresh_token)
            .ok_or_else(|| AuthServiceError::rejected(400, "Invalid Refresh Token"))?;
        tables.issue_session(&user_id)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthServiceError> {
        let mut tables = self.tables.write();
        if let Some(user_id) = tables.sessions.remove(access_token) {
            tables.refresh_tokens.retain(|_, owner| *owner != user_id);
        }
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>, AuthServiceError> {
        let tables = self.tables.read();
        Ok(tables
            .sessions
            .get(access_token)
            .and_then(|user_id| tables.user_by_id(user_id))
            .map(|u| AuthUser {
                id: u.id.clone(),
                email: Some(u.email.clone()),
            }))
    }

    async fn resend_confirmation(&self, email: &str) -> Result<(), AuthServiceError> {
        let tables = self.tables.read();
        match tables.users.get(&email.to_lowercase()) {
            Some(user) if user.confirmed => {
                Err(AuthServiceError::rejected(422, "Email already confirmed"))
            }
            _ => Ok(()),
        }
    }
}
