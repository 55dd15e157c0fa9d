use async_trait::async_trait;

use super::SupabaseService;
use crate::core::constants::{TABLE_LIST_REPOS, TABLE_LISTS, TABLE_REPOS, TABLE_REVIEWS};
use crate::data::error::DataError;
use crate::data::traits::CatalogRepository;
use crate::data::types::{
    ListRepoRow, ListRow, NewList, NewListRepo, NewReview, RepoRow, ReviewRow, SavedRepoRow,
};

/// Membership columns plus the joined repo; `lists!inner` restricts rows to the owner's lists
const SAVED_REPO_COLUMNS: &str = "id,list_id,repos(id,name,description,url),lists!inner(user_id)";

#[async_trait]
impl CatalogRepository for SupabaseService {
    async fn list_repos(&self, token: Option<&str>) -> Result<Vec<RepoRow>, DataError> {
        self.from_table(TABLE_REPOS)
            .auth(token)
            .select("*")
            .fetch()
            .await
    }

    async fn get_repo(&self, token: Option<&str>, id: i64) -> Result<Option<RepoRow>, DataError> {
        self.from_table(TABLE_REPOS)
            .auth(token)
            .select("*")
            .eq("id", id)
            .fetch_optional()
            .await
    }

    async fn list_reviews(
        &self,
        token: Option<&str>,
        repo_id: i64,
    ) -> Result<Vec<ReviewRow>, DataError> {
        self.from_table(TABLE_REVIEWS)
            .auth(token)
            .select("*")
            .eq("repo_id", repo_id)
            .order("created_at", false)
            .fetch()
            .await
    }

    async fn insert_review(
        &self,
        token: Option<&str>,
        review: &NewReview,
    ) -> Result<ReviewRow, DataError> {
        self.from_table(TABLE_REVIEWS)
            .auth(token)
            .insert(review)?
            .fetch_first()
            .await
    }

    async fn list_lists(
        &self,
        token: Option<&str>,
        user_id: &str,
    ) -> Result<Vec<ListRow>, DataError> {
        self.from_table(TABLE_LISTS)
            .auth(token)
            .select("*")
            .eq("user_id", user_id)
            .order("name", true)
            .fetch()
            .await
    }

    async fn find_list_by_name(
        &self,
        token: Option<&str>,
        user_id: &str,
        name: &str,
    ) -> Result<Option<ListRow>, DataError> {
        self.from_table(TABLE_LISTS)
            .auth(token)
            .select("*")
            .eq("user_id", user_id)
            .eq("name", name)
            .fetch_optional()
            .await
    }

    async fn insert_list(&self, token: Option<&str>, list: &NewList) -> Result<ListRow, DataError> {
        self.from_table(TABLE_LISTS)
            .auth(token)
            .insert(list)?
            .fetch_first()
            .await
    }

    async fn list_saved_repos(
        &self,
        token: Option<&str>,
        user_id: &str,
    ) -> Result<Vec<SavedRepoRow>, DataError> {
        self.from_table(TABLE_LIST_REPOS)
            .auth(token)
            .select(SAVED_REPO_COLUMNS)
            .eq("lists.user_id", user_id)
            .order("created_at", false)
            .fetch()
            .await
    }

    async fn insert_list_repo(
        &self,
        token: Option<&str>,
        entry: &NewListRepo,
    ) -> Result<ListRepoRow, DataError> {
        self.from_table(TABLE_LIST_REPOS)
            .auth(token)
            .insert(entry)?
            .fetch_first()
            .await
    }

    async fn upsert_list_repo(
        &self,
        token: Option<&str>,
        entry: &NewListRepo,
    ) -> Result<ListRepoRow, DataError> {
        self.from_table(TABLE_LIST_REPOS)
            .auth(token)
            .upsert(entry)?
            .fetch_first()
            .await
    }

    async fn delete_list_repos(
        &self,
        token: Option<&str>,
        repo_id: i64,
        list_ids: &[i64],
    ) -> Result<usize, DataError> {
        if list_ids.is_empty() {
            return Ok(0);
        }
        let deleted: Vec<ListRepoRow> = self
            .from_table(TABLE_LIST_REPOS)
            .auth(token)
            .eq("repo_id", repo_id)
            .in_list("list_id", list_ids)
            .delete()
            .fetch()
            .await?;
        Ok(deleted.len())
    }
}
