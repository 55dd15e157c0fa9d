//! Review panel on the repo detail page

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::core::constants::MAX_REVIEW_LENGTH;
use crate::data::BackendService;
use crate::data::types::{NewReview, ReviewRow};

use super::error::ViewError;
use super::messages::{
    LOAD_REVIEWS_FAILED, REVIEW_RATING_INVALID, REVIEW_REQUIRES_LOGIN, REVIEW_SUBMITTED,
    SUBMIT_REVIEW_FAILED,
};
use super::session::{Session, token_of};

/// Review form input. A rating of 0 is the unselected placeholder.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ReviewDraft {
    #[serde(default)]
    #[validate(range(min = 1, max = 5, message = "Please select a rating between 1 and 5"))]
    pub rating: i32,
    #[serde(default)]
    #[validate(length(max = MAX_REVIEW_LENGTH, message = "Review is too long"))]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewPanel {
    pub repo_id: i64,
    /// Newest first
    pub reviews: Vec<ReviewRow>,
}

impl ReviewPanel {
    pub async fn load(
        backend: &BackendService,
        session: Option<&Session>,
        repo_id: i64,
    ) -> Result<Self, ViewError> {
        let reviews = backend
            .repository()
            .list_reviews(token_of(session), repo_id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, repo_id, "Failed to load reviews");
                ViewError::failed(LOAD_REVIEWS_FAILED)
            })?;
        Ok(Self { repo_id, reviews })
    }

    /// Insert one review and reload the panel.
    ///
    /// Without a session nothing is sent to the backend.
    pub async fn submit(
        &mut self,
        backend: &BackendService,
        session: Option<&Session>,
        draft: &ReviewDraft,
    ) -> Result<&'static str, ViewError> {
        let session = session.ok_or_else(|| ViewError::unauthenticated(REVIEW_REQUIRES_LOGIN))?;
        if let Err(errors) = draft.validate() {
            tracing::debug!(%errors, "Rejected review draft");
            let message = if errors.field_errors().contains_key("rating") {
                REVIEW_RATING_INVALID.to_string()
            } else {
                errors.to_string()
            };
            return Err(ViewError::invalid(message));
        }

        let review = NewReview {
            repo_id: self.repo_id,
            user_id: session.user.id.clone(),
            rating: draft.rating,
            content: draft.content.trim().to_string(),
        };
        backend
            .repository()
            .insert_review(session.token(), &review)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, repo_id = self.repo_id, "Failed to submit review");
                ViewError::failed(SUBMIT_REVIEW_FAILED)
            })?;

        *self = Self::load(backend, Some(session), self.repo_id).await?;
        Ok(REVIEW_SUBMITTED)
    }
}
