//! Review moderation operations.

use shopdesk_core::{ReviewId, ReviewStatus};
use tracing::instrument;

use super::Ack;
use crate::client::{ApiClient, action_path, item_path};
use crate::controller::Resource;
use crate::dialog::FormModel;
use crate::error::ApiError;
use crate::models::{Review, ReviewResponseInput, ReviewStatusUpdate};

impl ApiClient {
    /// List all reviews, whatever their moderation status.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_reviews(&self) -> Result<Vec<Review>, ApiError> {
        self.get("reviews").await
    }

    /// Approve or reject a review.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(review_id = %id, status = %status))]
    pub async fn set_review_status(
        &self,
        id: &ReviewId,
        status: ReviewStatus,
    ) -> Result<(), ApiError> {
        let _: Ack = self
            .patch(&action_path("reviews", id.as_str(), "status"), &ReviewStatusUpdate { status })
            .await?;
        Ok(())
    }

    /// Publish the store's response to a review.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, input), fields(review_id = %id))]
    pub async fn respond_to_review(
        &self,
        id: &ReviewId,
        input: &ReviewResponseInput,
    ) -> Result<Review, ApiError> {
        self.patch(&action_path("reviews", id.as_str(), "response"), input).await
    }

    /// Delete a review.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(review_id = %id))]
    pub async fn delete_review(&self, id: &ReviewId) -> Result<(), ApiError> {
        self.delete(&item_path("reviews", id.as_str())).await
    }
}

impl Resource for Review {
    const PLURAL: &'static str = "reviews";

    async fn fetch_all(client: &ApiClient) -> Result<Vec<Self>, ApiError> {
        client.list_reviews().await
    }
}

impl FormModel for ReviewResponseInput {
    type Entity = Review;
    type Key = ReviewId;
    const NOUN: &'static str = "Response";

    fn blank() -> Self {
        Self::default()
    }

    fn from_entity(entity: &Review) -> Self {
        Self::from(entity)
    }

    fn key_of(entity: &Review) -> ReviewId {
        entity.id.clone()
    }

    fn missing_fields(&self, _creating: bool) -> Vec<&'static str> {
        if self.admin_response.is_empty() {
            vec!["response"]
        } else {
            Vec::new()
        }
    }

    async fn update(&self, client: &ApiClient, key: &ReviewId) -> Result<Review, ApiError> {
        client.respond_to_review(key, self).await
    }
}
