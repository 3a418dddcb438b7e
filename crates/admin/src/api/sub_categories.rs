//! Sub-category operations.

use shopdesk_core::SubCategoryId;
use tracing::instrument;

use crate::client::{ApiClient, item_path};
use crate::controller::Resource;
use crate::dialog::FormModel;
use crate::error::ApiError;
use crate::models::{SubCategory, SubCategoryInput};

impl ApiClient {
    /// List all sub-categories.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_sub_categories(&self) -> Result<Vec<SubCategory>, ApiError> {
        self.get("subcategories").await
    }

    /// Create a sub-category.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_sub_category(
        &self,
        input: &SubCategoryInput,
    ) -> Result<SubCategory, ApiError> {
        self.post("subcategories", input).await
    }

    /// Rename or re-parent a sub-category.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, input), fields(sub_category_id = %id))]
    pub async fn update_sub_category(
        &self,
        id: &SubCategoryId,
        input: &SubCategoryInput,
    ) -> Result<SubCategory, ApiError> {
        self.put(&item_path("subcategories", id.as_str()), input).await
    }

    /// Delete a sub-category.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(sub_category_id = %id))]
    pub async fn delete_sub_category(&self, id: &SubCategoryId) -> Result<(), ApiError> {
        self.delete(&item_path("subcategories", id.as_str())).await
    }
}

impl Resource for SubCategory {
    const PLURAL: &'static str = "sub-categories";

    async fn fetch_all(client: &ApiClient) -> Result<Vec<Self>, ApiError> {
        client.list_sub_categories().await
    }
}

impl FormModel for SubCategoryInput {
    type Entity = SubCategory;
    type Key = SubCategoryId;
    const NOUN: &'static str = "Sub-category";

    fn blank() -> Self {
        Self::default()
    }

    fn from_entity(entity: &SubCategory) -> Self {
        Self::from(entity)
    }

    fn key_of(entity: &SubCategory) -> SubCategoryId {
        entity.id.clone()
    }

    fn missing_fields(&self, _creating: bool) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push("name");
        }
        if self.category.is_empty() {
            missing.push("category");
        }
        missing
    }

    async fn create(&self, client: &ApiClient) -> Result<SubCategory, ApiError> {
        client.create_sub_category(self).await
    }

    async fn update(
        &self,
        client: &ApiClient,
        key: &SubCategoryId,
    ) -> Result<SubCategory, ApiError> {
        client.update_sub_category(key, self).await
    }
}
