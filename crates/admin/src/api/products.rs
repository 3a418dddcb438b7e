//! Product catalogue operations.

use shopdesk_core::ProductId;
use tracing::instrument;

use crate::client::{ApiClient, item_path};
use crate::controller::Resource;
use crate::dialog::FormModel;
use crate::error::ApiError;
use crate::models::{Product, ProductInput};

impl ApiClient {
    /// List all products, active or not.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get("products").await
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_product(&self, input: &ProductInput) -> Result<Product, ApiError> {
        self.post("products", input).await
    }

    /// Replace a product's fields.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        input: &ProductInput,
    ) -> Result<Product, ApiError> {
        self.put(&item_path("products", id.as_str()), input).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError> {
        self.delete(&item_path("products", id.as_str())).await
    }
}

impl Resource for Product {
    const PLURAL: &'static str = "products";

    async fn fetch_all(client: &ApiClient) -> Result<Vec<Self>, ApiError> {
        client.list_products().await
    }
}

impl FormModel for ProductInput {
    type Entity = Product;
    type Key = ProductId;
    const NOUN: &'static str = "Product";

    fn blank() -> Self {
        Self::default()
    }

    fn from_entity(entity: &Product) -> Self {
        Self::from(entity)
    }

    fn key_of(entity: &Product) -> ProductId {
        entity.id.clone()
    }

    fn missing_fields(&self, _creating: bool) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.is_empty() {
            missing.push("title");
        }
        if self.price.is_none() {
            missing.push("price");
        }
        if self.stock.is_none() {
            missing.push("stock");
        }
        missing
    }

    async fn create(&self, client: &ApiClient) -> Result<Product, ApiError> {
        client.create_product(self).await
    }

    async fn update(&self, client: &ApiClient, key: &ProductId) -> Result<Product, ApiError> {
        client.update_product(key, self).await
    }
}
