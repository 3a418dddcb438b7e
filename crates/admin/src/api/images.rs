//! Home page carousel operations.

use shopdesk_core::ImageId;
use tracing::instrument;

use super::Ack;
use crate::client::{ApiClient, item_path};
use crate::controller::Resource;
use crate::dialog::FormModel;
use crate::error::ApiError;
use crate::models::{CarouselImage, CarouselImageInput, ImageOrderUpdate, OrderEntry, ReorderRequest};
use crate::reorder::{PositionStore, Positioned};

impl ApiClient {
    /// List carousel images in stored order.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_images(&self) -> Result<Vec<CarouselImage>, ApiError> {
        let mut images: Vec<CarouselImage> = self.get("images").await?;
        images.sort_by_key(|image| image.order);
        Ok(images)
    }

    /// Add a carousel image.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, input))]
    pub async fn create_image(&self, input: &CarouselImageInput) -> Result<CarouselImage, ApiError> {
        self.post("images", input).await
    }

    /// Replace a carousel image's fields.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, input), fields(image_id = %id))]
    pub async fn update_image(
        &self,
        id: &ImageId,
        input: &CarouselImageInput,
    ) -> Result<CarouselImage, ApiError> {
        self.put(&item_path("images", id.as_str()), input).await
    }

    /// Set the display position of one image.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(image_id = %id))]
    pub async fn update_image_order(&self, id: &ImageId, order: i32) -> Result<(), ApiError> {
        let _: Ack = self
            .put(&item_path("images", id.as_str()), &ImageOrderUpdate { order })
            .await?;
        Ok(())
    }

    /// Set the display position of every listed image in one request.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails; no position is changed then.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn reorder_images(&self, items: Vec<OrderEntry>) -> Result<(), ApiError> {
        let _: Ack = self.put("images/reorder", &ReorderRequest { items }).await?;
        Ok(())
    }

    /// Remove a carousel image.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(image_id = %id))]
    pub async fn delete_image(&self, id: &ImageId) -> Result<(), ApiError> {
        self.delete(&item_path("images", id.as_str())).await
    }
}

impl Resource for CarouselImage {
    const PLURAL: &'static str = "images";

    async fn fetch_all(client: &ApiClient) -> Result<Vec<Self>, ApiError> {
        client.list_images().await
    }
}

impl Positioned for CarouselImage {
    type Id = ImageId;

    fn position_id(&self) -> &ImageId {
        &self.id
    }

    fn position(&self) -> i32 {
        self.order
    }
}

impl PositionStore<CarouselImage> for ApiClient {
    async fn set_position(&self, id: &ImageId, position: i32) -> Result<(), ApiError> {
        self.update_image_order(id, position).await
    }

    async fn set_positions(&self, positions: &[(ImageId, i32)]) -> Result<(), ApiError> {
        let items = positions
            .iter()
            .map(|(id, order)| OrderEntry {
                id: id.clone(),
                order: *order,
            })
            .collect();
        self.reorder_images(items).await
    }
}

impl FormModel for CarouselImageInput {
    type Entity = CarouselImage;
    type Key = ImageId;
    const NOUN: &'static str = "Image";

    fn blank() -> Self {
        Self::default()
    }

    fn from_entity(entity: &CarouselImage) -> Self {
        Self::from(entity)
    }

    fn key_of(entity: &CarouselImage) -> ImageId {
        entity.id.clone()
    }

    fn missing_fields(&self, _creating: bool) -> Vec<&'static str> {
        if self.image_url.is_empty() {
            vec!["image URL"]
        } else {
            Vec::new()
        }
    }

    async fn create(&self, client: &ApiClient) -> Result<CarouselImage, ApiError> {
        client.create_image(self).await
    }

    async fn update(&self, client: &ApiClient, key: &ImageId) -> Result<CarouselImage, ApiError> {
        client.update_image(key, self).await
    }
}
