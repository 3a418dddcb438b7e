//! Home page carousel images.

use serde::{Deserialize, Serialize};
use shopdesk_core::ImageId;

use super::default_true;
use crate::filter::Searchable;

/// A carousel slide. `order` defines the display sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselImage {
    #[serde(alias = "_id")]
    pub id: ImageId,
    pub image_url: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Searchable for CarouselImage {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.image_url.as_str()]
    }
}

/// Create/update payload for a carousel image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselImageInput {
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    pub is_active: bool,
}

impl Default for CarouselImageInput {
    fn default() -> Self {
        Self {
            image_url: String::new(),
            order: None,
            is_active: true,
        }
    }
}

impl From<&CarouselImage> for CarouselImageInput {
    fn from(image: &CarouselImage) -> Self {
        Self {
            image_url: image.image_url.clone(),
            order: Some(image.order),
            is_active: image.is_active,
        }
    }
}

/// Partial update setting only the display position.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ImageOrderUpdate {
    pub order: i32,
}

/// One entry of a batch reorder request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEntry {
    pub id: ImageId,
    pub order: i32,
}

/// Body of the batch reorder request.
#[derive(Debug, Clone, Serialize)]
pub struct ReorderRequest {
    pub items: Vec<OrderEntry>,
}
