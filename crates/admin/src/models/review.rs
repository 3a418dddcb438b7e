//! Product reviews awaiting or past moderation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shopdesk_core::{ProductId, ReviewId, ReviewStatus};

use crate::filter::Searchable;

/// Product reference embedded in a review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewProduct {
    #[serde(alias = "_id")]
    pub id: Option<ProductId>,
    #[serde(alias = "name")]
    pub title: String,
}

/// Reviewer reference embedded in a review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewCustomer {
    pub name: String,
    pub email: Option<String>,
}

/// A product review with a 1-5 star rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(alias = "_id")]
    pub id: ReviewId,
    #[serde(default)]
    pub product: ReviewProduct,
    #[serde(default)]
    pub customer: ReviewCustomer,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub status: ReviewStatus,
    #[serde(default)]
    pub admin_response: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Review {
    /// Rating rendered as filled/empty stars, clamped to 0..=5.
    #[must_use]
    pub fn stars(&self) -> String {
        let filled = usize::from(self.rating.min(5));
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
    }
}

impl Searchable for Review {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.product.title.as_str(),
            self.customer.name.as_str(),
            self.comment.as_str(),
        ]
    }
}

/// Body of the approve/reject action.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReviewStatusUpdate {
    pub status: ReviewStatus,
}

/// Payload for the admin response dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponseInput {
    pub admin_response: String,
}

impl From<&Review> for ReviewResponseInput {
    fn from(review: &Review) -> Self {
        Self {
            admin_response: review.admin_response.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_stars() {
        let review: Review =
            serde_json::from_str(r#"{"id":"r1","rating":3,"comment":"ok"}"#).unwrap();
        assert_eq!(review.stars(), "★★★☆☆");
        assert_eq!(review.status, ReviewStatus::Pending);
    }

    #[test]
    fn test_stars_clamps_out_of_range_rating() {
        let review: Review = serde_json::from_str(r#"{"id":"r2","rating":9}"#).unwrap();
        assert_eq!(review.stars(), "★★★★★");
    }
}
