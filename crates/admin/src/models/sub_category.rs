//! Product sub-categories.

use serde::{Deserialize, Serialize};
use shopdesk_core::SubCategoryId;

use crate::filter::Searchable;

/// A sub-category nested under a top-level category name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCategory {
    #[serde(alias = "_id")]
    pub id: SubCategoryId,
    pub name: String,
    #[serde(default)]
    pub category: String,
}

impl Searchable for SubCategory {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.category.as_str()]
    }
}

/// Create/update payload for a sub-category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubCategoryInput {
    pub name: String,
    pub category: String,
}

impl From<&SubCategory> for SubCategoryInput {
    fn from(sub: &SubCategory) -> Self {
        Self {
            name: sub.name.clone(),
            category: sub.category.clone(),
        }
    }
}
