//! Catalogue products.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopdesk_core::ProductId;

use super::default_true;
use crate::filter::Searchable;

/// A product in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: ProductId,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Product {
    /// Whether any stock is left.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

impl Searchable for Product {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.category.as_deref());
        fields.extend(self.sub_category.as_deref());
        fields
    }
}

/// Create/update payload for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub title: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    pub images: Vec<String>,
    pub is_active: bool,
}

impl Default for ProductInput {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            price: None,
            stock: None,
            category: None,
            sub_category: None,
            images: Vec::new(),
            is_active: true,
        }
    }
}

impl From<&Product> for ProductInput {
    fn from(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            description: product.description.clone(),
            price: Some(product.price),
            stock: Some(product.stock),
            category: product.category.clone(),
            sub_category: product.sub_category.clone(),
            images: product.images.clone(),
            is_active: product.is_active,
        }
    }
}
