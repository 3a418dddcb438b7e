//! Customer orders.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopdesk_core::{OrderId, OrderStatus, ProductId};

use super::string_or_number;
use crate::filter::Searchable;

/// Customer snapshot embedded in an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderCustomer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default, alias = "product")]
    pub product_id: Option<ProductId>,
    #[serde(alias = "name")]
    pub title: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl OrderItem {
    /// `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// An order. Status transitions are not validated client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "_id")]
    pub id: OrderId,
    #[serde(deserialize_with = "string_or_number")]
    pub order_number: String,
    #[serde(default)]
    pub customer: OrderCustomer,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub carrier: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

impl Searchable for Order {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.order_number.as_str(),
            self.customer.name.as_str(),
            self.customer.email.as_str(),
        ]
    }
}

/// Body of the status change action.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Payload for the tracking dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingInput {
    pub tracking_number: String,
    pub carrier: String,
}

impl From<&Order> for TrackingInput {
    fn from(order: &Order) -> Self {
        Self {
            tracking_number: order.tracking_number.clone().unwrap_or_default(),
            carrier: order.carrier.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_number_accepts_integer() {
        let json = r#"{"_id":"o1","orderNumber":1001,"total":25.5,"status":"pending",
            "customer":{"name":"Ann","email":"ann@example.com"},
            "items":[{"name":"Mug","quantity":2,"price":12.75}]}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_number, "1001");
        assert_eq!(order.item_count(), 2);
        assert_eq!(order.items[0].line_total(), Decimal::new(2550, 2));
    }

    #[test]
    fn test_order_search_fields_include_customer() {
        let json = r#"{"id":"o2","orderNumber":"A-7","total":1,"customer":{"name":"Bo","email":"bo@x.io"}}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.search_fields(), vec!["A-7", "Bo", "bo@x.io"]);
        assert_eq!(order.status, OrderStatus::Pending);
    }
}
