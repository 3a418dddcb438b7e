//! Store customers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopdesk_core::CustomerId;

use crate::filter::Searchable;

/// A customer account. `total_orders` and `total_spent` are computed by the
/// backend and never sent back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(alias = "_id")]
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub total_orders: u32,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub total_spent: Decimal,
    #[serde(default)]
    pub is_banned: bool,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Searchable for Customer {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.email.as_str()];
        if let Some(phone) = &self.phone {
            fields.push(phone);
        }
        fields
    }
}

/// Payload for the customer notes dialog. Notes may be cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CustomerNotesInput {
    pub notes: String,
}

impl From<&Customer> for CustomerNotesInput {
    fn from(customer: &Customer) -> Self {
        Self {
            notes: customer.notes.clone(),
        }
    }
}
