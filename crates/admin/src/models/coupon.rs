//! Discount coupons.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopdesk_core::{CouponCode, CouponType};

use super::default_true;
use crate::filter::Searchable;

/// A discount coupon. Identity is the redeemable `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub code: CouponCode,
    #[serde(rename = "type", default)]
    pub kind: CouponType,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub min_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub max_discount: Option<Decimal>,
    #[serde(default)]
    pub usage_limit: Option<u32>,
    #[serde(default)]
    pub used_count: u32,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_stackable: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Coupon {
    /// Whether the coupon's expiry lies before `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    /// Remaining redemptions, when a usage limit is set.
    #[must_use]
    pub fn remaining_uses(&self) -> Option<u32> {
        self.usage_limit
            .map(|limit| limit.saturating_sub(self.used_count))
    }
}

impl Searchable for Coupon {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.code.as_str()]
    }
}

/// Create/update payload for a coupon.
///
/// Numeric fields are only checked for presence, never for range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponInput {
    pub code: String,
    #[serde(rename = "type")]
    pub kind: CouponType,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub value: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_amount: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_discount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub is_stackable: bool,
    pub is_active: bool,
}

impl Default for CouponInput {
    fn default() -> Self {
        Self {
            code: String::new(),
            kind: CouponType::Percentage,
            value: None,
            min_amount: None,
            max_discount: None,
            usage_limit: None,
            expires_at: None,
            is_stackable: false,
            is_active: true,
        }
    }
}

impl From<&Coupon> for CouponInput {
    fn from(coupon: &Coupon) -> Self {
        Self {
            code: coupon.code.to_string(),
            kind: coupon.kind,
            value: Some(coupon.value),
            min_amount: coupon.min_amount,
            max_discount: coupon.max_discount,
            usage_limit: coupon.usage_limit,
            expires_at: coupon.expires_at,
            is_stackable: coupon.is_stackable,
            is_active: coupon.is_active,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_coupon_decodes_backend_shape() {
        let json = r#"{
            "code": "SAVE10",
            "type": "percentage",
            "value": 10,
            "minAmount": 50.5,
            "usageLimit": 100,
            "usedCount": 7,
            "expiresAt": "2030-01-01T00:00:00Z",
            "isStackable": false,
            "isActive": true
        }"#;
        let coupon: Coupon = serde_json::from_str(json).unwrap();
        assert_eq!(coupon.code.as_str(), "SAVE10");
        assert_eq!(coupon.value, Decimal::new(10, 0));
        assert_eq!(coupon.min_amount, Some(Decimal::new(505, 1)));
        assert_eq!(coupon.max_discount, None);
        assert_eq!(coupon.remaining_uses(), Some(93));
    }

    #[test]
    fn test_input_omits_unset_optionals() {
        let input = CouponInput {
            code: "FLAT5".into(),
            kind: CouponType::Flat,
            value: Some(Decimal::new(5, 0)),
            ..CouponInput::default()
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["type"], "flat");
        assert_eq!(json["value"], 5.0);
        assert!(json.get("minAmount").is_none());
        assert!(json.get("expiresAt").is_none());
    }

    #[test]
    fn test_expiry() {
        let coupon: Coupon = serde_json::from_str(
            r#"{"code":"X","type":"flat","value":1,"expiresAt":"2020-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(coupon.is_expired_at(Utc::now()));
        assert!(coupon.is_active);
    }
}
