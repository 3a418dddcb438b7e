//! Coupon operations.

use shopdesk_core::CouponCode;
use tracing::instrument;

use super::Ack;
use crate::client::{ApiClient, item_path};
use crate::controller::Resource;
use crate::dialog::FormModel;
use crate::error::ApiError;
use crate::models::{Coupon, CouponInput};

impl ApiClient {
    /// List all coupons.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_coupons(&self) -> Result<Vec<Coupon>, ApiError> {
        self.get("coupons").await
    }

    /// Create a coupon.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails, e.g. when the code is taken.
    #[instrument(skip(self, input), fields(code = %input.code))]
    pub async fn create_coupon(&self, input: &CouponInput) -> Result<Coupon, ApiError> {
        self.post("coupons", input).await
    }

    /// Replace a coupon's fields.
    ///
    /// # Errors
    ///
    /// Returns error if the coupon is not found or the API request fails.
    #[instrument(skip(self, input), fields(code = %code))]
    pub async fn update_coupon(
        &self,
        code: &CouponCode,
        input: &CouponInput,
    ) -> Result<Coupon, ApiError> {
        self.put(&item_path("coupons", code.as_str()), input).await
    }

    /// Enable or disable a coupon without touching its other fields.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, coupon), fields(code = %coupon.code))]
    pub async fn set_coupon_active(&self, coupon: &Coupon, active: bool) -> Result<(), ApiError> {
        let input = CouponInput {
            is_active: active,
            ..CouponInput::from(coupon)
        };
        let _: Ack = self.put(&item_path("coupons", coupon.code.as_str()), &input).await?;
        Ok(())
    }

    /// Delete a coupon.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(code = %code))]
    pub async fn delete_coupon(&self, code: &CouponCode) -> Result<(), ApiError> {
        self.delete(&item_path("coupons", code.as_str())).await
    }
}

impl Resource for Coupon {
    const PLURAL: &'static str = "coupons";

    async fn fetch_all(client: &ApiClient) -> Result<Vec<Self>, ApiError> {
        client.list_coupons().await
    }
}

impl FormModel for CouponInput {
    type Entity = Coupon;
    type Key = CouponCode;
    const NOUN: &'static str = "Coupon";

    fn blank() -> Self {
        Self::default()
    }

    fn from_entity(entity: &Coupon) -> Self {
        Self::from(entity)
    }

    fn key_of(entity: &Coupon) -> CouponCode {
        entity.code.clone()
    }

    fn missing_fields(&self, _creating: bool) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.code.is_empty() {
            missing.push("code");
        }
        if self.value.is_none() {
            missing.push("value");
        }
        missing
    }

    async fn create(&self, client: &ApiClient) -> Result<Coupon, ApiError> {
        client.create_coupon(self).await
    }

    async fn update(&self, client: &ApiClient, key: &CouponCode) -> Result<Coupon, ApiError> {
        client.update_coupon(key, self).await
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_coupon_form_requires_code_and_value() {
        let mut form = CouponInput::blank();
        assert_eq!(form.missing_fields(true), vec!["code", "value"]);

        form.code = "SPRING".to_string();
        form.value = Some(Decimal::ZERO);
        assert!(form.missing_fields(true).is_empty());
    }

    #[test]
    fn test_coupon_form_accepts_out_of_range_numbers() {
        let form = CouponInput {
            code: "ODD".to_string(),
            value: Some(Decimal::new(-150, 0)),
            ..CouponInput::default()
        };
        assert!(form.missing_fields(false).is_empty());
    }
}
