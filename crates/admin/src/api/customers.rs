//! Customer operations.

use shopdesk_core::CustomerId;
use tracing::instrument;

use super::Ack;
use crate::client::{ApiClient, action_path, item_path};
use crate::controller::Resource;
use crate::dialog::FormModel;
use crate::error::ApiError;
use crate::models::{Customer, CustomerNotesInput};

impl ApiClient {
    /// List all customers.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        self.get("customers").await
    }

    /// Ban a customer from ordering.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn ban_customer(&self, id: &CustomerId) -> Result<(), ApiError> {
        let _: Ack = self
            .patch(&action_path("customers", id.as_str(), "ban"), &serde_json::json!({}))
            .await?;
        Ok(())
    }

    /// Lift a customer ban.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn unban_customer(&self, id: &CustomerId) -> Result<(), ApiError> {
        let _: Ack = self
            .patch(&action_path("customers", id.as_str(), "unban"), &serde_json::json!({}))
            .await?;
        Ok(())
    }

    /// Replace a customer's internal notes.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, input), fields(customer_id = %id))]
    pub async fn update_customer_notes(
        &self,
        id: &CustomerId,
        input: &CustomerNotesInput,
    ) -> Result<Customer, ApiError> {
        self.patch(&action_path("customers", id.as_str(), "notes"), input).await
    }

    /// Delete a customer.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn delete_customer(&self, id: &CustomerId) -> Result<(), ApiError> {
        self.delete(&item_path("customers", id.as_str())).await
    }
}

impl Resource for Customer {
    const PLURAL: &'static str = "customers";

    async fn fetch_all(client: &ApiClient) -> Result<Vec<Self>, ApiError> {
        client.list_customers().await
    }
}

impl FormModel for CustomerNotesInput {
    type Entity = Customer;
    type Key = CustomerId;
    const NOUN: &'static str = "Customer notes";

    fn blank() -> Self {
        Self::default()
    }

    fn from_entity(entity: &Customer) -> Self {
        Self::from(entity)
    }

    fn key_of(entity: &Customer) -> CustomerId {
        entity.id.clone()
    }

    fn missing_fields(&self, _creating: bool) -> Vec<&'static str> {
        Vec::new()
    }

    async fn update(&self, client: &ApiClient, key: &CustomerId) -> Result<Customer, ApiError> {
        client.update_customer_notes(key, self).await
    }
}
