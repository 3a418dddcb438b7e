//! Order operations.
//!
//! Orders are never created or deleted from the admin; only their status
//! and shipment tracking change.

use shopdesk_core::{OrderId, OrderStatus};
use tracing::instrument;

use super::Ack;
use crate::client::{ApiClient, action_path, item_path};
use crate::controller::Resource;
use crate::dialog::FormModel;
use crate::error::ApiError;
use crate::models::{Order, OrderStatusUpdate, TrackingInput};

impl ApiClient {
    /// List all orders.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get("orders").await
    }

    /// Get a single order.
    ///
    /// # Errors
    ///
    /// Returns error if the order is not found or the API request fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get_order(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.get(&item_path("orders", id.as_str())).await
    }

    /// Move an order to `status`.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(order_id = %id, status = %status))]
    pub async fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), ApiError> {
        let _: Ack = self
            .patch(&action_path("orders", id.as_str(), "status"), &OrderStatusUpdate { status })
            .await?;
        Ok(())
    }

    /// Record the shipment tracking number and carrier.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, input), fields(order_id = %id))]
    pub async fn update_order_tracking(
        &self,
        id: &OrderId,
        input: &TrackingInput,
    ) -> Result<Order, ApiError> {
        self.patch(&action_path("orders", id.as_str(), "tracking"), input).await
    }
}

impl Resource for Order {
    const PLURAL: &'static str = "orders";

    async fn fetch_all(client: &ApiClient) -> Result<Vec<Self>, ApiError> {
        client.list_orders().await
    }
}

impl FormModel for TrackingInput {
    type Entity = Order;
    type Key = OrderId;
    const NOUN: &'static str = "Tracking";

    fn blank() -> Self {
        Self::default()
    }

    fn from_entity(entity: &Order) -> Self {
        Self::from(entity)
    }

    fn key_of(entity: &Order) -> OrderId {
        entity.id.clone()
    }

    fn missing_fields(&self, _creating: bool) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.tracking_number.is_empty() {
            missing.push("tracking number");
        }
        if self.carrier.is_empty() {
            missing.push("carrier");
        }
        missing
    }

    async fn update(&self, client: &ApiClient, key: &OrderId) -> Result<Order, ApiError> {
        client.update_order_tracking(key, self).await
    }
}
