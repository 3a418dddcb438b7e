//! Store settings.

use tracing::instrument;

use crate::client::ApiClient;
use crate::dialog::FormModel;
use crate::error::ApiError;
use crate::models::Settings;

impl ApiClient {
    /// Fetch the settings singleton.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_settings(&self) -> Result<Settings, ApiError> {
        self.get("settings").await
    }

    /// Replace the settings singleton.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, settings), fields(currency = %settings.currency))]
    pub async fn update_settings(&self, settings: &Settings) -> Result<Settings, ApiError> {
        self.put("settings", settings).await
    }
}

impl FormModel for Settings {
    type Entity = Self;
    type Key = ();
    const NOUN: &'static str = "Settings";

    fn blank() -> Self {
        Self::default()
    }

    fn from_entity(entity: &Self) -> Self {
        entity.clone()
    }

    fn key_of(_entity: &Self) {}

    fn missing_fields(&self, _creating: bool) -> Vec<&'static str> {
        if self.currency.is_empty() {
            vec!["currency"]
        } else {
            Vec::new()
        }
    }

    async fn update(&self, client: &ApiClient, _key: &()) -> Result<Self, ApiError> {
        client.update_settings(self).await
    }
}
