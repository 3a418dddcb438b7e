//! Admin user management.

use shopdesk_core::AdminUserId;
use tracing::instrument;

use crate::client::{ApiClient, item_path};
use crate::controller::Resource;
use crate::dialog::FormModel;
use crate::error::ApiError;
use crate::models::{AdminUser, AdminUserInput};

impl ApiClient {
    /// List every admin account.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_admin_users(&self) -> Result<Vec<AdminUser>, ApiError> {
        self.get("users/admin/all").await
    }

    /// Create an admin account.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create_admin_user(&self, input: &AdminUserInput) -> Result<AdminUser, ApiError> {
        self.post("users/admin", input).await
    }

    /// Update an admin account. An empty password leaves it unchanged.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, input), fields(user_id = %id))]
    pub async fn update_admin_user(
        &self,
        id: &AdminUserId,
        input: &AdminUserInput,
    ) -> Result<AdminUser, ApiError> {
        self.put(&item_path("users/admin", id.as_str()), input).await
    }

    /// Delete an admin account.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete_admin_user(&self, id: &AdminUserId) -> Result<(), ApiError> {
        self.delete(&item_path("users/admin", id.as_str())).await
    }
}

impl Resource for AdminUser {
    const PLURAL: &'static str = "admin users";

    async fn fetch_all(client: &ApiClient) -> Result<Vec<Self>, ApiError> {
        client.list_admin_users().await
    }
}

impl FormModel for AdminUserInput {
    type Entity = AdminUser;
    type Key = AdminUserId;
    const NOUN: &'static str = "User";

    fn blank() -> Self {
        Self::default()
    }

    fn from_entity(entity: &AdminUser) -> Self {
        Self::from(entity)
    }

    fn key_of(entity: &AdminUser) -> AdminUserId {
        entity.id.clone()
    }

    fn missing_fields(&self, creating: bool) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push("name");
        }
        if self.email.is_empty() {
            missing.push("email");
        }
        if creating && self.password.is_empty() {
            missing.push("password");
        }
        missing
    }

    async fn create(&self, client: &ApiClient) -> Result<AdminUser, ApiError> {
        client.create_admin_user(self).await
    }

    async fn update(&self, client: &ApiClient, key: &AdminUserId) -> Result<AdminUser, ApiError> {
        client.update_admin_user(key, self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_required_only_when_creating() {
        let form = AdminUserInput {
            name: "Ira".to_string(),
            email: "ira@example.com".to_string(),
            ..AdminUserInput::default()
        };
        assert_eq!(form.missing_fields(true), vec!["password"]);
        assert!(form.missing_fields(false).is_empty());
    }
}
