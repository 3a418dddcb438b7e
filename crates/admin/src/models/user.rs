//! Admin panel users.

use serde::{Deserialize, Serialize};
use shopdesk_core::{AdminRole, AdminUserId};

use super::default_true;
use crate::filter::Searchable;

/// An account allowed into the admin panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    #[serde(alias = "_id")]
    pub id: AdminUserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: AdminRole,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Searchable for AdminUser {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }
}

/// Create/update payload for an admin user.
///
/// `password` is required when creating and left out of updates when empty.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserInput {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    pub role: AdminRole,
    pub is_active: bool,
}

impl std::fmt::Debug for AdminUserInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminUserInput")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .field("is_active", &self.is_active)
            .finish()
    }
}

impl From<&AdminUser> for AdminUserInput {
    fn from(user: &AdminUser) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            password: String::new(),
            role: user.role,
            is_active: user.is_active,
        }
    }
}
