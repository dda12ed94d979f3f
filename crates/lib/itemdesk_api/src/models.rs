//! Request and response bodies.

use itemdesk_core::models::auth::User;
use itemdesk_core::models::item::Item;
use serde::{Deserialize, Serialize};

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short human-readable message.
    pub error: String,
    /// Machine-readable error kind.
    pub code: String,
}

/// `POST /login` body. Fields are optional so that a missing field is a
/// 400 validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Public user fields. The password digest is never part of a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// `POST /login` success body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AuthUser,
}

/// `POST /items` and `PUT /items/{id}` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// `DELETE /items/{id}` success body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteItemResponse {
    pub message: String,
    pub item: Item,
}

/// `GET /health` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub store: String,
    pub store_connected: bool,
}
