//! Authentication domain models.
//!
//! These are internal domain models, distinct from the API request/response
//! bodies in `itemdesk_api::models`.

use serde::{Deserialize, Serialize};

/// Domain user. Never carries the password digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
}

/// User with password hash (for internal auth flows).
#[derive(Debug, Clone)]
pub struct UserWithPassword {
    pub user: User,
    pub password_hash: String,
}

/// JWT claims embedded in access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject, the user ID (standard JWT `sub` claim).
    pub sub: String,
    /// Login name.
    pub username: String,
    /// User email, if one is on record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Expiry (unix timestamp).
    pub exp: i64,
    /// Issued at (unix timestamp).
    pub iat: i64,
}

/// Credentials for the account created at startup when absent.
#[derive(Debug, Clone)]
pub struct SeedUser {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
}

impl Default for SeedUser {
    fn default() -> Self {
        Self {
            username: "test".into(),
            password: "password".into(),
            email: Some("test@test.com".into()),
        }
    }
}
