//! Authentication logic.
//!
//! Provides password hashing, JWT issuance/verification, the credential
//! check behind `POST /login`, and startup seeding of the default account.

pub mod jwt;
pub mod login;
pub mod password;
pub mod seed;

use thiserror::Error;

use crate::store::StoreError;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    CredentialError,

    #[error("Token error: {0}")]
    TokenError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}
