//! Storage seams for users and items.
//!
//! The HTTP layer only sees these traits. `PgStore` backs them with
//! PostgreSQL through parameterized statements; `MemoryStore` keeps
//! everything in process for tests and throwaway runs.

mod memory;
mod pg;

pub use memory::MemoryStore;
pub use pg::PgStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::auth::{User, UserWithPassword};
use crate::models::item::{Item, ItemChanges, NewItem};

/// Errors raised by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),

    #[error("Username already taken: {0}")]
    DuplicateUsername(String),
}

/// Credential store: lookup and insert only.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch a user together with the password digest.
    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserWithPassword>, StoreError>;

    /// Insert a new user, returning the stored record.
    async fn create_user(
        &self,
        username: &str,
        email: Option<&str>,
        password_hash: &str,
    ) -> Result<User, StoreError>;
}

/// Item store. Every operation is a single atomic statement.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// All items ordered by id.
    async fn list_items(&self) -> Result<Vec<Item>, StoreError>;

    async fn create_item(&self, item: &NewItem) -> Result<Item, StoreError>;

    /// Returns `None` when no item has the given id.
    async fn update_item(&self, id: i64, changes: &ItemChanges)
    -> Result<Option<Item>, StoreError>;

    /// Returns the removed item, or `None` when no item has the given id.
    async fn delete_item(&self, id: i64) -> Result<Option<Item>, StoreError>;
}

/// A complete backend: credentials plus items.
#[async_trait]
pub trait Store: UserStore + ItemStore {
    /// Short backend name reported by the health endpoint.
    fn backend(&self) -> &'static str;

    /// Cheap connectivity check.
    async fn ping(&self) -> Result<(), StoreError>;
}
