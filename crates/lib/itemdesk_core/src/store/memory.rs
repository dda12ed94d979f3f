//! In-process store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{ItemStore, Store, StoreError, UserStore};
use crate::models::auth::{User, UserWithPassword};
use crate::models::item::{Item, ItemChanges, NewItem};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<UserWithPassword>,
    items: BTreeMap<i64, Item>,
    next_user_id: i64,
    next_item_id: i64,
}

/// Store that keeps users and items in memory. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserWithPassword>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.user.username == username)
            .cloned())
    }

    async fn create_user(
        &self,
        username: &str,
        email: Option<&str>,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.user.username == username) {
            return Err(StoreError::DuplicateUsername(username.to_string()));
        }
        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            username: username.to_string(),
            email: email.map(str::to_string),
        };
        tables.users.push(UserWithPassword {
            user: user.clone(),
            password_hash: password_hash.to_string(),
        });
        Ok(user)
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn list_items(&self) -> Result<Vec<Item>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.items.values().cloned().collect())
    }

    async fn create_item(&self, item: &NewItem) -> Result<Item, StoreError> {
        let mut tables = self.tables.write().await;
        tables.next_item_id += 1;
        let stored = Item {
            id: tables.next_item_id,
            name: item.name.clone(),
            description: item.description.clone(),
            created_at: Utc::now(),
        };
        tables.items.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update_item(
        &self,
        id: i64,
        changes: &ItemChanges,
    ) -> Result<Option<Item>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.items.get_mut(&id).map(|item| {
            item.name = changes.name.clone();
            if let Some(description) = &changes.description {
                item.description = description.clone();
            }
            item.clone()
        }))
    }

    async fn delete_item(&self, id: i64) -> Result<Option<Item>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.items.remove(&id))
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
