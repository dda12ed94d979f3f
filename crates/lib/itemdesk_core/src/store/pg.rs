//! PostgreSQL-backed store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{ItemStore, Store, StoreError, UserStore};
use crate::models::auth::{User, UserWithPassword};
use crate::models::item::{Item, ItemChanges, NewItem};

type ItemRow = (i64, String, String, DateTime<Utc>);

const ITEM_COLUMNS: &str = "id, name, description, created_at";

fn item_from_row((id, name, description, created_at): ItemRow) -> Item {
    Item {
        id,
        name,
        description,
        created_at,
    }
}

/// Store backed by a pooled PostgreSQL connection.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool, e.g. for running migrations.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserWithPassword>, StoreError> {
        let row = sqlx::query_as::<_, (i64, String, Option<String>, String)>(
            "SELECT id, username, email, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(id, username, email, password_hash)| UserWithPassword {
            user: User {
                id,
                username,
                email,
            },
            password_hash,
        }))
    }

    async fn create_user(
        &self,
        username: &str,
        email: Option<&str>,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_unique_violation() => {
                StoreError::DuplicateUsername(username.to_string())
            }
            _ => StoreError::Sql(e),
        })?;
        Ok(User {
            id,
            username: username.to_string(),
            email: email.map(str::to_string),
        })
    }
}

#[async_trait]
impl ItemStore for PgStore {
    async fn list_items(&self) -> Result<Vec<Item>, StoreError> {
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(item_from_row).collect())
    }

    async fn create_item(&self, item: &NewItem) -> Result<Item, StoreError> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "INSERT INTO items (name, description) VALUES ($1, $2) RETURNING {ITEM_COLUMNS}"
        ))
        .bind(&item.name)
        .bind(&item.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(item_from_row(row))
    }

    async fn update_item(
        &self,
        id: i64,
        changes: &ItemChanges,
    ) -> Result<Option<Item>, StoreError> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "UPDATE items SET name = $1, description = COALESCE($2, description) \
             WHERE id = $3 RETURNING {ITEM_COLUMNS}"
        ))
        .bind(&changes.name)
        .bind(changes.description.as_deref())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(item_from_row))
    }

    async fn delete_item(&self, id: i64) -> Result<Option<Item>, StoreError> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "DELETE FROM items WHERE id = $1 RETURNING {ITEM_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(item_from_row))
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
