//! Item domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored item. `id` and `created_at` are assigned by the store and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// A validated item ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub description: String,
}

/// A validated update. `description: None` keeps the stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemChanges {
    pub name: String,
    pub description: Option<String>,
}
