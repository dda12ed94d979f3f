//! Item operations: input validation plus single-statement store calls.

use thiserror::Error;

use crate::models::item::{Item, ItemChanges, NewItem};
use crate::store::{ItemStore, StoreError};

/// Item operation errors.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("{0}")]
    Validation(String),

    #[error("Item not found")]
    NotFound(i64),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Longest accepted item name, in characters. Matches `items.name VARCHAR(255)`.
pub const MAX_NAME_CHARS: usize = 255;

/// Require a non-blank name that fits the column.
fn require_name(name: Option<String>) -> Result<String, ItemError> {
    match name {
        Some(n) if n.trim().is_empty() => Err(ItemError::Validation("Name is required".into())),
        Some(n) if n.chars().count() > MAX_NAME_CHARS => Err(ItemError::Validation(format!(
            "Name must be at most {MAX_NAME_CHARS} characters"
        ))),
        Some(n) => Ok(n),
        None => Err(ItemError::Validation("Name is required".into())),
    }
}

impl NewItem {
    /// Validate raw input. A missing description becomes the empty string.
    pub fn parse(name: Option<String>, description: Option<String>) -> Result<Self, ItemError> {
        Ok(Self {
            name: require_name(name)?,
            description: description.unwrap_or_default(),
        })
    }
}

impl ItemChanges {
    /// Validate raw input. A missing description leaves the stored one alone.
    pub fn parse(name: Option<String>, description: Option<String>) -> Result<Self, ItemError> {
        Ok(Self {
            name: require_name(name)?,
            description,
        })
    }
}

/// Parse a path segment into an item id.
pub fn parse_item_id(raw: &str) -> Result<i64, ItemError> {
    raw.parse::<i64>()
        .map_err(|_| ItemError::Validation("Invalid item ID".into()))
}

pub async fn list<S: ItemStore + ?Sized>(store: &S) -> Result<Vec<Item>, ItemError> {
    Ok(store.list_items().await?)
}

pub async fn create<S: ItemStore + ?Sized>(store: &S, item: &NewItem) -> Result<Item, ItemError> {
    Ok(store.create_item(item).await?)
}

pub async fn update<S: ItemStore + ?Sized>(
    store: &S,
    id: i64,
    changes: &ItemChanges,
) -> Result<Item, ItemError> {
    store
        .update_item(id, changes)
        .await?
        .ok_or(ItemError::NotFound(id))
}

pub async fn delete<S: ItemStore + ?Sized>(store: &S, id: i64) -> Result<Item, ItemError> {
    store.delete_item(id).await?.ok_or(ItemError::NotFound(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn new_item_defaults_description() {
        let item = NewItem::parse(Some("Widget".into()), None).unwrap();
        assert_eq!(item.description, "");
    }

    #[test]
    fn blank_names_are_rejected() {
        for name in [None, Some(String::new()), Some("   ".into())] {
            let err = NewItem::parse(name.clone(), Some("d".into())).unwrap_err();
            assert_eq!(err.to_string(), "Name is required");
            assert!(ItemChanges::parse(name, None).is_err());
        }
    }

    #[test]
    fn names_longer_than_the_column_are_rejected() {
        let longest = "é".repeat(MAX_NAME_CHARS);
        assert!(NewItem::parse(Some(longest.clone()), None).is_ok());
        assert!(ItemChanges::parse(Some(longest), None).is_ok());

        let too_long = "x".repeat(MAX_NAME_CHARS + 1);
        let err = NewItem::parse(Some(too_long.clone()), None).unwrap_err();
        assert_eq!(err.to_string(), "Name must be at most 255 characters");
        assert!(matches!(
            ItemChanges::parse(Some(too_long), None),
            Err(ItemError::Validation(_))
        ));
    }

    #[test]
    fn item_ids_must_be_numeric() {
        assert_eq!(parse_item_id("42").unwrap(), 42);
        assert!(matches!(
            parse_item_id("invalid_id"),
            Err(ItemError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn crud_round_trip() {
        let store = MemoryStore::new();
        let created = create(&store, &NewItem::parse(Some("Widget".into()), None).unwrap())
            .await
            .unwrap();
        assert_eq!(list(&store).await.unwrap(), vec![created.clone()]);

        let changes = ItemChanges::parse(Some("Widget2".into()), None).unwrap();
        let updated = update(&store, created.id, &changes).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.name, "Widget2");

        delete(&store, created.id).await.unwrap();
        assert!(list(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn second_delete_is_not_found() {
        let store = MemoryStore::new();
        let created = create(&store, &NewItem::parse(Some("x".into()), None).unwrap())
            .await
            .unwrap();
        delete(&store, created.id).await.unwrap();
        assert!(matches!(
            delete(&store, created.id).await,
            Err(ItemError::NotFound(id)) if id == created.id
        ));
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let changes = ItemChanges::parse(Some("x".into()), None).unwrap();
        assert!(matches!(
            update(&store, 99999, &changes).await,
            Err(ItemError::NotFound(99999))
        ));
    }
}
