//! Client session state and its reducer.
//!
//! [`reduce`] is a pure function from the current [`Session`] and an
//! [`Action`] to the next session. Persistence is computed separately by
//! [`persistence_effect`] and applied by the caller, so the reducer itself
//! never touches storage.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::models::{Item, SessionUser};
use crate::storage::{AUTH_STATE_KEY, SessionStorage, StorageError};
use crate::token::is_token_valid;

pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful!";
pub const ITEM_CREATED_MESSAGE: &str = "Item created successfully!";
pub const ITEM_UPDATED_MESSAGE: &str = "Item updated successfully!";
pub const ITEM_DELETED_MESSAGE: &str = "Item deleted successfully!";

/// Everything the client knows: authentication plus the local item list.
///
/// `is_authenticated` is true only while `token` is non-empty and unexpired.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user: Option<SessionUser>,
    pub token: String,
    pub is_authenticated: bool,
    pub auth_loading: bool,
    pub auth_error: String,
    pub auth_success: String,

    pub items: Vec<Item>,
    pub items_loading: bool,
    pub items_error: String,
    pub item_message: String,
    pub editing_item: Option<Item>,
}

/// The record persisted under [`AUTH_STATE_KEY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedAuth {
    pub user: Option<SessionUser>,
    pub token: String,
    pub is_authenticated: bool,
}

impl From<&Session> for PersistedAuth {
    fn from(session: &Session) -> Self {
        Self {
            user: session.user.clone(),
            token: session.token.clone(),
            is_authenticated: session.is_authenticated,
        }
    }
}

/// Every state transition the session accepts.
///
/// Serialized as `{"type": "...", "payload": ...}`. Any unknown `type`
/// decodes to [`Action::Unrecognized`], which the reducer ignores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    SetAuthLoading(bool),
    LoginSuccess { user: SessionUser, token: String },
    LoginError(String),
    Logout,
    SetItemsLoading(bool),
    SetItems(Vec<Item>),
    SetItemsError(String),
    AddItem(Item),
    UpdateItem(Item),
    DeleteItem(i64),
    SetEditingItem(Option<Item>),
    SetItemMessage(String),
    ClearMessages,
    #[serde(other)]
    Unrecognized,
}

/// Compute the next session. Never mutates `state`.
pub fn reduce(state: &Session, action: &Action) -> Session {
    let mut next = state.clone();
    match action {
        Action::SetAuthLoading(loading) => {
            next.auth_loading = *loading;
            next.auth_error.clear();
            next.auth_success.clear();
        }
        Action::LoginSuccess { user, token } => {
            next.user = Some(user.clone());
            next.token = token.clone();
            next.is_authenticated = !token.is_empty();
            next.auth_loading = false;
            next.auth_error.clear();
            next.auth_success = LOGIN_SUCCESS_MESSAGE.into();
        }
        Action::LoginError(message) => {
            next.auth_loading = false;
            next.auth_error = message.clone();
            next.auth_success.clear();
        }
        Action::Logout => return Session::default(),
        Action::SetItemsLoading(loading) => {
            next.items_loading = *loading;
            next.items_error.clear();
        }
        Action::SetItems(items) => {
            next.items = items.clone();
            next.items_loading = false;
            next.items_error.clear();
        }
        Action::SetItemsError(message) => {
            next.items_loading = false;
            next.items_error = message.clone();
        }
        Action::AddItem(item) => {
            next.items.push(item.clone());
            next.items_loading = false;
            next.item_message = ITEM_CREATED_MESSAGE.into();
        }
        Action::UpdateItem(item) => {
            for existing in next.items.iter_mut().filter(|i| i.id == item.id) {
                *existing = item.clone();
            }
            next.editing_item = None;
            next.items_loading = false;
            next.item_message = ITEM_UPDATED_MESSAGE.into();
        }
        Action::DeleteItem(id) => {
            next.items.retain(|i| i.id != *id);
            next.items_loading = false;
            next.item_message = ITEM_DELETED_MESSAGE.into();
        }
        Action::SetEditingItem(item) => next.editing_item = item.clone(),
        Action::SetItemMessage(message) => {
            next.items_loading = false;
            next.item_message = message.clone();
        }
        Action::ClearMessages => {
            next.auth_error.clear();
            next.auth_success.clear();
            next.item_message.clear();
        }
        Action::Unrecognized => return state.clone(),
    }
    next
}

/// A storage write the caller must perform after a reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageEffect {
    Persist(PersistedAuth),
    Clear,
}

impl StorageEffect {
    pub fn apply(&self, storage: &dyn SessionStorage) -> Result<(), StorageError> {
        match self {
            StorageEffect::Persist(record) => {
                let json = serde_json::to_string(record)
                    .map_err(|e| StorageError::Io(std::io::Error::other(e)))?;
                storage.set_item(AUTH_STATE_KEY, &json)
            }
            StorageEffect::Clear => storage.remove_item(AUTH_STATE_KEY),
        }
    }
}

/// Storage side effect of `action`, given the session it produced.
pub fn persistence_effect(action: &Action, next: &Session) -> Option<StorageEffect> {
    match action {
        Action::LoginSuccess { .. } => Some(StorageEffect::Persist(PersistedAuth::from(next))),
        Action::Logout => Some(StorageEffect::Clear),
        _ => None,
    }
}

impl Session {
    /// Initial session derived from persisted storage.
    ///
    /// A persisted record is only restored when its token is still valid at
    /// `now`; otherwise it is removed and the default session returned.
    /// Items always start empty.
    pub fn restore(storage: &dyn SessionStorage, now: DateTime<Utc>) -> Session {
        let raw = match storage.get_item(AUTH_STATE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Session::default(),
            Err(e) => {
                warn!("could not read persisted session: {e}");
                return Session::default();
            }
        };

        match serde_json::from_str::<PersistedAuth>(&raw) {
            Ok(record) if is_token_valid(&record.token, now) => Session {
                user: record.user,
                token: record.token,
                is_authenticated: true,
                ..Session::default()
            },
            Ok(_) => {
                debug!("persisted token invalid or expired, discarding session");
                discard(storage);
                Session::default()
            }
            Err(e) => {
                warn!("persisted session is corrupt, discarding: {e}");
                discard(storage);
                Session::default()
            }
        }
    }
}

fn discard(storage: &dyn SessionStorage) {
    if let Err(e) = storage.remove_item(AUTH_STATE_KEY) {
        warn!("could not clear persisted session: {e}");
    }
}
