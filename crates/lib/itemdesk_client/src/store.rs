//! [`AppStore`]: the session plus the async operations that drive it.

use chrono::Utc;
use log::{info, warn};

use crate::api::ApiClient;
use crate::models::{Item, ItemInput};
use crate::session::{Action, Session, persistence_effect, reduce};
use crate::storage::SessionStorage;
use crate::token::is_token_valid;

/// Login error when the server hands back a token that is already unusable.
pub const EXPIRED_TOKEN_RECEIVED: &str = "Received an expired token";

/// Owns the current [`Session`], its storage and an [`ApiClient`].
///
/// Every operation takes `&mut self`, so at most one request is in flight
/// per store. Operations never return errors: failures land in the
/// session's error and message fields.
pub struct AppStore<S: SessionStorage> {
    state: Session,
    storage: S,
    api: ApiClient,
}

impl<S: SessionStorage> AppStore<S> {
    /// Build a store whose initial session is restored from `storage`.
    pub fn new(api: ApiClient, storage: S) -> Self {
        let state = Session::restore(&storage, Utc::now());
        Self {
            state,
            storage,
            api,
        }
    }

    pub fn state(&self) -> &Session {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Reduce `action` into the session and perform its storage effect.
    pub fn dispatch(&mut self, action: Action) {
        let next = reduce(&self.state, &action);
        if let Some(effect) = persistence_effect(&action, &next)
            && let Err(e) = effect.apply(&self.storage)
        {
            warn!("could not persist session: {e}");
        }
        self.state = next;
    }

    fn token(&self) -> Option<String> {
        (!self.state.token.is_empty()).then(|| self.state.token.clone())
    }

    /// Log in. A token that is already expired on arrival is treated as a
    /// failed login and never persisted.
    pub async fn login(&mut self, username: &str, password: &str) {
        self.dispatch(Action::SetAuthLoading(true));
        match self.api.login(username, password).await {
            Ok(response) if !is_token_valid(&response.token, Utc::now()) => {
                warn!("server issued an unusable token for {}", response.user.username);
                self.dispatch(Action::LoginError(EXPIRED_TOKEN_RECEIVED.into()));
            }
            Ok(response) => {
                info!("logged in as {}", response.user.username);
                self.dispatch(Action::LoginSuccess {
                    user: response.user,
                    token: response.token,
                });
            }
            Err(e) => self.dispatch(Action::LoginError(e.to_string())),
        }
    }

    pub fn logout(&mut self) {
        self.dispatch(Action::Logout);
    }

    pub async fn fetch_items(&mut self) {
        self.dispatch(Action::SetItemsLoading(true));
        let token = self.token();
        match self.api.list_items(token.as_deref()).await {
            Ok(items) => self.dispatch(Action::SetItems(items)),
            Err(e) => self.dispatch(Action::SetItemsError(e.to_string())),
        }
    }

    /// Create an item. Returns the created item on success.
    pub async fn create_item(&mut self, input: &ItemInput) -> Option<Item> {
        self.dispatch(Action::SetItemsLoading(true));
        let token = self.token();
        match self.api.create_item(token.as_deref(), input).await {
            Ok(item) => {
                self.dispatch(Action::AddItem(item.clone()));
                Some(item)
            }
            Err(e) => {
                self.dispatch(Action::SetItemMessage(e.to_string()));
                None
            }
        }
    }

    pub async fn update_item(&mut self, id: i64, input: &ItemInput) -> Option<Item> {
        self.dispatch(Action::SetItemsLoading(true));
        let token = self.token();
        match self.api.update_item(token.as_deref(), id, input).await {
            Ok(item) => {
                self.dispatch(Action::UpdateItem(item.clone()));
                Some(item)
            }
            Err(e) => {
                self.dispatch(Action::SetItemMessage(e.to_string()));
                None
            }
        }
    }

    /// Delete an item. Returns `true` when the server confirmed the delete.
    pub async fn delete_item(&mut self, id: i64) -> bool {
        self.dispatch(Action::SetItemsLoading(true));
        let token = self.token();
        match self.api.delete_item(token.as_deref(), id).await {
            Ok(_) => {
                self.dispatch(Action::DeleteItem(id));
                true
            }
            Err(e) => {
                self.dispatch(Action::SetItemMessage(e.to_string()));
                false
            }
        }
    }
}
