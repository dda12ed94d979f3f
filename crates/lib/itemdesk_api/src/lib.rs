//! # itemdesk_api
//!
//! HTTP API library for Itemdesk.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use chrono::Duration;
use itemdesk_core::auth::AuthError;
use itemdesk_core::auth::jwt::TokenService;
use itemdesk_core::auth::password::PasswordHasher;
use itemdesk_core::auth::seed::ensure_seed_user;
use itemdesk_core::store::Store;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{auth, health, items};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Credential and item storage.
    pub store: Arc<dyn Store>,
    /// Access token issuer/verifier.
    pub tokens: TokenService,
    /// bcrypt hasher.
    pub hasher: PasswordHasher,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    /// Build the state from configuration and a store backend.
    ///
    /// Fails only if the configured bcrypt cost is out of range.
    pub fn new(config: ApiConfig, store: Arc<dyn Store>) -> Result<Self, AuthError> {
        let hasher = PasswordHasher::new(config.bcrypt_cost)?;
        let tokens = TokenService::with_ttl(
            config.jwt_secret.as_bytes(),
            Duration::hours(config.token_ttl_hours),
        );
        Ok(Self {
            store,
            tokens,
            hasher,
            config,
        })
    }

    /// Insert the configured seed user if it does not exist yet.
    pub async fn seed(&self) -> Result<bool, AuthError> {
        ensure_seed_user(&*self.store, &self.hasher, &self.config.seed_user).await
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route(routes::HEALTH, get(health::health_handler))
        .route(routes::LOGIN, post(auth::login_handler));

    // Protected routes (require auth)
    let protected = Router::new()
        .route(
            routes::ITEMS,
            get(items::list_items_handler).post(items::create_item_handler),
        )
        .route(
            routes::ITEM,
            put(items::update_item_handler).delete(items::delete_item_handler),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
