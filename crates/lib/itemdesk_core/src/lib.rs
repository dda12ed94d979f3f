//! # itemdesk_core
//!
//! Core domain logic for Itemdesk: credentials, tokens, items and the
//! storage seams the HTTP layer runs against.

pub mod auth;
pub mod items;
pub mod migrate;
pub mod models;
pub mod store;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
