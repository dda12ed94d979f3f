//! Domain models shared by the store, the auth flows and the HTTP layer.

pub mod auth;
pub mod item;
