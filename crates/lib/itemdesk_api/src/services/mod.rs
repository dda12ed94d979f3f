//! Request-independent flows behind the handlers.

pub mod auth;
