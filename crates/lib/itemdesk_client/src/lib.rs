//! # itemdesk_client
//!
//! Client side of Itemdesk: a pure session reducer, persisted session
//! storage, a typed HTTP client, and [`AppStore`] tying them together.

pub mod api;
pub mod error;
pub mod models;
pub mod session;
pub mod storage;
pub mod store;
pub mod token;

pub use api::ApiClient;
pub use error::{ClientError, Result};
pub use session::{Action, Session, reduce};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use store::AppStore;
