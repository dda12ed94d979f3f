//! Route paths.

pub const HEALTH: &str = "/health";
pub const LOGIN: &str = "/login";
pub const ITEMS: &str = "/items";
pub const ITEM: &str = "/items/{id}";
