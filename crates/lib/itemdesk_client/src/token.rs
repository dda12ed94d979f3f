//! Client-side token inspection.
//!
//! The client cannot check a token's signature; it only reads the `exp`
//! claim so that a stale persisted session is dropped instead of restored.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
struct ExpiryClaim {
    #[serde(default)]
    exp: Option<i64>,
}

/// Read the `exp` claim of a JWT without verifying it.
///
/// `None` means the token could not be decoded, or its `exp` is outside the
/// representable range; `Some(None)` means it decoded but carries no expiry.
pub fn token_expiry(token: &str) -> Option<Option<DateTime<Utc>>> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claim: ExpiryClaim = serde_json::from_slice(&bytes).ok()?;
    match claim.exp {
        Some(exp) => DateTime::from_timestamp(exp, 0).map(Some),
        None => Some(None),
    }
}

/// A token is usable when it is non-empty, decodes, and `now` is before its expiry.
pub fn is_token_valid(token: &str, now: DateTime<Utc>) -> bool {
    if token.is_empty() {
        return false;
    }
    match token_expiry(token) {
        Some(Some(expires_at)) => now < expires_at,
        Some(None) => true,
        None => {
            log::debug!("persisted token could not be decoded");
            false
        }
    }
}
