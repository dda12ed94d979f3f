//! JWT token generation and verification.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use thiserror::Error;
use tracing::{info, warn};

use super::AuthError;
use crate::models::auth::{TokenClaims, User};

/// Access token lifetime when none is configured: 24 hours.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Why a presented token was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenRejection {
    /// Not a JWT, wrong algorithm, bad signature or missing claims.
    #[error("malformed or tampered token")]
    Malformed,

    /// Well-formed and correctly signed, but past `exp`.
    #[error("token expired")]
    Expired,
}

/// A freshly signed token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: TokenClaims,
}

impl IssuedToken {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.claims.exp, 0)
    }
}

/// Issues and verifies HS256 access tokens.
///
/// Holds no state beyond the signing secret and the token lifetime, both
/// fixed at construction. Tokens are not recorded anywhere, so there is no
/// revocation: a token stays valid until it expires.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Token service with the default 24 hour lifetime.
    pub fn new(secret: &[u8]) -> Self {
        Self::with_ttl(secret, Duration::hours(DEFAULT_TOKEN_TTL_HOURS))
    }

    pub fn with_ttl(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign a token for `user`, expiring `ttl` from now.
    pub fn issue(&self, user: &User) -> Result<IssuedToken, AuthError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenError(format!("jwt encode: {e}")))?;
        Ok(IssuedToken { token, claims })
    }

    /// Check signature and expiry, returning the claims on success.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenRejection> {
        decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenRejection::Expired,
                _ => TokenRejection::Malformed,
            })
    }
}

/// Resolve the JWT secret: env var `JWT_SECRET` → `AUTH_SECRET` → persisted file.
///
/// The resolved value is meant to be passed into [`TokenService::new`] once
/// at startup.
pub fn resolve_jwt_secret() -> String {
    for var in ["JWT_SECRET", "AUTH_SECRET"] {
        if let Ok(secret) = std::env::var(var)
            && !secret.is_empty()
        {
            return secret;
        }
    }
    let secret_path = jwt_secret_path();
    if let Ok(existing) = std::fs::read_to_string(&secret_path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    if let Some(parent) = secret_path.parent()
        && let Err(e) = std::fs::create_dir_all(parent)
    {
        warn!(path = %parent.display(), "could not create secret directory: {e}");
    }
    match std::fs::write(&secret_path, &secret) {
        Ok(()) => info!(path = %secret_path.display(), "generated new JWT secret"),
        Err(e) => warn!(
            path = %secret_path.display(),
            "generated JWT secret could not be persisted, tokens will not survive a restart: {e}"
        ),
    }
    secret
}

/// Path to the persisted JWT secret file.
fn jwt_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("itemdesk")
        .join("jwt-secret")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret";

    fn user(id: i64, username: &str) -> User {
        User {
            id,
            username: username.to_string(),
            email: Some(format!("{username}@test.com")),
        }
    }

    #[test]
    fn issued_token_has_three_segments() {
        let issued = TokenService::new(SECRET).issue(&user(1, "test")).unwrap();
        assert_eq!(issued.token.split('.').count(), 3);
    }

    #[test]
    fn issue_then_verify_returns_claims() {
        let svc = TokenService::new(SECRET);
        let issued = svc.issue(&user(7, "test")).unwrap();
        let claims = svc.verify(&issued.token).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.username, "test");
        assert_eq!(claims.email.as_deref(), Some("test@test.com"));
        assert_eq!(claims, issued.claims);
    }

    #[test]
    fn default_lifetime_is_one_day() {
        let issued = TokenService::new(SECRET).issue(&user(1, "test")).unwrap();
        assert_eq!(issued.claims.exp - issued.claims.iat, 24 * 60 * 60);
        assert!(issued.expires_at().is_some());
    }

    #[test]
    fn garbage_is_malformed() {
        let svc = TokenService::new(SECRET);
        assert_eq!(svc.verify("invalid_token"), Err(TokenRejection::Malformed));
        assert_eq!(svc.verify(""), Err(TokenRejection::Malformed));
    }

    #[test]
    fn wrong_secret_is_malformed() {
        let issued = TokenService::new(b"other-secret")
            .issue(&user(1, "test"))
            .unwrap();
        assert_eq!(
            TokenService::new(SECRET).verify(&issued.token),
            Err(TokenRejection::Malformed)
        );
    }

    #[test]
    fn swapped_payload_is_malformed() {
        let svc = TokenService::new(SECRET);
        let a = svc.issue(&user(1, "test")).unwrap().token;
        let b = svc.issue(&user(2, "admin")).unwrap().token;
        let a_parts: Vec<&str> = a.split('.').collect();
        let b_parts: Vec<&str> = b.split('.').collect();
        let forged = format!("{}.{}.{}", a_parts[0], b_parts[1], a_parts[2]);
        assert_eq!(svc.verify(&forged), Err(TokenRejection::Malformed));
    }

    #[test]
    fn past_expiry_is_expired() {
        let svc = TokenService::with_ttl(SECRET, Duration::seconds(-30));
        let issued = svc.issue(&user(1, "test")).unwrap();
        assert_eq!(svc.verify(&issued.token), Err(TokenRejection::Expired));
    }

    #[test]
    fn debug_does_not_print_keys() {
        let rendered = format!("{:?}", TokenService::new(SECRET));
        assert!(!rendered.contains("test-secret"));
    }
}
