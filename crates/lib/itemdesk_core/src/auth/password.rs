//! Password hashing via bcrypt.

use std::sync::Arc;

use rand::distr::Alphanumeric;
use rand::{Rng, rng};

use super::AuthError;

/// bcrypt cost factor used when none is configured.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// bcrypt hasher with a cost factor fixed at construction.
///
/// Also holds a decoy digest at the same cost so that a lookup miss can be
/// verified against something, keeping unknown-user logins about as slow as
/// wrong-password logins.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    decoy: Arc<str>,
}

impl PasswordHasher {
    /// Build a hasher. Fails if bcrypt rejects the cost.
    pub fn new(cost: u32) -> Result<Self, AuthError> {
        let filler: String = rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();
        let decoy = bcrypt::hash(filler, cost)
            .map_err(|e| AuthError::Internal(format!("bcrypt hash: {e}")))?;
        Ok(Self {
            cost,
            decoy: decoy.into(),
        })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password. Salted, so two calls never return the same digest.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| AuthError::Internal(format!("bcrypt hash: {e}")))
    }

    /// Verify a password against a bcrypt digest. A mismatch is `Ok(false)`.
    pub fn verify(&self, password: &str, digest: &str) -> Result<bool, AuthError> {
        bcrypt::verify(password, digest)
            .map_err(|e| AuthError::Internal(format!("bcrypt verify: {e}")))
    }

    /// [`hash`](Self::hash) on the blocking thread pool.
    pub async fn hash_blocking(&self, password: String) -> Result<String, AuthError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("hash task: {e}")))?
    }

    /// [`verify`](Self::verify) on the blocking thread pool.
    ///
    /// With `digest: None` the decoy is checked instead and the result is
    /// always `false`.
    pub async fn verify_blocking(
        &self,
        password: String,
        digest: Option<String>,
    ) -> Result<bool, AuthError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || match digest {
            Some(digest) => hasher.verify(&password, &digest),
            None => hasher.verify(&password, &hasher.decoy).map(|_| false),
        })
        .await
        .map_err(|e| AuthError::Internal(format!("verify task: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Lowest cost bcrypt accepts; keeps the tests fast.
    const TEST_COST: u32 = 4;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(TEST_COST).unwrap()
    }

    #[test]
    fn hash_then_verify() {
        let h = hasher();
        let digest = h.hash("password").unwrap();
        assert!(h.verify("password", &digest).unwrap());
        assert!(!h.verify("wrong", &digest).unwrap());
    }

    #[test]
    fn hash_is_salted() {
        let h = hasher();
        assert_ne!(h.hash("password").unwrap(), h.hash("password").unwrap());
    }

    #[test]
    fn digest_never_contains_plaintext() {
        let digest = hasher().hash("hunter22").unwrap();
        assert!(!digest.contains("hunter22"));
    }

    #[test]
    fn rejects_out_of_range_cost() {
        assert!(PasswordHasher::new(2).is_err());
    }

    #[test]
    fn malformed_digest_is_an_error_not_a_mismatch() {
        let err = hasher().verify("password", "not-a-bcrypt-digest").unwrap_err();
        assert!(matches!(err, AuthError::Internal(_)));
    }

    #[tokio::test]
    async fn verify_blocking_without_digest_is_false() {
        let h = hasher();
        assert!(!h.verify_blocking("password".into(), None).await.unwrap());
    }

    #[tokio::test]
    async fn blocking_variants_agree() {
        let h = hasher();
        let digest = h.hash_blocking("password".into()).await.unwrap();
        assert!(h.verify_blocking("password".into(), Some(digest.clone())).await.unwrap());
        assert!(!h.verify_blocking("nope".into(), Some(digest)).await.unwrap());
    }
}
