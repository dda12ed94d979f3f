//! Startup seeding of the default account.

use tracing::info;

use super::AuthError;
use super::password::PasswordHasher;
use crate::models::auth::SeedUser;
use crate::store::{StoreError, UserStore};

/// Create the seed user if no user with that name exists yet.
///
/// Returns `true` when a user was inserted. An existing user is left
/// untouched, including its password.
pub async fn ensure_seed_user<U>(
    users: &U,
    hasher: &PasswordHasher,
    seed: &SeedUser,
) -> Result<bool, AuthError>
where
    U: UserStore + ?Sized,
{
    if users.find_user_by_username(&seed.username).await?.is_some() {
        return Ok(false);
    }
    let digest = hasher.hash_blocking(seed.password.clone()).await?;
    match users
        .create_user(&seed.username, seed.email.as_deref(), &digest)
        .await
    {
        Ok(user) => {
            info!(username = %user.username, id = user.id, "seeded user");
            Ok(true)
        }
        // Another instance seeded it between the lookup and the insert.
        Err(StoreError::DuplicateUsername(_)) => Ok(false),
        Err(e) => Err(e.into()),
    }
}
