//! Credential check behind `POST /login`.

use tracing::debug;

use super::AuthError;
use super::password::PasswordHasher;
use crate::models::auth::User;
use crate::store::UserStore;

/// Verify a username/password pair against the credential store.
///
/// Missing or empty fields fail with [`AuthError::ValidationError`] before the
/// store is touched. An unknown username and a wrong password both fail with
/// [`AuthError::CredentialError`], and both pay for one bcrypt verification,
/// so callers cannot tell them apart.
pub async fn authenticate<U>(
    users: &U,
    hasher: &PasswordHasher,
    username: Option<&str>,
    password: Option<&str>,
) -> Result<User, AuthError>
where
    U: UserStore + ?Sized,
{
    let (username, password) = match (username, password) {
        (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
        _ => {
            return Err(AuthError::ValidationError(
                "Username and password required".into(),
            ));
        }
    };

    let record = users.find_user_by_username(username).await?;
    let (user, digest) = match record {
        Some(r) => (Some(r.user), Some(r.password_hash)),
        None => (None, None),
    };

    let matched = hasher.verify_blocking(password.to_string(), digest).await?;
    match user {
        Some(user) if matched => Ok(user),
        _ => {
            debug!("login rejected");
            Err(AuthError::CredentialError)
        }
    }
}
