//! Authentication service: the login handshake delegating to `itemdesk_core::auth`.

use itemdesk_core::auth::jwt::TokenService;
use itemdesk_core::auth::login::authenticate;
use itemdesk_core::auth::password::PasswordHasher;
use itemdesk_core::store::UserStore;
use tracing::info;

use crate::error::AppResult;
use crate::models::{AuthUser, LoginResponse};

/// Authenticate with username + password and issue an access token.
pub async fn login<U>(
    users: &U,
    hasher: &PasswordHasher,
    tokens: &TokenService,
    username: Option<&str>,
    password: Option<&str>,
) -> AppResult<LoginResponse>
where
    U: UserStore + ?Sized,
{
    let user = authenticate(users, hasher, username, password).await?;
    let issued = tokens.issue(&user)?;
    info!(user_id = user.id, username = %user.username, "login succeeded");
    Ok(LoginResponse {
        token: issued.token,
        user: AuthUser::from(user),
    })
}
