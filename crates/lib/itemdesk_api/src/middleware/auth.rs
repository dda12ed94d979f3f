//! Authentication middleware: Bearer token extraction and JWT verification.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use itemdesk_core::models::auth::TokenClaims;
use tracing::debug;

use crate::AppState;
use crate::error::AppError;

/// Returned when no usable `Authorization: Bearer <token>` header is present.
pub const ACCESS_TOKEN_REQUIRED: &str = "Access token required";

/// Returned when a token is present but fails verification.
pub const INVALID_OR_EXPIRED_TOKEN: &str = "Invalid or expired token";

/// Key used to store `TokenClaims` in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub TokenClaims);

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Axum middleware: extracts `Authorization: Bearer <token>`, verifies the JWT,
/// and injects `AuthenticatedUser` into request extensions.
///
/// A missing or misshapen header is 401; a token that fails verification,
/// whether tampered or expired, is 403.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| AppError::Unauthorized(ACCESS_TOKEN_REQUIRED.into()))?;

    let claims = state.tokens.verify(token).map_err(|rejection| {
        debug!(%rejection, "bearer token refused");
        AppError::Forbidden(INVALID_OR_EXPIRED_TOKEN.into())
    })?;

    request.extensions_mut().insert(AuthenticatedUser(claims));

    Ok(next.run(request).await)
}
