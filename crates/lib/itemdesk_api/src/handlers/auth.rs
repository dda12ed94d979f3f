//! Authentication request handlers.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::AppResult;
use crate::extract::ApiJson;
use crate::models::{LoginRequest, LoginResponse};
use crate::services::auth;

/// `POST /login`: authenticate with username + password.
pub async fn login_handler(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let resp = auth::login(
        &*state.store,
        &state.hasher,
        &state.tokens,
        body.username.as_deref(),
        body.password.as_deref(),
    )
    .await?;
    Ok(Json(resp))
}
