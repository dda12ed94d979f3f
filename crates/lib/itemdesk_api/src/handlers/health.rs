//! Health endpoint.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use crate::AppState;
use crate::models::HealthResponse;

/// `GET /health`: reports the version and whether the store answers.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_connected = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("store ping failed: {e}");
            false
        }
    };
    Json(HealthResponse {
        status: (if store_connected { "ok" } else { "degraded" }).to_string(),
        version: itemdesk_core::version().to_string(),
        store: state.store.backend().to_string(),
        store_connected,
    })
}
