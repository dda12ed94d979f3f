//! Shared helpers: a seeded in-memory app and a one-shot request driver.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use itemdesk_api::{AppState, config::ApiConfig};
use itemdesk_core::store::MemoryStore;
use serde_json::Value;
use tower::ServiceExt;

pub const SECRET: &str = "test-secret";

/// Router over a fresh `MemoryStore` with the default `test`/`password` user seeded.
pub async fn app() -> Router {
    app_with_config(ApiConfig::for_tests(SECRET)).await
}

pub async fn app_with_config(config: ApiConfig) -> Router {
    let state = AppState::new(config, Arc::new(MemoryStore::new())).expect("app state");
    assert!(state.seed().await.expect("seed user"));
    itemdesk_api::router(state)
}

/// Send one request and decode the JSON response body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    send_raw(app, builder.body(body).expect("request")).await
}

pub async fn send_raw(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.expect("request");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("parse JSON")
    };
    (status, json)
}

/// Log in as the seeded user and return the token.
pub async fn login(app: &Router) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/login",
        None,
        Some(serde_json::json!({"username": "test", "password": "password"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["token"].as_str().expect("token").to_string()
}
