//! Item CRUD request handlers.

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use itemdesk_core::items::{self, parse_item_id};
use itemdesk_core::models::item::{Item, ItemChanges, NewItem};
use tracing::debug;

use crate::AppState;
use crate::error::AppResult;
use crate::extract::ApiJson;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{DeleteItemResponse, ItemRequest};

/// `GET /items`: all items ordered by id.
pub async fn list_items_handler(State(state): State<AppState>) -> AppResult<Json<Vec<Item>>> {
    let items = items::list(&*state.store).await?;
    Ok(Json(items))
}

/// `POST /items`: create an item; `description` defaults to empty.
pub async fn create_item_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(body): ApiJson<ItemRequest>,
) -> AppResult<(StatusCode, Json<Item>)> {
    let new_item = NewItem::parse(body.name, body.description)?;
    let item = items::create(&*state.store, &new_item).await?;
    debug!(item_id = item.id, username = %user.0.username, "item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// `PUT /items/{id}`: replace the name, and the description when supplied.
pub async fn update_item_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<ItemRequest>,
) -> AppResult<Json<Item>> {
    let id = parse_item_id(&id)?;
    let changes = ItemChanges::parse(body.name, body.description)?;
    let item = items::update(&*state.store, id, &changes).await?;
    debug!(item_id = item.id, username = %user.0.username, "item updated");
    Ok(Json(item))
}

/// `DELETE /items/{id}`: remove an item, echoing it back.
pub async fn delete_item_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteItemResponse>> {
    let id = parse_item_id(&id)?;
    let item = items::delete(&*state.store, id).await?;
    debug!(item_id = item.id, username = %user.0.username, "item deleted");
    Ok(Json(DeleteItemResponse {
        message: "Item deleted successfully".into(),
        item,
    }))
}
