use axum::{extract::{Path, State}, http::StatusCode, Json};
use serde::Serialize;
use service::items::{Item, ItemInput};
use tracing::{info, warn};

use crate::errors::ApiError;
use crate::extract::JsonBody;
use crate::messages;
use crate::routes::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedItem {
    pub message: String,
    pub created_item: Item,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedItem {
    pub message: String,
    pub updated_item: Item,
}

/// 列出所有项目
pub async fn list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    let items = state.store.list().await;
    info!(count = items.len(), "list items");
    Json(items)
}

/// 根据 ID 获取项目
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    match state.store.get(&id).await {
        Ok(item) => Ok(Json(item)),
        Err(e) => {
            warn!(%id, error = %e, "get item failed");
            Err(e.into())
        }
    }
}

/// 创建项目（不做字段校验）
pub async fn create_item(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ItemInput>,
) -> (StatusCode, Json<CreatedItem>) {
    let item = state.store.create(input).await;
    info!(id = %item.id, "item created");
    (
        StatusCode::CREATED,
        Json(CreatedItem { message: messages::ITEM_CREATED.into(), created_item: item }),
    )
}

/// 替换项目的全部字段（id 除外）
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<ItemInput>,
) -> Result<Json<UpdatedItem>, ApiError> {
    match state.store.replace(&id, input).await {
        Ok(item) => {
            info!(%id, "item updated");
            Ok(Json(UpdatedItem { message: messages::ITEM_UPDATED.into(), updated_item: item }))
        }
        Err(e) => {
            warn!(%id, error = %e, "update item failed");
            Err(e.into())
        }
    }
}

/// 删除项目，成功时返回 204 无内容
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    match state.store.remove(&id).await {
        Ok(()) => {
            info!(%id, "item deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => {
            warn!(%id, error = %e, "delete item failed");
            Err(e.into())
        }
    }
}

/// Literal segment of the creation route. GET/PUT/DELETE on it behave as
/// lookups of an item whose id is `createItems`.
pub const CREATE_SEGMENT: &str = "createItems";

pub async fn get_create_segment(state: State<AppState>) -> Result<Json<Item>, ApiError> {
    get_item(state, Path(CREATE_SEGMENT.to_string())).await
}

pub async fn update_create_segment(
    state: State<AppState>,
    body: JsonBody<ItemInput>,
) -> Result<Json<UpdatedItem>, ApiError> {
    update_item(state, Path(CREATE_SEGMENT.to_string()), body).await
}

pub async fn delete_create_segment(state: State<AppState>) -> Result<StatusCode, ApiError> {
    delete_item(state, Path(CREATE_SEGMENT.to_string())).await
}
