use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    routes::params::{parse_bound, parse_id, RangeQuery},
    state::AppState,
    types::{Item, ItemPayload},
};

fn decode_body(body: Result<Json<ItemPayload>, JsonRejection>) -> AppResult<ItemPayload> {
    match body {
        Ok(Json(payload)) => Ok(payload),
        Err(rejection) => {
            tracing::debug!("rejected item body: {}", rejection.body_text());
            Err(AppError::BadRequest("Invalid request body".to_string()))
        }
    }
}

pub async fn create_item(
    State(state): State<AppState>,
    body: Result<Json<ItemPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Item>)> {
    let payload = decode_body(body)?;
    let item = state.items.create_item(payload).await?;
    state.metrics.inc_items_created();
    tracing::info!(id = item.id, "created item");
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn list_items(
    State(state): State<AppState>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Item>>> {
    let Query(q) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let from = parse_bound(q.from.as_deref(), "from")?;
    let to = parse_bound(q.to.as_deref(), "to")?;
    let items = state.items.get_items(from, to).await?;
    Ok(Json(items))
}

pub async fn get_item(State(state): State<AppState>, Path(raw_id): Path<String>) -> AppResult<Json<Item>> {
    let id = parse_id(&raw_id)?;
    let item = state.items.get_item(id).await?;
    Ok(Json(item))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<ItemPayload>, JsonRejection>,
) -> AppResult<Json<Item>> {
    let id = parse_id(&raw_id)?;
    let payload = decode_body(body)?;
    let item = state.items.update_item(id, payload).await?;
    state.metrics.inc_items_updated();
    tracing::info!(id, "updated item");
    Ok(Json(item))
}

pub async fn delete_item(State(state): State<AppState>, Path(raw_id): Path<String>) -> AppResult<StatusCode> {
    let id = parse_id(&raw_id)?;
    state.items.delete_item(id).await?;
    state.metrics.inc_items_deleted();
    tracing::info!(id, "deleted item");
    Ok(StatusCode::NO_CONTENT)
}
