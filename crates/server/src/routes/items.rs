use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use service::{Item, ItemChanges, NewItem};
use tracing::info;

use super::AppState;
use crate::{errors::JsonApiError, observability};

/// Unwrap a JSON body, counting shape errors as invalid requests.
fn body<T>(op: &str, payload: Result<Json<T>, JsonRejection>) -> Result<T, JsonApiError> {
    match payload {
        Ok(Json(v)) => Ok(v),
        Err(rejection) => {
            observability::record(op, "invalid");
            Err(rejection.into())
        }
    }
}

pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, JsonApiError> {
    let res = state.menu.list_items().await;
    observability::record("list", observability::outcome_of(&res));
    let items = res?;
    info!(count = items.len(), "list items");
    Ok(Json(items))
}

pub async fn get_item(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Item>, JsonApiError> {
    let res = state.menu.get_item(&id).await;
    observability::record("get", observability::outcome_of(&res));
    Ok(Json(res?))
}

pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<NewItem>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), JsonApiError> {
    let input = body("create", payload)?;
    let res = state.menu.create_item(input).await;
    observability::record("create", observability::outcome_of(&res));
    let item = res?;
    info!(id = %item.id, price = item.price, "created item");
    Ok((StatusCode::CREATED, Json(item)))
}

/// Full replace of name/description/price; an `id` in the body is ignored.
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ItemChanges>, JsonRejection>,
) -> Result<Json<Item>, JsonApiError> {
    let changes = body("update", payload)?;
    let res = state.menu.update_item(&id, changes).await;
    observability::record("update", observability::outcome_of(&res));
    let item = res?;
    info!(id = %item.id, "updated item");
    Ok(Json(item))
}
