use std::any::Any;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::error;

use crate::{
    error::{internal_error, ServiceError},
    item::Item,
    state::AppState,
    validation::{Violation, Violations},
};

fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ServiceError> {
    body.map(|Json(value)| value)
        .map_err(|_| Violations::one(Violation::MalformedBody).into())
}

pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, ServiceError> {
    state.service.list().await.map(Json)
}

pub async fn create_item(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), ServiceError> {
    let body = json_body(body)?;
    let item = state.service.create(&body).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Item>, ServiceError> {
    let body = json_body(body)?;
    state.service.update(&id, &body).await.map(Json)
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ServiceError> {
    state.service.delete(&id).await?;
    Ok(Json(json!({ "message": "item deleted" })))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "OK", "message": "server is running" }))
}

pub async fn route_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "route not found" }))).into_response()
}

pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!("Request handler panicked: {detail}");
    internal_error()
}
