use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::{store::StoreError, validation::Violations};

pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(Violations),

    #[error("item not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<Violations> for ServiceError {
    fn from(violations: Violations) -> Self {
        ServiceError::Validation(violations)
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            ServiceError::Validation(violations) => {
                let messages = violations.messages();
                let body = json!({
                    "error": messages.first().cloned().unwrap_or_default(),
                    "violations": messages,
                });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ServiceError::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": "item not found" }))).into_response()
            }
            ServiceError::Store(source) => {
                error!("Store failure: {source}");
                internal_error()
            }
        }
    }
}

pub(crate) fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": INTERNAL_ERROR_MESSAGE })),
    )
        .into_response()
}
