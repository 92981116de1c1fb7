use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;
use uuid::Uuid;

/// Body of a successful mutation.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ApiMessage {
    pub message: String,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Canonical JSON payload for error responses.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Returned by every create endpoint.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Created {
    pub message: String,
    pub id: String,
}

impl Created {
    pub fn new(message: impl Into<String>, id: Uuid) -> Self {
        Self {
            message: message.into(),
            id: id.to_string(),
        }
    }
}

pub fn json_error(status: StatusCode, error: impl Into<String>) -> (StatusCode, Json<ApiError>) {
    (status, Json(ApiError::new(error)))
}

pub fn created(message: impl Into<String>, id: Uuid) -> (StatusCode, Json<Created>) {
    (StatusCode::CREATED, Json(Created::new(message, id)))
}
