use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::{
    catalog::CatalogError, records::StoreError, soft_delete::SoftDeleteError,
    validation::ValidationError,
};

use super::responses::json_error;

/// Every failure leaves a handler as `{"error": "..."}` with a matching status code.
#[derive(Debug)]
pub enum AppError {
    MalformedBody(String),
    Validation(ValidationError),
    NotFound(String),
    Storage(StoreError),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Storage(err)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(err) => AppError::Validation(err),
            CatalogError::NotFound(_) => AppError::NotFound(err.to_string()),
            CatalogError::Storage(err) => AppError::Storage(err),
        }
    }
}

impl From<SoftDeleteError> for AppError {
    fn from(err: SoftDeleteError) -> Self {
        match err {
            SoftDeleteError::NotFound(_) => AppError::NotFound(err.to_string()),
            SoftDeleteError::Storage(err) => AppError::Storage(err),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedBody(rejection.body_text())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedBody(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AppError::MalformedBody(detail) => format!("Invalid JSON body: {detail}"),
            AppError::Validation(err) => err.to_string(),
            AppError::NotFound(message) => message.clone(),
            AppError::Storage(err) => format!("An error occurred: {err}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Storage(err) => error!(?err, "record store failure"),
            other => warn!(error = %other.message(), "request rejected"),
        }
        json_error(self.status(), self.message()).into_response()
    }
}
