use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use futures::TryStreamExt;
use serde::Serialize;

use crate::{
    catalog::{self, ResultRecordView},
    join::{ResultView, list_active_results},
    validation::Payload,
};

use super::{
    AppState,
    error::AppError,
    responses::{Created, created},
};

#[derive(Debug, Serialize)]
pub struct ResultList {
    pub results: Vec<ResultView>,
}

#[derive(Debug, Serialize)]
pub struct ResultEnvelope {
    pub result: ResultRecordView,
}

/// Collected in full before responding so a mid-listing store failure yields no rows.
pub async fn list_results(State(state): State<AppState>) -> Result<Json<ResultList>, AppError> {
    let results = list_active_results(state.store()).try_collect().await?;
    Ok(Json(ResultList { results }))
}

pub async fn get_result(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResultEnvelope>, AppError> {
    let result = catalog::get_result(state.store(), &id).await?;
    Ok(Json(ResultEnvelope { result }))
}

pub async fn create_result(
    State(state): State<AppState>,
    body: Result<Json<Payload>, JsonRejection>,
) -> Result<(StatusCode, Json<Created>), AppError> {
    let Json(payload) = body?;
    let id = catalog::create_result(state.store(), &payload).await?;
    Ok(created("Result added successfully", id))
}
