use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Serialize;

use crate::{
    catalog::{self, CourseView},
    soft_delete::{SoftDeleteTarget, soft_delete},
    validation::Payload,
};

use super::{
    AppState,
    error::AppError,
    responses::{ApiMessage, Created, created},
};

#[derive(Debug, Serialize)]
pub struct CourseList {
    pub courses: Vec<CourseView>,
}

#[derive(Debug, Serialize)]
pub struct CourseEnvelope {
    pub course: CourseView,
}

pub async fn list_courses(State(state): State<AppState>) -> Result<Json<CourseList>, AppError> {
    let courses = catalog::list_active_courses(state.store()).await?;
    Ok(Json(CourseList { courses }))
}

pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CourseEnvelope>, AppError> {
    let course = catalog::get_course(state.store(), &id).await?;
    Ok(Json(CourseEnvelope { course }))
}

pub async fn create_course(
    State(state): State<AppState>,
    body: Result<Json<Payload>, JsonRejection>,
) -> Result<(StatusCode, Json<Created>), AppError> {
    let Json(payload) = body?;
    let id = catalog::create_course(state.store(), &payload).await?;
    Ok(created("Course added successfully", id))
}

pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiMessage>, AppError> {
    soft_delete(state.store(), SoftDeleteTarget::Course, &id).await?;
    Ok(Json(ApiMessage::new("Course deleted successfully")))
}
