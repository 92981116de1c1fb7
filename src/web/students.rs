use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Serialize;

use crate::{
    catalog::{self, StudentView},
    soft_delete::{SoftDeleteTarget, soft_delete},
    validation::Payload,
};

use super::{
    AppState,
    error::AppError,
    responses::{ApiMessage, Created, created},
};

#[derive(Debug, Serialize)]
pub struct StudentList {
    pub students: Vec<StudentView>,
}

#[derive(Debug, Serialize)]
pub struct StudentEnvelope {
    pub student: StudentView,
}

pub async fn list_students(State(state): State<AppState>) -> Result<Json<StudentList>, AppError> {
    let students = catalog::list_active_students(state.store()).await?;
    Ok(Json(StudentList { students }))
}

pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StudentEnvelope>, AppError> {
    let student = catalog::get_student(state.store(), &id).await?;
    Ok(Json(StudentEnvelope { student }))
}

pub async fn create_student(
    State(state): State<AppState>,
    body: Result<Json<Payload>, JsonRejection>,
) -> Result<(StatusCode, Json<Created>), AppError> {
    let Json(payload) = body?;
    let id = catalog::create_student(state.store(), &payload).await?;
    Ok(created("Student added successfully", id))
}

pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiMessage>, AppError> {
    soft_delete(state.store(), SoftDeleteTarget::Student, &id).await?;
    Ok(Json(ApiMessage::new("Student deleted successfully")))
}
