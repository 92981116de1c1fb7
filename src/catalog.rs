//! List, lookup and create operations for students, courses and results.

use serde::Serialize;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::{
    dates::format_date,
    records::{Course, RecordStatus, RecordStore, ResultRecord, Score, StoreError, Student},
    validation::{Payload, ValidationError, validate_course, validate_result, validate_student},
};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentView {
    pub id: String,
    pub first_name: String,
    pub family_name: String,
    pub full_name: String,
    pub date_of_birth: String,
    pub email: String,
    pub status: RecordStatus,
}

impl From<Student> for StudentView {
    fn from(student: Student) -> Self {
        let full_name = student.full_name();
        Self {
            id: student.id.to_string(),
            first_name: student.first_name,
            family_name: student.family_name,
            full_name,
            date_of_birth: format_date(student.date_of_birth),
            email: student.email,
            status: student.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseView {
    pub id: String,
    pub course_name: String,
    pub status: RecordStatus,
}

impl From<Course> for CourseView {
    fn from(course: Course) -> Self {
        Self {
            id: course.id.to_string(),
            course_name: course.course_name,
            status: course.status,
        }
    }
}

/// A stored result as-is, without the join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecordView {
    pub id: String,
    pub course_id: String,
    pub student_id: String,
    pub score: Score,
    pub status: RecordStatus,
}

impl From<ResultRecord> for ResultRecordView {
    fn from(result: ResultRecord) -> Self {
        Self {
            id: result.id.to_string(),
            course_id: result.course_id.to_string(),
            student_id: result.student_id.to_string(),
            score: result.score,
            status: result.status,
        }
    }
}

pub async fn list_active_students(
    store: &dyn RecordStore,
) -> Result<Vec<StudentView>, StoreError> {
    let students = store.find_active_students().await?;
    Ok(students.into_iter().map(StudentView::from).collect())
}

pub async fn list_active_courses(
    store: &dyn RecordStore,
) -> Result<Vec<CourseView>, StoreError> {
    let courses = store.find_active_courses().await?;
    Ok(courses.into_iter().map(CourseView::from).collect())
}

pub async fn create_student(
    store: &dyn RecordStore,
    payload: &Payload,
) -> Result<Uuid, CatalogError> {
    let student = validate_student(payload)?;
    let id = store.insert_student(student).await?;
    info!(%id, "student created");
    Ok(id)
}

pub async fn create_course(
    store: &dyn RecordStore,
    payload: &Payload,
) -> Result<Uuid, CatalogError> {
    let course = validate_course(payload)?;
    let id = store.insert_course(course).await?;
    info!(%id, "course created");
    Ok(id)
}

/// Admits a result only if its course and student both exist and are active right now. The
/// references are not locked, so either may be retired before the insert lands.
pub async fn create_result(
    store: &dyn RecordStore,
    payload: &Payload,
) -> Result<Uuid, CatalogError> {
    let result = validate_result(payload)?;

    let course_active = store
        .find_course(result.course_id)
        .await?
        .is_some_and(|course| course.status.is_active());
    if !course_active {
        return Err(ValidationError::InvalidField {
            field: "courseId",
            reason: format!("no active course with id {}", result.course_id),
        }
        .into());
    }

    let student_active = store
        .find_student(result.student_id)
        .await?
        .is_some_and(|student| student.status.is_active());
    if !student_active {
        return Err(ValidationError::InvalidField {
            field: "studentId",
            reason: format!("no active student with id {}", result.student_id),
        }
        .into());
    }

    let id = store.insert_result(result).await?;
    info!(%id, "result created");
    Ok(id)
}

fn parse_lookup_id(raw: &str, label: &'static str) -> Result<Uuid, CatalogError> {
    Uuid::parse_str(raw).map_err(|_| CatalogError::NotFound(label))
}

pub async fn get_student(
    store: &dyn RecordStore,
    raw_id: &str,
) -> Result<StudentView, CatalogError> {
    let id = parse_lookup_id(raw_id, "Student")?;
    store
        .find_student(id)
        .await?
        .map(StudentView::from)
        .ok_or(CatalogError::NotFound("Student"))
}

pub async fn get_course(
    store: &dyn RecordStore,
    raw_id: &str,
) -> Result<CourseView, CatalogError> {
    let id = parse_lookup_id(raw_id, "Course")?;
    store
        .find_course(id)
        .await?
        .map(CourseView::from)
        .ok_or(CatalogError::NotFound("Course"))
}

pub async fn get_result(
    store: &dyn RecordStore,
    raw_id: &str,
) -> Result<ResultRecordView, CatalogError> {
    let id = parse_lookup_id(raw_id, "Result")?;
    store
        .find_result(id)
        .await?
        .map(ResultRecordView::from)
        .ok_or(CatalogError::NotFound("Result"))
}
