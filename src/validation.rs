//! Admission checks applied to create payloads before anything reaches the record store.

use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    dates::{DateFormatError, parse_date},
    records::{NewCourse, NewResult, NewStudent, Score},
};

pub type Payload = Map<String, Value>;

const STUDENT_FIELDS: [&str; 4] = ["firstName", "familyName", "dateOfBirth", "email"];
const COURSE_FIELDS: [&str; 1] = ["courseName"];
const RESULT_FIELDS: [&str; 3] = ["courseId", "studentId", "score"];

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error(transparent)]
    DateFormat(#[from] DateFormatError),
}

/// Pulls the named string fields out of `payload`. Absent, null and empty values all count
/// as missing and are reported together.
fn required<'a, const N: usize>(
    payload: &'a Payload,
    fields: [&'static str; N],
) -> Result<[&'a str; N], ValidationError> {
    let mut values = [""; N];
    let mut missing = Vec::new();
    let mut wrong_type = None;

    for (slot, field) in values.iter_mut().zip(fields) {
        match payload.get(field) {
            None | Some(Value::Null) => missing.push(field),
            Some(Value::String(value)) if value.is_empty() => missing.push(field),
            Some(Value::String(value)) => *slot = value.as_str(),
            Some(_) => {
                wrong_type.get_or_insert(field);
            }
        }
    }

    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }
    if let Some(field) = wrong_type {
        return Err(ValidationError::InvalidField {
            field,
            reason: "expected a string".into(),
        });
    }
    Ok(values)
}

fn parse_id(field: &'static str, value: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value).map_err(|_| ValidationError::InvalidField {
        field,
        reason: format!("'{value}' is not a valid id"),
    })
}

pub fn validate_student(payload: &Payload) -> Result<NewStudent, ValidationError> {
    let [first_name, family_name, date_of_birth, email] = required(payload, STUDENT_FIELDS)?;
    let date_of_birth = parse_date(date_of_birth)?;

    Ok(NewStudent {
        first_name: first_name.to_string(),
        family_name: family_name.to_string(),
        date_of_birth,
        email: email.to_string(),
    })
}

pub fn validate_course(payload: &Payload) -> Result<NewCourse, ValidationError> {
    let [course_name] = required(payload, COURSE_FIELDS)?;
    Ok(NewCourse {
        course_name: course_name.to_string(),
    })
}

pub fn validate_result(payload: &Payload) -> Result<NewResult, ValidationError> {
    let [course_id, student_id, score] = required(payload, RESULT_FIELDS)?;
    let course_id = parse_id("courseId", course_id)?;
    let student_id = parse_id("studentId", student_id)?;
    let score = Score::parse(score).ok_or_else(|| ValidationError::InvalidField {
        field: "score",
        reason: format!("'{score}' is not one of A, B, C, D, E, F"),
    })?;

    Ok(NewResult {
        course_id,
        student_id,
        score,
    })
}
