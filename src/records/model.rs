use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use uuid::Uuid;

/// Lifecycle flag shared by every collection. New records start `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Active => "ACTIVE",
            RecordStatus::Inactive => "INACTIVE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ACTIVE" => Some(RecordStatus::Active),
            "INACTIVE" => Some(RecordStatus::Inactive),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, RecordStatus::Active)
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RecordStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Letter grade recorded for a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Score {
    pub const ALL: [Score; 6] = [Score::A, Score::B, Score::C, Score::D, Score::E, Score::F];

    pub fn as_str(&self) -> &'static str {
        match self {
            Score::A => "A",
            Score::B => "B",
            Score::C => "C",
            Score::D => "D",
            Score::E => "E",
            Score::F => "F",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Score::ALL.into_iter().find(|score| score.as_str() == value)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Score {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// The three collections held by a record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Students,
    Courses,
    Results,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Students => "students",
            Collection::Courses => "courses",
            Collection::Results => "results",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: NaiveDate,
    pub email: String,
    pub status: RecordStatus,
}

impl Student {
    /// First and family name joined by a single space, untrimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.family_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: Uuid,
    pub course_name: String,
    pub status: RecordStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub id: Uuid,
    pub course_id: Uuid,
    pub student_id: Uuid,
    pub score: Score,
    pub status: RecordStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: NaiveDate,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub course_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResult {
    pub course_id: Uuid,
    pub student_id: Uuid,
    pub score: Score,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_text() {
        assert_eq!(RecordStatus::parse("ACTIVE"), Some(RecordStatus::Active));
        assert_eq!(RecordStatus::parse("INACTIVE"), Some(RecordStatus::Inactive));
        assert_eq!(RecordStatus::parse("active"), None);
        assert_eq!(RecordStatus::Inactive.as_str(), "INACTIVE");
    }

    #[test]
    fn score_accepts_only_uppercase_letters_a_to_f() {
        assert_eq!(Score::parse("A"), Some(Score::A));
        assert_eq!(Score::parse("F"), Some(Score::F));
        assert_eq!(Score::parse("G"), None);
        assert_eq!(Score::parse("b"), None);
        assert_eq!(Score::parse("AB"), None);
        assert_eq!(Score::parse(""), None);
    }

    #[test]
    fn full_name_keeps_surrounding_whitespace() {
        let student = Student {
            id: Uuid::new_v4(),
            first_name: " Alice".into(),
            family_name: "Smith ".into(),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            email: "a@x.com".into(),
            status: RecordStatus::Active,
        };
        assert_eq!(student.full_name(), " Alice Smith ");
    }

    #[test]
    fn status_serializes_as_uppercase_string() {
        let value = serde_json::to_value(RecordStatus::Active).unwrap();
        assert_eq!(value, serde_json::json!("ACTIVE"));
    }
}
