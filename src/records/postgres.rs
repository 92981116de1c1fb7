use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{
    model::{
        Collection, Course, NewCourse, NewResult, NewStudent, RecordStatus, ResultRecord, Score,
        Student,
    },
    store::{RecordStore, StoreError},
};

const STUDENT_COLUMNS: &str = "id, first_name, family_name, date_of_birth, email, status";
const COURSE_COLUMNS: &str = "id, course_name, status";
const RESULT_COLUMNS: &str = "id, course_id, student_id, score, status";

#[derive(FromRow)]
struct StudentRow {
    id: Uuid,
    first_name: String,
    family_name: String,
    date_of_birth: NaiveDate,
    email: String,
    status: String,
}

#[derive(FromRow)]
struct CourseRow {
    id: Uuid,
    course_name: String,
    status: String,
}

#[derive(FromRow)]
struct ResultRow {
    id: Uuid,
    course_id: Uuid,
    student_id: Uuid,
    score: String,
    status: String,
}

fn decode_status(collection: Collection, id: Uuid, raw: &str) -> Result<RecordStatus, StoreError> {
    RecordStatus::parse(raw).ok_or_else(|| StoreError::Corrupt {
        collection,
        id,
        reason: format!("unknown status '{raw}'"),
    })
}

impl TryFrom<StudentRow> for Student {
    type Error = StoreError;

    fn try_from(row: StudentRow) -> Result<Self, Self::Error> {
        let status = decode_status(Collection::Students, row.id, &row.status)?;
        Ok(Student {
            id: row.id,
            first_name: row.first_name,
            family_name: row.family_name,
            date_of_birth: row.date_of_birth,
            email: row.email,
            status,
        })
    }
}

impl TryFrom<CourseRow> for Course {
    type Error = StoreError;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        let status = decode_status(Collection::Courses, row.id, &row.status)?;
        Ok(Course {
            id: row.id,
            course_name: row.course_name,
            status,
        })
    }
}

impl TryFrom<ResultRow> for ResultRecord {
    type Error = StoreError;

    fn try_from(row: ResultRow) -> Result<Self, Self::Error> {
        let status = decode_status(Collection::Results, row.id, &row.status)?;
        let score = Score::parse(&row.score).ok_or_else(|| StoreError::Corrupt {
            collection: Collection::Results,
            id: row.id,
            reason: format!("unknown score '{}'", row.score),
        })?;
        Ok(ResultRecord {
            id: row.id,
            course_id: row.course_id,
            student_id: row.student_id,
            score,
            status,
        })
    }
}

fn decode_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, StoreError>
where
    T: TryFrom<R, Error = StoreError>,
{
    rows.into_iter().map(T::try_from).collect()
}

/// Record store backed by the `students`, `courses` and `results` tables.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn find_active_students(&self) -> Result<Vec<Student>, StoreError> {
        let rows = sqlx::query_as::<_, StudentRow>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE status = $1 ORDER BY position"
        ))
        .bind(RecordStatus::Active.as_str())
        .fetch_all(&self.pool)
        .await?;
        decode_all(rows)
    }

    async fn find_active_courses(&self) -> Result<Vec<Course>, StoreError> {
        let rows = sqlx::query_as::<_, CourseRow>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE status = $1 ORDER BY position"
        ))
        .bind(RecordStatus::Active.as_str())
        .fetch_all(&self.pool)
        .await?;
        decode_all(rows)
    }

    async fn scan_results(&self) -> Result<Vec<ResultRecord>, StoreError> {
        let rows = sqlx::query_as::<_, ResultRow>(&format!(
            "SELECT {RESULT_COLUMNS} FROM results ORDER BY position"
        ))
        .fetch_all(&self.pool)
        .await?;
        decode_all(rows)
    }

    async fn find_student(&self, id: Uuid) -> Result<Option<Student>, StoreError> {
        sqlx::query_as::<_, StudentRow>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Student::try_from)
        .transpose()
    }

    async fn find_course(&self, id: Uuid) -> Result<Option<Course>, StoreError> {
        sqlx::query_as::<_, CourseRow>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Course::try_from)
        .transpose()
    }

    async fn find_result(&self, id: Uuid) -> Result<Option<ResultRecord>, StoreError> {
        sqlx::query_as::<_, ResultRow>(&format!(
            "SELECT {RESULT_COLUMNS} FROM results WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(ResultRecord::try_from)
        .transpose()
    }

    async fn insert_student(&self, student: NewStudent) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO students (id, first_name, family_name, date_of_birth, email, status)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id)
        .bind(&student.first_name)
        .bind(&student.family_name)
        .bind(student.date_of_birth)
        .bind(&student.email)
        .bind(RecordStatus::Active.as_str())
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    async fn insert_course(&self, course: NewCourse) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO courses (id, course_name, status) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(&course.course_name)
            .bind(RecordStatus::Active.as_str())
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn insert_result(&self, result: NewResult) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO results (id, course_id, student_id, score, status)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(result.course_id)
        .bind(result.student_id)
        .bind(result.score.as_str())
        .bind(RecordStatus::Active.as_str())
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update_status(
        &self,
        collection: Collection,
        id: Uuid,
        status: RecordStatus,
    ) -> Result<u64, StoreError> {
        let updated = sqlx::query(&format!(
            "UPDATE {} SET status = $2 WHERE id = $1 AND status <> $2",
            collection.name()
        ))
        .bind(id)
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;
        Ok(updated.rows_affected())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
