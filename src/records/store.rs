use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::model::{
    Collection, Course, NewCourse, NewResult, NewStudent, RecordStatus, ResultRecord, Student,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("stored {collection} record {id} is unreadable: {reason}")]
    Corrupt {
        collection: Collection,
        id: Uuid,
        reason: String,
    },
}

/// Persistence for the students, courses and results collections.
///
/// Listing methods return records in storage order. Lookups by id ignore status so that
/// soft-deleted records stay addressable.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn find_active_students(&self) -> Result<Vec<Student>, StoreError>;

    async fn find_active_courses(&self) -> Result<Vec<Course>, StoreError>;

    /// Every result regardless of its own status.
    async fn scan_results(&self) -> Result<Vec<ResultRecord>, StoreError>;

    async fn find_student(&self, id: Uuid) -> Result<Option<Student>, StoreError>;

    async fn find_course(&self, id: Uuid) -> Result<Option<Course>, StoreError>;

    async fn find_result(&self, id: Uuid) -> Result<Option<ResultRecord>, StoreError>;

    async fn insert_student(&self, student: NewStudent) -> Result<Uuid, StoreError>;

    async fn insert_course(&self, course: NewCourse) -> Result<Uuid, StoreError>;

    async fn insert_result(&self, result: NewResult) -> Result<Uuid, StoreError>;

    /// Sets `status` on the record with `id` and returns how many records changed (0 or 1).
    /// A record that already carries `status` counts as unchanged.
    async fn update_status(
        &self,
        collection: Collection,
        id: Uuid,
        status: RecordStatus,
    ) -> Result<u64, StoreError>;

    async fn close(&self) {}
}
