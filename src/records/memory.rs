use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    model::{
        Collection, Course, NewCourse, NewResult, NewStudent, RecordStatus, ResultRecord, Student,
    },
    store::{RecordStore, StoreError},
};

#[derive(Default)]
struct Collections {
    students: Vec<Student>,
    courses: Vec<Course>,
    results: Vec<ResultRecord>,
}

/// Insertion-ordered store kept in process memory.
#[derive(Default)]
pub struct MemoryRecordStore {
    inner: RwLock<Collections>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn set_status<T>(
    records: &mut [T],
    id: Uuid,
    status: RecordStatus,
    key: impl Fn(&mut T) -> (Uuid, &mut RecordStatus),
) -> u64 {
    for record in records.iter_mut() {
        let (record_id, current) = key(record);
        if record_id == id {
            if *current == status {
                return 0;
            }
            *current = status;
            return 1;
        }
    }
    0
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn find_active_students(&self) -> Result<Vec<Student>, StoreError> {
        let guard = self.inner.read().await;
        Ok(guard
            .students
            .iter()
            .filter(|student| student.status.is_active())
            .cloned()
            .collect())
    }

    async fn find_active_courses(&self) -> Result<Vec<Course>, StoreError> {
        let guard = self.inner.read().await;
        Ok(guard
            .courses
            .iter()
            .filter(|course| course.status.is_active())
            .cloned()
            .collect())
    }

    async fn scan_results(&self) -> Result<Vec<ResultRecord>, StoreError> {
        let guard = self.inner.read().await;
        Ok(guard.results.clone())
    }

    async fn find_student(&self, id: Uuid) -> Result<Option<Student>, StoreError> {
        let guard = self.inner.read().await;
        Ok(guard.students.iter().find(|s| s.id == id).cloned())
    }

    async fn find_course(&self, id: Uuid) -> Result<Option<Course>, StoreError> {
        let guard = self.inner.read().await;
        Ok(guard.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn find_result(&self, id: Uuid) -> Result<Option<ResultRecord>, StoreError> {
        let guard = self.inner.read().await;
        Ok(guard.results.iter().find(|r| r.id == id).cloned())
    }

    async fn insert_student(&self, student: NewStudent) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let mut guard = self.inner.write().await;
        guard.students.push(Student {
            id,
            first_name: student.first_name,
            family_name: student.family_name,
            date_of_birth: student.date_of_birth,
            email: student.email,
            status: RecordStatus::Active,
        });
        Ok(id)
    }

    async fn insert_course(&self, course: NewCourse) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let mut guard = self.inner.write().await;
        guard.courses.push(Course {
            id,
            course_name: course.course_name,
            status: RecordStatus::Active,
        });
        Ok(id)
    }

    async fn insert_result(&self, result: NewResult) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let mut guard = self.inner.write().await;
        guard.results.push(ResultRecord {
            id,
            course_id: result.course_id,
            student_id: result.student_id,
            score: result.score,
            status: RecordStatus::Active,
        });
        Ok(id)
    }

    async fn update_status(
        &self,
        collection: Collection,
        id: Uuid,
        status: RecordStatus,
    ) -> Result<u64, StoreError> {
        let mut guard = self.inner.write().await;
        let changed = match collection {
            Collection::Students => {
                set_status(&mut guard.students, id, status, |s| (s.id, &mut s.status))
            }
            Collection::Courses => {
                set_status(&mut guard.courses, id, status, |c| (c.id, &mut c.status))
            }
            Collection::Results => {
                set_status(&mut guard.results, id, status, |r| (r.id, &mut r.status))
            }
        };
        Ok(changed)
    }
}
