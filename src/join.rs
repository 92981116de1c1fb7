//! Inner join of results against the active students and courses they reference.

use std::collections::HashMap;

use futures::{Stream, stream};
use serde::Serialize;
use uuid::Uuid;

use crate::records::{RecordStore, ResultRecord, Score, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultView {
    pub id: String,
    pub course_name: String,
    pub student_name: String,
    pub score: Score,
}

struct JoinState<'a> {
    store: &'a dyn RecordStore,
    pending: Option<std::vec::IntoIter<ResultRecord>>,
    course_names: HashMap<Uuid, Option<String>>,
    student_names: HashMap<Uuid, Option<String>>,
}

impl<'a> JoinState<'a> {
    fn new(store: &'a dyn RecordStore) -> Self {
        Self {
            store,
            pending: None,
            course_names: HashMap::new(),
            student_names: HashMap::new(),
        }
    }

    /// `None` when the course is missing or inactive.
    async fn course_name(&mut self, id: Uuid) -> Result<Option<String>, StoreError> {
        if let Some(cached) = self.course_names.get(&id) {
            return Ok(cached.clone());
        }
        let name = self
            .store
            .find_course(id)
            .await?
            .filter(|course| course.status.is_active())
            .map(|course| course.course_name);
        self.course_names.insert(id, name.clone());
        Ok(name)
    }

    /// `None` when the student is missing or inactive.
    async fn student_name(&mut self, id: Uuid) -> Result<Option<String>, StoreError> {
        if let Some(cached) = self.student_names.get(&id) {
            return Ok(cached.clone());
        }
        let name = self
            .store
            .find_student(id)
            .await?
            .filter(|student| student.status.is_active())
            .map(|student| student.full_name());
        self.student_names.insert(id, name.clone());
        Ok(name)
    }

    async fn next_view(&mut self) -> Result<Option<ResultView>, StoreError> {
        if self.pending.is_none() {
            let scanned = self.store.scan_results().await?;
            self.pending = Some(scanned.into_iter());
        }

        while let Some(record) = self.pending.as_mut().and_then(Iterator::next) {
            let Some(course_name) = self.course_name(record.course_id).await? else {
                continue;
            };
            let Some(student_name) = self.student_name(record.student_id).await? else {
                continue;
            };
            return Ok(Some(ResultView {
                id: record.id.to_string(),
                course_name,
                student_name,
                score: record.score,
            }));
        }

        Ok(None)
    }
}

/// Lazily yields every stored result whose course and student both exist and are active, in
/// storage order. The result's own status is not consulted. A storage error ends the stream.
pub fn list_active_results(
    store: &dyn RecordStore,
) -> impl Stream<Item = Result<ResultView, StoreError>> + Send + '_ {
    stream::try_unfold(JoinState::new(store), |mut state| async move {
        let next = state.next_view().await?;
        Ok(next.map(|view| (view, state)))
    })
}
