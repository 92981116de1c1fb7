use std::fmt;

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::records::{Collection, RecordStatus, RecordStore, StoreError};

/// Entities that can be retired. Results are intentionally absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftDeleteTarget {
    Student,
    Course,
}

impl SoftDeleteTarget {
    pub fn collection(&self) -> Collection {
        match self {
            SoftDeleteTarget::Student => Collection::Students,
            SoftDeleteTarget::Course => Collection::Courses,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SoftDeleteTarget::Student => "Student",
            SoftDeleteTarget::Course => "Course",
        }
    }
}

impl fmt::Display for SoftDeleteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
pub enum SoftDeleteError {
    #[error("{0} not found")]
    NotFound(SoftDeleteTarget),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Marks the entity INACTIVE. An unknown id, a malformed id and an entity that is already
/// inactive all report `NotFound`, so repeating a delete is harmless.
pub async fn soft_delete(
    store: &dyn RecordStore,
    target: SoftDeleteTarget,
    raw_id: &str,
) -> Result<Uuid, SoftDeleteError> {
    let Ok(id) = Uuid::parse_str(raw_id) else {
        warn!(%target, id = raw_id, "soft delete with malformed id");
        return Err(SoftDeleteError::NotFound(target));
    };

    let changed = store
        .update_status(target.collection(), id, RecordStatus::Inactive)
        .await?;

    if changed == 0 {
        warn!(%target, %id, "soft delete matched no active record");
        return Err(SoftDeleteError::NotFound(target));
    }

    info!(%target, %id, "record marked inactive");
    Ok(id)
}
