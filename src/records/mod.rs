mod memory;
mod model;
mod postgres;
mod store;

pub use memory::MemoryRecordStore;
pub use model::{
    Collection, Course, NewCourse, NewResult, NewStudent, RecordStatus, ResultRecord, Score,
    Student,
};
pub use postgres::PgRecordStore;
pub use store::{RecordStore, StoreError};
