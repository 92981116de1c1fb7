pub mod courses;
pub mod error;
pub mod responses;
pub mod results;
pub mod router;
pub mod state;
pub mod students;

pub use state::AppState;
