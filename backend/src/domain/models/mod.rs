pub mod attendance;
pub mod course;
pub mod preferences;
pub mod schedule;
