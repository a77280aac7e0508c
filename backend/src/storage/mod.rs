//! # Storage Layer
//!
//! Data persistence for the attendance tracker:
//!
//! - **SQLite** (via sqlx) for the relational data: courses, weekly schedule
//!   slots, and dated occurrence/attendance records
//! - **YAML file** for the process-wide application preferences
//!
//! The domain layer talks to repositories through the traits in
//! [`traits`]; the concrete implementations live here.

pub mod db;
pub mod preferences_repository;
pub mod repositories;
pub mod traits;

pub use db::DbConnection;
pub use preferences_repository::PreferencesRepository;
pub use repositories::{AttendanceRepository, CourseRepository, ScheduleRepository};
pub use traits::{
    AttendanceStorage, CourseStorage, PreferenceStorage, ScheduleStorage,
};
