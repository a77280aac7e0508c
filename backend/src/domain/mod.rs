//! # Domain Layer
//!
//! Business logic of the attendance tracker: course and schedule management,
//! attendance marking, extra classes, derived statistics, week arithmetic,
//! and preferences. Services talk to the storage layer through repositories
//! and know nothing about HTTP.

pub mod attendance_service;
pub mod commands;
pub mod course_service;
pub mod export_service;
pub mod models;
pub mod preferences_service;
pub mod statistics;
pub mod week;

pub use attendance_service::AttendanceService;
pub use course_service::CourseService;
pub use export_service::ExportService;
pub use preferences_service::PreferencesService;
