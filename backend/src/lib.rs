//! # Attendance Tracker Backend
//!
//! Contains all non-UI logic for the attendance tracker application.
//!
//! The backend follows a layered architecture:
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (Business logic, services)
//!     ↓
//! Storage Layer (SQLite, preference file)
//! ```
//!
//! It is UI-agnostic: the frontend drives it over a localhost HTTP router,
//! and nothing here depends on how results are rendered.

pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use log::info;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};

use crate::domain::{AttendanceService, CourseService, ExportService, PreferencesService};
use crate::io::rest::{attendance_apis, course_apis, export_apis, preference_apis};
use crate::storage::{DbConnection, PreferencesRepository};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub course_service: CourseService,
    pub attendance_service: AttendanceService,
    pub preferences_service: PreferencesService,
    pub export_service: ExportService,
}

/// Initialize the database, the preference store, and all services
pub async fn initialize_backend() -> Result<AppState> {
    info!("Setting up database");
    let db = DbConnection::init().await?;

    let preferences_repository = PreferencesRepository::new(default_data_directory()?)?;
    let preferences_service = PreferencesService::new(preferences_repository)?;

    Ok(AppState {
        course_service: CourseService::new(db.clone()),
        attendance_service: AttendanceService::new(db.clone()),
        export_service: ExportService::new(db),
        preferences_service,
    })
}

/// Where the preference file lives
fn default_data_directory() -> Result<PathBuf> {
    let home_dir = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;

    Ok(PathBuf::from(home_dir)
        .join("Documents")
        .join("Attendance Tracker"))
}

/// Build the application router with all API routes and CORS for the
/// frontend dev server
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/courses",
            post(course_apis::create_course).get(course_apis::list_courses),
        )
        .route(
            "/courses/:course_id",
            get(course_apis::get_course).delete(course_apis::delete_course),
        )
        .route(
            "/courses/:course_id/slots",
            post(course_apis::add_schedule_slot),
        )
        .route(
            "/courses/:course_id/records",
            get(attendance_apis::list_course_records),
        )
        .route(
            "/courses/:course_id/extra-classes",
            post(attendance_apis::create_extra_class),
        )
        .route("/courses/:course_id/export", get(export_apis::export_course))
        .route("/slots/:slot_id", delete(course_apis::delete_schedule_slot))
        .route("/slots/:slot_id/date", get(attendance_apis::get_schedule_date))
        .route("/attendance", post(attendance_apis::mark_attendance))
        .route(
            "/records/:record_id/status",
            put(attendance_apis::set_record_status),
        )
        .route(
            "/extra-class-defaults",
            get(attendance_apis::extra_class_defaults),
        )
        .route("/today", get(attendance_apis::get_today))
        .route(
            "/preferences",
            get(preference_apis::get_preferences).put(preference_apis::update_preferences),
        );

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(state)
}
