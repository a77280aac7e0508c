//! # REST API for Export
//!
//! Endpoint for exporting a course's attendance history as CSV.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};

use crate::AppState;
use shared::ExportCourseResponse;

/// Export a course's attendance history as CSV
pub async fn export_course(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/courses/{}/export", course_id);

    match state.export_service.export_course_csv(course_id).await {
        Ok(result) => (
            StatusCode::OK,
            Json(ExportCourseResponse {
                filename: result.filename,
                csv_content: result.csv_content,
                record_count: result.record_count,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to export course: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string()).into_response()
        }
    }
}
