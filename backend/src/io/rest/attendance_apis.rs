//! # REST API for Attendance
//!
//! Endpoints for marking schedule classes, managing extra classes, listing a
//! course's recorded history, and the today view.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Local;
use log::{error, info};
use serde::Deserialize;

use crate::domain::commands::attendance::{
    CreateExtraClassCommand, MarkScheduleClassCommand, ScheduleDateCommand,
    SetRecordStatusCommand,
};
use crate::domain::models::attendance::ExtraClassTimings;
use crate::io::rest::mappers::attendance_mapper::AttendanceMapper;
use crate::AppState;
use shared::{
    CreateExtraClassRequest, ExtraClassDefaultsResponse, MarkAttendanceRequest,
    RecordListResponse, SetRecordStatusRequest,
};

/// Mark (or re-mark) the occurrence of a schedule slot on a date
pub async fn mark_attendance(
    State(state): State<AppState>,
    Json(request): Json<MarkAttendanceRequest>,
) -> impl IntoResponse {
    info!("POST /api/attendance - request: {:?}", request);

    let command = MarkScheduleClassCommand {
        schedule_id: request.schedule_id,
        date: request.date,
        status: AttendanceMapper::status_to_domain(request.status),
    };

    match state.attendance_service.mark_schedule_class(command).await {
        Ok(result) => {
            (StatusCode::OK, Json(AttendanceMapper::record_to_dto(result.record))).into_response()
        }
        Err(e) => {
            error!("Failed to mark attendance: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, e.to_string()).into_response()
        }
    }
}

/// Update the status of an existing occurrence record
pub async fn set_record_status(
    State(state): State<AppState>,
    Path(record_id): Path<i64>,
    Json(request): Json<SetRecordStatusRequest>,
) -> impl IntoResponse {
    info!("PUT /api/records/{}/status - request: {:?}", record_id, request);

    let command = SetRecordStatusCommand {
        record_id,
        status: AttendanceMapper::status_to_domain(request.status),
    };

    match state.attendance_service.set_record_status(command).await {
        Ok(result) => {
            (StatusCode::OK, Json(AttendanceMapper::record_to_dto(result.record))).into_response()
        }
        Err(e) => {
            error!("Failed to set record status: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string()).into_response()
        }
    }
}

/// Full dated history of a course, newest first
pub async fn list_course_records(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/courses/{}/records", course_id);

    match state.attendance_service.list_course_records(course_id).await {
        Ok(result) => {
            let response = RecordListResponse {
                records: result
                    .records
                    .into_iter()
                    .map(AttendanceMapper::record_to_dto)
                    .collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to list records: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string()).into_response()
        }
    }
}

/// Create a one-off extra class for a course
pub async fn create_extra_class(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    Json(request): Json<CreateExtraClassRequest>,
) -> impl IntoResponse {
    info!("POST /api/courses/{}/extra-classes - request: {:?}", course_id, request);

    let command = CreateExtraClassCommand {
        course_id,
        timings: AttendanceMapper::to_timings(&request),
        status: request.status.map(AttendanceMapper::status_to_domain),
    };

    match state.attendance_service.create_extra_class(command).await {
        Ok(result) => {
            (StatusCode::CREATED, Json(AttendanceMapper::record_to_dto(result.record)))
                .into_response()
        }
        Err(e) => {
            error!("Failed to create extra class: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, e.to_string()).into_response()
        }
    }
}

/// Pre-filled timings for the extra-class dialog
pub async fn extra_class_defaults() -> impl IntoResponse {
    let timings = ExtraClassTimings::default_adjusted(Local::now().naive_local());
    Json(ExtraClassDefaultsResponse {
        date: timings.date,
        start_time: timings.start_time,
        end_time: timings.end_time,
    })
}

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    pub week: i64,
}

/// Resolve a slot to the concrete date of its weekday in a given week
pub async fn get_schedule_date(
    State(state): State<AppState>,
    Path(slot_id): Path<i64>,
    Query(query): Query<WeekQuery>,
) -> impl IntoResponse {
    info!("GET /api/slots/{}/date?week={}", slot_id, query.week);

    let command = ScheduleDateCommand {
        schedule_id: slot_id,
        week_offset: query.week,
    };

    match state.attendance_service.schedule_date(command).await {
        Ok(result) => {
            (StatusCode::OK, Json(AttendanceMapper::schedule_date_to_dto(result))).into_response()
        }
        Err(e) => {
            error!("Failed to resolve schedule date: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string()).into_response()
        }
    }
}

/// Every class on today's date, across courses
pub async fn get_today(State(state): State<AppState>) -> impl IntoResponse {
    let today = Local::now().date_naive();
    info!("GET /api/today ({})", today);

    match state.attendance_service.classes_on_date(today).await {
        Ok(result) => {
            (StatusCode::OK, Json(AttendanceMapper::today_to_dto(result))).into_response()
        }
        Err(e) => {
            error!("Failed to build today view: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error building today view").into_response()
        }
    }
}
