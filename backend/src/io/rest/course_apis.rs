//! # REST API for Course Management
//!
//! Endpoints for creating, retrieving, and deleting courses and their weekly
//! schedule slots.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};

use crate::io::rest::mappers::course_mapper::CourseMapper;
use crate::AppState;
use shared::{CourseListResponse, CreateCourseRequest, ScheduleSlotSpec, SuccessResponse};

/// Create a new course with its weekly schedule
pub async fn create_course(
    State(state): State<AppState>,
    Json(request): Json<CreateCourseRequest>,
) -> impl IntoResponse {
    info!("POST /api/courses - request: {:?}", request);

    let command = match CourseMapper::to_create_command(request) {
        Ok(command) => command,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let created = match state.course_service.create_course(command).await {
        Ok(created) => created,
        Err(e) => {
            error!("Failed to create course: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    // Re-read through the stats path so the response matches later GETs
    let policy = state.preferences_service.snapshot().unset_classes_policy;
    match state
        .course_service
        .get_course(created.course.id, policy)
        .await
    {
        Ok(result) => match result.course {
            Some(course) => {
                (StatusCode::CREATED, Json(CourseMapper::to_overview_dto(course))).into_response()
            }
            None => (StatusCode::INTERNAL_SERVER_ERROR, "Course vanished after creation")
                .into_response(),
        },
        Err(e) => {
            error!("Failed to load created course: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error loading created course").into_response()
        }
    }
}

/// List all courses with their live statistics
pub async fn list_courses(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/courses");

    let policy = state.preferences_service.snapshot().unset_classes_policy;
    match state.course_service.list_courses(policy).await {
        Ok(result) => {
            let response = CourseListResponse {
                courses: result
                    .courses
                    .into_iter()
                    .map(CourseMapper::to_overview_dto)
                    .collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to list courses: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing courses").into_response()
        }
    }
}

/// Get a course by id
pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/courses/{}", course_id);

    let policy = state.preferences_service.snapshot().unset_classes_policy;
    match state.course_service.get_course(course_id, policy).await {
        Ok(result) => match result.course {
            Some(course) => {
                (StatusCode::OK, Json(CourseMapper::to_overview_dto(course))).into_response()
            }
            None => (StatusCode::NOT_FOUND, "Course not found").into_response(),
        },
        Err(e) => {
            error!("Failed to get course: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving course").into_response()
        }
    }
}

/// Delete a course; its slots and records go with it
pub async fn delete_course(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/courses/{}", course_id);

    match state.course_service.delete_course(course_id).await {
        Ok(result) => (
            StatusCode::OK,
            Json(SuccessResponse {
                success_message: result.success_message,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to delete course: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string()).into_response()
        }
    }
}

/// Add a weekly slot to an existing course
pub async fn add_schedule_slot(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    Json(request): Json<ScheduleSlotSpec>,
) -> impl IntoResponse {
    info!("POST /api/courses/{}/slots - request: {:?}", course_id, request);

    let slot = match CourseMapper::to_new_slot(request) {
        Ok(slot) => slot,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    match state
        .course_service
        .add_schedule_slot(crate::domain::commands::courses::AddScheduleSlotCommand {
            course_id,
            slot,
        })
        .await
    {
        Ok(result) => {
            (StatusCode::CREATED, Json(CourseMapper::slot_to_dto(result.slot))).into_response()
        }
        Err(e) => {
            error!("Failed to add slot: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, e.to_string()).into_response()
        }
    }
}

/// Delete a weekly slot, keeping recorded history
pub async fn delete_schedule_slot(
    State(state): State<AppState>,
    Path(slot_id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/slots/{}", slot_id);

    match state.course_service.delete_schedule_slot(slot_id).await {
        Ok(result) => (
            StatusCode::OK,
            Json(SuccessResponse {
                success_message: result.success_message,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to delete slot: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string()).into_response()
        }
    }
}
