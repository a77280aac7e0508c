//! # REST API for Preferences
//!
//! Endpoints for reading and updating the process-wide application
//! preferences.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};

use crate::io::rest::mappers::preferences_mapper::PreferencesMapper;
use crate::AppState;
use shared::UpdatePreferencesRequest;

/// Get the current preferences
pub async fn get_preferences(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/preferences");

    let preferences = state.preferences_service.snapshot();
    (StatusCode::OK, Json(PreferencesMapper::to_dto(preferences))).into_response()
}

/// Apply a partial preference update
pub async fn update_preferences(
    State(state): State<AppState>,
    Json(request): Json<UpdatePreferencesRequest>,
) -> impl IntoResponse {
    info!("PUT /api/preferences - request: {:?}", request);

    let command = PreferencesMapper::to_update_command(request);
    match state.preferences_service.update(command) {
        Ok(preferences) => {
            (StatusCode::OK, Json(PreferencesMapper::to_dto(preferences))).into_response()
        }
        Err(e) => {
            error!("Failed to update preferences: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}
