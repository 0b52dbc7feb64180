//! Study settings endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::state::AppState;
use crate::store::{self, StudySettings};

use super::{json_error, store_unavailable};

/// GET /api/settings
pub async fn get_settings(State(state): State<AppState>) -> Response {
    let settings = match store::try_lock(&state.settings) {
        Ok(settings) => settings,
        Err(_) => return store_unavailable(),
    };
    Json(settings.get()).into_response()
}

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub session_size: usize,
}

/// POST /api/settings
pub async fn update_settings(
    State(state): State<AppState>,
    Json(request): Json<UpdateSettingsRequest>,
) -> Response {
    let mut settings = match store::try_lock(&state.settings) {
        Ok(settings) => settings,
        Err(_) => return store_unavailable(),
    };

    match settings.set(StudySettings {
        session_size: request.session_size,
    }) {
        Ok(saved) => Json(saved).into_response(),
        Err(e) => {
            tracing::error!("Failed to persist settings: {}", e);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to persist settings")
        }
    }
}
