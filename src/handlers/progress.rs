//! Progress stats and the bulk learning-data reset.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;
use crate::store;

use super::{json_error, store_unavailable};

/// Repetition streak at which a word counts as learned (first interval
/// past the six-day step)
const LEARNED_REPETITIONS: i64 = 3;

#[derive(Debug, Serialize)]
pub struct CollectionProgress {
    pub collection: String,
    pub total: usize,
    pub studied: usize,
    pub due: usize,
    pub learned: usize,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub collections: Vec<CollectionProgress>,
    pub total_words: usize,
    pub studied: usize,
    pub due: usize,
}

/// GET /api/progress
pub async fn progress(State(state): State<AppState>) -> Response {
    let store = match store::try_lock(&state.progress) {
        Ok(store) => store,
        Err(_) => return store_unavailable(),
    };

    let now = Utc::now();
    let mut collections = Vec::new();
    let mut studied_total = 0;
    let mut due_total = 0;

    for (key, words) in state.library.pools() {
        let map = store.collection(&key);
        let studied = words.iter().filter(|w| map.contains_key(&w.id)).count();
        let due = words
            .iter()
            .filter(|w| map.get(&w.id).is_some_and(|r| r.is_due(now)))
            .count();
        let learned = words
            .iter()
            .filter(|w| {
                map.get(&w.id)
                    .is_some_and(|r| r.repetitions >= LEARNED_REPETITIONS)
            })
            .count();

        studied_total += studied;
        due_total += due;
        collections.push(CollectionProgress {
            collection: key,
            total: words.len(),
            studied,
            due,
            learned,
        });
    }

    let response = ProgressResponse {
        collections,
        total_words: state.library.total_words(),
        studied: studied_total,
        due: due_total,
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// POST /api/progress/reset
///
/// Clears every progress record, restores default settings and drops
/// any session in flight.
pub async fn reset(State(state): State<AppState>) -> Response {
    {
        let mut store = match store::try_lock(&state.progress) {
            Ok(store) => store,
            Err(_) => return store_unavailable(),
        };
        if let Err(e) = store.clear() {
            tracing::error!("Failed to clear progress: {}", e);
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to clear progress");
        }
    }

    {
        let mut settings = match store::try_lock(&state.settings) {
            Ok(settings) => settings,
            Err(_) => return store_unavailable(),
        };
        if let Err(e) = settings.reset() {
            tracing::error!("Failed to reset settings: {}", e);
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to reset settings");
        }
    }

    match store::try_lock(&state.session) {
        Ok(mut session) => *session = None,
        Err(_) => return store_unavailable(),
    }

    (StatusCode::OK, Json(serde_json::json!({ "status": "reset" }))).into_response()
}
