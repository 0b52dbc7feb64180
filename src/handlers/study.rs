//! Study session flow: compose a session, walk it card by card,
//! schedule each word from the learner's judgment.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::content::CollectionKind;
use crate::domain::{ProgressRecord, ReviewQuality, Word};
use crate::srs::{self, QualityTally, StudySession};
use crate::state::{ActiveSession, AppState};
use crate::store::{self, LogOnError};

use super::{json_error, resolve_pool, store_unavailable};

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    pub kind: CollectionKind,
    #[serde(default)]
    pub slug: Option<String>,
    /// Session size override; defaults to the stored setting
    #[serde(default)]
    pub size: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub collection: String,
    pub total: usize,
    pub words: Vec<Word>,
}

#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub collection: String,
    pub total: usize,
    pub cursor: usize,
    pub complete: bool,
    pub tally: QualityTally,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<Word>,
}

impl SessionSnapshot {
    fn from_active(active: &ActiveSession) -> Self {
        Self {
            collection: active.collection.clone(),
            total: active.session.len(),
            cursor: active.session.cursor(),
            complete: active.session.is_complete(),
            tally: active.session.tally(),
            current: active.session.current().cloned(),
        }
    }
}

/// POST /api/study/session
///
/// Composes the next session for the chosen collection and installs it
/// as the active one. An empty composition (nothing due, nothing new)
/// is a valid response, not an error.
pub async fn start_session(
    State(state): State<AppState>,
    Json(request): Json<StartSessionRequest>,
) -> Response {
    let size = match request.size {
        Some(size) => size.clamp(1, config::MAX_SESSION_SIZE),
        None => {
            let settings = match store::try_lock(&state.settings) {
                Ok(settings) => settings,
                Err(_) => return store_unavailable(),
            };
            settings.get().session_size
        }
    };

    let (key, pool) = match resolve_pool(&state.library, request.kind, request.slug.as_deref()) {
        Ok(resolved) => resolved,
        Err(response) => return response,
    };

    let progress_map = {
        let store = match store::try_lock(&state.progress) {
            Ok(store) => store,
            Err(_) => return store_unavailable(),
        };
        store.collection(&key)
    };

    let words = srs::compose_session(pool, &progress_map, Utc::now(), size);
    let session = StudySession::new(words);

    let response = StartSessionResponse {
        collection: key.clone(),
        total: session.len(),
        words: session.words().to_vec(),
    };

    let mut guard = match store::try_lock(&state.session) {
        Ok(guard) => guard,
        Err(_) => return store_unavailable(),
    };
    *guard = Some(ActiveSession {
        collection: key,
        session,
    });

    (StatusCode::OK, Json(response)).into_response()
}

/// GET /api/study/session
pub async fn current_session(State(state): State<AppState>) -> Response {
    let guard = match store::try_lock(&state.session) {
        Ok(guard) => guard,
        Err(_) => return store_unavailable(),
    };

    match guard.as_ref() {
        Some(active) => Json(SessionSnapshot::from_active(active)).into_response(),
        None => json_error(StatusCode::NOT_FOUND, "No active study session"),
    }
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub word_id: i64,
    /// 0-5 recall score; values above 5 are clamped
    pub quality: u8,
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub word_id: i64,
    pub judgment: ReviewQuality,
    pub record: ProgressRecord,
    pub complete: bool,
    pub tally: QualityTally,
    pub remaining: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<Word>,
}

/// POST /api/study/review
///
/// Applies the scheduler to the session's current card, persists the
/// new record and advances the session.
pub async fn submit_review(
    State(state): State<AppState>,
    Json(request): Json<ReviewRequest>,
) -> Response {
    let quality = request.quality.min(5);
    let now = Utc::now();

    let mut session_guard = match store::try_lock(&state.session) {
        Ok(guard) => guard,
        Err(_) => return store_unavailable(),
    };
    let Some(active) = session_guard.take() else {
        return json_error(StatusCode::NOT_FOUND, "No active study session");
    };

    let Some(current) = active.session.current().cloned() else {
        *session_guard = Some(active);
        return json_error(StatusCode::CONFLICT, "Session is already complete");
    };
    if current.id != request.word_id {
        *session_guard = Some(active);
        return json_error(StatusCode::CONFLICT, "Word is not the current card");
    }

    let record = {
        let mut store = match store::try_lock(&state.progress) {
            Ok(store) => store,
            Err(_) => {
                *session_guard = Some(active);
                return store_unavailable();
            }
        };
        let previous = store
            .get(&active.collection, current.id)
            .cloned()
            .unwrap_or_else(|| ProgressRecord::fresh(now));
        let record = srs::schedule(quality, &previous, now);
        store
            .upsert(&active.collection, current.id, record.clone())
            .log_warn("Failed to persist progress");
        record
    };

    let judgment = ReviewQuality::classify(quality);
    let session = active.session.record(judgment);

    let response = ReviewResponse {
        word_id: current.id,
        judgment,
        record,
        complete: session.is_complete(),
        tally: session.tally(),
        remaining: session.len() - session.cursor(),
        next: session.current().cloned(),
    };

    *session_guard = Some(ActiveSession {
        collection: active.collection,
        session,
    });

    (StatusCode::OK, Json(response)).into_response()
}
