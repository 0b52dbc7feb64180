//! HTTP handlers for the JSON API.

pub mod library;
pub mod progress;
pub mod quiz;
pub mod settings;
pub mod study;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::content::{CollectionKind, Library};
use crate::domain::Word;
use crate::state::AppState;
use crate::store;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/overview", get(overview))
        .route("/api/collections", get(library::list_collections))
        .route("/api/collections/{kind}/words", get(library::collection_words))
        .route("/api/songs", get(library::list_songs))
        .route("/api/songs/{slug}", get(library::song_set))
        .route(
            "/api/study/session",
            post(study::start_session).get(study::current_session),
        )
        .route("/api/study/review", post(study::submit_review))
        .route("/api/quiz", post(quiz::generate))
        .route("/api/quiz/check", post(quiz::check))
        .route("/api/progress", get(progress::progress))
        .route("/api/progress/reset", post(progress::reset))
        .route(
            "/api/settings",
            get(settings::get_settings).post(settings::update_settings),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// JSON error body with the given status code
pub(crate) fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

pub(crate) fn store_unavailable() -> Response {
    json_error(StatusCode::SERVICE_UNAVAILABLE, "Store unavailable")
}

/// Resolve a request's collection choice to its progress-store key and
/// word pool. Song collections need a slug.
pub(crate) fn resolve_pool<'a>(
    library: &'a Library,
    kind: CollectionKind,
    slug: Option<&str>,
) -> Result<(String, &'a [Word]), Response> {
    match kind {
        CollectionKind::Basic => Ok(("basic".to_string(), library.basic())),
        CollectionKind::Textbook => Ok(("textbook".to_string(), library.textbook())),
        CollectionKind::Song => {
            let slug = slug.ok_or_else(|| {
                json_error(StatusCode::BAD_REQUEST, "Song collection requires a slug")
            })?;
            let set = library
                .song(slug)
                .ok_or_else(|| json_error(StatusCode::NOT_FOUND, "Unknown song"))?;
            Ok((format!("song:{}", set.slug), set.words.as_slice()))
        }
    }
}

fn format_relative_time(dt: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = dt.signed_duration_since(now);

    let minutes = duration.num_minutes();
    let hours = duration.num_hours();
    let days = duration.num_days();

    if minutes < 1 {
        "now".to_string()
    } else if minutes < 60 {
        format!("in {} minute{}", minutes, if minutes == 1 { "" } else { "s" })
    } else if hours < 24 {
        format!("in {} hour{}", hours, if hours == 1 { "" } else { "s" })
    } else if days == 1 {
        "tomorrow".to_string()
    } else {
        format!("in {} days", days)
    }
}

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub total_words: usize,
    pub studied: usize,
    pub due_count: usize,
    /// Human-readable time of the next upcoming review, present only
    /// when nothing is currently due
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review: Option<String>,
}

/// GET /api/overview
pub async fn overview(State(state): State<AppState>) -> Response {
    let store = match store::try_lock(&state.progress) {
        Ok(store) => store,
        Err(_) => return store_unavailable(),
    };

    let now = Utc::now();
    let due_count: usize = state
        .library
        .pools()
        .iter()
        .map(|(key, _)| store.due_count(key, now))
        .sum();

    let next_review = if due_count == 0 {
        store
            .next_review_after(now)
            .map(|at| format_relative_time(at, now))
    } else {
        None
    };

    let response = OverviewResponse {
        total_words: state.library.total_words(),
        studied: store.studied_count(),
        due_count,
        next_review,
    };

    (StatusCode::OK, Json(response)).into_response()
}
