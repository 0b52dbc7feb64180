//! Browse endpoints: collection listings and word lists for the
//! flip-through and list views.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::content::{CollectionKind, SongSet};
use crate::state::AppState;

use super::json_error;

#[derive(Debug, Serialize)]
pub struct SongSummary {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub word_count: usize,
}

impl SongSummary {
    fn from_set(set: &SongSet) -> Self {
        Self {
            slug: set.slug.clone(),
            title: set.title.clone(),
            description: set.description.clone(),
            word_count: set.words.len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CollectionsResponse {
    pub basic_words: usize,
    pub textbook_words: usize,
    pub songs: Vec<SongSummary>,
}

/// GET /api/collections
pub async fn list_collections(State(state): State<AppState>) -> Json<CollectionsResponse> {
    Json(CollectionsResponse {
        basic_words: state.library.basic().len(),
        textbook_words: state.library.textbook().len(),
        songs: state
            .library
            .songs()
            .iter()
            .map(SongSummary::from_set)
            .collect(),
    })
}

/// GET /api/collections/{kind}/words
pub async fn collection_words(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Response {
    match kind.parse::<CollectionKind>() {
        Ok(CollectionKind::Basic) => Json(state.library.basic().to_vec()).into_response(),
        Ok(CollectionKind::Textbook) => Json(state.library.textbook().to_vec()).into_response(),
        Ok(CollectionKind::Song) => json_error(
            StatusCode::BAD_REQUEST,
            "Song words are served per set at /api/songs/{slug}",
        ),
        Err(_) => json_error(StatusCode::BAD_REQUEST, "Unknown collection kind"),
    }
}

/// GET /api/songs
pub async fn list_songs(State(state): State<AppState>) -> Json<Vec<SongSummary>> {
    Json(
        state
            .library
            .songs()
            .iter()
            .map(SongSummary::from_set)
            .collect(),
    )
}

/// GET /api/songs/{slug}
pub async fn song_set(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match state.library.song(&slug) {
        Some(set) => Json(set.clone()).into_response(),
        None => json_error(StatusCode::NOT_FOUND, "Unknown song"),
    }
}
