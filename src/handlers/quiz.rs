//! Quiz endpoints: generate questions over a collection and check
//! typed answers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::content::CollectionKind;
use crate::quiz::{self, QuizMode, QuizQuestion};
use crate::state::AppState;

use super::resolve_pool;

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    pub kind: CollectionKind,
    #[serde(default)]
    pub slug: Option<String>,
    pub mode: QuizMode,
    #[serde(default)]
    pub count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub mode: QuizMode,
    pub count: usize,
    pub questions: Vec<QuizQuestion>,
}

/// POST /api/quiz
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<QuizRequest>,
) -> Response {
    let count = request
        .count
        .unwrap_or(config::DEFAULT_QUIZ_SIZE)
        .clamp(1, config::MAX_QUIZ_SIZE);

    let (_, pool) = match resolve_pool(&state.library, request.kind, request.slug.as_deref()) {
        Ok(resolved) => resolved,
        Err(response) => return response,
    };

    let questions = quiz::generate_quiz(pool, request.mode, count);

    let response = QuizResponse {
        mode: request.mode,
        count: questions.len(),
        questions,
    };
    (StatusCode::OK, Json(response)).into_response()
}

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub mode: QuizMode,
    pub expected: String,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub correct: bool,
    pub expected: String,
}

/// POST /api/quiz/check
pub async fn check(Json(request): Json<CheckRequest>) -> Json<CheckResponse> {
    let correct = quiz::check_answer(request.mode, &request.expected, &request.answer);
    Json(CheckResponse {
        correct,
        expected: request.expected,
    })
}
