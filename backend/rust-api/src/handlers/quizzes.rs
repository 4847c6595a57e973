use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    error::ApiError,
    extractors::AppJson,
    models::quiz::{QuizRequest, QuizResponse},
    services::{question_service::QuestionService, AppState},
};

/// POST /quizzes - next unseen question for the client's quiz
pub async fn next_question(
    State(state): State<Arc<AppState>>,
    AppJson(request): AppJson<QuizRequest>,
) -> Result<Json<QuizResponse>, ApiError> {
    let service = QuestionService::new(&state);
    Ok(Json(service.next_quiz_question(request).await?))
}
