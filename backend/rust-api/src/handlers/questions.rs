use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    error::ApiError,
    extractors::{AppJson, AppPath, AppQuery},
    models::{
        question::{PageQuery, QuestionPayload, SearchRequest},
        responses::{
            DeletedQuestionResponse, QuestionPageResponse, QuestionPostResponse, SearchResponse,
        },
    },
    services::{question_service::QuestionService, AppState},
};

/// Parses an integer path segment; anything else is treated as an unknown route
pub(super) fn parse_path_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::not_found(format!("Invalid id in path: {}", raw)))
}

/// GET /questions?page=N
pub async fn list_questions(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<PageQuery>,
) -> Result<Json<QuestionPageResponse>, ApiError> {
    let page = query.page();
    tracing::info!("Listing questions, page {}", page);

    let service = QuestionService::new(&state);
    Ok(Json(service.list_questions(page).await?))
}

/// POST /questions - create a question or search by `search`
pub async fn create_or_search_questions(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<PageQuery>,
    payload: Result<AppJson<QuestionPayload>, ApiError>,
) -> Result<Json<QuestionPostResponse>, ApiError> {
    let AppJson(payload) = payload.map_err(|e| ApiError::unprocessable(e.to_string()))?;

    let service = QuestionService::new(&state);
    Ok(Json(service.search_or_create(payload, query.page()).await?))
}

/// DELETE /questions/{id}
pub async fn delete_question(
    State(state): State<Arc<AppState>>,
    AppPath(raw_id): AppPath<String>,
    AppQuery(query): AppQuery<PageQuery>,
) -> Result<Json<DeletedQuestionResponse>, ApiError> {
    let id = parse_path_id(&raw_id)?;
    tracing::info!("Deleting question {}", id);

    let service = QuestionService::new(&state);
    Ok(Json(service.delete_question(id, query.page()).await?))
}

/// POST /search
pub async fn search_questions(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<PageQuery>,
    AppJson(request): AppJson<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let service = QuestionService::new(&state);
    Ok(Json(service.search(request, query.page()).await?))
}
