use axum::{extract::State, Json};
use std::sync::Arc;

use super::questions::parse_path_id;
use crate::{
    error::ApiError,
    extractors::AppPath,
    models::responses::{CategoriesResponse, CategoryQuestionsResponse},
    services::{question_service::QuestionService, AppState},
};

/// GET /categories
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let service = QuestionService::new(&state);
    Ok(Json(service.list_categories().await?))
}

/// GET /categories/{id}/questions
pub async fn questions_by_category(
    State(state): State<Arc<AppState>>,
    AppPath(raw_id): AppPath<String>,
) -> Result<Json<CategoryQuestionsResponse>, ApiError> {
    let category_id = parse_path_id(&raw_id)?;
    tracing::info!("Listing questions for category {}", category_id);

    let service = QuestionService::new(&state);
    Ok(Json(service.questions_by_category(category_id).await?))
}
