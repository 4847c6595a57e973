use serde::Serialize;

use super::{category::CategoryMap, question::Question};

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: CategoryMap,
}

/// GET /questions
#[derive(Debug, Serialize)]
pub struct QuestionPageResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: CategoryMap,
    /// Always null on the listing endpoint
    pub current_category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedQuestionResponse {
    pub success: bool,
    pub created: i64,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

/// Search results returned from POST /questions
#[derive(Debug, Serialize)]
pub struct SearchResultsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

/// POST /questions answers with either shape
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum QuestionPostResponse {
    Created(CreatedQuestionResponse),
    Search(SearchResultsResponse),
}

/// POST /search
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: String,
}

#[derive(Debug, Serialize)]
pub struct DeletedQuestionResponse {
    pub success: bool,
    pub deleted: i64,
    pub questions: Vec<Question>,
    /// Singular key kept for wire compatibility with existing clients
    pub total_question: usize,
}

/// GET /categories/{id}/questions
#[derive(Debug, Serialize)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: String,
}
