use rand::rngs::StdRng;
use std::sync::{Arc, Mutex};

use super::{
    question_filters::search,
    quiz_selector::next_question,
    AppState,
};
use crate::{
    error::ApiError,
    metrics::{self, QUESTIONS_CREATED_TOTAL, QUESTIONS_DELETED_TOTAL},
    models::{
        category::category_map,
        question::{Question, QuestionPayload, SearchField, SearchRequest},
        quiz::{QuizRequest, QuizResponse},
        responses::{
            CategoriesResponse, CategoryQuestionsResponse, CreatedQuestionResponse,
            DeletedQuestionResponse, QuestionPageResponse, QuestionPostResponse, SearchResponse,
            SearchResultsResponse,
        },
    },
    store::{QuestionStore, StoreError},
    utils::pagination::paginate,
};
use serde_json::Value;

pub struct QuestionService {
    store: Arc<dyn QuestionStore>,
    rng: Arc<Mutex<StdRng>>,
}

fn owned_page(page: u32, questions: &[Question]) -> Vec<Question> {
    paginate(page, questions).to_vec()
}

fn owned(questions: Vec<&Question>) -> Vec<Question> {
    questions.into_iter().cloned().collect()
}

fn store_failure(
    kind: fn(String) -> ApiError,
    action: &'static str,
) -> impl Fn(StoreError) -> ApiError {
    move |e| kind(format!("{}: {}", action, e))
}

impl QuestionService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            rng: state.rng.clone(),
        }
    }

    /// GET /categories
    pub async fn list_categories(&self) -> Result<CategoriesResponse, ApiError> {
        let categories = self
            .store
            .list_categories()
            .await
            .map_err(store_failure(ApiError::NotFound, "Failed to list categories"))?;

        Ok(CategoriesResponse {
            success: true,
            categories: category_map(&categories),
        })
    }

    /// GET /questions?page=N; an empty page is reported as not found
    pub async fn list_questions(&self, page: u32) -> Result<QuestionPageResponse, ApiError> {
        let not_found = store_failure(ApiError::NotFound, "Failed to list questions");
        let questions = self.store.list_questions().await.map_err(&not_found)?;
        let categories = self.store.list_categories().await.map_err(&not_found)?;

        let current = owned_page(page, &questions);
        if current.is_empty() {
            return Err(ApiError::not_found(format!(
                "Page {} is empty ({} questions)",
                page,
                questions.len()
            )));
        }

        Ok(QuestionPageResponse {
            success: true,
            questions: current,
            total_questions: questions.len(),
            categories: category_map(&categories),
            current_category: None,
        })
    }

    /// POST /questions: runs a search when the payload carries a non-empty
    /// `search` term, otherwise creates a question.
    pub async fn search_or_create(
        &self,
        payload: QuestionPayload,
        page: u32,
    ) -> Result<QuestionPostResponse, ApiError> {
        let unprocessable = store_failure(ApiError::Unprocessable, "Failed to store question");

        match payload.search_term() {
            SearchField::Term(term) => {
                let questions = self.store.list_questions().await.map_err(&unprocessable)?;
                let matches = search(term, &questions);
                tracing::info!("Search '{}' matched {} questions", term, matches.len());

                return Ok(QuestionPostResponse::Search(SearchResultsResponse {
                    success: true,
                    questions: owned(paginate(page, &matches).to_vec()),
                    total_questions: matches.len(),
                }));
            }
            SearchField::NotAString => {
                return Err(ApiError::bad_request("search must be a string"));
            }
            SearchField::Absent => {}
        }

        let new_question = payload
            .into_new_question()
            .map_err(ApiError::Unprocessable)?;

        if self
            .store
            .get_category(new_question.category)
            .await
            .map_err(&unprocessable)?
            .is_none()
        {
            return Err(ApiError::unprocessable(format!(
                "Category {} does not exist",
                new_question.category
            )));
        }

        let created = self
            .store
            .insert_question(new_question)
            .await
            .map_err(&unprocessable)?;
        QUESTIONS_CREATED_TOTAL.inc();
        tracing::info!("Created question {}", created.id);

        let questions = self.store.list_questions().await.map_err(&unprocessable)?;

        Ok(QuestionPostResponse::Created(CreatedQuestionResponse {
            success: true,
            created: created.id,
            questions: owned_page(page, &questions),
            total_questions: questions.len(),
        }))
    }

    /// POST /search. `current_category` is the first category's label; results
    /// are not grouped by category.
    pub async fn search(
        &self,
        request: SearchRequest,
        page: u32,
    ) -> Result<SearchResponse, ApiError> {
        let term = match request.search_term {
            Some(Value::String(term)) => term,
            None | Some(Value::Null) => return Err(ApiError::bad_request("Missing searchTerm")),
            Some(other) => {
                return Err(ApiError::bad_request(format!(
                    "searchTerm must be a string, got {}",
                    other
                )))
            }
        };

        let not_found = store_failure(ApiError::NotFound, "Failed to search questions");
        let questions = self.store.list_questions().await.map_err(&not_found)?;
        let categories = self.store.list_categories().await.map_err(&not_found)?;

        let matches = search(&term, &questions);
        tracing::info!("Search '{}' matched {} questions", term, matches.len());

        let first_category = match categories.first() {
            Some(category) if !matches.is_empty() => category,
            Some(_) => return Err(ApiError::not_found(format!("No match for '{}'", term))),
            None => return Err(ApiError::not_found("No categories available")),
        };

        Ok(SearchResponse {
            success: true,
            questions: owned(paginate(page, &matches).to_vec()),
            total_questions: questions.len(),
            current_category: first_category.kind.clone(),
        })
    }

    /// DELETE /questions/{id}
    pub async fn delete_question(
        &self,
        id: i64,
        page: u32,
    ) -> Result<DeletedQuestionResponse, ApiError> {
        let unprocessable = store_failure(ApiError::Unprocessable, "Failed to delete question");

        if self.store.get_question(id).await.map_err(&unprocessable)?.is_none() {
            return Err(ApiError::unprocessable(format!("Question {} does not exist", id)));
        }

        if !self.store.delete_question(id).await.map_err(&unprocessable)? {
            return Err(ApiError::unprocessable(format!(
                "Question {} vanished before delete",
                id
            )));
        }
        QUESTIONS_DELETED_TOTAL.inc();
        tracing::info!("Deleted question {}", id);

        let remaining = self.store.list_questions().await.map_err(&unprocessable)?;

        Ok(DeletedQuestionResponse {
            success: true,
            deleted: id,
            questions: owned_page(page, &remaining),
            total_question: remaining.len(),
        })
    }

    /// GET /categories/{id}/questions; unknown categories are unprocessable
    pub async fn questions_by_category(
        &self,
        category_id: i64,
    ) -> Result<CategoryQuestionsResponse, ApiError> {
        let unprocessable =
            store_failure(ApiError::Unprocessable, "Failed to load category questions");

        let category = self
            .store
            .get_category(category_id)
            .await
            .map_err(&unprocessable)?
            .ok_or_else(|| {
                ApiError::unprocessable(format!("Category {} does not exist", category_id))
            })?;

        let in_category = self
            .store
            .questions_in_category(category.id)
            .await
            .map_err(&unprocessable)?;

        Ok(CategoryQuestionsResponse {
            success: true,
            total_questions: in_category.len(),
            questions: in_category,
            current_category: category.kind,
        })
    }

    /// POST /quizzes; `question` is null once the scope is exhausted
    pub async fn next_quiz_question(&self, request: QuizRequest) -> Result<QuizResponse, ApiError> {
        let (scope, previous) = request.parse().map_err(ApiError::BadRequest)?;

        let questions = self
            .store
            .list_questions()
            .await
            .map_err(store_failure(ApiError::BadRequest, "Failed to load quiz pool"))?;

        let selected = {
            let mut rng = self
                .rng
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            next_question(scope, &previous, &questions, &mut *rng).cloned()
        };

        metrics::record_quiz_draw(selected.is_some());
        match &selected {
            Some(question) => tracing::debug!("Quiz {:?} served question {}", scope, question.id),
            None => tracing::info!(
                "Quiz {:?} exhausted after {} questions",
                scope,
                previous.len()
            ),
        }

        Ok(QuizResponse {
            success: true,
            question: selected,
        })
    }
}
