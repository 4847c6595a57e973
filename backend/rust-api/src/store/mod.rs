//! Persistence for questions and categories.
//!
//! Services talk to storage only through [`QuestionStore`], so the same
//! orchestration runs against MongoDB in production and the in-memory
//! store in tests and local development.

use async_trait::async_trait;
use mongodb::error::ErrorKind;

use crate::models::{
    category::Category,
    question::{NewQuestion, Question},
};

pub mod memory;
pub mod mongo;

pub use memory::InMemoryStore;
pub use mongo::MongoStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Backend(mongodb::error::Error),
    /// A stored document could not be decoded
    #[error("corrupt document: {0}")]
    Corrupt(String),
    #[error("id sequence unavailable: {0}")]
    Sequence(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        if let ErrorKind::BsonDeserialization(decode) = e.kind.as_ref() {
            return StoreError::Corrupt(decode.to_string());
        }
        StoreError::Backend(e)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// All questions ordered by id
    async fn list_questions(&self) -> StoreResult<Vec<Question>>;

    /// Questions whose category equals `category_id`, ordered by id
    async fn questions_in_category(&self, category_id: i64) -> StoreResult<Vec<Question>>;

    async fn get_question(&self, id: i64) -> StoreResult<Option<Question>>;

    /// Persists a question and returns it with its assigned id
    async fn insert_question(&self, question: NewQuestion) -> StoreResult<Question>;

    /// Returns false when no question had this id
    async fn delete_question(&self, id: i64) -> StoreResult<bool>;

    /// All categories ordered by id
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;

    async fn get_category(&self, id: i64) -> StoreResult<Option<Category>>;

    /// Inserts the category unless one with the same id exists.
    /// Returns true if it was inserted.
    async fn ensure_category(&self, category: Category) -> StoreResult<bool>;

    /// Liveness probe used by /health
    async fn ping(&self) -> StoreResult<()>;
}
