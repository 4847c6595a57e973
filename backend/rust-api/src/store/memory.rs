use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::{QuestionStore, StoreResult};
use crate::models::{
    category::Category,
    question::{NewQuestion, Question},
};

#[derive(Debug, Default)]
struct Tables {
    questions: BTreeMap<i64, Question>,
    categories: BTreeMap<i64, Category>,
    last_question_id: i64,
}

/// Process-local store; ids are never reused after deletion
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store preloaded with categories and questions. Question ids
    /// are kept as given and the id sequence continues after the largest.
    pub fn with_data(categories: Vec<Category>, questions: Vec<Question>) -> Self {
        let last_question_id = questions.iter().map(|q| q.id).max().unwrap_or(0);
        let tables = Tables {
            questions: questions.into_iter().map(|q| (q.id, q)).collect(),
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
            last_question_id,
        };
        Self {
            tables: RwLock::new(tables),
        }
    }
}

#[async_trait]
impl QuestionStore for InMemoryStore {
    async fn list_questions(&self) -> StoreResult<Vec<Question>> {
        Ok(self.tables.read().await.questions.values().cloned().collect())
    }

    async fn questions_in_category(&self, category_id: i64) -> StoreResult<Vec<Question>> {
        let tables = self.tables.read().await;
        Ok(tables
            .questions
            .values()
            .filter(|q| q.category == category_id)
            .cloned()
            .collect())
    }

    async fn get_question(&self, id: i64) -> StoreResult<Option<Question>> {
        Ok(self.tables.read().await.questions.get(&id).cloned())
    }

    async fn insert_question(&self, question: NewQuestion) -> StoreResult<Question> {
        let mut tables = self.tables.write().await;
        tables.last_question_id += 1;
        let question = question.with_id(tables.last_question_id);
        tables.questions.insert(question.id, question.clone());
        Ok(question)
    }

    async fn delete_question(&self, id: i64) -> StoreResult<bool> {
        Ok(self.tables.write().await.questions.remove(&id).is_some())
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.tables.read().await.categories.values().cloned().collect())
    }

    async fn get_category(&self, id: i64) -> StoreResult<Option<Category>> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn ensure_category(&self, category: Category) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.categories.contains_key(&category.id) {
            return Ok(false);
        }
        tables.categories.insert(category.id, category);
        Ok(true)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
