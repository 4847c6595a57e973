use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::ReturnDocument,
    Client, Collection, Database,
};
use serde::{Deserialize, Serialize};

use super::{QuestionStore, StoreError, StoreResult};
use crate::metrics::track_db_operation;
use crate::models::{
    category::Category,
    question::{NewQuestion, Question},
};

const QUESTIONS: &str = "questions";
const CATEGORIES: &str = "categories";
const COUNTERS: &str = "counters";

/// Question document stored in MongoDB "questions" collection
#[derive(Debug, Clone, Serialize, Deserialize)]
struct QuestionDocument {
    #[serde(rename = "_id")]
    id: i64,
    question: String,
    answer: String,
    category: i64,
    difficulty: i64,
}

impl From<QuestionDocument> for Question {
    fn from(d: QuestionDocument) -> Self {
        Question {
            id: d.id,
            question: d.question,
            answer: d.answer,
            category: d.category,
            difficulty: d.difficulty,
        }
    }
}

impl From<&Question> for QuestionDocument {
    fn from(q: &Question) -> Self {
        QuestionDocument {
            id: q.id,
            question: q.question.clone(),
            answer: q.answer.clone(),
            category: q.category,
            difficulty: q.difficulty,
        }
    }
}

/// Category document stored in MongoDB "categories" collection
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CategoryDocument {
    #[serde(rename = "_id")]
    id: i64,
    #[serde(rename = "type")]
    kind: String,
}

impl From<CategoryDocument> for Category {
    fn from(d: CategoryDocument) -> Self {
        Category {
            id: d.id,
            kind: d.kind,
        }
    }
}

/// Integer id sequence kept in the "counters" collection
#[derive(Debug, Deserialize)]
struct Counter {
    seq: i64,
}

pub struct MongoStore {
    mongo: Database,
}

impl MongoStore {
    pub fn new(mongo: Database) -> Self {
        Self { mongo }
    }

    pub async fn connect(uri: &str, database: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri).await?;
        tracing::info!("MongoDB client created for database {}", database);
        Ok(Self::new(client.database(database)))
    }

    fn questions(&self) -> Collection<QuestionDocument> {
        self.mongo.collection(QUESTIONS)
    }

    fn categories(&self) -> Collection<CategoryDocument> {
        self.mongo.collection(CATEGORIES)
    }

    async fn next_question_id(&self) -> StoreResult<i64> {
        let counter = self
            .mongo
            .collection::<Counter>(COUNTERS)
            .find_one_and_update(doc! { "_id": QUESTIONS }, doc! { "$inc": { "seq": 1_i64 } })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| StoreError::Sequence("counter upsert returned nothing".to_string()))?;
        Ok(counter.seq)
    }

    async fn find_questions(
        &self,
        filter: mongodb::bson::Document,
    ) -> StoreResult<Vec<Question>> {
        let cursor = self.questions().find(filter).sort(doc! { "_id": 1 }).await?;
        let docs: Vec<QuestionDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(Question::from).collect())
    }
}

#[async_trait]
impl QuestionStore for MongoStore {
    async fn list_questions(&self) -> StoreResult<Vec<Question>> {
        track_db_operation("find", QUESTIONS, self.find_questions(doc! {})).await
    }

    async fn questions_in_category(&self, category_id: i64) -> StoreResult<Vec<Question>> {
        track_db_operation(
            "find",
            QUESTIONS,
            self.find_questions(doc! { "category": category_id }),
        )
        .await
    }

    async fn get_question(&self, id: i64) -> StoreResult<Option<Question>> {
        track_db_operation("find_one", QUESTIONS, async {
            let found = self.questions().find_one(doc! { "_id": id }).await?;
            Ok::<_, StoreError>(found.map(Question::from))
        })
        .await
    }

    async fn insert_question(&self, question: NewQuestion) -> StoreResult<Question> {
        let id = self.next_question_id().await?;
        let question = question.with_id(id);

        track_db_operation("insert_one", QUESTIONS, async {
            self.questions()
                .insert_one(QuestionDocument::from(&question))
                .await?;
            Ok::<_, StoreError>(())
        })
        .await?;

        tracing::debug!("Inserted question {}", id);
        Ok(question)
    }

    async fn delete_question(&self, id: i64) -> StoreResult<bool> {
        track_db_operation("delete_one", QUESTIONS, async {
            let result = self.questions().delete_one(doc! { "_id": id }).await?;
            Ok::<_, StoreError>(result.deleted_count == 1)
        })
        .await
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        track_db_operation("find", CATEGORIES, async {
            let cursor = self
                .categories()
                .find(doc! {})
                .sort(doc! { "_id": 1 })
                .await?;
            let docs: Vec<CategoryDocument> = cursor.try_collect().await?;
            Ok::<_, StoreError>(docs.into_iter().map(Category::from).collect())
        })
        .await
    }

    async fn get_category(&self, id: i64) -> StoreResult<Option<Category>> {
        track_db_operation("find_one", CATEGORIES, async {
            let found = self.categories().find_one(doc! { "_id": id }).await?;
            Ok::<_, StoreError>(found.map(Category::from))
        })
        .await
    }

    async fn ensure_category(&self, category: Category) -> StoreResult<bool> {
        track_db_operation("update_one", CATEGORIES, async {
            let result = self
                .categories()
                .update_one(
                    doc! { "_id": category.id },
                    doc! { "$setOnInsert": { "type": category.kind.as_str() } },
                )
                .upsert(true)
                .await?;
            Ok::<_, StoreError>(result.upserted_id.is_some())
        })
        .await
    }

    async fn ping(&self) -> StoreResult<()> {
        self.mongo.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
