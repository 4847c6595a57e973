#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use rand::{rngs::StdRng, SeedableRng};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use trivia_api::{
    config::Config,
    create_router,
    models::{category::default_categories, question::Question},
    services::AppState,
    store::{InMemoryStore, QuestionStore},
};

fn question(id: i64, text: &str, answer: &str, category: i64, difficulty: i64) -> Question {
    Question {
        id,
        question: text.to_string(),
        answer: answer.to_string(),
        category,
        difficulty,
    }
}

/// Science (1) holds 3 questions, Art (2) 2, Geography (3) 1, History (4) 2,
/// Entertainment (5) 2, Sports (6) 2. Twelve in total.
pub fn seed_questions() -> Vec<Question> {
    vec![
        question(1, "What is the heaviest organ in the human body?", "The Liver", 1, 4),
        question(2, "Who discovered penicillin?", "Alexander Fleming", 1, 3),
        question(3, "Hematology is a branch of medicine involving the study of what?", "Blood", 1, 4),
        question(4, "Which Dutch graphic artist, initials M C, was a creator of optical illusions?", "Escher", 2, 1),
        question(5, "La Giaconda is better known as what?", "Mona Lisa", 2, 3),
        question(6, "What is the largest lake in Africa?", "Lake Victoria", 3, 2),
        question(7, "Who wrote the autobiography 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 4, 2),
        question(8, "Which dung beetle was worshipped by the ancient Egyptians?", "Scarab", 4, 4),
        question(9, "What movie earned Tom Hanks his third straight Oscar nomination, in 1996?", "Apollo 13", 5, 4),
        question(10, "What was the Title of the 1990 fantasy directed by Tim Burton?", "Edward Scissorhands", 5, 3),
        question(11, "Which is the only team to play in every soccer World Cup tournament?", "Brazil", 6, 3),
        question(12, "Which country won the first ever soccer World Cup in 1930?", "Uruguay", 6, 4),
    ]
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
}

pub fn create_test_app() -> TestApp {
    create_test_app_with(seed_questions())
}

pub fn create_test_app_with(questions: Vec<Question>) -> TestApp {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let store = Arc::new(InMemoryStore::with_data(default_categories(), questions));
    let app_state = Arc::new(AppState::with_store(
        Config::for_tests(),
        store.clone() as Arc<dyn QuestionStore>,
        StdRng::seed_from_u64(2024),
    ));

    TestApp {
        router: create_router(app_state),
        store,
    }
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, json)
}

pub async fn send_raw(app: &Router, method: &str, uri: &str, body: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

pub async fn question_count(store: &InMemoryStore) -> usize {
    store.list_questions().await.unwrap().len()
}

pub fn assert_error_envelope(status: StatusCode, body: &Value, code: u16, message: &str) {
    assert_eq!(status.as_u16(), code, "unexpected status, body: {}", body);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], code);
    assert_eq!(body["message"], message);
}
