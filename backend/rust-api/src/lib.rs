use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod middlewares;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;

pub use config::Config;
pub use services::AppState;

pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .merge(trivia_routes())
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .with_state(app_state)
        .layer(middleware::from_fn(
            middlewares::metrics::metrics_middleware,
        ))
        .layer(TraceLayer::new_for_http())
}

fn trivia_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(handlers::categories::list_categories))
        .route(
            "/categories/{id}/questions",
            get(handlers::categories::questions_by_category),
        )
        .route(
            "/questions",
            get(handlers::questions::list_questions)
                .post(handlers::questions::create_or_search_questions),
        )
        .route("/questions/{id}", delete(handlers::questions::delete_question))
        .route("/search", post(handlers::questions::search_questions))
        .route("/quizzes", post(handlers::quizzes::next_question))
}
