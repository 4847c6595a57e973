use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::error::ApiError;
use crate::metrics;
use crate::services::AppState;

pub mod categories;
pub mod questions;
pub mod quizzes;

pub async fn index() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "message": "Home page"
    }))
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut store = serde_json::Map::new();
    store.insert(
        "backend".to_string(),
        json!(state.config.storage_backend.as_str()),
    );

    let healthy = match tokio::time::timeout(
        std::time::Duration::from_secs(1),
        state.store.ping(),
    )
    .await
    {
        Ok(Ok(())) => {
            store.insert("status".to_string(), json!("healthy"));
            true
        }
        Ok(Err(e)) => {
            store.insert("status".to_string(), json!("unhealthy"));
            store.insert("error".to_string(), json!(format!("Store error: {}", e)));
            false
        }
        Err(_) => {
            store.insert("status".to_string(), json!("unhealthy"));
            store.insert("error".to_string(), json!("Store timeout after 1s"));
            false
        }
    };

    let (status_code, status) = if healthy {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status_code,
        Json(json!({
            "status": status,
            "service": "trivia-api",
            "version": env!("CARGO_PKG_VERSION"),
            "dependencies": { "store": store }
        })),
    )
}

pub async fn metrics_handler() -> Result<String, ApiError> {
    metrics::render_metrics()
        .map_err(|e| ApiError::Internal(format!("Failed to render metrics: {}", e)))
}

pub async fn not_found() -> ApiError {
    ApiError::not_found("No route")
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
