use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, Encoder,
    HistogramVec, IntCounter, IntCounterVec, TextEncoder,
};

lazy_static! {
    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .unwrap();

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .unwrap();

    // Database Metrics (MongoDB)
    pub static ref DB_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "db_operations_total",
        "Total number of database operations",
        &["operation", "collection", "status"]
    )
    .unwrap();

    pub static ref DB_OPERATION_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "db_operation_duration_seconds",
        "Database operation duration in seconds",
        &["operation", "collection"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .unwrap();

    // Business Metrics
    pub static ref QUESTIONS_CREATED_TOTAL: IntCounter = register_int_counter!(
        "questions_created_total",
        "Total number of questions created"
    )
    .unwrap();

    pub static ref QUESTIONS_DELETED_TOTAL: IntCounter = register_int_counter!(
        "questions_deleted_total",
        "Total number of questions deleted"
    )
    .unwrap();

    pub static ref QUIZ_DRAWS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "quiz_draws_total",
        "Total number of quiz question draws",
        &["result"]
    )
    .unwrap();
}

/// Renders all metrics in Prometheus text format
pub fn render_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("Failed to convert metrics to UTF-8: {}", e)))
}

/// Helper: track database operation with metrics
pub async fn track_db_operation<F, T, E>(operation: &str, collection: &str, future: F) -> Result<T, E>
where
    F: std::future::Future<Output = Result<T, E>>,
{
    let start = std::time::Instant::now();
    let result = future.await;
    let duration = start.elapsed().as_secs_f64();

    let status = if result.is_ok() { "success" } else { "error" };

    DB_OPERATIONS_TOTAL
        .with_label_values(&[operation, collection, status])
        .inc();

    DB_OPERATION_DURATION_SECONDS
        .with_label_values(&[operation, collection])
        .observe(duration);

    result
}

/// Record the outcome of one quiz draw
pub fn record_quiz_draw(served: bool) {
    let result = if served { "served" } else { "exhausted" };
    QUIZ_DRAWS_TOTAL.with_label_values(&[result]).inc();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_registration() {
        let _ = HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/questions", "200"])
            .get();
    }

    #[test]
    fn test_render_metrics() {
        HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/test", "200"])
            .inc();
        record_quiz_draw(true);

        let output = render_metrics().unwrap();
        assert!(output.contains("http_requests_total"));
        assert!(output.contains("quiz_draws_total"));
    }

    #[tokio::test]
    async fn test_track_db_operation_counts_errors() {
        let before = DB_OPERATIONS_TOTAL
            .with_label_values(&["find", "test_collection", "error"])
            .get();

        let result: Result<(), String> =
            track_db_operation("find", "test_collection", async { Err("boom".to_string()) })
                .await;

        assert!(result.is_err());
        let after = DB_OPERATIONS_TOTAL
            .with_label_values(&["find", "test_collection", "error"])
            .get();
        assert_eq!(after, before + 1);
    }
}
