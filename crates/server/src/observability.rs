use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};
use service::ServiceError;

// Prometheus metrics (default registry)
pub static ITEM_OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "catalog_item_operations_total",
        "Item API operations by outcome",
        &["operation", "outcome"]
    )
    .expect("register item_operations_total")
});

/// Outcome label for a service result.
pub fn outcome_of<T>(res: &Result<T, ServiceError>) -> &'static str {
    match res {
        Ok(_) => "ok",
        Err(e) if e.is_validation() => "invalid",
        Err(ServiceError::NotFound(_)) => "not_found",
        Err(ServiceError::Conflict(_)) => "conflict",
        Err(_) => "error",
    }
}

pub fn record(operation: &str, outcome: &str) {
    ITEM_OPERATIONS_TOTAL.with_label_values(&[operation, outcome]).inc();
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
