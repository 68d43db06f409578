use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::{DynMenuService, ItemRepository, MenuService};

use crate::observability;

pub mod items;

/// Shared handler state; cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub menu: Arc<DynMenuService>,
}

impl AppState {
    pub fn new(repo: Arc<dyn ItemRepository>) -> Self {
        Self { menu: Arc::new(MenuService::new(repo)) }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn metrics() -> (axum::http::StatusCode, String) {
    observability::encode_metrics()
}

/// Build the full application router: item API plus health and metrics.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let items = Router::new()
        .route("/items", get(items::list_items).post(items::create_item))
        .route("/items/:id", get(items::get_item).put(items::update_item));

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .merge(items)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
