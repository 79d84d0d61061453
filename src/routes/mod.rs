//! HTTP route handlers for the fintrack API.
//!
//! - `items`: CRUD over income/expense items
//! - `analytics`: aggregate statistics over a date range
//! - `health`: liveness, readiness, metrics and version
//! - `params`: shared path/query parsing

use axum::{routing::get, Router};

use crate::state::AppState;

pub mod analytics;
pub mod health;
pub mod items;
pub mod params;

/// All API and operational routes, without static files or middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/metrics", get(health::metrics))
        .route("/metrics/prometheus", get(health::metrics_prometheus))
        .route("/version", get(health::version))
        .route("/api/items", get(items::list_items).post(items::create_item))
        .route(
            "/api/items/{id}",
            get(items::get_item).put(items::update_item).delete(items::delete_item),
        )
        .route("/api/analytics", get(analytics::get_analytics))
        .with_state(state)
}
