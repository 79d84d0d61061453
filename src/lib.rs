//! # fintrack backend library
//!
//! Records income and expense items, serves CRUD over them and computes
//! date-range statistics (sum, average, count, median, 90th percentile).
//!
//! ## Architecture
//!
//! Requests flow HTTP handlers → use cases → repository → relational store:
//! - **Axum**: HTTP server and routing
//! - **SQLx**: async access to SQLite or PostgreSQL
//! - **Tokio**: async runtime, one task per request
//! - **Serde**: JSON bodies
//!
//! ## Core Components
//!
//! - [`types`]: items, analytics and the validation rule
//! - [`store`]: the repository trait and its SQLite/PostgreSQL adapters
//! - [`service`]: validation and timestamping in front of the store
//! - [`routes`]: HTTP handlers
//! - [`error`]: mapping of failures to HTTP responses
//! - [`config`], [`db`], [`state`], [`metrics`], [`middleware`]: bootstrap and plumbing

use std::path::PathBuf;

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::Router;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub mod config;
pub mod db;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;

use state::AppState;

/// The full application: API routes, static files and middleware.
pub fn app(state: AppState) -> Router {
    let static_root = PathBuf::from(&state.config.server.static_dir);
    let static_service = ServeDir::new(&static_root)
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new(static_root.join("index.html")));
    let cfg = state.config.clone();

    routes::router(state)
        .fallback_service(static_service)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(from_fn_with_state(cfg, middleware::security_headers::security_headers_middleware))
        // The browser UI may be served from another origin during development
        .layer(CorsLayer::permissive())
}
