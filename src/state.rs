use std::sync::Arc;

use crate::config::AppConfig;
use crate::metrics::Metrics;
use crate::service::ItemService;
use crate::store::ItemRepository;

/// The shared application state.
///
/// Cheap to clone: every field is a shared handle. There is no per-request
/// mutable state; items live in the store only.
#[derive(Clone)]
pub struct AppState {
    /// Use cases behind the `/api` routes.
    pub items: Arc<dyn ItemService>,
    /// The store itself, probed by `/readyz`.
    pub store: Arc<dyn ItemRepository>,
    pub config: Arc<AppConfig>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(items: Arc<dyn ItemService>, store: Arc<dyn ItemRepository>, config: AppConfig) -> Self {
        Self { items, store, config: Arc::new(config), metrics: Metrics::new() }
    }
}
