//! In-crate tests for fintrack.
//!
//! ## Test Modules
//!
//! - **types_tests**: item validation rules
//! - **service_tests**: use cases over an in-memory repository
//! - **store_tests**: SQLite adapter (PostgreSQL when `TEST_DATABASE_URL` is set)
//! - **db_tests**: schema initialization and connection bootstrap
//! - **api_tests**: item and analytics endpoints end to end
//! - **health_api_tests**: liveness, readiness, metrics and version endpoints
//! - **error_tests**: error to HTTP response mapping
//! - **config_tests**: configuration loading and validation
//!
//! Shared fixtures live in this file.

pub mod service_tests;
pub mod types_tests;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tempfile::TempDir;

use crate::config::AppConfig;
use crate::service::Items;
use crate::state::AppState;
use crate::store::{summarize, ItemRepository, SqliteItemRepository, StoreError};
use crate::types::{Analytics, Item, NewItem};

/// Fresh SQLite database with the schema applied. Keep the `TempDir` alive
/// for as long as the pool is used.
pub async fn setup_test_db() -> (SqlitePool, TempDir) {
    let dir = TempDir::new().unwrap();
    let db_url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
    let pool = SqlitePoolOptions::new().max_connections(1).connect(&db_url).await.unwrap();
    crate::db::init_sqlite(&pool).await.unwrap();
    (pool, dir)
}

/// Full application state over a throwaway SQLite store.
pub async fn setup_test_state() -> (AppState, TempDir) {
    let (pool, dir) = setup_test_db().await;
    let store: Arc<dyn ItemRepository> = Arc::new(SqliteItemRepository::new(pool));
    let items = Arc::new(Items::new(store.clone()));
    (AppState::new(items, store, AppConfig::default()), dir)
}

/// Vec-backed repository with the same contract as the SQL adapters.
#[derive(Default)]
pub struct InMemoryRepository {
    rows: Mutex<Vec<Item>>,
    next_id: AtomicUsize,
    pub calls: AtomicUsize,
}

impl InMemoryRepository {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ItemRepository for InMemoryRepository {
    async fn create(&self, item: &NewItem) -> Result<Item, StoreError> {
        self.touch();
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        let stored = item.clone().with_id(id);
        self.rows.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn get_by_id(&self, id: i64) -> Result<Item, StoreError> {
        self.touch();
        let rows = self.rows.lock().unwrap();
        rows.iter().find(|i| i.id == id).cloned().ok_or(StoreError::NotFound)
    }

    async fn get_all(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<Item>, StoreError> {
        self.touch();
        let rows = self.rows.lock().unwrap();
        let mut out: Vec<Item> = rows
            .iter()
            .filter(|i| from.map_or(true, |f| i.date >= f) && to.map_or(true, |t| i.date <= t))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(out)
    }

    async fn update(&self, item: &Item) -> Result<Item, StoreError> {
        self.touch();
        let mut rows = self.rows.lock().unwrap();
        let row = rows.iter_mut().find(|i| i.id == item.id).ok_or(StoreError::NotFound)?;
        row.kind = item.kind;
        row.amount = item.amount;
        row.category = item.category.clone();
        row.date = item.date;
        row.updated_at = item.updated_at;
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        self.touch();
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|i| i.id != id);
        if rows.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn get_analytics(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Analytics, StoreError> {
        self.touch();
        let rows = self.rows.lock().unwrap();
        let mut amounts: Vec<f64> =
            rows.iter().filter(|i| i.date >= from && i.date <= to).map(|i| i.amount).collect();
        amounts.sort_by(|a, b| a.total_cmp(b));
        Ok(summarize(&amounts))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
