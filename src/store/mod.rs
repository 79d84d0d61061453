//! Persistence port for items and its relational adapters.
//!
//! - `sqlite`: embedded store, percentiles interpolated in Rust
//! - `postgres`: server store, percentiles via `PERCENTILE_CONT`

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::types::{Analytics, Item, NewItem};

pub mod postgres;
pub mod sqlite;

pub use postgres::PgItemRepository;
pub use sqlite::SqliteItemRepository;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("item not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage contract for items.
///
/// Every call is a plain future: dropping it (for example when the HTTP
/// client goes away) abandons the query. Nothing here retries.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Inserts the item and returns the stored row, as the store rounded it.
    async fn create(&self, item: &NewItem) -> Result<Item, StoreError>;

    async fn get_by_id(&self, id: i64) -> Result<Item, StoreError>;

    /// Lists items newest first. Each bound is optional and inclusive.
    async fn get_all(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<Item>, StoreError>;

    /// Replaces type, amount, category, date and updated_at of the row with
    /// `item.id` and returns the stored row.
    async fn update(&self, item: &Item) -> Result<Item, StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;

    /// Aggregates amounts of items dated within `[from, to]`.
    async fn get_analytics(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Analytics, StoreError>;

    /// Round-trips the store; used by the readiness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Continuous percentile over an ascending sample.
///
/// Interpolates linearly between the order statistics around rank
/// `p * (n - 1)`, the same definition as SQL `PERCENTILE_CONT`. An empty
/// sample yields 0.
pub fn percentile_cont(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let p = p.clamp(0.0, 1.0);
    let rank = p * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Builds [`Analytics`] from an ascending sample of amounts.
pub fn summarize(sorted: &[f64]) -> Analytics {
    if sorted.is_empty() {
        return Analytics::default();
    }
    let sum: f64 = sorted.iter().sum();
    let count = sorted.len() as i64;
    Analytics {
        sum,
        avg: sum / count as f64,
        count,
        median: percentile_cont(sorted, 0.5),
        percentile_90: percentile_cont(sorted, 0.9),
    }
}
