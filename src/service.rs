//! Use cases over items: validation and timestamping in front of the store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::store::{ItemRepository, StoreError};
use crate::types::{Analytics, Item, ItemPayload, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[async_trait]
pub trait ItemService: Send + Sync {
    async fn create_item(&self, payload: ItemPayload) -> ServiceResult<Item>;

    async fn get_item(&self, id: i64) -> ServiceResult<Item>;

    async fn get_items(&self, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> ServiceResult<Vec<Item>>;

    async fn update_item(&self, id: i64, payload: ItemPayload) -> ServiceResult<Item>;

    async fn delete_item(&self, id: i64) -> ServiceResult<()>;

    async fn get_analytics(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> ServiceResult<Analytics>;
}

/// Default [`ItemService`] over any [`ItemRepository`].
#[derive(Clone)]
pub struct Items {
    repo: Arc<dyn ItemRepository>,
}

impl Items {
    pub fn new(repo: Arc<dyn ItemRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ItemService for Items {
    async fn create_item(&self, payload: ItemPayload) -> ServiceResult<Item> {
        let draft = payload.into_draft()?;
        let item = draft.into_new_item(Utc::now());
        let stored = self.repo.create(&item).await?;
        tracing::debug!(id = stored.id, kind = %stored.kind, "item created");
        Ok(stored)
    }

    async fn get_item(&self, id: i64) -> ServiceResult<Item> {
        Ok(self.repo.get_by_id(id).await?)
    }

    async fn get_items(&self, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> ServiceResult<Vec<Item>> {
        Ok(self.repo.get_all(from, to).await?)
    }

    async fn update_item(&self, id: i64, payload: ItemPayload) -> ServiceResult<Item> {
        let draft = payload.into_draft()?;
        let now = Utc::now();
        // created_at is not written by the store; the returned row carries the real one.
        let item = Item {
            id,
            kind: draft.kind,
            amount: draft.amount,
            category: draft.category,
            date: draft.date,
            created_at: now,
            updated_at: now,
        };
        let stored = self.repo.update(&item).await?;
        tracing::debug!(id, "item updated");
        Ok(stored)
    }

    async fn delete_item(&self, id: i64) -> ServiceResult<()> {
        self.repo.delete(id).await?;
        tracing::debug!(id, "item deleted");
        Ok(())
    }

    async fn get_analytics(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> ServiceResult<Analytics> {
        Ok(self.repo.get_analytics(from, to).await?)
    }
}
