use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::{ItemRepository, StoreError};
use crate::types::{Analytics, Item, ItemKind, NewItem};

// amount is NUMERIC in the table; read it back as float8.
const ITEM_COLUMNS: &str = "id, type, amount::float8 AS amount, category, date, created_at, updated_at";

/// PostgreSQL-backed item store.
#[derive(Clone)]
pub struct PgItemRepository {
    pool: PgPool,
}

impl PgItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn item_from_row(row: &PgRow) -> Result<Item, StoreError> {
    let kind: String = row.try_get("type")?;
    let kind = kind.parse::<ItemKind>().map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
    Ok(Item {
        id: row.try_get("id")?,
        kind,
        amount: row.try_get("amount")?,
        category: row.try_get("category")?,
        date: row.try_get("date")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn create(&self, item: &NewItem) -> Result<Item, StoreError> {
        let sql = format!(
            r#"INSERT INTO items (type, amount, category, date, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {}"#,
            ITEM_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(item.kind.as_str())
            .bind(item.amount)
            .bind(&item.category)
            .bind(item.date)
            .bind(item.created_at)
            .bind(item.updated_at)
            .fetch_one(&self.pool)
            .await?;
        item_from_row(&row)
    }

    async fn get_by_id(&self, id: i64) -> Result<Item, StoreError> {
        let sql = format!("SELECT {} FROM items WHERE id = $1", ITEM_COLUMNS);
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        match row {
            Some(row) => item_from_row(&row),
            None => Err(StoreError::NotFound),
        }
    }

    async fn get_all(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<Item>, StoreError> {
        let sql = format!(
            r#"SELECT {} FROM items
               WHERE ($1::timestamptz IS NULL OR date >= $1)
                 AND ($2::timestamptz IS NULL OR date <= $2)
               ORDER BY date DESC, id DESC"#,
            ITEM_COLUMNS
        );
        let rows = sqlx::query(&sql).bind(from).bind(to).fetch_all(&self.pool).await?;
        rows.iter().map(item_from_row).collect()
    }

    async fn update(&self, item: &Item) -> Result<Item, StoreError> {
        let sql = format!(
            r#"UPDATE items
               SET type = $1, amount = $2, category = $3, date = $4, updated_at = $5
               WHERE id = $6
               RETURNING {}"#,
            ITEM_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(item.kind.as_str())
            .bind(item.amount)
            .bind(&item.category)
            .bind(item.date)
            .bind(item.updated_at)
            .bind(item.id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => item_from_row(&row),
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1").bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn get_analytics(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Analytics, StoreError> {
        let row = sqlx::query(
            r#"SELECT
                   COALESCE(SUM(amount), 0)::float8 AS sum,
                   COALESCE(AVG(amount), 0)::float8 AS avg,
                   COUNT(*) AS count,
                   COALESCE(PERCENTILE_CONT(0.5) WITHIN GROUP (ORDER BY amount), 0)::float8 AS median,
                   COALESCE(PERCENTILE_CONT(0.9) WITHIN GROUP (ORDER BY amount), 0)::float8 AS percentile_90
               FROM items
               WHERE date >= $1 AND date <= $2"#,
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok(Analytics {
            sum: row.try_get("sum")?,
            avg: row.try_get("avg")?,
            count: row.try_get("count")?,
            median: row.try_get("median")?,
            percentile_90: row.try_get("percentile_90")?,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
