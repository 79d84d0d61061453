use std::sync::Arc;

use sqlx::migrate::MigrateDatabase;
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{PgPool, Sqlite, SqlitePool};

use crate::config::{self, DatabaseConfig};
use crate::store::{ItemRepository, PgItemRepository, SqliteItemRepository};

/// The store handle opened once at startup.
#[derive(Clone)]
pub enum Database {
    Sqlite(SqlitePool),
    Postgres(PgPool),
}

impl Database {
    /// Opens a pool for the configured store. A `sqlite:` URL selects the
    /// embedded store, everything else is handed to PostgreSQL.
    pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<Self> {
        if let Some(url) = cfg.override_url().filter(|u| u.starts_with("sqlite:")) {
            return connect_sqlite(url, cfg.max_connections).await;
        }

        let options = cfg.pg_connect_options()?;
        tracing::info!(
            "Connecting to PostgreSQL at {}:{}/{}",
            options.get_host(),
            options.get_port(),
            options.get_database().unwrap_or_default()
        );
        let pool = PgPoolOptions::new().max_connections(cfg.max_connections).connect_with(options).await?;
        init_postgres(&pool).await?;
        Ok(Database::Postgres(pool))
    }

    pub fn repository(&self) -> Arc<dyn ItemRepository> {
        match self {
            Database::Sqlite(pool) => Arc::new(SqliteItemRepository::new(pool.clone())),
            Database::Postgres(pool) => Arc::new(PgItemRepository::new(pool.clone())),
        }
    }

    pub async fn close(&self) {
        match self {
            Database::Sqlite(pool) => pool.close().await,
            Database::Postgres(pool) => pool.close().await,
        }
    }
}

async fn connect_sqlite(url: &str, max_connections: u32) -> anyhow::Result<Database> {
    config::ensure_sqlite_parent_dir(url)?;
    if !Sqlite::database_exists(url).await.unwrap_or(false) {
        tracing::info!("Creating SQLite database at {}", url);
        Sqlite::create_database(url).await?;
    }
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                let _ = sqlx::query("PRAGMA busy_timeout=10000;").execute(&mut *conn).await;
                Ok(())
            })
        })
        .connect(url)
        .await?;
    init_sqlite(&pool).await?;
    Ok(Database::Sqlite(pool))
}

pub async fn init_sqlite(pool: &SqlitePool) -> anyhow::Result<()> {
    if let Err(e) = sqlx::query("PRAGMA journal_mode=WAL;").execute(pool).await {
        tracing::warn!("Failed to set WAL journal mode: {}", e);
    }
    if let Err(e) = sqlx::query("PRAGMA synchronous=NORMAL;").execute(pool).await {
        tracing::warn!("Failed to set synchronous mode: {}", e);
    }

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
            amount REAL NOT NULL CHECK (amount >= 0),
            category TEXT NOT NULL,
            date TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )"#,
    )
    .execute(pool)
    .await?;

    if let Err(e) = sqlx::query("CREATE INDEX IF NOT EXISTS idx_items_date ON items(date)").execute(pool).await {
        tracing::warn!("Failed to create index idx_items_date: {}", e);
    }

    Ok(())
}

pub async fn init_postgres(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS items (
            id BIGSERIAL PRIMARY KEY,
            type VARCHAR(20) NOT NULL CHECK (type IN ('income', 'expense')),
            amount NUMERIC(15, 2) NOT NULL CHECK (amount >= 0),
            category VARCHAR(100) NOT NULL,
            date TIMESTAMPTZ NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )"#,
    )
    .execute(pool)
    .await?;

    if let Err(e) = sqlx::query("CREATE INDEX IF NOT EXISTS idx_items_date ON items(date)").execute(pool).await {
        tracing::warn!("Failed to create index idx_items_date: {}", e);
    }

    tracing::info!("Migrations completed");
    Ok(())
}
