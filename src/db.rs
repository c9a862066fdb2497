// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::config::Config;
use crate::currencies::CurrencyStore;
use crate::seed;
use anyhow::{Context, Result};
use sqlx::{
    migrate::MigrateDatabase,
    sqlite::{SqlitePool, SqlitePoolOptions},
    Sqlite,
};
use tracing::{debug, info};

pub async fn create_db_pool(db_url: &str, max_connections: u32) -> Result<SqlitePool> {
    // Create database if it doesn't exist
    if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        Sqlite::create_database(db_url)
            .await
            .with_context(|| format!("Failed to create database {}", db_url))?;
    }

    // Connect to the database
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect(db_url)
        .await
        .with_context(|| format!("Failed to connect to {}", db_url))?;

    // Run migrations
    migrate(&pool).await?;

    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!()
        .run(pool)
        .await
        .context("Failed to run migrations")?;
    Ok(())
}

/// Owner of the connection pool. Each unit of work is a [`CurrencyStore`]
/// obtained from [`Database::begin`].
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect, migrate and, if `seed_file` is configured and the table is
    /// empty, load the seed rows in one committed transaction.
    pub async fn open(config: &Config) -> Result<Self> {
        let pool = create_db_pool(&config.database_url, config.max_connections).await?;
        let db = Self::from_pool(pool);
        info!(url = %config.database_url, "database opened");

        if let Some(path) = &config.seed_file {
            let mut store = db.begin().await?;
            if store.try_list().await?.is_empty() {
                let rows = seed::read_seed_file(path)?;
                let report = seed::seed_store(&mut store, &rows).await;
                info!(
                    path = %path.display(),
                    added = report.added,
                    rejected = report.rejected,
                    "seeded currency table"
                );
                store.commit().await?;
            } else {
                debug!("currency table already populated, skipping seed");
                store.rollback().await?;
            }
        }

        Ok(db)
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Start a unit of work. Nothing is persisted until the returned store
    /// is committed; dropping it rolls back.
    pub async fn begin(&self) -> Result<CurrencyStore> {
        let tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;
        Ok(CurrencyStore::new(tx))
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
pub async fn create_test_pool() -> Result<SqlitePool> {
    create_db_pool("sqlite::memory:", 1).await
}
