// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::error::{settle, Result, StoreError};
use crate::models::{CurrencyCode, CurrencyRecord};
use crate::validation::{canonical_code, is_valid_rate};
use sqlx::{Sqlite, SqliteConnection, Transaction};
use tracing::{debug, error};

/// Insert a currency into the database
async fn insert_currency(conn: &mut SqliteConnection, code: &str, rate: f64) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO CurrencyExchange (CurrencyCode, ExchangeRate)
        VALUES (?, ?)
        "#,
    )
    .bind(code)
    .bind(rate)
    .execute(conn)
    .await?;

    Ok(())
}

/// Delete a currency from the database by its code
async fn delete_currency(conn: &mut SqliteConnection, code: &str) -> Result<()> {
    sqlx::query("DELETE FROM CurrencyExchange WHERE CurrencyCode = ?")
        .bind(code)
        .execute(conn)
        .await?;

    Ok(())
}

async fn update_currency_code(
    conn: &mut SqliteConnection,
    code: &str,
    new_code: &str,
) -> Result<()> {
    sqlx::query("UPDATE CurrencyExchange SET CurrencyCode = ? WHERE CurrencyCode = ?")
        .bind(new_code)
        .bind(code)
        .execute(conn)
        .await?;

    Ok(())
}

async fn update_currency_rate(conn: &mut SqliteConnection, code: &str, rate: f64) -> Result<()> {
    sqlx::query("UPDATE CurrencyExchange SET ExchangeRate = ? WHERE CurrencyCode = ?")
        .bind(rate)
        .bind(code)
        .execute(conn)
        .await?;

    Ok(())
}

/// Get a currency from the database by its code
async fn select_currency(
    conn: &mut SqliteConnection,
    code: &str,
) -> Result<Option<CurrencyRecord>> {
    let record = sqlx::query_as::<_, CurrencyRecord>(
        r#"
        SELECT CurrencyCode, ExchangeRate
        FROM CurrencyExchange
        WHERE CurrencyCode = ?
        "#,
    )
    .bind(code)
    .fetch_optional(conn)
    .await?;

    Ok(record)
}

/// List all currencies in the database
async fn list_currencies(conn: &mut SqliteConnection) -> Result<Vec<CurrencyRecord>> {
    let records = sqlx::query_as::<_, CurrencyRecord>(
        r#"
        SELECT CurrencyCode, ExchangeRate
        FROM CurrencyExchange
        ORDER BY CurrencyCode
        "#,
    )
    .fetch_all(conn)
    .await?;

    Ok(records)
}

async fn delete_all_currencies(conn: &mut SqliteConnection) -> Result<u64> {
    let result = sqlx::query("DELETE FROM CurrencyExchange")
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

/// Validated access to the currency table inside one transaction.
///
/// Every code argument is uppercased before it reaches SQL, so lookups are
/// case-insensitive while rows always hold the canonical form. The `try_*`
/// methods report why an operation did not happen; the plain methods keep
/// the boolean/`Option` contract and log the reason instead.
pub struct CurrencyStore {
    tx: Transaction<'static, Sqlite>,
}

impl CurrencyStore {
    pub fn new(tx: Transaction<'static, Sqlite>) -> Self {
        Self { tx }
    }

    pub async fn commit(self) -> anyhow::Result<()> {
        self.tx.commit().await?;
        Ok(())
    }

    pub async fn rollback(self) -> anyhow::Result<()> {
        self.tx.rollback().await?;
        Ok(())
    }

    /// Commit or roll back, reporting whether that succeeded
    pub async fn finish(self, commit: bool) -> bool {
        let result = if commit {
            self.commit().await
        } else {
            self.rollback().await
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                error!(commit, error = %e, "failed to close unit of work");
                false
            }
        }
    }

    fn parse_code(code: &str) -> Result<CurrencyCode> {
        CurrencyCode::parse(code).ok_or_else(|| StoreError::invalid_code(code))
    }

    async fn find(&mut self, code: &str) -> Result<Option<CurrencyRecord>> {
        select_currency(&mut self.tx, code).await
    }

    pub async fn try_exists(&mut self, code: &str) -> Result<bool> {
        Ok(self.find(&canonical_code(code)).await?.is_some())
    }

    pub async fn exists(&mut self, code: &str) -> bool {
        settle("exists", self.try_exists(code).await).unwrap_or(false)
    }

    pub async fn try_add(&mut self, code: &str, rate: f64) -> Result<CurrencyRecord> {
        let code = Self::parse_code(code)?;
        if !is_valid_rate(rate) {
            return Err(StoreError::InvalidRate { rate });
        }
        if self.find(&code).await?.is_some() {
            return Err(StoreError::already_exists(code.as_str()));
        }

        insert_currency(&mut self.tx, &code, rate).await?;
        debug!(%code, rate, "currency added");
        Ok(CurrencyRecord::new(code.as_str(), rate))
    }

    pub async fn add(&mut self, code: &str, rate: f64) -> bool {
        settle("add", self.try_add(code, rate).await).is_some()
    }

    pub async fn try_remove(&mut self, code: &str) -> Result<()> {
        let code = Self::parse_code(code)?;
        if self.find(&code).await?.is_none() {
            return Err(StoreError::not_found(code.as_str()));
        }

        delete_currency(&mut self.tx, &code).await?;
        debug!(%code, "currency removed");
        Ok(())
    }

    pub async fn remove(&mut self, code: &str) -> bool {
        settle("remove", self.try_remove(code).await).is_some()
    }

    pub async fn try_rename_code(&mut self, code: &str, new_code: &str) -> Result<()> {
        let code = Self::parse_code(code)?;
        let new_code = Self::parse_code(new_code)?;
        if self.find(&code).await?.is_none() {
            return Err(StoreError::not_found(code.as_str()));
        }
        if self.find(&new_code).await?.is_some() {
            return Err(StoreError::already_exists(new_code.as_str()));
        }

        update_currency_code(&mut self.tx, &code, &new_code).await?;
        debug!(%code, %new_code, "currency renamed");
        Ok(())
    }

    pub async fn rename_code(&mut self, code: &str, new_code: &str) -> bool {
        settle("rename_code", self.try_rename_code(code, new_code).await).is_some()
    }

    pub async fn try_update_rate(&mut self, code: &str, rate: f64) -> Result<()> {
        let code = Self::parse_code(code)?;
        if !is_valid_rate(rate) {
            return Err(StoreError::InvalidRate { rate });
        }
        if self.find(&code).await?.is_none() {
            return Err(StoreError::not_found(code.as_str()));
        }

        update_currency_rate(&mut self.tx, &code, rate).await?;
        debug!(%code, rate, "exchange rate updated");
        Ok(())
    }

    pub async fn update_rate(&mut self, code: &str, rate: f64) -> bool {
        settle("update_rate", self.try_update_rate(code, rate).await).is_some()
    }

    /// Look up a currency. Malformed codes are not rejected, they simply
    /// match nothing.
    pub async fn try_select(&mut self, code: &str) -> Result<CurrencyRecord> {
        let canonical = canonical_code(code);
        self.find(&canonical)
            .await?
            .ok_or_else(|| StoreError::not_found(canonical))
    }

    pub async fn select(&mut self, code: &str) -> Option<CurrencyRecord> {
        settle("select", self.try_select(code).await)
    }

    pub async fn try_list(&mut self) -> Result<Vec<CurrencyRecord>> {
        list_currencies(&mut self.tx).await
    }

    pub async fn list(&mut self) -> Vec<CurrencyRecord> {
        settle("list", self.try_list().await).unwrap_or_default()
    }

    /// Remove every currency. Returns the number of rows deleted.
    pub async fn try_clear(&mut self) -> Result<u64> {
        let removed = delete_all_currencies(&mut self.tx).await?;
        debug!(removed, "currency table cleared");
        Ok(removed)
    }

    pub async fn clear(&mut self) {
        settle("clear", self.try_clear().await);
    }
}
