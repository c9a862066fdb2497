// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Currency reference table with validated CRUD and cross-rate conversion,
//! stored in SQLite.
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! use currency_exchange::{convert_currency, Config, Database};
//!
//! let db = Database::open(&Config::from_env()?).await?;
//! let mut store = db.begin().await?;
//! store.add("USD", 1.00).await;
//! store.add("GBP", 0.90).await;
//! let amount = convert_currency(&mut store, "GBP", "USD", 50.0).await;
//! store.finish(amount.is_some()).await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod converter;
pub mod currencies;
pub mod db;
pub mod error;
pub mod log;
pub mod models;
pub mod seed;
pub mod validation;

pub use config::Config;
pub use converter::{convert_currency, try_convert_currency};
pub use currencies::CurrencyStore;
pub use db::Database;
pub use error::StoreError;
pub use models::{CurrencyCode, CurrencyRecord};
