// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Cross-currency conversion through the common base unit.
//!
//! Only currency-to-base rates are stored, in whatever direction makes the
//! base currency's own rate 1.00 (USD in the default data). A conversion is
//! always `amount * rate(from) / rate(to)`: two lookups, one multiply, one
//! divide. No rounding is applied.

use crate::currencies::CurrencyStore;
use crate::error::{settle, Result};

/// Express `amount` of a currency in base units
pub fn to_base(amount: f64, rate: f64) -> f64 {
    amount * rate
}

/// Express `base_amount` base units in a currency
pub fn from_base(base_amount: f64, rate: f64) -> f64 {
    base_amount / rate
}

pub async fn try_convert_currency(
    store: &mut CurrencyStore,
    from_currency: &str,
    to_currency: &str,
    amount: f64,
) -> Result<f64> {
    let from = store.try_select(from_currency).await?;
    let to = store.try_select(to_currency).await?;

    Ok(from_base(to_base(amount, from.rate), to.rate))
}

/// Convert `amount`, or `None` if either currency is unknown
pub async fn convert_currency(
    store: &mut CurrencyStore,
    from_currency: &str,
    to_currency: &str,
    amount: f64,
) -> Option<f64> {
    settle(
        "convert",
        try_convert_currency(store, from_currency, to_currency, amount).await,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, Database};
    use crate::error::StoreError;
    use crate::seed::{default_rates, seed_store};
    use anyhow::Result;
    use approx::assert_relative_eq;

    async fn seeded_store() -> Result<(Database, CurrencyStore)> {
        let db = Database::from_pool(create_test_pool().await?);
        let mut store = db.begin().await?;
        seed_store(&mut store, &default_rates()).await;
        Ok((db, store))
    }

    #[test]
    fn test_pivot_helpers() {
        assert_eq!(to_base(50.0, 0.5), 25.0);
        assert_eq!(from_base(25.0, 0.5), 50.0);
        assert_eq!(from_base(to_base(10.0, 1.45), 0.88), 10.0 * 1.45 / 0.88);
    }

    #[tokio::test]
    async fn test_exchange_currency() -> Result<()> {
        let (_db, mut store) = seeded_store().await?;
        assert!(store.add("ABC", 1.45).await);
        assert!(store.add("DEF", 0.88).await);

        let amount = 10.00;
        let expected = amount * 1.45 / 0.88;
        let converted = convert_currency(&mut store, "abc", "DEF", amount).await;
        assert_eq!(converted, Some(expected));
        Ok(())
    }

    #[tokio::test]
    async fn test_gbp_to_eur() -> Result<()> {
        let (_db, mut store) = seeded_store().await?;

        let converted = convert_currency(&mut store, "GBP", "EUR", 50.00)
            .await
            .expect("both currencies exist");
        assert_eq!(converted, 50.00 * 0.90 / 1.02);
        assert_relative_eq!(converted, 44.1176, epsilon = 0.0001);
        Ok(())
    }

    #[tokio::test]
    async fn test_same_currency_round_trips_through_base() -> Result<()> {
        let (_db, mut store) = seeded_store().await?;

        let converted = convert_currency(&mut store, "JPY", "jpy", 1000.0).await;
        assert_eq!(converted, Some(1000.0 * 142.79 / 142.79));
        Ok(())
    }

    #[tokio::test]
    async fn test_rate_change_is_reflected() -> Result<()> {
        let (_db, mut store) = seeded_store().await?;

        let before = convert_currency(&mut store, "GBP", "JPY", 50.00).await.unwrap();
        assert!(store.update_rate("GBP", 3.50).await);
        let after = convert_currency(&mut store, "GBP", "JPY", 50.00).await.unwrap();

        assert_ne!(before, after);
        assert_eq!(after, 50.00 * 3.50 / 142.79);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_currency_is_absent() -> Result<()> {
        let (_db, mut store) = seeded_store().await?;

        assert!(convert_currency(&mut store, "ZZZ", "USD", 1.0).await.is_none());
        assert!(convert_currency(&mut store, "USD", "ZZZ", 1.0).await.is_none());
        assert!(convert_currency(&mut store, "AB", "ZZZ", 1.0).await.is_none());
        assert!(matches!(
            try_convert_currency(&mut store, "USD", "ZZZ", 1.0).await,
            Err(StoreError::NotFound { code }) if code == "ZZZ"
        ));
        Ok(())
    }
}
