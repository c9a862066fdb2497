// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Tagged outcome of store and conversion operations.
//!
//! The boolean/`Option` methods on [`crate::CurrencyStore`] flatten these
//! into `false`/`None`; the `try_*` methods return them as-is so callers can
//! tell rejected input apart from a failing database.

use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invalid currency code '{code}'")]
    InvalidCode { code: String },

    #[error("invalid exchange rate {rate}")]
    InvalidRate { rate: f64 },

    #[error("currency '{code}' not found")]
    NotFound { code: String },

    #[error("currency '{code}' already exists")]
    AlreadyExists { code: String },

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    pub fn invalid_code(code: impl Into<String>) -> Self {
        Self::InvalidCode { code: code.into() }
    }

    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound { code: code.into() }
    }

    pub fn already_exists(code: impl Into<String>) -> Self {
        Self::AlreadyExists { code: code.into() }
    }

    /// Input or business-rule rejection, as opposed to a storage fault
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

/// Collapse a tagged result into the two-valued view: rejections are logged
/// at debug, storage faults at error, both become `None`.
pub(crate) fn settle<T>(operation: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) if e.is_rejection() => {
            debug!(operation, error = %e, "rejected");
            None
        }
        Err(e) => {
            error!(operation, error = %e, "storage failure");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            StoreError::invalid_code("AB").to_string(),
            "invalid currency code 'AB'"
        );
        assert_eq!(
            StoreError::InvalidRate { rate: -1.0 }.to_string(),
            "invalid exchange rate -1"
        );
        assert_eq!(
            StoreError::not_found("ZZZ").to_string(),
            "currency 'ZZZ' not found"
        );
    }

    #[test]
    fn test_storage_error_is_not_rejection() {
        let err: StoreError = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, StoreError::Storage(_)));
        assert!(!err.is_rejection());
        assert!(StoreError::already_exists("USD").is_rejection());
    }

    #[test]
    fn test_settle() {
        assert_eq!(settle("add", Ok(3)), Some(3));
        assert_eq!(settle::<()>("add", Err(StoreError::not_found("ZZZ"))), None);
        assert_eq!(settle::<()>("add", Err(sqlx::Error::PoolClosed.into())), None);
    }
}
