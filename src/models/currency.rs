// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::validation::{canonical_code, is_valid_code};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// A currency row as handed to callers. Detached from storage: the
/// `CurrencyID` primary key is never loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CurrencyRecord {
    #[sqlx(rename = "CurrencyCode")]
    pub code: String,
    #[sqlx(rename = "ExchangeRate")]
    pub rate: f64,
}

impl CurrencyRecord {
    pub fn new(code: impl Into<String>, rate: f64) -> Self {
        Self {
            code: code.into(),
            rate,
        }
    }
}

/// Canonical (uppercase, three character) currency code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Uppercases `raw` and accepts it only if both the input and the
    /// uppercased form are three characters long.
    pub fn parse(raw: &str) -> Option<Self> {
        if !is_valid_code(raw) {
            return None;
        }
        let canonical = canonical_code(raw);
        // Some characters expand when uppercased ("ß" -> "SS")
        if !is_valid_code(&canonical) {
            return None;
        }
        Some(Self(canonical))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for CurrencyCode {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonicalizes() {
        let code = CurrencyCode::parse("aBc").unwrap();
        assert_eq!(code.as_str(), "ABC");
        assert_eq!(code.to_string(), "ABC");
    }

    #[test]
    fn test_parse_accepts_any_three_characters() {
        assert_eq!(CurrencyCode::parse("123").unwrap().as_str(), "123");
        assert_eq!(CurrencyCode::parse("$%&").unwrap().as_str(), "$%&");
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(CurrencyCode::parse("").is_none());
        assert!(CurrencyCode::parse("AB").is_none());
        assert!(CurrencyCode::parse("ABCD").is_none());
    }

    #[test]
    fn test_parse_rejects_expanding_uppercase() {
        assert!(CurrencyCode::parse("aßc").is_none());
    }
}
