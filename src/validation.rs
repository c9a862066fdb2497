// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Pure input checks for currency codes and rates.
//!
//! A code is valid when it is exactly three characters long. There is no
//! character-class rule: digits and symbols pass as long as the length
//! matches.

/// True iff `code` is exactly three characters long
pub fn is_valid_code(code: &str) -> bool {
    code.chars().count() == 3
}

/// True iff `rate` is strictly positive. NaN fails.
pub fn is_valid_rate(rate: f64) -> bool {
    rate > 0.0
}

/// Uppercase form under which codes are stored and compared
pub fn canonical_code(code: &str) -> String {
    code.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_length() {
        assert!(is_valid_code("USD"));
        assert!(is_valid_code("abc"));
        assert!(is_valid_code("123"));
        assert!(is_valid_code("€€€"));
        assert!(!is_valid_code(""));
        assert!(!is_valid_code("AB"));
        assert!(!is_valid_code("ABCD"));
    }

    #[test]
    fn test_rate_is_strictly_positive() {
        assert!(is_valid_rate(0.0001));
        assert!(is_valid_rate(142.79));
        assert!(!is_valid_rate(0.0));
        assert!(!is_valid_rate(-0.001));
        assert!(!is_valid_rate(-1.0));
        assert!(!is_valid_rate(f64::NAN));
    }

    #[test]
    fn test_canonical_code() {
        assert_eq!(canonical_code("aBc"), "ABC");
        assert_eq!(canonical_code("USD"), "USD");
    }
}
