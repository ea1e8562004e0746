// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Expense Field Policy
//!
//! Business rules applied to expense fields before they reach the store:
//!
//! - descriptions are normalized (Unicode NFC, trimmed, inner whitespace
//!   collapsed to single spaces), then checked for length and, under the
//!   strict policy, for an allow-listed character set
//! - amounts must be strictly positive and no larger than the configured
//!   ceiling

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::error::StoreError;

/// Default upper bound for a single expense amount.
pub const DEFAULT_AMOUNT_CEILING: i64 = 100_000_000;

/// Maximum description length in characters, after normalization.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// Latin letters, the Arabic-script block (Persian letters, digits and the
/// Arabic comma), ASCII digits, whitespace and `- . , ! ( )`.
static DESCRIPTION_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\x{0600}-\x{06FF}A-Za-z0-9\s\-.,!()]+$").expect("description pattern is valid")
});

/// Limits applied to expense fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpensePolicy {
    /// Largest accepted amount (inclusive).
    pub amount_ceiling: i64,
    /// Longest accepted description, in characters.
    pub max_description_chars: usize,
    /// Reject descriptions containing characters outside the allow-list.
    pub strict_charset: bool,
}

impl Default for ExpensePolicy {
    fn default() -> Self {
        Self {
            amount_ceiling: DEFAULT_AMOUNT_CEILING,
            max_description_chars: MAX_DESCRIPTION_CHARS,
            strict_charset: true,
        }
    }
}

impl ExpensePolicy {
    /// Normalizes `raw` and checks it against the description rules.
    /// Returns the normalized text on success.
    pub fn description(&self, raw: &str) -> Result<String, StoreError> {
        let description = normalize_description(raw);

        if description.is_empty() {
            return Err(StoreError::validation("description must not be empty"));
        }

        let chars = description.chars().count();
        if chars > self.max_description_chars {
            return Err(StoreError::validation(format!(
                "description must be at most {} characters (got {chars})",
                self.max_description_chars
            )));
        }

        if self.strict_charset && !DESCRIPTION_CHARSET.is_match(&description) {
            return Err(StoreError::validation(
                "description may only contain letters, digits, spaces and - . , ! ( ) ،",
            ));
        }

        Ok(description)
    }

    pub fn amount(&self, amount: i64) -> Result<i64, StoreError> {
        if amount <= 0 {
            return Err(StoreError::validation("amount must be greater than zero"));
        }
        if amount > self.amount_ceiling {
            return Err(StoreError::validation(format!(
                "amount must not exceed {}",
                self.amount_ceiling
            )));
        }
        Ok(amount)
    }
}

/// Canonical form of a description: NFC, trimmed, whitespace runs collapsed
/// to a single space. Idempotent.
pub fn normalize_description(raw: &str) -> String {
    let composed: String = raw.nfc().collect();
    composed.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_collapses_whitespace() {
        assert_eq!(normalize_description("  Groceries \t  list\n"), "Groceries list");
        assert_eq!(normalize_description("   "), "");
        assert_eq!(normalize_description("خرید   مواد  غذایی"), "خرید مواد غذایی");
    }

    #[test]
    fn normalize_composes_unicode() {
        // "e" followed by a combining acute accent becomes a single code point.
        assert_eq!(normalize_description("cafe\u{0301}"), "caf\u{00e9}");
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = [
            "",
            "  a  ",
            "Groceries\u{00a0}\u{00a0}list",
            "\tپرداخت   قبض\nبرق ",
            "x \u{0301} y",
            "already normal",
        ];
        for sample in samples {
            let once = normalize_description(sample);
            assert_eq!(normalize_description(&once), once, "sample {sample:?}");
        }
    }

    #[test]
    fn description_rejects_empty_after_normalization() {
        let policy = ExpensePolicy::default();
        assert!(matches!(
            policy.description(" \t\n "),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn description_length_is_counted_in_characters() {
        let policy = ExpensePolicy::default();
        let persian = "ب".repeat(MAX_DESCRIPTION_CHARS);
        assert_eq!(policy.description(&persian).unwrap(), persian);

        let too_long = "a".repeat(MAX_DESCRIPTION_CHARS + 1);
        assert!(policy.description(&too_long).is_err());
    }

    #[test]
    fn description_charset_is_enforced_only_when_strict() {
        let strict = ExpensePolicy::default();
        assert_eq!(
            strict.description("Fuel (car), 2 tanks!").unwrap(),
            "Fuel (car), 2 tanks!"
        );
        assert!(strict.description("هزینه اینترنت، ماهانه").is_ok());
        assert!(strict.description("coffee @ work").is_err());
        assert!(strict.description("50% off").is_err());

        let lenient = ExpensePolicy {
            strict_charset: false,
            ..ExpensePolicy::default()
        };
        assert_eq!(lenient.description("coffee @ work").unwrap(), "coffee @ work");
    }

    #[test]
    fn amount_bounds() {
        let policy = ExpensePolicy {
            amount_ceiling: 1_000,
            ..ExpensePolicy::default()
        };
        assert_eq!(policy.amount(1).unwrap(), 1);
        assert_eq!(policy.amount(1_000).unwrap(), 1_000);
        assert!(policy.amount(0).is_err());
        assert!(policy.amount(-5).is_err());
        assert!(policy.amount(1_001).is_err());
    }
}
