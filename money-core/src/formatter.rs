//! Price formatting and parsing per a currency's display rules.

use money_currencies::{Currency, CurrencyFields};
use rust_decimal::prelude::*;

use crate::error::{ExtractionFailure, MoneyError};
use crate::manager::CurrencyManager;

/// Formats decimal amounts and parses them back.
pub struct PriceFormatter;

/// Display rules of a currency with overrides applied.
struct FormatRules {
    prefix: String,
    suffix: String,
    display_decimals: u32,
    decimal_separator: String,
    thousands_separator: String,
    trim_trailing_decimal_zeros: bool,
}

impl FormatRules {
    fn new(currency: &Currency, overrides: &CurrencyFields) -> Self {
        let text = |value: &Option<String>, fallback: &str| {
            value.clone().unwrap_or_else(|| fallback.to_string())
        };

        Self {
            prefix: text(&overrides.prefix, currency.prefix()),
            suffix: text(&overrides.suffix, currency.suffix()),
            display_decimals: overrides
                .display_decimals
                .unwrap_or(currency.display_decimals()),
            decimal_separator: text(&overrides.decimal_separator, currency.decimal_separator()),
            thousands_separator: text(
                &overrides.thousands_separator,
                currency.thousands_separator(),
            ),
            trim_trailing_decimal_zeros: overrides
                .trim_trailing_decimal_zeros
                .unwrap_or(currency.trim_trailing_decimal_zeros()),
        }
    }
}

impl PriceFormatter {
    /// Formats `decimal` with the currency's rules, `overrides` taking
    /// precedence.
    ///
    /// Rounds half away from zero to the display decimals, groups thousands,
    /// optionally trims trailing decimal zeros, then wraps the number in the
    /// prefix and suffix.
    pub fn format(decimal: f64, currency: &Currency, overrides: &CurrencyFields) -> String {
        let rules = FormatRules::new(currency, overrides);

        let mut number = number_format(
            decimal,
            rules.display_decimals,
            &rules.decimal_separator,
            &rules.thousands_separator,
        );

        if rules.trim_trailing_decimal_zeros && rules.display_decimals > 0 {
            number = trim_decimal_zeros(&number, &rules.decimal_separator);
        }

        format!("{}{}{}", rules.prefix, number, rules.suffix)
    }

    /// Reads a decimal back out of a string formatted for `currency`.
    ///
    /// Strips the prefix and suffix, drops every character that is neither a
    /// digit nor part of the decimal separator, then parses what is left.
    pub fn resolve(
        formatted: &str,
        currency: &Currency,
        overrides: &CurrencyFields,
    ) -> Result<f64, MoneyError> {
        let rules = FormatRules::new(currency, overrides);

        let number = formatted
            .strip_prefix(rules.prefix.as_str())
            .unwrap_or(formatted);
        let number = number.strip_suffix(rules.suffix.as_str()).unwrap_or(number);

        let kept: String = number
            .chars()
            .filter(|c| c.is_ascii_digit() || rules.decimal_separator.contains(*c))
            .collect();

        let normalized = if rules.decimal_separator.is_empty() {
            kept
        } else {
            kept.replace(rules.decimal_separator.as_str(), ".")
        };

        normalized
            .parse::<f64>()
            .map_err(|_| MoneyError::Parse(formatted.to_string()))
    }

    /// Finds the single registered currency whose prefix and suffix match
    /// `formatted`.
    ///
    /// Currencies with an empty prefix and suffix match every string, so
    /// registries where several currencies share affixes need the currency
    /// passed explicitly.
    pub fn extract_currency<'a>(
        currencies: &'a CurrencyManager,
        formatted: &str,
    ) -> Result<&'a Currency, MoneyError> {
        let matches: Vec<&Currency> = currencies
            .all()
            .values()
            .filter(|c| formatted.starts_with(c.prefix()) && formatted.ends_with(c.suffix()))
            .collect();

        match matches.as_slice() {
            [currency] => Ok(*currency),
            [] => Err(MoneyError::CannotExtractCurrency {
                formatted: formatted.to_string(),
                reason: ExtractionFailure::NoMatch,
            }),
            many => Err(MoneyError::CannotExtractCurrency {
                formatted: formatted.to_string(),
                reason: ExtractionFailure::Ambiguous(
                    many.iter().map(|c| c.code().to_string()).collect(),
                ),
            }),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Number formatting
// ─────────────────────────────────────────────────────────────────────────────

fn number_format(
    decimal: f64,
    decimals: u32,
    decimal_separator: &str,
    thousands_separator: &str,
) -> String {
    let (negative, integer, fraction) = split_rounded(decimal, decimals);

    let mut number = String::new();
    if negative {
        number.push('-');
    }
    number.push_str(&group_thousands(&integer, thousands_separator));
    if decimals > 0 {
        number.push_str(decimal_separator);
        number.push_str(&fraction);
    }
    number
}

/// Rounds to `decimals` places and splits into sign, integer digits and
/// fraction digits. A value that rounds to zero is never negative.
fn split_rounded(decimal: f64, decimals: u32) -> (bool, String, String) {
    let Some(exact) = Decimal::from_f64(decimal) else {
        // Out of Decimal's range or not finite.
        let digits = format!("{:.*}", decimals as usize, decimal.abs());
        let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
        let negative = decimal.is_sign_negative() && decimal != 0.0;
        return (negative, integer.to_string(), fraction.to_string());
    };

    let mut rounded =
        exact.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimals);

    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
    (negative, integer.to_string(), fraction.to_string())
}

fn group_thousands(integer: &str, separator: &str) -> String {
    let len = integer.len();
    let mut grouped = String::with_capacity(len + len / 3 * separator.len());

    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(digit);
    }
    grouped
}

fn trim_decimal_zeros(number: &str, decimal_separator: &str) -> String {
    if decimal_separator.is_empty() || !number.contains(decimal_separator) {
        return number.to_string();
    }
    let trimmed = number.trim_end_matches('0');
    trimmed
        .strip_suffix(decimal_separator)
        .unwrap_or(trimmed)
        .to_string()
}
