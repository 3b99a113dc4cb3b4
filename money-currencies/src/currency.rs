//! Currency descriptor and its key-value representation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CurrencyError;

const DEFAULT_RATE: f64 = 1.0;
const DEFAULT_DECIMALS: u32 = 2;
const DEFAULT_DECIMAL_SEPARATOR: &str = ".";
const DEFAULT_THOUSANDS_SEPARATOR: &str = ",";

// ─────────────────────────────────────────────────────────────────────────────
// Currency
// ─────────────────────────────────────────────────────────────────────────────

/// Immutable description of a currency: identity, rate and display rules.
///
/// `rate` is relative to whichever currency the registry treats as default;
/// the default currency itself does not need a rate of 1.
///
/// Serializes to the full camelCase currency map; deserializing validates the
/// same way [`Currency::from_fields`] does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CurrencyFields")]
pub struct Currency {
    code: String,
    name: String,
    rate: f64,
    prefix: String,
    suffix: String,
    math_decimals: u32,
    display_decimals: u32,
    rounding: i32,
    decimal_separator: String,
    thousands_separator: String,
    trim_trailing_decimal_zeros: bool,
}

impl Currency {
    /// Creates a currency with default rules for everything but code and name.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Result<Self, CurrencyError> {
        CurrencyFields::new(code, name).build()
    }

    /// Creates a currency from a (possibly partial) currency map, filling
    /// missing fields with defaults.
    ///
    /// `rounding` defaults to the resolved `math_decimals`.
    pub fn from_fields(fields: CurrencyFields) -> Result<Self, CurrencyError> {
        let currency = Self::with_defaults(fields);
        currency.check()?;
        Ok(currency)
    }

    /// Fills missing fields with defaults without validating the result.
    pub(crate) fn with_defaults(fields: CurrencyFields) -> Self {
        let math_decimals = fields.math_decimals.unwrap_or(DEFAULT_DECIMALS);

        Self {
            code: fields.code.unwrap_or_default(),
            name: fields.name.unwrap_or_default(),
            rate: fields.rate.unwrap_or(DEFAULT_RATE),
            prefix: fields.prefix.unwrap_or_default(),
            suffix: fields.suffix.unwrap_or_default(),
            math_decimals,
            display_decimals: fields.display_decimals.unwrap_or(DEFAULT_DECIMALS),
            rounding: fields
                .rounding
                .unwrap_or_else(|| i32::try_from(math_decimals).unwrap_or(i32::MAX)),
            decimal_separator: fields
                .decimal_separator
                .unwrap_or_else(|| DEFAULT_DECIMAL_SEPARATOR.to_string()),
            thousands_separator: fields
                .thousands_separator
                .unwrap_or_else(|| DEFAULT_THOUSANDS_SEPARATOR.to_string()),
            trim_trailing_decimal_zeros: fields.trim_trailing_decimal_zeros.unwrap_or(false),
        }
    }

    /// Returns the complete currency map for this currency.
    pub fn to_fields(&self) -> CurrencyFields {
        CurrencyFields {
            code: Some(self.code.clone()),
            name: Some(self.name.clone()),
            rate: Some(self.rate),
            prefix: Some(self.prefix.clone()),
            suffix: Some(self.suffix.clone()),
            math_decimals: Some(self.math_decimals),
            display_decimals: Some(self.display_decimals),
            rounding: Some(self.rounding),
            decimal_separator: Some(self.decimal_separator.clone()),
            thousands_separator: Some(self.thousands_separator.clone()),
            trim_trailing_decimal_zeros: Some(self.trim_trailing_decimal_zeros),
        }
    }

    /// Returns a copy of this currency with `overrides` applied on top.
    pub fn with_overrides(&self, overrides: &CurrencyFields) -> Result<Self, CurrencyError> {
        Self::from_fields(self.to_fields().merge(overrides))
    }

    pub fn to_json(&self) -> Result<String, CurrencyError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CurrencyError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rate relative to the default currency.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Number of decimals used in money calculations.
    pub fn math_decimals(&self) -> u32 {
        self.math_decimals
    }

    /// Number of decimals shown in formatted values.
    pub fn display_decimals(&self) -> u32 {
        self.display_decimals
    }

    /// Number of minor-unit digits cleared by rounding.
    pub fn rounding(&self) -> i32 {
        self.rounding
    }

    pub fn decimal_separator(&self) -> &str {
        &self.decimal_separator
    }

    pub fn thousands_separator(&self) -> &str {
        &self.thousands_separator
    }

    pub fn trim_trailing_decimal_zeros(&self) -> bool {
        self.trim_trailing_decimal_zeros
    }

    fn check(&self) -> Result<(), CurrencyError> {
        if self.code.is_empty() || self.name.is_empty() {
            return Err(CurrencyError::InvalidCurrency(format!(
                "currency {:?} does not have a code or a name",
                self.code
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

impl TryFrom<CurrencyFields> for Currency {
    type Error = CurrencyError;

    fn try_from(fields: CurrencyFields) -> Result<Self, Self::Error> {
        Self::from_fields(fields)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Currency map
// ─────────────────────────────────────────────────────────────────────────────

/// Partial, key-value form of a [`Currency`].
///
/// Used for JSON, for anonymous currencies registered from configuration, and
/// as the override set accepted by the formatter. The setters consume and
/// return `self`, so a map doubles as a builder:
///
/// ```
/// use money_currencies::CurrencyFields;
///
/// let gbp = CurrencyFields::new("GBP", "British Pound").rate(0.8).prefix("£").build()?;
/// assert_eq!(gbp.rounding(), 2);
/// # Ok::<(), money_currencies::CurrencyError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CurrencyFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub math_decimals: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_decimals: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rounding: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal_separator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thousands_separator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trim_trailing_decimal_zeros: Option<bool>,
}

impl CurrencyFields {
    /// Starts a map with the two required fields set.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self::default().code(code).name(name)
    }

    /// Returns a map where every field set in `overrides` replaces ours.
    pub fn merge(self, overrides: &CurrencyFields) -> Self {
        let o = overrides.clone();
        Self {
            code: o.code.or(self.code),
            name: o.name.or(self.name),
            rate: o.rate.or(self.rate),
            prefix: o.prefix.or(self.prefix),
            suffix: o.suffix.or(self.suffix),
            math_decimals: o.math_decimals.or(self.math_decimals),
            display_decimals: o.display_decimals.or(self.display_decimals),
            rounding: o.rounding.or(self.rounding),
            decimal_separator: o.decimal_separator.or(self.decimal_separator),
            thousands_separator: o.thousands_separator.or(self.thousands_separator),
            trim_trailing_decimal_zeros: o
                .trim_trailing_decimal_zeros
                .or(self.trim_trailing_decimal_zeros),
        }
    }

    /// Validates the map and applies defaults.
    pub fn build(self) -> Result<Currency, CurrencyError> {
        Currency::from_fields(self)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn math_decimals(mut self, decimals: u32) -> Self {
        self.math_decimals = Some(decimals);
        self
    }

    pub fn display_decimals(mut self, decimals: u32) -> Self {
        self.display_decimals = Some(decimals);
        self
    }

    pub fn rounding(mut self, rounding: i32) -> Self {
        self.rounding = Some(rounding);
        self
    }

    pub fn decimal_separator(mut self, separator: impl Into<String>) -> Self {
        self.decimal_separator = Some(separator.into());
        self
    }

    pub fn thousands_separator(mut self, separator: impl Into<String>) -> Self {
        self.thousands_separator = Some(separator.into());
        self
    }

    pub fn trim_trailing_decimal_zeros(mut self, trim: bool) -> Self {
        self.trim_trailing_decimal_zeros = Some(trim);
        self
    }
}

impl From<Currency> for CurrencyFields {
    fn from(currency: Currency) -> Self {
        currency.to_fields()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn czk() -> Currency {
        CurrencyFields::new("CZK", "Czech Crown")
            .rate(25.0)
            .display_decimals(0)
            .decimal_separator(",")
            .thousands_separator(".")
            .suffix(" Kč")
            .build()
            .unwrap()
    }

    #[test]
    fn test_currency_without_name_is_invalid() {
        let result = CurrencyFields::default().code("CZK").rate(2.0).build();
        assert!(matches!(result, Err(CurrencyError::InvalidCurrency(_))));
    }

    #[test]
    fn test_currency_without_code_is_invalid() {
        let result = CurrencyFields::default().name("Czech Crown").rate(2.0).build();
        assert!(matches!(result, Err(CurrencyError::InvalidCurrency(_))));
    }

    #[test]
    fn test_empty_code_is_invalid() {
        let result = Currency::new("", "Nothing");
        assert!(matches!(result, Err(CurrencyError::InvalidCurrency(_))));
    }

    #[test]
    fn test_defaults_are_applied() {
        let gbp = Currency::new("GBP", "British Pound").unwrap();
        assert_eq!(gbp.rate(), 1.0);
        assert_eq!(gbp.prefix(), "");
        assert_eq!(gbp.suffix(), "");
        assert_eq!(gbp.math_decimals(), 2);
        assert_eq!(gbp.display_decimals(), 2);
        assert_eq!(gbp.rounding(), 2);
        assert_eq!(gbp.decimal_separator(), ".");
        assert_eq!(gbp.thousands_separator(), ",");
        assert!(!gbp.trim_trailing_decimal_zeros());
    }

    #[test]
    fn test_rounding_follows_math_decimals_by_default() {
        let eur = CurrencyFields::new("EUR", "Euro")
            .math_decimals(4)
            .build()
            .unwrap();
        assert_eq!(eur.rounding(), 4);

        let eur = CurrencyFields::new("EUR", "Euro")
            .math_decimals(4)
            .rounding(0)
            .build()
            .unwrap();
        assert_eq!(eur.rounding(), 0);
    }

    #[test]
    fn test_currency_serializes_to_full_map() {
        let json: serde_json::Value = serde_json::to_value(czk()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "code": "CZK",
                "name": "Czech Crown",
                "rate": 25.0,
                "prefix": "",
                "suffix": " Kč",
                "mathDecimals": 2,
                "displayDecimals": 0,
                "rounding": 2,
                "decimalSeparator": ",",
                "thousandsSeparator": ".",
                "trimTrailingDecimalZeros": false,
            })
        );
    }

    #[test]
    fn test_currency_from_json() {
        let original = CurrencyFields::new("GBP", "British Pound")
            .rate(0.8)
            .build()
            .unwrap();

        let json = original.to_json().unwrap();
        let decoded = Currency::from_json(&json).unwrap();

        assert_eq!(decoded, original);
        assert_eq!(decoded.to_fields(), original.to_fields());
    }

    #[test]
    fn test_partial_json_gets_defaults() {
        let gbp = Currency::from_json(r#"{"code": "GBP", "name": "British Pound", "rate": 0.8}"#)
            .unwrap();
        assert_eq!(gbp.rate(), 0.8);
        assert_eq!(gbp.display_decimals(), 2);
    }

    #[test]
    fn test_invalid_json_currency_is_rejected() {
        let result = Currency::from_json(r#"{"code": "GBP"}"#);
        assert!(matches!(result, Err(CurrencyError::Json(_))));
    }

    #[test]
    fn test_overrides_are_merged() {
        let overridden = czk()
            .with_overrides(&CurrencyFields::default().decimal_separator(".").prefix("~"))
            .unwrap();

        assert_eq!(overridden.code(), "CZK");
        assert_eq!(overridden.decimal_separator(), ".");
        assert_eq!(overridden.prefix(), "~");
        assert_eq!(overridden.suffix(), " Kč");
    }

    #[test]
    fn test_override_map_serializes_only_set_fields() {
        let overrides = CurrencyFields::default().display_decimals(4);
        assert_eq!(
            serde_json::to_value(&overrides).unwrap(),
            serde_json::json!({ "displayDecimals": 4 })
        );
        assert!(CurrencyFields::default().is_empty());
        assert!(!overrides.is_empty());
    }

    #[test]
    fn test_currency_display() {
        assert_eq!(czk().to_string(), "CZK");
    }
}
