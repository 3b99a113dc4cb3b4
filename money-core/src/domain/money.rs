//! Fixed-point monetary value with an embedded currency snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;

use money_currencies::{Currency, CurrencyFields, CurrencyRef};

use super::math::{percent_multiplier, pow10, round_to_minor, round_to_power_of_ten, to_minor_units};
use crate::error::MoneyError;
use crate::formatter::PriceFormatter;
use crate::manager::CurrencyManager;

/// Money stored as an integer amount of the currency's smallest math unit.
///
/// `value` is `decimal * 10^math_decimals`. Every operation returns a new
/// instance and rounds to a whole minor unit immediately, so chained
/// operations accumulate rounding exactly like integer cent arithmetic.
///
/// The currency is an owned snapshot taken at creation. Operations that need
/// the default currency (conversion, cross-currency comparison) take the
/// registry as an explicit argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "MoneyFields")]
pub struct Money {
    value: i64,
    currency: Currency,
}

/// Key-value form of [`Money`]: the minor-unit value and the currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyFields {
    pub value: i64,
    pub currency: String,
}

impl From<Money> for MoneyFields {
    fn from(money: Money) -> Self {
        money.to_map()
    }
}

impl Money {
    pub fn new(value: i64, currency: Currency) -> Self {
        Self { value, currency }
    }

    /// Creates money from a decimal amount, rounding to the currency's math
    /// precision.
    pub fn from_decimal(decimal: f64, currency: Currency) -> Self {
        let value = to_minor_units(decimal, currency.math_decimals());
        Self::new(value, currency)
    }

    /// Parses a string produced by [`Money::formatted`] or
    /// [`Money::raw_formatted`].
    ///
    /// Without an explicit currency, the currency is picked out of the
    /// registry by prefix and suffix. `overrides` must be the ones used when
    /// formatting.
    pub fn from_formatted(
        currencies: &CurrencyManager,
        formatted: &str,
        currency: Option<CurrencyRef>,
        overrides: &CurrencyFields,
    ) -> Result<Self, MoneyError> {
        let currency = match currency {
            Some(currency) => currencies.currency(currency)?,
            None => PriceFormatter::extract_currency(currencies, formatted)?.clone(),
        };

        let decimal = PriceFormatter::resolve(formatted, &currency, overrides)?;
        Ok(Self::from_decimal(decimal, currency))
    }

    /// Rebuilds money from its key-value form, looking the currency up by code.
    pub fn from_map(currencies: &CurrencyManager, map: MoneyFields) -> Result<Self, MoneyError> {
        Ok(Self::new(map.value, currencies.currency(map.currency)?))
    }

    pub fn from_json(currencies: &CurrencyManager, json: &str) -> Result<Self, MoneyError> {
        Self::from_map(currencies, serde_json::from_str(json)?)
    }

    pub fn to_map(&self) -> MoneyFields {
        MoneyFields {
            value: self.value,
            currency: self.currency.code().to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String, MoneyError> {
        Ok(serde_json::to_string(&self.to_map())?)
    }

    /// Amount in minor units.
    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Amount in major units.
    pub fn decimal(&self) -> f64 {
        self.value as f64 / pow10(math_decimals(&self.currency))
    }

    fn with_value(&self, value: i64) -> Self {
        Self::new(value, self.currency.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Arithmetic
    // ─────────────────────────────────────────────────────────────────────────────

    /// Adds minor units.
    pub fn add(&self, value: i64) -> Self {
        self.with_value(self.value.saturating_add(value))
    }

    /// Subtracts minor units.
    pub fn subtract(&self, value: i64) -> Self {
        self.with_value(self.value.saturating_sub(value))
    }

    /// Adds another amount, converted to this currency first.
    ///
    /// The conversion always pivots through the default currency, even when
    /// both amounts share a currency, so a rate other than 1 rounds the
    /// added amount.
    pub fn add_money(&self, currencies: &CurrencyManager, other: &Money) -> Result<Self, MoneyError> {
        let other = other.convert_to(currencies, &self.currency)?;
        Ok(self.add(other.value))
    }

    /// Subtracts another amount, converted to this currency first.
    pub fn subtract_money(
        &self,
        currencies: &CurrencyManager,
        other: &Money,
    ) -> Result<Self, MoneyError> {
        let other = other.convert_to(currencies, &self.currency)?;
        Ok(self.subtract(other.value))
    }

    /// Adds a decimal amount expressed in this currency, through
    /// [`Money::add_money`].
    pub fn add_decimal(&self, currencies: &CurrencyManager, decimal: f64) -> Result<Self, MoneyError> {
        self.add_money(currencies, &Self::from_decimal(decimal, self.currency.clone()))
    }

    /// Subtracts a decimal amount expressed in this currency, through
    /// [`Money::subtract_money`].
    pub fn subtract_decimal(
        &self,
        currencies: &CurrencyManager,
        decimal: f64,
    ) -> Result<Self, MoneyError> {
        self.subtract_money(currencies, &Self::from_decimal(decimal, self.currency.clone()))
    }

    pub fn multiply_by(&self, coefficient: f64) -> Self {
        self.with_value(round_to_minor(self.value as f64 * coefficient))
    }

    /// Alias of [`Money::multiply_by`].
    pub fn times(&self, coefficient: f64) -> Self {
        self.multiply_by(coefficient)
    }

    /// Divides the amount. A divisor of zero is treated as one.
    pub fn divide_by(&self, number: f64) -> Self {
        let number = if number == 0.0 { 1.0 } else { number };
        self.with_value(round_to_minor(self.value as f64 / number))
    }

    /// Adds a percentage fee.
    ///
    /// The multiplier `1 + rate/100` is rounded to the currency's math
    /// precision before it is applied.
    pub fn add_fee(&self, rate: f64) -> Self {
        self.multiply_by(self.fee_multiplier(rate))
    }

    /// Alias of [`Money::add_fee`].
    pub fn add_tax(&self, rate: f64) -> Self {
        self.add_fee(rate)
    }

    /// Removes a percentage fee by dividing by the same rounded multiplier
    /// [`Money::add_fee`] uses. Not an exact inverse once rounding kicks in.
    pub fn subtract_fee(&self, rate: f64) -> Self {
        self.divide_by(self.fee_multiplier(rate))
    }

    /// Alias of [`Money::subtract_fee`].
    pub fn subtract_tax(&self, rate: f64) -> Self {
        self.subtract_fee(rate)
    }

    fn fee_multiplier(&self, rate: f64) -> f64 {
        percent_multiplier(rate, self.currency.math_decimals())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Value expressed in minor units of the registry's default currency.
    pub fn value_in_default_currency(&self, currencies: &CurrencyManager) -> Result<i64, MoneyError> {
        Ok(self.value_in_default(currencies.get_default()?))
    }

    // Divides by the rate, then normalizes the minor-unit scale; each step
    // rounds to a whole unit.
    fn value_in_default(&self, default: &Currency) -> i64 {
        let scale = math_decimals(&self.currency) - math_decimals(default);
        self.divide_by(self.currency.rate())
            .divide_by(pow10(scale))
            .value
    }

    /// Converts to another currency, always pivoting through the default
    /// currency.
    pub fn convert_to(
        &self,
        currencies: &CurrencyManager,
        currency: impl Into<CurrencyRef>,
    ) -> Result<Self, MoneyError> {
        let target = currencies.currency(currency)?;
        let default = currencies.get_default()?;

        let base = self.value_in_default(default);
        let scale = math_decimals(&target) - math_decimals(default);
        let value = round_to_minor(base as f64 * target.rate() * pow10(scale));

        tracing::trace!(
            from = self.currency.code(),
            to = target.code(),
            pivot = default.code(),
            value = self.value,
            converted = value,
            "converted money"
        );
        Ok(Self::new(value, target))
    }

    /// Converts to the registry's current currency.
    pub fn to_current(&self, currencies: &CurrencyManager) -> Result<Self, MoneyError> {
        self.convert_to(currencies, currencies.get_current()?)
    }

    /// Converts to the registry's default currency.
    pub fn to_default(&self, currencies: &CurrencyManager) -> Result<Self, MoneyError> {
        self.convert_to(currencies, currencies.get_default()?)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Rounding
    // ─────────────────────────────────────────────────────────────────────────────

    /// Rounds to the currency's configured rounding.
    pub fn rounded(&self) -> Self {
        self.rounded_to(self.currency.rounding())
    }

    /// Rounds to the nearest `10^precision` minor units.
    pub fn rounded_to(&self, precision: i32) -> Self {
        self.with_value(round_to_power_of_ten(self.value, precision))
    }

    /// Distance from the rounded value: `rounded().value() - value()`.
    pub fn rounding(&self) -> i64 {
        self.rounded().value.saturating_sub(self.value)
    }

    /// Fractional part of the decimal amount, as money in the same currency.
    pub fn cents(&self) -> Self {
        let decimal = self.decimal();
        Self::from_decimal(decimal - decimal.floor(), self.currency.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Comparison
    // ─────────────────────────────────────────────────────────────────────────────

    /// Value equality across currencies, compared in the default currency.
    pub fn equals(&self, currencies: &CurrencyManager, other: &Money) -> Result<bool, MoneyError> {
        let default = currencies.get_default()?;
        Ok(self.value_in_default(default) == other.value_in_default(default))
    }

    /// Same currency code and [`Money::equals`].
    pub fn is(&self, currencies: &CurrencyManager, other: &Money) -> Result<bool, MoneyError> {
        Ok(self.currency.code() == other.currency.code() && self.equals(currencies, other)?)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Formatting
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn formatted(&self) -> String {
        self.formatted_with(&CurrencyFields::default())
    }

    pub fn formatted_with(&self, overrides: &CurrencyFields) -> String {
        PriceFormatter::format(self.decimal(), &self.currency, overrides)
    }

    /// Formats with every math decimal shown, i.e. without display rounding.
    pub fn raw_formatted(&self) -> String {
        self.raw_formatted_with(&CurrencyFields::default())
    }

    pub fn raw_formatted_with(&self, overrides: &CurrencyFields) -> String {
        let overrides = overrides
            .clone()
            .display_decimals(self.currency.math_decimals());
        self.formatted_with(&overrides)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

fn math_decimals(currency: &Currency) -> i32 {
    i32::try_from(currency.math_decimals()).unwrap_or(i32::MAX)
}
