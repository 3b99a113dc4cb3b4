//! Registry configuration loading from environment.

use std::env;

use money_currencies::CurrencyFields;
use serde::Deserialize;

use crate::error::MoneyError;

pub const DEFAULT_CURRENCY_VAR: &str = "MONEY_DEFAULT_CURRENCY";
pub const CURRENT_CURRENCY_VAR: &str = "MONEY_CURRENT_CURRENCY";
pub const CURRENCIES_VAR: &str = "MONEY_CURRENCIES";

/// Host configuration for bootstrapping a [`crate::CurrencyManager`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoneyConfig {
    /// Code of the default currency. Keeps USD when unset.
    pub default_currency: Option<String>,
    /// Code of the initial current currency.
    pub current_currency: Option<String>,
    /// Currencies registered on top of the built-in USD.
    pub currencies: Vec<CurrencyFields>,
}

/// `MONEY_CURRENCIES` holds either one currency map or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum CurrencyList {
    Many(Vec<CurrencyFields>),
    One(CurrencyFields),
}

impl MoneyConfig {
    /// Loads a `.env` file if present, then reads the environment.
    pub fn load() -> Result<Self, MoneyError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, MoneyError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration from any variable source. Blank values count as
    /// unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, MoneyError> {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let currencies = match var(CURRENCIES_VAR) {
            Some(json) => Self::parse_currencies(&json)?,
            None => Vec::new(),
        };

        Ok(Self {
            default_currency: var(DEFAULT_CURRENCY_VAR),
            current_currency: var(CURRENT_CURRENCY_VAR),
            currencies,
        })
    }

    /// Parses a JSON currency map, or a JSON array of currency maps.
    pub fn parse_currencies(json: &str) -> Result<Vec<CurrencyFields>, MoneyError> {
        let list: CurrencyList = serde_json::from_str(json).map_err(|e| {
            MoneyError::Config(format!(
                "{CURRENCIES_VAR} must be a currency map or a list of currency maps: {e}"
            ))
        })?;

        Ok(match list {
            CurrencyList::Many(currencies) => currencies,
            CurrencyList::One(currency) => vec![currency],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const CZK: &str = r#"{"code": "CZK", "name": "Czech Crown", "rate": 25, "suffix": " Kč"}"#;

    #[test]
    fn test_single_map_is_one_currency() {
        let currencies = MoneyConfig::parse_currencies(CZK).unwrap();
        assert_eq!(currencies.len(), 1);
        assert_eq!(currencies[0].code.as_deref(), Some("CZK"));
        assert_eq!(currencies[0].rate, Some(25.0));
    }

    #[test]
    fn test_list_of_maps() {
        let json = format!(r#"[{CZK}, {{"code": "EUR", "name": "Euro", "rate": 0.9}}]"#);
        let currencies = MoneyConfig::parse_currencies(&json).unwrap();
        assert_eq!(currencies.len(), 2);
        assert_eq!(currencies[1].code.as_deref(), Some("EUR"));
    }

    #[test]
    fn test_invalid_json_is_a_config_error() {
        let result = MoneyConfig::parse_currencies("not json");
        assert!(matches!(result, Err(MoneyError::Config(_))));

        let result = MoneyConfig::parse_currencies("42");
        assert!(matches!(result, Err(MoneyError::Config(_))));
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_from_lookup() {
        let config = MoneyConfig::from_lookup(lookup(&[
            (DEFAULT_CURRENCY_VAR, "CZK"),
            (CURRENT_CURRENCY_VAR, "  "),
            (CURRENCIES_VAR, CZK),
        ]))
        .unwrap();

        assert_eq!(config.default_currency.as_deref(), Some("CZK"));
        assert_eq!(config.current_currency, None);
        assert_eq!(config.currencies.len(), 1);
    }

    #[test]
    fn test_no_variables_is_default_config() {
        let config = MoneyConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, MoneyConfig::default());
    }

    #[test]
    fn test_invalid_currencies_variable_fails() {
        let result = MoneyConfig::from_lookup(lookup(&[(CURRENCIES_VAR, "{")]));
        assert!(matches!(result, Err(MoneyError::Config(_))));
    }
}
