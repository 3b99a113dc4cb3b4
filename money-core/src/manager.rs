//! Currency registry.
//!
//! Holds the registered currencies, the default currency (pivot for every
//! conversion) and the current currency (the one a host session is "in").
//! The current currency is resolved lazily through the injected
//! [`CurrentCurrencyStore`] and cached until it is set or forgotten.

use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::fmt;

use money_currencies::{Currency, CurrencyRef, CurrencyType, USD};

use crate::config::MoneyConfig;
use crate::domain::Money;
use crate::error::MoneyError;
use crate::ports::{CurrentCurrencyStore, NoopStore};

/// Registry of currencies plus default/current currency state.
///
/// Not `Sync`: the current-currency cache uses a `OnceCell`. Hosts sharing a
/// registry between threads wrap it in a `Mutex`, or keep one per session.
pub struct CurrencyManager {
    currencies: BTreeMap<String, Currency>,
    default: String,
    current: OnceCell<String>,
    store: Box<dyn CurrentCurrencyStore>,
}

impl CurrencyManager {
    /// Creates a registry holding only the built-in USD, which is also the
    /// default currency.
    pub fn new() -> Self {
        Self {
            currencies: builtin_currencies(),
            default: USD::CODE.to_string(),
            current: OnceCell::new(),
            store: Box::new(NoopStore),
        }
    }

    /// Creates a registry with persistence of the current currency delegated
    /// to `store`.
    pub fn with_store(mut self, store: impl CurrentCurrencyStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    /// Builds a registry from host configuration.
    ///
    /// Configured currencies are added on top of the built-in one, then the
    /// configured default and current currencies are applied.
    pub fn from_config(config: &MoneyConfig) -> Result<Self, MoneyError> {
        let mut manager = Self::new();
        manager.add_all(config.currencies.iter().cloned())?;

        if let Some(code) = &config.default_currency {
            manager.set_default(code)?;
        }
        if let Some(code) = &config.current_currency {
            manager.set_current(code)?;
        }

        Ok(manager)
    }

    pub fn set_store(&mut self, store: impl CurrentCurrencyStore + 'static) -> &mut Self {
        self.store = Box::new(store);
        self
    }

    /// Restores the initial state: only USD registered, USD as default,
    /// current currency unresolved.
    pub fn reset(&mut self) -> &mut Self {
        tracing::debug!("resetting currency registry");
        self.currencies = builtin_currencies();
        self.default = USD::CODE.to_string();
        self.forget_current()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Registration
    // ─────────────────────────────────────────────────────────────────────────────

    /// Registers a currency, replacing any currency with the same code.
    ///
    /// A [`CurrencyRef::Code`] can only re-register a currency that is already
    /// known; every other reference form carries its own descriptor.
    pub fn add(&mut self, currency: impl Into<CurrencyRef>) -> Result<&mut Self, MoneyError> {
        let currency = match currency.into() {
            CurrencyRef::Code(code) => self.currencies.get(&code).cloned().ok_or_else(|| {
                MoneyError::invalid_currency(format!("{code} is not a valid currency"))
            })?,
            CurrencyRef::Instance(currency) => currency,
            CurrencyRef::DefaultOf(factory) => factory()?,
            CurrencyRef::Fields(fields) => Currency::from_fields(fields)?,
        };

        tracing::debug!(code = currency.code(), "registering currency");
        self.currencies.insert(currency.code().to_string(), currency);
        Ok(self)
    }

    /// Registers several currencies in order.
    ///
    /// Stops at the first invalid entry; entries added before it stay
    /// registered.
    pub fn add_all<I>(&mut self, currencies: I) -> Result<&mut Self, MoneyError>
    where
        I: IntoIterator,
        I::Item: Into<CurrencyRef>,
    {
        for currency in currencies {
            self.add(currency)?;
        }
        Ok(self)
    }

    /// Unregisters a currency. Does nothing if it is not registered.
    ///
    /// The default and current pointers are left untouched.
    pub fn remove(&mut self, currency: impl Into<CurrencyRef>) -> &mut Self {
        if let Ok(code) = self.get_code(currency) {
            if self.currencies.remove(&code).is_some() {
                tracing::debug!(code = %code, "removed currency");
            }
        }
        self
    }

    /// Unregisters every currency, including the default one.
    pub fn clear(&mut self) -> &mut Self {
        tracing::debug!(count = self.currencies.len(), "clearing currency registry");
        self.currencies.clear();
        self
    }

    /// All registered currencies keyed by code.
    pub fn all(&self) -> &BTreeMap<String, Currency> {
        &self.currencies
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Lookup
    // ─────────────────────────────────────────────────────────────────────────────

    /// Fetches a registered currency.
    pub fn get(&self, currency: impl Into<CurrencyRef>) -> Result<&Currency, MoneyError> {
        let code = self.get_code(currency)?;
        self.currencies
            .get(&code)
            .ok_or(MoneyError::CurrencyDoesNotExist(code))
    }

    /// Checks whether a currency is registered. Never fails.
    pub fn has(&self, currency: impl Into<CurrencyRef>) -> bool {
        self.get_code(currency)
            .map(|code| self.currencies.contains_key(&code))
            .unwrap_or(false)
    }

    pub fn ensure_currency_exists(&self, code: &str) -> Result<&Self, MoneyError> {
        if !self.currencies.contains_key(code) {
            return Err(MoneyError::CurrencyDoesNotExist(code.to_string()));
        }
        Ok(self)
    }

    /// Resolves any currency reference to its code.
    ///
    /// Presets and currency maps are instantiated to read their code, so an
    /// invalid preset or map fails here with `InvalidCurrency`.
    pub fn get_code(&self, currency: impl Into<CurrencyRef>) -> Result<String, MoneyError> {
        match currency.into() {
            CurrencyRef::Code(code) if code.is_empty() => Err(MoneyError::invalid_currency(
                "an empty code is not a valid currency",
            )),
            CurrencyRef::Code(code) => Ok(code),
            CurrencyRef::Instance(currency) => Ok(currency.code().to_string()),
            CurrencyRef::DefaultOf(factory) => Ok(factory()?.code().to_string()),
            CurrencyRef::Fields(fields) => Ok(Currency::from_fields(fields)?.code().to_string()),
        }
    }

    /// Resolves a reference to a descriptor.
    ///
    /// A [`CurrencyRef::Instance`] is returned as given, even if it is not
    /// registered; every other form is looked up in the registry.
    pub fn currency(&self, currency: impl Into<CurrencyRef>) -> Result<Currency, MoneyError> {
        match currency.into() {
            CurrencyRef::Instance(currency) => Ok(currency),
            reference => self.get(reference).cloned(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Default & current currency
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn default_code(&self) -> &str {
        &self.default
    }

    pub fn get_default(&self) -> Result<&Currency, MoneyError> {
        self.get(self.default.as_str())
    }

    pub fn set_default(&mut self, currency: impl Into<CurrencyRef>) -> Result<&mut Self, MoneyError> {
        let code = self.get_code(currency)?;
        self.ensure_currency_exists(&code)?;

        tracing::debug!(code = %code, "default currency changed");
        self.default = code;
        Ok(self)
    }

    /// Code of the current currency.
    ///
    /// Resolved once through the store, falling back to the default
    /// currency, then cached.
    pub fn current_code(&self) -> &str {
        self.current.get_or_init(|| match self.store.resolve() {
            Some(code) => {
                tracing::debug!(code = %code, "resolved current currency from store");
                code
            }
            None => self.default.clone(),
        })
    }

    pub fn get_current(&self) -> Result<&Currency, MoneyError> {
        let code = self.current_code();
        self.currencies
            .get(code)
            .ok_or_else(|| MoneyError::CurrencyDoesNotExist(code.to_string()))
    }

    /// Sets the current currency and hands its code to the store.
    pub fn set_current(&mut self, currency: impl Into<CurrencyRef>) -> Result<&mut Self, MoneyError> {
        let code = self.get_code(currency)?;
        self.ensure_currency_exists(&code)?;

        tracing::debug!(code = %code, "current currency changed");
        self.store.store(&code);
        self.current = OnceCell::from(code);
        Ok(self)
    }

    /// Drops the cached current currency; the next access resolves it again.
    pub fn forget_current(&mut self) -> &mut Self {
        if let Some(code) = self.current.take() {
            tracing::debug!(code = %code, "forgot current currency");
        }
        self
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Money constructors
    // ─────────────────────────────────────────────────────────────────────────────

    /// Money of `value` minor units in the given currency.
    pub fn money(&self, value: i64, currency: impl Into<CurrencyRef>) -> Result<Money, MoneyError> {
        Ok(Money::new(value, self.currency(currency)?))
    }

    /// Money of `value` minor units in the default currency.
    pub fn money_in_default(&self, value: i64) -> Result<Money, MoneyError> {
        Ok(Money::new(value, self.get_default()?.clone()))
    }

    /// Money from a decimal amount in the given currency.
    pub fn money_from_decimal(
        &self,
        decimal: f64,
        currency: impl Into<CurrencyRef>,
    ) -> Result<Money, MoneyError> {
        Ok(Money::from_decimal(decimal, self.currency(currency)?))
    }

    /// Money from a decimal amount in the current currency.
    pub fn current_money_from_decimal(&self, decimal: f64) -> Result<Money, MoneyError> {
        Ok(Money::from_decimal(decimal, self.get_current()?.clone()))
    }
}

impl Default for CurrencyManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CurrencyManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurrencyManager")
            .field("currencies", &self.currencies.keys().collect::<Vec<_>>())
            .field("default", &self.default)
            .field("current", &self.current.get())
            .finish_non_exhaustive()
    }
}

fn builtin_currencies() -> BTreeMap<String, Currency> {
    BTreeMap::from([(USD::CODE.to_string(), USD::descriptor())])
}
