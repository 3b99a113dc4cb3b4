//! Tagged currency reference accepted by registry operations.

use crate::currency::{Currency, CurrencyFields};
use crate::error::CurrencyError;
use crate::presets::CurrencyType;

/// Function instantiating a preset's default descriptor.
pub type CurrencyFactory = fn() -> Result<Currency, CurrencyError>;

/// Any of the forms a caller may use to point at a currency.
#[derive(Debug, Clone)]
pub enum CurrencyRef {
    /// A currency code, e.g. `"CZK"`.
    Code(String),
    /// A concrete descriptor.
    Instance(Currency),
    /// A preset, instantiated with its defaults on demand.
    DefaultOf(CurrencyFactory),
    /// An anonymous currency map. Always a single currency.
    Fields(CurrencyFields),
}

impl CurrencyRef {
    /// Reference to the preset `T`.
    pub fn of<T: CurrencyType>() -> Self {
        CurrencyRef::DefaultOf(T::currency)
    }

    /// Builds the descriptor carried by this reference.
    ///
    /// Returns `None` for [`CurrencyRef::Code`], which only names a currency.
    pub fn instantiate(&self) -> Option<Result<Currency, CurrencyError>> {
        match self {
            CurrencyRef::Code(_) => None,
            CurrencyRef::Instance(currency) => Some(Ok(currency.clone())),
            CurrencyRef::DefaultOf(factory) => Some(factory()),
            CurrencyRef::Fields(fields) => Some(Currency::from_fields(fields.clone())),
        }
    }
}

impl From<&str> for CurrencyRef {
    fn from(code: &str) -> Self {
        CurrencyRef::Code(code.to_string())
    }
}

impl From<String> for CurrencyRef {
    fn from(code: String) -> Self {
        CurrencyRef::Code(code)
    }
}

impl From<&String> for CurrencyRef {
    fn from(code: &String) -> Self {
        CurrencyRef::Code(code.clone())
    }
}

impl From<Currency> for CurrencyRef {
    fn from(currency: Currency) -> Self {
        CurrencyRef::Instance(currency)
    }
}

impl From<&Currency> for CurrencyRef {
    fn from(currency: &Currency) -> Self {
        CurrencyRef::Instance(currency.clone())
    }
}

impl From<CurrencyFields> for CurrencyRef {
    fn from(fields: CurrencyFields) -> Self {
        CurrencyRef::Fields(fields)
    }
}
