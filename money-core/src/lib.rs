//! # Money Core
//!
//! Fixed-point money values with multi-currency conversion and
//! locale-aware formatting.
//!
//! ## Architecture
//!
//! - `domain/` - The [`Money`] value type and its rounding rules
//! - `manager` - [`CurrencyManager`], the currency registry with default and
//!   current currency state
//! - `formatter` - [`PriceFormatter`], formatting/parsing per currency rules
//! - `ports/` - Traits the host implements (current-currency persistence)
//! - `config` - Registry bootstrap from environment
//! - `error` - Error types
//!
//! Nothing here is global: the registry is an explicit value threaded through
//! every operation that needs the default or current currency.
//!
//! ```
//! use money_core::{define_currencies, CurrencyManager, Money};
//!
//! define_currencies! {
//!     CZK => ("CZK", "Czech Crown") {
//!         rate: 25.0,
//!         display_decimals: 0,
//!         decimal_separator: ",",
//!         thousands_separator: ".",
//!         suffix: " Kč",
//!     },
//! }
//!
//! let mut currencies = CurrencyManager::new();
//! currencies.add(CZK)?;
//!
//! let price = currencies.money_from_decimal(100.0, "USD")?;
//! let czk = price.convert_to(&currencies, CZK)?;
//! assert_eq!(czk.formatted(), "2.500 Kč");
//! # Ok::<(), money_core::MoneyError>(())
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod formatter;
pub mod manager;
pub mod ports;


pub use config::MoneyConfig;
pub use domain::{Money, MoneyFields};
pub use error::{ExtractionFailure, MoneyError};
pub use formatter::PriceFormatter;
pub use manager::CurrencyManager;
pub use ports::{CallbackStore, CurrentCurrencyStore, NoopStore};

// Re-export the currency descriptors so hosts only need this crate.
pub use money_currencies::{
    define_currencies, Currency, CurrencyError, CurrencyFactory, CurrencyFields, CurrencyRef,
    CurrencyType, USD,
};
