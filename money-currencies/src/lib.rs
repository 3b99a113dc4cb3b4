//! Currency descriptors with macro-based preset generation.
//!
//! A [`Currency`] is an immutable descriptor: code, name, rate relative to the
//! default currency, and the rules used to do math with and display amounts.
//! Currencies can be built from a partial key-value map ([`CurrencyFields`]),
//! decoded from JSON, or declared as named presets with [`define_currencies!`].
//!
//! # Adding a preset
//! ```
//! use money_currencies::{define_currencies, CurrencyRef, CurrencyType};
//!
//! define_currencies! {
//!     EUR => ("EUR", "Euro") { rate: 0.9, math_decimals: 4, rounding: 0, suffix: " €" },
//! }
//!
//! let eur = EUR::currency()?;
//! assert_eq!(eur.math_decimals(), 4);
//!
//! // Presets can be passed anywhere a currency reference is expected.
//! let reference: CurrencyRef = EUR.into();
//! # let _ = reference;
//! # Ok::<(), money_currencies::CurrencyError>(())
//! ```

mod currency;
mod error;
mod presets;
mod reference;

pub use currency::{Currency, CurrencyFields};
pub use error::CurrencyError;
pub use presets::{CurrencyType, USD};
pub use reference::{CurrencyFactory, CurrencyRef};
