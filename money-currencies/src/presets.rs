//! Named currency presets.
//!
//! A preset is a zero-sized marker type whose default descriptor is known at
//! compile time. Presets are declared with [`define_currencies!`](crate::define_currencies)
//! and can be handed to anything that accepts a [`CurrencyRef`](crate::CurrencyRef).

use crate::currency::{Currency, CurrencyFields};
use crate::error::CurrencyError;

/// Trait implemented by every preset marker type.
pub trait CurrencyType: Default + Clone + Copy + Send + Sync + 'static {
    const CODE: &'static str;

    /// The preset's currency map.
    fn fields() -> CurrencyFields;

    /// Instantiates the preset's default descriptor.
    fn currency() -> Result<Currency, CurrencyError> {
        Currency::from_fields(Self::fields())
    }
}

/// Defines currency presets.
///
/// Each entry generates a marker type, its [`CurrencyType`] impl and a
/// `From<Marker> for CurrencyRef` impl. Fields not listed keep their defaults.
///
/// # Syntax
/// ```
/// use money_currencies::{define_currencies, CurrencyType};
///
/// define_currencies! {
///     /// Czech Crown
///     CZK => ("CZK", "Czech Crown") {
///         rate: 25.0,
///         display_decimals: 0,
///         decimal_separator: ",",
///         thousands_separator: ".",
///         suffix: " Kč",
///     },
/// }
///
/// assert_eq!(CZK::currency()?.suffix(), " Kč");
/// # Ok::<(), money_currencies::CurrencyError>(())
/// ```
#[macro_export]
macro_rules! define_currencies {
    (
        $(
            $(#[$meta:meta])*
            $name:ident => ($code:literal, $full_name:literal) {
                $( $field:ident : $value:expr ),* $(,)?
            }
        ),* $(,)?
    ) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
            pub struct $name;

            impl $crate::CurrencyType for $name {
                const CODE: &'static str = $code;

                fn fields() -> $crate::CurrencyFields {
                    $crate::CurrencyFields::new($code, $full_name)
                        $( .$field($value) )*
                }
            }

            impl From<$name> for $crate::CurrencyRef {
                fn from(_: $name) -> Self {
                    $crate::CurrencyRef::of::<$name>()
                }
            }
        )*
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// Built-in presets
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    /// United States Dollar, the registry's initial default currency.
    USD => ("USD", "United States Dollar") {
        rate: 1.0,
        prefix: "$",
        math_decimals: 2,
        display_decimals: 2,
        rounding: 2,
    },
}

impl USD {
    /// The built-in descriptor. Its code and name are literals, so it needs
    /// no validation.
    pub fn descriptor() -> Currency {
        Currency::with_defaults(Self::fields())
    }
}
