//! Round-trip properties of the currency map and its JSON form.

use money_currencies::{Currency, CurrencyFields};
use proptest::prelude::*;

fn arb_currency() -> impl Strategy<Value = Currency> {
    (
        "[A-Z]{3}",
        "[A-Za-z ]{1,24}",
        0.0001f64..10_000.0,
        "[$€£]{0,2}",
        "( [a-zA-Z€]{1,3})?",
        0u32..6,
        0u32..6,
        proptest::option::of(-2i32..6),
        prop_oneof![Just("."), Just(","), Just("_")],
        prop_oneof![Just(","), Just("."), Just(" "), Just("")],
        any::<bool>(),
    )
        .prop_map(
            |(code, name, rate, prefix, suffix, math, display, rounding, dec, thou, trim)| {
                let mut fields = CurrencyFields::new(code, name)
                    .rate(rate)
                    .prefix(prefix)
                    .suffix(suffix)
                    .math_decimals(math)
                    .display_decimals(display)
                    .decimal_separator(dec)
                    .thousands_separator(thou)
                    .trim_trailing_decimal_zeros(trim);
                if let Some(rounding) = rounding {
                    fields = fields.rounding(rounding);
                }
                fields.build().unwrap()
            },
        )
}

proptest! {
    #[test]
    fn fields_round_trip(currency in arb_currency()) {
        let rebuilt = Currency::from_fields(currency.to_fields()).unwrap();
        prop_assert_eq!(rebuilt, currency);
    }

    #[test]
    fn json_round_trip(currency in arb_currency()) {
        let json = currency.to_json().unwrap();
        let decoded = Currency::from_json(&json).unwrap();
        prop_assert_eq!(decoded.to_fields(), currency.to_fields());
    }

    #[test]
    fn empty_overrides_change_nothing(currency in arb_currency()) {
        let same = currency.with_overrides(&CurrencyFields::default()).unwrap();
        prop_assert_eq!(same, currency);
    }
}
