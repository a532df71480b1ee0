//! Property-based tests for money invariants
//!
//! - Formatting is pure: same amount, same string
//! - Arithmetic across currencies always fails
//! - Same-currency addition is associative and subtraction inverts it
//! - Mixed totals agree with plain addition for a single currency

use money_core::{Currency, CurrencyTable, Error, Iso4217, MixedAccumulator, Money};
use proptest::prelude::*;

/// Strategy for generating currencies with every exponent in use
fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just("CHF"),
        Just("EUR"),
        Just("USD"),
        Just("JPY"),
        Just("KWD"),
        Just("CLF"),
    ]
    .prop_map(|code| Iso4217.lookup(code).unwrap())
}

/// Strategy for generating amounts far away from i64 overflow
fn minor_units_strategy() -> impl Strategy<Value = i64> {
    -1_000_000_000_000i64..1_000_000_000_000i64
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: formatting is idempotent
    #[test]
    fn prop_format_is_idempotent(currency in currency_strategy(), minor in minor_units_strategy()) {
        let amount = Money::of(currency, minor);
        prop_assert_eq!(amount.format(), amount.format());
    }

    /// Property: formatted string always carries the full exponent precision
    #[test]
    fn prop_format_precision(currency in currency_strategy(), minor in minor_units_strategy()) {
        let formatted = Money::of(currency, minor).format();
        let fractional = formatted.split('.').nth(1).map(str::len).unwrap_or(0);
        prop_assert_eq!(fractional, usize::from(currency.exponent()));
    }

    /// Property: formatted string parses back to the same amount
    #[test]
    fn prop_format_parses_back(currency in currency_strategy(), minor in minor_units_strategy()) {
        let amount = Money::of(currency, minor);
        let parsed: rust_decimal::Decimal = amount.format().parse().unwrap();
        prop_assert_eq!(Money::from_decimal(currency, parsed).unwrap(), amount);
    }

    /// Property: arithmetic between different currencies fails
    #[test]
    fn prop_mismatch_fails(
        left in currency_strategy(),
        right in currency_strategy(),
        a in minor_units_strategy(),
        b in minor_units_strategy(),
    ) {
        prop_assume!(left != right);
        let x = Money::of(left, a);
        let y = Money::of(right, b);

        let is_mismatch = |result: Result<Money, Error>| {
            matches!(result, Err(Error::CurrencyMismatch { .. }))
        };
        prop_assert!(is_mismatch(x.add(&y)));
        prop_assert!(is_mismatch(x.subtract(&y)));
    }

    /// Property: (a + b) + c == a + (b + c)
    #[test]
    fn prop_add_is_associative(
        currency in currency_strategy(),
        a in minor_units_strategy(),
        b in minor_units_strategy(),
        c in minor_units_strategy(),
    ) {
        let (a, b, c) = (Money::of(currency, a), Money::of(currency, b), Money::of(currency, c));
        let left = a.add(&b).unwrap().add(&c).unwrap();
        let right = a.add(&b.add(&c).unwrap()).unwrap();
        prop_assert_eq!(left, right);
    }

    /// Property: a - b + b == a
    #[test]
    fn prop_subtract_inverts_add(
        currency in currency_strategy(),
        a in minor_units_strategy(),
        b in minor_units_strategy(),
    ) {
        let (a, b) = (Money::of(currency, a), Money::of(currency, b));
        prop_assert_eq!(a.subtract(&b).unwrap().add(&b).unwrap(), a);
    }

    /// Property: a single-currency mixed total equals the plain sum
    #[test]
    fn prop_mixed_matches_plain_sum(
        amounts in prop::collection::vec(minor_units_strategy(), 1..20)
    ) {
        let chf = Iso4217.lookup("CHF").unwrap();

        let mut plain = Money::of(chf, 0);
        let mut mixed = MixedAccumulator::new(0, chf);
        for minor in amounts {
            let amount = Money::of(chf, minor);
            plain = plain.add(&amount).unwrap();
            mixed = mixed.plus(&amount);
        }

        prop_assert_eq!(mixed.format(), plain.format());
    }
}
