//! Property-based tests for money operations.
//!
//! - Construction identity: minor units survive construction unchanged
//! - Allocation sum invariant: no minor unit is lost or duplicated
//! - Parse/localize round-trip
//! - Tax round-trip within one minor unit

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;

use centime_shared::Currency;

use super::tax::TaxedMoney;
use super::Money;

fn eur() -> Arc<Currency> {
    Arc::new(Currency {
        code: "EUR".to_string(),
        iso: Some(978),
        name: "Euro".to_string(),
        symbol_left: String::new(),
        symbol_right: "€".to_string(),
        decimal_place: 2,
        decimal_mark: ',',
        thousands_separator: '.',
        unit_factor: 100,
    })
}

/// Strategy to generate minor-unit amounts across typical ledger ranges.
fn minor_units() -> impl Strategy<Value = i64> {
    -1_000_000_000_000i64..1_000_000_000_000i64
}

/// Strategy to generate positive ratio lists (1 to 10 entries).
fn positive_ratios() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(1i64..1000, 1..10)
}

/// Strategy to generate tax rates (0.00% to 100.00%).
fn tax_rate() -> impl Strategy<Value = Decimal> {
    (0i64..10_000).prop_map(|basis_points| Decimal::new(basis_points, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* minor-unit amount, construction returns it unchanged.
    #[test]
    fn prop_construction_identity(minor in any::<i64>()) {
        prop_assert_eq!(Money::new(minor, eur()).amount(), minor);
    }

    /// *For any* amount and positive ratio list, the allocations sum back
    /// to the original amount exactly.
    #[test]
    fn prop_allocation_sum_invariant(
        minor in minor_units(),
        ratios in positive_ratios(),
    ) {
        let parts = Money::new(minor, eur()).allocate(&ratios).unwrap();
        prop_assert_eq!(parts.len(), ratios.len());
        let sum: i64 = parts.iter().map(Money::amount).sum();
        prop_assert_eq!(sum, minor, "allocation lost or duplicated minor units");
    }

    /// *For any* amount, the leftover units go to the earliest entries: no
    /// later entry may exceed an earlier entry with the same ratio.
    #[test]
    fn prop_allocation_positional_preference(
        minor in 0i64..1_000_000_000,
        count in 2usize..8,
    ) {
        let ratios = vec![1i64; count];
        let parts = Money::new(minor, eur()).allocate(&ratios).unwrap();
        for pair in parts.windows(2) {
            prop_assert!(pair[0].amount() >= pair[1].amount());
        }
    }

    /// *For any* amount, parsing the localized rendering restores the exact
    /// minor units.
    #[test]
    fn prop_parse_localize_round_trip(minor in minor_units()) {
        let m = Money::new(minor, eur());
        let parsed = Money::parse(&m.localize(false), eur()).unwrap();
        prop_assert_eq!(parsed.amount(), minor);
    }

    /// *For any* amount below one million major units, the grouped
    /// rendering round-trips too (beyond that the grammar's two-separator
    /// limit applies).
    #[test]
    fn prop_parse_grouped_round_trip(minor in -99_999_999i64..99_999_999) {
        let m = Money::new(minor, eur());
        let parsed = Money::parse(&m.localize(true), eur()).unwrap();
        prop_assert_eq!(parsed.amount(), minor);
    }

    /// *For any* net amount and tax rate, converting to gross and back
    /// differs by at most one minor unit from compounded rounding.
    #[test]
    fn prop_tax_round_trip(minor in 0i64..10_000_000_000, rate in tax_rate()) {
        let gross = TaxedMoney::from_net(minor, rate, eur()).amount();
        let net = TaxedMoney::net_from_gross(gross, rate, eur()).amount();
        prop_assert!(
            (net - minor).abs() <= 1,
            "net {} -> gross {} -> net {}",
            minor,
            gross,
            net
        );
    }
}
