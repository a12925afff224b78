//! Tolerant money-string parsing.
//!
//! A fixed, locale-agnostic grammar, not locale detection: an optional sign,
//! up to three digit groups split by `.` or `,`, and a trailing group of at
//! most two digits read as the decimal pair. Any mix of `.` and `,` is
//! accepted as group separators, so `"1.000,11"`, `"1,000.11"` and
//! `"1.000.11"` all decode to the same minor units. A trailing group of
//! three or more digits after a single separator is a thousands group, not
//! decimals (`"123.456"` is 123456 whole units); after two separators it
//! does not parse at all.

use std::sync::Arc;

use centime_shared::Currency;

use super::amount::Money;
use super::error::MoneyError;
use crate::catalog::registry;

impl Money {
    /// Parses a trimmed money string into an amount of the given currency.
    ///
    /// Construction rule: concatenate all digit groups in order, right-pad
    /// the decimal pair with `0` to two digits, strip leading zeros
    /// (preserving the sign), and coerce an empty or bare-sign result to
    /// `0`. A string not matching the grammar, or minor units beyond the
    /// i64 range, fails with [`MoneyError::Parse`].
    pub fn parse(input: &str, currency: Arc<Currency>) -> Result<Self, MoneyError> {
        Ok(Self::new(parse_minor_units(input)?, currency))
    }

    /// Parses a money string, resolving the currency code through the
    /// process-wide registry.
    pub fn parse_with_code(input: &str, code: &str) -> Result<Self, MoneyError> {
        Ok(Self::new(
            parse_minor_units(input)?,
            registry::resolve(code)?,
        ))
    }

    /// Parses a money string in the registry's default currency.
    pub fn parse_default(input: &str) -> Result<Self, MoneyError> {
        Self::parse_with_code(input, &registry::default_currency())
    }
}

/// Decodes a money string into minor units.
fn parse_minor_units(input: &str) -> Result<i64, MoneyError> {
    let parse_error = || MoneyError::Parse(input.to_string());

    let mut rest = input.trim();
    let mut negative = false;
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    // Split into digit groups; anything but digits and at most two
    // separators is a mismatch.
    let mut groups: Vec<&str> = Vec::with_capacity(3);
    let mut start = 0;
    for (idx, ch) in rest.char_indices() {
        if ch == '.' || ch == ',' {
            if groups.len() == 2 {
                return Err(parse_error());
            }
            groups.push(&rest[start..idx]);
            start = idx + 1;
        } else if !ch.is_ascii_digit() {
            return Err(parse_error());
        }
    }
    groups.push(&rest[start..]);

    // The trailing group is the decimal pair only when it has at most two
    // digits; after a single separator a longer group is a thousands group
    // instead, after two separators it does not parse.
    let (whole, decimals) = match groups.as_slice() {
        [whole] => ((*whole).to_string(), ""),
        [whole, trailing] if trailing.len() <= 2 => ((*whole).to_string(), *trailing),
        [first, second] => (format!("{first}{second}"), ""),
        [first, second, trailing] if trailing.len() <= 2 => {
            (format!("{first}{second}"), *trailing)
        }
        _ => return Err(parse_error()),
    };

    let mut units = whole;
    units.push_str(decimals);
    for _ in decimals.len()..2 {
        units.push('0');
    }

    let digits = units.trim_start_matches('0');
    let magnitude: i64 = if digits.is_empty() {
        0
    } else {
        digits.parse().map_err(|_| parse_error())?
    };
    Ok(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn eur() -> Arc<Currency> {
        Arc::new(Currency::new("EUR"))
    }

    #[rstest]
    #[case("1000", 100_000)]
    #[case("1000.0", 100_000)]
    #[case("1000.00", 100_000)]
    #[case("1000.1", 100_010)]
    #[case("1000.11", 100_011)]
    #[case("1000,0", 100_000)]
    #[case("1000,00", 100_000)]
    #[case("1000,1", 100_010)]
    #[case("1000,11", 100_011)]
    #[case("1.000,11", 100_011)]
    #[case("1.000.11", 100_011)]
    #[case("1,000,11", 100_011)]
    #[case("1,000.11", 100_011)]
    #[case("0.01", 1)]
    #[case("0,01", 1)]
    #[case("1", 100)]
    #[case("-1000", -100_000)]
    #[case("-1000.0", -100_000)]
    #[case("-1000.00", -100_000)]
    #[case("-0.01", -1)]
    #[case("-1000,0", -100_000)]
    #[case("-1000,00", -100_000)]
    #[case("-0,01", -1)]
    #[case("-1", -100)]
    #[case("+1000", 100_000)]
    #[case("+1000.0", 100_000)]
    #[case("+1000.00", 100_000)]
    #[case("+0.01", 1)]
    #[case("+1000,0", 100_000)]
    #[case("+1000,00", 100_000)]
    #[case("+0,01", 1)]
    #[case("+1", 100)]
    fn test_money_parsing(#[case] input: &str, #[case] minor: i64) {
        let parsed = Money::parse(input, eur()).unwrap();
        assert_eq!(parsed.amount(), minor, "Value: {input}");
    }

    #[rstest]
    // A three-digit trailing group after one separator is a thousands
    // group, so the whole string is read in whole units.
    #[case("123.456", 12_345_600)]
    #[case("12.3456", 1_234_5600)]
    // Trailing separator: no decimal digits decoded.
    #[case("1000,", 100_000)]
    // Leading separator: empty first group.
    #[case(".5", 50)]
    #[case(",05", 5)]
    fn test_money_parsing_heuristics(#[case] input: &str, #[case] minor: i64) {
        let parsed = Money::parse(input, eur()).unwrap();
        assert_eq!(parsed.amount(), minor, "Value: {input}");
    }

    #[rstest]
    #[case("foo")]
    #[case("12a")]
    #[case("1 000")]
    #[case("1.000.000")]
    #[case("1.000.000,11")]
    #[case("--1")]
    #[case("1.2.3.4")]
    fn test_money_parsing_rejects(#[case] input: &str) {
        let err = Money::parse(input, eur()).unwrap_err();
        assert!(matches!(err, MoneyError::Parse(_)), "Value: {input}");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let parsed = Money::parse("  1000.11 ", eur()).unwrap();
        assert_eq!(parsed.amount(), 100_011);
    }

    #[test]
    fn test_parse_strips_leading_zeros() {
        assert_eq!(Money::parse("007", eur()).unwrap().amount(), 700);
        assert_eq!(Money::parse("-007", eur()).unwrap().amount(), -700);
        assert_eq!(Money::parse("0", eur()).unwrap().amount(), 0);
        assert_eq!(Money::parse("-0", eur()).unwrap().amount(), 0);
    }

    #[test]
    fn test_parse_overflow() {
        let err = Money::parse("92233720368547758080", eur()).unwrap_err();
        assert!(matches!(err, MoneyError::Parse(_)));
    }
}
