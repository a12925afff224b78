//! Raw currency record shape.

use serde::Deserialize;

use centime_shared::Currency;

/// One raw record of the external reference data (RubyMoney
/// `currency_iso.json` shape). Unknown keys are ignored; `iso_code` and
/// `subunit_to_unit` are required, everything else has a lenient default.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCurrencyRecord {
    /// Alphabetic ISO code, any case.
    pub iso_code: String,
    /// Numeric ISO code as carried by the feed (a digit string).
    #[serde(default)]
    pub iso_numeric: Option<String>,
    /// Currency name.
    #[serde(default)]
    pub name: String,
    /// The display symbol; placed left or right by `symbol_first`.
    #[serde(default)]
    pub symbol: String,
    /// Minor units per major unit.
    pub subunit_to_unit: i64,
    /// True when the symbol precedes the amount.
    #[serde(default)]
    pub symbol_first: bool,
    /// Decimal mark, when the feed carries one.
    #[serde(default)]
    pub decimal_mark: Option<char>,
    /// Thousands separator, when the feed carries one.
    #[serde(default)]
    pub thousands_separator: Option<char>,
}

impl RawCurrencyRecord {
    /// Maps the raw record into a descriptor record.
    #[must_use]
    pub fn into_currency(self) -> Currency {
        let (symbol_left, symbol_right) = if self.symbol_first {
            (self.symbol, String::new())
        } else {
            (String::new(), self.symbol)
        };
        Currency {
            code: self.iso_code.to_uppercase(),
            iso: self.iso_numeric.as_deref().and_then(|v| v.parse().ok()),
            name: self.name,
            symbol_left,
            symbol_right,
            decimal_place: decimal_places(self.subunit_to_unit),
            decimal_mark: self.decimal_mark.unwrap_or('.'),
            thousands_separator: self.thousands_separator.unwrap_or(','),
            unit_factor: self.subunit_to_unit,
        }
    }
}

/// Fraction digits implied by a minor-unit factor: the count of digits of
/// the factor that are not `1`, so `100 -> 2`, `1000 -> 3`, `5 -> 1`,
/// `1 -> 0`. Faithful to the reference data's own convention, including its
/// odd answers for non-decimal factors.
fn decimal_places(unit_factor: i64) -> u32 {
    let count = unit_factor
        .to_string()
        .chars()
        .filter(|c| *c != '1' && c.is_ascii_digit())
        .count();
    u32::try_from(count).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_places() {
        assert_eq!(decimal_places(1), 0);
        assert_eq!(decimal_places(10), 1);
        assert_eq!(decimal_places(100), 2);
        assert_eq!(decimal_places(1000), 3);
        assert_eq!(decimal_places(5), 1);
    }
}
