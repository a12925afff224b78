//! Currency descriptor type.
//!
//! A `Currency` describes how amounts in one currency are stored and
//! rendered: the minor-unit factor, the number of fraction digits, the
//! decimal/thousands marks, and the symbols placed left or right of the
//! number. Descriptors are immutable after construction and shared by every
//! amount referencing the same code.

use serde::{Deserialize, Serialize};

/// Immutable metadata record for one currency.
///
/// Matches the static descriptor table format: one record per currency with
/// `code, iso, name, symbol_left, symbol_right, decimal_place, decimal_mark,
/// thousands_separator, unit_factor`. Unknown keys in a record are ignored by
/// contract; missing keys fall back to the field defaults below.
///
/// `unit_factor` is conventionally `10^decimal_place` but this is NOT
/// enforced: a caller may supply an inconsistent factor, and amounts render
/// it faithfully. Use [`Currency::is_consistent`] to check at registration
/// time if stricter tables are wanted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// 3-letter identifier, normalized upper-case (e.g. "EUR").
    pub code: String,
    /// Numeric ISO 4217 code, if known (e.g. 978).
    #[serde(default)]
    pub iso: Option<u32>,
    /// Human-readable name (e.g. "Euro").
    #[serde(default)]
    pub name: String,
    /// Symbol rendered left of the amount (may be empty).
    #[serde(default)]
    pub symbol_left: String,
    /// Symbol rendered right of the amount (may be empty).
    #[serde(default)]
    pub symbol_right: String,
    /// Number of fraction digits when rendering amounts.
    #[serde(default = "default_decimal_place")]
    pub decimal_place: u32,
    /// Character separating integer and fraction digits.
    #[serde(default = "default_decimal_mark")]
    pub decimal_mark: char,
    /// Character grouping integer digits in threes.
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: char,
    /// Number of minor units per major unit, conventionally
    /// `10^decimal_place`.
    #[serde(default = "default_unit_factor")]
    pub unit_factor: i64,
}

const fn default_decimal_place() -> u32 {
    2
}

const fn default_decimal_mark() -> char {
    '.'
}

const fn default_thousands_separator() -> char {
    ','
}

const fn default_unit_factor() -> i64 {
    100
}

impl Currency {
    /// Creates a descriptor with the given code and the default decimal
    /// rules (2 fraction digits, `.` mark, `,` grouping, factor 100).
    ///
    /// The code is normalized to upper-case.
    #[must_use]
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_uppercase(),
            ..Self::default()
        }
    }

    /// Returns true if both descriptors refer to the same currency code.
    #[must_use]
    pub fn same_code(&self, other: &Self) -> bool {
        self.code == other.code
    }

    /// Returns true if `unit_factor` equals `10^decimal_place`.
    ///
    /// Never enforced by the library; provided so callers can validate
    /// tables at registration time.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        10i64
            .checked_pow(self.decimal_place)
            .is_some_and(|factor| factor == self.unit_factor)
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self {
            code: String::new(),
            iso: None,
            name: String::new(),
            symbol_left: String::new(),
            symbol_right: String::new(),
            decimal_place: default_decimal_place(),
            decimal_mark: default_decimal_mark(),
            thousands_separator: default_thousands_separator(),
            unit_factor: default_unit_factor(),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code, self.name)
    }
}
