//! The `Money` amount type.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are exact integer minor-unit quantities; every non-integer
//! computation goes through `rust_decimal::Decimal`.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use centime_shared::Currency;

use super::error::MoneyError;
use crate::catalog::registry;

/// An immutable amount of money in integer minor units (e.g. cents), tied
/// to a shared currency descriptor.
///
/// Every operation returns a *new* `Money`; originals are never mutated.
/// Operations between two amounts require identical currency codes and fail
/// with [`MoneyError::CurrencyMismatch`] otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money {
    /// Minor units, signed and exact.
    pub(crate) minor: i64,
    /// Shared descriptor; read-only after construction.
    pub(crate) currency: Arc<Currency>,
}

impl Money {
    /// Creates an amount from integer minor units.
    #[must_use]
    pub const fn new(amount: i64, currency: Arc<Currency>) -> Self {
        Self {
            minor: amount,
            currency,
        }
    }

    /// Creates an amount from a decimal number of minor units.
    ///
    /// Fails with [`MoneyError::AmountNotInteger`] if the value has a
    /// nonzero fractional part or does not fit the i64 minor-unit range.
    pub fn from_decimal(value: Decimal, currency: Arc<Currency>) -> Result<Self, MoneyError> {
        if !value.fract().is_zero() {
            return Err(MoneyError::AmountNotInteger);
        }
        let minor = value.to_i64().ok_or(MoneyError::AmountNotInteger)?;
        Ok(Self::new(minor, currency))
    }

    /// Creates an amount from minor units and a currency code, resolving
    /// the descriptor through the process-wide registry.
    pub fn with_code(amount: i64, code: &str) -> Result<Self, MoneyError> {
        Ok(Self::new(amount, registry::resolve(code)?))
    }

    /// Creates an amount in the registry's default currency.
    pub fn with_default_currency(amount: i64) -> Result<Self, MoneyError> {
        Self::with_code(amount, &registry::default_currency())
    }

    /// Returns the minor units unchanged.
    #[must_use]
    pub const fn amount(&self) -> i64 {
        self.minor
    }

    /// Returns the currency descriptor.
    #[must_use]
    pub const fn currency(&self) -> &Arc<Currency> {
        &self.currency
    }

    /// Returns the amount as a decimal in major units, truncated to exactly
    /// `decimal_place` fraction digits.
    ///
    /// The division `minor / unit_factor` is exact decimal math, so no
    /// precision is lost for typical currency factors; any excess digits an
    /// inconsistent factor produces are cut off, not rounded.
    #[must_use]
    pub fn normalize(&self) -> Decimal {
        // A zero unit factor would divide by zero; render minor units as-is.
        let factor = if self.currency.unit_factor == 0 {
            Decimal::ONE
        } else {
            Decimal::from(self.currency.unit_factor)
        };
        let mut value = (Decimal::from(self.minor) / factor)
            .round_dp_with_strategy(self.currency.decimal_place, RoundingStrategy::ToZero);
        value.rescale(self.currency.decimal_place);
        value
    }

    /// Renders [`normalize`](Self::normalize) using the currency's decimal
    /// mark and, only if requested, its thousands separator.
    #[must_use]
    pub fn localize(&self, with_thousands: bool) -> String {
        let c = self.currency.as_ref();
        let normalized = self.normalize().to_string();
        let (number, fraction) = match normalized.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (normalized.as_str(), None),
        };
        let (sign, digits) = match number.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", number),
        };

        let mut out = String::with_capacity(normalized.len() + digits.len() / 3);
        out.push_str(sign);
        if with_thousands {
            for (i, ch) in digits.chars().enumerate() {
                if i > 0 && (digits.len() - i) % 3 == 0 {
                    out.push(c.thousands_separator);
                }
                out.push(ch);
            }
        } else {
            out.push_str(digits);
        }
        if let Some(fraction) = fraction {
            out.push(c.decimal_mark);
            out.push_str(fraction);
        }
        out
    }

    /// Renders the localized number together with the currency symbols or
    /// code. Four boolean-driven layouts, all pure string composition:
    ///
    /// - symbols: `left amount right`, or `right amount left` when swapped
    /// - code: `"amount CODE"`, or `"CODE amount"` when swapped
    #[must_use]
    pub fn format(
        &self,
        with_thousands: bool,
        code_instead_of_symbol: bool,
        swap_left_and_right: bool,
    ) -> String {
        let c = self.currency.as_ref();
        let amount = self.localize(with_thousands);

        if code_instead_of_symbol {
            return if swap_left_and_right {
                format!("{} {amount}", c.code)
            } else {
                format!("{amount} {}", c.code)
            };
        }
        if swap_left_and_right {
            format!("{}{amount}{}", c.symbol_right, c.symbol_left)
        } else {
            format!("{}{amount}{}", c.symbol_left, c.symbol_right)
        }
    }

    /// Returns true if both amounts share the same currency code.
    #[must_use]
    pub fn is_same_currency(&self, other: &Self) -> bool {
        self.currency.same_code(&other.currency)
    }

    fn assert_same_currency(&self, other: &Self) -> Result<(), MoneyError> {
        if self.is_same_currency(other) {
            return Ok(());
        }
        Err(MoneyError::CurrencyMismatch {
            expected: self.currency.code.clone(),
            got: other.currency.code.clone(),
        })
    }

    /// Compares two amounts of the same currency.
    pub fn compare(&self, other: &Self) -> Result<Ordering, MoneyError> {
        self.assert_same_currency(other)?;
        Ok(self.minor.cmp(&other.minor))
    }

    /// Returns true if both amounts are equal (same currency required).
    pub fn equals(&self, other: &Self) -> Result<bool, MoneyError> {
        Ok(self.compare(other)? == Ordering::Equal)
    }

    /// Returns true if `self > other` (same currency required).
    pub fn greater_than(&self, other: &Self) -> Result<bool, MoneyError> {
        Ok(self.compare(other)? == Ordering::Greater)
    }

    /// Returns true if `self >= other` (same currency required).
    pub fn greater_than_or_equal(&self, other: &Self) -> Result<bool, MoneyError> {
        Ok(self.compare(other)? != Ordering::Less)
    }

    /// Returns true if `self < other` (same currency required).
    pub fn less_than(&self, other: &Self) -> Result<bool, MoneyError> {
        Ok(self.compare(other)? == Ordering::Less)
    }

    /// Returns true if `self <= other` (same currency required).
    pub fn less_than_or_equal(&self, other: &Self) -> Result<bool, MoneyError> {
        Ok(self.compare(other)? != Ordering::Greater)
    }

    /// Adds two amounts of the same currency.
    pub fn add(&self, addend: &Self) -> Result<Self, MoneyError> {
        self.assert_same_currency(addend)?;
        Ok(Self::new(
            self.minor + addend.minor,
            Arc::clone(&self.currency),
        ))
    }

    /// Subtracts an amount of the same currency.
    pub fn subtract(&self, subtrahend: &Self) -> Result<Self, MoneyError> {
        self.assert_same_currency(subtrahend)?;
        Ok(Self::new(
            self.minor - subtrahend.minor,
            Arc::clone(&self.currency),
        ))
    }

    /// Multiplies by a decimal factor, rounding half away from zero.
    pub fn multiply(&self, factor: Decimal) -> Result<Self, MoneyError> {
        self.multiply_with(factor, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Multiplies by a decimal factor with an explicit rounding strategy.
    pub fn multiply_with(
        &self,
        factor: Decimal,
        rounding: RoundingStrategy,
    ) -> Result<Self, MoneyError> {
        let product = Decimal::from(self.minor)
            .checked_mul(factor)
            .ok_or_else(|| MoneyError::InvalidOperand("product out of range".to_string()))?;
        self.with_rounded(product, rounding)
    }

    /// Multiplies by a float factor, rounding half away from zero.
    ///
    /// Fails with [`MoneyError::InvalidOperand`] if the factor is NaN or
    /// infinite.
    pub fn multiply_f64(&self, factor: f64) -> Result<Self, MoneyError> {
        self.multiply(decimal_operand(factor)?)
    }

    /// Divides by a decimal divisor, rounding half away from zero.
    ///
    /// Fails with [`MoneyError::DivisionByZero`] on a zero divisor.
    pub fn divide(&self, divisor: Decimal) -> Result<Self, MoneyError> {
        self.divide_with(divisor, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Divides by a decimal divisor with an explicit rounding strategy.
    pub fn divide_with(
        &self,
        divisor: Decimal,
        rounding: RoundingStrategy,
    ) -> Result<Self, MoneyError> {
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        let quotient = Decimal::from(self.minor)
            .checked_div(divisor)
            .ok_or_else(|| MoneyError::InvalidOperand("quotient out of range".to_string()))?;
        self.with_rounded(quotient, rounding)
    }

    /// Divides by a float divisor, rounding half away from zero.
    ///
    /// Fails with [`MoneyError::InvalidOperand`] if the divisor is NaN or
    /// infinite, and [`MoneyError::DivisionByZero`] if it is zero.
    pub fn divide_f64(&self, divisor: f64) -> Result<Self, MoneyError> {
        self.divide(decimal_operand(divisor)?)
    }

    fn with_rounded(&self, value: Decimal, rounding: RoundingStrategy) -> Result<Self, MoneyError> {
        let minor = value
            .round_dp_with_strategy(0, rounding)
            .to_i64()
            .ok_or_else(|| {
                MoneyError::InvalidOperand("result exceeds the minor-unit range".to_string())
            })?;
        Ok(Self::new(minor, Arc::clone(&self.currency)))
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.minor == 0
    }

    /// Returns true if the amount is greater than zero.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.minor > 0
    }

    /// Returns true if the amount is less than zero.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.minor < 0
    }
}

fn decimal_operand(value: f64) -> Result<Decimal, MoneyError> {
    Decimal::from_f64(value)
        .ok_or_else(|| MoneyError::InvalidOperand(format!("operand \"{value}\" is not a number")))
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false, false, false))
    }
}
