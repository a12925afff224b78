//! Tax-aware money amounts.
//!
//! A [`TaxedMoney`] composes a [`Money`] with a tax rate and two
//! representation markers: which side (net or gross) the stored minor units
//! are on, and which side the default accessor returns. The two fixed
//! conventions (always-gross, always-net) are plain constructor functions
//! over the same type, not subtypes.

use std::sync::Arc;

use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use centime_shared::Currency;

use super::amount::Money;
use super::error::MoneyError;

/// Whether an amount is tax-exclusive (net) or tax-inclusive (gross).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxSide {
    /// Tax-exclusive.
    Net,
    /// Tax-inclusive.
    Gross,
}

/// A money amount carrying a tax rate.
///
/// The stored minor units are on `stored` side; accessors convert on the
/// fly. Net→Gross multiplies by `1 + rate/100`, Gross→Net divides by it,
/// rounding half away from zero at the requested precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxedMoney {
    money: Money,
    tax_rate: Decimal,
    stored: TaxSide,
    default_side: TaxSide,
}

impl TaxedMoney {
    /// Creates a taxed amount with explicit stored and default sides.
    #[must_use]
    pub const fn new(
        amount: i64,
        currency: Arc<Currency>,
        tax_rate: Decimal,
        stored: TaxSide,
        default_side: TaxSide,
    ) -> Self {
        Self {
            money: Money::new(amount, currency),
            tax_rate,
            stored,
            default_side,
        }
    }

    /// Creates a taxed amount whose stored value is net; the default
    /// accessor returns gross.
    #[must_use]
    pub const fn from_net(amount: i64, tax_rate: Decimal, currency: Arc<Currency>) -> Self {
        Self::new(amount, currency, tax_rate, TaxSide::Net, TaxSide::Gross)
    }

    /// Creates a taxed amount whose stored value is gross; the default
    /// accessor returns gross.
    #[must_use]
    pub const fn from_gross(amount: i64, tax_rate: Decimal, currency: Arc<Currency>) -> Self {
        Self::new(amount, currency, tax_rate, TaxSide::Gross, TaxSide::Gross)
    }

    /// Creates a taxed amount whose stored value is net; the default
    /// accessor returns net.
    #[must_use]
    pub const fn net_from_net(amount: i64, tax_rate: Decimal, currency: Arc<Currency>) -> Self {
        Self::new(amount, currency, tax_rate, TaxSide::Net, TaxSide::Net)
    }

    /// Creates a taxed amount whose stored value is gross; the default
    /// accessor returns net.
    #[must_use]
    pub const fn net_from_gross(amount: i64, tax_rate: Decimal, currency: Arc<Currency>) -> Self {
        Self::new(amount, currency, tax_rate, TaxSide::Gross, TaxSide::Net)
    }

    /// Parses a money string as a net stored amount (default accessor
    /// returns gross).
    pub fn parse_net(
        input: &str,
        tax_rate: Decimal,
        currency: Arc<Currency>,
    ) -> Result<Self, MoneyError> {
        let money = Money::parse(input, currency)?;
        Ok(Self {
            money,
            tax_rate,
            stored: TaxSide::Net,
            default_side: TaxSide::Gross,
        })
    }

    /// Parses a money string as a gross stored amount (default accessor
    /// returns gross).
    pub fn parse_gross(
        input: &str,
        tax_rate: Decimal,
        currency: Arc<Currency>,
    ) -> Result<Self, MoneyError> {
        let money = Money::parse(input, currency)?;
        Ok(Self {
            money,
            tax_rate,
            stored: TaxSide::Gross,
            default_side: TaxSide::Gross,
        })
    }

    /// Returns the underlying stored amount.
    #[must_use]
    pub const fn money(&self) -> &Money {
        &self.money
    }

    /// Returns the tax rate as a percentage.
    #[must_use]
    pub const fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    /// Returns the side the stored minor units are on.
    #[must_use]
    pub const fn stored_side(&self) -> TaxSide {
        self.stored
    }

    /// Returns the side the default accessor reports.
    #[must_use]
    pub const fn default_side(&self) -> TaxSide {
        self.default_side
    }

    /// Returns the currency descriptor.
    #[must_use]
    pub const fn currency(&self) -> &Arc<Currency> {
        self.money.currency()
    }

    /// Returns the amount on the default side, in integer minor units.
    ///
    /// Saturates at the i64 range if the tax conversion leaves it.
    #[must_use]
    pub fn amount(&self) -> i64 {
        to_minor_saturating(self.amount_with_precision(0))
    }

    /// Returns the amount on the default side at the given precision.
    ///
    /// When the stored side already is the default side, the stored minor
    /// units are returned unchanged.
    #[must_use]
    pub fn amount_with_precision(&self, precision: u32) -> Decimal {
        match (self.stored, self.default_side) {
            (TaxSide::Net, TaxSide::Net) | (TaxSide::Gross, TaxSide::Gross) => {
                Decimal::from(self.money.amount())
            }
            (TaxSide::Net, TaxSide::Gross) => self.add_tax(precision),
            (TaxSide::Gross, TaxSide::Net) => self.sub_tax(precision),
        }
    }

    /// Returns the gross (tax-inclusive) amount in integer minor units.
    #[must_use]
    pub fn gross(&self) -> i64 {
        to_minor_saturating(self.gross_with_precision(0))
    }

    /// Returns the gross (tax-inclusive) amount at the given precision.
    #[must_use]
    pub fn gross_with_precision(&self, precision: u32) -> Decimal {
        match self.stored {
            TaxSide::Gross => Decimal::from(self.money.amount()),
            TaxSide::Net => self.add_tax(precision),
        }
    }

    /// Returns the net (tax-exclusive) amount in integer minor units.
    #[must_use]
    pub fn net(&self) -> i64 {
        to_minor_saturating(self.net_with_precision(0))
    }

    /// Returns the net (tax-exclusive) amount at the given precision.
    #[must_use]
    pub fn net_with_precision(&self, precision: u32) -> Decimal {
        match self.stored {
            TaxSide::Net => Decimal::from(self.money.amount()),
            TaxSide::Gross => self.sub_tax(precision),
        }
    }

    fn tax_factor(&self) -> Decimal {
        Decimal::ONE + self.tax_rate / Decimal::ONE_HUNDRED
    }

    fn add_tax(&self, precision: u32) -> Decimal {
        (Decimal::from(self.money.amount()) * self.tax_factor())
            .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
    }

    fn sub_tax(&self, precision: u32) -> Decimal {
        (Decimal::from(self.money.amount()) / self.tax_factor())
            .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
    }
}

fn to_minor_saturating(value: Decimal) -> i64 {
    value.to_i64().unwrap_or(if value.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}
