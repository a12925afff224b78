//! Proportional allocation of an amount across ratios.
//!
//! Splits an amount without losing or duplicating minor units: each ratio
//! gets the floor of its proportional share, and the leftover units are
//! handed out one by one starting over from the FIRST entry. The remainder
//! policy is strictly positional, not largest-fraction-first, so early
//! entries in the ratio list preferentially receive the extra units and the
//! result is reproducible for a given ratio order.

use std::sync::Arc;

use super::amount::Money;
use super::error::MoneyError;

impl Money {
    /// Allocates the amount across `ratios`, in list order.
    ///
    /// The results always sum to the original amount. Ratios must be
    /// non-negative with a positive total; an empty list or a zero total
    /// fails with [`MoneyError::DivisionByZero`].
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use centime_core::Money;
    /// use centime_shared::Currency;
    ///
    /// let eur = Arc::new(Currency::new("EUR"));
    /// let parts = Money::new(100, eur).allocate(&[1, 1, 1]).unwrap();
    /// let minor: Vec<i64> = parts.iter().map(Money::amount).collect();
    /// assert_eq!(minor, vec![34, 33, 33]);
    /// ```
    pub fn allocate(&self, ratios: &[i64]) -> Result<Vec<Self>, MoneyError> {
        if ratios.iter().any(|&ratio| ratio < 0) {
            return Err(MoneyError::InvalidOperand(
                "allocation ratios must be non-negative".to_string(),
            ));
        }
        let total: i128 = ratios.iter().map(|&ratio| i128::from(ratio)).sum();
        if total == 0 {
            return Err(MoneyError::DivisionByZero);
        }

        let mut results = Vec::with_capacity(ratios.len());
        let mut remainder = i128::from(self.minor);
        for &ratio in ratios {
            // Floor division keeps sum(shares) <= minor for any sign of the
            // amount, so the remainder below is never negative.
            let share = (i128::from(self.minor) * i128::from(ratio)).div_euclid(total);
            let share = i64::try_from(share)
                .map_err(|_| MoneyError::InvalidOperand("share out of range".to_string()))?;
            results.push(Self::new(share, Arc::clone(&self.currency)));
            remainder -= i128::from(share);
        }

        let mut index = 0;
        while remainder > 0 {
            results[index].minor += 1;
            remainder -= 1;
            index += 1;
        }
        Ok(results)
    }
}
