//! Money error types.

use thiserror::Error;

use crate::catalog::CatalogError;

/// Errors raised by money construction, arithmetic, and parsing.
#[derive(Debug, Error)]
pub enum MoneyError {
    /// Construction from a value with a nonzero fractional part, or one not
    /// representable as i64 minor units.
    #[error("Amount must be an integer number of minor units")]
    AmountNotInteger,

    /// Operation between amounts of different currency codes.
    #[error("Different currencies \"{expected}\" and \"{got}\"")]
    CurrencyMismatch {
        /// Currency code of the left-hand amount.
        expected: String,
        /// Currency code of the right-hand amount.
        got: String,
    },

    /// Division or allocation with a zero divisor.
    #[error("Division by zero")]
    DivisionByZero,

    /// Multiply/divide operand that is not a usable number, or an operation
    /// whose result leaves the i64 minor-unit range.
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),

    /// String does not match the money grammar.
    #[error("The value could not be parsed as money: {0:?}")]
    Parse(String),

    /// Stored/default tax representation resolves to neither net nor gross.
    ///
    /// Unreachable with the closed [`TaxSide`](crate::money::TaxSide) set;
    /// kept so the contract is explicit should the representation ever be
    /// opened up.
    #[error("Problems with defined representations in TaxedMoney")]
    InconsistentTaxConfiguration,

    /// Currency resolution failed while constructing an amount from a code.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
