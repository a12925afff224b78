//! Repository contract for currency resolution.

use std::sync::Arc;

use centime_shared::Currency;

use super::error::CatalogError;

/// A pluggable source of currency descriptors.
///
/// Implementations compare codes case-insensitively (the input is
/// upper-cased before lookup) and return descriptors behind `Arc` so every
/// amount referencing a code shares one read-only record.
pub trait CurrencyRepository: Send + Sync {
    /// Resolves the descriptor for `code`.
    ///
    /// Fails with [`CatalogError::NotFound`] if the code is unknown.
    fn get(&self, code: &str) -> Result<Arc<Currency>, CatalogError>;

    /// Returns true if the repository knows `code`.
    fn has(&self, code: &str) -> bool;
}
