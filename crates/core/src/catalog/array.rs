//! Static-table repository backend.

use std::collections::HashMap;
use std::sync::Arc;

use centime_shared::Currency;

use super::error::CatalogError;
use super::repository::CurrencyRepository;

/// Repository over a fixed in-memory table, keyed by upper-cased code.
pub struct ArrayRepository {
    currencies: HashMap<String, Arc<Currency>>,
}

impl ArrayRepository {
    /// Builds the table from descriptor records, e.g. deserialized from a
    /// static currency table.
    #[must_use]
    pub fn new(currencies: impl IntoIterator<Item = Currency>) -> Self {
        let currencies = currencies
            .into_iter()
            .map(|currency| (currency.code.to_uppercase(), Arc::new(currency)))
            .collect();
        Self { currencies }
    }
}

impl CurrencyRepository for ArrayRepository {
    fn get(&self, code: &str) -> Result<Arc<Currency>, CatalogError> {
        let code = code.to_uppercase();
        self.currencies
            .get(&code)
            .cloned()
            .ok_or(CatalogError::NotFound(code))
    }

    fn has(&self, code: &str) -> bool {
        self.currencies.contains_key(&code.to_uppercase())
    }
}
