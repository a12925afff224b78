//! Closure-delegating repository backend.

use std::sync::Arc;

use centime_shared::Currency;

use super::error::CatalogError;
use super::repository::CurrencyRepository;

type Resolver = dyn Fn(&str) -> Option<Currency> + Send + Sync;

/// Repository delegating resolution to a caller-supplied closure.
///
/// The closure receives the upper-cased code and returns the descriptor
/// fields, or `None` for an unknown code. `has` is implemented by
/// attempting `get`, so it is as expensive as a full resolution; that is
/// the contract of this backend, not an oversight.
pub struct CallbackRepository {
    resolver: Box<Resolver>,
}

impl CallbackRepository {
    /// Creates a repository around the given resolver closure.
    #[must_use]
    pub fn new(resolver: impl Fn(&str) -> Option<Currency> + Send + Sync + 'static) -> Self {
        Self {
            resolver: Box::new(resolver),
        }
    }
}

impl CurrencyRepository for CallbackRepository {
    fn get(&self, code: &str) -> Result<Arc<Currency>, CatalogError> {
        let code = code.to_uppercase();
        (self.resolver)(&code)
            .map(Arc::new)
            .ok_or(CatalogError::NotFound(code))
    }

    fn has(&self, code: &str) -> bool {
        self.get(code).is_ok()
    }
}
