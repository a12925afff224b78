//! Memoizing repository wrapper using Moka.

use std::sync::Arc;

use moka::sync::Cache;

use centime_shared::Currency;

use super::error::CatalogError;
use super::repository::CurrencyRepository;

/// Wraps any backend and memoizes successful resolutions by code.
///
/// Entries never expire: currency metadata is immutable for the process
/// lifetime, so a code resolved once is served from memory permanently.
/// Failed resolutions are not cached. Thread-safe and suitable for
/// concurrent access.
pub struct CachedRepository<R> {
    inner: R,
    cache: Cache<String, Arc<Currency>>,
}

impl<R: CurrencyRepository> CachedRepository<R> {
    /// Wraps `inner` with an unbounded, non-expiring memoization table.
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Cache::builder().build(),
        }
    }

    /// Returns the number of memoized descriptors.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl<R: CurrencyRepository> CurrencyRepository for CachedRepository<R> {
    fn get(&self, code: &str) -> Result<Arc<Currency>, CatalogError> {
        let code = code.to_uppercase();
        if let Some(hit) = self.cache.get(&code) {
            return Ok(hit);
        }
        let resolved = self.inner.get(&code)?;
        self.cache.insert(code, Arc::clone(&resolved));
        Ok(resolved)
    }

    fn has(&self, code: &str) -> bool {
        let code = code.to_uppercase();
        self.cache.contains_key(&code) || self.inner.has(&code)
    }
}
