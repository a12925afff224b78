//! Process-wide currency registry.
//!
//! One mutable slot holds the active repository backend, the default
//! currency code, and the lazy-fallback flag. The slot starts unset; it is
//! filled explicitly via [`register`], or lazily with the built-in table on
//! the first resolution when the fallback is enabled. All access goes
//! through an `RwLock`, so a late re-registration is safe: concurrent
//! resolutions see either the old backend or the new one, never a
//! partially-constructed state.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use once_cell::sync::Lazy;

use centime_shared::Currency;

use super::array::ArrayRepository;
use super::error::CatalogError;
use super::repository::CurrencyRepository;

const DEFAULT_CURRENCY: &str = "EUR";

struct Registry {
    repository: Option<Arc<dyn CurrencyRepository>>,
    default_code: String,
    use_builtin_fallback: bool,
}

static REGISTRY: Lazy<RwLock<Registry>> = Lazy::new(|| {
    RwLock::new(Registry {
        repository: None,
        default_code: DEFAULT_CURRENCY.to_string(),
        use_builtin_fallback: true,
    })
});

fn read_lock() -> RwLockReadGuard<'static, Registry> {
    REGISTRY.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_lock() -> RwLockWriteGuard<'static, Registry> {
    REGISTRY.write().unwrap_or_else(PoisonError::into_inner)
}

/// Registers `repository` as the active backend, replacing any previous
/// one. Registration is expected once, early, but replacing later is safe.
pub fn register(repository: Arc<dyn CurrencyRepository>) {
    write_lock().repository = Some(repository);
}

/// Returns true if a backend is currently registered.
#[must_use]
pub fn is_registered() -> bool {
    read_lock().repository.is_some()
}

/// Enables or disables falling back to the built-in table when no backend
/// is registered at resolution time. Enabled by default.
pub fn use_default_repository(enabled: bool) {
    write_lock().use_builtin_fallback = enabled;
}

/// Returns the default currency code used when a caller supplies none.
#[must_use]
pub fn default_currency() -> String {
    read_lock().default_code.clone()
}

/// Sets the default currency code (normalized upper-case).
pub fn set_default_currency(code: &str) {
    write_lock().default_code = code.to_uppercase();
}

/// Resolves `code` through the active backend.
///
/// Fails with [`CatalogError::NotConfigured`] when no backend is registered
/// and the built-in fallback is disabled, or [`CatalogError::NotFound`]
/// when the backend does not know the code.
pub fn resolve(code: &str) -> Result<Arc<Currency>, CatalogError> {
    active_repository()?.get(code)
}

/// Returns whether the active backend knows `code`.
///
/// A missing backend is still `NotConfigured`, not `false`: the two
/// conditions stay distinct.
pub fn has(code: &str) -> Result<bool, CatalogError> {
    Ok(active_repository()?.has(code))
}

/// Restores the unset state: no backend, default code, fallback enabled.
///
/// Useful when swapping tables wholesale and in tests.
pub fn reset() {
    let mut state = write_lock();
    state.repository = None;
    state.default_code = DEFAULT_CURRENCY.to_string();
    state.use_builtin_fallback = true;
}

fn active_repository() -> Result<Arc<dyn CurrencyRepository>, CatalogError> {
    {
        let state = read_lock();
        if let Some(repository) = &state.repository {
            return Ok(Arc::clone(repository));
        }
        if !state.use_builtin_fallback {
            return Err(CatalogError::NotConfigured);
        }
    }

    let mut state = write_lock();
    // Another thread may have registered between the two locks.
    if let Some(repository) = &state.repository {
        return Ok(Arc::clone(repository));
    }
    if !state.use_builtin_fallback {
        return Err(CatalogError::NotConfigured);
    }
    let repository: Arc<dyn CurrencyRepository> = Arc::new(builtin_repository());
    state.repository = Some(Arc::clone(&repository));
    Ok(repository)
}

/// The built-in table installed by the lazy fallback: a handful of major
/// currencies, enough for out-of-the-box use without a registered table.
fn builtin_repository() -> ArrayRepository {
    ArrayRepository::new([
        Currency {
            code: "EUR".to_string(),
            iso: Some(978),
            name: "Euro".to_string(),
            symbol_left: String::new(),
            symbol_right: "€".to_string(),
            decimal_place: 2,
            decimal_mark: ',',
            thousands_separator: '.',
            unit_factor: 100,
        },
        Currency {
            code: "USD".to_string(),
            iso: Some(840),
            name: "US Dollar".to_string(),
            symbol_left: "$".to_string(),
            symbol_right: String::new(),
            decimal_place: 2,
            decimal_mark: '.',
            thousands_separator: ',',
            unit_factor: 100,
        },
        Currency {
            code: "GBP".to_string(),
            iso: Some(826),
            name: "Pound Sterling".to_string(),
            symbol_left: "£".to_string(),
            symbol_right: String::new(),
            decimal_place: 2,
            decimal_mark: '.',
            thousands_separator: ',',
            unit_factor: 100,
        },
        Currency {
            code: "CHF".to_string(),
            iso: Some(756),
            name: "Swiss Franc".to_string(),
            symbol_left: "CHF".to_string(),
            symbol_right: String::new(),
            decimal_place: 2,
            decimal_mark: '.',
            thousands_separator: ',',
            unit_factor: 100,
        },
        Currency {
            code: "JPY".to_string(),
            iso: Some(392),
            name: "Japanese Yen".to_string(),
            symbol_left: "¥".to_string(),
            symbol_right: String::new(),
            decimal_place: 0,
            decimal_mark: '.',
            thousands_separator: ',',
            unit_factor: 1,
        },
    ])
}
