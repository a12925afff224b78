use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use centime_shared::Currency;

use super::{registry, ArrayRepository, CachedRepository, CallbackRepository, CatalogError};
use super::repository::CurrencyRepository;
use crate::money::Money;

fn eur_record() -> Currency {
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
    }
}

// =========================================================================
// ArrayRepository
// =========================================================================

#[test]
fn test_array_get_currency() {
    let repository = ArrayRepository::new([eur_record()]);
    let currency = repository.get("EUR").unwrap();
    assert_eq!(currency.iso, Some(978));
    assert_eq!(currency.name, "Euro");
}

#[test]
fn test_array_has_currency() {
    let repository = ArrayRepository::new([eur_record()]);
    assert!(repository.has("EUR"), "Uppercase");
    assert!(repository.has("eur"), "Lowercase");
    assert!(!repository.has("USD"), "NotFound");
}

#[test]
fn test_array_get_is_case_insensitive() {
    let repository = ArrayRepository::new([eur_record()]);
    assert_eq!(repository.get("eur").unwrap().code, "EUR");
}

#[test]
fn test_array_not_found() {
    let repository = ArrayRepository::new([eur_record()]);
    let err = repository.get("USD").unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(code) if code == "USD"));
}

#[test]
fn test_array_from_deserialized_table() {
    // The static descriptor table format: a sequence of records.
    let table = r#"[
        {"code": "EUR", "iso": 978, "name": "Euro", "symbol_right": "€",
         "decimal_place": 2, "decimal_mark": ",", "thousands_separator": ".",
         "unit_factor": 100},
        {"code": "USD", "decimal_place": 2, "decimal_mark": ".",
         "thousands_separator": ","}
    ]"#;
    let records: Vec<Currency> = serde_json::from_str(table).unwrap();
    let repository = ArrayRepository::new(records);
    assert!(repository.has("usd"));
    assert_eq!(repository.get("EUR").unwrap().symbol_right, "€");
}

// =========================================================================
// CallbackRepository
// =========================================================================

#[test]
fn test_callback_closure_resolution() {
    let repository = CallbackRepository::new(|code| {
        (code == "EUR").then(|| Currency {
            name: "TestCurrency".to_string(),
            ..Currency::new("EUR")
        })
    });
    assert_eq!(repository.get("EUR").unwrap().name, "TestCurrency");
    assert_eq!(repository.get("eur").unwrap().name, "TestCurrency");
}

#[test]
fn test_callback_not_found() {
    let repository = CallbackRepository::new(|_| None);
    let err = repository.get("EUR").unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
}

#[test]
fn test_callback_has_attempts_resolution() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let repository = CallbackRepository::new(move |code| {
        counter.fetch_add(1, Ordering::SeqCst);
        (code == "EUR").then(|| Currency::new("EUR"))
    });

    assert!(repository.has("EUR"));
    assert!(!repository.has("USD"));
    // has() went through the resolver both times.
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// =========================================================================
// CachedRepository
// =========================================================================

fn counting_repository(calls: &Arc<AtomicUsize>) -> CallbackRepository {
    let counter = Arc::clone(calls);
    CallbackRepository::new(move |code| {
        counter.fetch_add(1, Ordering::SeqCst);
        (code == "EUR").then(|| Currency::new("EUR"))
    })
}

#[test]
fn test_cached_memoizes_successful_resolutions() {
    let calls = Arc::new(AtomicUsize::new(0));
    let repository = CachedRepository::new(counting_repository(&calls));

    let first = repository.get("EUR").unwrap();
    let second = repository.get("eur").unwrap();
    assert!(Arc::ptr_eq(&first, &second), "served from the cache");
    assert_eq!(calls.load(Ordering::SeqCst), 1, "wrapped backend hit once");
    assert_eq!(repository.entry_count(), 1);
}

#[test]
fn test_cached_does_not_cache_failures() {
    let calls = Arc::new(AtomicUsize::new(0));
    let repository = CachedRepository::new(counting_repository(&calls));

    assert!(repository.get("USD").is_err());
    assert!(repository.get("USD").is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(repository.entry_count(), 0);
}

#[test]
fn test_cached_has_checks_cache_first() {
    let calls = Arc::new(AtomicUsize::new(0));
    let repository = CachedRepository::new(counting_repository(&calls));

    let _ = repository.get("EUR").unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Cache hit: the wrapped backend is not consulted again.
    assert!(repository.has("EUR"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Cache miss: deferred to the wrapped backend.
    assert!(!repository.has("USD"));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// =========================================================================
// Registry (process-wide state: serialized through one lock)
// =========================================================================

static REGISTRY_TEST_LOCK: Mutex<()> = Mutex::new(());

fn registry_guard() -> MutexGuard<'static, ()> {
    REGISTRY_TEST_LOCK
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

#[test]
fn test_registry_not_configured() {
    let _guard = registry_guard();
    registry::reset();
    registry::use_default_repository(false);

    assert!(matches!(
        registry::resolve("EUR").unwrap_err(),
        CatalogError::NotConfigured
    ));
    // has() reports the missing backend the same way, not as `false`.
    assert!(matches!(
        registry::has("EUR").unwrap_err(),
        CatalogError::NotConfigured
    ));
    assert!(!registry::is_registered());

    registry::reset();
}

#[test]
fn test_registry_builtin_fallback() {
    let _guard = registry_guard();
    registry::reset();

    assert!(!registry::is_registered());
    let eur = registry::resolve("EUR").unwrap();
    assert_eq!(eur.iso, Some(978));
    assert_eq!(eur.symbol_right, "€");
    assert!(registry::is_registered(), "fallback installed the table");

    assert!(registry::has("JPY").unwrap());
    assert_eq!(registry::resolve("JPY").unwrap().decimal_place, 0);
    assert!(!registry::has("XXX").unwrap());
    assert!(matches!(
        registry::resolve("XXX").unwrap_err(),
        CatalogError::NotFound(code) if code == "XXX"
    ));

    registry::reset();
}

#[test]
fn test_registry_register_and_replace() {
    let _guard = registry_guard();
    registry::reset();

    registry::register(Arc::new(ArrayRepository::new([Currency::new("TST")])));
    assert!(registry::has("TST").unwrap());
    assert!(!registry::has("EUR").unwrap(), "custom table has no EUR");

    // Re-registration swaps the backend wholesale.
    registry::register(Arc::new(ArrayRepository::new([eur_record()])));
    assert!(registry::has("EUR").unwrap());
    assert!(!registry::has("TST").unwrap());

    registry::reset();
}

#[test]
fn test_registry_default_currency() {
    let _guard = registry_guard();
    registry::reset();

    assert_eq!(registry::default_currency(), "EUR");
    registry::set_default_currency("usd");
    assert_eq!(registry::default_currency(), "USD");

    registry::reset();
}

#[test]
fn test_registry_shares_descriptors() {
    let _guard = registry_guard();
    registry::reset();

    let first = registry::resolve("EUR").unwrap();
    let second = registry::resolve("eur").unwrap();
    assert!(
        Arc::ptr_eq(&first, &second),
        "one shared record per currency"
    );

    registry::reset();
}

#[test]
fn test_money_construction_through_registry() {
    let _guard = registry_guard();
    registry::reset();

    let m = Money::with_code(123_456, "EUR").unwrap();
    assert_eq!(m.format(true, false, false), "1.234,56€");

    let m = Money::with_default_currency(100).unwrap();
    assert_eq!(m.currency().code, "EUR");

    registry::set_default_currency("USD");
    let m = Money::with_default_currency(100).unwrap();
    assert_eq!(m.currency().code, "USD");

    let m = Money::parse_with_code("1.000,11", "EUR").unwrap();
    assert_eq!(m.amount(), 100_011);

    let err = Money::with_code(1, "XXX").unwrap_err();
    assert!(matches!(
        err,
        crate::money::MoneyError::Catalog(CatalogError::NotFound(_))
    ));

    registry::reset();
}
