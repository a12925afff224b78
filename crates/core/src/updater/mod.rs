//! Currency-table record mapping.
//!
//! Turns raw external reference records (the RubyMoney `currency_iso.json`
//! shape) into [`Currency`](centime_shared::Currency) descriptor records.
//! Fetching the data and persisting the mapped table are the caller's
//! concern; this module only maps, tolerating per-item failures without
//! aborting the whole run.

pub mod error;
pub mod types;

pub use error::UpdaterError;
pub use types::RawCurrencyRecord;

use std::collections::BTreeMap;

use serde_json::Value;

use centime_shared::Currency;

/// Maps raw currency records into descriptor records.
pub struct CurrencyUpdater;

impl CurrencyUpdater {
    /// Maps one raw record into a descriptor record.
    ///
    /// Fails with [`UpdaterError::InvalidRecord`] if required fields are
    /// missing or wrongly typed.
    pub fn map_item(raw: &Value) -> Result<Currency, UpdaterError> {
        let record: RawCurrencyRecord = serde_json::from_value(raw.clone())
            .map_err(|err| UpdaterError::InvalidRecord(err.to_string()))?;
        Ok(record.into_currency())
    }

    /// Maps every item with the default mapper and hands the results to
    /// `saver`.
    ///
    /// A failing item does not abort the run: failures are collected as
    /// `{code: error}` pairs and returned together once all items were
    /// attempted. Returns `Ok(())` when none failed.
    pub fn update_currency_table<S>(items: &[Value], saver: S) -> Result<(), UpdaterError>
    where
        S: FnMut(Currency) -> Result<(), UpdaterError>,
    {
        Self::update_currency_table_with(items, Self::map_item, saver)
    }

    /// Maps every item with a caller-supplied mapper and hands the results
    /// to `saver`, collecting per-item failures like
    /// [`update_currency_table`](Self::update_currency_table).
    pub fn update_currency_table_with<M, S>(
        items: &[Value],
        mapper: M,
        mut saver: S,
    ) -> Result<(), UpdaterError>
    where
        M: Fn(&Value) -> Result<Currency, UpdaterError>,
        S: FnMut(Currency) -> Result<(), UpdaterError>,
    {
        let mut failures = BTreeMap::new();
        for item in items {
            let key = item
                .get("iso_code")
                .and_then(Value::as_str)
                .unwrap_or("?")
                .to_string();
            if let Err(err) = mapper(item).and_then(&mut saver) {
                failures.insert(key, err.to_string());
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(UpdaterError::Failures(failures))
        }
    }
}
