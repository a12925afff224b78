//! Updater error types.

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors raised while mapping raw currency records.
#[derive(Debug, Error)]
pub enum UpdaterError {
    /// A raw record is missing required fields or carries wrong-typed
    /// values.
    #[error("Invalid currency record: {0}")]
    InvalidRecord(String),

    /// Saving a mapped descriptor failed.
    #[error("Saving currency record failed: {0}")]
    Save(String),

    /// Per-item failures collected over a whole run, keyed by the source
    /// record's code.
    #[error("Currency table update failed for {} record(s)", .0.len())]
    Failures(BTreeMap<String, String>),
}
