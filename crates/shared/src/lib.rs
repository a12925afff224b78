//! Shared types for Centime.
//!
//! This crate provides the types shared across all other crates:
//! - The `Currency` descriptor with symbols, decimal rules, and minor-unit
//!   factor, including deserialization of the static descriptor table format

pub mod types;

pub use types::Currency;
