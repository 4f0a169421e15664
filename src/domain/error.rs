//! Errors raised when upstream records cannot be turned into domain values.
//!
//! Batch operations never surface these to callers: a malformed window or
//! record is logged and skipped. They exist so the conversion boundary can
//! say precisely what was wrong.

use thiserror::Error;

/// Errors that occur when an upstream record violates a domain invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A timestamp was neither RFC 3339 nor a naive ISO-8601 date-time.
    #[error("invalid timestamp '{value}'")]
    InvalidTimestamp {
        /// The raw text that failed to parse.
        value: String,
    },

    /// A field required to build the value was absent or empty.
    #[error("missing required field: {field}")]
    MissingField {
        /// Upstream name of the missing field.
        field: &'static str,
    },
}
