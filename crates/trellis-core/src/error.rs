//! Core error types.

use thiserror::Error;

/// Errors raised while validating values or reflecting schema metadata.
#[derive(Debug, Error)]
pub enum Error {
    /// A field or value failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// A catalog type string matched no known field type.
    #[error("unknown column type: {0}")]
    UnknownType(String),

    /// Schema metadata is inconsistent (primary index or interleaving).
    #[error("schema error: {0}")]
    Schema(String),

    /// A metadata row was missing a column or carried the wrong shape.
    #[error("invalid metadata row: {0}")]
    InvalidRow(String),

    /// The metadata source failed to execute a fetch.
    #[error("metadata source error: {0}")]
    Source(String),
}
