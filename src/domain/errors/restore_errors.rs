use thiserror::Error;

use super::ValidationError;

/// Errors raised while mutating a manifest during restore
#[derive(Debug, Error)]
pub enum RestoreError {
    #[error("manifest has no string {0:?} field")]
    MissingKind(&'static str),

    #[error("manifest field {field} is not {expected}")]
    InvalidField {
        field: String,
        expected: &'static str,
    },

    #[error("invalid storage quantity at {field}: {source}")]
    InvalidQuantity {
        field: String,
        source: ValidationError,
    },
}
