//! Errors raised while running a computation over a parameter document.

use crate::validation::{ValidationError, format_errors};
use thiserror::Error;

/// Every failure aborts the whole document; none of them leaves partial
/// output behind.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("malformed document: {}", format_errors(.0))]
    Malformed(Vec<ValidationError>),

    #[error(
        "signature mismatch: missing from document {missing:?}, not declared by computation {undeclared:?}"
    )]
    SignatureMismatch {
        /// Declared by the computation but absent from `inputParams`.
        missing: Vec<String>,
        /// Present in `inputParams` but not declared by the computation.
        undeclared: Vec<String>,
    },

    #[error("computation failed on row {row}")]
    Computation {
        row: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("row {row}: computation returned {actual} value(s) for {expected} output parameter(s)")]
    ArityMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

impl AdapterError {
    /// Stable short name of the failure class.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "malformed",
            Self::SignatureMismatch { .. } => "signature_mismatch",
            Self::Computation { .. } => "computation",
            Self::ArityMismatch { .. } => "arity_mismatch",
        }
    }
}

impl From<Vec<ValidationError>> for AdapterError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Malformed(errors)
    }
}
