//! Structural checks for parameter documents.
//!
//! Every check here runs before the adapter invokes anything, so a malformed
//! document never produces a partial result. Checks report every problem they
//! find rather than stopping at the first one.
//!
//! # Example
//!
//! ```
//! use paramio::validation::Validate;
//! use paramio::{InputParameter, OutputParameter, ParameterDocument};
//!
//! let doc = ParameterDocument::new(
//!     vec![InputParameter::new("a", vec![])],
//!     vec![OutputParameter::empty("c")],
//! );
//! let errors = doc.validate().unwrap_err();
//! assert_eq!(errors[0].code.as_deref(), Some("empty_values"));
//! ```

use crate::document::ParameterDocument;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Result type for validation operations.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Trait for types that can be validated.
pub trait Validate {
    /// Validate this instance and return a list of errors if invalid.
    fn validate(&self) -> ValidationResult;
}

/// A single validation error with context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// The parameter that failed validation (optional)
    pub field: Option<String>,
    /// Human-readable error message
    pub message: String,
    /// Error code for categorization (optional)
    pub code: Option<String>,
}

impl ValidationError {
    /// Create a new validation error with just a message.
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            field: None,
            message: message.into(),
            code: None,
        }
    }

    /// Create a validation error for a specific parameter.
    pub fn field<S: Into<String>, M: Into<String>>(field: S, message: M) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
            code: None,
        }
    }

    /// Attach an error code.
    #[must_use]
    pub fn with_code<S: Into<String>>(mut self, code: S) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref field) = self.field {
            write!(f, "[{field}] {}", self.message)?;
        } else {
            write!(f, "{}", self.message)?;
        }
        if let Some(ref code) = self.code {
            write!(f, " (code: {code})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

fn into_result(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub(crate) fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// At least one input parameter, and no parameter without values.
pub fn inputs_present(doc: &ParameterDocument) -> ValidationResult {
    let mut errors = Vec::new();
    if doc.input_params.is_empty() {
        errors.push(
            ValidationError::new("document declares no input parameters").with_code("no_inputs"),
        );
    }
    for input in &doc.input_params {
        if input.values.is_empty() {
            errors.push(
                ValidationError::field(&input.name, "input parameter has no values")
                    .with_code("empty_values"),
            );
        }
    }
    into_result(errors)
}

/// Names are unique within the input set and within the output set.
pub fn unique_names(doc: &ParameterDocument) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    for name in doc.input_names() {
        if !seen.insert(name) {
            errors.push(
                ValidationError::field(name, "input parameter declared more than once")
                    .with_code("duplicate_input"),
            );
        }
    }
    seen.clear();
    for name in doc.output_names() {
        if !seen.insert(name) {
            errors.push(
                ValidationError::field(name, "output parameter declared more than once")
                    .with_code("duplicate_output"),
            );
        }
    }
    into_result(errors)
}

/// In vectorized mode every input parameter must carry exactly as many
/// values as the first one. Scalar documents are not checked: they only ever
/// read the first value of each parameter.
pub fn consistent_row_lengths(doc: &ParameterDocument) -> ValidationResult {
    let Some(first) = doc.input_params.first() else {
        return Ok(());
    };
    let rows = first.values.len();
    if rows <= 1 {
        return Ok(());
    }
    let errors = doc.input_params[1..]
        .iter()
        .filter(|p| p.values.len() != rows)
        .map(|p| {
            ValidationError::field(
                &p.name,
                format!(
                    "has {} values but '{}' sets the row count to {rows}",
                    p.values.len(),
                    first.name
                ),
            )
            .with_code("row_length")
        })
        .collect();
    into_result(errors)
}

/// Combine multiple validation results.
pub fn combine_validations(results: Vec<ValidationResult>) -> ValidationResult {
    let mut all_errors = Vec::new();
    for result in results {
        if let Err(mut errors) = result {
            all_errors.append(&mut errors);
        }
    }
    if all_errors.is_empty() {
        Ok(())
    } else {
        Err(all_errors)
    }
}

impl Validate for ParameterDocument {
    fn validate(&self) -> ValidationResult {
        combine_validations(vec![
            inputs_present(self),
            unique_names(self),
            consistent_row_lengths(self),
        ])
    }
}
