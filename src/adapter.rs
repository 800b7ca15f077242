//! The tabular adapter: runs a computation over every row of a document.
//!
//! A run goes through these steps, and any failure aborts it before a result
//! document exists:
//!
//! 1. structural validation (see [`crate::validation`])
//! 2. mode detection from the first input parameter ([`detect_mode`])
//! 3. binding the computation's signature to input columns
//! 4. one invocation per row, in row order, each checked for output arity
//! 5. a fresh document carrying the original inputs and the new outputs
//!
//! ```
//! use paramio::{Adapter, InputParameter, OutputParameter, ParameterDocument, Value, computation};
//!
//! let doc = ParameterDocument::new(
//!     vec![
//!         InputParameter::new("a", vec![1.into(), 2.into(), 3.into()]),
//!         InputParameter::new("b", vec![10.into(), 20.into(), 30.into()]),
//!     ],
//!     vec![OutputParameter::empty("c")],
//! );
//! let add = computation(["a", "b"], |args| Ok(args.integer("a")? + args.integer("b")?));
//!
//! let out = Adapter::default().run(&doc, &add)?;
//! assert_eq!(out.output_params[0].values, vec![Value::from(11), Value::from(22), Value::from(33)]);
//! # Ok::<(), paramio::AdapterError>(())
//! ```

use crate::computation::{Args, Computation};
use crate::document::ParameterDocument;
use crate::error::AdapterError;
use crate::metrics::RunReport;
use crate::validation::{
    ValidationError, combine_validations, consistent_row_lengths, inputs_present, unique_names,
};
use crate::value::Value;
use serde::Serialize;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info, trace};

/// Whether a document holds one row or many.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mode {
    /// One invocation; every parameter contributes its first value.
    Scalar,
    /// One invocation per row.
    Vectorized { rows: usize },
}

impl Mode {
    /// Number of invocations this mode performs.
    #[must_use]
    pub const fn rows(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Vectorized { rows } => rows,
        }
    }

    #[must_use]
    pub const fn is_vectorized(self) -> bool {
        matches!(self, Self::Vectorized { .. })
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::Vectorized { rows } => write!(f, "vectorized ({rows} rows)"),
        }
    }
}

/// Mode of `doc`, decided by its first input parameter alone.
///
/// More than one value in `inputParams[0]` means vectorized with that many
/// rows. Later parameters are never consulted, so a document whose first
/// parameter is scalar runs in scalar mode even if others carry more values.
///
/// # Errors
/// [`AdapterError::Malformed`] when the document has no input parameter or
/// the first one has no values.
pub fn detect_mode(doc: &ParameterDocument) -> Result<Mode, AdapterError> {
    let first = doc.input_params.first().ok_or_else(|| {
        AdapterError::Malformed(vec![
            ValidationError::new("document declares no input parameters").with_code("no_inputs"),
        ])
    })?;
    match first.values.len() {
        0 => Err(AdapterError::Malformed(vec![
            ValidationError::field(&first.name, "input parameter has no values")
                .with_code("empty_values"),
        ])),
        1 => Ok(Mode::Scalar),
        rows => Ok(Mode::Vectorized { rows }),
    }
}

/// Adapter settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Check up front that every input parameter of a vectorized document has
    /// as many values as the first one. When off, a short column is only
    /// detected at the first row it cannot supply, after earlier rows have
    /// already been invoked. Either way the run fails and nothing is produced.
    pub verify_row_lengths: bool,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            verify_row_lengths: true,
        }
    }
}

impl AdapterConfig {
    /// Row lengths verified before the first invocation.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            verify_row_lengths: true,
        }
    }

    /// Row lengths checked lazily, row by row.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            verify_row_lengths: false,
        }
    }
}

/// Runs computations over parameter documents, one row at a time.
#[derive(Clone, Debug, Default)]
pub struct Adapter {
    pub config: AdapterConfig,
}

impl Adapter {
    #[must_use]
    pub const fn new(config: AdapterConfig) -> Self {
        Self { config }
    }

    /// Run `computation` over `doc` and return the populated document.
    ///
    /// # Errors
    /// See [`AdapterError`]. On error no document is returned.
    pub fn run<C>(
        &self,
        doc: &ParameterDocument,
        computation: &C,
    ) -> Result<ParameterDocument, AdapterError>
    where
        C: Computation + ?Sized,
    {
        self.run_with_report(doc, computation).map(|(out, _)| out)
    }

    /// Like [`Adapter::run`], also returning a [`RunReport`].
    ///
    /// # Errors
    /// See [`AdapterError`].
    pub fn run_with_report<C>(
        &self,
        doc: &ParameterDocument,
        computation: &C,
    ) -> Result<(ParameterDocument, RunReport), AdapterError>
    where
        C: Computation + ?Sized,
    {
        let started = Instant::now();
        self.check(doc)?;

        let mode = detect_mode(doc)?;
        let signature = computation.signature();
        let binding = signature.bind(doc)?;
        let expected = doc.output_params.len();
        let rows = mode.rows();

        info!(
            %mode,
            inputs = doc.input_params.len(),
            outputs = expected,
            "running computation"
        );

        let mut columns: Vec<Vec<Value>> =
            (0..expected).map(|_| Vec::with_capacity(rows)).collect();
        for row in 0..rows {
            let values = binding.row_values(doc, mode, row)?;
            trace!(row, ?values, "invoking");
            let args = Args::bound(signature, values);
            let outputs = computation
                .call(&args)
                .map_err(|source| AdapterError::Computation { row, source })?;
            if outputs.len() != expected {
                debug!(row, expected, actual = outputs.len(), "output arity mismatch");
                return Err(AdapterError::ArityMismatch {
                    row,
                    expected,
                    actual: outputs.len(),
                });
            }
            for (column, value) in columns.iter_mut().zip(outputs) {
                column.push(value);
            }
        }

        let report = RunReport {
            mode,
            rows,
            invocations: rows,
            inputs: doc.input_params.len(),
            outputs: expected,
            elapsed: started.elapsed(),
        };
        debug!(elapsed_ms = report.elapsed_ms(), "computation finished");
        Ok((doc.with_output_columns(columns), report))
    }

    /// Validation that must pass before anything is invoked.
    fn check(&self, doc: &ParameterDocument) -> Result<(), AdapterError> {
        let mut checks = vec![inputs_present(doc), unique_names(doc)];
        if self.config.verify_row_lengths {
            checks.push(consistent_row_lengths(doc));
        }
        combine_validations(checks).map_err(AdapterError::Malformed)
    }
}
