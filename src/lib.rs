//! # paramio
//!
//! Runs a **named computation** over the rows of a JSON parameter document and
//! writes the results back in the same shape.
//!
//! A document declares named input columns and named output columns. If the
//! first input carries a single value the document is a single row; if it
//! carries several, the document has that many rows and the computation is
//! called once per row, in order. Each call's results are spread across the
//! declared outputs by position.
//!
//! ## Key Features
//!
//! - **Signature binding** - computations declare parameter names; columns are matched by name
//! - **Scalar and vectorized documents** - detected from the first input parameter
//! - **Single or multiple results** - tuples are spread across outputs in declared order
//! - **All-or-nothing runs** - any failure leaves no partial output behind
//! - **Document I/O** - JSON files, optionally gzip/zstd compressed, replaced atomically
//! - **Registry and CLI** - pick a registered computation by name
//!
//! ## Quick Start
//!
//! ```
//! use paramio::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let doc: ParameterDocument = serde_json::from_str(r#"{
//!     "inputParams":  [{"name": "a", "values": [5, 10]}, {"name": "b", "values": [1, 2]}],
//!     "outputParams": [{"name": "sum"}, {"name": "difference"}]
//! }"#)?;
//!
//! let add_sub = computation(["a", "b"], |args| {
//!     let (a, b) = (args.integer("a")?, args.integer("b")?);
//!     Ok((a + b, a - b))
//! });
//!
//! let out = Adapter::default().run(&doc, &add_sub)?;
//! assert_eq!(out.output_params[0].values, vec![Value::from(6), Value::from(12)]);
//! assert_eq!(out.output_params[1].values, vec![Value::from(4), Value::from(8)]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Documents
//!
//! A [`ParameterDocument`] holds [`InputParameter`]s and [`OutputParameter`]s
//! in declaration order. Values are primitive [`Value`]s. Unknown top-level
//! keys survive a run untouched.
//!
//! ### Computations
//!
//! A [`Computation`] has a [`Signature`] (its parameter names) and is called
//! with [`Args`]. Its results are normalized to [`Outputs`] through
//! [`IntoOutputs`], so returning `x` and returning `(x, y)` both work.
//!
//! ### Modes
//!
//! [`detect_mode`] looks only at the first input parameter. Later parameters
//! never switch a document to vectorized mode.
//!
//! ### Failures
//!
//! [`AdapterError`] separates malformed documents, signature mismatches,
//! computation errors and output arity mismatches. Every one aborts the run.
//!
//! ## Module Overview
//!
//! - [`adapter`] - mode detection and the row loop
//! - [`computation`] / [`signature`] - the computation contract and argument binding
//! - [`document`] / [`value`] - the data model
//! - [`validation`] - structural checks
//! - [`io`] - file handles, compression, atomic write-back
//! - [`registry`] / [`builtins`] - named computations
//! - [`metrics`] - run reports
//! - [`cli`] - the `paramio` command line
//! - [`testing`] - builders, fixtures and assertions

pub mod adapter;
pub mod builtins;
pub mod cli;
pub mod computation;
pub mod document;
pub mod error;
pub mod io;
pub mod metrics;
pub mod registry;
pub mod signature;
pub mod testing;
pub mod validation;
pub mod value;

pub use adapter::{Adapter, AdapterConfig, Mode, detect_mode};
pub use computation::{
    Args, Computation, FnComputation, IntoOutputValue, IntoOutputs, Outputs, computation,
};
pub use document::{InputParameter, OutputParameter, ParameterDocument};
pub use error::AdapterError;
pub use io::{DocumentConfig, DocumentHandle, FileDocument, document_path, run_document};
pub use metrics::RunReport;
pub use registry::ComputationRegistry;
pub use signature::{Binding, Signature};
pub use value::Value;
