//! Loading and storing parameter documents.
//!
//! The adapter itself never touches storage. This module supplies the
//! handles it is paired with:
//! - [`DocumentHandle`]: load a document, store a document
//! - [`FileDocument`]: a JSON file, optionally compressed, replaced atomically
//! - [`DocumentConfig`]: where documents live and how they are written
//! - [`run_document`]: load, run, and store only if the run succeeded
//!
//! By default a model's document is `<dir>/<model> IO.json`.

pub mod compression;
pub mod file;

pub use file::FileDocument;

use crate::adapter::Adapter;
use crate::computation::Computation;
use crate::document::ParameterDocument;
use crate::metrics::RunReport;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Suffix appended to a model name to form its document file name.
pub const DEFAULT_SUFFIX: &str = " IO.json";

/// Something a document can be loaded from and stored back to.
pub trait DocumentHandle {
    /// Human-readable location, for messages.
    fn describe(&self) -> String;

    /// # Errors
    /// Fails when the document cannot be read or parsed.
    fn load(&self) -> Result<ParameterDocument>;

    /// # Errors
    /// Fails when the document cannot be serialized or written.
    fn store(&self, doc: &ParameterDocument) -> Result<()>;
}

/// Where model documents live and how they are written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentConfig {
    /// Directory holding `<model><suffix>` files.
    pub directory: PathBuf,
    /// Appended to the model name, e.g. `" IO.json"` or `" IO.json.gz"`.
    pub suffix: String,
    /// Indent written JSON.
    pub pretty: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            suffix: DEFAULT_SUFFIX.to_string(),
            pretty: false,
        }
    }
}

impl DocumentConfig {
    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Document path of `model` under this configuration.
    #[must_use]
    pub fn path_for(&self, model: &str) -> PathBuf {
        self.directory.join(format!("{model}{}", self.suffix))
    }

    /// File handle for `model`'s document.
    #[must_use]
    pub fn handle_for(&self, model: &str) -> FileDocument {
        FileDocument::new(self.path_for(model)).with_pretty(self.pretty)
    }
}

/// `<dir>/<model> IO.json`
pub fn document_path(dir: impl AsRef<Path>, model: &str) -> PathBuf {
    dir.as_ref().join(format!("{model}{DEFAULT_SUFFIX}"))
}

/// Parse a document from JSON text.
///
/// # Errors
/// Fails on invalid JSON, a missing `inputParams`/`outputParams`, or a
/// non-primitive value.
pub fn parse_document(text: &str) -> Result<ParameterDocument> {
    serde_json::from_str(text).context("parse parameter document")
}

/// Render a document as JSON text.
///
/// # Errors
/// Fails only if serialization fails.
pub fn render_document(doc: &ParameterDocument, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(doc)
    } else {
        serde_json::to_string(doc)
    };
    text.context("serialize parameter document")
}

/// Load from `handle`, run `computation`, and store the result back.
///
/// The handle is written only when the run succeeds, so a failed run leaves
/// the stored document exactly as it was.
///
/// # Errors
/// Load, run and store failures, with the handle's location as context.
pub fn run_document<H, C>(handle: &H, computation: &C, adapter: &Adapter) -> Result<RunReport>
where
    H: DocumentHandle + ?Sized,
    C: Computation + ?Sized,
{
    let location = handle.describe();
    let doc = handle
        .load()
        .with_context(|| format!("load {location}"))?;
    let (out, report) = adapter
        .run_with_report(&doc, computation)
        .with_context(|| format!("run computation over {location}"))?;
    handle
        .store(&out)
        .with_context(|| format!("store {location}"))?;
    info!(location = %location, invocations = report.invocations, "document updated");
    Ok(report)
}
