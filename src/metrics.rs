//! Run statistics.
//!
//! Every successful run yields a [`RunReport`]. It can be printed, rendered
//! as JSON, or saved next to the document for later inspection:
//!
//! ```no_run
//! use paramio::{Adapter, builtins, testing::fixtures};
//!
//! # fn main() -> anyhow::Result<()> {
//! let doc = fixtures::vectorized_pair();
//! let (_, report) = Adapter::default().run_with_report(&doc, &builtins::add())?;
//! report.print();
//! report.save_to_file("run.json")?;
//! # Ok(())
//! # }
//! ```

use crate::adapter::Mode;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Value, json};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// What a run did and how long it took.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub mode: Mode,
    /// Rows in the document (1 in scalar mode).
    pub rows: usize,
    /// Times the computation was called.
    pub invocations: usize,
    pub inputs: usize,
    pub outputs: usize,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl RunReport {
    /// Wall time in fractional milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    /// The report as a JSON object, elapsed time included.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "mode": self.mode,
            "rows": self.rows,
            "invocations": self.invocations,
            "inputs": self.inputs,
            "outputs": self.outputs,
            "elapsed_ms": self.elapsed_ms(),
        })
    }

    /// Print the report to stdout.
    pub fn print(&self) {
        let _ = self.write_to(&mut std::io::stdout().lock());
    }

    /// Write the human-readable report to `out`.
    ///
    /// # Errors
    /// Fails when `out` cannot be written.
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "=== Run Report ===")?;
        writeln!(out, "mode:        {}", self.mode)?;
        writeln!(out, "invocations: {}", self.invocations)?;
        writeln!(out, "inputs:      {}", self.inputs)?;
        writeln!(out, "outputs:     {}", self.outputs)?;
        writeln!(out, "elapsed:     {:.3} ms", self.elapsed_ms())
    }

    /// Write the report to `path` as pretty JSON.
    ///
    /// # Errors
    /// Fails when the file cannot be created or written.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        let body = serde_json::to_string_pretty(&self.to_json())?;
        file.write_all(body.as_bytes())
            .with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }
}
