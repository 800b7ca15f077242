//! The `paramio` command line.
//!
//! ```text
//! paramio run add --dir ./models          # reads and rewrites "./models/add IO.json"
//! paramio run add_mul --document doc.json.gz --pretty
//! paramio inspect --document doc.json
//! paramio list
//! ```
//!
//! [`run`] parses arguments, executes the command and maps the outcome to a
//! process exit status. [`execute`] does the work and writes everything meant
//! for the user to the given writer.

use crate::adapter::{Adapter, AdapterConfig, detect_mode};
use crate::io::{DEFAULT_SUFFIX, DocumentConfig, DocumentHandle, FileDocument, run_document};
use crate::registry::ComputationRegistry;
use anyhow::{Context, Result, bail};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Exit status of a successful command.
pub const EXIT_OK: u8 = 0;
/// Exit status when a command fails.
pub const EXIT_FAILURE: u8 = 1;
/// Exit status for unparseable arguments.
pub const EXIT_USAGE: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "paramio", version, about = "Run a computation over a parameter document")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a registered computation and write the outputs back
    Run {
        /// Registered computation name
        model: String,

        #[command(flatten)]
        location: Location,

        /// Indent the written JSON
        #[arg(long)]
        pretty: bool,

        /// Check row lengths only as rows are reached, not up front
        #[arg(long)]
        lenient: bool,

        /// Also write the run report as JSON to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Show mode, rows and parameter names of a document without running anything
    Inspect {
        /// Model name used to locate the document under --dir
        #[arg(long)]
        model: Option<String>,

        #[command(flatten)]
        location: Location,
    },
    /// List registered computations
    List,
}

#[derive(Debug, ClapArgs)]
pub struct Location {
    /// Directory holding "<model> IO.json"
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Suffix appended to the model name
    #[arg(long, default_value = DEFAULT_SUFFIX)]
    pub suffix: String,

    /// Explicit document path, overriding --dir and --suffix
    #[arg(long)]
    pub document: Option<PathBuf>,
}

impl Location {
    fn config(&self, pretty: bool) -> DocumentConfig {
        DocumentConfig::default()
            .with_directory(&self.dir)
            .with_suffix(&self.suffix)
            .with_pretty(pretty)
    }

    /// The document `--document` names, or `model`'s document under `--dir`.
    ///
    /// # Errors
    /// Fails when neither a path nor a model name is given.
    pub fn handle(&self, model: Option<&str>, pretty: bool) -> Result<FileDocument> {
        if let Some(path) = &self.document {
            return Ok(FileDocument::new(path).with_pretty(pretty));
        }
        let Some(model) = model else {
            bail!("either --document or a model name is required");
        };
        Ok(self.config(pretty).handle_for(model))
    }
}

/// Install the stderr log subscriber. A subscriber installed earlier wins.
pub fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Execute `command` against `registry`, writing user-facing output to `out`.
///
/// # Errors
/// Unknown computations, missing documents, failed runs and write failures.
pub fn execute<W: Write>(
    command: Command,
    registry: &ComputationRegistry,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::Run {
            model,
            location,
            pretty,
            lenient,
            report,
        } => {
            let computation = registry.require(&model)?;
            let handle = location.handle(Some(&model), pretty)?;
            let config = if lenient {
                AdapterConfig::lenient()
            } else {
                AdapterConfig::strict()
            };
            let run = run_document(&handle, computation.as_ref(), &Adapter::new(config))?;
            run.write_to(out)?;
            if let Some(path) = report {
                run.save_to_file(&path)
                    .with_context(|| format!("save report to {}", path.display()))?;
            }
        }
        Command::Inspect { model, location } => {
            let handle = location.handle(model.as_deref(), false)?;
            let doc = handle
                .load()
                .with_context(|| format!("load {}", handle.describe()))?;
            let mode = detect_mode(&doc)?;
            writeln!(out, "document: {}", handle.describe())?;
            writeln!(out, "mode:     {mode}")?;
            for input in &doc.input_params {
                writeln!(out, "input:    {} ({} values)", input.name, input.values.len())?;
            }
            for output in &doc.output_params {
                writeln!(out, "output:   {} ({} values)", output.name, output.values.len())?;
            }
        }
        Command::List => {
            for name in registry.names() {
                writeln!(out, "{name}")?;
            }
        }
    }
    Ok(())
}

/// Parse `args`, execute against the stock computations and return the exit
/// status: [`EXIT_OK`], [`EXIT_FAILURE`] or [`EXIT_USAGE`].
pub fn run<I, T, W>(args: I, out: &mut W) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { EXIT_USAGE } else { EXIT_OK };
        }
    };
    init_logging(cli.verbose);
    let registry = ComputationRegistry::with_builtins();
    match execute(cli.command, &registry, out) {
        Ok(()) => EXIT_OK,
        Err(e) => {
            error!("{e:#}");
            EXIT_FAILURE
        }
    }
}
