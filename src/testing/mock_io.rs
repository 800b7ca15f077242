//! Document handles for tests that should not touch real files, and
//! temporary document files for tests that should.

use crate::document::ParameterDocument;
use crate::io::{DocumentHandle, FileDocument, parse_document, render_document};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tempfile::TempDir;

/// A document held as JSON text in memory.
///
/// Every store replaces the text and bumps [`MemoryDocument::store_count`],
/// so tests can check that a failed run stored nothing.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    text: Mutex<String>,
    stores: Mutex<usize>,
}

impl MemoryDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Mutex::new(text.into()),
            stores: Mutex::new(0),
        }
    }

    /// Seed with a serialized document.
    ///
    /// # Errors
    /// Fails only if serialization fails.
    pub fn from_document(doc: &ParameterDocument) -> Result<Self> {
        Ok(Self::new(render_document(doc, false)?))
    }

    /// Current JSON text.
    pub fn text(&self) -> String {
        self.text
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn store_count(&self) -> usize {
        *self.stores.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DocumentHandle for MemoryDocument {
    fn describe(&self) -> String {
        "<memory>".to_string()
    }

    fn load(&self) -> Result<ParameterDocument> {
        parse_document(&self.text())
    }

    fn store(&self, doc: &ParameterDocument) -> Result<()> {
        let text = render_document(doc, false)?;
        *self.text.lock().unwrap_or_else(PoisonError::into_inner) = text;
        *self.stores.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}

/// A temporary directory holding one document file, deleted when dropped.
pub struct TempDocument {
    dir: TempDir,
    path: PathBuf,
}

impl TempDocument {
    /// Write `doc` to `file_name` inside a fresh temporary directory.
    ///
    /// # Errors
    /// Fails when the directory or the file cannot be created.
    pub fn new(file_name: &str, doc: &ParameterDocument) -> Result<Self> {
        let dir = TempDir::new().context("create temporary directory")?;
        let path = dir.path().join(file_name);
        FileDocument::new(&path).store(doc)?;
        Ok(Self { dir, path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn handle(&self) -> FileDocument {
        FileDocument::new(&self.path)
    }
}
