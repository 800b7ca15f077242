use crate::document::ParameterDocument;
use crate::io::compression::{auto_detect_reader, encode_for_path};
use crate::io::{DocumentHandle, parse_document, render_document};
use anyhow::{Context, Result};
use std::fs::{File, create_dir_all};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// A document stored as a JSON file.
///
/// The file is compressed when its extension names a codec (see
/// [`crate::io::compression`]). Stores write a sibling temporary file and
/// rename it over the target, so readers never observe a half-written file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileDocument {
    path: PathBuf,
    pretty: bool,
}

impl FileDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: false,
        }
    }

    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentHandle for FileDocument {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<ParameterDocument> {
        let path = &self.path;
        let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
        let mut rdr = auto_detect_reader(f, path)
            .with_context(|| format!("setup decompression for {}", path.display()))?;
        let mut text = String::new();
        rdr.read_to_string(&mut text)
            .with_context(|| format!("read {}", path.display()))?;
        let doc = parse_document(&text).with_context(|| format!("in {}", path.display()))?;
        debug!(path = %path.display(), inputs = doc.input_params.len(), "document loaded");
        Ok(doc)
    }

    fn store(&self, doc: &ParameterDocument) -> Result<()> {
        let path = &self.path;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        create_dir_all(dir).with_context(|| format!("mkdir -p {}", dir.display()))?;

        let text = render_document(doc, self.pretty)?;
        let bytes = encode_for_path(text.into_bytes(), path)?;

        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("create temporary file in {}", dir.display()))?;
        tmp.write_all(&bytes)
            .with_context(|| format!("write temporary file for {}", path.display()))?;
        tmp.as_file()
            .sync_all()
            .with_context(|| format!("sync temporary file for {}", path.display()))?;
        tmp.persist(path)
            .with_context(|| format!("replace {}", path.display()))?;
        debug!(path = %path.display(), bytes = bytes.len(), "document stored");
        Ok(())
    }
}
