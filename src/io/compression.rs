//! Transparent compression for document files.
//!
//! The codec is picked from the file extension first (`.gz`, `.zst`), falling
//! back to magic bytes when reading. Built-in codecs depend on feature flags:
//! - **Gzip** (`.gz`) - via `flate2` (feature: `compression-gzip`)
//! - **Zstd** (`.zst`) - via `zstd` (feature: `compression-zstd`)
//!
//! Further codecs can be added with [`register_codec`].
//!
//! Documents are small and written atomically, so writing compresses a whole
//! buffer at once ([`CompressionCodec::encode`]) instead of wrapping a stream.

use anyhow::{Context, Result};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

static CODEC_REGISTRY: LazyLock<RwLock<Vec<Arc<dyn CompressionCodec>>>> =
    LazyLock::new(|| RwLock::new(builtin_codecs()));

fn builtin_codecs() -> Vec<Arc<dyn CompressionCodec>> {
    vec![
        #[cfg(feature = "compression-gzip")]
        Arc::new(GzipCodec),
        #[cfg(feature = "compression-zstd")]
        Arc::new(ZstdCodec),
    ]
}

fn registry() -> Vec<Arc<dyn CompressionCodec>> {
    CODEC_REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Register a custom compression codec globally.
pub fn register_codec(codec: Arc<dyn CompressionCodec>) {
    CODEC_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .push(codec);
}

/// Pluggable compression codec.
pub trait CompressionCodec: Send + Sync {
    /// Human-readable codec name (e.g., "gzip", "zstd").
    fn name(&self) -> &str;

    /// Lowercase file extensions with the leading dot (e.g., `&[".gz"]`).
    fn extensions(&self) -> &[&str];

    /// Magic byte signature, if the format has one.
    fn magic_bytes(&self) -> Option<&[u8]>;

    /// Wrap a reader with decompression.
    fn wrap_reader_dyn(&self, reader: Box<dyn Read>) -> std::io::Result<Box<dyn Read>>;

    /// Compress a complete buffer.
    fn encode(&self, data: &[u8]) -> std::io::Result<Vec<u8>>;
}

/// Codec whose extension matches `path`, compared case-insensitively.
pub fn codec_for_path(path: impl AsRef<Path>) -> Option<Arc<dyn CompressionCodec>> {
    let path_str = path.as_ref().to_string_lossy().to_lowercase();
    registry()
        .into_iter()
        .find(|codec| codec.extensions().iter().any(|ext| path_str.ends_with(ext)))
}

fn detect_from_magic<R: BufRead>(reader: &mut R) -> Option<Arc<dyn CompressionCodec>> {
    let buf = reader.fill_buf().ok()?;
    if buf.is_empty() {
        return None;
    }
    registry()
        .into_iter()
        .find(|codec| codec.magic_bytes().is_some_and(|magic| buf.starts_with(magic)))
}

/// Wrap `reader` with decompression if its path or leading bytes call for it.
///
/// # Errors
/// Fails when the detected codec cannot initialise its decoder.
pub fn auto_detect_reader<R: Read + 'static>(
    reader: R,
    path_hint: impl AsRef<Path>,
) -> Result<Box<dyn Read>> {
    if let Some(codec) = codec_for_path(&path_hint) {
        return codec
            .wrap_reader_dyn(Box::new(reader))
            .with_context(|| format!("wrap reader with {} codec", codec.name()));
    }

    let mut buf_reader = BufReader::new(reader);
    if let Some(codec) = detect_from_magic(&mut buf_reader) {
        return codec
            .wrap_reader_dyn(Box::new(buf_reader))
            .with_context(|| format!("wrap reader with {} codec", codec.name()));
    }

    Ok(Box::new(buf_reader))
}

/// Compress `data` if the extension of `path_hint` names a codec; otherwise
/// return it unchanged.
///
/// # Errors
/// Fails when the codec fails to compress.
pub fn encode_for_path(data: Vec<u8>, path_hint: impl AsRef<Path>) -> Result<Vec<u8>> {
    match codec_for_path(&path_hint) {
        Some(codec) => codec
            .encode(&data)
            .with_context(|| format!("compress with {} codec", codec.name())),
        None => Ok(data),
    }
}

#[cfg(feature = "compression-gzip")]
struct GzipCodec;

#[cfg(feature = "compression-gzip")]
impl CompressionCodec for GzipCodec {
    fn name(&self) -> &str {
        "gzip"
    }

    fn extensions(&self) -> &[&str] {
        &[".gz", ".gzip"]
    }

    fn magic_bytes(&self) -> Option<&[u8]> {
        Some(&[0x1f, 0x8b])
    }

    fn wrap_reader_dyn(&self, reader: Box<dyn Read>) -> std::io::Result<Box<dyn Read>> {
        use flate2::read::GzDecoder;
        Ok(Box::new(GzDecoder::new(reader)))
    }

    fn encode(&self, data: &[u8]) -> std::io::Result<Vec<u8>> {
        use flate2::Compression;
        use flate2::write::GzEncoder;
        use std::io::Write;
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data)?;
        encoder.finish()
    }
}

#[cfg(feature = "compression-zstd")]
struct ZstdCodec;

#[cfg(feature = "compression-zstd")]
impl CompressionCodec for ZstdCodec {
    fn name(&self) -> &str {
        "zstd"
    }

    fn extensions(&self) -> &[&str] {
        &[".zst", ".zstd"]
    }

    fn magic_bytes(&self) -> Option<&[u8]> {
        Some(&[0x28, 0xb5, 0x2f, 0xfd])
    }

    fn wrap_reader_dyn(&self, reader: Box<dyn Read>) -> std::io::Result<Box<dyn Read>> {
        zstd::stream::read::Decoder::new(reader).map(|d| Box::new(d) as Box<dyn Read>)
    }

    fn encode(&self, data: &[u8]) -> std::io::Result<Vec<u8>> {
        zstd::stream::encode_all(data, 3)
    }
}
