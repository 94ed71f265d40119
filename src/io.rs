// File-level helpers for map units.
//
// `read_map()`, `write_map()`, `rotate_file()` and `check_file()` wrap the
// in-memory codec with buffered file I/O. SHA-256 digests of the input and
// output are computed along the way when the `file-io` feature is enabled.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[cfg(feature = "file-io")]
use sha2::Digest;

use crate::config::DecodeOptions;
use crate::lcf::LcfError;
use crate::lmu::Map;
use crate::rotate::Rotation;

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Statistics returned by `rotate_file()`.
#[derive(Debug, Clone)]
pub struct RotateStats {
    pub rotation: Rotation,
    /// Input file size in bytes.
    pub input_size: u64,
    /// Output file size in bytes.
    pub output_size: u64,
    /// Map dimensions before rotation.
    pub width: u32,
    pub height: u32,
    /// Cells per tile layer.
    pub tiles: u64,
    pub events: u64,
    /// Pages whose facing was turned.
    pub pages: u64,
    /// Lower-layer cells with an unrecognised tile code.
    pub unknown_tiles: u64,
    /// SHA-256 of the input file (if `file-io` feature is enabled).
    pub input_sha256: Option<[u8; 32]>,
    /// SHA-256 of the output file (if `file-io` feature is enabled).
    pub output_sha256: Option<[u8; 32]>,
}

/// Statistics returned by `check_file()`.
#[derive(Debug, Clone)]
pub struct CheckStats {
    pub size: u64,
    pub width: u32,
    pub height: u32,
    pub events: u64,
    pub pages: u64,
    /// Whether re-encoding the decoded map reproduced the file exactly.
    pub identical: bool,
    /// Offset of the first byte that differs, if any.
    pub first_difference: Option<u64>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for file operations.
#[derive(Debug)]
pub enum IoError {
    /// I/O error (file open, read, write).
    Io(io::Error),
    /// The file is not a valid map unit, or the map could not be rotated.
    Map(LcfError),
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Map(e) => write!(f, "map error: {e}"),
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Map(e) => Some(e),
        }
    }
}

impl From<io::Error> for IoError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<LcfError> for IoError {
    fn from(e: LcfError) -> Self {
        Self::Map(e)
    }
}

// ---------------------------------------------------------------------------
// Default buffer size
// ---------------------------------------------------------------------------

const BUF_SIZE: usize = 64 * 1024; // 64 KiB

// ---------------------------------------------------------------------------
// read_map / write_map
// ---------------------------------------------------------------------------

/// Read and decode a map unit. The map is named after the file.
pub fn read_map(path: &Path, opts: &DecodeOptions) -> Result<Map, IoError> {
    let bytes = std::fs::read(path)?;
    decode_named(&bytes, path, opts)
}

fn decode_named(bytes: &[u8], path: &Path, opts: &DecodeOptions) -> Result<Map, IoError> {
    let map = Map::decode(bytes, opts)?;
    Ok(match path.file_name() {
        Some(name) => map.with_name(name.to_string_lossy()),
        None => map,
    })
}

/// Encode `map` and write it to `path`. Returns the number of bytes written.
pub fn write_map(path: &Path, map: &Map) -> Result<u64, IoError> {
    let bytes = map.to_bytes();
    let mut writer = BufWriter::with_capacity(BUF_SIZE, File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(bytes.len() as u64)
}

// ---------------------------------------------------------------------------
// rotate_file
// ---------------------------------------------------------------------------

/// Rotate the map in `input_path` clockwise and write it to `output_path`.
///
/// The input is decoded completely and rotated before the output file is
/// created, so a map that fails to decode or rotate leaves no output behind.
pub fn rotate_file(
    input_path: &Path,
    output_path: &Path,
    rotation: Rotation,
    opts: &DecodeOptions,
) -> Result<RotateStats, IoError> {
    let input = std::fs::read(input_path)?;
    let input_size = input.len() as u64;

    #[cfg(feature = "file-io")]
    let input_sha256 = Some(sha2::Sha256::digest(&input).into());
    #[cfg(not(feature = "file-io"))]
    let input_sha256: Option<[u8; 32]> = None;

    let mut map = decode_named(&input, input_path, opts)?;
    let width = map.width()?;
    let height = map.height()?;
    let report = map.rotate(rotation)?;
    let output = map.to_bytes();

    let output_file = File::create(output_path)?;
    let mut output_writer = BufWriter::with_capacity(BUF_SIZE, output_file);

    #[cfg(feature = "file-io")]
    let output_sha256 = {
        let mut output_hasher = sha2::Sha256::new();
        let mut hashing_writer = HashingWriter {
            inner: &mut output_writer,
            hasher: &mut output_hasher,
        };
        hashing_writer.write_all(&output)?;
        Some(output_hasher.finalize().into())
    };
    #[cfg(not(feature = "file-io"))]
    let output_sha256: Option<[u8; 32]> = {
        output_writer.write_all(&output)?;
        None
    };

    output_writer.flush()?;

    Ok(RotateStats {
        rotation,
        input_size,
        output_size: output.len() as u64,
        width,
        height,
        tiles: report.tiles as u64,
        events: report.events as u64,
        pages: report.pages as u64,
        unknown_tiles: report.unknown_tiles() as u64,
        input_sha256,
        output_sha256,
    })
}

// ---------------------------------------------------------------------------
// check_file
// ---------------------------------------------------------------------------

/// Decode a map unit and re-encode it, reporting whether the bytes survive
/// unchanged.
pub fn check_file(path: &Path, opts: &DecodeOptions) -> Result<CheckStats, IoError> {
    let bytes = std::fs::read(path)?;
    let map = decode_named(&bytes, path, opts)?;
    let encoded = map.to_bytes();

    let first_difference = bytes
        .iter()
        .zip(&encoded)
        .position(|(a, b)| a != b)
        .or_else(|| (bytes.len() != encoded.len()).then(|| bytes.len().min(encoded.len())))
        .map(|offset| offset as u64);

    Ok(CheckStats {
        size: bytes.len() as u64,
        width: map.width()?,
        height: map.height()?,
        events: map.events().len() as u64,
        pages: map.events().iter().map(|e| e.pages().len() as u64).sum(),
        identical: first_difference.is_none(),
        first_difference,
    })
}

// ---------------------------------------------------------------------------
// Hashing writer (used with file-io feature)
// ---------------------------------------------------------------------------

#[cfg(feature = "file-io")]
struct HashingWriter<'a, W: Write> {
    inner: &'a mut W,
    hasher: &'a mut sha2::Sha256,
}

#[cfg(feature = "file-io")]
impl<W: Write> Write for HashingWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Lowercase hex rendering of a digest.
pub fn hex_digest(digest: &[u8; 32]) -> String {
    use std::fmt::Write as _;
    let mut out = String::with_capacity(64);
    for byte in digest {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
