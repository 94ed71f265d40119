// Error type shared by the LCF codec and the map views built on it.

use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LcfError {
    /// A VLQ read started at or ran past the end of the buffer.
    #[error("read out of bounds at offset {offset} (buffer length {len})")]
    OutOfBounds { offset: usize, len: usize },

    /// A VLQ needs more than 64 bits.
    #[error("VLQ at offset {offset} overflows 64 bits")]
    VlqOverflow { offset: usize },

    /// A data item declares more payload than the buffer holds.
    #[error(
        "item {id:#04X} at offset {offset} declares {declared} payload bytes, {available} available"
    )]
    TruncatedBuffer {
        id: u8,
        offset: usize,
        declared: usize,
        available: usize,
    },

    /// An object body reached the end of the buffer before its `00` terminator.
    #[error("object starting at offset {offset} is not terminated")]
    UnterminatedObject { offset: usize },

    /// The objects inside an object-array item do not add up to its payload
    /// length. The decoder has lost sync with the data.
    #[error(
        "{context}/item {id:#04X}: {count} objects consumed {consumed} bytes, payload is {expected} bytes"
    )]
    StructuralParse {
        context: String,
        id: u8,
        count: usize,
        consumed: usize,
        expected: usize,
    },

    #[error("{context}: missing required item(s) {}", format_ids(.missing))]
    MissingRequiredField { context: String, missing: Vec<u8> },

    /// A tile layer's byte length disagrees with the map dimensions.
    #[error("tile layer {id:#04X}: expected {expected} bytes, found {actual}")]
    LayerSizeMismatch {
        id: u8,
        expected: usize,
        actual: usize,
    },

    #[error("{context}/item {id:#04X}: value {value} is out of range")]
    ValueOutOfRange { context: String, id: u8, value: u64 },

    /// An event sits outside the map it is being rotated with.
    #[error("{context}: position ({x}, {y}) lies outside the {width}x{height} map")]
    EventOutOfBounds {
        context: String,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("{len} trailing bytes after the map at offset {offset}")]
    TrailingBytes { offset: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, LcfError>;

fn format_ids(ids: &[u8]) -> String {
    let mut out = String::new();
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{id:#04X}");
    }
    out
}
