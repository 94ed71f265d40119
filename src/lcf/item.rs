// Tagged data items: `[id][VLQ length][payload]`.
//
// An item keeps its exact encoded bytes. Typed views read from the payload
// without modifying it, and the constructors lay out the bytes for a new
// value, so re-encoding an item that was only read is always byte-identical.

use log::debug;

use super::error::{LcfError, Result};
use super::object::{HeaderKind, Object};
use super::vlq;

/// One `(id, length, payload)` record inside an [`Object`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataItem {
    /// Complete encoding: id, length VLQ, payload.
    raw: Vec<u8>,
    /// Index in `raw` at which the payload starts.
    payload_start: usize,
}

impl DataItem {
    // -----------------------------------------------------------------------
    // Decoding
    // -----------------------------------------------------------------------

    /// Decode the item starting at `buf[offset]`.
    pub fn decode(buf: &[u8], offset: usize) -> Result<Self> {
        let id = *buf.get(offset).ok_or(LcfError::OutOfBounds {
            offset,
            len: buf.len(),
        })?;
        let (declared, len_size) = vlq::decode_usize(buf, offset + 1)?;
        let payload_start = 1 + len_size;
        let available = buf.len() - (offset + payload_start);
        if declared > available {
            return Err(LcfError::TruncatedBuffer {
                id,
                offset,
                declared,
                available,
            });
        }
        let end = offset + payload_start + declared;
        Ok(Self {
            raw: buf[offset..end].to_vec(),
            payload_start,
        })
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Build an item holding `payload` verbatim.
    pub fn from_bytes(id: u8, payload: &[u8]) -> Self {
        let mut raw = Vec::with_capacity(1 + vlq::MAX_VLQ_LEN + payload.len());
        raw.push(id);
        vlq::write_u64(&mut raw, payload.len() as u64);
        let payload_start = raw.len();
        raw.extend_from_slice(payload);
        Self { raw, payload_start }
    }

    /// Build an item whose payload is a single VLQ integer.
    pub fn from_integer(id: u8, value: u64) -> Self {
        Self::from_bytes(id, &vlq::encode(value))
    }

    /// Build an item from text, one byte per character (Latin-1).
    /// Characters above U+00FF are replaced with `?`.
    pub fn from_text(id: u8, text: &str) -> Self {
        let bytes: Vec<u8> = text
            .chars()
            .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
            .collect();
        Self::from_bytes(id, &bytes)
    }

    /// Build an item from little-endian 16-bit values (tile layers).
    pub fn from_u16_array(id: u8, values: &[u16]) -> Self {
        let mut payload = Vec::with_capacity(values.len() * 2);
        for v in values {
            payload.extend_from_slice(&v.to_le_bytes());
        }
        Self::from_bytes(id, &payload)
    }

    /// Build an object-array item: `VLQ count` followed by each object.
    pub fn from_objects<'a, I>(id: u8, objects: I) -> Self
    where
        I: IntoIterator<Item = &'a Object>,
        I::IntoIter: ExactSizeIterator,
    {
        let objects = objects.into_iter();
        let mut payload = Vec::new();
        vlq::write_u64(&mut payload, objects.len() as u64);
        for object in objects {
            object.write_to(&mut payload);
        }
        Self::from_bytes(id, &payload)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn id(&self) -> u8 {
        self.raw[0]
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.raw.len() - self.payload_start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total encoded size, metadata included.
    pub fn size(&self) -> usize {
        self.raw.len()
    }

    /// The complete encoding of this item.
    pub fn to_bytes(&self) -> &[u8] {
        &self.raw
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.raw);
    }

    // -----------------------------------------------------------------------
    // Typed views
    // -----------------------------------------------------------------------

    pub fn as_bytes(&self) -> &[u8] {
        &self.raw[self.payload_start..]
    }

    /// The payload read as a VLQ. Bytes after the VLQ are ignored.
    pub fn as_integer(&self) -> Result<u64> {
        vlq::decode(self.as_bytes(), 0).map(|(value, _)| value)
    }

    /// The payload as text, one character per byte.
    pub fn as_string(&self) -> String {
        self.as_bytes().iter().map(|&b| char::from(b)).collect()
    }

    /// The payload as little-endian 16-bit values. A trailing odd byte is
    /// ignored.
    pub fn as_u16_array(&self) -> Vec<u16> {
        self.as_bytes()
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect()
    }

    /// The payload as a counted array of sub-objects.
    ///
    /// `context` names the owning object in the error raised when the decoded
    /// objects do not cover the payload exactly.
    pub fn as_object_array(&self, context: &str) -> Result<Vec<Object>> {
        let payload = self.as_bytes();
        let (count, count_len) = vlq::decode_usize(payload, 0)?;

        // Every object takes at least two bytes (header + terminator).
        let mut objects = Vec::with_capacity(count.min(payload.len() / 2));
        let mut offset = count_len;
        for _ in 0..count {
            let (object, consumed) = Object::decode(payload, offset, HeaderKind::Index)?;
            offset += consumed;
            objects.push(object);
        }

        if offset != payload.len() {
            return Err(LcfError::StructuralParse {
                context: context.to_string(),
                id: self.id(),
                count,
                consumed: offset,
                expected: payload.len(),
            });
        }

        debug!(
            "parsed {count} objects from {context}/item {:#04X}",
            self.id()
        );
        Ok(objects)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
