// LCF objects: a header followed by data items in ascending id order,
// closed by a `00` terminator byte.
//
// Sub-objects (array elements) carry a one-VLQ header holding their index in
// the parent list. The top-level map unit instead carries a length-prefixed
// header (`0A "LcfMapUnit"`), and its body may also end at the end of the
// buffer with no terminator.

use std::collections::BTreeMap;

use log::{debug, warn};

use super::error::{LcfError, Result};
use super::item::DataItem;
use super::vlq;

/// Byte closing every object body.
pub const OBJECT_TERMINATOR: u8 = 0x00;

/// How an object's header is laid out in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    /// A single VLQ (the object's index within its parent array).
    Index,
    /// `VLQ n` followed by `n` raw bytes. Used by top-level objects.
    LengthPrefixed,
}

/// A decoded LCF object.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Object {
    header: Vec<u8>,
    items: BTreeMap<u8, DataItem>,
    /// Set when the body was closed by the end of the buffer, not by `00`.
    unterminated: bool,
}

impl Object {
    /// Create an object from a raw header and no items.
    pub fn new(header: Vec<u8>) -> Self {
        Self {
            header,
            items: BTreeMap::new(),
            unterminated: false,
        }
    }

    /// Create a sub-object whose header is `index` encoded as a VLQ.
    pub fn with_index(index: u64) -> Self {
        Self::new(vlq::encode(index))
    }

    /// Create a top-level object with a length-prefixed `signature` header.
    pub fn with_signature(signature: &[u8]) -> Self {
        let mut header = vlq::encode(signature.len() as u64);
        header.extend_from_slice(signature);
        Self::new(header)
    }

    // -----------------------------------------------------------------------
    // Decoding
    // -----------------------------------------------------------------------

    /// Decode an object starting at `buf[offset]`.
    /// Returns the object and the number of bytes consumed, terminator
    /// included.
    ///
    /// A `LengthPrefixed` object is top-level, so reaching the end of `buf`
    /// on an item boundary also closes its body. The object remembers this
    /// and re-encodes without a terminator.
    pub fn decode(buf: &[u8], offset: usize, kind: HeaderKind) -> Result<(Self, usize)> {
        let header_len = Self::decode_header(buf, offset, kind)?;
        let header = buf[offset..offset + header_len].to_vec();
        let allow_eof = kind == HeaderKind::LengthPrefixed;
        let (items, body_len, terminated) = Self::scan_body(buf, offset + header_len, allow_eof)?;
        let object = Self {
            header,
            items,
            unterminated: !terminated,
        };
        Ok((object, header_len + body_len))
    }

    /// Work out the length of the header at `offset`.
    fn decode_header(buf: &[u8], offset: usize, kind: HeaderKind) -> Result<usize> {
        match kind {
            HeaderKind::Index => vlq::span(buf, offset),
            HeaderKind::LengthPrefixed => {
                let (len, len_size) = vlq::decode_usize(buf, offset)?;
                let end = offset
                    .checked_add(len_size)
                    .and_then(|n| n.checked_add(len))
                    .filter(|&end| end <= buf.len())
                    .ok_or(LcfError::OutOfBounds {
                        offset: offset + len_size,
                        len: buf.len(),
                    })?;
                Ok(end - offset)
            }
        }
    }

    /// Decode items from `offset` until a `00` byte, which is consumed.
    /// Returns the items and the number of bytes consumed.
    pub fn decode_body(buf: &[u8], offset: usize) -> Result<(BTreeMap<u8, DataItem>, usize)> {
        let (items, consumed, _) = Self::scan_body(buf, offset, false)?;
        Ok((items, consumed))
    }

    /// Body scan shared by `decode` and `decode_body`. With `allow_eof`, the
    /// end of `buf` stands in for the terminator. The flag returned is
    /// whether a `00` was actually read.
    fn scan_body(
        buf: &[u8],
        offset: usize,
        allow_eof: bool,
    ) -> Result<(BTreeMap<u8, DataItem>, usize, bool)> {
        let mut items = BTreeMap::new();
        let mut pos = offset;
        loop {
            match buf.get(pos) {
                None if allow_eof && pos == buf.len() => {
                    debug!("object at {offset} ends with the buffer, no terminator");
                    return Ok((items, pos - offset, false));
                }
                None => return Err(LcfError::UnterminatedObject { offset }),
                Some(&OBJECT_TERMINATOR) => break,
                Some(_) => {
                    let item = DataItem::decode(buf, pos)?;
                    pos += item.size();
                    if let Some(old) = items.insert(item.id(), item) {
                        warn!(
                            "duplicate item {:#04X} at offset {pos}; keeping the later one",
                            old.id()
                        );
                    }
                }
            }
        }
        Ok((items, pos + 1 - offset, true))
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Ids from `required` that this object does not hold.
    pub fn missing_ids(&self, required: &[u8]) -> Vec<u8> {
        required
            .iter()
            .copied()
            .filter(|id| !self.items.contains_key(id))
            .collect()
    }

    /// Check that every id in `required` is present. Each missing id is
    /// logged against `context`; the caller decides whether to go on.
    pub fn validate(&self, required: &[u8], context: &str) -> bool {
        let missing = self.missing_ids(required);
        for id in &missing {
            warn!("{context}: failed to locate essential data item with id {id:#04X}");
        }
        missing.is_empty()
    }

    // -----------------------------------------------------------------------
    // Encoding
    // -----------------------------------------------------------------------

    /// Encoded size: header, every item, and the terminator if the object
    /// carries one.
    pub fn size(&self) -> usize {
        let terminator = usize::from(!self.unterminated);
        self.header.len() + self.items.values().map(DataItem::size).sum::<usize>() + terminator
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.reserve(self.size());
        out.extend_from_slice(&self.header);
        for item in self.items.values() {
            item.write_to(out);
        }
        if !self.unterminated {
            out.push(OBJECT_TERMINATOR);
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size());
        self.write_to(&mut out);
        out
    }

    // -----------------------------------------------------------------------
    // Items and header
    // -----------------------------------------------------------------------

    pub fn header(&self) -> &[u8] {
        &self.header
    }

    /// Whether the object is closed by a `00` byte when encoded.
    pub fn is_terminated(&self) -> bool {
        !self.unterminated
    }

    /// The header read as a VLQ. For sub-objects this is the index within the
    /// parent array.
    pub fn index(&self) -> Result<u64> {
        vlq::decode(&self.header, 0).map(|(value, _)| value)
    }

    pub fn get(&self, id: u8) -> Option<&DataItem> {
        self.items.get(&id)
    }

    pub fn contains(&self, id: u8) -> bool {
        self.items.contains_key(&id)
    }

    /// Insert `item`, replacing any item with the same id.
    pub fn insert(&mut self, item: DataItem) -> Option<DataItem> {
        self.items.insert(item.id(), item)
    }

    pub fn remove(&mut self, id: u8) -> Option<DataItem> {
        self.items.remove(&id)
    }

    /// Items in ascending id order.
    pub fn items(&self) -> impl Iterator<Item = &DataItem> {
        self.items.values()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
