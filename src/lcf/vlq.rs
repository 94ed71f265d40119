// LCF variable-length quantity (VLQ) encoding.
//
// Base-128, big-endian: most-significant group first.
// Each byte has bit 7 set except the final byte. Zero encodes as a single
// `00` byte.

use super::error::{LcfError, Result};

/// Maximum encoded length for a 64-bit value (ceil(64/7) = 10).
pub const MAX_VLQ_LEN: usize = 10;

/// Overflow guard for the 64-bit accumulator: if these bits are set before a
/// shift, the next `<< 7` would overflow.
const U64_OVERFLOW_MASK: u64 = 0xFE00_0000_0000_0000;

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encode a `u64` into the tail of `buf`.
/// Returns the number of bytes written (1..=10); the encoding occupies
/// `buf[MAX_VLQ_LEN - len..]`.
#[inline]
pub fn encode_u64(mut num: u64, buf: &mut [u8; MAX_VLQ_LEN]) -> usize {
    let mut i = MAX_VLQ_LEN;
    loop {
        i -= 1;
        buf[i] = (num as u8 & 0x7F) | 0x80;
        num >>= 7;
        if num == 0 {
            break;
        }
    }
    buf[MAX_VLQ_LEN - 1] &= 0x7F; // clear MSB on last byte
    MAX_VLQ_LEN - i
}

/// Append the encoding of `num` to `out`.
pub fn write_u64(out: &mut Vec<u8>, num: u64) {
    let mut buf = [0u8; MAX_VLQ_LEN];
    let len = encode_u64(num, &mut buf);
    out.extend_from_slice(&buf[MAX_VLQ_LEN - len..]);
}

/// Encode `num` into a fresh buffer.
pub fn encode(num: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(num));
    write_u64(&mut out, num);
    out
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode a VLQ starting at `buf[offset]`.
/// Returns `(value, bytes_consumed)`.
pub fn decode(buf: &[u8], offset: usize) -> Result<(u64, usize)> {
    let data = buf.get(offset..).filter(|d| !d.is_empty()).ok_or(
        LcfError::OutOfBounds {
            offset,
            len: buf.len(),
        },
    )?;

    let mut val: u64 = 0;
    for (i, &byte) in data.iter().enumerate() {
        if val & U64_OVERFLOW_MASK != 0 {
            return Err(LcfError::VlqOverflow { offset });
        }
        val = (val << 7) | u64::from(byte & 0x7F);
        if byte & 0x80 == 0 {
            return Ok((val, i + 1));
        }
    }
    Err(LcfError::OutOfBounds {
        offset: buf.len(),
        len: buf.len(),
    })
}

/// Decode a VLQ at `offset` and narrow it to `usize`.
pub fn decode_usize(buf: &[u8], offset: usize) -> Result<(usize, usize)> {
    let (val, len) = decode(buf, offset)?;
    let val = usize::try_from(val).map_err(|_| LcfError::VlqOverflow { offset })?;
    Ok((val, len))
}

/// Length in bytes of the VLQ starting at `offset`, without decoding it.
pub fn span(buf: &[u8], offset: usize) -> Result<usize> {
    decode(buf, offset).map(|(_, len)| len)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Encoded byte length of `num`: `ceil(significant_bits / 7)`, minimum 1.
#[inline]
pub fn encoded_len(num: u64) -> usize {
    let bits = 64 - num.leading_zeros();
    bits.max(1).div_ceil(7) as usize
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
