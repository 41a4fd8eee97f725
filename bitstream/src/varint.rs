//! Base-128 variable-length integers and zigzag signed mapping.
//!
//! A VarUInt carries 7 payload bits per byte, least-significant group first,
//! with the high bit set on every byte except the last. Encodings are always
//! canonical (fewest bytes), and a 64-bit value never needs more than
//! [`MAX_VARINT_BYTES`] bytes.

use crate::bytes::ByteReader;
use crate::error::{BitError, BitResult};
use crate::fixed;
use crate::sink::OutputSink;

/// Maximum encoded size of a 64-bit VarUInt.
pub const MAX_VARINT_BYTES: usize = 10;

const CONTINUATION: u8 = 0x80;
const PAYLOAD_MASK: u8 = 0x7F;

/// Encodes `value` into `out` and returns the number of bytes used.
pub fn encode_var_uint(mut value: u64, out: &mut [u8; MAX_VARINT_BYTES]) -> usize {
    let mut len = 0;
    while value >= u64::from(CONTINUATION) {
        out[len] = CONTINUATION | (value as u8 & PAYLOAD_MASK);
        value >>= 7;
        len += 1;
    }
    out[len] = value as u8;
    len + 1
}

/// Decodes a VarUInt from the start of `bytes`.
///
/// Returns the value and the number of bytes it occupied. Fails with
/// [`BitError::UnexpectedEof`] if `bytes` ends before a terminator, and with
/// [`BitError::InvalidVarint`] if no terminator appears within
/// [`MAX_VARINT_BYTES`] or the tenth byte carries bits beyond 64.
pub fn decode_var_uint(bytes: &[u8]) -> BitResult<(u64, usize)> {
    let mut result = 0u64;
    for (i, &byte) in bytes.iter().take(MAX_VARINT_BYTES).enumerate() {
        let payload = u64::from(byte & PAYLOAD_MASK);
        // The tenth group holds only bit 63.
        if i == MAX_VARINT_BYTES - 1 && payload > 1 {
            return Err(BitError::InvalidVarint);
        }
        result |= payload << (7 * i);
        if byte & CONTINUATION == 0 {
            return Ok((result, i + 1));
        }
    }
    if bytes.len() < MAX_VARINT_BYTES {
        return Err(BitError::UnexpectedEof {
            requested: bytes.len() + 1,
            available: bytes.len(),
        });
    }
    Err(BitError::InvalidVarint)
}

/// Returns the number of bytes the VarUInt encoding of `value` occupies.
#[must_use]
pub const fn estimate_var_uint_size(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    if bits == 0 {
        1
    } else {
        (bits + 6) / 7
    }
}

/// Writes `value` as a canonical VarUInt.
pub fn write_var_uint<S: OutputSink + ?Sized>(sink: &mut S, value: u64) -> BitResult<()> {
    let mut buf = [0u8; MAX_VARINT_BYTES];
    let len = encode_var_uint(value, &mut buf);
    fixed::write_bytes(sink, &buf[..len])
}

/// Reads a VarUInt. The reader does not advance on failure.
pub fn read_var_uint(reader: &mut ByteReader<'_>) -> BitResult<u64> {
    let (value, len) = decode_var_uint(reader.unread())?;
    reader.skip(len)?;
    Ok(value)
}

/// Maps a signed value onto the unsigned range: 0, -1, 1, -2, ... become 0, 1, 2, 3, ...
#[inline]
#[must_use]
pub const fn encode_zigzag(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`encode_zigzag`].
#[inline]
#[must_use]
pub const fn decode_zigzag(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Writes a signed value as a zigzag-mapped VarUInt.
pub fn write_var_int<S: OutputSink + ?Sized>(sink: &mut S, value: i64) -> BitResult<()> {
    write_var_uint(sink, encode_zigzag(value))
}

/// Reads a zigzag-mapped VarUInt as a signed value.
pub fn read_var_int(reader: &mut ByteReader<'_>) -> BitResult<i64> {
    read_var_uint(reader).map(decode_zigzag)
}
