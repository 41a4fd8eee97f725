//! Length prefixes for variable-size payloads.
//!
//! The prefix kind is not self-describing on the wire: reader and writer must
//! agree on it out of band. Every decoded length is capped at `i32::MAX`
//! regardless of kind.

use bitstream::varint::MAX_VARINT_BYTES;
use bitstream::{estimate_var_uint_size, fixed, ByteReader, OutputSink};

use crate::error::{LimitKind, WireError, WireResult};

/// Largest length any prefix kind decodes to.
pub const MAX_DECODED_LEN: usize = i32::MAX as usize;

/// Encoding used for a length or item count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum LenPrefix {
    /// One byte, lengths up to 255.
    U8 = 0,
    /// Two little-endian bytes, lengths up to 65535.
    U16 = 1,
    /// Four little-endian bytes, lengths up to `i32::MAX`.
    U32 = 2,
    /// A VarUInt.
    #[default]
    Var = 3,
}

impl LenPrefix {
    /// Parses a prefix kind from its configuration byte.
    pub fn from_raw(raw: u8) -> WireResult<Self> {
        match raw {
            0 => Ok(Self::U8),
            1 => Ok(Self::U16),
            2 => Ok(Self::U32),
            3 => Ok(Self::Var),
            _ => {
                tracing::debug!(raw, "unknown length prefix kind");
                Err(WireError::UnknownLenPrefix { raw })
            }
        }
    }

    /// Returns the configuration byte for this kind.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Returns the largest length this kind accepts on write.
    #[must_use]
    pub const fn max_len(self) -> u64 {
        match self {
            Self::U8 => u8::MAX as u64,
            Self::U16 => u16::MAX as u64,
            Self::U32 => i32::MAX as u64,
            Self::Var => u64::MAX,
        }
    }
}

impl std::fmt::Display for LenPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::Var => "varint",
        };
        write!(f, "{name}")
    }
}

/// Writes `len` using the given prefix kind.
///
/// # Errors
///
/// Returns [`WireError::LengthOutOfRange`] if a fixed-width kind cannot hold
/// `len`. Nothing is written in that case.
#[allow(clippy::cast_possible_truncation)]
pub fn write_len<S: OutputSink + ?Sized>(
    sink: &mut S,
    len: usize,
    prefix: LenPrefix,
) -> WireResult<()> {
    let len = len as u64;
    let max = prefix.max_len();
    if len > max {
        return Err(WireError::LengthOutOfRange { len, prefix, max });
    }
    match prefix {
        LenPrefix::U8 => fixed::write_u8(sink, len as u8)?,
        LenPrefix::U16 => fixed::write_u16(sink, len as u16)?,
        LenPrefix::U32 => fixed::write_u32(sink, len as u32)?,
        LenPrefix::Var => bitstream::write_var_uint(sink, len)?,
    }
    Ok(())
}

/// Reads a length using the given prefix kind.
///
/// The reader does not advance on failure.
///
/// # Errors
///
/// Returns [`WireError::LengthOverflow`] if the decoded value exceeds
/// `i32::MAX`, or a bitstream error if the prefix itself is truncated or
/// malformed.
#[allow(clippy::cast_possible_truncation)]
pub fn read_len(reader: &mut ByteReader<'_>, prefix: LenPrefix) -> WireResult<usize> {
    let mut cursor = reader.clone();
    let value = match prefix {
        LenPrefix::U8 => u64::from(cursor.read_u8()?),
        LenPrefix::U16 => u64::from(cursor.read_u16()?),
        LenPrefix::U32 => u64::from(cursor.read_u32()?),
        LenPrefix::Var => cursor.read_var_uint()?,
    };
    if value > MAX_DECODED_LEN as u64 {
        tracing::debug!(value, %prefix, "decoded length overflows i32");
        return Err(WireError::LengthOverflow { value });
    }
    *reader = cursor;
    Ok(value as usize)
}

/// Reads a length and checks it against `limit` before returning.
///
/// The reader does not advance on failure.
pub(crate) fn read_len_limited(
    reader: &mut ByteReader<'_>,
    prefix: LenPrefix,
    kind: LimitKind,
    limit: usize,
) -> WireResult<usize> {
    let mut cursor = reader.clone();
    let len = read_len(&mut cursor, prefix)?;
    if len > limit {
        tracing::debug!(%kind, limit, actual = len, "decode limit exceeded");
        return Err(WireError::LimitsExceeded {
            kind,
            limit,
            actual: len,
        });
    }
    *reader = cursor;
    Ok(len)
}

/// Returns the number of bytes [`write_len`] emits for `len`.
///
/// Lengths a fixed kind cannot hold still report that kind's width.
#[must_use]
pub const fn estimate_len_size(len: usize, prefix: LenPrefix) -> usize {
    match prefix {
        LenPrefix::U8 => 1,
        LenPrefix::U16 => 2,
        LenPrefix::U32 => 4,
        LenPrefix::Var => estimate_var_uint_size(len as u64),
    }
}

/// Returns how many bytes the VarUInt at the start of `bytes` occupies.
///
/// Scans at most [`MAX_VARINT_BYTES`] bytes and returns `None` if no
/// terminator is found among them. Nothing is decoded.
#[must_use]
pub fn peek_var_len(bytes: &[u8]) -> Option<usize> {
    bytes
        .iter()
        .take(MAX_VARINT_BYTES)
        .position(|&b| b & 0x80 == 0)
        .map(|i| i + 1)
}

/// Writes a length prefix followed by `bytes` verbatim.
pub fn write_bytes_with_len<S: OutputSink + ?Sized>(
    sink: &mut S,
    bytes: &[u8],
    prefix: LenPrefix,
) -> WireResult<()> {
    write_len(sink, bytes.len(), prefix)?;
    fixed::write_bytes(sink, bytes)?;
    Ok(())
}

/// Reads a length-prefixed byte payload without copying it.
///
/// The reader does not advance on failure.
pub fn read_bytes_with_len<'a>(
    reader: &mut ByteReader<'a>,
    prefix: LenPrefix,
) -> WireResult<&'a [u8]> {
    read_bytes_with_len_limited(reader, prefix, usize::MAX)
}

/// Like [`read_bytes_with_len`], rejecting payloads longer than
/// `limits.max_bytes_len`.
pub fn read_bytes_with_len_with_limits<'a>(
    reader: &mut ByteReader<'a>,
    prefix: LenPrefix,
    limits: &crate::Limits,
) -> WireResult<&'a [u8]> {
    read_bytes_with_len_limited(reader, prefix, limits.max_bytes_len)
}

fn read_bytes_with_len_limited<'a>(
    reader: &mut ByteReader<'a>,
    prefix: LenPrefix,
    limit: usize,
) -> WireResult<&'a [u8]> {
    let mut cursor = reader.clone();
    let len = read_len_limited(&mut cursor, prefix, LimitKind::BytesLen, limit)?;
    let bytes = cursor.read_bytes(len)?;
    *reader = cursor;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitstream::{BitError, VecSink};

    const ALL: [LenPrefix; 4] = [LenPrefix::U8, LenPrefix::U16, LenPrefix::U32, LenPrefix::Var];

    fn encode(len: usize, prefix: LenPrefix) -> Vec<u8> {
        let mut sink = VecSink::new();
        write_len(&mut sink, len, prefix).unwrap();
        sink.into_vec()
    }

    #[test]
    fn raw_roundtrip() {
        for prefix in ALL {
            assert_eq!(LenPrefix::from_raw(prefix.raw()).unwrap(), prefix);
        }
    }

    #[test]
    fn unknown_raw_rejected() {
        assert_eq!(
            LenPrefix::from_raw(4),
            Err(WireError::UnknownLenPrefix { raw: 4 })
        );
    }

    #[test]
    fn fixed_prefixes_are_little_endian() {
        assert_eq!(encode(0xAB, LenPrefix::U8), vec![0xAB]);
        assert_eq!(encode(0x1234, LenPrefix::U16), vec![0x34, 0x12]);
        assert_eq!(
            encode(0x0102_0304, LenPrefix::U32),
            vec![0x04, 0x03, 0x02, 0x01]
        );
        assert_eq!(encode(300, LenPrefix::Var), vec![0xAC, 0x02]);
    }

    #[test]
    fn boundaries_roundtrip() {
        for prefix in ALL {
            let max = usize::try_from(prefix.max_len().min(MAX_DECODED_LEN as u64)).unwrap();
            for len in [0, 1, max - 1, max] {
                let bytes = encode(len, prefix);
                assert_eq!(bytes.len(), estimate_len_size(len, prefix));
                let mut reader = ByteReader::new(&bytes);
                assert_eq!(read_len(&mut reader, prefix).unwrap(), len);
                assert!(reader.is_empty());
            }
        }
    }

    #[test]
    fn over_capacity_fails_without_writing() {
        let cases = [
            (LenPrefix::U8, 256usize, 255u64),
            (LenPrefix::U16, 65_536, 65_535),
            (LenPrefix::U32, MAX_DECODED_LEN + 1, i32::MAX as u64),
        ];
        for (prefix, len, max) in cases {
            let mut sink = VecSink::new();
            let err = write_len(&mut sink, len, prefix).unwrap_err();
            assert_eq!(
                err,
                WireError::LengthOutOfRange {
                    len: len as u64,
                    prefix,
                    max
                }
            );
            assert!(sink.as_slice().is_empty());
        }
    }

    #[test]
    fn var_prefix_has_no_write_ceiling() {
        let bytes = encode(usize::MAX, LenPrefix::Var);
        assert_eq!(bytes.len(), estimate_len_size(usize::MAX, LenPrefix::Var));
    }

    #[test]
    fn u32_over_i32_max_overflows_on_read() {
        let bytes = 0x8000_0000u32.to_le_bytes();
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(
            read_len(&mut reader, LenPrefix::U32),
            Err(WireError::LengthOverflow { value: 0x8000_0000 })
        );
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn var_over_i32_max_overflows_on_read() {
        let bytes = encode(MAX_DECODED_LEN + 1, LenPrefix::Var);
        let mut reader = ByteReader::new(&bytes);
        let err = read_len(&mut reader, LenPrefix::Var).unwrap_err();
        assert!(matches!(err, WireError::LengthOverflow { .. }));
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn truncated_prefix_fails() {
        let mut reader = ByteReader::new(&[0x01]);
        let err = read_len(&mut reader, LenPrefix::U16).unwrap_err();
        assert!(matches!(
            err,
            WireError::Bitstream(BitError::UnexpectedEof { .. })
        ));
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn peek_var_len_finds_terminator() {
        assert_eq!(peek_var_len(&[0x05, 0xFF]), Some(1));
        assert_eq!(peek_var_len(&[0xAC, 0x02]), Some(2));
        assert_eq!(peek_var_len(&[0x80; 9]), None);
        let mut ten = [0x80; 10];
        ten[9] = 0x01;
        assert_eq!(peek_var_len(&ten), Some(10));
        let mut eleven = [0x80; 11];
        eleven[10] = 0x00;
        assert_eq!(peek_var_len(&eleven), None);
        assert_eq!(peek_var_len(&[]), None);
    }

    #[test]
    fn bytes_with_len_roundtrip() {
        let mut sink = VecSink::new();
        write_bytes_with_len(&mut sink, b"payload", LenPrefix::U8).unwrap();
        write_bytes_with_len(&mut sink, &[], LenPrefix::Var).unwrap();
        let bytes = sink.into_vec();
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(
            read_bytes_with_len(&mut reader, LenPrefix::U8).unwrap(),
            b"payload"
        );
        assert_eq!(
            read_bytes_with_len(&mut reader, LenPrefix::Var).unwrap(),
            b""
        );
        assert!(reader.is_empty());
    }

    #[test]
    fn bytes_with_len_truncated_payload_does_not_advance() {
        let bytes = [5, b'a', b'b'];
        let mut reader = ByteReader::new(&bytes);
        let err = read_bytes_with_len(&mut reader, LenPrefix::U8).unwrap_err();
        assert!(matches!(
            err,
            WireError::Bitstream(BitError::UnexpectedEof { .. })
        ));
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn bytes_with_len_limit_checked_before_payload() {
        let bytes = [200];
        let mut reader = ByteReader::new(&bytes);
        let limits = crate::Limits {
            max_bytes_len: 16,
            ..crate::Limits::default()
        };
        let err = read_bytes_with_len_with_limits(&mut reader, LenPrefix::U8, &limits).unwrap_err();
        assert_eq!(
            err,
            WireError::LimitsExceeded {
                kind: LimitKind::BytesLen,
                limit: 16,
                actual: 200
            }
        );
    }
}
