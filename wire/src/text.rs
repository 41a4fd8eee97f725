//! Length-prefixed UTF-8 text.
//!
//! The prefix counts bytes, not code points, and there is no terminator. An
//! absent value is written exactly like an empty string.

use bitstream::{fixed, ByteReader, OutputSink};

use crate::error::{LimitKind, WireError, WireResult};
use crate::limits::Limits;
use crate::prefix::{read_len_limited, write_len, LenPrefix};

/// Writes `text` as a length prefix followed by its UTF-8 bytes.
pub fn write_utf8<S: OutputSink + ?Sized>(
    sink: &mut S,
    text: &str,
    prefix: LenPrefix,
) -> WireResult<()> {
    write_len(sink, text.len(), prefix)?;
    fixed::write_bytes(sink, text.as_bytes())?;
    Ok(())
}

/// Writes an optional string; `None` is encoded as an empty string.
pub fn write_utf8_opt<S: OutputSink + ?Sized>(
    sink: &mut S,
    text: Option<&str>,
    prefix: LenPrefix,
) -> WireResult<()> {
    write_utf8(sink, text.unwrap_or_default(), prefix)
}

/// Reads a string borrowed from the reader's buffer.
///
/// The reader does not advance on failure.
pub fn read_utf8_str<'a>(reader: &mut ByteReader<'a>, prefix: LenPrefix) -> WireResult<&'a str> {
    read_str_limited(reader, prefix, usize::MAX)
}

/// Like [`read_utf8_str`], rejecting text longer than `limits.max_text_bytes`.
pub fn read_utf8_str_with_limits<'a>(
    reader: &mut ByteReader<'a>,
    prefix: LenPrefix,
    limits: &Limits,
) -> WireResult<&'a str> {
    read_str_limited(reader, prefix, limits.max_text_bytes)
}

/// Reads an owned string.
pub fn read_utf8(reader: &mut ByteReader<'_>, prefix: LenPrefix) -> WireResult<String> {
    read_utf8_str(reader, prefix).map(str::to_owned)
}

/// Like [`read_utf8`], rejecting text longer than `limits.max_text_bytes`.
pub fn read_utf8_with_limits(
    reader: &mut ByteReader<'_>,
    prefix: LenPrefix,
    limits: &Limits,
) -> WireResult<String> {
    read_utf8_str_with_limits(reader, prefix, limits).map(str::to_owned)
}

fn read_str_limited<'a>(
    reader: &mut ByteReader<'a>,
    prefix: LenPrefix,
    limit: usize,
) -> WireResult<&'a str> {
    let mut cursor = reader.clone();
    let len = read_len_limited(&mut cursor, prefix, LimitKind::TextBytes, limit)?;
    if len == 0 {
        *reader = cursor;
        return Ok("");
    }
    let bytes = cursor.read_bytes(len)?;
    let text = std::str::from_utf8(bytes).map_err(|e| {
        tracing::debug!(len, valid_up_to = e.valid_up_to(), "invalid UTF-8 text");
        WireError::InvalidUtf8 {
            valid_up_to: e.valid_up_to(),
        }
    })?;
    *reader = cursor;
    Ok(text)
}
