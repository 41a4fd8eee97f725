//! Little-endian fixed-width encoders.
//!
//! Each writer reserves exactly the width of the value and commits exactly
//! that many bytes. Decoding lives on [`ByteReader`](crate::ByteReader).

use crate::error::BitResult;
use crate::sink::OutputSink;

#[inline]
fn put<S: OutputSink + ?Sized, const N: usize>(sink: &mut S, bytes: [u8; N]) -> BitResult<()> {
    let region = sink.reserve(N)?;
    region[..N].copy_from_slice(&bytes);
    sink.commit(N);
    Ok(())
}

/// Writes raw bytes verbatim.
pub fn write_bytes<S: OutputSink + ?Sized>(sink: &mut S, src: &[u8]) -> BitResult<()> {
    let region = sink.reserve(src.len())?;
    region[..src.len()].copy_from_slice(src);
    sink.commit(src.len());
    Ok(())
}

/// Writes a `u8`.
#[inline]
pub fn write_u8<S: OutputSink + ?Sized>(sink: &mut S, value: u8) -> BitResult<()> {
    put(sink, [value])
}

/// Writes an `i8`.
#[inline]
pub fn write_i8<S: OutputSink + ?Sized>(sink: &mut S, value: i8) -> BitResult<()> {
    put(sink, value.to_le_bytes())
}

/// Writes a boolean as a single `0` or `1` byte.
#[inline]
pub fn write_bool<S: OutputSink + ?Sized>(sink: &mut S, value: bool) -> BitResult<()> {
    put(sink, [u8::from(value)])
}

/// Writes a little-endian `u16`.
#[inline]
pub fn write_u16<S: OutputSink + ?Sized>(sink: &mut S, value: u16) -> BitResult<()> {
    put(sink, value.to_le_bytes())
}

/// Writes a little-endian `i16`.
#[inline]
pub fn write_i16<S: OutputSink + ?Sized>(sink: &mut S, value: i16) -> BitResult<()> {
    put(sink, value.to_le_bytes())
}

/// Writes a little-endian `u32`.
#[inline]
pub fn write_u32<S: OutputSink + ?Sized>(sink: &mut S, value: u32) -> BitResult<()> {
    put(sink, value.to_le_bytes())
}

/// Writes a little-endian `i32`.
#[inline]
pub fn write_i32<S: OutputSink + ?Sized>(sink: &mut S, value: i32) -> BitResult<()> {
    put(sink, value.to_le_bytes())
}

/// Writes a little-endian `u64`.
#[inline]
pub fn write_u64<S: OutputSink + ?Sized>(sink: &mut S, value: u64) -> BitResult<()> {
    put(sink, value.to_le_bytes())
}

/// Writes a little-endian `i64`.
#[inline]
pub fn write_i64<S: OutputSink + ?Sized>(sink: &mut S, value: i64) -> BitResult<()> {
    put(sink, value.to_le_bytes())
}

/// Writes an IEEE-754 `f32` in little-endian order regardless of host.
#[inline]
pub fn write_f32<S: OutputSink + ?Sized>(sink: &mut S, value: f32) -> BitResult<()> {
    put(sink, value.to_le_bytes())
}

/// Writes an IEEE-754 `f64` in little-endian order regardless of host.
#[inline]
pub fn write_f64<S: OutputSink + ?Sized>(sink: &mut S, value: f64) -> BitResult<()> {
    put(sink, value.to_le_bytes())
}
