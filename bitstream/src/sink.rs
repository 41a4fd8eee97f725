//! Append-only output sinks consumed by every writer.

use crate::error::{BitError, BitResult};
use crate::{fixed, varint};

/// An append-only byte destination.
///
/// Writers ask for a writable region of at least `min` bytes, fill a prefix of
/// it, then commit exactly the number of bytes they filled. Bytes that were
/// reserved but never committed are not part of the output.
pub trait OutputSink {
    /// Returns a writable region of at least `min` bytes.
    fn reserve(&mut self, min: usize) -> BitResult<&mut [u8]>;

    /// Marks the first `len` bytes of the last reserved region as written.
    ///
    /// `len` must not exceed the size of that region.
    fn commit(&mut self, len: usize);

    /// Returns the number of bytes committed so far.
    fn written(&self) -> usize;
}

/// A growable sink backed by a `Vec<u8>`. Never fails.
#[derive(Debug, Default, Clone)]
pub struct VecSink {
    buf: Vec<u8>,
    len: usize,
}

impl VecSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty sink with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            buf: Vec::with_capacity(bytes),
            len: 0,
        }
    }

    /// Returns the committed bytes.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Discards all committed bytes, keeping the allocation.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Consumes the sink and returns the committed bytes.
    #[must_use]
    pub fn into_vec(mut self) -> Vec<u8> {
        self.buf.truncate(self.len);
        self.buf
    }
}

impl OutputSink for VecSink {
    fn reserve(&mut self, min: usize) -> BitResult<&mut [u8]> {
        let end = self.len + min;
        if self.buf.len() < end {
            self.buf.resize(end, 0);
        }
        Ok(&mut self.buf[self.len..])
    }

    fn commit(&mut self, len: usize) {
        debug_assert!(self.len + len <= self.buf.len(), "commit past reserved region");
        self.len = (self.len + len).min(self.buf.len());
    }

    fn written(&self) -> usize {
        self.len
    }
}

/// A bounded sink over a caller-provided buffer.
///
/// Returns [`BitError::BufferTooSmall`] once a write no longer fits.
#[derive(Debug)]
pub struct SliceSink<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceSink<'a> {
    /// Creates a sink that writes from the start of `buf`.
    #[must_use]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Returns the number of bytes that can still be written.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Returns the committed bytes.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    /// Consumes the sink and returns the number of bytes written.
    #[must_use]
    pub fn finish(self) -> usize {
        self.pos
    }
}

impl OutputSink for SliceSink<'_> {
    fn reserve(&mut self, min: usize) -> BitResult<&mut [u8]> {
        let available = self.remaining();
        if min > available {
            return Err(BitError::BufferTooSmall {
                needed: min,
                available,
            });
        }
        Ok(&mut self.buf[self.pos..])
    }

    fn commit(&mut self, len: usize) {
        debug_assert!(len <= self.remaining(), "commit past reserved region");
        self.pos += len.min(self.remaining());
    }

    fn written(&self) -> usize {
        self.pos
    }
}

/// Method-call syntax for the fixed-width and varint writers.
pub trait SinkExt: OutputSink {
    /// Writes raw bytes verbatim.
    fn put_bytes(&mut self, src: &[u8]) -> BitResult<()> {
        fixed::write_bytes(self, src)
    }

    /// Writes a `u8`.
    fn put_u8(&mut self, value: u8) -> BitResult<()> {
        fixed::write_u8(self, value)
    }

    /// Writes an `i8`.
    fn put_i8(&mut self, value: i8) -> BitResult<()> {
        fixed::write_i8(self, value)
    }

    /// Writes a one-byte boolean.
    fn put_bool(&mut self, value: bool) -> BitResult<()> {
        fixed::write_bool(self, value)
    }

    /// Writes a little-endian `u16`.
    fn put_u16(&mut self, value: u16) -> BitResult<()> {
        fixed::write_u16(self, value)
    }

    /// Writes a little-endian `i16`.
    fn put_i16(&mut self, value: i16) -> BitResult<()> {
        fixed::write_i16(self, value)
    }

    /// Writes a little-endian `u32`.
    fn put_u32(&mut self, value: u32) -> BitResult<()> {
        fixed::write_u32(self, value)
    }

    /// Writes a little-endian `i32`.
    fn put_i32(&mut self, value: i32) -> BitResult<()> {
        fixed::write_i32(self, value)
    }

    /// Writes a little-endian `u64`.
    fn put_u64(&mut self, value: u64) -> BitResult<()> {
        fixed::write_u64(self, value)
    }

    /// Writes a little-endian `i64`.
    fn put_i64(&mut self, value: i64) -> BitResult<()> {
        fixed::write_i64(self, value)
    }

    /// Writes a little-endian IEEE-754 `f32`.
    fn put_f32(&mut self, value: f32) -> BitResult<()> {
        fixed::write_f32(self, value)
    }

    /// Writes a little-endian IEEE-754 `f64`.
    fn put_f64(&mut self, value: f64) -> BitResult<()> {
        fixed::write_f64(self, value)
    }

    /// Writes a VarUInt.
    fn put_var_uint(&mut self, value: u64) -> BitResult<()> {
        varint::write_var_uint(self, value)
    }

    /// Writes a zigzag VarInt.
    fn put_var_int(&mut self, value: i64) -> BitResult<()> {
        varint::write_var_int(self, value)
    }
}

impl<S: OutputSink + ?Sized> SinkExt for S {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_uncommitted_bytes_are_dropped() {
        let mut sink = VecSink::new();
        let region = sink.reserve(8).unwrap();
        assert!(region.len() >= 8);
        region[0] = 0xAA;
        region[1] = 0xBB;
        sink.commit(1);
        assert_eq!(sink.as_slice(), &[0xAA]);
        assert_eq!(sink.written(), 1);
        assert_eq!(sink.into_vec(), vec![0xAA]);
    }

    #[test]
    fn vec_sink_reuses_slack() {
        let mut sink = VecSink::with_capacity(4);
        sink.put_u16(0x0102).unwrap();
        sink.put_u8(0x03).unwrap();
        assert_eq!(sink.as_slice(), &[0x02, 0x01, 0x03]);
        sink.clear();
        assert_eq!(sink.written(), 0);
        sink.put_u8(0x09).unwrap();
        assert_eq!(sink.into_vec(), vec![0x09]);
    }

    #[test]
    fn slice_sink_bounds() {
        let mut buf = [0u8; 3];
        let mut sink = SliceSink::new(&mut buf);
        sink.put_u16(0xBEEF).unwrap();
        let err = sink.put_u16(0x1234).unwrap_err();
        assert_eq!(
            err,
            BitError::BufferTooSmall {
                needed: 2,
                available: 1
            }
        );
        sink.put_u8(0x7F).unwrap();
        assert_eq!(sink.remaining(), 0);
        assert_eq!(sink.finish(), 3);
        assert_eq!(buf, [0xEF, 0xBE, 0x7F]);
    }

    #[test]
    fn slice_sink_zero_length_write_on_full_buffer() {
        let mut buf = [0u8; 1];
        let mut sink = SliceSink::new(&mut buf);
        sink.put_u8(1).unwrap();
        sink.put_bytes(&[]).unwrap();
        assert_eq!(sink.as_slice(), &[1]);
    }

    #[test]
    fn sink_ext_on_trait_object() {
        let mut sink = VecSink::new();
        {
            let dyn_sink: &mut dyn OutputSink = &mut sink;
            dyn_sink.put_var_uint(300).unwrap();
            dyn_sink.put_var_int(-1).unwrap();
        }
        assert_eq!(sink.as_slice(), &[0xAC, 0x02, 0x01]);
    }
}
