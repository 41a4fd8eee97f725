//! Sequential byte cursor with little-endian fixed-width decoding.

use crate::error::{BitError, BitResult};
use crate::varint;

/// A bounds-checked, forward-only cursor over a borrowed byte region.
///
/// Every read either advances the cursor by exactly the number of bytes it
/// consumed or fails with [`BitError::UnexpectedEof`] and leaves the cursor
/// where it was. Slices handed out by the reader borrow the underlying region,
/// not the reader, so they stay valid after the reader moves on.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new reader positioned at the start of `data`.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of unread bytes.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns `true` if every byte has been consumed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the current byte offset from the start of the region.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the unread tail of the region without advancing.
    #[must_use]
    pub fn unread(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    fn ensure(&self, count: usize) -> BitResult<()> {
        let available = self.remaining();
        if count > available {
            return Err(BitError::UnexpectedEof {
                requested: count,
                available,
            });
        }
        Ok(())
    }

    /// Reads `len` bytes as a borrowed slice and advances past them.
    pub fn read_bytes(&mut self, len: usize) -> BitResult<&'a [u8]> {
        self.ensure(len)?;
        let data = self.data;
        let slice = &data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Returns the next `len` bytes without advancing.
    pub fn peek_slice(&self, len: usize) -> BitResult<&'a [u8]> {
        self.ensure(len)?;
        let data = self.data;
        Ok(&data[self.pos..self.pos + len])
    }

    /// Advances past `len` bytes.
    pub fn skip(&mut self, len: usize) -> BitResult<()> {
        self.ensure(len)?;
        self.pos += len;
        Ok(())
    }

    /// Reads exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> BitResult<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Reads a `u8`.
    pub fn read_u8(&mut self) -> BitResult<u8> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    /// Reads an `i8`.
    pub fn read_i8(&mut self) -> BitResult<i8> {
        Ok(i8::from_le_bytes(self.read_array::<1>()?))
    }

    /// Reads a one-byte boolean; any non-zero byte is `true`.
    pub fn read_bool(&mut self) -> BitResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Reads a little-endian `u16`.
    pub fn read_u16(&mut self) -> BitResult<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Reads a little-endian `i16`.
    pub fn read_i16(&mut self) -> BitResult<i16> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    /// Reads a little-endian `u32`.
    pub fn read_u32(&mut self) -> BitResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Reads a little-endian `i32`.
    pub fn read_i32(&mut self) -> BitResult<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    /// Reads a little-endian `u64`.
    pub fn read_u64(&mut self) -> BitResult<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Reads a little-endian `i64`.
    pub fn read_i64(&mut self) -> BitResult<i64> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    /// Reads a little-endian IEEE-754 `f32`, independent of host byte order.
    pub fn read_f32(&mut self) -> BitResult<f32> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    /// Reads a little-endian IEEE-754 `f64`, independent of host byte order.
    pub fn read_f64(&mut self) -> BitResult<f64> {
        Ok(f64::from_le_bytes(self.read_array()?))
    }

    /// Reads a VarUInt. See [`varint::read_var_uint`].
    pub fn read_var_uint(&mut self) -> BitResult<u64> {
        varint::read_var_uint(self)
    }

    /// Reads a zigzag VarInt. See [`varint::read_var_int`].
    pub fn read_var_int(&mut self) -> BitResult<i64> {
        varint::read_var_int(self)
    }
}
