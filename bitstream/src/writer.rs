//! Bit-level writer layered on an [`OutputSink`].

use crate::error::{BitError, BitResult};
use crate::fixed;
use crate::sink::OutputSink;

/// Maximum number of bits a single `write_bits`/`read_bits` call handles.
pub const MAX_BITS_PER_CALL: u8 = 32;

/// Packs bits LSB-first into bytes and appends them to a sink.
///
/// Bit 0 of the first value written lands in bit 0 of the first byte. A byte
/// is emitted as soon as 8 bits have accumulated; the final partial byte is
/// only emitted by [`flush`](Self::flush), zero-padded in its high bits.
/// Dropping the writer without flushing discards the pending bits.
#[derive(Debug)]
pub struct BitWriter<'s, S: OutputSink + ?Sized> {
    sink: &'s mut S,
    /// Pending bits, occupying the low `bit_count` bits.
    acc: u8,
    /// Number of pending bits in `acc` (0-7, or 8 after a failed emit).
    bit_count: u8,
    bytes_emitted: usize,
}

impl<'s, S: OutputSink + ?Sized> BitWriter<'s, S> {
    /// Creates a writer that appends to `sink`.
    pub fn new(sink: &'s mut S) -> Self {
        Self {
            sink,
            acc: 0,
            bit_count: 0,
            bytes_emitted: 0,
        }
    }

    /// Returns the number of bits written so far, including pending ones.
    #[must_use]
    pub const fn bits_written(&self) -> usize {
        self.bytes_emitted * 8 + self.bit_count as usize
    }

    /// Returns the number of bits waiting for the next byte boundary.
    #[must_use]
    pub const fn pending_bits(&self) -> u8 {
        self.bit_count
    }

    /// Writes the low `bits` bits of `value`; higher bits are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`BitError::InvalidBitCount`] if `bits > 32`, or the sink's
    /// error if a completed byte cannot be emitted. Bytes emitted before a
    /// sink failure stay committed. A byte the sink rejected stays pending and
    /// is retried by the next write or by [`flush`](Self::flush).
    pub fn write_bits(&mut self, value: u32, bits: u8) -> BitResult<()> {
        if bits > MAX_BITS_PER_CALL {
            return Err(BitError::InvalidBitCount {
                bits,
                max_bits: MAX_BITS_PER_CALL,
            });
        }

        if self.bit_count == 8 {
            self.emit()?;
        }

        let mut value = value;
        let mut remaining = bits;
        while remaining > 0 {
            let take = remaining.min(8 - self.bit_count);
            let chunk = (value & ((1u32 << take) - 1)) as u8;
            self.acc |= chunk << self.bit_count;
            self.bit_count += take;
            value >>= take;
            remaining -= take;

            if self.bit_count == 8 {
                self.emit()?;
            }
        }
        Ok(())
    }

    /// Writes a single bit.
    pub fn write_bool(&mut self, value: bool) -> BitResult<()> {
        self.write_bits(u32::from(value), 1)
    }

    /// Emits the pending partial byte, if any, and releases the sink.
    pub fn flush(mut self) -> BitResult<()> {
        if self.bit_count > 0 {
            self.emit()?;
        }
        Ok(())
    }

    fn emit(&mut self) -> BitResult<()> {
        fixed::write_u8(self.sink, self.acc)?;
        self.acc = 0;
        self.bit_count = 0;
        self.bytes_emitted += 1;
        Ok(())
    }
}
