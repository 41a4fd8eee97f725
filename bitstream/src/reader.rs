//! Bit-level reader layered on a [`ByteReader`].

use crate::bytes::ByteReader;
use crate::error::{BitError, BitResult};
use crate::writer::MAX_BITS_PER_CALL;

/// Reads LSB-first packed bits from a byte region.
///
/// Bytes are pulled from the underlying [`ByteReader`] only when the staging
/// register runs dry, so [`remaining_bytes`](Self::remaining_bytes) excludes a
/// byte as soon as any of its bits has been read. A read that cannot be
/// satisfied fails before consuming anything.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bytes: ByteReader<'a>,
    /// Unread bits, occupying the low `bit_count` bits.
    acc: u8,
    /// Number of unread bits in `acc` (0-8).
    bit_count: u8,
}

impl<'a> BitReader<'a> {
    /// Creates a new `BitReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self::from_reader(ByteReader::new(data))
    }

    /// Continues bit reading where a byte reader left off.
    #[must_use]
    pub const fn from_reader(bytes: ByteReader<'a>) -> Self {
        Self {
            bytes,
            acc: 0,
            bit_count: 0,
        }
    }

    /// Returns the number of bits remaining to read.
    #[must_use]
    pub const fn bits_remaining(&self) -> usize {
        self.bit_count as usize + self.bytes.remaining().saturating_mul(8)
    }

    /// Returns `true` if there are no more bits to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits_remaining() == 0
    }

    /// Returns the bytes not yet touched by any bit read.
    #[must_use]
    pub fn remaining_bytes(&self) -> &'a [u8] {
        self.bytes.unread()
    }

    /// Returns the underlying byte reader, discarding staged bits.
    #[must_use]
    pub fn into_inner(self) -> ByteReader<'a> {
        self.bytes
    }

    /// Reads `bits` bits (at most 32) into the low bits of the result.
    pub fn read_bits(&mut self, bits: u8) -> BitResult<u32> {
        if bits > MAX_BITS_PER_CALL {
            return Err(BitError::InvalidBitCount {
                bits,
                max_bits: MAX_BITS_PER_CALL,
            });
        }
        let available = self.bits_remaining();
        if usize::from(bits) > available {
            return Err(BitError::NotEnoughBits {
                requested: usize::from(bits),
                available,
            });
        }

        let mut result = 0u32;
        let mut filled = 0u8;
        while filled < bits {
            if self.bit_count == 0 {
                self.acc = self.bytes.read_u8()?;
                self.bit_count = 8;
            }
            let take = self.bit_count.min(bits - filled);
            let part = u32::from(self.acc) & ((1u32 << take) - 1);
            result |= part << filled;
            self.acc = (u16::from(self.acc) >> take) as u8;
            self.bit_count -= take;
            filled += take;
        }
        Ok(result)
    }

    /// Reads a single bit as a boolean.
    pub fn read_bool(&mut self) -> BitResult<bool> {
        Ok(self.read_bits(1)? != 0)
    }
}
