//! Generation-tagged 32-bit entity identifier.

use bitstream::{fixed, BitResult, ByteReader, OutputSink};
use wire::{ItemCodec, WireResult};

/// Number of bits holding the slot index.
pub const INDEX_BITS: u32 = 20;

/// Number of bits holding the generation.
pub const GENERATION_BITS: u32 = 12;

/// Largest representable slot index.
pub const MAX_INDEX: u32 = (1 << INDEX_BITS) - 1;

/// Largest representable generation; the next one wraps to 0.
pub const MAX_GENERATION: u16 = (1 << GENERATION_BITS) - 1;

/// A network entity identifier: slot index plus slot generation.
///
/// Layout, from the most significant bit:
///
/// ```text
/// 31        20 19                 0
/// [generation][       index       ]
/// ```
///
/// Comparing two ids compares both fields. Whether an id still refers to a
/// live entity can only be answered by its slot (see
/// [`Slot::is_alive`](crate::Slot::is_alive)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NetId(u32);

impl NetId {
    /// Mask of the index field.
    pub const INDEX_MASK: u32 = 0x000F_FFFF;

    /// Mask of the generation field, in place.
    pub const GENERATION_MASK: u32 = 0xFFF0_0000;

    /// Shift of the generation field.
    pub const GENERATION_SHIFT: u32 = INDEX_BITS;

    /// Wraps a packed value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the packed value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Packs an index and a generation. Bits beyond each field are dropped.
    #[must_use]
    pub const fn compose(index: u32, generation: u16) -> Self {
        Self(
            (index & Self::INDEX_MASK)
                | (((generation & MAX_GENERATION) as u32) << Self::GENERATION_SHIFT),
        )
    }

    /// Splits into `(index, generation)`.
    #[must_use]
    pub const fn decompose(self) -> (u32, u16) {
        (self.index(), self.generation())
    }

    /// Returns the slot index (0..=1_048_575).
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 & Self::INDEX_MASK
    }

    /// Returns the generation (0..=4095).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn generation(self) -> u16 {
        ((self.0 & Self::GENERATION_MASK) >> Self::GENERATION_SHIFT) as u16
    }

    /// Returns a copy with the index replaced.
    #[must_use]
    pub const fn with_index(self, index: u32) -> Self {
        Self::compose(index, self.generation())
    }

    /// Returns a copy with the generation replaced.
    #[must_use]
    pub const fn with_generation(self, generation: u16) -> Self {
        Self::compose(self.index(), generation)
    }

    /// Returns a copy with the generation advanced by one, wrapping at 4096.
    #[must_use]
    pub const fn next_generation(self) -> Self {
        self.with_generation(next_generation(self.generation()))
    }

    /// Writes the packed value as a little-endian `u32`.
    pub fn write_to<S: OutputSink + ?Sized>(self, sink: &mut S) -> BitResult<()> {
        fixed::write_u32(sink, self.0)
    }

    /// Reads a packed little-endian `u32`.
    pub fn read_from(reader: &mut ByteReader<'_>) -> BitResult<Self> {
        reader.read_u32().map(Self)
    }
}

/// Advances a generation by one modulo 4096.
#[must_use]
pub(crate) const fn next_generation(generation: u16) -> u16 {
    generation.wrapping_add(1) & MAX_GENERATION
}

impl From<u32> for NetId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<NetId> for u32 {
    fn from(id: NetId) -> Self {
        id.0
    }
}

impl std::fmt::Display for NetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.index(), self.generation())
    }
}

/// Array item codec for [`NetId`]s as little-endian `u32`s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetIdCodec;

impl ItemCodec<NetId> for NetIdCodec {
    #[inline]
    fn encode<S: OutputSink + ?Sized>(&self, item: &NetId, sink: &mut S) -> WireResult<()> {
        item.write_to(sink)?;
        Ok(())
    }

    #[inline]
    fn decode(&self, reader: &mut ByteReader<'_>) -> WireResult<NetId> {
        Ok(NetId::read_from(reader)?)
    }
}
