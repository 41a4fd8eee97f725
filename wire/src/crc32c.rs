//! CRC-32C (Castagnoli) checksum.
//!
//! Table-driven over the reflected polynomial `0x82F63B78`, initial state all
//! ones, output complemented. The table is evaluated at compile time and
//! shared read-only.

const POLY: u32 = 0x82F6_3B78;
const INIT: u32 = 0xFFFF_FFFF;

static TABLE: [u32; 256] = build_table();

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 { (crc >> 1) ^ POLY } else { crc >> 1 };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

#[inline]
fn fold(mut state: u32, data: &[u8]) -> u32 {
    for &byte in data {
        state = (state >> 8) ^ TABLE[((state ^ u32::from(byte)) & 0xFF) as usize];
    }
    state
}

/// Computes the CRC-32C of `data` in one shot.
#[must_use]
pub fn checksum(data: &[u8]) -> u32 {
    !fold(INIT, data)
}

/// Streaming CRC-32C accumulator.
///
/// Feeding input in pieces yields the same value as one call over the
/// concatenation. [`value`](Self::value) does not disturb the state.
///
/// ```
/// use wire::Crc32c;
///
/// let mut crc = Crc32c::new();
/// crc.update(b"1234");
/// crc.update(b"56789");
/// assert_eq!(crc.value(), 0xE306_9283);
/// assert_eq!(crc.value(), Crc32c::checksum(b"123456789"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc32c {
    state: u32,
}

impl Crc32c {
    /// Creates an accumulator with no input.
    #[must_use]
    pub const fn new() -> Self {
        Self { state: INIT }
    }

    /// Computes the CRC-32C of `data` in one shot.
    #[must_use]
    pub fn checksum(data: &[u8]) -> u32 {
        checksum(data)
    }

    /// Discards all input seen so far.
    pub fn reset(&mut self) {
        self.state = INIT;
    }

    /// Folds `data` into the running checksum.
    pub fn update(&mut self, data: &[u8]) {
        self.state = fold(self.state, data);
    }

    /// Returns the checksum of all input seen so far.
    #[must_use]
    pub const fn value(&self) -> u32 {
        !self.state
    }
}

impl Default for Crc32c {
    fn default() -> Self {
        Self::new()
    }
}
