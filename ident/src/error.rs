//! Error types for identifier and slot lifecycle operations.

use bitstream::ErrorKind;
use thiserror::Error;

use crate::net_id::NetId;

/// Result type for identity operations.
pub type IdentResult<T> = Result<T, IdentError>;

/// Errors raised by [`Slot`](crate::Slot) and [`SlotPool`](crate::SlotPool).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IdentError {
    /// Index is beyond the 20-bit range or the pool's slots.
    #[error("slot index {index} is out of range")]
    IndexOutOfRange { index: u32 },

    /// Tried to allocate or attach into a live slot.
    #[error("slot {index} is already occupied")]
    SlotOccupied { index: u32 },

    /// Tried to free a slot that holds nothing.
    #[error("slot {index} is vacant")]
    SlotVacant { index: u32 },

    /// The identifier's generation no longer matches its slot.
    #[error("stale id {id}: slot is at generation {current_generation}")]
    StaleId { id: NetId, current_generation: u16 },

    /// Every one of the 2^20 indices is live.
    #[error("slot pool exhausted at {capacity} slots")]
    PoolExhausted { capacity: usize },
}

impl IdentError {
    /// Returns the coarse classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::IndexOutOfRange { .. } => ErrorKind::OutOfRange,
            Self::PoolExhausted { .. } => ErrorKind::Overflow,
            Self::SlotOccupied { .. } | Self::SlotVacant { .. } | Self::StaleId { .. } => {
                ErrorKind::State
            }
        }
    }
}
