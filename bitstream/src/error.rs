//! Error types for byte and bit level operations.

use thiserror::Error;

/// Result type for bitstream operations.
pub type BitResult<T> = Result<T, BitError>;

/// Coarse classification shared by every error type in the workspace.
///
/// Callers that only need to decide between "drop this message" and
/// "disconnect this peer" can match on the kind instead of the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A read or a bit count exceeded what is available or allowed.
    OutOfRange,
    /// The bytes do not follow the encoding rules.
    Format,
    /// A decoded value does not fit the target type.
    Overflow,
    /// The caller passed an argument the codec cannot honor.
    InvalidArgument,
    /// An identity lifecycle transition was attempted from the wrong state.
    State,
}

/// Errors that can occur during byte or bit level encoding/decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BitError {
    /// Attempted to read past the end of the byte region.
    #[error("attempted to read {requested} bytes but only {available} bytes available")]
    UnexpectedEof {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// Attempted to read more bits than the staging register and the
    /// remaining bytes can supply.
    #[error("attempted to read {requested} bits but only {available} bits available")]
    NotEnoughBits {
        /// Number of bits requested.
        requested: usize,
        /// Number of bits available.
        available: usize,
    },

    /// Invalid bit count for the operation.
    #[error("invalid bit count {bits}, maximum allowed is {max_bits}")]
    InvalidBitCount {
        /// The invalid bit count provided.
        bits: u8,
        /// Maximum allowed bits for this operation.
        max_bits: u8,
    },

    /// A VarUInt did not terminate within 10 bytes or carried bits past 64.
    #[error("invalid varint: no terminator within 10 bytes or value exceeds 64 bits")]
    InvalidVarint,

    /// The output sink cannot provide the requested region.
    #[error("buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Number of bytes the write required.
        needed: usize,
        /// Number of bytes left in the sink.
        available: usize,
    },
}

impl BitError {
    /// Returns the coarse classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnexpectedEof { .. }
            | Self::NotEnoughBits { .. }
            | Self::InvalidBitCount { .. }
            | Self::BufferTooSmall { .. } => ErrorKind::OutOfRange,
            Self::InvalidVarint => ErrorKind::Format,
        }
    }
}
