//! Error types for length-prefixed and checksummed encodings.

use bitstream::{BitError, ErrorKind};
use thiserror::Error;

use crate::prefix::LenPrefix;

/// Result type for wire operations.
pub type WireResult<T> = Result<T, WireError>;

/// Errors that can occur while encoding or decoding wire values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WireError {
    /// Byte or bit level failure.
    #[error("bitstream error: {0}")]
    Bitstream(#[from] BitError),

    /// Length does not fit the chosen prefix kind.
    #[error("length {len} does not fit a {prefix} prefix (max {max})")]
    LengthOutOfRange { len: u64, prefix: LenPrefix, max: u64 },

    /// Decoded length exceeds the signed 32-bit count range.
    #[error("decoded length {value} exceeds {}", i32::MAX)]
    LengthOverflow { value: u64 },

    /// Raw prefix kind is not one of the known kinds.
    #[error("unknown length prefix kind: {raw}")]
    UnknownLenPrefix { raw: u8 },

    /// Text payload is not valid UTF-8.
    #[error("invalid UTF-8 in text payload after {valid_up_to} bytes")]
    InvalidUtf8 { valid_up_to: usize },

    /// Decoded length exceeds a configured limit.
    #[error("{kind} limit exceeded: {actual} > {limit}")]
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Specific decode limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    TextBytes,
    BytesLen,
    ArrayLen,
}

impl WireError {
    /// Returns the coarse classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Bitstream(e) => e.kind(),
            Self::LengthOutOfRange { .. } | Self::LimitsExceeded { .. } => ErrorKind::OutOfRange,
            Self::LengthOverflow { .. } => ErrorKind::Overflow,
            Self::UnknownLenPrefix { .. } => ErrorKind::InvalidArgument,
            Self::InvalidUtf8 { .. } => ErrorKind::Format,
        }
    }
}

impl std::fmt::Display for LimitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::TextBytes => "text bytes",
            Self::BytesLen => "byte payload length",
            Self::ArrayLen => "array length",
        };
        write!(f, "{name}")
    }
}
