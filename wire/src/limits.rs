//! Configurable limits for bounded decoding.

/// Decode-time limits for variable-size payloads.
///
/// A length prefix is checked against the matching limit before any payload
/// byte is touched or any allocation is made, so a hostile prefix cannot make
/// the decoder reserve more than the limit allows.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Limits {
    /// Maximum UTF-8 byte length of a single text value.
    pub max_text_bytes: usize,

    /// Maximum length of a single length-prefixed byte payload.
    pub max_bytes_len: usize,

    /// Maximum item count of a single array.
    pub max_array_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // Names, chat lines and similar short strings
            max_text_bytes: 16 * 1024,

            max_bytes_len: 64 * 1024,
            max_array_len: 4096,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_text_bytes: 256,
            max_bytes_len: 1024,
            max_array_len: 64,
        }
    }

    /// Creates limits with no restrictions beyond the `i32::MAX` length cap.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_text_bytes: usize::MAX,
            max_bytes_len: usize::MAX,
            max_array_len: usize::MAX,
        }
    }
}
