//! Length prefixes, text and array codecs, and CRC-32C for the netprim codec.
//!
//! This crate builds the variable-size encodings on top of `bitstream`:
//! length prefixes in four flavours, UTF-8 text, arrays with pluggable item
//! codecs, and the CRC-32C checksum. It knows nothing about entities.
//!
//! # Design Principles
//!
//! - **Agreed framing** - The prefix kind is configuration, not data on the wire.
//! - **Bounded decoding** - Lengths are capped at `i32::MAX` and may be checked
//!   against [`Limits`] before any payload is touched.
//! - **Atomic reads** - A failed decode leaves the reader where it was.
//!
//! # Example
//!
//! ```
//! use bitstream::{ByteReader, VecSink};
//! use wire::{read_array, read_utf8_str, write_array, write_utf8, LenPrefix, VarUIntCodec};
//!
//! let mut sink = VecSink::new();
//! write_utf8(&mut sink, "player-1", LenPrefix::U8).unwrap();
//! write_array(&mut sink, &[1u64, 300, 70_000], LenPrefix::Var, &VarUIntCodec).unwrap();
//! let bytes = sink.into_vec();
//!
//! let mut reader = ByteReader::new(&bytes);
//! assert_eq!(read_utf8_str(&mut reader, LenPrefix::U8).unwrap(), "player-1");
//! let values = read_array(&mut reader, LenPrefix::Var, &VarUIntCodec).unwrap();
//! assert_eq!(values, vec![1, 300, 70_000]);
//! ```

mod array;
pub mod crc32c;
mod error;
mod limits;
mod prefix;
mod text;

pub use array::{
    read_array, read_array_with_limits, write_array, BoolCodec, F32Codec, F64Codec, I16Codec,
    I32Codec, I64Codec, I8Codec, ItemCodec, U16Codec, U32Codec, U64Codec, U8Codec, Utf8Codec,
    VarIntCodec, VarUIntCodec,
};
pub use bitstream::ErrorKind;
pub use crc32c::Crc32c;
pub use error::{LimitKind, WireError, WireResult};
pub use limits::Limits;
pub use prefix::{
    estimate_len_size, peek_var_len, read_bytes_with_len, read_bytes_with_len_with_limits,
    read_len, write_bytes_with_len, write_len, LenPrefix, MAX_DECODED_LEN,
};
pub use text::{
    read_utf8, read_utf8_str, read_utf8_str_with_limits, read_utf8_with_limits, write_utf8,
    write_utf8_opt,
};
