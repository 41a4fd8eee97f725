//! Byte cursors, bit packing and varint primitives for the netprim codec.
//!
//! This crate provides the allocation-free building blocks every higher-level
//! encoding is made of:
//!
//! - [`ByteReader`] - a bounds-checked cursor with little-endian decoding.
//! - [`OutputSink`] - the append-only destination all writers target, with
//!   [`VecSink`] (growable) and [`SliceSink`] (bounded) implementations.
//! - [`fixed`] - little-endian fixed-width encoders.
//! - [`BitWriter`] / [`BitReader`] - LSB-first bit packing.
//! - [`varint`] - canonical VarUInt and zigzag VarInt.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are bounds-checked and fail without advancing.
//! - **No domain knowledge** - This crate knows nothing about entities or strings.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use bitstream::{BitReader, BitWriter, VecSink};
//!
//! let mut sink = VecSink::new();
//! let mut writer = BitWriter::new(&mut sink);
//! writer.write_bool(true).unwrap();
//! writer.write_bits(42, 7).unwrap();
//! writer.flush().unwrap();
//!
//! let bytes = sink.into_vec();
//!
//! let mut reader = BitReader::new(&bytes);
//! assert_eq!(reader.read_bool().unwrap(), true);
//! assert_eq!(reader.read_bits(7).unwrap(), 42);
//! ```

mod bytes;
mod error;
pub mod fixed;
mod reader;
mod sink;
pub mod varint;
mod writer;

pub use bytes::ByteReader;
pub use error::{BitError, BitResult, ErrorKind};
pub use reader::BitReader;
pub use sink::{OutputSink, SinkExt, SliceSink, VecSink};
pub use varint::{
    decode_zigzag, encode_zigzag, estimate_var_uint_size, read_var_int, read_var_uint,
    write_var_int, write_var_uint, MAX_VARINT_BYTES,
};
pub use writer::{BitWriter, MAX_BITS_PER_CALL};
