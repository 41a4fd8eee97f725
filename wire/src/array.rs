//! Length-prefixed arrays with statically dispatched item codecs.
//!
//! An array is its item count followed by the concatenated item encodings,
//! with no separators or padding. How each item is encoded is chosen by an
//! [`ItemCodec`] type parameter, so the per-item call is monomorphized.

use bitstream::{fixed, ByteReader, OutputSink};

use crate::error::{LimitKind, WireResult};
use crate::limits::Limits;
use crate::prefix::{read_len_limited, write_len, LenPrefix};
use crate::text;

/// Encodes and decodes a single array item of type `T`.
pub trait ItemCodec<T> {
    /// Appends the encoding of `item` to `sink`.
    fn encode<S: OutputSink + ?Sized>(&self, item: &T, sink: &mut S) -> WireResult<()>;

    /// Decodes one item from `reader`.
    fn decode(&self, reader: &mut ByteReader<'_>) -> WireResult<T>;
}

macro_rules! fixed_codec {
    ($(#[$doc:meta] $name:ident: $ty:ty => $write:ident, $read:ident;)*) => {$(
        #[$doc]
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl ItemCodec<$ty> for $name {
            #[inline]
            fn encode<S: OutputSink + ?Sized>(&self, item: &$ty, sink: &mut S) -> WireResult<()> {
                fixed::$write(sink, *item)?;
                Ok(())
            }

            #[inline]
            fn decode(&self, reader: &mut ByteReader<'_>) -> WireResult<$ty> {
                Ok(reader.$read()?)
            }
        }
    )*};
}

fixed_codec! {
    /// `bool` as a single 0/1 byte.
    BoolCodec: bool => write_bool, read_bool;
    /// Raw `u8`.
    U8Codec: u8 => write_u8, read_u8;
    /// Raw `i8`.
    I8Codec: i8 => write_i8, read_i8;
    /// Little-endian `u16`.
    U16Codec: u16 => write_u16, read_u16;
    /// Little-endian `i16`.
    I16Codec: i16 => write_i16, read_i16;
    /// Little-endian `u32`.
    U32Codec: u32 => write_u32, read_u32;
    /// Little-endian `i32`.
    I32Codec: i32 => write_i32, read_i32;
    /// Little-endian `u64`.
    U64Codec: u64 => write_u64, read_u64;
    /// Little-endian `i64`.
    I64Codec: i64 => write_i64, read_i64;
    /// Little-endian IEEE-754 `f32`.
    F32Codec: f32 => write_f32, read_f32;
    /// Little-endian IEEE-754 `f64`.
    F64Codec: f64 => write_f64, read_f64;
}

/// `u64` as a VarUInt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VarUIntCodec;

impl ItemCodec<u64> for VarUIntCodec {
    #[inline]
    fn encode<S: OutputSink + ?Sized>(&self, item: &u64, sink: &mut S) -> WireResult<()> {
        bitstream::write_var_uint(sink, *item)?;
        Ok(())
    }

    #[inline]
    fn decode(&self, reader: &mut ByteReader<'_>) -> WireResult<u64> {
        Ok(reader.read_var_uint()?)
    }
}

/// `i64` as a zigzag VarInt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VarIntCodec;

impl ItemCodec<i64> for VarIntCodec {
    #[inline]
    fn encode<S: OutputSink + ?Sized>(&self, item: &i64, sink: &mut S) -> WireResult<()> {
        bitstream::write_var_int(sink, *item)?;
        Ok(())
    }

    #[inline]
    fn decode(&self, reader: &mut ByteReader<'_>) -> WireResult<i64> {
        Ok(reader.read_var_int()?)
    }
}

/// Owned strings, each with its own length prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf8Codec {
    pub prefix: LenPrefix,
}

impl Utf8Codec {
    #[must_use]
    pub const fn new(prefix: LenPrefix) -> Self {
        Self { prefix }
    }
}

impl ItemCodec<String> for Utf8Codec {
    fn encode<S: OutputSink + ?Sized>(&self, item: &String, sink: &mut S) -> WireResult<()> {
        text::write_utf8(sink, item, self.prefix)
    }

    fn decode(&self, reader: &mut ByteReader<'_>) -> WireResult<String> {
        text::read_utf8(reader, self.prefix)
    }
}

/// Writes an item count followed by every item in order.
///
/// Items written before a failing item stay committed to the sink.
pub fn write_array<T, C, S>(
    sink: &mut S,
    items: &[T],
    prefix: LenPrefix,
    codec: &C,
) -> WireResult<()>
where
    C: ItemCodec<T>,
    S: OutputSink + ?Sized,
{
    write_len(sink, items.len(), prefix)?;
    for item in items {
        codec.encode(item, sink)?;
    }
    Ok(())
}

/// Reads an item count and decodes exactly that many items.
///
/// The reader does not advance on failure.
pub fn read_array<T, C>(
    reader: &mut ByteReader<'_>,
    prefix: LenPrefix,
    codec: &C,
) -> WireResult<Vec<T>>
where
    C: ItemCodec<T>,
{
    read_array_limited(reader, prefix, codec, usize::MAX)
}

/// Like [`read_array`], rejecting counts above `limits.max_array_len`.
pub fn read_array_with_limits<T, C>(
    reader: &mut ByteReader<'_>,
    prefix: LenPrefix,
    codec: &C,
    limits: &Limits,
) -> WireResult<Vec<T>>
where
    C: ItemCodec<T>,
{
    read_array_limited(reader, prefix, codec, limits.max_array_len)
}

fn read_array_limited<T, C>(
    reader: &mut ByteReader<'_>,
    prefix: LenPrefix,
    codec: &C,
    limit: usize,
) -> WireResult<Vec<T>>
where
    C: ItemCodec<T>,
{
    let mut cursor = reader.clone();
    let len = read_len_limited(&mut cursor, prefix, LimitKind::ArrayLen, limit)?;
    // Every item occupies at least one byte for all built-in codecs, so the
    // remaining input bounds a sane pre-allocation.
    let mut items = Vec::with_capacity(len.min(cursor.remaining()));
    for _ in 0..len {
        items.push(codec.decode(&mut cursor)?);
    }
    *reader = cursor;
    Ok(items)
}
