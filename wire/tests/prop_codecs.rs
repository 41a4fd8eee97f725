use bitstream::{ByteReader, VecSink};
use proptest::prelude::*;
use wire::{
    crc32c, estimate_len_size, peek_var_len, read_array, read_bytes_with_len, read_len, read_utf8,
    write_array, write_bytes_with_len, write_len, write_utf8, Crc32c, I32Codec, LenPrefix,
    Utf8Codec, VarUIntCodec, WireError, MAX_DECODED_LEN,
};

fn prefix_strategy() -> impl Strategy<Value = LenPrefix> {
    prop_oneof![
        Just(LenPrefix::U8),
        Just(LenPrefix::U16),
        Just(LenPrefix::U32),
        Just(LenPrefix::Var),
    ]
}

fn capacity(prefix: LenPrefix) -> usize {
    usize::try_from(prefix.max_len()).unwrap_or(usize::MAX).min(MAX_DECODED_LEN)
}

proptest! {
    #[test]
    fn prop_len_roundtrip(prefix in prefix_strategy(), raw in any::<usize>()) {
        let len = raw % (capacity(prefix) + 1);
        let mut sink = VecSink::new();
        write_len(&mut sink, len, prefix).unwrap();
        let bytes = sink.into_vec();
        prop_assert_eq!(bytes.len(), estimate_len_size(len, prefix));

        let mut reader = ByteReader::new(&bytes);
        prop_assert_eq!(read_len(&mut reader, prefix).unwrap(), len);
        prop_assert!(reader.is_empty());
    }

    #[test]
    fn prop_len_over_capacity_fails(prefix in prop_oneof![Just(LenPrefix::U8), Just(LenPrefix::U16)], extra in 1usize..100_000) {
        let len = capacity(prefix) + extra;
        let mut sink = VecSink::new();
        let is_out_of_range = matches!(
            write_len(&mut sink, len, prefix),
            Err(WireError::LengthOutOfRange { .. })
        );
        prop_assert!(is_out_of_range);
        prop_assert!(sink.as_slice().is_empty());
    }

    #[test]
    fn prop_peek_var_len_matches_encoding(len in 0usize..=MAX_DECODED_LEN, tail in prop::collection::vec(any::<u8>(), 0..8)) {
        let mut sink = VecSink::new();
        write_len(&mut sink, len, LenPrefix::Var).unwrap();
        let prefix_len = sink.as_slice().len();
        let mut bytes = sink.into_vec();
        bytes.extend_from_slice(&tail);
        prop_assert_eq!(peek_var_len(&bytes), Some(prefix_len));
    }

    #[test]
    fn prop_text_roundtrip(texts in prop::collection::vec(".{0,40}", 0..8), prefix in prefix_strategy()) {
        let mut sink = VecSink::new();
        for text in &texts {
            write_utf8(&mut sink, text, prefix).unwrap();
        }
        let bytes = sink.into_vec();
        let mut reader = ByteReader::new(&bytes);
        for text in &texts {
            prop_assert_eq!(&read_utf8(&mut reader, prefix).unwrap(), text);
        }
        prop_assert!(reader.is_empty());
    }

    #[test]
    fn prop_bytes_with_len_roundtrip(payload in prop::collection::vec(any::<u8>(), 0..512), prefix in prefix_strategy()) {
        let mut sink = VecSink::new();
        write_bytes_with_len(&mut sink, &payload, prefix).unwrap();
        let bytes = sink.into_vec();
        let mut reader = ByteReader::new(&bytes);
        prop_assert_eq!(read_bytes_with_len(&mut reader, prefix).unwrap(), payload.as_slice());
        prop_assert!(reader.is_empty());
    }

    #[test]
    fn prop_array_roundtrip(values in prop::collection::vec(any::<i32>(), 0..200), prefix in prefix_strategy()) {
        let mut sink = VecSink::new();
        write_array(&mut sink, &values, prefix, &I32Codec).unwrap();
        let bytes = sink.into_vec();
        prop_assert_eq!(bytes.len(), estimate_len_size(values.len(), prefix) + values.len() * 4);

        let mut reader = ByteReader::new(&bytes);
        prop_assert_eq!(read_array(&mut reader, prefix, &I32Codec).unwrap(), values);
        prop_assert!(reader.is_empty());
    }

    #[test]
    fn prop_nested_codecs_roundtrip(values in prop::collection::vec("[a-z]{0,12}", 0..16), counts in prop::collection::vec(any::<u64>(), 0..16)) {
        let codec = Utf8Codec::new(LenPrefix::U8);
        let mut sink = VecSink::new();
        write_array(&mut sink, &values, LenPrefix::Var, &codec).unwrap();
        write_array(&mut sink, &counts, LenPrefix::U16, &VarUIntCodec).unwrap();
        let bytes = sink.into_vec();

        let mut reader = ByteReader::new(&bytes);
        prop_assert_eq!(read_array(&mut reader, LenPrefix::Var, &codec).unwrap(), values);
        prop_assert_eq!(read_array(&mut reader, LenPrefix::U16, &VarUIntCodec).unwrap(), counts);
        prop_assert!(reader.is_empty());
    }

    #[test]
    fn prop_decoders_never_advance_on_failure(data in prop::collection::vec(any::<u8>(), 0..32), prefix in prefix_strategy()) {
        let mut reader = ByteReader::new(&data);
        if read_utf8(&mut reader, prefix).is_err() {
            prop_assert_eq!(reader.position(), 0);
        }
        let mut reader = ByteReader::new(&data);
        if read_array(&mut reader, prefix, &I32Codec).is_err() {
            prop_assert_eq!(reader.position(), 0);
        }
        let mut reader = ByteReader::new(&data);
        if read_bytes_with_len(&mut reader, prefix).is_err() {
            prop_assert_eq!(reader.position(), 0);
        }
    }

    #[test]
    fn prop_crc_streaming_matches_one_shot(data in prop::collection::vec(any::<u8>(), 0..256), cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..6)) {
        let mut points: Vec<usize> = cuts.iter().map(|c| c.index(data.len() + 1)).collect();
        points.sort_unstable();

        let mut crc = Crc32c::new();
        let mut start = 0;
        for point in points {
            crc.update(&data[start..point]);
            start = point;
        }
        crc.update(&data[start..]);
        prop_assert_eq!(crc.value(), crc32c::checksum(&data));
    }
}
