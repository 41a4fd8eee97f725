#![no_main]

use bitstream::{ByteReader, VecSink};
use libfuzzer_sys::fuzz_target;
use wire::{LenPrefix, Limits, U16Codec, Utf8Codec, VarIntCodec};

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let Ok(prefix) = LenPrefix::from_raw(selector % 4) else {
        return;
    };
    let limits = Limits::for_testing();

    let mut reader = ByteReader::new(rest);
    while !reader.is_empty() {
        let before = reader.position();
        let ok = match selector / 4 % 5 {
            0 => wire::read_utf8_with_limits(&mut reader, prefix, &limits).is_ok(),
            1 => wire::read_bytes_with_len_with_limits(&mut reader, prefix, &limits).is_ok(),
            2 => wire::read_array_with_limits(&mut reader, prefix, &U16Codec, &limits).is_ok(),
            3 => wire::read_array_with_limits(&mut reader, prefix, &VarIntCodec, &limits).is_ok(),
            _ => {
                let codec = Utf8Codec::new(LenPrefix::U8);
                match wire::read_array_with_limits(&mut reader, prefix, &codec, &limits) {
                    Ok(items) => {
                        // Decoded text must survive a re-encode.
                        let mut sink = VecSink::new();
                        wire::write_array(&mut sink, &items, prefix, &codec).unwrap();
                        let bytes = sink.into_vec();
                        let mut again = ByteReader::new(&bytes);
                        let decoded: Vec<String> =
                            wire::read_array(&mut again, prefix, &codec).unwrap();
                        assert_eq!(decoded, items);
                        true
                    }
                    Err(_) => false,
                }
            }
        };
        if !ok {
            assert_eq!(reader.position(), before);
            break;
        }
    }

    let crc = wire::crc32c::checksum(rest);
    let mut streaming = wire::Crc32c::new();
    let (head, tail) = rest.split_at(rest.len() / 2);
    streaming.update(head);
    streaming.update(tail);
    assert_eq!(streaming.value(), crc);
});
