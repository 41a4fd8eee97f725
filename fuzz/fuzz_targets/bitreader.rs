#![no_main]

use bitstream::{BitReader, ByteReader};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut bits = BitReader::new(data);
    let mut idx = 0usize;

    // Use input bytes to drive a bounded sequence of bit reads.
    while idx < data.len() && idx < 1024 {
        let op = data[idx] % 3;
        idx += 1;

        let before = bits.bits_remaining();
        let result = match op {
            0 => bits.read_bool().map(u32::from),
            1 => bits.read_bits(data[idx - 1] % 40),
            _ => bits.read_bits(32),
        };
        if result.is_err() {
            assert_eq!(bits.bits_remaining(), before);
        }
    }

    // Then walk the same input as a byte stream.
    let mut bytes = ByteReader::new(data);
    while !bytes.is_empty() {
        let before = bytes.position();
        let ok = match bytes.peek_slice(1).map(|b| b[0] % 5) {
            Ok(0) => bytes.read_var_uint().is_ok(),
            Ok(1) => bytes.read_var_int().is_ok(),
            Ok(2) => bytes.read_u32().is_ok(),
            Ok(3) => bytes.read_f64().is_ok(),
            _ => bytes.read_u8().is_ok(),
        };
        if !ok {
            assert_eq!(bytes.position(), before);
            break;
        }
    }
});
