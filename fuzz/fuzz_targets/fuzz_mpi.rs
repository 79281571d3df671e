#![no_main]

use libfuzzer_sys::fuzz_target;
use bitcoinsv_codec::bitcoin::{decode_compact_bits, decode_mpi, encode_compact_bits, encode_mpi};

fuzz_target!(|data: &[u8]| {
    // Length prefixed input is checked, raw input always decodes
    let _ = decode_mpi(data, true);
    if let Ok(value) = decode_mpi(data, false) {
        let encoded = encode_mpi(&value, true);
        assert_eq!(decode_mpi(&encoded, true).unwrap(), value);
    }

    // Compact values re-encode to a value that decodes to the same number
    if data.len() >= 4 {
        let compact = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
        let value = decode_compact_bits(compact);
        if let Ok(normalised) = encode_compact_bits(&value) {
            assert_eq!(decode_compact_bits(normalised), value);
        }
    }
});
