#![no_main]

use libfuzzer_sys::fuzz_target;
use bitcoinsv_codec::bitcoin::{base58ck, parse_address, parse_as_hex_or_base58};

fuzz_target!(|data: &[u8]| {
    // Encoding arbitrary bytes must round-trip, within the decodable size
    if data.len() + 4 <= 100 {
        let encoded = base58ck::encode_with_checksum(data);
        let decoded = base58ck::decode_with_checksum(&encoded).expect("valid encoding");
        assert_eq!(decoded, data);
    }

    // Arbitrary text must be rejected cleanly
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = base58ck::decode(s);
        if let Ok((_, hash)) = parse_address(s) {
            assert!(hash.len() + 1 + 4 <= s.len());
        }
        let _ = parse_as_hex_or_base58(s);
    }
});
