#![no_main]

use libfuzzer_sys::fuzz_target;
use bitcoinsv_codec::bitcoin::{varint_encode, varint_decode, varint_size, VarInt};
use bytes::BytesMut;

fuzz_target!(|data: &[u8]| {
    // Truncated input must be an error, never a panic
    let mut buffer = data;
    if let Ok(value) = varint_decode(&mut buffer) {
        // If we successfully decoded a value, verify round-trip
        let mut encode_buffer = BytesMut::new();
        if varint_encode(&mut encode_buffer, value).is_ok() {
            // Verify size calculation
            let calculated_size = varint_size(value);
            assert_eq!(calculated_size as usize, encode_buffer.len());

            // Verify round-trip
            let mut decode_buffer = encode_buffer.as_ref();
            if let Ok(decoded) = varint_decode(&mut decode_buffer) {
                assert_eq!(value, decoded);
            }
        }

        // The framing size never exceeds the input
        let v = VarInt::decode(data).expect("decoded once already");
        assert!(v.size <= data.len());
    }
});
