//! Base-58 encoding, with and without checksum.
//!
//! The value is treated as a big-endian unsigned integer and written in base 58. Leading zero
//! bytes carry no numeric value, so each one is written as a leading `'1'` (the zero digit) to
//! keep them.
//!
//! Some Bitcoin standards use base-58 encoding with an additional checksum. The checksum
//! is appended to the end of the data before encoding and consists of the first 4 bytes of
//! the SHA256D hash of the data.

use crate::bitcoin::Hash;
use crate::{Error, Result};
use base58::{FromBase58, ToBase58};
use log::trace;

/// The Bitcoin base-58 alphabet. `0`, `O`, `I` and `l` are excluded to avoid confusion.
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// The largest payload, in bytes, that [decode] accepts.
pub const MAX_DECODED_SIZE: usize = 128;

const CHECKSUM_SIZE: usize = 4;

/// Encodes `data` as a base58 string.
pub fn encode(data: &[u8]) -> String {
    data.to_base58()
}

/// Decodes a base58 string.
///
/// Fails with [Error::InvalidBase58Character] at the first byte that is not in the [ALPHABET],
/// and with [Error::BadData] if the decoded value would be larger than [MAX_DECODED_SIZE].
pub fn decode(encoded: &str) -> Result<Vec<u8>> {
    // each leading '1' is a zero byte, every other digit carries log256(58) < 0.733 bytes
    let zeros = encoded.bytes().take_while(|b| *b == ALPHABET[0]).count();
    let estimate = zeros + (encoded.len() - zeros) * 733 / 1000 + 1;
    if estimate > MAX_DECODED_SIZE {
        trace!("base58 string of {} characters is too long", encoded.len());
        return Err(Error::BadData(format!(
            "base58 string too long, at most {} bytes can be decoded",
            MAX_DECODED_SIZE
        )));
    }
    Ok(encoded.from_base58()?)
}

/// Encodes `data` as a base58 string including the checksum.
///
/// The checksum is the first four bytes of the sha256d of the data and is concatenated onto the
/// end.
pub fn encode_with_checksum(data: &[u8]) -> String {
    let mut ck_data = Vec::with_capacity(data.len() + CHECKSUM_SIZE);
    ck_data.extend_from_slice(data);
    ck_data.extend_from_slice(&Hash::sha256d(data).checksum());
    encode(&ck_data)
}

/// Decode from base58 with checksum, verifying and removing the checksum.
///
/// The checksum is the first four bytes of the sha256d of the data and is concatenated onto the end
/// of the base58 encoding.
pub fn decode_with_checksum(encoded: &str) -> Result<Vec<u8>> {
    let mut data = decode(encoded)?;
    let l = data.len();
    if l < CHECKSUM_SIZE {
        trace!("base58 string of {} bytes can not hold a checksum", l);
        return Err(Error::BadData(
            "base58 string too short to contain checksum".to_string(),
        ));
    }
    let ck = Hash::sha256d(&data[..l - CHECKSUM_SIZE]);
    if ck.checksum() != data[l - CHECKSUM_SIZE..] {
        trace!("base58 checksum mismatch");
        return Err(Error::ChecksumMismatch);
    }
    data.truncate(l - CHECKSUM_SIZE);
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base58::{FromBase58, ToBase58};
    use hex_literal::hex;

    #[test]
    fn test_base58ck_encode() {
        // from output 0 of tx 1e155211334dfcf345cf257fabbf8fcc5f665f26cd5d612f1b5331ff3ec950fa
        // 160 hash is 2c7a568d346629f5308a5b75d825d28b09297153
        // prepend 0x00 for mainnet address
        let addr = hex!("002c7a568d346629f5308a5b75d825d28b09297153");
        assert_eq!(
            encode_with_checksum(&addr),
            "154BHe8d7Dmm7pWLG8J9gceXiCfCRDtWAo"
        );
    }

    #[test]
    fn test_base58ck_decode() {
        let h = hex!("002c7a568d346629f5308a5b75d825d28b09297153");
        let r = decode_with_checksum("154BHe8d7Dmm7pWLG8J9gceXiCfCRDtWAo")
            .expect("Failed to decode test address");
        assert_eq!(r, h);
    }

    #[test]
    fn known_vectors() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(&[0]), "1");
        assert_eq!(encode(&[0, 0, 0, 0]), "1111");
        assert_eq!(encode(&[57]), "z");
        assert_eq!(encode(&[58]), "21");
        assert_eq!(encode(b"hello world"), "StV1DL6CwTryKyV");
        assert_eq!(encode(&hex!("00000000000000000000")), "1111111111");
        assert_eq!(encode(&hex!("0000287fb4cd")), "11233QC4");
        assert_eq!(decode("StV1DL6CwTryKyV").unwrap(), b"hello world");
        assert_eq!(decode("11233QC4").unwrap(), hex!("0000287fb4cd"));
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
        assert_eq!(decode("1").unwrap(), vec![0]);
    }

    #[test]
    fn leading_zeros_kept() {
        let data = hex!("00000000ff");
        let s = encode(&data);
        assert!(s.starts_with("1111"));
        assert!(!s.starts_with("11111"));
        assert_eq!(decode(&s).unwrap(), data);
    }

    #[test]
    fn matches_base58_crate() {
        let vectors: [&[u8]; 4] = [
            &hex!("002c7a568d346629f5308a5b75d825d28b09297153"),
            &hex!("0500112233445566778899aabbccddeeff00112233"),
            b"hello world",
            &hex!("ffffffffffffffffffffffffffffffff"),
        ];
        for v in vectors {
            let ours = encode(v);
            assert_eq!(ours, v.to_base58());
            assert_eq!(ours.from_base58().unwrap(), decode(&ours).unwrap());
        }
    }

    #[test]
    fn invalid_characters() {
        for (s, c, pos) in [("0abc", '0', 0), ("abcO", 'O', 3), ("aIb", 'I', 1), ("ab l", ' ', 2)] {
            match decode(s) {
                Err(Error::InvalidBase58Character(found, at)) => {
                    assert_eq!(found, c);
                    assert_eq!(at, pos);
                }
                other => panic!("unexpected result for {}: {:?}", s, other),
            }
        }
        assert!(decode("abcé").unwrap_err().is_format_error());
    }

    #[test]
    fn checksum_failures() {
        // flip the last character of a valid encoding
        let mut s = encode_with_checksum(&hex!("002c7a568d346629f5308a5b75d825d28b09297153"));
        s.pop();
        s.push('p');
        assert!(matches!(decode_with_checksum(&s), Err(Error::ChecksumMismatch)));
        assert!(matches!(decode_with_checksum("111"), Err(Error::BadData(_))));
        assert!(decode_with_checksum("0OIl").unwrap_err().is_format_error());
    }

    #[test]
    fn empty_payload_with_checksum() {
        let s = encode_with_checksum(&[]);
        assert_eq!(decode_with_checksum(&s).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn large_payloads() {
        let data: Vec<u8> = (0..120).map(|i| (i * 7 + 1) as u8).collect();
        assert_eq!(decode(&encode(&data)).unwrap(), data);
        let mut zeros = vec![0u8; 60];
        zeros.extend_from_slice(&data[..60]);
        assert_eq!(decode(&encode(&zeros)).unwrap(), zeros);
    }

    #[test]
    fn too_long_is_rejected() {
        assert!(matches!(decode(&"1".repeat(200)), Err(Error::BadData(_))));
        let long = format!("{}{}", "1".repeat(100), "z".repeat(100));
        assert!(decode(&long).unwrap_err().is_format_error());
        assert!(decode_with_checksum(&"2".repeat(300)).unwrap_err().is_format_error());
    }
}
