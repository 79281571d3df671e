//! Conversions between arbitrary precision integers and their Bitcoin byte representations.
//!
//! Bitcoin uses several encodings for big numbers:
//!
//! * fixed width big-endian byte arrays, e.g. private keys and signature components,
//! * the OpenSSL MPI format (`BN_bn2mpi`), a sign-and-magnitude encoding with an optional
//!   4 byte big-endian length prefix,
//! * the compact "nBits" format used in block headers for the difficulty target, which is a
//!   truncated MPI packed into 32 bits.
//!
//! MPI and compact encodings are sign-and-magnitude, not two's complement. The sign lives in
//! the top bit of the first magnitude byte, so [BigInt] (which stores a sign and an unsigned
//! magnitude) maps onto them directly.

use crate::bitcoin::binary::{check_capacity, read_u32_be, write_u64_le};
use crate::{Error, Result};
use bytes::BufMut;
use log::trace;
use num::bigint::{BigInt, BigUint, Sign};
use num::{ToPrimitive, Zero};

const MPI_LENGTH_SIZE: usize = 4;
const MPI_SIGN_BIT: u8 = 0x80;

// number of bytes needed to hold the magnitude, zero needs none
fn magnitude_size(value: &BigUint) -> usize {
    ((value.bits() + 7) / 8) as usize
}

/// Render a non-negative integer as exactly `width` big-endian bytes.
///
/// Short values are left-padded with zeros. A value that does not fit is truncated by dropping
/// its most significant bytes; callers are responsible for choosing a `width` that is large
/// enough, or can use [bigint_to_bytes_checked]. An absent value gives an absent result.
pub fn bigint_to_bytes(value: Option<&BigUint>, width: usize) -> Option<Vec<u8>> {
    value.map(|v| fit_to_width(v, width))
}

/// Render a non-negative integer as exactly `width` big-endian bytes, failing with
/// [Error::UnsupportedMagnitude] if it does not fit.
pub fn bigint_to_bytes_checked(value: &BigUint, width: usize) -> Result<Vec<u8>> {
    let required = magnitude_size(value);
    if required > width {
        return Err(Error::UnsupportedMagnitude {
            required,
            available: width,
        });
    }
    Ok(fit_to_width(value, width))
}

fn fit_to_width(value: &BigUint, width: usize) -> Vec<u8> {
    let mut out = vec![0u8; width];
    if value.is_zero() {
        return out;
    }
    let magnitude = value.to_bytes_be();
    if magnitude.len() >= width {
        out.copy_from_slice(&magnitude[magnitude.len() - width..]);
    } else {
        out[width - magnitude.len()..].copy_from_slice(&magnitude);
    }
    out
}

/// Write a non-negative integer as an unsigned 64-bit little-endian value at `offset`.
///
/// Fails with [Error::UnsupportedMagnitude] if the value needs more than 8 bytes.
pub fn write_biguint_u64_le(value: &BigUint, buffer: &mut [u8], offset: usize) -> Result<()> {
    match value.to_u64() {
        Some(v) => write_u64_le(v, buffer, offset),
        None => Err(Error::UnsupportedMagnitude {
            required: magnitude_size(value),
            available: 8,
        }),
    }
}

/// Append a non-negative integer to the stream as an unsigned 64-bit little-endian value.
///
/// Fails with [Error::UnsupportedMagnitude] if the value needs more than 8 bytes, nothing is
/// written in that case.
pub fn write_biguint_u64_le_to(buffer: &mut dyn BufMut, value: &BigUint) -> Result<()> {
    let v = value.to_u64().ok_or_else(|| Error::UnsupportedMagnitude {
        required: magnitude_size(value),
        available: 8,
    })?;
    check_capacity(buffer, 8)?;
    buffer.put_u64_le(v);
    Ok(())
}

/// Encode the integer in the MPI format produced by the OpenSSL `BN_bn2mpi` function.
///
/// The magnitude is written big-endian. If the top bit of the first magnitude byte is set an
/// extra zero byte is prepended so that the top bit is free to carry the sign, which is then set
/// for negative values. Zero has an empty magnitude.
///
/// If `include_length` is set the magnitude is preceded by its length as a 4 byte big-endian
/// integer. The length does not include itself.
pub fn encode_mpi(value: &BigInt, include_length: bool) -> Vec<u8> {
    let (sign, mut magnitude) = value.to_bytes_be();
    if value.is_zero() {
        magnitude.clear();
    } else {
        if magnitude[0] & MPI_SIGN_BIT != 0 {
            magnitude.insert(0, 0);
        }
        if sign == Sign::Minus {
            magnitude[0] |= MPI_SIGN_BIT;
        }
    }
    if !include_length {
        return magnitude;
    }
    let mut result = Vec::with_capacity(MPI_LENGTH_SIZE + magnitude.len());
    result.extend_from_slice(&(magnitude.len() as u32).to_be_bytes());
    result.extend_from_slice(&magnitude);
    result
}

/// Decode an integer in the MPI format produced by the OpenSSL `BN_bn2mpi` function.
///
/// If `has_length` is set the data must start with a 4 byte big-endian length which must match
/// the number of bytes that follow it exactly, anything else is [Error::BadData]. Trailing bytes
/// after the declared length are rejected, not ignored. Without a length the whole slice is the
/// magnitude. An empty magnitude is zero.
pub fn decode_mpi(mpi: &[u8], has_length: bool) -> Result<BigInt> {
    let magnitude = if has_length {
        let length = read_u32_be(mpi, 0).map_err(|_| {
            trace!("MPI of {} bytes is too short for its length field", mpi.len());
            Error::BadData("MPI too short to contain length".to_string())
        })? as usize;
        let magnitude = &mpi[MPI_LENGTH_SIZE..];
        if magnitude.len() != length {
            trace!(
                "MPI length field {} does not match {} remaining bytes",
                length,
                magnitude.len()
            );
            return Err(Error::BadData(format!(
                "MPI length field is {} but {} bytes follow",
                length,
                magnitude.len()
            )));
        }
        magnitude
    } else {
        mpi
    };
    Ok(decode_mpi_magnitude(magnitude))
}

// sign bit in the first byte, big-endian magnitude in the rest
fn decode_mpi_magnitude(buf: &[u8]) -> BigInt {
    if buf.is_empty() {
        return BigInt::zero();
    }
    let mut buf = buf.to_vec();
    let is_negative = buf[0] & MPI_SIGN_BIT != 0;
    buf[0] &= !MPI_SIGN_BIT;
    let magnitude = BigUint::from_bytes_be(&buf);
    // BigInt normalises a negative zero to zero
    BigInt::from_biguint(if is_negative { Sign::Minus } else { Sign::Plus }, magnitude)
}

/// Decode the compact "nBits" representation of a difficulty target.
///
/// The top byte is the size of the number in bytes, the remaining three bytes are the most
/// significant bytes of an MPI magnitude of that size (sign bit included). A size smaller than
/// three drops the trailing mantissa bytes, a size of zero is zero.
pub fn decode_compact_bits(compact: u32) -> BigInt {
    let packed = compact.to_be_bytes();
    let size = packed[0] as usize;
    let mut magnitude = vec![0u8; size];
    let n = size.min(3);
    magnitude[..n].copy_from_slice(&packed[1..1 + n]);
    decode_mpi_magnitude(&magnitude)
}

/// Encode an integer in the compact "nBits" representation.
///
/// Only the three most significant bytes survive, so this is the inverse of
/// [decode_compact_bits] only for values that are exactly representable. Values whose magnitude
/// needs more than 255 bytes fail with [Error::UnsupportedMagnitude].
pub fn encode_compact_bits(value: &BigInt) -> Result<u32> {
    let magnitude = value.magnitude();
    let mut size = magnitude_size(magnitude);
    let mut compact = if size <= 3 {
        (magnitude << (8 * (3 - size))).to_u32().unwrap_or(0)
    } else {
        (magnitude >> (8 * (size - 3))).to_u32().unwrap_or(0)
    };
    // the top mantissa bit is the sign, move the mantissa down a byte if it is in use
    if compact & 0x0080_0000 != 0 {
        compact >>= 8;
        size += 1;
    }
    if size > 0xff {
        return Err(Error::UnsupportedMagnitude {
            required: size,
            available: 0xff,
        });
    }
    compact |= (size as u32) << 24;
    if value.sign() == Sign::Minus && compact & 0x007f_ffff != 0 {
        compact |= 0x0080_0000;
    }
    Ok(compact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use num::Num;

    fn big(hex_str: &str) -> BigInt {
        BigInt::from_str_radix(hex_str, 16).unwrap()
    }

    #[test]
    fn fixed_width_padding() {
        let v = BigUint::from(0x1234u32);
        assert_eq!(bigint_to_bytes(Some(&v), 4).unwrap(), vec![0, 0, 0x12, 0x34]);
        assert_eq!(bigint_to_bytes(Some(&v), 2).unwrap(), vec![0x12, 0x34]);
        assert_eq!(
            bigint_to_bytes(Some(&BigUint::zero()), 3).unwrap(),
            vec![0, 0, 0]
        );
        assert_eq!(bigint_to_bytes(None, 32), None);
    }

    #[test]
    fn fixed_width_high_bit() {
        // a value with the top bit set still fits its natural width, there is no sign byte
        let v = BigUint::from(0xff00u32);
        assert_eq!(bigint_to_bytes(Some(&v), 2).unwrap(), vec![0xff, 0x00]);
        assert_eq!(bigint_to_bytes_checked(&v, 2).unwrap(), vec![0xff, 0x00]);
    }

    #[test]
    fn fixed_width_truncation() {
        let v = BigUint::from(0x123456u32);
        assert_eq!(bigint_to_bytes(Some(&v), 2).unwrap(), vec![0x34, 0x56]);
        match bigint_to_bytes_checked(&v, 2) {
            Err(Error::UnsupportedMagnitude {
                required,
                available,
            }) => {
                assert_eq!(required, 3);
                assert_eq!(available, 2);
            }
            other => panic!("unexpected result {:?}", other),
        }
        assert!(bigint_to_bytes_checked(&BigUint::zero(), 0).unwrap().is_empty());
    }

    #[test]
    fn biguint_u64() {
        let mut buf = [0u8; 8];
        write_biguint_u64_le(&BigUint::from(u64::MAX), &mut buf, 0).unwrap();
        assert_eq!(buf, [0xff; 8]);
        write_biguint_u64_le(&BigUint::from(0x0102u32), &mut buf, 0).unwrap();
        assert_eq!(buf, hex!("0201000000000000"));
        let too_big = BigUint::from(u64::MAX) + 1u32;
        assert!(write_biguint_u64_le(&too_big, &mut buf, 0).is_err());
    }

    #[test]
    fn biguint_u64_stream() {
        let mut v = Vec::new();
        write_biguint_u64_le_to(&mut v, &BigUint::from(0x0102u32)).unwrap();
        write_biguint_u64_le_to(&mut v, &BigUint::from(u64::MAX)).unwrap();
        assert_eq!(v, hex!("0201000000000000ffffffffffffffff"));

        // nine bytes
        let too_big = BigUint::from(u64::MAX) + 1u32;
        match write_biguint_u64_le_to(&mut v, &too_big) {
            Err(Error::UnsupportedMagnitude {
                required,
                available,
            }) => {
                assert_eq!(required, 9);
                assert_eq!(available, 8);
            }
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(v.len(), 16);
    }

    #[test]
    fn mpi_zero() {
        assert_eq!(encode_mpi(&BigInt::zero(), false), Vec::<u8>::new());
        assert_eq!(encode_mpi(&BigInt::zero(), true), vec![0, 0, 0, 0]);
        assert_eq!(decode_mpi(&[], false).unwrap(), BigInt::zero());
        assert_eq!(decode_mpi(&[0, 0, 0, 0], true).unwrap(), BigInt::zero());
    }

    #[test]
    fn mpi_known_values() {
        // vectors from the OpenSSL BN_bn2mpi documentation
        assert_eq!(encode_mpi(&BigInt::from(0x80), true), hex!("000000020080"));
        assert_eq!(encode_mpi(&BigInt::from(-0x80), true), hex!("000000028080"));
        assert_eq!(encode_mpi(&BigInt::from(0x7f), true), hex!("000000017f"));
        assert_eq!(encode_mpi(&BigInt::from(-0x7f), true), hex!("00000001ff"));
        assert_eq!(encode_mpi(&BigInt::from(-1), false), hex!("81"));
        assert_eq!(encode_mpi(&BigInt::from(0x1234), false), hex!("1234"));
        assert_eq!(encode_mpi(&BigInt::from(-0x1234), false), hex!("9234"));
        assert_eq!(encode_mpi(&BigInt::from(0x8000), false), hex!("008000"));
        assert_eq!(encode_mpi(&BigInt::from(-0x8000), false), hex!("808000"));
    }

    #[test]
    fn mpi_decode_known_values() {
        assert_eq!(decode_mpi(&hex!("000000020080"), true).unwrap(), BigInt::from(0x80));
        assert_eq!(decode_mpi(&hex!("000000028080"), true).unwrap(), BigInt::from(-0x80));
        assert_eq!(decode_mpi(&hex!("ff"), false).unwrap(), BigInt::from(-0x7f));
        assert_eq!(decode_mpi(&hex!("9234"), false).unwrap(), BigInt::from(-0x1234));
        // negative zero
        assert_eq!(decode_mpi(&hex!("80"), false).unwrap(), BigInt::zero());
    }

    #[test]
    fn mpi_bad_framing() {
        assert!(decode_mpi(&[0, 0, 0], true).unwrap_err().is_format_error());
        assert!(decode_mpi(&hex!("0000000201"), true).is_err());
        assert!(decode_mpi(&hex!("00000001010203"), true).is_err());
    }

    #[test]
    fn mpi_trailing_bytes_rejected() {
        assert_eq!(decode_mpi(&hex!("0000000105"), true).unwrap(), BigInt::from(5));
        assert!(matches!(
            decode_mpi(&hex!("0000000105ff"), true),
            Err(Error::BadData(_))
        ));
    }

    #[test]
    fn mpi_does_not_mutate_input() {
        let input = hex!("9234");
        let _ = decode_mpi(&input, false).unwrap();
        assert_eq!(input, hex!("9234"));
    }

    #[test]
    fn compact_zero_and_small_sizes() {
        assert_eq!(decode_compact_bits(0x00000000), BigInt::zero());
        assert_eq!(decode_compact_bits(0x00123456), BigInt::zero());
        assert_eq!(decode_compact_bits(0x01003456), BigInt::zero());
        assert_eq!(decode_compact_bits(0x01123456), BigInt::from(0x12));
        assert_eq!(decode_compact_bits(0x02123456), BigInt::from(0x1234));
        assert_eq!(decode_compact_bits(0x03123456), BigInt::from(0x123456));
        assert_eq!(decode_compact_bits(0x04123456), BigInt::from(0x12345600));
        assert_eq!(decode_compact_bits(0x05009234), big("92340000"));
    }

    #[test]
    fn compact_negative() {
        assert_eq!(decode_compact_bits(0x01fedcba), BigInt::from(-0x7e));
        assert_eq!(decode_compact_bits(0x04923456), BigInt::from(-0x12345600));
    }

    #[test]
    fn compact_genesis_target() {
        let target = decode_compact_bits(0x1d00ffff);
        assert_eq!(
            target,
            big("00000000ffff0000000000000000000000000000000000000000000000000000")
        );
        assert_eq!(encode_compact_bits(&target).unwrap(), 0x1d00ffff);
    }

    #[test]
    fn compact_large_size() {
        assert_eq!(
            decode_compact_bits(0x20123456),
            big("1234560000000000000000000000000000000000000000000000000000000000")
        );
    }

    #[test]
    fn compact_encode_known_values() {
        assert_eq!(encode_compact_bits(&BigInt::zero()).unwrap(), 0);
        assert_eq!(encode_compact_bits(&BigInt::from(0x12)).unwrap(), 0x01120000);
        assert_eq!(encode_compact_bits(&BigInt::from(-0x7e)).unwrap(), 0x01fe0000);
        assert_eq!(encode_compact_bits(&BigInt::from(0x80)).unwrap(), 0x02008000);
        assert_eq!(encode_compact_bits(&BigInt::from(0x1234)).unwrap(), 0x02123400);
        assert_eq!(encode_compact_bits(&BigInt::from(0x12345600)).unwrap(), 0x04123456);
        assert_eq!(encode_compact_bits(&big("92340000")).unwrap(), 0x05009234);
        assert_eq!(
            encode_compact_bits(&BigInt::from(-0x12345600)).unwrap(),
            0x04923456
        );
    }

    #[test]
    fn compact_encode_too_large() {
        let huge = BigInt::from(1) << (8 * 300);
        assert!(matches!(
            encode_compact_bits(&huge),
            Err(Error::UnsupportedMagnitude { .. })
        ));
    }
}
