//! Fixed-width integer reads and writes into caller-provided byte buffers or appended to a
//! [BufMut] stream, plus a few byte array manipulations that come up when displaying or packing
//! Bitcoin data.
//!
//! Buffers are never resized. Every offset is checked and an out-of-bounds access is reported
//! as [Error::BadArgument] rather than a panic.

use crate::{Error, Result};
use bytes::{Buf, BufMut};

// check that buffer[offset..offset+width] exists
fn check_range(len: usize, offset: usize, width: usize) -> Result<()> {
    match offset.checked_add(width) {
        Some(end) if end <= len => Ok(()),
        _ => Err(Error::BadArgument(format!(
            "{} bytes at offset {} do not fit in a buffer of {} bytes",
            width, offset, len
        ))),
    }
}

/// Write the value as 4 big-endian bytes at `offset`.
pub fn write_u32_be(value: u32, buffer: &mut [u8], offset: usize) -> Result<()> {
    check_range(buffer.len(), offset, 4)?;
    (&mut buffer[offset..offset + 4]).put_u32(value);
    Ok(())
}

/// Write the value as 4 little-endian bytes at `offset`.
pub fn write_u32_le(value: u32, buffer: &mut [u8], offset: usize) -> Result<()> {
    check_range(buffer.len(), offset, 4)?;
    (&mut buffer[offset..offset + 4]).put_u32_le(value);
    Ok(())
}

/// Write the value as 8 little-endian bytes at `offset`.
pub fn write_u64_le(value: u64, buffer: &mut [u8], offset: usize) -> Result<()> {
    check_range(buffer.len(), offset, 8)?;
    (&mut buffer[offset..offset + 8]).put_u64_le(value);
    Ok(())
}

// check that the stream can take `width` more bytes
pub(crate) fn check_capacity(buffer: &dyn BufMut, width: usize) -> Result<()> {
    if buffer.remaining_mut() < width {
        return Err(Error::BadArgument(format!(
            "{} bytes do not fit in a stream with room for {}",
            width,
            buffer.remaining_mut()
        )));
    }
    Ok(())
}

/// Append the value to the stream as 4 little-endian bytes.
pub fn write_u32_le_to(buffer: &mut dyn BufMut, value: u32) -> Result<()> {
    check_capacity(buffer, 4)?;
    buffer.put_u32_le(value);
    Ok(())
}

/// Append the value to the stream as 8 little-endian bytes, two's complement.
pub fn write_i64_le_to(buffer: &mut dyn BufMut, value: i64) -> Result<()> {
    check_capacity(buffer, 8)?;
    buffer.put_i64_le(value);
    Ok(())
}

/// Read 2 big-endian bytes at `offset`.
pub fn read_u16_be(buffer: &[u8], offset: usize) -> Result<u16> {
    check_range(buffer.len(), offset, 2)?;
    Ok((&buffer[offset..]).get_u16())
}

/// Read 4 big-endian bytes at `offset`.
pub fn read_u32_be(buffer: &[u8], offset: usize) -> Result<u32> {
    check_range(buffer.len(), offset, 4)?;
    Ok((&buffer[offset..]).get_u32())
}

/// Read 4 little-endian bytes at `offset`.
pub fn read_u32_le(buffer: &[u8], offset: usize) -> Result<u32> {
    check_range(buffer.len(), offset, 4)?;
    Ok((&buffer[offset..]).get_u32_le())
}

/// Read 8 little-endian bytes at `offset` as a signed value.
///
/// The top bit of the stored pattern becomes the sign, so a value written with [write_u64_le]
/// that is larger than `i64::MAX` reads back negative.
pub fn read_i64_le(buffer: &[u8], offset: usize) -> Result<i64> {
    check_range(buffer.len(), offset, 8)?;
    Ok((&buffer[offset..]).get_i64_le())
}

/// Returns a copy of the bytes in reverse order.
///
/// Hashes are displayed in reversed byte order, this converts between the two.
pub fn reverse_bytes(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().rev().copied().collect()
}

/// Returns a copy of the bytes with the bytes of each double-word (4 bytes) reversed.
///
/// The order of the double-words is preserved. The length of `bytes` must be a multiple of 4.
/// When `trim_length` is given it must also be a multiple of 4 and the output is truncated to
/// at most that many bytes.
pub fn reverse_dword_bytes(bytes: &[u8], trim_length: Option<usize>) -> Result<Vec<u8>> {
    if bytes.len() % 4 != 0 {
        return Err(Error::BadArgument(format!(
            "length must be a multiple of 4, got {}",
            bytes.len()
        )));
    }
    let out_len = match trim_length {
        Some(t) if t % 4 != 0 => {
            return Err(Error::BadArgument(format!(
                "trim length must be a multiple of 4, got {}",
                t
            )));
        }
        Some(t) => t.min(bytes.len()),
        None => bytes.len(),
    };
    let mut rev = Vec::with_capacity(out_len);
    for dword in bytes[..out_len].chunks_exact(4) {
        rev.extend(dword.iter().rev());
    }
    Ok(rev)
}

// the byte holding bit `index` of a little-endian bitfield, and the mask within that byte
fn bit_position(len: usize, index: usize) -> Result<(usize, u8)> {
    let byte = index >> 3;
    if byte >= len {
        return Err(Error::BadArgument(format!(
            "bit {} is outside a bitfield of {} bytes",
            index, len
        )));
    }
    Ok((byte, 1u8 << (index & 7)))
}

/// Checks whether the bit is set in a little-endian packed bitfield.
///
/// Bit `index` is stored in byte `index / 8`, bit 0 being the least significant bit of the byte.
pub fn check_bit_le(data: &[u8], index: usize) -> Result<bool> {
    let (byte, mask) = bit_position(data.len(), index)?;
    Ok(data[byte] & mask != 0)
}

/// Sets the bit in a little-endian packed bitfield. See [check_bit_le].
pub fn set_bit_le(data: &mut [u8], index: usize) -> Result<()> {
    let (byte, mask) = bit_position(data.len(), index)?;
    data[byte] |= mask;
    Ok(())
}

/// Decode a lowercase or uppercase hex string without separators.
pub fn hex_to_bytes(hex_str: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(hex_str)?)
}

/// Encode the bytes as lowercase hex, two characters per byte.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
