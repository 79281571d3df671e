use crate::bitcoin::Encodable;
use crate::{Error, Result};
use bytes::{Buf, BufMut};

/// The size of the value encoded as a varint.
pub fn varint_size(value: u64) -> u64 {
    match value {
        0..=252 => 1,
        253..=0xffff => 3,
        0x10000..=0xffffffff => 5,
        _ => 9,
    }
}

/// Read a varint from the buffer.
///
/// Returns [Error::DataTooSmall] if the buffer is shorter than the length announced by the
/// first byte. Nothing beyond the first byte is consumed in that case.
pub fn varint_decode(buffer: &mut dyn Buf) -> Result<u64> {
    if !buffer.has_remaining() {
        return Err(Error::DataTooSmall);
    }
    let n0 = buffer.get_u8();
    let needed = match n0 {
        0xff => 8,
        0xfe => 4,
        0xfd => 2,
        _ => 0,
    };
    if buffer.remaining() < needed {
        return Err(Error::DataTooSmall);
    }
    let v = match n0 {
        0xff => buffer.get_u64_le(),
        0xfe => buffer.get_u32_le() as u64,
        0xfd => buffer.get_u16_le() as u64,
        _ => n0 as u64,
    };
    Ok(v)
}

/// Write a varint to the buffer.
pub fn varint_encode(buffer: &mut dyn BufMut, value: u64) -> Result<()> {
    match value {
        0..=252 => buffer.put_u8(value as u8),
        253..=0xffff => {
            buffer.put_u8(0xfd);
            buffer.put_u16_le(value as u16);
        }
        0x10000..=0xffffffff => {
            buffer.put_u8(0xfe);
            buffer.put_u32_le(value as u32);
        }
        _ => {
            buffer.put_u8(0xff);
            buffer.put_u64_le(value);
        }
    };
    Ok(())
}

/// A decoded variable length integer together with the number of bytes it occupies.
///
/// Some fields use a varint purely for framing, and the reader needs to know how far to skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInt {
    pub value: u64,
    pub size: usize,
}

impl VarInt {
    pub fn new(value: u64) -> VarInt {
        VarInt {
            value,
            size: varint_size(value) as usize,
        }
    }

    /// The encoded form.
    pub fn encode(&self) -> Vec<u8> {
        let mut v = Vec::with_capacity(self.size);
        // writing into a Vec can not fail
        let _ = varint_encode(&mut v, self.value);
        v
    }

    /// Decode a varint from the start of `data`, trailing bytes are ignored.
    pub fn decode(data: &[u8]) -> Result<VarInt> {
        let mut buffer = data;
        let value = varint_decode(&mut buffer)?;
        Ok(VarInt {
            value,
            size: data.len() - buffer.len(),
        })
    }
}

impl Encodable for VarInt {
    fn from_binary(buffer: &mut dyn Buf) -> Result<Self>
    where
        Self: Sized,
    {
        let before = buffer.remaining();
        let value = varint_decode(buffer)?;
        Ok(VarInt {
            value,
            size: before - buffer.remaining(),
        })
    }

    fn to_binary(&self, buffer: &mut dyn BufMut) -> Result<()> {
        varint_encode(buffer, self.value)
    }

    fn encoded_size(&self) -> u64 {
        self.size as u64
    }
}

impl From<u64> for VarInt {
    fn from(value: u64) -> Self {
        VarInt::new(value)
    }
}
