use crate::bitcoin::Encodable;
use crate::Error;
use bytes::{Buf, BufMut};
use hex::{FromHex, ToHex};
use ring::digest::{digest, Context, SHA256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// A struct representing a 32-byte digest, usually a SHA256d hash.
///
/// This is the hash type that is generally used within the Bitcoin infrastructure: transaction
/// and block identifiers and the base58check checksum are all double SHA-256 hashes.
///
/// Every hashing function uses its own digest context, so all of them can be called from any
/// number of threads at once.
// Copying 32 bytes is as cheap as copying a Bytes handle, so no Bytes here.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash {
    pub raw: [u8; 32],
}

// check that data[offset..offset+length] exists and return it
fn sub_range(data: &[u8], offset: usize, length: usize) -> crate::Result<&[u8]> {
    match offset.checked_add(length) {
        Some(end) if end <= data.len() => Ok(&data[offset..end]),
        _ => Err(Error::BadArgument(format!(
            "range {}+{} is outside a buffer of {} bytes",
            offset,
            length,
            data.len()
        ))),
    }
}

impl Hash {
    pub const SIZE: u64 = 32;
    pub const HEX_SIZE: u64 = Hash::SIZE * 2;
    pub const ZERO: Hash = Hash {
        raw: [0; Self::SIZE as usize],
    };

    /// Single SHA256 hash the given data.
    pub fn sha256(data: &[u8]) -> Hash {
        Hash::from_slice(digest(&SHA256, data).as_ref())
    }

    /// Single SHA256 hash of `length` bytes of `data` starting at `offset`.
    pub fn sha256_range(data: &[u8], offset: usize, length: usize) -> crate::Result<Hash> {
        Ok(Hash::sha256(sub_range(data, offset, length)?))
    }

    /// Double SHA256 hash the given data.
    pub fn sha256d(data: &[u8]) -> Hash {
        let sha256 = digest(&SHA256, data);
        let sha256d = digest(&SHA256, sha256.as_ref());
        Hash::from_slice(sha256d.as_ref())
    }

    /// Double SHA256 hash of `length` bytes of `data` starting at `offset`.
    pub fn sha256d_range(data: &[u8], offset: usize, length: usize) -> crate::Result<Hash> {
        Ok(Hash::sha256d(sub_range(data, offset, length)?))
    }

    /// Double SHA256 hash of the concatenation of `first` and `second`.
    ///
    /// Both slices are fed into the same digest context, there is no intermediate copy.
    pub fn sha256d_concat(first: &[u8], second: &[u8]) -> Hash {
        let mut ctx = Context::new(&SHA256);
        ctx.update(first);
        ctx.update(second);
        let sha256 = ctx.finish();
        let sha256d = digest(&SHA256, sha256.as_ref());
        Hash::from_slice(sha256d.as_ref())
    }

    /// Double SHA256 hash of the concatenation of two byte ranges.
    pub fn sha256d_two_ranges(
        data1: &[u8],
        offset1: usize,
        length1: usize,
        data2: &[u8],
        offset2: usize,
        length2: usize,
    ) -> crate::Result<Hash> {
        let first = sub_range(data1, offset1, length1)?;
        let second = sub_range(data2, offset2, length2)?;
        Ok(Hash::sha256d_concat(first, second))
    }

    /// The first four bytes of the hash, as used for base58check checksums.
    pub fn checksum(&self) -> [u8; 4] {
        [self.raw[0], self.raw[1], self.raw[2], self.raw[3]]
    }

    // callers guarantee 32 bytes, digests of SHA256 always are
    pub(crate) fn from_slice(slice: &[u8]) -> Hash {
        let mut hash = [0; 32];
        hash.copy_from_slice(slice);
        Hash { raw: hash }
    }

    // helper for ToHex trait implementation
    fn generic_encode_hex<T, F>(&self, mut encode_fn: F) -> T
    where
        T: FromIterator<char>,
        F: FnMut(&[u8]) -> String,
    {
        let mut reversed_bytes = self.raw;
        reversed_bytes.reverse();
        encode_fn(&reversed_bytes).chars().collect()
    }
}

impl Encodable for Hash {
    fn from_binary(buffer: &mut dyn Buf) -> crate::Result<Self>
    where
        Self: Sized,
    {
        if buffer.remaining() < Self::SIZE as usize {
            Err(Error::DataTooSmall)
        } else {
            let mut hash = [0; 32];
            buffer.copy_to_slice(&mut hash);
            Ok(Self { raw: hash })
        }
    }

    fn to_binary(&self, buffer: &mut dyn BufMut) -> crate::Result<()> {
        buffer.put_slice(&self.raw);
        Ok(())
    }

    fn encoded_size(&self) -> u64 {
        Self::SIZE
    }
}

impl FromHex for Hash {
    type Error = Error;

    /// Converts a string of 64 hex characters into a hash. The bytes of the hex encoded form are reversed in
    /// accordance with Bitcoin standards.
    fn from_hex<T: AsRef<[u8]>>(hex: T) -> Result<Self, Self::Error> {
        let hex = hex.as_ref();
        if hex.len() != Hash::HEX_SIZE as usize {
            let msg = format!(
                "Length of hex encoded hash must be 64. Len is {:}.",
                hex.len()
            );
            return Err(Error::BadArgument(msg));
        }
        let mut hash_bytes = hex::decode(hex)?;
        hash_bytes.reverse();
        Ok(Hash::from_slice(&hash_bytes))
    }
}

impl ToHex for Hash {
    /// Converts the hash into a hex string. The bytes are reversed in the hex string in accordance with
    /// Bitcoin standard representation.
    fn encode_hex<T: FromIterator<char>>(&self) -> T {
        self.generic_encode_hex(|bytes| hex::encode(bytes))
    }

    fn encode_hex_upper<T: FromIterator<char>>(&self) -> T {
        self.generic_encode_hex(|bytes| hex::encode_upper(bytes))
    }
}

impl TryFrom<&[u8]> for Hash {
    type Error = Error;

    fn try_from(hash_as_bytes: &[u8]) -> Result<Self, Self::Error> {
        if hash_as_bytes.len() != Self::SIZE as usize {
            return Err(Error::BadArgument(format!(
                "hash must be 32 bytes, got {}",
                hash_as_bytes.len()
            )));
        }
        Ok(Hash::from_slice(hash_as_bytes))
    }
}

impl From<[u8; 32]> for Hash {
    fn from(value: [u8; 32]) -> Self {
        Hash { raw: value }
    }
}

impl From<Hash> for [u8; 32] {
    /// Convert from Hash to u8 encoding
    fn from(value: Hash) -> Self {
        value.raw
    }
}

impl From<Hash> for Vec<u8> {
    fn from(value: Hash) -> Self {
        value.raw.to_vec()
    }
}

impl Ord for Hash {
    /// Define the ordering of hashes. The order direction matches the alphabetic ordering of
    /// their hex representations.
    ///
    /// The ordering is byte-wise from the last byte to the first of the encoded form, since the
    /// hex representation is reversed byte-wise.
    fn cmp(&self, other: &Hash) -> Ordering {
        self.raw.iter().rev().cmp(other.raw.iter().rev())
    }
}

impl PartialOrd for Hash {
    fn partial_cmp(&self, other: &Hash) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.encode_hex::<String>())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.encode_hex::<String>())
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.encode_hex::<String>().as_ref())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Hash::from_hex(s).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}
