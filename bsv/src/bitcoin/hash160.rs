use crate::bitcoin::{Encodable, Hash};
use crate::Error;
use bytes::{Buf, BufMut};
use hex::{FromHex, ToHex};
use ripemd::{Digest, Ripemd160};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// A 160-bit hash, specifically the RIPEMD160(SHA256) hash.
///
/// This is the hash type that is generally used for Bitcoin addresses: the public key is
/// compressed to a Hash160 which then forms the payload of the address.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash160 {
    pub hash: [u8; Self::SIZE],
}

impl Hash160 {
    pub const SIZE: usize = 20;
    pub const HEX_SIZE: usize = Hash160::SIZE * 2;
    pub const ZERO: Hash160 = Hash160 {
        hash: [0; Self::SIZE],
    };

    /// Generate the hash from the given data.
    pub fn generate(data: &[u8]) -> Hash160 {
        let sha256 = Hash::sha256(data);
        let ripemd = Ripemd160::digest(sha256.raw);
        let mut hash = [0; Self::SIZE];
        hash.copy_from_slice(ripemd.as_slice());
        Hash160 { hash }
    }

    // helper for ToHex trait implementation
    fn generic_encode_hex<T, F>(&self, mut encode_fn: F) -> T
    where
        T: FromIterator<char>,
        F: FnMut(&[u8]) -> String,
    {
        let mut reversed_bytes = self.hash;
        reversed_bytes.reverse();
        encode_fn(&reversed_bytes).chars().collect()
    }
}

impl Encodable for Hash160 {
    fn from_binary(buffer: &mut dyn Buf) -> crate::Result<Self>
    where
        Self: Sized,
    {
        if buffer.remaining() < Self::SIZE {
            return Err(Error::DataTooSmall);
        }
        let mut hash = [0; Self::SIZE];
        buffer.copy_to_slice(&mut hash);
        Ok(Hash160 { hash })
    }

    fn to_binary(&self, buffer: &mut dyn BufMut) -> crate::Result<()> {
        buffer.put_slice(&self.hash);
        Ok(())
    }

    fn encoded_size(&self) -> u64 {
        Self::SIZE as u64
    }
}

impl FromHex for Hash160 {
    type Error = Error;

    /// Converts a string of 40 hex characters into a hash160. The bytes of the hex encoded form are reversed in
    /// accordance with Bitcoin standards.
    fn from_hex<T: AsRef<[u8]>>(hex: T) -> Result<Self, Self::Error> {
        let hex = hex.as_ref();
        if hex.len() != Self::HEX_SIZE {
            let msg = format!(
                "Length of hex encoded hash must be {}. Len is {:}.",
                Self::HEX_SIZE,
                hex.len()
            );
            return Err(Error::BadArgument(msg));
        }
        let mut hash_bytes = hex::decode(hex)?;
        hash_bytes.reverse();
        let mut hash = [0u8; Self::SIZE];
        hash.copy_from_slice(&hash_bytes);
        Ok(Self { hash })
    }
}

impl ToHex for Hash160 {
    /// Converts the hash into a hex string. The bytes are reversed in the hex string in accordance with
    /// Bitcoin standard representation.
    fn encode_hex<T: FromIterator<char>>(&self) -> T {
        self.generic_encode_hex(|bytes| hex::encode(bytes))
    }

    fn encode_hex_upper<T: FromIterator<char>>(&self) -> T {
        self.generic_encode_hex(|bytes| hex::encode_upper(bytes))
    }
}

impl TryFrom<&[u8]> for Hash160 {
    type Error = Error;

    /// This converts a u8 encoded hash into a Hash160, which must be exactly 20 bytes.
    fn try_from(hash_as_bytes: &[u8]) -> Result<Self, Self::Error> {
        let hash = <[u8; Self::SIZE]>::try_from(hash_as_bytes).map_err(|_| {
            Error::BadArgument(format!(
                "Addresses are 160-bit hashes, so you must provide 20 bytes, got {}",
                hash_as_bytes.len()
            ))
        })?;
        Ok(Hash160 { hash })
    }
}

impl From<[u8; 20]> for Hash160 {
    fn from(hash: [u8; 20]) -> Self {
        Hash160 { hash }
    }
}

impl From<Hash160> for [u8; 20] {
    /// Convert from Hash to u8 encoding
    fn from(value: Hash160) -> Self {
        value.hash
    }
}

impl Ord for Hash160 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hash.iter().rev().cmp(other.hash.iter().rev())
    }
}

impl PartialOrd for Hash160 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Hash160 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.encode_hex::<String>())
    }
}

impl fmt::Debug for Hash160 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.encode_hex::<String>())
    }
}

impl Serialize for Hash160 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.encode_hex::<String>().as_ref())
    }
}

impl<'de> Deserialize<'de> for Hash160 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(s).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}
