use crate::bitcoin::base58ck;
use crate::bitcoin::hash160::Hash160;
use crate::bitcoin::params::AddressVersions;
use crate::{Error, Result};
use log::{debug, trace};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A Bitcoin Address is a destination for a Bitcoin payment.
///
/// The address is a version byte followed by a 160-bit hash, encoded in base58check format.
/// The version byte selects the kind of address (pay to public key hash or pay to script hash)
/// and the blockchain, see [AddressVersions].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    pub version: u8,
    pub hash: Hash160,
}

impl Address {
    pub fn new(version: u8, hash: Hash160) -> Address {
        Address { version, hash }
    }

    /// A pay to public key hash address.
    pub fn p2pkh(hash: Hash160, versions: &AddressVersions) -> Address {
        Address::new(versions.p2pkh, hash)
    }

    /// A pay to script hash address.
    pub fn p2sh(hash: Hash160, versions: &AddressVersions) -> Address {
        Address::new(versions.p2sh, hash)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&encode_address(self.version, &self.hash.hash))
    }
}

impl FromStr for Address {
    type Err = Error;

    /// Parse an address. Unlike [parse_address] the payload must be exactly a version byte and
    /// a 20 byte hash.
    fn from_str(s: &str) -> Result<Self> {
        let (version, hash) = parse_address(s)?;
        if hash.len() != Hash160::SIZE {
            return Err(Error::BadData(format!(
                "address hash must be {} bytes, got {}",
                Hash160::SIZE,
                hash.len()
            )));
        }
        Ok(Address {
            version,
            hash: Hash160::try_from(hash.as_slice())?,
        })
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::from_str(&s).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

// version || hash || checksum, base58 encoded
fn encode_address(version: u8, hash: &[u8]) -> String {
    let mut payload = Vec::with_capacity(1 + hash.len());
    payload.push(version);
    payload.extend_from_slice(hash);
    base58ck::encode_with_checksum(&payload)
}

/// Encode a 160-bit hash as an address with the given version byte.
///
/// The same algorithm is used for all kinds of addresses, only the version differs.
pub fn to_address(pub_key_hash: &[u8], version: u8) -> Result<String> {
    if pub_key_hash.len() != Hash160::SIZE {
        return Err(Error::BadArgument(format!(
            "Addresses are 160-bit hashes, so you must provide 20 bytes, got {}",
            pub_key_hash.len()
        )));
    }
    Ok(encode_address(version, pub_key_hash))
}

/// Encode a public key hash as a pay to public key hash address.
pub fn to_p2pkh_address(pub_key_hash: &[u8], versions: &AddressVersions) -> Result<String> {
    to_address(pub_key_hash, versions.p2pkh)
}

/// Encode a script hash as a pay to script hash address.
pub fn to_p2sh_address(script_hash: &[u8], versions: &AddressVersions) -> Result<String> {
    to_address(script_hash, versions.p2sh)
}

/// Parse an address into its version byte and hash.
///
/// The hash is whatever follows the version byte, its length is not checked.
pub fn parse_address(address: &str) -> Result<(u8, Vec<u8>)> {
    let mut payload = base58ck::decode_with_checksum(address)?;
    if payload.is_empty() {
        trace!("address has an empty payload");
        return Err(Error::BadData("address has no version byte".to_string()));
    }
    let hash = payload.split_off(1);
    Ok((payload[0], hash))
}

/// Attempts to parse the data as hex and then as base58check, returning `None` if neither parse
/// succeeds.
///
/// This is meant for user supplied data of unknown format.
pub fn parse_as_hex_or_base58(data: &str) -> Option<Vec<u8>> {
    match hex::decode(data) {
        Ok(v) => Some(v),
        Err(e) => {
            trace!("not hex ({}), trying base58check", e);
            match base58ck::decode_with_checksum(data) {
                Ok(v) => Some(v),
                Err(e) => {
                    debug!("data is neither hex nor base58check: {}", e);
                    None
                }
            }
        }
    }
}
