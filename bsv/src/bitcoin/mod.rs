//! The bsv.bitcoin module contains the Bitcoin encodings: hashes, variable length integers, big
//! numbers, base-58 and addresses.

pub mod address;
pub mod base58ck;
pub mod bignum;
pub mod binary;
mod encoding;
pub mod hash;
mod hash160;
pub mod message;
mod params;
mod var_int;


pub use self::address::{
    parse_address, parse_as_hex_or_base58, to_address, to_p2pkh_address, to_p2sh_address, Address,
};
pub use self::bignum::{decode_compact_bits, decode_mpi, encode_compact_bits, encode_mpi};
pub use self::encoding::Encodable;
pub use self::hash::Hash;
pub use self::hash160::Hash160;
pub use self::message::format_message_for_signing;
pub use self::params::{AddressVersions, BlockchainId};
pub use self::var_int::{varint_decode, varint_encode, varint_size, VarInt};
pub use hex::{FromHex, ToHex};
