//! There are four blockchains: mainnet, testnet, stn, and regtest.
use serde::{Deserialize, Serialize};

/// Bitcoin has multiple blockchains: "main", "test", "regtest", and "stn" chains.
///
/// In BitcoinSV we don't call these networks but blockchains. The P2P network is just a mechanism
/// for the applications to communicate, it does not define the blockchain.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockchainId {
    #[serde(alias = "mainnet")]
    Main = 0,
    #[serde(alias = "testnet")]
    Test = 1,
    Stn = 2,
    Regtest = 3,
}

impl std::str::FromStr for BlockchainId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(BlockchainId::Main),
            "test" | "testnet" => Ok(BlockchainId::Test),
            "stn" => Ok(BlockchainId::Stn),
            "regtest" => Ok(BlockchainId::Regtest),
            other => Err(crate::Error::BadArgument(format!(
                "unknown blockchain: {}",
                other
            ))),
        }
    }
}

/// The version bytes that are prepended to a hash before it is encoded as an address.
///
/// These are policy, supplied by the application. The defaults for each blockchain are
/// available through `From<BlockchainId>`, other values can be loaded with serde.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct AddressVersions {
    /// Version byte for pay-to-public-key-hash addresses.
    pub p2pkh: u8,
    /// Version byte for pay-to-script-hash addresses.
    pub p2sh: u8,
}

impl AddressVersions {
    pub const MAIN: AddressVersions = AddressVersions {
        p2pkh: 0x00,
        p2sh: 0x05,
    };
    // the standard does not differentiate between the test blockchains
    pub const TEST: AddressVersions = AddressVersions {
        p2pkh: 0x6f,
        p2sh: 0xc4,
    };
}

impl Default for AddressVersions {
    fn default() -> Self {
        AddressVersions::MAIN
    }
}

impl From<BlockchainId> for AddressVersions {
    fn from(value: BlockchainId) -> Self {
        match value {
            BlockchainId::Main => AddressVersions::MAIN,
            _ => AddressVersions::TEST,
        }
    }
}
