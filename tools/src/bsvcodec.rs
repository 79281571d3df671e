use bitcoinsv_codec::bitcoin::{
    decode_compact_bits, encode_compact_bits, parse_address, parse_as_hex_or_base58,
    to_p2pkh_address, to_p2sh_address, AddressVersions, BlockchainId, FromHex, Hash, Hash160,
    VarInt,
};
use bitcoinsv_codec::{Error, Result};
use clap::{Parser, Subcommand};
use log::{debug, error};
use num::bigint::BigInt;
use num::Num;

/// Encodes and decodes Bitcoin SV data from the command line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The blockchain whose address versions are used.
    #[clap(long, default_value = "main")]
    chain: BlockchainId,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a 160-bit hash, given in hex, as an address.
    Address {
        hash: String,
        /// Produce a pay to script hash address instead of pay to public key hash.
        #[clap(long)]
        p2sh: bool,
    },
    /// Parse an address, or any hex or base58check data.
    Parse { data: String },
    /// Hash160 of hex data, or of text with --text. The hash is printed in byte order.
    Hash160 {
        data: String,
        #[clap(long)]
        text: bool,
    },
    /// Double SHA256 of hex data, or of text with --text. The hash is printed in byte order.
    Sha256d {
        data: String,
        #[clap(long)]
        text: bool,
    },
    /// Decode compact difficulty bits (hex, e.g. 1d00ffff), or encode a target with --encode.
    Bits {
        value: String,
        #[clap(long)]
        encode: bool,
    },
    /// Encode a number as a VarInt.
    Varint { value: u64 },
}

fn input_bytes(data: &str, text: bool) -> Result<Vec<u8>> {
    if text {
        Ok(data.as_bytes().to_vec())
    } else {
        Ok(Vec::<u8>::from_hex(data)?)
    }
}

fn run(args: Args) -> Result<String> {
    let versions = AddressVersions::from(args.chain);
    debug!("using {:?} address versions {:?}", args.chain, versions);
    match args.command {
        Command::Address { hash, p2sh } => {
            let hash = Vec::<u8>::from_hex(hash)?;
            if p2sh {
                to_p2sh_address(&hash, &versions)
            } else {
                to_p2pkh_address(&hash, &versions)
            }
        }
        Command::Parse { data } => match parse_address(&data) {
            Ok((version, hash)) => Ok(format!("version: {}\nhash: {}", version, hex::encode(hash))),
            Err(e) => {
                debug!("not an address: {}", e);
                parse_as_hex_or_base58(&data)
                    .map(hex::encode)
                    .ok_or_else(|| Error::BadArgument("neither hex nor base58check".to_string()))
            }
        },
        Command::Hash160 { data, text } => {
            Ok(hex::encode(Hash160::generate(&input_bytes(&data, text)?).hash))
        }
        Command::Sha256d { data, text } => {
            Ok(hex::encode(Hash::sha256d(&input_bytes(&data, text)?).raw))
        }
        Command::Bits { value, encode } => {
            if encode {
                let target = BigInt::from_str_radix(&value, 16)
                    .map_err(|e| Error::BadArgument(format!("invalid target: {}", e)))?;
                Ok(format!("{:08x}", encode_compact_bits(&target)?))
            } else {
                let compact = u32::from_str_radix(value.trim_start_matches("0x"), 16)
                    .map_err(|e| Error::BadArgument(format!("invalid bits: {}", e)))?;
                Ok(format!("{:064x}", decode_compact_bits(compact)))
            }
        }
        Command::Varint { value } => Ok(hex::encode(VarInt::new(value).encode())),
    }
}

fn main() {
    env_logger::init();
    let args: Args = Args::parse();
    match run(args) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
