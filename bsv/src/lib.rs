//! Bitcoin SV encodings for Rust.
//!
//! This library provides the byte level encodings used throughout Bitcoin SV: fixed width
//! integers, SHA-256 and RIPEMD-160 digests, variable length integers, MPI and compact big
//! numbers, base-58 with checksum, and addresses. It does not do any networking or key management.

/// Contains the Bitcoin encodings. Hashes, VarInts, big numbers, base-58, addresses, etc.
pub mod bitcoin;

/// Contains useful utility functions.
pub mod util;

mod result;
pub use result::{Error, ErrorKind, Result};
