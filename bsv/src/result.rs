use base58::FromBase58Error;
use hex::FromHexError;
use std::fmt::Formatter;
use std::io;

/// Standard Result used in the library
pub type Result<T> = std::result::Result<T, Error>;

/// Standard error type used in the library
#[derive(Debug)]
pub enum Error {
    /// An argument provided is invalid
    BadArgument(String),
    /// The data provided is invalid
    BadData(String),
    /// The data did not match the checksum.
    ChecksumMismatch,
    /// The data provided is too small to perform the operation.
    DataTooSmall,
    /// A character that is not in the base-58 alphabet, and its position in the input.
    InvalidBase58Character(char, usize),
    /// The integer does not fit in the requested number of bytes.
    UnsupportedMagnitude { required: usize, available: usize },
    /// Hex string could not be decoded
    FromHexError(FromHexError),
    /// Standard library IO error
    IOError(io::Error),
}

/// The broad classes of [Error].
///
/// Callers handling untrusted input generally want to reject [ErrorKind::DecodeFormat] errors
/// and treat the others as bugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong-length buffers or out of range arguments. A programming error.
    PreconditionViolation,
    /// The encoded data is malformed.
    DecodeFormat,
    /// An integer is too large for the fixed width it must be written into.
    UnsupportedMagnitude,
}

impl Error {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::BadArgument(_) => ErrorKind::PreconditionViolation,
            Error::UnsupportedMagnitude { .. } => ErrorKind::UnsupportedMagnitude,
            Error::BadData(_)
            | Error::ChecksumMismatch
            | Error::DataTooSmall
            | Error::InvalidBase58Character(_, _)
            | Error::FromHexError(_)
            | Error::IOError(_) => ErrorKind::DecodeFormat,
        }
    }

    /// Is this an error caused by malformed input data?
    pub fn is_format_error(&self) -> bool {
        self.kind() == ErrorKind::DecodeFormat
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::BadArgument(s) => f.write_str(&format!("Bad argument: {}", s)),
            Error::BadData(s) => f.write_str(&format!("Bad data: {}", s)),
            Error::ChecksumMismatch => f.write_str("Checksum mismatch"),
            Error::DataTooSmall => f.write_str("data too small"),
            Error::InvalidBase58Character(c, pos) => f.write_str(&format!(
                "Invalid base58 character {:?} at position {}",
                c, pos
            )),
            Error::UnsupportedMagnitude {
                required,
                available,
            } => f.write_str(&format!(
                "Integer needs {} bytes, only {} available",
                required, available
            )),
            Error::FromHexError(e) => f.write_str(&format!("Hex decoding error: {}", e)),
            Error::IOError(e) => f.write_str(&format!("IO error: {}", e)),
        }
    }
}

impl std::error::Error for Error {}

impl From<FromHexError> for Error {
    fn from(e: FromHexError) -> Self {
        Error::FromHexError(e)
    }
}

impl From<FromBase58Error> for Error {
    fn from(e: FromBase58Error) -> Self {
        match e {
            FromBase58Error::InvalidBase58Character(c, pos) => {
                Error::InvalidBase58Character(c, pos)
            }
            FromBase58Error::InvalidBase58Length => {
                Error::BadData("base58 string has an invalid length".to_string())
            }
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::IOError(e)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use ErrorKind::*;
        match self {
            PreconditionViolation => f.write_str("precondition violation"),
            DecodeFormat => f.write_str("decode format error"),
            UnsupportedMagnitude => f.write_str("unsupported magnitude"),
        }
    }
}
