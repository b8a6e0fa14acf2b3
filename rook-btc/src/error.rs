//! Error type for Bitcoin primitive parsing and computation.

use std::fmt;

/// Errors signaled by the primitive wrappers for invalid domain input.
///
/// Command handlers catch these at their own boundary and convert them
/// into a failure result plus a diagnostic; they never propagate as an
/// uncaught fault.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Input is not valid in its expected encoding (hex, Base58, Base64).
    Encoding,
    /// A Base58Check or wrapped payload checksum did not verify.
    Checksum,
    /// Input had the wrong byte length.
    Length {
        /// Minimum expected length.
        expected: usize,
        /// Observed length.
        actual: usize,
    },
    /// Secp256k1 key or point operation failed.
    Secp(bitcoin::secp256k1::Error),
    /// BIP32 derivation failed.
    Bip32(bitcoin::bip32::Error),
    /// Invalid mnemonic phrase or entropy.
    Mnemonic(bip39::Error),
    /// Invalid WIF private key.
    Wif,
    /// Invalid payment address.
    Address,
    /// Invalid amount string.
    Amount(bitcoin::amount::ParseAmountError),
    /// Anything else, with a human-readable message.
    Message(String),
}

impl Error {
    /// Construct a free-form error.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encoding => write!(f, "invalid encoding"),
            Self::Checksum => write!(f, "checksum verification failed"),
            Self::Length { expected, actual } => {
                write!(f, "invalid length {actual}, expected {expected}")
            }
            Self::Secp(e) => write!(f, "secp256k1 error: {e}"),
            Self::Bip32(e) => write!(f, "BIP32 derivation error: {e}"),
            Self::Mnemonic(e) => write!(f, "mnemonic error: {e}"),
            Self::Wif => write!(f, "invalid WIF private key"),
            Self::Address => write!(f, "invalid payment address"),
            Self::Amount(e) => write!(f, "invalid amount: {e}"),
            Self::Message(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Secp(e) => Some(e),
            Self::Bip32(e) => Some(e),
            Self::Mnemonic(e) => Some(e),
            Self::Amount(e) => Some(e),
            _ => None,
        }
    }
}

impl From<bitcoin::secp256k1::Error> for Error {
    fn from(err: bitcoin::secp256k1::Error) -> Self {
        Self::Secp(err)
    }
}

impl From<bitcoin::bip32::Error> for Error {
    fn from(err: bitcoin::bip32::Error) -> Self {
        Self::Bip32(err)
    }
}

impl From<bip39::Error> for Error {
    fn from(err: bip39::Error) -> Self {
        Self::Mnemonic(err)
    }
}

impl From<bitcoin::amount::ParseAmountError> for Error {
    fn from(err: bitcoin::amount::ParseAmountError) -> Self {
        Self::Amount(err)
    }
}

/// A convenient Result type alias for primitive operations.
pub type Result<T> = std::result::Result<T, Error>;
