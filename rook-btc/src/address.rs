//! Payment address parsing and construction.

use std::fmt;
use std::str::FromStr;

use bitcoin::address::NetworkUnchecked;
use bitcoin::{Address, ScriptBuf};

use crate::ec::EcPublic;
use crate::encoding::base58check_encode;
use crate::error::Error;
use crate::hash::hash160;

/// A Bitcoin payment address in any supported encoding.
///
/// Network is taken from the text itself; commands accept mainnet and
/// testnet addresses alike.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentAddress(Address);

impl PaymentAddress {
    /// Encode a public key hash under a version byte.
    #[must_use]
    pub fn encode_hash(version: u8, hash: &[u8; 20]) -> String {
        base58check_encode(&[version], hash)
    }

    /// Derive the address of a public key under a version byte.
    #[must_use]
    pub fn from_public(key: &EcPublic, version: u8) -> String {
        Self::encode_hash(version, &hash160(&key.serialize()))
    }

    /// The script this address pays to.
    #[must_use]
    pub fn script_pubkey(&self) -> ScriptBuf {
        self.0.script_pubkey()
    }

    /// The wrapped address.
    #[must_use]
    pub const fn inner(&self) -> &Address {
        &self.0
    }
}

impl FromStr for PaymentAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Address<NetworkUnchecked>>()
            .map(|address| Self(address.assume_checked()))
            .map_err(|_| Error::Address)
    }
}

impl fmt::Display for PaymentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn test_encode_hash_published_vector() {
        let hash = hex!("f54a5851e9372b87810a8e60cdd2e7cfd80b6e31");
        assert_eq!(
            PaymentAddress::encode_hash(0x00, &hash),
            "1PMycacnJaSqwwJqjawXBErnLsZ7RkXUAs"
        );
    }

    #[test]
    fn test_from_public_published_vector() {
        let key: EcPublic =
            "0250863ad64a87ae8a2fe83c1af1a8403cb53f53e486d8511dad8a04887e5b2352"
                .parse()
                .unwrap();
        assert_eq!(
            PaymentAddress::from_public(&key, 0x00),
            "1PMycacnJaSqwwJqjawXBErnLsZ7RkXUAs"
        );
    }

    #[test]
    fn test_parse_and_display() {
        let address: PaymentAddress = "1PMycacnJaSqwwJqjawXBErnLsZ7RkXUAs".parse().unwrap();
        assert_eq!(address.to_string(), "1PMycacnJaSqwwJqjawXBErnLsZ7RkXUAs");
    }

    #[test]
    fn test_parse_rejects_bad_checksum() {
        assert!("1PMycacnJaSqwwJqjawXBErnLsZ7RkXUAt"
            .parse::<PaymentAddress>()
            .is_err());
    }

    #[test]
    fn test_p2pkh_script() {
        let address: PaymentAddress = "13Ft7SkreJY9D823NPm4t6D1cBqLYTJtAe".parse().unwrap();
        assert_eq!(
            hex::encode(address.script_pubkey().as_bytes()),
            "76a91418c0bd8d1818f1bf99cb1df2269c645318ef7b7388ac"
        );
    }
}
