//! Stealth addresses and stealth payment key math.
//!
//! A stealth address publishes a scan key and one or more spend keys;
//! a payer combines an ephemeral secret with the scan key to derive a
//! one-time payment key that only the recipient can recognize.

use std::fmt;
use std::str::FromStr;

use crate::ec::{EcPrivate, EcPublic};
use crate::error::{Error, Result};
use crate::hash::sha256;
use crate::network::Network;
use crate::wrapper::Wrapped;

const OPTIONS_NONE: u8 = 0x00;
const COMPRESSED_KEY_LENGTH: usize = 33;

/// A stealth address: scan key, spend keys, signature threshold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StealthAddress {
    network: Network,
    scan: EcPublic,
    spend: Vec<EcPublic>,
    signatures: u8,
}

impl StealthAddress {
    /// Assemble an address.
    ///
    /// `signatures` defaults to the number of spend keys; it may not
    /// exceed it, and at least one spend key is required.
    pub fn new(
        network: Network,
        scan: EcPublic,
        spend: Vec<EcPublic>,
        signatures: Option<u8>,
    ) -> Result<Self> {
        if spend.is_empty() {
            return Err(Error::msg("at least one spend key is required"));
        }
        if spend.len() > u8::MAX as usize {
            return Err(Error::msg("too many spend keys"));
        }
        let signatures = signatures.unwrap_or(spend.len() as u8);
        if signatures == 0 || signatures as usize > spend.len() {
            return Err(Error::msg("signature threshold exceeds spend keys"));
        }
        Ok(Self {
            network,
            scan,
            spend,
            signatures,
        })
    }

    /// The network encoded in the version byte.
    #[must_use]
    pub const fn network(&self) -> Network {
        self.network
    }

    /// The scan key.
    #[must_use]
    pub const fn scan(&self) -> &EcPublic {
        &self.scan
    }

    /// The spend keys.
    #[must_use]
    pub fn spend(&self) -> &[EcPublic] {
        &self.spend
    }

    /// Required signature count.
    #[must_use]
    pub const fn signatures(&self) -> u8 {
        self.signatures
    }

    fn payload(&self) -> Vec<u8> {
        let mut payload =
            Vec::with_capacity(3 + COMPRESSED_KEY_LENGTH * (1 + self.spend.len()) + 1);
        payload.push(OPTIONS_NONE);
        payload.extend_from_slice(&self.scan.serialize());
        payload.push(self.spend.len() as u8);
        for key in &self.spend {
            payload.extend_from_slice(&key.serialize());
        }
        payload.push(self.signatures);
        // Prefix length; prefix filtering is not encoded.
        payload.push(0x00);
        payload
    }
}

impl fmt::Display for StealthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wrapped = Wrapped::new(self.network.stealth_version(), self.payload());
        f.write_str(&wrapped.encode_base58check())
    }
}

impl FromStr for StealthAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wrapped = Wrapped::decode_base58check(s)?;
        let network = if wrapped.version() == Network::Mainnet.stealth_version() {
            Network::Mainnet
        } else if wrapped.version() == Network::Testnet.stealth_version() {
            Network::Testnet
        } else {
            return Err(Error::msg("not a stealth address version"));
        };

        // options(1) scan(33) count(1) spend(33 each) signatures(1) prefix_len(1)
        let payload = wrapped.payload();
        let head = 1 + COMPRESSED_KEY_LENGTH + 1;
        if payload.len() < head {
            return Err(Error::Length {
                expected: head,
                actual: payload.len(),
            });
        }
        let scan = EcPublic::from_slice(&payload[1..1 + COMPRESSED_KEY_LENGTH])?;
        let count = payload[head - 1] as usize;
        if count == 0 {
            return Err(Error::msg("stealth address has no spend keys"));
        }
        let keys_end = head + count * COMPRESSED_KEY_LENGTH;
        if payload.len() != keys_end + 2 {
            return Err(Error::Length {
                expected: keys_end + 2,
                actual: payload.len(),
            });
        }
        let mut spend = Vec::with_capacity(count);
        for chunk in payload[head..keys_end].chunks_exact(COMPRESSED_KEY_LENGTH) {
            spend.push(EcPublic::from_slice(chunk)?);
        }
        let signatures = payload[keys_end];
        if signatures == 0 || signatures as usize > count {
            return Err(Error::msg("signature threshold exceeds spend keys"));
        }
        if payload[keys_end + 1] != 0 {
            return Err(Error::msg("prefix filtering is not supported"));
        }

        Ok(Self {
            network,
            scan,
            spend,
            signatures,
        })
    }
}

/// Derive the shared secret between an ephemeral secret and a scan key.
pub fn shared_secret(ephemeral: &EcPrivate, scan: &EcPublic) -> Result<[u8; 32]> {
    let point = scan.multiply(ephemeral)?;
    Ok(sha256(&point.serialize()))
}

/// Derive the one-time stealth payment key for a spend key.
pub fn uncover_public(spend: &EcPublic, shared: [u8; 32]) -> Result<EcPublic> {
    spend.add_tweak(shared)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: u8) -> EcPrivate {
        let mut bytes = [0u8; 32];
        bytes[31] = n;
        EcPrivate::from_seed(&bytes).unwrap()
    }

    fn address() -> StealthAddress {
        StealthAddress::new(
            Network::Mainnet,
            key(1).to_public(),
            vec![key(2).to_public(), key(3).to_public()],
            Some(1),
        )
        .unwrap()
    }

    #[test]
    fn test_round_trip() {
        let address = address();
        let text = address.to_string();
        assert!(text.starts_with('v'));
        let parsed: StealthAddress = text.parse().unwrap();
        assert_eq!(parsed, address);
    }

    #[test]
    fn test_default_threshold_is_all_keys() {
        let address = StealthAddress::new(
            Network::Mainnet,
            key(1).to_public(),
            vec![key(2).to_public(), key(3).to_public()],
            None,
        )
        .unwrap();
        assert_eq!(address.signatures(), 2);
    }

    #[test]
    fn test_rejects_threshold_above_key_count() {
        assert!(StealthAddress::new(
            Network::Mainnet,
            key(1).to_public(),
            vec![key(2).to_public()],
            Some(2),
        )
        .is_err());
        assert!(StealthAddress::new(
            Network::Mainnet,
            key(1).to_public(),
            vec![key(2).to_public()],
            Some(3),
        )
        .is_err());
    }

    #[test]
    fn test_rejects_plain_address_text() {
        assert!("1PMycacnJaSqwwJqjawXBErnLsZ7RkXUAs"
            .parse::<StealthAddress>()
            .is_err());
    }

    #[test]
    fn test_payment_key_agreement() {
        // Payer derives from the ephemeral secret and scan pubkey;
        // recipient derives the same secret from the scan secret and
        // ephemeral pubkey.
        let ephemeral = key(7);
        let scan = key(8);
        let spend = key(9);

        let payer = shared_secret(&ephemeral, &scan.to_public()).unwrap();
        let recipient = shared_secret(&scan, &ephemeral.to_public()).unwrap();
        assert_eq!(payer, recipient);

        let payment = uncover_public(&spend.to_public(), payer).unwrap();
        assert_eq!(payment, uncover_public(&spend.to_public(), recipient).unwrap());
    }
}
