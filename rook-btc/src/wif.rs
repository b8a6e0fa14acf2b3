//! Wallet import format for EC secrets.

use std::fmt;
use std::str::FromStr;

use bitcoin::{NetworkKind, PrivateKey};
use zeroize::Zeroizing;

use crate::ec::EcPrivate;
use crate::error::Error;
use crate::network::Network;

/// A private key in wallet import format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wif(PrivateKey);

impl Wif {
    /// Encode a secret for a network, compressed or not.
    #[must_use]
    pub fn new(secret: &EcPrivate, network: Network, compressed: bool) -> Self {
        let inner = if compressed {
            PrivateKey::new(*secret.secret_key(), network.to_bitcoin_network())
        } else {
            PrivateKey::new_uncompressed(*secret.secret_key(), network.to_bitcoin_network())
        };
        Self(inner)
    }

    /// The wrapped secret.
    #[must_use]
    pub fn secret(&self) -> EcPrivate {
        EcPrivate::from_secret_key(self.0.inner)
    }

    /// The encoded network.
    #[must_use]
    pub fn network(&self) -> Network {
        if self.0.network == NetworkKind::Main {
            Network::Mainnet
        } else {
            Network::Testnet
        }
    }

    /// Whether the key encodes a compressed public key.
    #[must_use]
    pub const fn is_compressed(&self) -> bool {
        self.0.compressed
    }

    /// The WIF text, zeroized on drop.
    #[must_use]
    pub fn to_wif(&self) -> Zeroizing<String> {
        Zeroizing::new(self.0.to_wif())
    }
}

impl FromStr for Wif {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrivateKey::from_wif(s).map(Self).map_err(|_| Error::Wif)
    }
}

impl fmt::Display for Wif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_wif())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Published WIF vectors for one secret, both encodings.
    const SECRET: &str = "0c28fca386c7a227600b2fe50b7cae11ec86d3bf1fbe471be89827e19d72aa1d";
    const UNCOMPRESSED: &str = "5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ";
    const COMPRESSED: &str = "KwdMAjGmerYanjeui5SHS7JkmpZvVipYvB2LJGU1ZxJwYvP98617";

    #[test]
    fn test_encode_uncompressed_vector() {
        let secret: EcPrivate = SECRET.parse().unwrap();
        let wif = Wif::new(&secret, Network::Mainnet, false);
        assert_eq!(wif.to_string(), UNCOMPRESSED);
    }

    #[test]
    fn test_encode_compressed_vector() {
        let secret: EcPrivate = SECRET.parse().unwrap();
        let wif = Wif::new(&secret, Network::Mainnet, true);
        assert_eq!(wif.to_string(), COMPRESSED);
    }

    #[test]
    fn test_decode_recovers_secret_and_flags() {
        let wif: Wif = UNCOMPRESSED.parse().unwrap();
        assert_eq!(wif.secret().to_string(), SECRET);
        assert_eq!(wif.network(), Network::Mainnet);
        assert!(!wif.is_compressed());

        let wif: Wif = COMPRESSED.parse().unwrap();
        assert_eq!(wif.secret().to_string(), SECRET);
        assert!(wif.is_compressed());
    }

    #[test]
    fn test_rejects_corrupt_text() {
        assert!("5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTK"
            .parse::<Wif>()
            .is_err());
    }
}
