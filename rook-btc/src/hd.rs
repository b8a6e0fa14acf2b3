//! BIP32 hierarchical deterministic keys.

use std::fmt;
use std::str::FromStr;

use bitcoin::bip32::{ChildNumber, Xpriv, Xpub};
use bitcoin::secp256k1::Secp256k1;

use crate::ec::{EcPrivate, EcPublic};
use crate::error::{Error, Result};
use crate::network::Network;

/// An extended private key, serialized as xprv/tprv Base58Check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HdPrivate(Xpriv);

impl HdPrivate {
    /// Stretch seed entropy into a master key.
    pub fn new_master(seed: &[u8], network: Network) -> Result<Self> {
        Xpriv::new_master(network.to_bitcoin_network(), seed)
            .map(Self)
            .map_err(Error::Bip32)
    }

    /// Derive the child key at `index`.
    pub fn derive(&self, index: u32, hardened: bool) -> Result<Self> {
        let child = if hardened {
            ChildNumber::from_hardened_idx(index)
        } else {
            ChildNumber::from_normal_idx(index)
        }
        .map_err(Error::Bip32)?;

        let secp = Secp256k1::new();
        self.0
            .derive_priv(&secp, &[child])
            .map(Self)
            .map_err(Error::Bip32)
    }

    /// The corresponding extended public key.
    #[must_use]
    pub fn to_public(&self) -> HdPublic {
        let secp = Secp256k1::new();
        HdPublic(Xpub::from_priv(&secp, &self.0))
    }

    /// The raw EC secret inside this key.
    #[must_use]
    pub fn secret(&self) -> EcPrivate {
        EcPrivate::from_secret_key(self.0.private_key)
    }

    /// Depth in the derivation tree, zero for the master key.
    #[must_use]
    pub const fn depth(&self) -> u8 {
        self.0.depth
    }
}

impl FromStr for HdPrivate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Xpriv::from_str(s).map(Self).map_err(Error::Bip32)
    }
}

impl fmt::Display for HdPrivate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An extended public key, serialized as xpub/tpub Base58Check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HdPublic(Xpub);

impl HdPublic {
    /// Derive the child key at `index`.
    ///
    /// Only normal (non-hardened) derivation is possible without the
    /// private key.
    pub fn derive(&self, index: u32) -> Result<Self> {
        let child = ChildNumber::from_normal_idx(index).map_err(Error::Bip32)?;
        let secp = Secp256k1::verification_only();
        self.0
            .derive_pub(&secp, &[child])
            .map(Self)
            .map_err(Error::Bip32)
    }

    /// The EC point inside this key.
    #[must_use]
    pub fn point(&self) -> EcPublic {
        EcPublic::from_public_key(self.0.public_key)
    }
}

impl FromStr for HdPublic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Xpub::from_str(s).map(Self).map_err(Error::Bip32)
    }
}

impl fmt::Display for HdPublic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
