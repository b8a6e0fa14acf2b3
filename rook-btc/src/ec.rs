//! Elliptic-curve secrets and points over secp256k1.

use std::fmt;
use std::str::FromStr;

use bitcoin::secp256k1::{PublicKey, Scalar, Secp256k1, SecretKey};
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// A secp256k1 secret, written and read as 32 Base16 bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EcPrivate(SecretKey);

impl EcPrivate {
    /// Derive a secret deterministically from seed entropy.
    ///
    /// Uses the BIP32 master-key stretch, so equal seeds always yield
    /// the same secret.
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        let master =
            bitcoin::bip32::Xpriv::new_master(bitcoin::Network::Bitcoin, seed)?;
        Ok(Self(master.private_key))
    }

    /// Wrap an existing secret key.
    #[must_use]
    pub const fn from_secret_key(secret: SecretKey) -> Self {
        Self(secret)
    }

    /// The raw secret bytes.
    #[must_use]
    pub fn secret_bytes(&self) -> [u8; 32] {
        self.0.secret_bytes()
    }

    /// The secret as Base16 text, zeroized on drop.
    #[must_use]
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(format!("{}", self.0.display_secret()))
    }

    /// The underlying secret key.
    #[must_use]
    pub const fn secret_key(&self) -> &SecretKey {
        &self.0
    }

    /// The corresponding public point.
    #[must_use]
    pub fn to_public(&self) -> EcPublic {
        let secp = Secp256k1::new();
        EcPublic(PublicKey::from_secret_key(&secp, &self.0))
    }
}

impl FromStr for EcPrivate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SecretKey::from_str(s).map(Self).map_err(Error::Secp)
    }
}

impl fmt::Display for EcPrivate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display_secret())
    }
}

/// A secp256k1 point, written and read as compressed Base16 text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EcPublic(PublicKey);

impl EcPublic {
    /// Wrap an existing public key.
    #[must_use]
    pub const fn from_public_key(key: PublicKey) -> Self {
        Self(key)
    }

    /// Parse from serialized point bytes.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        PublicKey::from_slice(data).map(Self).map_err(Error::Secp)
    }

    /// Compressed serialization.
    #[must_use]
    pub fn serialize(&self) -> [u8; 33] {
        self.0.serialize()
    }

    /// The underlying public key.
    #[must_use]
    pub const fn public_key(&self) -> &PublicKey {
        &self.0
    }

    /// Multiply this point by a secret scalar.
    pub fn multiply(&self, secret: &EcPrivate) -> Result<Self> {
        let secp = Secp256k1::verification_only();
        self.0
            .mul_tweak(&secp, &Scalar::from(*secret.secret_key()))
            .map(Self)
            .map_err(Error::Secp)
    }

    /// Add `tweak * G` to this point.
    pub fn add_tweak(&self, tweak: [u8; 32]) -> Result<Self> {
        let secp = Secp256k1::verification_only();
        let scalar = Scalar::from_be_bytes(tweak)
            .map_err(|_| Error::msg("tweak is out of the curve order"))?;
        self.0
            .add_exp_tweak(&secp, &scalar)
            .map(Self)
            .map_err(Error::Secp)
    }
}

impl FromStr for EcPublic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PublicKey::from_str(s).map(Self).map_err(Error::Secp)
    }
}

impl fmt::Display for EcPublic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
