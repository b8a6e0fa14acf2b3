//! Checksummed version-prefixed payloads, the structure underlying
//! Base58Check data and legacy addresses.

use std::fmt;
use std::str::FromStr;

use crate::encoding::{base58check_decode, base58check_encode};
use crate::error::{Error, Result};
use crate::hash::double_sha256;

/// A payload wrapped with a version byte and a 4-byte double-SHA256
/// checksum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wrapped {
    version: u8,
    payload: Vec<u8>,
}

impl Wrapped {
    /// Wrap a payload under a version byte.
    #[must_use]
    pub const fn new(version: u8, payload: Vec<u8>) -> Self {
        Self { version, payload }
    }

    /// The version byte.
    #[must_use]
    pub const fn version(&self) -> u8 {
        self.version
    }

    /// The unwrapped payload.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The checksum over version and payload, as a little-endian word.
    #[must_use]
    pub fn checksum(&self) -> u32 {
        let mut data = Vec::with_capacity(1 + self.payload.len());
        data.push(self.version);
        data.extend_from_slice(&self.payload);
        let digest = double_sha256(&data);
        u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
    }

    /// Serialize as version, payload, checksum.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(1 + self.payload.len() + 4);
        data.push(self.version);
        data.extend_from_slice(&self.payload);
        data.extend_from_slice(&self.checksum().to_le_bytes());
        data
    }

    /// Parse from serialized bytes, verifying the checksum.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < 5 {
            return Err(Error::Length {
                expected: 5,
                actual: data.len(),
            });
        }
        let (body, checksum) = data.split_at(data.len() - 4);
        let digest = double_sha256(body);
        if checksum != &digest[..4] {
            return Err(Error::Checksum);
        }
        Ok(Self {
            version: body[0],
            payload: body[1..].to_vec(),
        })
    }

    /// Render as Base58Check.
    #[must_use]
    pub fn encode_base58check(&self) -> String {
        base58check_encode(&[self.version], &self.payload)
    }

    /// Parse from Base58Check, verifying the checksum.
    pub fn decode_base58check(encoded: &str) -> Result<Self> {
        let (version, payload) = base58check_decode(encoded)?;
        Ok(Self { version, payload })
    }
}

impl fmt::Display for Wrapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_bytes()))
    }
}

impl FromStr for Wrapped {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let data = hex::decode(s).map_err(|_| Error::Encoding)?;
        Self::from_bytes(&data)
    }
}
