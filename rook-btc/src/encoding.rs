//! Base-N codecs for addresses and keys.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::{Error, Result};
use crate::hash::double_sha256;

/// Encode bytes to Base58.
#[must_use]
pub fn base58_encode(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

/// Decode a Base58 string.
pub fn base58_decode(encoded: &str) -> Result<Vec<u8>> {
    bs58::decode(encoded).into_vec().map_err(|_| Error::Encoding)
}

/// Encode bytes to Base58Check (used in Bitcoin).
#[must_use]
pub fn base58check_encode(version: &[u8], payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(version.len() + payload.len() + 4);
    data.extend_from_slice(version);
    data.extend_from_slice(payload);

    let checksum = double_sha256(&data);
    data.extend_from_slice(&checksum[..4]);

    bs58::encode(data).into_string()
}

/// Decode a Base58Check string into version and payload.
pub fn base58check_decode(encoded: &str) -> Result<(u8, Vec<u8>)> {
    let data = base58_decode(encoded)?;

    if data.len() < 5 {
        return Err(Error::Length {
            expected: 5,
            actual: data.len(),
        });
    }

    let (payload, checksum) = data.split_at(data.len() - 4);
    let computed_checksum = double_sha256(payload);

    if checksum != &computed_checksum[..4] {
        return Err(Error::Checksum);
    }

    Ok((payload[0], payload[1..].to_vec()))
}

/// Encode bytes to standard Base64.
#[must_use]
pub fn base64_encode(data: &[u8]) -> String {
    BASE64.encode(data)
}

/// Decode a standard Base64 string.
pub fn base64_decode(encoded: &str) -> Result<Vec<u8>> {
    BASE64.decode(encoded).map_err(|_| Error::Encoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base58_known_vector() {
        assert_eq!(base58_encode(b"Hello World!"), "2NEpo7TZRRrLZSi2U");
        assert_eq!(base58_decode("2NEpo7TZRRrLZSi2U").unwrap(), b"Hello World!");
    }

    #[test]
    fn test_base58_rejects_invalid_characters() {
        assert!(base58_decode("0OIl").is_err());
    }

    #[test]
    fn test_base58check_known_vector() {
        // Version 0 over a public key hash yields the published address.
        let payload = hex::decode("f54a5851e9372b87810a8e60cdd2e7cfd80b6e31").unwrap();
        let encoded = base58check_encode(&[0x00], &payload);
        assert_eq!(encoded, "1PMycacnJaSqwwJqjawXBErnLsZ7RkXUAs");

        let (version, decoded) = base58check_decode(&encoded).unwrap();
        assert_eq!(version, 0x00);
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_base58check_detects_corruption() {
        assert!(matches!(
            base58check_decode("1PMycacnJaSqwwJqjawXBErnLsZ7RkXUAt"),
            Err(Error::Checksum)
        ));
    }

    #[test]
    fn test_base58check_rejects_short_input() {
        assert!(matches!(
            base58check_decode("11"),
            Err(Error::Length { .. })
        ));
    }

    #[test]
    fn test_base64_round_trip() {
        assert_eq!(base64_encode(b"foobar"), "Zm9vYmFy");
        assert_eq!(base64_decode("Zm9vYmFy").unwrap(), b"foobar");
        assert!(base64_decode("!!!").is_err());
    }
}
