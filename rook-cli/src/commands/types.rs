//! Value types binding command tokens to the Bitcoin primitives.

use std::fmt;
use std::str::FromStr;

use rook::{OptionSpec, OutputFormat, ValueType};
use rook_btc::{
    Base16, BitcoinUri, EcPrivate, EcPublic, HdPrivate, HdPublic, PaymentAddress, StealthAddress,
    TxInputSpec, TxOutputSpec, Wif, Wrapped,
};

fn parses<T>(token: &str) -> Result<(), String>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    token.parse::<T>().map(|_| ()).map_err(|e| e.to_string())
}

/// Base16 data.
pub fn base16() -> ValueType {
    ValueType::typed("base16", parses::<Base16>)
}

/// Base58 data.
pub fn base58() -> ValueType {
    ValueType::typed("base58", |token| {
        rook_btc::encoding::base58_decode(token)
            .map(|_| ())
            .map_err(|e| e.to_string())
    })
}

/// Base58Check data.
pub fn base58check() -> ValueType {
    ValueType::typed("base58check", |token| {
        Wrapped::decode_base58check(token)
            .map(|_| ())
            .map_err(|e| e.to_string())
    })
}

/// Base64 data.
pub fn base64() -> ValueType {
    ValueType::typed("base64", |token| {
        rook_btc::encoding::base64_decode(token)
            .map(|_| ())
            .map_err(|e| e.to_string())
    })
}

/// Checksummed wrapped data in Base16.
pub fn wrapped() -> ValueType {
    ValueType::typed("wrapped", parses::<Wrapped>)
}

/// An EC secret.
pub fn ec_private() -> ValueType {
    ValueType::typed("ec_private", parses::<EcPrivate>)
}

/// An EC point.
pub fn ec_public() -> ValueType {
    ValueType::typed("ec_public", parses::<EcPublic>)
}

/// An extended private key.
pub fn hd_private() -> ValueType {
    ValueType::typed("hd_private", parses::<HdPrivate>)
}

/// An extended private or public key.
pub fn hd_key() -> ValueType {
    ValueType::typed("hd_key", |token| {
        if token.parse::<HdPublic>().is_ok() {
            return Ok(());
        }
        token
            .parse::<HdPrivate>()
            .map(|_| ())
            .map_err(|e| e.to_string())
    })
}

/// A WIF private key.
pub fn wif() -> ValueType {
    ValueType::typed("wif", parses::<Wif>)
}

/// A payment address.
pub fn address() -> ValueType {
    ValueType::typed("address", parses::<PaymentAddress>)
}

/// A stealth address.
pub fn stealth_address() -> ValueType {
    ValueType::typed("stealth_address", parses::<StealthAddress>)
}

/// A payment URI.
pub fn uri() -> ValueType {
    ValueType::typed("uri", parses::<BitcoinUri>)
}

/// A decimal BTC amount.
pub fn btc() -> ValueType {
    ValueType::typed("btc", parses::<rook_btc::Btc>)
}

/// A transaction input spec, `TXID:INDEX[:SEQUENCE]`.
pub fn tx_input() -> ValueType {
    ValueType::typed("input", parses::<TxInputSpec>)
}

/// A transaction output spec, `ADDRESS:SATOSHIS`.
pub fn tx_output() -> ValueType {
    ValueType::typed("output", parses::<TxOutputSpec>)
}

/// An output format tag.
pub fn format() -> ValueType {
    ValueType::typed("format", parses::<OutputFormat>)
}

/// The standard `--format` option carried by tree-producing commands.
pub fn format_option() -> OptionSpec {
    OptionSpec::value(
        "format",
        Some('f'),
        format(),
        "The output format: json, xml, info, or native.",
    )
    .default("info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base16_check() {
        assert!(base16().bind("BASE16", "900df00d").is_ok());
        assert!(base16().bind("BASE16", "xyz").is_err());
    }

    #[test]
    fn test_hd_key_accepts_both_sides() {
        let xprv = "xprv9s21ZrQH143K3QTDL4LXw2F7HEK3wJUD2nW2nRk4stbPy6cq3jPPqjiChkVvvNKmPGJxWUtg6LnF5kejMRNNU3TGtRBeJgk33yuGBxrMPHi";
        let xpub = "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8";
        assert!(hd_key().bind("HD_KEY", xprv).is_ok());
        assert!(hd_key().bind("HD_KEY", xpub).is_ok());
        assert!(hd_key().bind("HD_KEY", "xprv-nonsense").is_err());
    }

    #[test]
    fn test_format_check() {
        assert!(format().bind("format", "json").is_ok());
        assert!(format().bind("format", "yaml").is_err());
    }
}
