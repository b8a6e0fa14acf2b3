//! Radix and wrapper conversion commands.

use std::io::Write;

use rook::{
    run_line, run_tree, ArgumentSpec, BoundValues, Command, ConsoleResult, OptionSpec, ValueType,
};
use rook_btc::encoding::{base58_decode, base58_encode, base64_decode, base64_encode};
use rook_btc::{Base16, PaymentAddress, Wrapped};

use super::types;
use crate::trees;

const ENCODING: &str = "ENCODING";

fn version_byte(bound: &BoundValues) -> rook_btc::Result<u8> {
    u8::try_from(bound.integer("version"))
        .map_err(|_| rook_btc::Error::msg("version byte is out of range"))
}

fn version_option() -> OptionSpec {
    OptionSpec::value(
        "version",
        Some('v'),
        ValueType::Integer,
        "The desired version byte.",
    )
    .default("0")
}

/// Convert Base16 data to Base58.
pub struct Base58Encode;

impl Command for Base58Encode {
    fn name(&self) -> &'static str {
        "base58-encode"
    }
    fn category(&self) -> &'static str {
        ENCODING
    }
    fn description(&self) -> &'static str {
        "Convert Base16 data to Base58."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::one("BASE16", types::base16(), "The Base16 data to encode.")
            .or_input()]
    }
    fn invoke(
        &self,
        bound: &BoundValues,
        output: &mut dyn Write,
        error: &mut dyn Write,
    ) -> ConsoleResult {
        let result = (|| {
            let data: Base16 = bound.parse("BASE16")?;
            Ok::<_, rook_btc::Error>(base58_encode(data.as_bytes()))
        })();
        run_line(output, error, result)
    }
}

/// Convert Base58 data to Base16.
pub struct Base58Decode;

impl Command for Base58Decode {
    fn name(&self) -> &'static str {
        "base58-decode"
    }
    fn category(&self) -> &'static str {
        ENCODING
    }
    fn description(&self) -> &'static str {
        "Convert Base58 data to Base16."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::one("BASE58", types::base58(), "The Base58 data to decode.")
            .or_input()]
    }
    fn invoke(
        &self,
        bound: &BoundValues,
        output: &mut dyn Write,
        error: &mut dyn Write,
    ) -> ConsoleResult {
        let result = base58_decode(bound.text("BASE58")).map(hex::encode);
        run_line(output, error, result)
    }
}

/// Convert Base16 data to Base58Check.
pub struct Base58checkEncode;

impl Command for Base58checkEncode {
    fn name(&self) -> &'static str {
        "base58check-encode"
    }
    fn category(&self) -> &'static str {
        ENCODING
    }
    fn description(&self) -> &'static str {
        "Convert a Base16 payload to Base58Check."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::one("BASE16", types::base16(), "The Base16 payload to encode.")
            .or_input()]
    }
    fn options(&self) -> Vec<OptionSpec> {
        vec![version_option()]
    }
    fn invoke(
        &self,
        bound: &BoundValues,
        output: &mut dyn Write,
        error: &mut dyn Write,
    ) -> ConsoleResult {
        let result = (|| {
            let payload: Base16 = bound.parse("BASE16")?;
            let wrapped = Wrapped::new(version_byte(bound)?, payload.into_bytes());
            Ok::<_, rook_btc::Error>(wrapped.encode_base58check())
        })();
        run_line(output, error, result)
    }
}

/// Unwrap Base58Check data.
pub struct Base58checkDecode;

impl Command for Base58checkDecode {
    fn name(&self) -> &'static str {
        "base58check-decode"
    }
    fn category(&self) -> &'static str {
        ENCODING
    }
    fn description(&self) -> &'static str {
        "Convert Base58Check data to its checksum, payload, and version."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::one(
            "BASE58CHECK",
            types::base58check(),
            "The Base58Check data to decode.",
        )
        .or_input()]
    }
    fn options(&self) -> Vec<OptionSpec> {
        vec![types::format_option()]
    }
    fn invoke(
        &self,
        bound: &BoundValues,
        output: &mut dyn Write,
        error: &mut dyn Write,
    ) -> ConsoleResult {
        let result = Wrapped::decode_base58check(bound.text("BASE58CHECK"))
            .map(|wrapped| trees::wrapper_tree(&wrapped));
        run_tree(output, error, bound.text("format"), result)
    }
}

/// Convert Base16 data to Base64.
pub struct Base64Encode;

impl Command for Base64Encode {
    fn name(&self) -> &'static str {
        "base64-encode"
    }
    fn category(&self) -> &'static str {
        ENCODING
    }
    fn description(&self) -> &'static str {
        "Convert Base16 data to Base64."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::one("BASE16", types::base16(), "The Base16 data to encode.")
            .or_input()]
    }
    fn invoke(
        &self,
        bound: &BoundValues,
        output: &mut dyn Write,
        error: &mut dyn Write,
    ) -> ConsoleResult {
        let result = (|| {
            let data: Base16 = bound.parse("BASE16")?;
            Ok::<_, rook_btc::Error>(base64_encode(data.as_bytes()))
        })();
        run_line(output, error, result)
    }
}

/// Convert Base64 data to Base16.
pub struct Base64Decode;

impl Command for Base64Decode {
    fn name(&self) -> &'static str {
        "base64-decode"
    }
    fn category(&self) -> &'static str {
        ENCODING
    }
    fn description(&self) -> &'static str {
        "Convert Base64 data to Base16."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::one("BASE64", types::base64(), "The Base64 data to decode.")
            .or_input()]
    }
    fn invoke(
        &self,
        bound: &BoundValues,
        output: &mut dyn Write,
        error: &mut dyn Write,
    ) -> ConsoleResult {
        let result = base64_decode(bound.text("BASE64")).map(hex::encode);
        run_line(output, error, result)
    }
}

/// Wrap a payload with a version and checksum.
pub struct WrapEncode;

impl Command for WrapEncode {
    fn name(&self) -> &'static str {
        "wrap-encode"
    }
    fn category(&self) -> &'static str {
        ENCODING
    }
    fn description(&self) -> &'static str {
        "Add a version byte and checksum to Base16 data."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::one("BASE16", types::base16(), "The Base16 data to wrap.")
            .or_input()]
    }
    fn options(&self) -> Vec<OptionSpec> {
        vec![version_option()]
    }
    fn invoke(
        &self,
        bound: &BoundValues,
        output: &mut dyn Write,
        error: &mut dyn Write,
    ) -> ConsoleResult {
        let result = (|| {
            let payload: Base16 = bound.parse("BASE16")?;
            let wrapped = Wrapped::new(version_byte(bound)?, payload.into_bytes());
            Ok::<_, rook_btc::Error>(wrapped.to_string())
        })();
        run_line(output, error, result)
    }
}

/// Validate and split wrapped data.
pub struct WrapDecode;

impl Command for WrapDecode {
    fn name(&self) -> &'static str {
        "wrap-decode"
    }
    fn category(&self) -> &'static str {
        ENCODING
    }
    fn description(&self) -> &'static str {
        "Validate the checksum of Base16 wrapped data and recover its payload and version."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::one("WRAPPED", types::wrapped(), "The wrapped Base16 data.")
            .or_input()]
    }
    fn options(&self) -> Vec<OptionSpec> {
        vec![types::format_option()]
    }
    fn invoke(
        &self,
        bound: &BoundValues,
        output: &mut dyn Write,
        error: &mut dyn Write,
    ) -> ConsoleResult {
        let result = bound
            .parse::<Wrapped>("WRAPPED")
            .map(|wrapped| trees::wrapper_tree(&wrapped));
        run_tree(output, error, bound.text("format"), result)
    }
}

/// Encode a payment address from a key hash.
pub struct AddressEncode;

impl Command for AddressEncode {
    fn name(&self) -> &'static str {
        "address-encode"
    }
    fn formerly(&self) -> Option<&'static str> {
        Some("encode-addr")
    }
    fn category(&self) -> &'static str {
        ENCODING
    }
    fn description(&self) -> &'static str {
        "Convert a RIPEMD160 hash to a payment address."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::one(
            "RIPEMD160",
            types::base16(),
            "The Base16 hash of the public key or script.",
        )
        .or_input()]
    }
    fn options(&self) -> Vec<OptionSpec> {
        vec![version_option()]
    }
    fn invoke(
        &self,
        bound: &BoundValues,
        output: &mut dyn Write,
        error: &mut dyn Write,
    ) -> ConsoleResult {
        let result = (|| {
            let hash: Base16 = bound.parse("RIPEMD160")?;
            let hash: [u8; 20] =
                hash.as_bytes()
                    .try_into()
                    .map_err(|_| rook_btc::Error::Length {
                        expected: 20,
                        actual: hash.len(),
                    })?;
            Ok::<_, rook_btc::Error>(PaymentAddress::encode_hash(version_byte(bound)?, &hash))
        })();
        run_line(output, error, result)
    }
}

/// Split a payment address into its checksum, hash, and version.
pub struct AddressDecode;

impl Command for AddressDecode {
    fn name(&self) -> &'static str {
        "address-decode"
    }
    fn formerly(&self) -> Option<&'static str> {
        Some("decode-addr")
    }
    fn category(&self) -> &'static str {
        ENCODING
    }
    fn description(&self) -> &'static str {
        "Convert a payment address to its checksum, hash, and version."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::one(
            "ADDRESS",
            types::base58check(),
            "The payment address to decode.",
        )
        .or_input()]
    }
    fn options(&self) -> Vec<OptionSpec> {
        vec![types::format_option()]
    }
    fn invoke(
        &self,
        bound: &BoundValues,
        output: &mut dyn Write,
        error: &mut dyn Write,
    ) -> ConsoleResult {
        let result = Wrapped::decode_base58check(bound.text("ADDRESS"))
            .map(|wrapped| trees::wrapper_tree(&wrapped));
        run_tree(output, error, bound.text("format"), result)
    }
}
