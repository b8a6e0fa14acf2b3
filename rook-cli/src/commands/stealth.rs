//! Stealth address commands.

use std::io::Write;

use rook::{
    run_line, run_tree, ArgumentSpec, BoundValues, Command, ConsoleResult, OptionSpec, ValueType,
};
use rook_btc::stealth::{shared_secret, uncover_public};
use rook_btc::{EcPrivate, EcPublic, Network, StealthAddress};

use super::types;
use crate::trees;

const STEALTH: &str = "STEALTH";

/// Assemble a stealth address from its keys.
pub struct StealthEncode;

impl Command for StealthEncode {
    fn name(&self) -> &'static str {
        "stealth-encode"
    }
    fn category(&self) -> &'static str {
        STEALTH
    }
    fn description(&self) -> &'static str {
        "Encode a stealth address from a scan key and spend keys."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![
            ArgumentSpec::one(
                "SCAN_PUBKEY",
                types::ec_public(),
                "The Base16 EC public key used to scan for stealth payments.",
            ),
            ArgumentSpec::rest(
                "SPEND_PUBKEY",
                types::ec_public(),
                "Base16 EC public keys that can spend stealth payments; the scan key is reused when none are given.",
            ),
        ]
    }
    fn options(&self) -> Vec<OptionSpec> {
        vec![
            OptionSpec::value(
                "signatures",
                Some('s'),
                ValueType::Integer,
                "The number of signatures required to spend; all spend keys when unset.",
            ),
            OptionSpec::switch("testnet", Some('t'), "Encode for the testnet network."),
        ]
    }
    fn invoke(
        &self,
        bound: &BoundValues,
        output: &mut dyn Write,
        error: &mut dyn Write,
    ) -> ConsoleResult {
        let result = (|| {
            let scan: EcPublic = bound.parse("SCAN_PUBKEY")?;
            let mut spend = bound
                .list("SPEND_PUBKEY")
                .iter()
                .map(|token| token.parse::<EcPublic>())
                .collect::<rook_btc::Result<Vec<_>>>()?;
            if spend.is_empty() {
                spend.push(scan);
            }
            let signatures = match bound.maybe_integer("signatures") {
                Some(count) => Some(
                    u8::try_from(count)
                        .map_err(|_| rook_btc::Error::msg("signature count is out of range"))?,
                ),
                None => None,
            };
            let network = if bound.flag("testnet") {
                Network::Testnet
            } else {
                Network::Mainnet
            };
            let address = StealthAddress::new(network, scan, spend, signatures)?;
            Ok::<_, rook_btc::Error>(address.to_string())
        })();
        run_line(output, error, result)
    }
}

/// Split a stealth address into its keys and threshold.
pub struct StealthDecode;

impl Command for StealthDecode {
    fn name(&self) -> &'static str {
        "stealth-decode"
    }
    fn category(&self) -> &'static str {
        STEALTH
    }
    fn description(&self) -> &'static str {
        "Decode a stealth address into its scan key, spend keys, and threshold."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::one(
            "STEALTH_ADDRESS",
            types::stealth_address(),
            "The stealth address to decode.",
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
        let result = bound
            .parse::<StealthAddress>("STEALTH_ADDRESS")
            .map(|address| trees::stealth_tree(&address));
        run_tree(output, error, bound.text("format"), result)
    }
}

/// Derive a one-time stealth payment key.
pub struct StealthNew;

impl Command for StealthNew {
    fn name(&self) -> &'static str {
        "stealth-new"
    }
    fn formerly(&self) -> Option<&'static str> {
        Some("stealth-initiate")
    }
    fn category(&self) -> &'static str {
        STEALTH
    }
    fn description(&self) -> &'static str {
        "Create a new stealth public key from which a payment address can be generated."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![
            ArgumentSpec::one(
                "EPHEMERAL_SECRET",
                types::ec_private(),
                "The Base16 ephemeral EC private key used to generate stealth payment metadata. A unique value should be used for each stealth payment.",
            ),
            ArgumentSpec::one(
                "SCAN_PUBKEY",
                types::ec_public(),
                "The Base16 EC public key required to generate a stealth address.",
            ),
            ArgumentSpec::one(
                "SPEND_PUBKEY",
                types::ec_public(),
                "A Base16 EC public key corresponding to a private key that can spend payments to the stealth address.",
            ),
        ]
    }
    fn invoke(
        &self,
        bound: &BoundValues,
        output: &mut dyn Write,
        error: &mut dyn Write,
    ) -> ConsoleResult {
        let result = (|| {
            let ephemeral: EcPrivate = bound.parse("EPHEMERAL_SECRET")?;
            let scan: EcPublic = bound.parse("SCAN_PUBKEY")?;
            let spend: EcPublic = bound.parse("SPEND_PUBKEY")?;

            let shared = shared_secret(&ephemeral, &scan)?;
            let payment = uncover_public(&spend, shared)?;
            Ok::<_, rook_btc::Error>(payment.to_string())
        })();
        run_line(output, error, result)
    }
}
