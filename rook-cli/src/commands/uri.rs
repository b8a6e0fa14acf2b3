//! Payment URI commands.

use std::io::Write;

use rook::{
    run_line, run_tree, ArgumentSpec, BoundValues, Command, ConsoleResult, OptionSpec, ValueType,
};
use rook_btc::{BitcoinUri, Btc, PaymentAddress, StealthAddress};

use super::types;
use crate::trees;

const WALLET: &str = "WALLET";

const ADDRESS_CONFLICT: &str = "Only one Bitcoin or stealth address may be specified.";

/// Compose a payment URI from its parts.
pub struct UriEncode;

impl Command for UriEncode {
    fn name(&self) -> &'static str {
        "uri-encode"
    }
    fn category(&self) -> &'static str {
        WALLET
    }
    fn description(&self) -> &'static str {
        "Compose a Bitcoin URI from specified parts."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::optional(
            "BITCOIN_ADDRESS",
            types::address(),
            "The Bitcoin address for the address part.",
        )]
    }
    fn options(&self) -> Vec<OptionSpec> {
        vec![
            OptionSpec::value("amount", Some('a'), types::btc(), "The value of the amount parameter."),
            OptionSpec::value("label", Some('l'), ValueType::Text, "The value of the label parameter."),
            OptionSpec::value(
                "message",
                Some('m'),
                ValueType::Text,
                "The value of the message parameter.",
            ),
            OptionSpec::value(
                "request",
                Some('r'),
                ValueType::Text,
                "The value of the payment request parameter.",
            ),
            OptionSpec::value(
                "stealth",
                Some('s'),
                types::stealth_address(),
                "The stealth address for the address part.",
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
            let mut uri = BitcoinUri::new();

            let address = bound.maybe_text("BITCOIN_ADDRESS");
            let stealth = bound.maybe_text("stealth");
            match (address, stealth) {
                (Some(_), Some(_)) => return Err(rook_btc::Error::msg(ADDRESS_CONFLICT)),
                (Some(address), None) => {
                    uri = uri.with_address(&address.parse::<PaymentAddress>()?);
                }
                (None, Some(stealth)) => {
                    uri = uri.with_stealth(&stealth.parse::<StealthAddress>()?);
                }
                (None, None) => {}
            }

            if let Some(amount) = bound.maybe_text("amount") {
                uri = uri.with_amount(amount.parse::<Btc>()?);
            }
            if let Some(label) = bound.maybe_text("label") {
                uri = uri.with_label(label);
            }
            if let Some(message) = bound.maybe_text("message") {
                uri = uri.with_message(message);
            }
            if let Some(request) = bound.maybe_text("request") {
                uri = uri.with_request(request);
            }

            Ok::<_, rook_btc::Error>(uri.to_string())
        })();
        run_line(output, error, result)
    }
}

/// Split a payment URI into its parts.
pub struct UriDecode;

impl Command for UriDecode {
    fn name(&self) -> &'static str {
        "uri-decode"
    }
    fn category(&self) -> &'static str {
        WALLET
    }
    fn description(&self) -> &'static str {
        "Decompose a Bitcoin URI into its parts."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::one("URI", types::uri(), "The URI to decode.").or_input()]
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
            .parse::<BitcoinUri>("URI")
            .map(|uri| trees::uri_tree(&uri));
        run_tree(output, error, bound.text("format"), result)
    }
}
