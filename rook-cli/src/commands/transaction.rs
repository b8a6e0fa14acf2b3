//! Transaction encode and decode commands.

use std::io::Write;

use rook::{
    run_line, run_tree, ArgumentSpec, BoundValues, Command, ConsoleResult, OptionSpec, ValueType,
};
use rook_btc::tx::{build_transaction, decode_transaction, encode_transaction};
use rook_btc::{TxInputSpec, TxOutputSpec};

use super::types;
use crate::trees;

const TRANSACTION: &str = "TRANSACTION";

/// Assemble and serialize an unsigned transaction.
pub struct TxEncode;

impl Command for TxEncode {
    fn name(&self) -> &'static str {
        "tx-encode"
    }
    fn category(&self) -> &'static str {
        TRANSACTION
    }
    fn description(&self) -> &'static str {
        "Encode an unsigned transaction as Base16."
    }
    fn options(&self) -> Vec<OptionSpec> {
        vec![
            OptionSpec::value(
                "input",
                Some('i'),
                types::tx_input(),
                "A transaction input in the form TXID:INDEX:SEQUENCE, where SEQUENCE may be omitted.",
            )
            .repeated(),
            OptionSpec::value(
                "output",
                Some('o'),
                types::tx_output(),
                "A transaction output in the form ADDRESS:SATOSHIS.",
            )
            .repeated(),
            OptionSpec::value(
                "version",
                Some('v'),
                ValueType::Integer,
                "The transaction version.",
            )
            .default("1"),
            OptionSpec::value(
                "lock-time",
                Some('l'),
                ValueType::Integer,
                "The transaction lock time.",
            )
            .default("0"),
        ]
    }
    fn invoke(
        &self,
        bound: &BoundValues,
        output: &mut dyn Write,
        error: &mut dyn Write,
    ) -> ConsoleResult {
        let result = (|| {
            let inputs = bound
                .list("input")
                .iter()
                .map(|token| token.parse::<TxInputSpec>())
                .collect::<rook_btc::Result<Vec<_>>>()?;
            let outputs = bound
                .list("output")
                .iter()
                .map(|token| token.parse::<TxOutputSpec>())
                .collect::<rook_btc::Result<Vec<_>>>()?;
            let version = u32::try_from(bound.integer("version"))
                .map_err(|_| rook_btc::Error::msg("transaction version is out of range"))?;
            let lock_time = u32::try_from(bound.integer("lock-time"))
                .map_err(|_| rook_btc::Error::msg("lock time is out of range"))?;

            let tx = build_transaction(version, lock_time, &inputs, &outputs);
            Ok::<_, rook_btc::Error>(encode_transaction(&tx))
        })();
        run_line(output, error, result)
    }
}

/// Parse a serialized transaction into its structure.
pub struct TxDecode;

impl Command for TxDecode {
    fn name(&self) -> &'static str {
        "tx-decode"
    }
    fn category(&self) -> &'static str {
        TRANSACTION
    }
    fn description(&self) -> &'static str {
        "Decode a Base16 transaction."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::one(
            "BASE16",
            types::base16(),
            "The Base16 transaction to decode.",
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
        let result =
            decode_transaction(bound.text("BASE16")).map(|tx| trees::transaction_tree(&tx));
        run_tree(output, error, bound.text("format"), result)
    }
}
