//! BIP39 mnemonic commands.

use std::io::Write;

use rook::{run_line, ArgumentSpec, BoundValues, Command, ConsoleResult, OptionSpec, ValueType};
use rook_btc::{Base16, MnemonicPhrase};

use super::types;

const WALLET: &str = "WALLET";

/// Notice written by the obsolete mnemonic-decode command.
pub const MNEMONIC_DECODE_OBSOLETE: &str =
    "The mnemonic-decode command is obsolete, use mnemonic-to-seed.";

/// Encode entropy as a mnemonic phrase.
pub struct MnemonicNew;

impl Command for MnemonicNew {
    fn name(&self) -> &'static str {
        "mnemonic-new"
    }
    fn category(&self) -> &'static str {
        WALLET
    }
    fn description(&self) -> &'static str {
        "Create a mnemonic word list from entropy."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::one(
            "SEED",
            types::base16(),
            "The Base16 entropy to encode; 16, 20, 24, 28, or 32 bytes.",
        )
        .or_input()]
    }
    fn invoke(
        &self,
        bound: &BoundValues,
        output: &mut dyn Write,
        error: &mut dyn Write,
    ) -> ConsoleResult {
        let result = (|| {
            let seed: Base16 = bound.parse("SEED")?;
            let mnemonic = MnemonicPhrase::from_entropy(seed.as_bytes())?;
            Ok::<_, rook_btc::Error>(mnemonic.to_string())
        })();
        run_line(output, error, result)
    }
}

/// Stretch a mnemonic phrase into seed bytes.
pub struct MnemonicToSeed;

impl Command for MnemonicToSeed {
    fn name(&self) -> &'static str {
        "mnemonic-to-seed"
    }
    fn category(&self) -> &'static str {
        WALLET
    }
    fn description(&self) -> &'static str {
        "Convert a mnemonic word list to its 512 bit seed."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::rest(
            "WORD",
            ValueType::Text,
            "The mnemonic words, in order.",
        )]
    }
    fn options(&self) -> Vec<OptionSpec> {
        vec![OptionSpec::value(
            "passphrase",
            Some('p'),
            ValueType::Text,
            "An optional passphrase for the seed stretch.",
        )]
    }
    fn invoke(
        &self,
        bound: &BoundValues,
        output: &mut dyn Write,
        error: &mut dyn Write,
    ) -> ConsoleResult {
        let result = (|| {
            let mnemonic = MnemonicPhrase::from_words(&bound.list("WORD"))?;
            let seed = mnemonic.to_seed(bound.text("passphrase"));
            Ok::<_, rook_btc::Error>(hex::encode(seed.as_slice()))
        })();
        run_line(output, error, result)
    }
}

/// Obsolete; retained so old invocations fail with an explanation.
pub struct MnemonicDecode;

impl Command for MnemonicDecode {
    fn name(&self) -> &'static str {
        "mnemonic-decode"
    }
    fn category(&self) -> &'static str {
        WALLET
    }
    fn description(&self) -> &'static str {
        "Convert a mnemonic word list to Base16 data (obsolete)."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::rest("WORD", ValueType::Text, "The mnemonic words, in order.")]
    }
    fn invoke(
        &self,
        _bound: &BoundValues,
        _output: &mut dyn Write,
        error: &mut dyn Write,
    ) -> ConsoleResult {
        let _ = writeln!(error, "{MNEMONIC_DECODE_OBSOLETE}");
        ConsoleResult::Failure
    }
}
