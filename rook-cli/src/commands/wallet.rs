//! Key generation and conversion commands.

use std::io::Write;

use rook::{run_line, ArgumentSpec, BoundValues, Command, ConsoleResult, OptionSpec, ValueType};
use rook_btc::{entropy, Base16, EcPrivate, EcPublic, HdPrivate, HdPublic, Network, Result, Wif};

use super::types;

const WALLET: &str = "WALLET";

fn network(bound: &BoundValues) -> Network {
    if bound.flag("testnet") {
        Network::Testnet
    } else {
        Network::Mainnet
    }
}

fn version_byte(bound: &BoundValues) -> Result<u8> {
    u8::try_from(bound.integer("version"))
        .map_err(|_| rook_btc::Error::msg("version byte is out of range"))
}

fn child_index(bound: &BoundValues) -> Result<u32> {
    u32::try_from(bound.integer("index"))
        .map_err(|_| rook_btc::Error::msg("child index is out of range"))
}

/// Generate random seed entropy.
pub struct Seed;

impl Command for Seed {
    fn name(&self) -> &'static str {
        "seed"
    }
    fn category(&self) -> &'static str {
        WALLET
    }
    fn description(&self) -> &'static str {
        "Generate a pseudorandom seed."
    }
    fn options(&self) -> Vec<OptionSpec> {
        vec![OptionSpec::value(
            "bit-length",
            Some('b'),
            ValueType::Integer,
            "The length of the seed in bits, a multiple of 8 no less than 128.",
        )
        .default("192")]
    }
    fn invoke(
        &self,
        bound: &BoundValues,
        output: &mut dyn Write,
        error: &mut dyn Write,
    ) -> ConsoleResult {
        let result = entropy::random_seed(bound.integer("bit-length")).map(hex::encode);
        run_line(output, error, result)
    }
}

/// Derive an EC secret from seed entropy.
pub struct EcNew;

impl Command for EcNew {
    fn name(&self) -> &'static str {
        "ec-new"
    }
    fn category(&self) -> &'static str {
        WALLET
    }
    fn description(&self) -> &'static str {
        "Create a new EC private key from entropy."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::one("SEED", types::base16(), "The Base16 entropy for the new key.")
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
            let secret = EcPrivate::from_seed(seed.as_bytes())?;
            Ok::<_, rook_btc::Error>(secret.to_hex().to_string())
        })();
        run_line(output, error, result)
    }
}

/// Derive the public point of an EC secret.
pub struct EcToPublic;

impl Command for EcToPublic {
    fn name(&self) -> &'static str {
        "ec-to-public"
    }
    fn category(&self) -> &'static str {
        WALLET
    }
    fn description(&self) -> &'static str {
        "Derive the EC public key of an EC private key."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::one(
            "EC_PRIVATE_KEY",
            types::ec_private(),
            "The Base16 EC private key.",
        )
        .or_input()]
    }
    fn options(&self) -> Vec<OptionSpec> {
        vec![OptionSpec::switch(
            "uncompressed",
            Some('u'),
            "Derive using the uncompressed point encoding.",
        )]
    }
    fn invoke(
        &self,
        bound: &BoundValues,
        output: &mut dyn Write,
        error: &mut dyn Write,
    ) -> ConsoleResult {
        let result = (|| {
            let secret: EcPrivate = bound.parse("EC_PRIVATE_KEY")?;
            let point = secret.to_public();
            Ok::<_, rook_btc::Error>(if bound.flag("uncompressed") {
                hex::encode(point.public_key().serialize_uncompressed())
            } else {
                point.to_string()
            })
        })();
        run_line(output, error, result)
    }
}

/// Encode a payment address from an EC point.
pub struct EcToAddress;

impl Command for EcToAddress {
    fn name(&self) -> &'static str {
        "ec-to-address"
    }
    fn category(&self) -> &'static str {
        WALLET
    }
    fn description(&self) -> &'static str {
        "Convert an EC public key to a payment address."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::one(
            "EC_PUBLIC_KEY",
            types::ec_public(),
            "The Base16 EC public key to convert.",
        )
        .or_input()]
    }
    fn options(&self) -> Vec<OptionSpec> {
        vec![OptionSpec::value(
            "version",
            Some('v'),
            ValueType::Integer,
            "The desired payment address version.",
        )
        .default("0")]
    }
    fn invoke(
        &self,
        bound: &BoundValues,
        output: &mut dyn Write,
        error: &mut dyn Write,
    ) -> ConsoleResult {
        let result = (|| {
            let key: EcPublic = bound.parse("EC_PUBLIC_KEY")?;
            let version = version_byte(bound)?;
            Ok::<_, rook_btc::Error>(rook_btc::PaymentAddress::from_public(&key, version))
        })();
        run_line(output, error, result)
    }
}

/// Encode an EC secret in wallet import format.
pub struct EcToWif;

impl Command for EcToWif {
    fn name(&self) -> &'static str {
        "ec-to-wif"
    }
    fn category(&self) -> &'static str {
        WALLET
    }
    fn description(&self) -> &'static str {
        "Convert an EC private key to a WIF private key."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::one(
            "EC_PRIVATE_KEY",
            types::ec_private(),
            "The Base16 EC private key to convert.",
        )
        .or_input()]
    }
    fn options(&self) -> Vec<OptionSpec> {
        vec![
            OptionSpec::switch(
                "uncompressed",
                Some('u'),
                "Use the uncompressed public key encoding.",
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
            let secret: EcPrivate = bound.parse("EC_PRIVATE_KEY")?;
            let wif = Wif::new(&secret, network(bound), !bound.flag("uncompressed"));
            Ok::<_, rook_btc::Error>(wif.to_wif().to_string())
        })();
        run_line(output, error, result)
    }
}

/// Recover the EC secret inside a WIF key.
pub struct WifToEc;

impl Command for WifToEc {
    fn name(&self) -> &'static str {
        "wif-to-ec"
    }
    fn category(&self) -> &'static str {
        WALLET
    }
    fn description(&self) -> &'static str {
        "Convert a WIF private key to an EC private key."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::one("WIF", types::wif(), "The WIF private key to convert.").or_input()]
    }
    fn invoke(
        &self,
        bound: &BoundValues,
        output: &mut dyn Write,
        error: &mut dyn Write,
    ) -> ConsoleResult {
        let result = (|| {
            let wif: Wif = bound.parse("WIF")?;
            Ok::<_, rook_btc::Error>(wif.secret().to_hex().to_string())
        })();
        run_line(output, error, result)
    }
}

/// Stretch seed entropy into a master extended private key.
pub struct HdNew;

impl Command for HdNew {
    fn name(&self) -> &'static str {
        "hd-new"
    }
    fn category(&self) -> &'static str {
        WALLET
    }
    fn description(&self) -> &'static str {
        "Create a new HD private key from entropy."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::one("SEED", types::base16(), "The Base16 entropy for the new key.")
            .or_input()]
    }
    fn options(&self) -> Vec<OptionSpec> {
        vec![OptionSpec::switch("testnet", Some('t'), "Encode for the testnet network.")]
    }
    fn invoke(
        &self,
        bound: &BoundValues,
        output: &mut dyn Write,
        error: &mut dyn Write,
    ) -> ConsoleResult {
        let result = (|| {
            let seed: Base16 = bound.parse("SEED")?;
            let master = HdPrivate::new_master(seed.as_bytes(), network(bound))?;
            Ok::<_, rook_btc::Error>(master.to_string())
        })();
        run_line(output, error, result)
    }
}

/// Derive a child extended private key.
pub struct HdPrivateCommand;

impl Command for HdPrivateCommand {
    fn name(&self) -> &'static str {
        "hd-private"
    }
    fn formerly(&self) -> Option<&'static str> {
        Some("hd-priv")
    }
    fn category(&self) -> &'static str {
        WALLET
    }
    fn description(&self) -> &'static str {
        "Derive a child HD private key from an HD private key."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::one(
            "HD_PRIVATE_KEY",
            types::hd_private(),
            "The parent HD private key.",
        )
        .or_input()]
    }
    fn options(&self) -> Vec<OptionSpec> {
        vec![
            OptionSpec::value("index", Some('i'), ValueType::Integer, "The child key index.")
                .default("0"),
            OptionSpec::switch("hard", Some('d'), "Signal hardened derivation."),
        ]
    }
    fn invoke(
        &self,
        bound: &BoundValues,
        output: &mut dyn Write,
        error: &mut dyn Write,
    ) -> ConsoleResult {
        let result = (|| {
            let parent: HdPrivate = bound.parse("HD_PRIVATE_KEY")?;
            let child = parent.derive(child_index(bound)?, bound.flag("hard"))?;
            Ok::<_, rook_btc::Error>(child.to_string())
        })();
        run_line(output, error, result)
    }
}

/// Derive a child extended public key.
pub struct HdPublicCommand;

impl Command for HdPublicCommand {
    fn name(&self) -> &'static str {
        "hd-public"
    }
    fn formerly(&self) -> Option<&'static str> {
        Some("hd-pub")
    }
    fn category(&self) -> &'static str {
        WALLET
    }
    fn description(&self) -> &'static str {
        "Derive a child HD public key from an HD private or public key."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::one(
            "HD_KEY",
            types::hd_key(),
            "The parent HD private or public key.",
        )
        .or_input()]
    }
    fn options(&self) -> Vec<OptionSpec> {
        vec![
            OptionSpec::value("index", Some('i'), ValueType::Integer, "The child key index.")
                .default("0"),
            OptionSpec::switch("hard", Some('d'), "Signal hardened derivation."),
        ]
    }
    fn invoke(
        &self,
        bound: &BoundValues,
        output: &mut dyn Write,
        error: &mut dyn Write,
    ) -> ConsoleResult {
        let result = (|| {
            let token = bound.text("HD_KEY");
            let index = child_index(bound)?;
            let hard = bound.flag("hard");

            if let Ok(parent) = token.parse::<HdPrivate>() {
                let child = parent.derive(index, hard)?;
                return Ok(child.to_public().to_string());
            }
            if hard {
                return Err(rook_btc::Error::msg(
                    "hardened derivation requires an HD private key",
                ));
            }
            let parent: HdPublic = token.parse()?;
            Ok::<_, rook_btc::Error>(parent.derive(index)?.to_string())
        })();
        run_line(output, error, result)
    }
}

/// Recover the EC secret inside an extended private key.
pub struct HdToEc;

impl Command for HdToEc {
    fn name(&self) -> &'static str {
        "hd-to-ec"
    }
    fn category(&self) -> &'static str {
        WALLET
    }
    fn description(&self) -> &'static str {
        "Convert an HD private key to an EC private key."
    }
    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::one(
            "HD_PRIVATE_KEY",
            types::hd_private(),
            "The HD private key to convert.",
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
            let key: HdPrivate = bound.parse("HD_PRIVATE_KEY")?;
            Ok::<_, rook_btc::Error>(key.secret().to_hex().to_string())
        })();
        run_line(output, error, result)
    }
}
