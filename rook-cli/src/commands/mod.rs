//! Command definitions and registry construction.

mod encoding;
mod mnemonic;
mod stealth;
mod transaction;
pub mod types;
mod uri;
mod wallet;

pub use mnemonic::MNEMONIC_DECODE_OBSOLETE;

use rook::Registry;

/// Build the registry of every supported command.
///
/// Registration failures mean inconsistent command metadata and are
/// fatal at startup.
pub fn bootstrap() -> rook::Result<Registry> {
    let mut registry = Registry::new();

    // WALLET
    registry.register(|| Box::new(wallet::Seed))?;
    registry.register(|| Box::new(wallet::EcNew))?;
    registry.register(|| Box::new(wallet::EcToPublic))?;
    registry.register(|| Box::new(wallet::EcToAddress))?;
    registry.register(|| Box::new(wallet::EcToWif))?;
    registry.register(|| Box::new(wallet::WifToEc))?;
    registry.register(|| Box::new(wallet::HdNew))?;
    registry.register(|| Box::new(wallet::HdPrivateCommand))?;
    registry.register(|| Box::new(wallet::HdPublicCommand))?;
    registry.register(|| Box::new(wallet::HdToEc))?;
    registry.register(|| Box::new(mnemonic::MnemonicNew))?;
    registry.register(|| Box::new(mnemonic::MnemonicToSeed))?;
    registry.register(|| Box::new(mnemonic::MnemonicDecode))?;
    registry.register(|| Box::new(uri::UriEncode))?;
    registry.register(|| Box::new(uri::UriDecode))?;

    // ENCODING
    registry.register(|| Box::new(encoding::Base58Encode))?;
    registry.register(|| Box::new(encoding::Base58Decode))?;
    registry.register(|| Box::new(encoding::Base58checkEncode))?;
    registry.register(|| Box::new(encoding::Base58checkDecode))?;
    registry.register(|| Box::new(encoding::Base64Encode))?;
    registry.register(|| Box::new(encoding::Base64Decode))?;
    registry.register(|| Box::new(encoding::WrapEncode))?;
    registry.register(|| Box::new(encoding::WrapDecode))?;
    registry.register(|| Box::new(encoding::AddressEncode))?;
    registry.register(|| Box::new(encoding::AddressDecode))?;

    // TRANSACTION
    registry.register(|| Box::new(transaction::TxEncode))?;
    registry.register(|| Box::new(transaction::TxDecode))?;

    // STEALTH
    registry.register(|| Box::new(stealth::StealthEncode))?;
    registry.register(|| Box::new(stealth::StealthDecode))?;
    registry.register(|| Box::new(stealth::StealthNew))?;

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_registers_all_commands() {
        let registry = bootstrap().unwrap();
        assert_eq!(registry.len(), 30);
    }

    #[test]
    fn test_former_names_resolve() {
        let registry = bootstrap().unwrap();
        for (former, current) in [
            ("hd-priv", "hd-private"),
            ("hd-pub", "hd-public"),
            ("encode-addr", "address-encode"),
            ("decode-addr", "address-decode"),
            ("stealth-initiate", "stealth-new"),
        ] {
            let resolved = registry.lookup(former).unwrap();
            assert!(resolved.former_used);
            assert_eq!(resolved.command.name(), current);
        }
    }
}
