//! Typed Bitcoin primitives for the rook CLI.
//!
//! Each type converts between command-line text and a domain value,
//! delegating the cryptographic and consensus work to external crates:
//! `bitcoin` for curve math, BIP32, addresses, and transactions,
//! `bip39` for mnemonics, `bs58`/`base64`/`hex` for the radix codecs.
//! Invalid input surfaces as [`Error`], which command handlers convert
//! to a diagnostic at their own boundary.

#![warn(missing_docs, rust_2018_idioms, clippy::all)]
#![forbid(unsafe_code)]

pub mod address;
pub mod amount;
pub mod base16;
pub mod ec;
pub mod encoding;
pub mod entropy;
pub mod error;
pub mod hash;
pub mod hd;
pub mod mnemonic;
pub mod network;
pub mod stealth;
pub mod tx;
pub mod uri;
pub mod wif;
pub mod wrapper;

pub use address::PaymentAddress;
pub use amount::Btc;
pub use base16::Base16;
pub use ec::{EcPrivate, EcPublic};
pub use error::{Error, Result};
pub use hd::{HdPrivate, HdPublic};
pub use mnemonic::MnemonicPhrase;
pub use network::Network;
pub use stealth::StealthAddress;
pub use tx::{TxInputSpec, TxOutputSpec};
pub use uri::BitcoinUri;
pub use wif::Wif;
pub use wrapper::Wrapped;
