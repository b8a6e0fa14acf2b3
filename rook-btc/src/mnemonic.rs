//! BIP39 mnemonic phrases.

use std::fmt;
use std::str::FromStr;

use bip39::Mnemonic;
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// A BIP39 mnemonic phrase, English wordlist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MnemonicPhrase(Mnemonic);

impl MnemonicPhrase {
    /// Encode entropy as words.
    ///
    /// Entropy must be 16, 20, 24, 28, or 32 bytes.
    pub fn from_entropy(entropy: &[u8]) -> Result<Self> {
        Mnemonic::from_entropy(entropy).map(Self).map_err(Error::Mnemonic)
    }

    /// Parse a whitespace-joined word list.
    pub fn from_words(words: &[&str]) -> Result<Self> {
        words.join(" ").parse()
    }

    /// Number of words in the phrase.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.0.word_count()
    }

    /// Stretch the phrase into a 64-byte seed, zeroized on drop.
    #[must_use]
    pub fn to_seed(&self, passphrase: &str) -> Zeroizing<[u8; 64]> {
        Zeroizing::new(self.0.to_seed(passphrase))
    }
}

impl FromStr for MnemonicPhrase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<Mnemonic>().map(Self).map_err(Error::Mnemonic)
    }
}

impl fmt::Display for MnemonicPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    const PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_from_entropy_published_vector() {
        let mnemonic = MnemonicPhrase::from_entropy(&[0u8; 16]).unwrap();
        assert_eq!(mnemonic.to_string(), PHRASE);
        assert_eq!(mnemonic.word_count(), 12);
    }

    #[test]
    fn test_to_seed_published_vector() {
        let mnemonic: MnemonicPhrase = PHRASE.parse().unwrap();
        let seed = mnemonic.to_seed("TREZOR");
        assert_eq!(
            seed.as_slice(),
            hex!(
                "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
            )
        );
    }

    #[test]
    fn test_rejects_bad_entropy_length() {
        assert!(MnemonicPhrase::from_entropy(&[0u8; 15]).is_err());
    }

    #[test]
    fn test_rejects_bad_checksum_word() {
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
        assert!(phrase.parse::<MnemonicPhrase>().is_err());
    }

    #[test]
    fn test_from_words() {
        let words: Vec<&str> = PHRASE.split(' ').collect();
        let mnemonic = MnemonicPhrase::from_words(&words).unwrap();
        assert_eq!(mnemonic.to_string(), PHRASE);
    }
}
