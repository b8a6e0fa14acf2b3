//! Decimal BTC amounts carried as satoshis.

use std::fmt;
use std::str::FromStr;

use bitcoin::amount::Denomination;
use bitcoin::Amount;

use crate::error::Error;

/// A Bitcoin amount parsed from decimal BTC text.
///
/// Displays with the minimal number of decimal places.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Btc(u64);

impl Btc {
    /// Satoshis per whole bitcoin.
    pub const COIN: u64 = 100_000_000;

    /// Wrap a satoshi count.
    #[must_use]
    pub const fn from_sat(satoshis: u64) -> Self {
        Self(satoshis)
    }

    /// The satoshi count.
    #[must_use]
    pub const fn as_sat(self) -> u64 {
        self.0
    }
}

impl FromStr for Btc {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Amount::from_str_in(s, Denomination::Bitcoin)?;
        Ok(Self(amount.to_sat()))
    }
}

impl fmt::Display for Btc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / Self::COIN;
        let fraction = self.0 % Self::COIN;
        if fraction == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{fraction:08}");
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}
