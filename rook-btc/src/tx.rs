//! Transaction assembly and consensus (de)serialization.

use std::fmt;
use std::str::FromStr;

use bitcoin::absolute::LockTime;
use bitcoin::consensus::encode;
use bitcoin::transaction::Version;
use bitcoin::{Amount, OutPoint, Sequence, Transaction, TxIn, TxOut, Txid, Witness};

use crate::address::PaymentAddress;
use crate::error::{Error, Result};

/// A transaction input given as `TXID:INDEX` or `TXID:INDEX:SEQUENCE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TxInputSpec {
    /// Previous transaction id.
    pub txid: Txid,
    /// Output index in the previous transaction.
    pub index: u32,
    /// Sequence number; final by default.
    pub sequence: u32,
}

impl TxInputSpec {
    /// Convert to a consensus input with an empty signature script.
    #[must_use]
    pub fn to_txin(self) -> TxIn {
        TxIn {
            previous_output: OutPoint::new(self.txid, self.index),
            script_sig: bitcoin::ScriptBuf::new(),
            sequence: Sequence(self.sequence),
            witness: Witness::default(),
        }
    }
}

impl FromStr for TxInputSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(':');
        let txid = parts
            .next()
            .unwrap_or_default()
            .parse::<Txid>()
            .map_err(|_| Error::msg("invalid transaction hash"))?;
        let index = parts
            .next()
            .ok_or_else(|| Error::msg("expected TXID:INDEX"))?
            .parse::<u32>()
            .map_err(|_| Error::msg("invalid output index"))?;
        let sequence = match parts.next() {
            Some(sequence) => sequence
                .parse::<u32>()
                .map_err(|_| Error::msg("invalid sequence number"))?,
            None => Sequence::MAX.0,
        };
        if parts.next().is_some() {
            return Err(Error::msg("expected TXID:INDEX[:SEQUENCE]"));
        }
        Ok(Self {
            txid,
            index,
            sequence,
        })
    }
}

impl fmt::Display for TxInputSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.txid, self.index)?;
        if self.sequence != Sequence::MAX.0 {
            write!(f, ":{}", self.sequence)?;
        }
        Ok(())
    }
}

/// A transaction output given as `ADDRESS:SATOSHIS`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxOutputSpec {
    /// Destination address.
    pub address: PaymentAddress,
    /// Value in satoshis.
    pub value: u64,
}

impl TxOutputSpec {
    /// Convert to a consensus output paying the address.
    #[must_use]
    pub fn to_txout(&self) -> TxOut {
        TxOut {
            value: Amount::from_sat(self.value),
            script_pubkey: self.address.script_pubkey(),
        }
    }
}

impl FromStr for TxOutputSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (address, value) = s
            .rsplit_once(':')
            .ok_or_else(|| Error::msg("expected ADDRESS:SATOSHIS"))?;
        let address = address.parse::<PaymentAddress>()?;
        let value = value
            .parse::<u64>()
            .map_err(|_| Error::msg("invalid satoshi value"))?;
        Ok(Self { address, value })
    }
}

impl fmt::Display for TxOutputSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.value)
    }
}

/// Assemble an unsigned transaction from input and output specs.
#[must_use]
pub fn build_transaction(
    version: u32,
    lock_time: u32,
    inputs: &[TxInputSpec],
    outputs: &[TxOutputSpec],
) -> Transaction {
    Transaction {
        version: Version(version as i32),
        lock_time: LockTime::from_consensus(lock_time),
        input: inputs.iter().map(|input| input.to_txin()).collect(),
        output: outputs.iter().map(TxOutputSpec::to_txout).collect(),
    }
}

/// Serialize a transaction to consensus Base16.
#[must_use]
pub fn encode_transaction(tx: &Transaction) -> String {
    encode::serialize_hex(tx)
}

/// Parse a transaction from consensus Base16.
pub fn decode_transaction(text: &str) -> Result<Transaction> {
    let bytes = hex::decode(text).map_err(|_| Error::Encoding)?;
    encode::deserialize(&bytes).map_err(|e| Error::msg(format!("invalid transaction: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Offline transaction vector: one input, one P2PKH output, version 1.
    const INPUT: &str = "97e06e49dfdd26c5a904670971ccf4c7fe7d9da53cb379bf9b442fc9427080b3:0";
    const OUTPUT: &str = "13Ft7SkreJY9D823NPm4t6D1cBqLYTJtAe:90000";
    const TX_BASE16: &str = "0100000001b3807042c92f449bbf79b33ca59d7dfec7f4cc71096704a9c526dddf496ee0970000000000ffffffff01905f0100000000001976a91418c0bd8d1818f1bf99cb1df2269c645318ef7b7388ac00000000";

    #[test]
    fn test_encode_offline_vector() {
        let input: TxInputSpec = INPUT.parse().unwrap();
        let output: TxOutputSpec = OUTPUT.parse().unwrap();
        let tx = build_transaction(1, 0, &[input], &[output]);
        assert_eq!(encode_transaction(&tx), TX_BASE16);
    }

    #[test]
    fn test_decode_recovers_structure() {
        let tx = decode_transaction(TX_BASE16).unwrap();
        assert_eq!(tx.version, Version(1));
        assert_eq!(tx.input.len(), 1);
        assert_eq!(tx.output.len(), 1);
        assert_eq!(tx.output[0].value, Amount::from_sat(90_000));
        assert_eq!(
            tx.input[0].previous_output.txid.to_string(),
            "97e06e49dfdd26c5a904670971ccf4c7fe7d9da53cb379bf9b442fc9427080b3"
        );
    }

    #[test]
    fn test_input_spec_sequence() {
        let input: TxInputSpec = format!("{INPUT}:7").parse().unwrap();
        assert_eq!(input.sequence, 7);
        assert_eq!(input.to_txin().sequence, Sequence(7));

        let finalized: TxInputSpec = INPUT.parse().unwrap();
        assert_eq!(finalized.sequence, Sequence::MAX.0);
    }

    #[test]
    fn test_input_spec_rejects_malformed() {
        assert!("deadbeef".parse::<TxInputSpec>().is_err());
        assert!("deadbeef:zero".parse::<TxInputSpec>().is_err());
        assert!(format!("{INPUT}:1:2").parse::<TxInputSpec>().is_err());
    }

    #[test]
    fn test_output_spec_rejects_malformed() {
        assert!("13Ft7SkreJY9D823NPm4t6D1cBqLYTJtAe".parse::<TxOutputSpec>().is_err());
        assert!("13Ft7SkreJY9D823NPm4t6D1cBqLYTJtAe:lots"
            .parse::<TxOutputSpec>()
            .is_err());
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        assert!(decode_transaction(&format!("{TX_BASE16}00")).is_err());
    }
}
