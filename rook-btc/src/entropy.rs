//! Random seed entropy.

use bitcoin::secp256k1::rand::{thread_rng, RngCore};

use crate::error::{Error, Result};

/// Fewer bits than this is not enough seed for key material.
pub const MINIMUM_SEED_BITS: u64 = 128;

/// Draw `bit_length` bits of entropy from the system generator.
///
/// The length must be at least [`MINIMUM_SEED_BITS`] and a multiple of
/// eight.
pub fn random_seed(bit_length: u64) -> Result<Vec<u8>> {
    if bit_length < MINIMUM_SEED_BITS || bit_length % 8 != 0 {
        return Err(Error::msg(format!(
            "bit length {bit_length} is unsupported, use a multiple of 8 no less than {MINIMUM_SEED_BITS}"
        )));
    }
    let mut bytes = vec![0u8; (bit_length / 8) as usize];
    thread_rng().fill_bytes(&mut bytes);
    Ok(bytes)
}
