// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::{keccak256, Address, Bytes, FixedBytes, U256};
use eyre::{bail, Result};

const WORD: usize = 32;

/// ABI encode clear values as a static tuple of uint256 words, the layout
/// `verifyDecryption` expects.
pub fn encode_clear_values(values: &[U256]) -> Bytes {
    let mut out = Vec::with_capacity(values.len() * WORD);
    for value in values {
        out.extend_from_slice(&value.to_be_bytes::<WORD>());
    }
    Bytes::from(out)
}

/// Decode the output of [`encode_clear_values`]
pub fn decode_clear_values(bytes: &[u8]) -> Result<Vec<U256>> {
    if bytes.len() % WORD != 0 {
        bail!("Clear values must be a whole number of 32 byte words");
    }
    Ok(bytes
        .chunks_exact(WORD)
        .map(U256::from_be_slice)
        .collect())
}

/// Digest binding the handles, their clear values and the contract
pub fn decryption_digest(
    handles: &[FixedBytes<32>],
    abi_encoded_clear_values: &[u8],
    contract_address: Address,
) -> FixedBytes<32> {
    let mut preimage = Vec::new();
    for handle in handles {
        preimage.extend_from_slice(handle.as_slice());
    }
    preimage.extend_from_slice(abi_encoded_clear_values);
    preimage.extend_from_slice(contract_address.as_slice());
    keccak256(preimage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::sol_types::SolValue;

    #[test]
    fn test_single_value_matches_abi_encode() {
        let value = U256::from(500u64);
        assert_eq!(encode_clear_values(&[value]).to_vec(), value.abi_encode());
    }

    #[test]
    fn test_decode_values() -> Result<()> {
        let values = vec![U256::from(1u64), U256::from(u32::MAX)];
        let encoded = encode_clear_values(&values);
        assert_eq!(decode_clear_values(&encoded)?, values);
        assert!(decode_clear_values(&encoded[..40]).is_err());
        Ok(())
    }

    #[test]
    fn test_digest_depends_on_values() {
        let handle = FixedBytes::from([3u8; 32]);
        let a = decryption_digest(&[handle], &encode_clear_values(&[U256::from(1u64)]), Address::ZERO);
        let b = decryption_digest(&[handle], &encode_clear_values(&[U256::from(2u64)]), Address::ZERO);
        assert_ne!(a, b);
    }
}
