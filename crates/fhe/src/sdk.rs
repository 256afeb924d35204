// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::{Address, Bytes, FixedBytes, U256};
use async_trait::async_trait;
use eyre::Result;
use gig_evm::TxReceipt;
use std::collections::HashMap;

/// Opaque reference to an encrypted value held by the contract
pub type Handle = FixedBytes<32>;

/// Client side encryption of a single integer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedInput {
    /// Handle to pass to the contract in place of the plaintext
    pub encrypted_data: Handle,
    /// Input proof binding the ciphertext to contract and user
    pub proof: Bytes,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecryptionResult {
    pub clear_values: HashMap<Handle, U256>,
}

impl DecryptionResult {
    pub fn clear_value(&self, handle: &Handle) -> Option<U256> {
        self.clear_values.get(handle).copied()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedDecryption {
    pub decryption_result: DecryptionResult,
    /// Receipt of the verification transaction sent through the submitter
    pub receipt: TxReceipt,
}

/// Sends the clear values and their proof to the chain. The SDK calls this
/// once it has obtained the decryption; the returned receipt is confirmed.
#[async_trait]
pub trait DecryptionSubmitter: Send + Sync {
    async fn submit(
        &self,
        abi_encoded_clear_values: Bytes,
        decryption_proof: Bytes,
    ) -> Result<TxReceipt>;
}

/// The FHE SDK seam. Implementors manage their own interior mutability.
#[async_trait]
pub trait FheSdk: Send + Sync + 'static {
    /// Prepare the encryption context. Called once per session.
    async fn initialize(&self) -> Result<()>;

    fn is_initialized(&self) -> bool;

    /// Encrypt `value` for use by `user_address` on `contract_address`
    async fn encrypt(
        &self,
        contract_address: Address,
        user_address: Address,
        value: u64,
    ) -> Result<EncryptedInput>;

    /// Obtain the clear values for `handles` and have them verified on chain
    /// through `submitter`.
    async fn verify_decryption(
        &self,
        handles: &[Handle],
        contract_address: Address,
        submitter: &dyn DecryptionSubmitter,
    ) -> Result<VerifiedDecryption>;
}
