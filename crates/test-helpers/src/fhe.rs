// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::{keccak256, Address, Bytes, U256};
use async_trait::async_trait;
use eyre::{eyre, Result};
use gig_fhe::abi::{decryption_digest, encode_clear_values};
use gig_fhe::{
    DecryptionResult, DecryptionSubmitter, EncryptedInput, FheSdk, Handle, VerifiedDecryption,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Default)]
struct Script {
    values: HashMap<Handle, U256>,
    init_error: Option<String>,
    init_delay: Option<Duration>,
    decrypt_error: Option<String>,
}

/// An FHE SDK that does no cryptography. Encrypted values are remembered by
/// handle and revealed on request; failures are scripted by the test.
#[derive(Clone, Default)]
pub struct ScriptedFhe {
    script: Arc<Mutex<Script>>,
    initialized: Arc<AtomicBool>,
    init_calls: Arc<AtomicUsize>,
    encrypt_calls: Arc<AtomicUsize>,
}

impl ScriptedFhe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Already initialized, as after a previous session
    pub fn initialized() -> Self {
        let fhe = Self::default();
        fhe.initialized.store(true, Ordering::SeqCst);
        fhe
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_clear_value(&self, handle: Handle, value: u64) {
        self.script().values.insert(handle, U256::from(value));
    }

    pub fn fail_initialize(&self, message: &str) {
        self.script().init_error = Some(message.to_string());
    }

    pub fn clear_initialize_failure(&self) {
        self.script().init_error = None;
    }

    /// `initialize` takes `delay` of tokio time
    pub fn delay_initialize(&self, delay: Duration) {
        self.script().init_delay = Some(delay);
    }

    pub fn fail_decryption(&self, message: &str) {
        self.script().decrypt_error = Some(message.to_string());
    }

    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    pub fn encrypt_calls(&self) -> usize {
        self.encrypt_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FheSdk for ScriptedFhe {
    async fn initialize(&self) -> Result<()> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.script().init_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = self.script().init_error.clone() {
            return Err(eyre!("{message}"));
        }
        self.initialized.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    async fn encrypt(
        &self,
        contract_address: Address,
        user_address: Address,
        value: u64,
    ) -> Result<EncryptedInput> {
        if !self.is_initialized() {
            return Err(eyre!("FHE SDK is not initialized"));
        }
        let count = self.encrypt_calls.fetch_add(1, Ordering::SeqCst) as u64;
        let mut preimage = value.to_be_bytes().to_vec();
        preimage.extend_from_slice(&count.to_be_bytes());
        preimage.extend_from_slice(contract_address.as_slice());
        preimage.extend_from_slice(user_address.as_slice());
        let handle = keccak256(preimage);
        self.set_clear_value(handle, value);
        Ok(EncryptedInput {
            encrypted_data: handle,
            proof: Bytes::from_static(b"scripted-proof"),
        })
    }

    async fn verify_decryption(
        &self,
        handles: &[Handle],
        contract_address: Address,
        submitter: &dyn DecryptionSubmitter,
    ) -> Result<VerifiedDecryption> {
        let clear_values = {
            let script = self.script();
            if let Some(message) = &script.decrypt_error {
                return Err(eyre!("{message}"));
            }
            handles
                .iter()
                .map(|h| {
                    script
                        .values
                        .get(h)
                        .map(|v| (*h, *v))
                        .ok_or_else(|| eyre!("Unknown handle {h}"))
                })
                .collect::<Result<Vec<_>>>()?
        };

        let ordered: Vec<U256> = clear_values.iter().map(|(_, v)| *v).collect();
        let encoded = encode_clear_values(&ordered);
        let proof = decryption_digest(handles, &encoded, contract_address);
        let receipt = submitter
            .submit(encoded, Bytes::copy_from_slice(proof.as_slice()))
            .await?;
        Ok(VerifiedDecryption {
            decryption_result: DecryptionResult {
                clear_values: clear_values.into_iter().collect(),
            },
            receipt,
        })
    }
}
