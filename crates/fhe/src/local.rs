// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::abi::{decryption_digest, encode_clear_values};
use crate::sdk::{
    DecryptionResult, DecryptionSubmitter, EncryptedInput, FheSdk, Handle, VerifiedDecryption,
};
use alloy::primitives::{keccak256, Address, Bytes, U256};
use async_trait::async_trait;
use eyre::{eyre, Result};
use fhe::bfv::{
    BfvParameters, BfvParametersBuilder, Ciphertext, Encoding, Plaintext, PublicKey, SecretKey,
};
use fhe_traits::{FheDecoder, FheDecrypter, FheEncoder, FheEncrypter, Serialize};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use tracing::{info, warn};

/// Insecure development parameters - DO NOT USE IN PRODUCTION
pub mod insecure_512 {
    pub const DEGREE: usize = 512;
    /// Prime just above 2^32 so any euint32 budget fits
    pub const PLAINTEXT_MODULUS: u64 = 4_294_967_311;
    pub const MODULI: &[u64] = &[0xffffee001, 0xffffc4001];
}

pub type SharedRng = Arc<Mutex<ChaCha20Rng>>;

struct KeyPair {
    secret: SecretKey,
    public: PublicKey,
}

/// A self-contained FHE SDK for local development and tests. It holds the
/// secret key itself and plays the part of the decryption oracle, so the
/// proofs it produces are only meaningful to a contract that trusts it.
pub struct LocalFheSdk {
    params: Arc<BfvParameters>,
    rng: SharedRng,
    keys: RwLock<Option<Arc<KeyPair>>>,
    ciphertexts: Mutex<HashMap<Handle, Ciphertext>>,
}

impl LocalFheSdk {
    pub fn new() -> Result<Self> {
        Self::with_rng(Arc::new(Mutex::new(ChaCha20Rng::from_os_rng())))
    }

    /// Deterministic keys and ciphertexts, for tests
    pub fn from_seed(seed: [u8; 32]) -> Result<Self> {
        Self::with_rng(Arc::new(Mutex::new(ChaCha20Rng::from_seed(seed))))
    }

    fn with_rng(rng: SharedRng) -> Result<Self> {
        let params = BfvParametersBuilder::new()
            .set_degree(insecure_512::DEGREE)
            .set_plaintext_modulus(insecure_512::PLAINTEXT_MODULUS)
            .set_moduli(insecure_512::MODULI)
            .build_arc()
            .map_err(|e| eyre!("Error building BFV parameters: {e}"))?;

        Ok(Self {
            params,
            rng,
            keys: RwLock::new(None),
            ciphertexts: Mutex::new(HashMap::new()),
        })
    }

    fn keys(&self) -> Result<Arc<KeyPair>> {
        self.keys
            .read()
            .map_err(|_| eyre!("Key store lock poisoned"))?
            .clone()
            .ok_or_else(|| eyre!("FHE SDK is not initialized"))
    }

    fn decrypt_handle(&self, keys: &KeyPair, handle: &Handle) -> Result<U256> {
        let ciphertexts = self
            .ciphertexts
            .lock()
            .map_err(|_| eyre!("Ciphertext store lock poisoned"))?;
        let ct = ciphertexts
            .get(handle)
            .ok_or_else(|| eyre!("Unknown handle {handle}"))?;
        let pt = keys
            .secret
            .try_decrypt(ct)
            .map_err(|e| eyre!("Error decrypting handle {handle}: {e}"))?;
        let decoded = Vec::<u64>::try_decode(&pt, Encoding::poly())
            .map_err(|e| eyre!("Plaintext decoding failed: {e}"))?;
        let value = decoded.first().copied().unwrap_or_default();
        Ok(U256::from(value))
    }
}

#[async_trait]
impl FheSdk for LocalFheSdk {
    async fn initialize(&self) -> Result<()> {
        if self.is_initialized() {
            warn!("LocalFheSdk already initialized");
            return Ok(());
        }

        let keys = {
            let mut rng = self.rng.lock().map_err(|_| eyre!("RNG lock poisoned"))?;
            let secret = SecretKey::random(&self.params, &mut *rng);
            let public = PublicKey::new(&secret, &mut *rng);
            KeyPair { secret, public }
        };

        *self
            .keys
            .write()
            .map_err(|_| eyre!("Key store lock poisoned"))? = Some(Arc::new(keys));
        info!(degree = insecure_512::DEGREE, "LocalFheSdk initialized");
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.keys.read().map(|k| k.is_some()).unwrap_or(false)
    }

    async fn encrypt(
        &self,
        contract_address: Address,
        user_address: Address,
        value: u64,
    ) -> Result<EncryptedInput> {
        let keys = self.keys()?;
        if value >= self.params.plaintext() {
            return Err(eyre!(
                "Value {value} does not fit the plaintext modulus {}",
                self.params.plaintext()
            ));
        }

        let values: &[u64] = &[value];
        let pt = Plaintext::try_encode(values, Encoding::poly(), &self.params)
            .map_err(|e| eyre!("Error encoding plaintext: {e}"))?;
        let ct = {
            let mut rng = self.rng.lock().map_err(|_| eyre!("RNG lock poisoned"))?;
            keys.public
                .try_encrypt(&pt, &mut *rng)
                .map_err(|e| eyre!("Error encrypting data: {e}"))?
        };

        let ct_bytes = ct.to_bytes();
        let mut preimage = ct_bytes.clone();
        preimage.extend_from_slice(contract_address.as_slice());
        preimage.extend_from_slice(user_address.as_slice());
        let handle = keccak256(preimage);

        self.ciphertexts
            .lock()
            .map_err(|_| eyre!("Ciphertext store lock poisoned"))?
            .insert(handle, ct);

        info!(%handle, %contract_address, %user_address, "Encrypted value");
        Ok(EncryptedInput {
            encrypted_data: handle,
            proof: Bytes::from(ct_bytes),
        })
    }

    async fn verify_decryption(
        &self,
        handles: &[Handle],
        contract_address: Address,
        submitter: &dyn DecryptionSubmitter,
    ) -> Result<VerifiedDecryption> {
        let keys = self.keys()?;

        let mut clear_values = HashMap::new();
        let mut ordered = Vec::with_capacity(handles.len());
        for handle in handles {
            let value = self.decrypt_handle(&keys, handle)?;
            clear_values.insert(*handle, value);
            ordered.push(value);
        }

        let encoded = encode_clear_values(&ordered);
        let proof = decryption_digest(handles, &encoded, contract_address);
        let receipt = submitter
            .submit(encoded, Bytes::copy_from_slice(proof.as_slice()))
            .await?;

        info!(tx = %receipt.tx_hash, handles = handles.len(), "Decryption verified");
        Ok(VerifiedDecryption {
            decryption_result: DecryptionResult { clear_values },
            receipt,
        })
    }
}
