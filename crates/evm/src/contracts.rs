// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::models::BusinessData;
use crate::pending::{PendingTx, TxReceipt};
use alloy::{
    network::{Ethereum, EthereumWallet, ReceiptResponse},
    primitives::{Address, Bytes, FixedBytes, U256},
    providers::fillers::{
        BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller,
        WalletFiller,
    },
    providers::{Identity, Provider, ProviderBuilder, RootProvider},
    signers::local::PrivateKeySigner,
    sol,
};
use async_trait::async_trait;
use eyre::{eyre, Result};
use once_cell::sync::Lazy;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::Mutex;

static NONCE_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

sol! {
    #[derive(Debug)]
    #[sol(rpc)]
    contract ConfidentialGigMarket {
        function getAllBusinessIds() external view returns (string[] memory ids);
        function getBusinessData(string calldata businessId) external view returns (
            string memory name,
            string memory description,
            uint256 publicValue1,
            uint256 publicValue2,
            address creator,
            uint256 timestamp,
            bool isVerified,
            uint32 decryptedValue
        );
        function getEncryptedValue(string calldata businessId) external view returns (bytes32 handle);
        function createBusinessData(
            string calldata businessId,
            string calldata name,
            bytes32 encryptedValue,
            bytes calldata inputProof,
            uint256 publicValue1,
            uint256 publicValue2,
            string calldata description
        ) external;
        function verifyDecryption(
            string calldata businessId,
            bytes memory abiEncodedClearValue,
            bytes memory decryptionProof
        ) external;
        function isAvailable() public pure returns (bool available);
    }
}

/// Read-only operations on the gig market contract
#[async_trait]
pub trait GigMarketRead {
    /// Every business id stored on the contract, in insertion order
    async fn get_all_business_ids(&self) -> Result<Vec<String>>;

    /// The stored record for a business id
    async fn get_business_data(&self, business_id: &str) -> Result<BusinessData>;

    /// The opaque handle of the encrypted budget for a business id
    async fn get_encrypted_value(&self, business_id: &str) -> Result<FixedBytes<32>>;

    /// Liveness probe exposed by the contract
    async fn is_available(&self) -> Result<bool>;

    fn address(&self) -> Address;
}

/// Write operations on the gig market contract. Each call returns once the
/// transaction has been accepted by the node; await the [`PendingTx`] for
/// its receipt.
#[async_trait]
pub trait GigMarketWrite {
    #[allow(clippy::too_many_arguments)]
    async fn create_business_data(
        &self,
        business_id: &str,
        name: &str,
        encrypted_value: FixedBytes<32>,
        input_proof: Bytes,
        public_value1: U256,
        public_value2: U256,
        description: &str,
    ) -> Result<PendingTx>;

    async fn verify_decryption(
        &self,
        business_id: &str,
        abi_encoded_clear_values: Bytes,
        decryption_proof: Bytes,
    ) -> Result<PendingTx>;
}

/// Generic type to represent different provider types
pub trait ProviderType: Send + Sync + 'static {
    type Provider: Provider + Send + Sync + 'static;
}

/// Marker type for read-only provider
#[derive(Clone, Debug)]
pub struct ReadOnly;
impl ProviderType for ReadOnly {
    type Provider = GigMarketReadOnlyProvider;
}

/// Marker type for read-write provider
#[derive(Clone, Debug)]
pub struct ReadWrite;
impl ProviderType for ReadWrite {
    type Provider = GigMarketWriteProvider;
}

/// Type alias for read-only provider
pub type GigMarketReadOnlyProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider,
>;

/// Type alias for read-write provider
pub type GigMarketWriteProvider = FillProvider<
    JoinFill<
        JoinFill<
            JoinFill<
                Identity,
                JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
            >,
            WalletFiller<EthereumWallet>,
        >,
        NonceFiller,
    >,
    RootProvider<Ethereum>,
    Ethereum,
>;

/// Gig market contract bound to a provider
#[derive(Clone, Debug)]
pub struct GigMarketContract<T: ProviderType> {
    pub provider: Arc<T::Provider>,
    pub contract_address: Address,
    _marker: PhantomData<T>,
}

impl<T: ProviderType> GigMarketContract<T> {
    pub fn get_provider(&self) -> Arc<T::Provider> {
        self.provider.clone()
    }
}

pub type GigMarketReadContract = GigMarketContract<ReadOnly>;
pub type GigMarketWriteContract = GigMarketContract<ReadWrite>;

pub struct GigMarketContractFactory;

impl GigMarketContractFactory {
    /// Create a write-capable contract
    pub async fn create_write(
        rpc_url: &str,
        contract_address: &str,
        signer: PrivateKeySigner,
    ) -> Result<GigMarketWriteContract> {
        let contract_address = contract_address.parse()?;
        let wallet = EthereumWallet::from(signer);
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .with_cached_nonce_management()
            .connect(rpc_url)
            .await?;

        Ok(GigMarketContract::<ReadWrite> {
            provider: Arc::new(provider),
            contract_address,
            _marker: PhantomData,
        })
    }

    /// Create a read-only contract
    pub async fn create_read(rpc_url: &str, contract_address: &str) -> Result<GigMarketReadContract> {
        let contract_address = contract_address.parse()?;
        let provider = ProviderBuilder::new().connect(rpc_url).await?;

        Ok(GigMarketContract::<ReadOnly> {
            provider: Arc::new(provider),
            contract_address,
            _marker: PhantomData,
        })
    }
}

// Reads work regardless of provider type
#[async_trait]
impl<T: ProviderType> GigMarketRead for GigMarketContract<T> {
    async fn get_all_business_ids(&self) -> Result<Vec<String>> {
        let contract = ConfidentialGigMarket::new(self.contract_address, &self.provider);
        let ids = contract.getAllBusinessIds().call().await?;
        Ok(ids)
    }

    async fn get_business_data(&self, business_id: &str) -> Result<BusinessData> {
        let contract = ConfidentialGigMarket::new(self.contract_address, &self.provider);
        let data = contract
            .getBusinessData(business_id.to_string())
            .call()
            .await?;

        Ok(BusinessData {
            name: data.name,
            description: data.description,
            public_value1: u64_saturating(data.publicValue1),
            public_value2: u64_saturating(data.publicValue2),
            creator: data.creator,
            timestamp: u64_try_from(data.timestamp)?,
            is_verified: data.isVerified,
            decrypted_value: u64::from(data.decryptedValue),
            // The deployed contract does not store these
            category: None,
            status: None,
        })
    }

    async fn get_encrypted_value(&self, business_id: &str) -> Result<FixedBytes<32>> {
        let contract = ConfidentialGigMarket::new(self.contract_address, &self.provider);
        let handle = contract
            .getEncryptedValue(business_id.to_string())
            .call()
            .await?;
        Ok(handle)
    }

    async fn is_available(&self) -> Result<bool> {
        let contract = ConfidentialGigMarket::new(self.contract_address, &self.provider);
        let available = contract.isAvailable().call().await?;
        Ok(available)
    }

    fn address(&self) -> Address {
        self.contract_address
    }
}

#[async_trait]
impl GigMarketWrite for GigMarketContract<ReadWrite> {
    async fn create_business_data(
        &self,
        business_id: &str,
        name: &str,
        encrypted_value: FixedBytes<32>,
        input_proof: Bytes,
        public_value1: U256,
        public_value2: U256,
        description: &str,
    ) -> Result<PendingTx> {
        let _guard = NONCE_LOCK.lock().await;
        let contract = ConfidentialGigMarket::new(self.contract_address, &self.provider);
        let pending = contract
            .createBusinessData(
                business_id.to_string(),
                name.to_string(),
                encrypted_value,
                input_proof,
                public_value1,
                public_value2,
                description.to_string(),
            )
            .send()
            .await?;

        let tx_hash = *pending.tx_hash();
        Ok(PendingTx::new(tx_hash, async move {
            let receipt = pending.get_receipt().await?;
            into_confirmed(TxReceipt {
                tx_hash: receipt.transaction_hash,
                block_number: receipt.block_number,
                success: receipt.status(),
            })
        }))
    }

    async fn verify_decryption(
        &self,
        business_id: &str,
        abi_encoded_clear_values: Bytes,
        decryption_proof: Bytes,
    ) -> Result<PendingTx> {
        let _guard = NONCE_LOCK.lock().await;
        let contract = ConfidentialGigMarket::new(self.contract_address, &self.provider);
        let pending = contract
            .verifyDecryption(
                business_id.to_string(),
                abi_encoded_clear_values,
                decryption_proof,
            )
            .send()
            .await?;

        let tx_hash = *pending.tx_hash();
        Ok(PendingTx::new(tx_hash, async move {
            let receipt = pending.get_receipt().await?;
            into_confirmed(TxReceipt {
                tx_hash: receipt.transaction_hash,
                block_number: receipt.block_number,
                success: receipt.status(),
            })
        }))
    }
}

fn into_confirmed(receipt: TxReceipt) -> Result<TxReceipt> {
    if !receipt.success {
        return Err(eyre!("Transaction {} reverted", receipt.tx_hash));
    }
    Ok(receipt)
}

fn u64_try_from(input: U256) -> Result<u64> {
    u64::try_from(input).map_err(|_| eyre!("larger than 64-bit"))
}

fn u64_saturating(input: U256) -> u64 {
    u64::try_from(input).unwrap_or(u64::MAX)
}
