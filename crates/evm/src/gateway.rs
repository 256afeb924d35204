// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::contracts::{
    GigMarketContractFactory, GigMarketRead, GigMarketReadContract, GigMarketWrite,
    GigMarketWriteContract,
};
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use eyre::{eyre, Result};
use tokio::sync::OnceCell;
use tracing::info;

/// Hands out read-only and signer-bound handles on the gig market contract.
#[async_trait]
pub trait GigMarketGateway: Send + Sync + 'static {
    type Reader: GigMarketRead + Send + Sync + 'static;
    type Writer: GigMarketWrite + Send + Sync + 'static;

    async fn reader(&self) -> Result<Self::Reader>;

    async fn writer(&self) -> Result<Self::Writer>;
}

/// Gateway talking JSON-RPC to a deployed contract. Handles are connected
/// lazily and reused.
pub struct RpcGateway {
    rpc_url: String,
    contract_address: String,
    signer: Option<PrivateKeySigner>,
    reader: OnceCell<GigMarketReadContract>,
    writer: OnceCell<GigMarketWriteContract>,
}

impl RpcGateway {
    pub fn new(rpc_url: &str, contract_address: &str, signer: Option<PrivateKeySigner>) -> Self {
        Self {
            rpc_url: rpc_url.to_string(),
            contract_address: contract_address.to_string(),
            signer,
            reader: OnceCell::new(),
            writer: OnceCell::new(),
        }
    }

    pub fn read_only(rpc_url: &str, contract_address: &str) -> Self {
        Self::new(rpc_url, contract_address, None)
    }
}

#[async_trait]
impl GigMarketGateway for RpcGateway {
    type Reader = GigMarketReadContract;
    type Writer = GigMarketWriteContract;

    async fn reader(&self) -> Result<Self::Reader> {
        let contract = self
            .reader
            .get_or_try_init(|| async {
                info!(rpc = %self.rpc_url, contract = %self.contract_address, "Connecting read-only contract");
                GigMarketContractFactory::create_read(&self.rpc_url, &self.contract_address).await
            })
            .await?;
        Ok(contract.clone())
    }

    async fn writer(&self) -> Result<Self::Writer> {
        let Some(signer) = self.signer.clone() else {
            return Err(eyre!("Failed to get contract with signer: no signer configured"));
        };
        let contract = self
            .writer
            .get_or_try_init(|| async {
                info!(rpc = %self.rpc_url, contract = %self.contract_address, signer = %signer.address(), "Connecting contract with signer");
                GigMarketContractFactory::create_write(
                    &self.rpc_url,
                    &self.contract_address,
                    signer,
                )
                .await
            })
            .await?;
        Ok(contract.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_writer_requires_signer() {
        let gateway = RpcGateway::read_only(
            "http://localhost:8545",
            "0x5FbDB2315678afecb367f032d93F642f64180aa3",
        );
        let err = gateway.writer().await.unwrap_err();
        assert!(err.to_string().contains("no signer configured"));
    }
}
