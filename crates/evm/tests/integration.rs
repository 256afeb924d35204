// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::{Address, Bytes, FixedBytes, U256};
use eyre::Result;
use gig_evm::{
    GigMarketGateway, GigMarketRead, GigMarketWrite, LocalWallet, RpcGateway, WalletSession,
};
use std::time::Duration;
use tokio::time::timeout;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::{fmt, EnvFilter};

// Nothing listens here
const DEAD_RPC: &str = "http://127.0.0.1:1";
const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
// First default anvil account
const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

pub fn add_tracing() -> DefaultGuard {
    tracing::subscriber::set_default(
        fmt()
            .with_env_filter(EnvFilter::new("info"))
            .with_test_writer()
            .finish(),
    )
}

#[tokio::test]
async fn test_rpc_gateway_hands_out_contract_handles() -> Result<()> {
    let _guard = add_tracing();
    let wallet = LocalWallet::from_private_key(KEY)?;
    assert!(wallet.status().is_connected());
    let gateway = RpcGateway::new(DEAD_RPC, CONTRACT, Some(wallet.signer()));

    let reader = gateway.reader().await?;
    let again = gateway.reader().await?;
    let expected: Address = CONTRACT.parse()?;
    assert_eq!(reader.address(), expected);
    assert_eq!(again.address(), expected);

    // reads surface transport errors instead of hanging
    let res = timeout(Duration::from_secs(10), reader.is_available()).await?;
    assert!(res.is_err());

    let writer = gateway.writer().await?;
    for _ in 0..2 {
        // a failed send must release the nonce lock
        let res = timeout(
            Duration::from_secs(10),
            writer.create_business_data(
                "gig-1",
                "Logo design",
                FixedBytes::ZERO,
                Bytes::new(),
                U256::from(500u64),
                U256::ZERO,
                "Need a logo",
            ),
        )
        .await?;
        assert!(res.is_err());
    }
    Ok(())
}

#[tokio::test]
async fn test_invalid_contract_address_is_rejected() {
    let gateway = RpcGateway::read_only(DEAD_RPC, "not-an-address");
    assert!(gateway.reader().await.is_err());
}
