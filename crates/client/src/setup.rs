// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::controller::{ControllerSettings, GigMarketController};
use eyre::{eyre, Result};
use gig_config::MarketConfig;
use gig_evm::{LocalWallet, RpcGateway, WalletSession};
use gig_fhe::LocalFheSdk;
use std::sync::Arc;
use tracing::info;

/// Controller wired to a JSON-RPC node, the local FHE SDK and the configured key
pub type RpcMarketController = GigMarketController<RpcGateway, LocalFheSdk, Option<LocalWallet>>;

pub fn controller_from_config(config: &MarketConfig) -> Result<RpcMarketController> {
    let rpc = config.rpc().map_err(|e| eyre!("{e:#}"))?;
    let rpc_url = rpc.as_http_url().map_err(|e| eyre!("{e:#}"))?;
    let contract_address = config.contract_address().map_err(|e| eyre!("{e:#}"))?;
    let wallet = config
        .private_key()
        .map(LocalWallet::from_private_key)
        .transpose()?;

    let gateway = RpcGateway::new(
        &rpc_url,
        &contract_address.to_string(),
        wallet.as_ref().map(LocalWallet::signer),
    );
    info!(
        rpc = %rpc_url,
        contract = %contract_address,
        account = ?wallet.status().address(),
        "Gig market controller configured"
    );

    Ok(GigMarketController::new(
        Arc::new(gateway),
        Arc::new(LocalFheSdk::new()?),
        Arc::new(wallet),
        ControllerSettings::from(config),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ViewPhase;
    use alloy::primitives::Address;

    fn config(private_key: Option<&str>) -> MarketConfig {
        MarketConfig {
            rpc_url: "ws://localhost:8545".to_string(),
            contract_address: Some(Address::repeat_byte(0x11)),
            private_key: private_key.map(str::to_string),
            ..MarketConfig::default()
        }
    }

    #[test]
    fn test_configured_key_connects_wallet() -> Result<()> {
        let controller = controller_from_config(&config(Some(
            "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        )))?;
        assert_eq!(controller.phase(), ViewPhase::InitializingFhe);
        Ok(())
    }

    #[test]
    fn test_without_key_session_is_read_only() -> Result<()> {
        let controller = controller_from_config(&config(None))?;
        assert_eq!(controller.phase(), ViewPhase::Disconnected);

        let err = controller_from_config(&MarketConfig::default()).err();
        assert!(err.is_some());
        Ok(())
    }
}
