// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::rpc::RpcEndpoint;
use alloy_primitives::Address;
use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "gigmarket.config.yaml";
pub const DEFAULT_PAGE_SIZE: usize = 6;
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;
pub const DEFAULT_SUCCESS_HIDE_MS: u64 = 2000;
pub const DEFAULT_ERROR_HIDE_MS: u64 = 3000;

/// How long the status banner stays up before hiding itself
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct StatusConfig {
    pub success_hide_ms: u64,
    pub error_hide_ms: u64,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            success_hide_ms: DEFAULT_SUCCESS_HIDE_MS,
            error_hide_ms: DEFAULT_ERROR_HIDE_MS,
        }
    }
}

impl StatusConfig {
    pub fn success_hide_after(&self) -> Duration {
        Duration::from_millis(self.success_hide_ms)
    }

    pub fn error_hide_after(&self) -> Duration {
        Duration::from_millis(self.error_hide_ms)
    }
}

/// The configuration used throughout the client
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct MarketConfig {
    /// JSON-RPC endpoint of the chain hosting the contract
    pub rpc_url: String,
    /// Address of the deployed gig market contract
    pub contract_address: Option<Address>,
    /// Hex private key for the local wallet. Without it the client is read-only.
    pub private_key: Option<String>,
    /// Gigs per page
    pub page_size: usize,
    /// Entries kept in the activity history
    pub history_capacity: usize,
    pub status: StatusConfig,
    /// The file this configuration was read from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            contract_address: None,
            private_key: None,
            page_size: DEFAULT_PAGE_SIZE,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            status: StatusConfig::default(),
            config_file: None,
        }
    }
}

impl MarketConfig {
    pub fn validate(&self) -> Result<()> {
        RpcEndpoint::from_url(&self.rpc_url)
            .with_context(|| format!("Invalid rpc_url '{}'", self.rpc_url))?;
        if self.contract_address.is_none() {
            bail!("contract_address must be configured");
        }
        if self.page_size == 0 {
            bail!("page_size must be greater than zero");
        }
        if self.history_capacity == 0 {
            bail!("history_capacity must be greater than zero");
        }
        Ok(())
    }

    pub fn rpc(&self) -> Result<RpcEndpoint> {
        RpcEndpoint::from_url(&self.rpc_url)
    }

    pub fn contract_address(&self) -> Result<Address> {
        self.contract_address
            .ok_or_else(|| anyhow!("contract_address must be configured"))
    }

    pub fn private_key(&self) -> Option<&str> {
        self.private_key.as_deref()
    }
}

pub struct OsDirs;
impl OsDirs {
    pub fn config_dir() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .ok_or_else(|| anyhow!("This OS does not provide a config dir. See https://docs.rs/dirs for more information."))?
            .join("gigmarket"))
    }
}
