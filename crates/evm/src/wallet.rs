// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::{primitives::Address, signers::local::PrivateKeySigner};
use eyre::{Context, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalletStatus {
    Disconnected,
    Connected(Address),
}

impl WalletStatus {
    pub fn address(&self) -> Option<Address> {
        match self {
            WalletStatus::Connected(address) => Some(*address),
            WalletStatus::Disconnected => None,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, WalletStatus::Connected(_))
    }
}

/// Source of the active account. Implementors manage their own interior
/// mutability when the connection can change.
pub trait WalletSession: Send + Sync + 'static {
    fn status(&self) -> WalletStatus;
}

/// A wallet backed by a local private key. Always connected.
#[derive(Clone)]
pub struct LocalWallet {
    signer: PrivateKeySigner,
}

impl LocalWallet {
    pub fn new(signer: PrivateKeySigner) -> Self {
        Self { signer }
    }

    pub fn from_private_key(private_key: &str) -> Result<Self> {
        let signer: PrivateKeySigner = private_key
            .trim_start_matches("0x")
            .parse()
            .context("Invalid private key")?;
        Ok(Self::new(signer))
    }

    pub fn signer(&self) -> PrivateKeySigner {
        self.signer.clone()
    }
}

impl WalletSession for LocalWallet {
    fn status(&self) -> WalletStatus {
        WalletStatus::Connected(self.signer.address())
    }
}

/// A configured key, or none for a read-only session
impl WalletSession for Option<LocalWallet> {
    fn status(&self) -> WalletStatus {
        self.as_ref()
            .map(|wallet| wallet.status())
            .unwrap_or(WalletStatus::Disconnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // First default anvil account
    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_local_wallet_is_connected() -> Result<()> {
        let wallet = LocalWallet::from_private_key(KEY)?;
        let expected: Address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse()?;
        assert_eq!(wallet.status(), WalletStatus::Connected(expected));
        assert_eq!(wallet.status().address(), Some(expected));
        Ok(())
    }

    #[test]
    fn test_bad_key_is_rejected() {
        assert!(LocalWallet::from_private_key("not-a-key").is_err());
        assert!(!WalletStatus::Disconnected.is_connected());
        assert_eq!(None::<LocalWallet>.status(), WalletStatus::Disconnected);
    }
}
