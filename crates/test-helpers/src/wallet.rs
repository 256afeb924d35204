// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::Address;
use gig_evm::{WalletSession, WalletStatus};
use std::sync::{Arc, Mutex, PoisonError};

/// A wallet whose connection the test drives
#[derive(Clone)]
pub struct TestWallet {
    status: Arc<Mutex<WalletStatus>>,
}

impl TestWallet {
    pub fn connected(address: Address) -> Self {
        Self {
            status: Arc::new(Mutex::new(WalletStatus::Connected(address))),
        }
    }

    pub fn disconnected() -> Self {
        Self {
            status: Arc::new(Mutex::new(WalletStatus::Disconnected)),
        }
    }

    pub fn connect(&self, address: Address) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) =
            WalletStatus::Connected(address);
    }

    pub fn disconnect(&self) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = WalletStatus::Disconnected;
    }
}

impl WalletSession for TestWallet {
    fn status(&self) -> WalletStatus {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
