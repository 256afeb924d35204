// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::TxHash;
use eyre::Result;
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;

/// The parts of a mined receipt the client cares about
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub success: bool,
}

/// A submitted transaction whose confirmation has not been awaited yet.
pub struct PendingTx {
    tx_hash: TxHash,
    confirmation: BoxFuture<'static, Result<TxReceipt>>,
}

impl PendingTx {
    pub fn new<F>(tx_hash: TxHash, confirmation: F) -> Self
    where
        F: Future<Output = Result<TxReceipt>> + Send + 'static,
    {
        Self {
            tx_hash,
            confirmation: Box::pin(confirmation),
        }
    }

    /// A transaction that is already mined
    pub fn mined(receipt: TxReceipt) -> Self {
        let tx_hash = receipt.tx_hash;
        Self::new(tx_hash, async move { Ok(receipt) })
    }

    pub fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    /// Wait for the transaction to be included
    pub async fn confirm(self) -> Result<TxReceipt> {
        self.confirmation.await
    }
}

impl fmt::Debug for PendingTx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingTx")
            .field("tx_hash", &self.tx_hash)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mined_confirms_immediately() -> Result<()> {
        let receipt = TxReceipt {
            tx_hash: TxHash::from([9u8; 32]),
            block_number: Some(1),
            success: true,
        };
        let pending = PendingTx::mined(receipt.clone());
        assert_eq!(pending.tx_hash(), receipt.tx_hash);
        assert_eq!(pending.confirm().await?, receipt);
        Ok(())
    }

    #[tokio::test]
    async fn test_confirmation_error_is_surfaced() {
        let pending = PendingTx::new(TxHash::ZERO, async { Err(eyre::eyre!("dropped")) });
        assert_eq!(pending.confirm().await.unwrap_err().to_string(), "dropped");
    }
}
