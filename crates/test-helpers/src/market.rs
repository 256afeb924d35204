// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::{Address, Bytes, FixedBytes, TxHash, U256};
use async_trait::async_trait;
use eyre::{eyre, Result};
use gig_evm::{
    BusinessData, GigMarketGateway, GigMarketRead, GigMarketWrite, PendingTx, TxReceipt,
};
use gig_fhe::abi::decode_clear_values;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::info;

/// A transaction the fake has accepted
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SentTx {
    Create {
        business_id: String,
        name: String,
        description: String,
        encrypted_value: FixedBytes<32>,
        public_value1: U256,
    },
    VerifyDecryption {
        business_id: String,
        clear_values: Vec<U256>,
    },
}

#[derive(Default)]
struct Market {
    ids: Vec<String>,
    records: HashMap<String, BusinessData>,
    handles: HashMap<String, FixedBytes<32>>,
    failing_records: HashSet<String>,
    list_error: Option<String>,
    list_delay: Option<Duration>,
    write_error: Option<String>,
    verify_error: Option<String>,
    verify_race: Option<u64>,
    signer_error: Option<String>,
    availability: Option<std::result::Result<bool, String>>,
    confirm_delay: Option<Duration>,
    sent: Vec<SentTx>,
    now: u64,
}

/// An in-memory gig market contract. It is its own gateway, reader and
/// writer; clones share the same state.
#[derive(Clone)]
pub struct FakeGigMarket {
    address: Address,
    sender: Address,
    market: Arc<Mutex<Market>>,
}

impl Default for FakeGigMarket {
    fn default() -> Self {
        Self::new(Address::repeat_byte(0xc0), Address::repeat_byte(0xa1))
    }
}

impl FakeGigMarket {
    /// `sender` is recorded as the creator of gigs posted through the fake
    pub fn new(address: Address, sender: Address) -> Self {
        Self {
            address,
            sender,
            market: Arc::new(Mutex::new(Market {
                now: 1_700_000_000,
                ..Market::default()
            })),
        }
    }

    fn market(&self) -> MutexGuard<'_, Market> {
        self.market.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn seed(&self, id: &str, data: BusinessData) -> &Self {
        let mut market = self.market();
        if !market.records.contains_key(id) {
            market.ids.push(id.to_string());
        }
        market.records.insert(id.to_string(), data);
        self
    }

    /// Seed an unverified gig whose budget sits behind `handle`
    pub fn seed_encrypted(&self, id: &str, data: BusinessData, handle: FixedBytes<32>) -> &Self {
        self.seed(id, data);
        self.market().handles.insert(id.to_string(), handle);
        self
    }

    pub fn record(&self, id: &str) -> Option<BusinessData> {
        self.market().records.get(id).cloned()
    }

    pub fn ids(&self) -> Vec<String> {
        self.market().ids.clone()
    }

    pub fn sent(&self) -> Vec<SentTx> {
        self.market().sent.clone()
    }

    pub fn sent_count(&self) -> usize {
        self.market().sent.len()
    }

    pub fn fail_record(&self, id: &str) -> &Self {
        self.market().failing_records.insert(id.to_string());
        self
    }

    pub fn fail_listing(&self, message: &str) -> &Self {
        self.market().list_error = Some(message.to_string());
        self
    }

    /// Delay `getAllBusinessIds` by `delay` of tokio time
    pub fn delay_listing(&self, delay: Duration) -> &Self {
        self.market().list_delay = Some(delay);
        self
    }

    /// Every write is refused by the node with `message`
    pub fn fail_writes(&self, message: &str) -> &Self {
        self.market().write_error = Some(message.to_string());
        self
    }

    /// `verifyDecryption` reverts with `message`
    pub fn fail_verification(&self, message: &str) -> &Self {
        self.market().verify_error = Some(message.to_string());
        self
    }

    /// Another client verifies the record with `value` just before our
    /// verification lands, so ours reverts with "Data already verified"
    pub fn race_verification(&self, value: u64) -> &Self {
        self.market().verify_race = Some(value);
        self
    }

    /// No signer handle can be obtained
    pub fn fail_signer(&self, message: &str) -> &Self {
        self.market().signer_error = Some(message.to_string());
        self
    }

    pub fn set_available(&self, available: bool) -> &Self {
        self.market().availability = Some(Ok(available));
        self
    }

    pub fn fail_availability(&self, message: &str) -> &Self {
        self.market().availability = Some(Err(message.to_string()));
        self
    }

    /// Delay confirmations by `delay` of tokio time. Records only change
    /// once a transaction is confirmed.
    pub fn delay_confirmations(&self, delay: Duration) -> &Self {
        self.market().confirm_delay = Some(delay);
        self
    }

    /// Mark a record verified as if another client had decrypted it
    pub fn verify_externally(&self, id: &str, value: u64) {
        if let Some(record) = self.market().records.get_mut(id) {
            record.is_verified = true;
            record.decrypted_value = value;
        }
    }

    /// Queue `sent` and apply `mine` to the market when it is confirmed
    fn pending<M>(&self, sent: SentTx, mine: M) -> PendingTx
    where
        M: FnOnce(&mut Market) + Send + 'static,
    {
        let (delay, receipt) = {
            let mut market = self.market();
            market.sent.push(sent);
            let nonce = market.sent.len() as u64;
            let receipt = TxReceipt {
                tx_hash: TxHash::from(U256::from(nonce).to_be_bytes::<32>()),
                block_number: Some(nonce),
                success: true,
            };
            (market.confirm_delay, receipt)
        };
        let market = self.market.clone();
        PendingTx::new(receipt.tx_hash, async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            {
                let mut market = market.lock().unwrap_or_else(PoisonError::into_inner);
                mine(&mut *market);
            }
            Ok(receipt)
        })
    }
}

#[async_trait]
impl GigMarketRead for FakeGigMarket {
    async fn get_all_business_ids(&self) -> Result<Vec<String>> {
        let delay = self.market().list_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let market = self.market();
        if let Some(message) = &market.list_error {
            return Err(eyre!("{message}"));
        }
        Ok(market.ids.clone())
    }

    async fn get_business_data(&self, business_id: &str) -> Result<BusinessData> {
        let market = self.market();
        if market.failing_records.contains(business_id) {
            return Err(eyre!("Failed to read {business_id}"));
        }
        market
            .records
            .get(business_id)
            .cloned()
            .ok_or_else(|| eyre!("execution reverted: Business data not found"))
    }

    async fn get_encrypted_value(&self, business_id: &str) -> Result<FixedBytes<32>> {
        self.market()
            .handles
            .get(business_id)
            .copied()
            .ok_or_else(|| eyre!("execution reverted: Business data not found"))
    }

    async fn is_available(&self) -> Result<bool> {
        match self.market().availability.clone() {
            Some(Ok(available)) => Ok(available),
            Some(Err(message)) => Err(eyre!("{message}")),
            None => Ok(true),
        }
    }

    fn address(&self) -> Address {
        self.address
    }
}

#[async_trait]
impl GigMarketWrite for FakeGigMarket {
    async fn create_business_data(
        &self,
        business_id: &str,
        name: &str,
        encrypted_value: FixedBytes<32>,
        _input_proof: Bytes,
        public_value1: U256,
        public_value2: U256,
        description: &str,
    ) -> Result<PendingTx> {
        {
            let market = self.market();
            if let Some(message) = &market.write_error {
                return Err(eyre!("{message}"));
            }
            if market.records.contains_key(business_id) {
                return Err(eyre!("execution reverted: Business data already exists"));
            }
        }
        info!(gig = business_id, "FakeGigMarket: create sent");

        let id = business_id.to_string();
        let mut data = BusinessData {
            name: name.to_string(),
            description: description.to_string(),
            public_value1: public_value1.saturating_to(),
            public_value2: public_value2.saturating_to(),
            creator: self.sender,
            ..BusinessData::default()
        };
        let sent = SentTx::Create {
            business_id: id.clone(),
            name: data.name.clone(),
            description: data.description.clone(),
            encrypted_value,
            public_value1,
        };
        Ok(self.pending(sent, move |market| {
            market.now += 60;
            data.timestamp = market.now;
            market.ids.push(id.clone());
            market.records.insert(id.clone(), data);
            market.handles.insert(id, encrypted_value);
        }))
    }

    async fn verify_decryption(
        &self,
        business_id: &str,
        abi_encoded_clear_values: Bytes,
        _decryption_proof: Bytes,
    ) -> Result<PendingTx> {
        let clear_values = decode_clear_values(&abi_encoded_clear_values)?;
        {
            let mut market = self.market();
            if let Some(message) = market.write_error.clone().or(market.verify_error.clone()) {
                return Err(eyre!("{message}"));
            }
            let race = market.verify_race.take();
            let record = market
                .records
                .get_mut(business_id)
                .ok_or_else(|| eyre!("execution reverted: Business data not found"))?;
            if let Some(value) = race {
                record.is_verified = true;
                record.decrypted_value = value;
            }
            if record.is_verified {
                return Err(eyre!("execution reverted: Data already verified"));
            }
        }

        let id = business_id.to_string();
        let value: u64 = clear_values
            .first()
            .map(|v| v.saturating_to())
            .unwrap_or_default();
        let sent = SentTx::VerifyDecryption {
            business_id: id.clone(),
            clear_values,
        };
        Ok(self.pending(sent, move |market| {
            if let Some(record) = market.records.get_mut(&id) {
                record.is_verified = true;
                record.decrypted_value = value;
            }
        }))
    }
}

#[async_trait]
impl GigMarketGateway for FakeGigMarket {
    type Reader = FakeGigMarket;
    type Writer = FakeGigMarket;

    async fn reader(&self) -> Result<Self::Reader> {
        Ok(self.clone())
    }

    async fn writer(&self) -> Result<Self::Writer> {
        if let Some(message) = &self.market().signer_error {
            return Err(eyre!("Failed to get contract with signer: {message}"));
        }
        Ok(self.clone())
    }
}
