// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::draft::{DraftField, NewGigDraft, ValidDraft};
use crate::error::{GigError, Result};
use crate::events::MarketEvent;
use crate::history::{ActivityHistory, RECENT_ACTIVITY_LEN};
use crate::models::{
    ActivityHistoryEntry, Category, CategoryFilter, GigRecord, GigStatus, HistoryAction,
};
use crate::status::{StatusController, TransactionStatus};
use crate::view::{clamp_page, total_pages, view_page, Page};
use alloy::primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use eyre::eyre;
use gig_config::{MarketConfig, StatusConfig, DEFAULT_HISTORY_CAPACITY, DEFAULT_PAGE_SIZE};
use gig_evm::{GigMarketGateway, GigMarketRead, GigMarketWrite, TxReceipt, WalletSession};
use gig_fhe::{DecryptionSubmitter, FheSdk};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{error, info, warn};

const EVENT_CAPACITY: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControllerSettings {
    pub page_size: usize,
    pub history_capacity: usize,
    pub status: StatusConfig,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            status: StatusConfig::default(),
        }
    }
}

impl From<&MarketConfig> for ControllerSettings {
    fn from(config: &MarketConfig) -> Self {
        Self {
            page_size: config.page_size,
            history_capacity: config.history_capacity,
            status: config.status,
        }
    }
}

/// What the view should show as a whole
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ViewPhase {
    Disconnected,
    InitializingFhe,
    Loading,
    Ready,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MarketStats {
    pub total: usize,
    pub verified: usize,
    pub active_categories: usize,
}

impl MarketStats {
    pub fn from_gigs(gigs: &[GigRecord]) -> Self {
        let categories: HashSet<Category> = gigs.iter().filter_map(|g| g.category).collect();
        Self {
            total: gigs.len(),
            verified: gigs.iter().filter(|g| g.is_verified).count(),
            active_categories: categories.len(),
        }
    }
}

#[derive(Default)]
struct BusyFlags {
    refreshing: AtomicBool,
    creating: AtomicBool,
    decrypting: AtomicBool,
    fhe_initializing: AtomicBool,
}

/// Holds a busy flag for as long as it lives
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool, operation: &'static str) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| GigError::Busy(operation))?;
        Ok(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Category and status picked for gigs posted in this session. The deployed
/// contract does not store them.
#[derive(Clone, Copy, Debug)]
struct Labels {
    category: Category,
    status: GigStatus,
}

#[derive(Default)]
struct ViewState {
    gigs: Vec<GigRecord>,
    contract_address: Option<Address>,
    search: String,
    category: CategoryFilter,
    page: usize,
    selected: Option<String>,
    create_form_open: bool,
    draft: NewGigDraft,
    session_labels: HashMap<String, Labels>,
}

impl ViewState {
    fn total_pages(&self, page_size: usize) -> usize {
        let filtered = crate::view::filter_gigs(&self.gigs, &self.search, self.category).len();
        total_pages(filtered, page_size)
    }
}

/// Sends `verifyDecryption` for one gig and waits for it to be mined
struct VerifyDecryptionSubmitter<'a, W> {
    writer: &'a W,
    business_id: &'a str,
}

#[async_trait]
impl<W: GigMarketWrite + Send + Sync> DecryptionSubmitter for VerifyDecryptionSubmitter<'_, W> {
    async fn submit(
        &self,
        abi_encoded_clear_values: Bytes,
        decryption_proof: Bytes,
    ) -> eyre::Result<TxReceipt> {
        let pending = self
            .writer
            .verify_decryption(self.business_id, abi_encoded_clear_values, decryption_proof)
            .await?;
        info!(tx = %pending.tx_hash(), gig = self.business_id, "Decryption verification sent");
        pending.confirm().await
    }
}

/// View-state controller of the gig market. All operations take `&self`;
/// share it behind an `Arc` between the UI and background tasks.
pub struct GigMarketController<G, F, W> {
    gateway: Arc<G>,
    fhe: Arc<F>,
    wallet: Arc<W>,
    settings: ControllerSettings,
    state: RwLock<ViewState>,
    history: RwLock<ActivityHistory>,
    status: StatusController,
    flags: BusyFlags,
    loaded: AtomicBool,
    last_gig_ms: AtomicU64,
    events: broadcast::Sender<MarketEvent>,
}

impl<G, F, W> GigMarketController<G, F, W>
where
    G: GigMarketGateway,
    F: FheSdk,
    W: WalletSession,
{
    pub fn new(gateway: Arc<G>, fhe: Arc<F>, wallet: Arc<W>, settings: ControllerSettings) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            gateway,
            fhe,
            wallet,
            status: StatusController::new(settings.status, events.clone()),
            history: RwLock::new(ActivityHistory::new(settings.history_capacity)),
            state: RwLock::new(ViewState {
                page: 1,
                ..ViewState::default()
            }),
            flags: BusyFlags::default(),
            loaded: AtomicBool::new(false),
            last_gig_ms: AtomicU64::new(0),
            settings,
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MarketEvent> {
        self.events.subscribe()
    }

    fn publish(&self, event: MarketEvent) {
        let _ = self.events.send(event);
    }

    ////////////////////////////////////////////////////////////////////////
    // Session
    ////////////////////////////////////////////////////////////////////////

    /// React to a wallet state change: initialize FHE once and load the
    /// gigs. The listing does not depend on FHE, so a failed initialization
    /// still loads; its error is returned afterwards. Does nothing while
    /// disconnected.
    pub async fn sync_session(&self) -> Result<()> {
        if !self.wallet.status().is_connected() {
            return Ok(());
        }
        let was_ready = self.fhe.is_initialized() && self.is_loaded();
        let initialized = self.initialize_fhe().await;

        if !self.is_loaded() {
            if let Err(e) = self.load_gigs().await {
                initialized?;
                return Err(e);
            }
        }
        initialized?;

        if !was_ready {
            if let Some(contract_address) = self.contract_address().await {
                self.publish(MarketEvent::SessionReady { contract_address });
            }
        }
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    /// Initialize the FHE SDK unless it is already initialized or another
    /// initialization is running. A failure leaves it retryable.
    pub async fn initialize_fhe(&self) -> Result<()> {
        if self.fhe.is_initialized() {
            return Ok(());
        }
        let _guard = BusyGuard::acquire(&self.flags.fhe_initializing, "FHE initialization")?;
        if self.fhe.is_initialized() {
            return Ok(());
        }

        if let Err(e) = self.fhe.initialize().await {
            error!("FHE initialization failed: {e:?}");
            self.status.fail("FHE initialization failed");
            return Err(GigError::FheInitialization(e.to_string()));
        }
        info!("FHE initialized");
        Ok(())
    }

    pub fn phase(&self) -> ViewPhase {
        if !self.wallet.status().is_connected() {
            return ViewPhase::Disconnected;
        }
        if self.flags.fhe_initializing.load(Ordering::Acquire) || !self.fhe.is_initialized() {
            return ViewPhase::InitializingFhe;
        }
        if self.is_loaded() {
            ViewPhase::Ready
        } else {
            ViewPhase::Loading
        }
    }

    ////////////////////////////////////////////////////////////////////////
    // Loading
    ////////////////////////////////////////////////////////////////////////

    /// Fetch every gig from the contract. Rejected while a refresh is
    /// already running.
    pub async fn load_gigs(&self) -> Result<usize> {
        let _guard = BusyGuard::acquire(&self.flags.refreshing, "Refresh")?;
        self.reload().await
    }

    pub async fn refresh(&self) -> Result<usize> {
        self.load_gigs().await
    }

    /// Reload after a confirmed transaction. Skipped when a refresh is
    /// already running since that one reads the confirmed state.
    async fn reload_after(&self, action: &'static str) {
        let Ok(_guard) = BusyGuard::acquire(&self.flags.refreshing, "Refresh") else {
            warn!("Refresh already in progress, skipping reload after {action}");
            return;
        };
        if let Err(e) = self.reload().await {
            warn!("Reload after {action} failed: {e}");
        }
    }

    async fn reload(&self) -> Result<usize> {
        let (gigs, contract_address) = match self.fetch_gigs().await {
            Ok(loaded) => loaded,
            Err(e) => {
                error!("Failed to load data: {e:?}");
                self.status.fail("Failed to load data");
                return Err(GigError::Load(e.to_string()));
            }
        };

        let count = gigs.len();
        {
            let mut guard = self.state.write().await;
            let state = &mut *guard;
            state.gigs = gigs
                .into_iter()
                .map(|mut gig| {
                    if let Some(labels) = state.session_labels.get(&gig.id) {
                        gig.category = gig.category.or(Some(labels.category));
                        gig.status = labels.status;
                    }
                    gig
                })
                .collect();
            state.contract_address = Some(contract_address);
            let pages = state.total_pages(self.settings.page_size);
            state.page = clamp_page(state.page, pages);
        }
        self.loaded.store(true, Ordering::Release);

        info!(count, contract = %contract_address, "Gigs loaded");
        self.publish(MarketEvent::GigsLoaded { count });
        Ok(count)
    }

    async fn fetch_gigs(&self) -> eyre::Result<(Vec<GigRecord>, Address)> {
        let reader = self.gateway.reader().await?;
        let ids = reader.get_all_business_ids().await?;

        let mut gigs = Vec::with_capacity(ids.len());
        for id in ids {
            match reader.get_business_data(&id).await {
                Ok(data) => gigs.push(GigRecord::from_business_data(&id, data)),
                Err(e) => warn!(gig = %id, "Error loading data for {id}: {e}"),
            }
        }
        Ok((gigs, reader.address()))
    }

    /// Address of the contract, once a load has resolved it
    pub async fn contract_address(&self) -> Option<Address> {
        self.state.read().await.contract_address
    }

    async fn resolve_contract_address(&self, reader: &G::Reader) -> Address {
        self.contract_address().await.unwrap_or_else(|| reader.address())
    }

    ////////////////////////////////////////////////////////////////////////
    // Create
    ////////////////////////////////////////////////////////////////////////

    /// Encrypt the draft budget and post the draft as a new gig. Returns
    /// the new gig id once the transaction is confirmed.
    pub async fn create_gig(&self) -> Result<String> {
        let Some(user) = self.wallet.status().address() else {
            self.status.fail("Please connect wallet first");
            return Err(GigError::WalletNotConnected);
        };
        let _guard = BusyGuard::acquire(&self.flags.creating, "Gig creation")?;

        let draft = self.state.read().await.draft.validate();
        let draft = match draft {
            Ok(draft) => draft,
            Err(e) => {
                self.status.fail(e.to_string());
                return Err(e);
            }
        };

        self.status.begin("Creating gig with FHE encryption...");
        let gig_id = self.next_gig_id();

        if let Err(e) = self.submit_gig(&gig_id, &draft, user).await {
            let err = GigError::from_submission(&e);
            error!(gig = %gig_id, "Create gig failed: {e:?}");
            self.status.fail(err.user_message());
            return Err(err);
        }

        self.state.write().await.session_labels.insert(
            gig_id.clone(),
            Labels {
                category: draft.category,
                status: draft.status,
            },
        );
        self.append_history(
            HistoryAction::Create,
            &gig_id,
            format!("Created gig: {}", draft.title),
        )
        .await;
        self.status.succeed("Gig created successfully!");
        self.reload_after("create").await;

        let mut state = self.state.write().await;
        state.create_form_open = false;
        state.draft.reset();
        Ok(gig_id)
    }

    /// `gig-<ms>` ids, strictly increasing within this controller
    fn next_gig_id(&self) -> String {
        let now = now_ms();
        let last = self
            .last_gig_ms
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        format!("gig-{}", now.max(last + 1))
    }

    async fn submit_gig(
        &self,
        gig_id: &str,
        draft: &ValidDraft,
        user: Address,
    ) -> eyre::Result<TxReceipt> {
        let writer = self.gateway.writer().await?;
        let reader = self.gateway.reader().await?;
        let contract_address = self.resolve_contract_address(&reader).await;

        let encrypted = self.fhe.encrypt(contract_address, user, draft.budget).await?;
        let pending = writer
            .create_business_data(
                gig_id,
                &draft.title,
                encrypted.encrypted_data,
                encrypted.proof,
                U256::from(draft.budget),
                U256::ZERO,
                &draft.description,
            )
            .await?;

        self.status.begin("Waiting for transaction confirmation...");
        info!(tx = %pending.tx_hash(), gig = %gig_id, "Create gig sent");
        pending.confirm().await
    }

    ////////////////////////////////////////////////////////////////////////
    // Decrypt
    ////////////////////////////////////////////////////////////////////////

    /// Reveal the budget of a gig through a verified decryption. Returns
    /// `None` when the decryption failed or another one is in flight.
    pub async fn decrypt_budget(&self, gig_id: &str) -> Option<u64> {
        let Ok(_guard) = BusyGuard::acquire(&self.flags.decrypting, "Decryption") else {
            warn!(gig = %gig_id, "Decryption already in progress");
            return None;
        };
        if !self.wallet.status().is_connected() {
            self.status.fail("Please connect wallet first");
            return None;
        }

        match self.verify_budget(gig_id).await {
            Ok(value) => Some(value),
            Err(GigError::AlreadyVerified) => {
                info!(gig = %gig_id, "Budget was verified concurrently");
                self.status.succeed("Budget already verified");
                self.reload_after("decrypt").await;
                self.gig(gig_id).await.and_then(|gig| gig.budget())
            }
            Err(e) => {
                error!(gig = %gig_id, "Decryption failed: {e}");
                self.status.fail("Decryption failed");
                None
            }
        }
    }

    async fn verify_budget(&self, gig_id: &str) -> Result<u64> {
        let reader = self.gateway.reader().await.map_err(GigError::read)?;
        let data = reader
            .get_business_data(gig_id)
            .await
            .map_err(GigError::read)?;
        if data.is_verified {
            self.status.succeed("Budget already verified");
            return Ok(data.decrypted_value);
        }

        let writer = self.gateway.writer().await.map_err(GigError::decryption)?;
        let handle = reader
            .get_encrypted_value(gig_id)
            .await
            .map_err(GigError::read)?;
        let contract_address = self.resolve_contract_address(&reader).await;
        let submitter = VerifyDecryptionSubmitter {
            writer: &writer,
            business_id: gig_id,
        };
        let verified = self
            .fhe
            .verify_decryption(&[handle], contract_address, &submitter)
            .await
            .map_err(GigError::decryption)?;
        self.status.begin("Verifying decryption...");

        let clear = verified
            .decryption_result
            .clear_value(&handle)
            .ok_or_else(|| {
                GigError::decryption(eyre!("No clear value returned for handle {handle}"))
            })?;
        let value = u64::try_from(clear).map_err(|_| {
            GigError::decryption(eyre!("Clear value {clear} overflows u64"))
        })?;

        self.reload_after("decrypt").await;
        self.append_history(
            HistoryAction::Decrypt,
            gig_id,
            format!("Decrypted budget: {value}"),
        )
        .await;
        self.status.succeed("Budget decrypted successfully!");
        Ok(value)
    }

    ////////////////////////////////////////////////////////////////////////
    // Availability
    ////////////////////////////////////////////////////////////////////////

    pub async fn check_availability(&self) -> bool {
        match self.probe_availability().await {
            Ok(true) => {
                self.status.succeed("Contract is available!");
                true
            }
            Ok(false) => {
                self.status.fail("Contract is unavailable");
                false
            }
            Err(e) => {
                error!("Availability check failed: {e:?}");
                self.status.fail("Availability check failed");
                false
            }
        }
    }

    async fn probe_availability(&self) -> eyre::Result<bool> {
        self.gateway.reader().await?.is_available().await
    }

    ////////////////////////////////////////////////////////////////////////
    // Selection, filters and pages
    ////////////////////////////////////////////////////////////////////////

    pub async fn select_gig(&self, gig_id: &str) -> Result<GigRecord> {
        let gig = {
            let mut state = self.state.write().await;
            let gig = state
                .gigs
                .iter()
                .find(|g| g.id == gig_id)
                .cloned()
                .ok_or_else(|| GigError::UnknownGig(gig_id.to_string()))?;
            state.selected = Some(gig.id.clone());
            gig
        };
        self.append_history(HistoryAction::View, &gig.id, format!("Viewed: {}", gig.title))
            .await;
        self.publish(MarketEvent::GigSelected {
            id: Some(gig.id.clone()),
        });
        Ok(gig)
    }

    pub async fn clear_selection(&self) {
        self.state.write().await.selected = None;
        self.publish(MarketEvent::GigSelected { id: None });
    }

    pub async fn selected_gig(&self) -> Option<GigRecord> {
        let state = self.state.read().await;
        let id = state.selected.as_ref()?;
        state.gigs.iter().find(|g| &g.id == id).cloned()
    }

    pub async fn set_search(&self, term: &str) {
        let mut state = self.state.write().await;
        state.search = term.to_string();
        state.page = 1;
    }

    pub async fn set_category(&self, category: CategoryFilter) {
        let mut state = self.state.write().await;
        state.category = category;
        state.page = 1;
    }

    pub async fn next_page(&self) -> usize {
        let mut state = self.state.write().await;
        let pages = state.total_pages(self.settings.page_size);
        state.page = clamp_page(state.page.saturating_add(1), pages);
        state.page
    }

    pub async fn previous_page(&self) -> usize {
        let mut state = self.state.write().await;
        let pages = state.total_pages(self.settings.page_size);
        state.page = clamp_page(state.page.saturating_sub(1), pages);
        state.page
    }

    /// The current page of the filtered list
    pub async fn page(&self) -> Page {
        let state = self.state.read().await;
        let pages = state.total_pages(self.settings.page_size);
        view_page(
            &state.gigs,
            &state.search,
            state.category,
            clamp_page(state.page, pages),
            self.settings.page_size,
        )
    }

    pub async fn gigs(&self) -> Vec<GigRecord> {
        self.state.read().await.gigs.clone()
    }

    pub async fn gig(&self, gig_id: &str) -> Option<GigRecord> {
        self.state
            .read()
            .await
            .gigs
            .iter()
            .find(|g| g.id == gig_id)
            .cloned()
    }

    pub async fn stats(&self) -> MarketStats {
        MarketStats::from_gigs(&self.state.read().await.gigs)
    }

    ////////////////////////////////////////////////////////////////////////
    // Create form
    ////////////////////////////////////////////////////////////////////////

    pub async fn open_create_form(&self) {
        self.state.write().await.create_form_open = true;
    }

    pub async fn close_create_form(&self) {
        self.state.write().await.create_form_open = false;
    }

    pub async fn is_create_form_open(&self) -> bool {
        self.state.read().await.create_form_open
    }

    pub async fn update_draft(&self, field: DraftField, value: &str) {
        self.state.write().await.draft.update(field, value);
    }

    pub async fn draft(&self) -> NewGigDraft {
        self.state.read().await.draft.clone()
    }

    ////////////////////////////////////////////////////////////////////////
    // Status and history
    ////////////////////////////////////////////////////////////////////////

    pub fn status(&self) -> TransactionStatus {
        self.status.current()
    }

    async fn append_history(&self, action: HistoryAction, gig_id: &str, details: String) {
        let entry = ActivityHistoryEntry {
            action,
            gig_id: gig_id.to_string(),
            timestamp: now_ms(),
            details,
        };
        self.history.write().await.push(entry.clone());
        self.publish(MarketEvent::HistoryAppended(entry));
    }

    pub async fn history(&self) -> Vec<ActivityHistoryEntry> {
        self.history.read().await.entries()
    }

    pub async fn recent_activity(&self) -> Vec<ActivityHistoryEntry> {
        self.history.read().await.recent(RECENT_ACTIVITY_LEN)
    }

    pub fn is_refreshing(&self) -> bool {
        self.flags.refreshing.load(Ordering::Acquire)
    }

    pub fn is_creating(&self) -> bool {
        self.flags.creating.load(Ordering::Acquire)
    }

    pub fn is_decrypting(&self) -> bool {
        self.flags.decrypting.load(Ordering::Acquire)
    }

    pub fn is_fhe_initializing(&self) -> bool {
        self.flags.fhe_initializing.load(Ordering::Acquire)
    }
}

/// Epoch milliseconds
pub fn now_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gig_test_helpers::{business, FakeGigMarket, ScriptedFhe, TestWallet};

    #[tokio::test]
    async fn test_phase_ignores_view_state_lock() -> Result<()> {
        let market = FakeGigMarket::default();
        market.seed("gig-1", business("Logo design", "Need a logo"));
        let controller = GigMarketController::new(
            Arc::new(market),
            Arc::new(ScriptedFhe::initialized()),
            Arc::new(TestWallet::connected(Address::repeat_byte(0xa1))),
            ControllerSettings::default(),
        );
        {
            let _state = controller.state.write().await;
            assert_eq!(controller.phase(), ViewPhase::Loading);
        }
        controller.sync_session().await?;

        let _state = controller.state.write().await;
        assert_eq!(controller.phase(), ViewPhase::Ready);
        Ok(())
    }

    #[tokio::test]
    async fn test_gig_ids_are_unique() {
        let controller = GigMarketController::new(
            Arc::new(FakeGigMarket::default()),
            Arc::new(ScriptedFhe::initialized()),
            Arc::new(TestWallet::disconnected()),
            ControllerSettings::default(),
        );
        let ids: HashSet<String> = (0..50).map(|_| controller.next_gig_id()).collect();
        assert_eq!(ids.len(), 50);
        assert!(ids.iter().all(|id| id.starts_with("gig-")));
    }

    #[test]
    fn test_busy_guard_rejects_and_resets() {
        let flag = AtomicBool::new(false);
        {
            let _guard = BusyGuard::acquire(&flag, "Decryption").unwrap();
            assert!(flag.load(Ordering::Acquire));
            let err = BusyGuard::acquire(&flag, "Decryption").err().unwrap();
            assert_eq!(err.to_string(), "Decryption already in progress");
        }
        assert!(!flag.load(Ordering::Acquire));
        assert!(BusyGuard::acquire(&flag, "Decryption").is_ok());
    }

    #[test]
    fn test_stats() {
        let base = GigRecord::from_business_data("gig-0", Default::default());
        let gigs = vec![
            GigRecord {
                category: Some(Category::Design),
                is_verified: true,
                ..base.clone()
            },
            GigRecord {
                category: Some(Category::Design),
                ..base.clone()
            },
            GigRecord {
                category: Some(Category::Writing),
                ..base.clone()
            },
            base,
        ];
        assert_eq!(
            MarketStats::from_gigs(&gigs),
            MarketStats {
                total: 4,
                verified: 1,
                active_categories: 2
            }
        );
    }

    #[test]
    fn test_settings_from_config() {
        let config = MarketConfig {
            page_size: 3,
            ..MarketConfig::default()
        };
        let settings = ControllerSettings::from(&config);
        assert_eq!(settings.page_size, 3);
        assert_eq!(settings.history_capacity, DEFAULT_HISTORY_CAPACITY);
    }
}
