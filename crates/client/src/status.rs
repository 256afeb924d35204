// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::events::MarketEvent;
use gig_config::StatusConfig;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::Instant;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    #[default]
    Pending,
    Success,
    Error,
}

/// The transaction banner
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TransactionStatus {
    pub visible: bool,
    pub kind: StatusKind,
    pub message: String,
}

impl TransactionStatus {
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn begin(message: impl Into<String>) -> Self {
        Self::shown(StatusKind::Pending, message)
    }

    pub fn succeed(message: impl Into<String>) -> Self {
        Self::shown(StatusKind::Success, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::shown(StatusKind::Error, message)
    }

    fn shown(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            visible: true,
            kind,
            message: message.into(),
        }
    }

    /// Delay after which this status hides itself. Pending never does.
    pub fn hide_after(&self, config: &StatusConfig) -> Option<Duration> {
        if !self.visible {
            return None;
        }
        match self.kind {
            StatusKind::Pending => None,
            StatusKind::Success => Some(config.success_hide_after()),
            StatusKind::Error => Some(config.error_hide_after()),
        }
    }
}

struct Slot {
    status: TransactionStatus,
    generation: u64,
    hide_task: Option<JoinHandle<()>>,
}

struct Shared {
    slot: Mutex<Slot>,
    config: StatusConfig,
    events: broadcast::Sender<MarketEvent>,
}

impl Shared {
    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, status: &TransactionStatus) {
        // No subscribers is fine
        let _ = self.events.send(MarketEvent::StatusChanged(status.clone()));
    }

    fn hide_if_current(&self, generation: u64) {
        let mut slot = self.slot();
        if slot.generation != generation {
            return;
        }
        slot.status = TransactionStatus::hidden();
        slot.hide_task = None;
        self.publish(&slot.status);
    }
}

/// Owns the single transaction banner and its auto-hide timer. Every
/// transition replaces the scheduled hide, so a superseded timer can never
/// clear a newer status. Must be used from within a tokio runtime.
pub struct StatusController {
    shared: Arc<Shared>,
}

impl StatusController {
    pub fn new(config: StatusConfig, events: broadcast::Sender<MarketEvent>) -> Self {
        Self {
            shared: Arc::new(Shared {
                slot: Mutex::new(Slot {
                    status: TransactionStatus::hidden(),
                    generation: 0,
                    hide_task: None,
                }),
                config,
                events,
            }),
        }
    }

    pub fn current(&self) -> TransactionStatus {
        self.shared.slot().status.clone()
    }

    pub fn begin(&self, message: impl Into<String>) {
        self.transition(TransactionStatus::begin(message));
    }

    pub fn succeed(&self, message: impl Into<String>) {
        self.transition(TransactionStatus::succeed(message));
    }

    pub fn fail(&self, message: impl Into<String>) {
        self.transition(TransactionStatus::fail(message));
    }

    pub fn hide(&self) {
        self.transition(TransactionStatus::hidden());
    }

    fn transition(&self, status: TransactionStatus) {
        let mut slot = self.shared.slot();
        slot.generation = slot.generation.wrapping_add(1);
        if let Some(task) = slot.hide_task.take() {
            task.abort();
        }

        if let Some(delay) = status.hide_after(&self.shared.config) {
            let generation = slot.generation;
            let deadline = Instant::now() + delay;
            let shared: Weak<Shared> = Arc::downgrade(&self.shared);
            slot.hide_task = Some(tokio::spawn(async move {
                tokio::time::sleep_until(deadline).await;
                if let Some(shared) = shared.upgrade() {
                    shared.hide_if_current(generation);
                }
            }));
        }

        slot.status = status;
        self.shared.publish(&slot.status);
    }
}

impl Drop for StatusController {
    fn drop(&mut self) {
        if let Some(task) = self.shared.slot().hide_task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> (StatusController, broadcast::Receiver<MarketEvent>) {
        let (tx, rx) = broadcast::channel(32);
        (StatusController::new(StatusConfig::default(), tx), rx)
    }

    async fn advance(ms: u64) {
        tokio::time::advance(Duration::from_millis(ms)).await;
        tokio::task::yield_now().await;
    }

    #[test]
    fn test_pure_transitions() {
        let config = StatusConfig::default();
        assert_eq!(
            TransactionStatus::hidden(),
            TransactionStatus {
                visible: false,
                kind: StatusKind::Pending,
                message: String::new()
            }
        );
        let pending = TransactionStatus::begin("Working...");
        assert!(pending.visible);
        assert_eq!(pending.hide_after(&config), None);
        assert_eq!(
            TransactionStatus::succeed("ok").hide_after(&config),
            Some(Duration::from_millis(2000))
        );
        assert_eq!(
            TransactionStatus::fail("no").hide_after(&config),
            Some(Duration::from_millis(3000))
        );
        assert_eq!(TransactionStatus::hidden().hide_after(&config), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_hides_after_exactly_3000ms() {
        let (status, _rx) = controller();
        status.fail("Decryption failed");
        advance(2999).await;
        assert!(status.current().visible);
        advance(1).await;
        assert_eq!(status.current(), TransactionStatus::hidden());
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_hides_after_exactly_2000ms() {
        let (status, _rx) = controller();
        status.succeed("Gig created successfully!");
        advance(1999).await;
        assert_eq!(status.current().kind, StatusKind::Success);
        advance(1).await;
        assert!(!status.current().visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_timer_does_not_clear_newer_status() {
        let (status, _rx) = controller();
        status.succeed("first");
        advance(1500).await;
        status.fail("second");
        // the first timer would have fired here
        advance(1000).await;
        assert_eq!(status.current(), TransactionStatus::fail("second"));
        advance(2000).await;
        assert!(!status.current().visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_begin_cancels_scheduled_hide() {
        let (status, _rx) = controller();
        status.fail("oops");
        status.begin("Waiting for transaction confirmation...");
        advance(10_000).await;
        assert_eq!(
            status.current(),
            TransactionStatus::begin("Waiting for transaction confirmation...")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_transitions_are_published() {
        let (status, mut rx) = controller();
        status.begin("a");
        status.succeed("b");
        advance(2000).await;

        let mut seen = vec![];
        while let Ok(MarketEvent::StatusChanged(s)) = rx.try_recv() {
            seen.push(s);
        }
        assert_eq!(
            seen,
            vec![
                TransactionStatus::begin("a"),
                TransactionStatus::succeed("b"),
                TransactionStatus::hidden()
            ]
        );
    }
}
