// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::models::ActivityHistoryEntry;
use crate::status::{StatusKind, TransactionStatus};
use alloy::primitives::Address;
use gig_logger::EventLogging;
use tracing::{error, info};

/// Everything a view layer needs to re-render
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarketEvent {
    StatusChanged(TransactionStatus),
    HistoryAppended(ActivityHistoryEntry),
    GigsLoaded { count: usize },
    GigSelected { id: Option<String> },
    SessionReady { contract_address: Address },
}

impl MarketEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            MarketEvent::StatusChanged(_) => "StatusChanged",
            MarketEvent::HistoryAppended(_) => "HistoryAppended",
            MarketEvent::GigsLoaded { .. } => "GigsLoaded",
            MarketEvent::GigSelected { .. } => "GigSelected",
            MarketEvent::SessionReady { .. } => "SessionReady",
        }
    }
}

impl EventLogging for MarketEvent {
    fn log(&self, logger_name: &str) {
        match self {
            MarketEvent::StatusChanged(TransactionStatus {
                kind: StatusKind::Error,
                message,
                ..
            }) => error!(me = logger_name, evt = self.event_type(), "{message}"),
            MarketEvent::StatusChanged(status) if status.visible => info!(
                me = logger_name,
                evt = self.event_type(),
                kind = ?status.kind,
                "{}",
                status.message
            ),
            MarketEvent::StatusChanged(_) => {
                info!(me = logger_name, evt = self.event_type(), "Status hidden")
            }
            MarketEvent::HistoryAppended(entry) => info!(
                me = logger_name,
                evt = self.event_type(),
                action = %entry.action,
                gig = %entry.gig_id,
                "{}",
                entry.details
            ),
            MarketEvent::GigsLoaded { count } => {
                info!(me = logger_name, evt = self.event_type(), count, "Gigs loaded")
            }
            MarketEvent::GigSelected { id } => {
                info!(me = logger_name, evt = self.event_type(), gig = ?id, "Selection changed")
            }
            MarketEvent::SessionReady { contract_address } => info!(
                me = logger_name,
                evt = self.event_type(),
                contract = %contract_address,
                "Session ready"
            ),
        }
    }
}
