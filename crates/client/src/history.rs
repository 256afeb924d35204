// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::models::ActivityHistoryEntry;
use std::collections::VecDeque;

pub const RECENT_ACTIVITY_LEN: usize = 5;

const MS_PER_HOUR: u64 = 3_600_000;

/// Bounded activity log, newest first
#[derive(Clone, Debug)]
pub struct ActivityHistory {
    entries: VecDeque<ActivityHistoryEntry>,
    capacity: usize,
}

impl ActivityHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: ActivityHistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    pub fn entries(&self) -> Vec<ActivityHistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn recent(&self, count: usize) -> Vec<ActivityHistoryEntry> {
        self.entries.iter().take(count).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Age of an entry rounded to the nearest hour, eg. `3h ago`
pub fn format_age(now_ms: u64, timestamp_ms: u64) -> String {
    let elapsed = now_ms.saturating_sub(timestamp_ms);
    let hours = (elapsed + MS_PER_HOUR / 2) / MS_PER_HOUR;
    format!("{hours}h ago")
}
