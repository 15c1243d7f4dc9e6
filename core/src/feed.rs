// SPDX-FileCopyrightText: 2026 Rota contributors
//
// SPDX-License-Identifier: Apache-2.0

use tokio::sync::watch;

/// Broadcast of "the underlying rows changed" to any number of observers.
///
/// The feed carries a bare generation counter instead of data: reads are
/// idempotent pure functions of current store state, so observers simply
/// re-query when the counter moves. Dropping a receiver unsubscribes it.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    tx: watch::Sender<u64>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self {
            tx: watch::Sender::new(0),
        }
    }

    /// Bump the generation counter, waking all watchers.
    pub fn mark_changed(&self) {
        self.tx.send_modify(|generation| *generation = generation.wrapping_add(1));
    }

    /// Subscribe to changes. The receiver's `changed()` future resolves
    /// whenever a write happens after the subscription.
    pub fn watch(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}
