//! Last-batch memory used to steer the next recommendation away from repeats
//!
//! One slot per session. The default session reproduces a single
//! process-wide slot; callers that know who they are talking to can pass
//! their own key and keep avoid-lists apart.

use std::collections::HashMap;

use tokio::sync::Mutex;

use shared::{ProcessId, RecommendationRecord, SessionKey, process_debug};

/// Per-session store of the most recently accepted batch
#[derive(Debug, Default)]
pub struct HistoryTracker {
    slots: Mutex<HashMap<SessionKey, Vec<RecommendationRecord>>>,
}

impl HistoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last stored batch for `session`, empty if none was recorded yet
    pub async fn previous(&self, session: &SessionKey) -> Vec<RecommendationRecord> {
        let slots = self.slots.lock().await;
        slots.get(session).cloned().unwrap_or_default()
    }

    /// Replace the stored batch for `session`
    pub async fn record(&self, session: &SessionKey, batch: Vec<RecommendationRecord>) {
        let mut slots = self.slots.lock().await;
        process_debug!(
            ProcessId::current(),
            session = %session,
            records = batch.len(),
            "Recorded recommendation batch"
        );
        slots.insert(session.clone(), batch);
    }

    /// Read the previous batch, derive the next one and store it, all under
    /// one lock so concurrent cycles on the same session cannot interleave.
    pub async fn cycle<F>(&self, session: &SessionKey, f: F) -> Vec<RecommendationRecord>
    where
        F: FnOnce(&[RecommendationRecord]) -> Vec<RecommendationRecord>,
    {
        let mut slots = self.slots.lock().await;
        let next = {
            let previous = slots.get(session).map(Vec::as_slice).unwrap_or(&[]);
            f(previous)
        };
        slots.insert(session.clone(), next.clone());
        next
    }

    /// Forget the stored batch for `session`. Returns whether one existed.
    pub async fn clear(&self, session: &SessionKey) -> bool {
        self.slots.lock().await.remove(session).is_some()
    }

    /// Sessions that currently hold a batch, sorted
    pub async fn sessions(&self) -> Vec<SessionKey> {
        let slots = self.slots.lock().await;
        let mut keys: Vec<SessionKey> = slots.keys().cloned().collect();
        keys.sort();
        keys
    }
}
