//! Candidate collector fed by the ICE agent's discovery callback.
//!
//! [`CandidateSink`] is the only way to append, and it is what gets handed
//! to the agent. [`CandidateCollector`] stays with the session and is the
//! only way to read; sealing it freezes the list for publication.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};

#[derive(Default)]
struct CandidateList {
    candidates: Vec<String>,
    sealed: bool,
}

struct Shared {
    list: Mutex<CandidateList>,
    complete_tx: watch::Sender<bool>,
}

/// Write half: appends discovered candidates.
#[derive(Clone)]
pub struct CandidateSink {
    shared: Arc<Shared>,
}

impl CandidateSink {
    /// Append a serialized candidate.
    ///
    /// Candidates arriving after the collector is sealed are dropped.
    pub async fn add(&self, candidate: String) {
        let mut list = self.shared.list.lock().await;
        if list.sealed {
            log::debug!("Dropping candidate discovered after seal: {}", candidate);
            return;
        }
        list.candidates.push(candidate);
    }

    /// Signal that the agent has finished gathering.
    pub fn mark_complete(&self) {
        self.shared.complete_tx.send_replace(true);
    }
}

/// Read half: waits for gathering to settle and snapshots the candidates.
pub struct CandidateCollector {
    shared: Arc<Shared>,
    complete_rx: watch::Receiver<bool>,
}

impl CandidateCollector {
    pub fn new() -> Self {
        let (complete_tx, complete_rx) = watch::channel(false);
        Self {
            shared: Arc::new(Shared {
                list: Mutex::new(CandidateList::default()),
                complete_tx,
            }),
            complete_rx,
        }
    }

    pub fn sink(&self) -> CandidateSink {
        CandidateSink {
            shared: self.shared.clone(),
        }
    }

    /// Wait until gathering completes or `max_wait` elapses.
    ///
    /// Returns true if the agent signaled completion.
    pub async fn wait_settled(&mut self, max_wait: Duration) -> bool {
        tokio::time::timeout(max_wait, self.complete_rx.wait_for(|done| *done))
            .await
            .map(|res| res.is_ok())
            .unwrap_or(false)
    }

    /// Freeze the list and return it in insertion order.
    pub async fn seal(&self) -> Vec<String> {
        let mut list = self.shared.list.lock().await;
        list.sealed = true;
        list.candidates.clone()
    }
}

impl Default for CandidateCollector {
    fn default() -> Self {
        Self::new()
    }
}
