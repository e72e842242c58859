//! In-memory mission ledger
//!
//! Maps mission ids to their current record and cancellation token. Locks
//! are only held for short, non-awaiting sections, and readers always get
//! a cloned snapshot.
//!
//! Finished missions are never evicted: the ledger grows for the life of
//! the process.

use infraflow_domain::{DomainError, Mission, MissionId};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio_util::sync::CancellationToken;

struct LedgerEntry {
    mission: Mission,
    cancellation: CancellationToken,
}

#[derive(Default)]
pub struct MissionLedger {
    entries: RwLock<HashMap<MissionId, LedgerEntry>>,
}

impl MissionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new mission and return its cancellation token
    pub fn insert(&self, mission: Mission) -> CancellationToken {
        let cancellation = CancellationToken::new();
        self.write().insert(
            mission.id(),
            LedgerEntry {
                mission,
                cancellation: cancellation.clone(),
            },
        );
        cancellation
    }

    /// Cloned snapshot of one mission
    pub fn snapshot(&self, id: &MissionId) -> Option<Mission> {
        self.read().get(id).map(|e| e.mission.clone())
    }

    /// Snapshots of all missions, newest first
    pub fn snapshots(&self) -> Vec<Mission> {
        let mut missions: Vec<_> = self.read().values().map(|e| e.mission.clone()).collect();
        missions.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        missions
    }

    /// Apply a transition to a mission record.
    ///
    /// Returns `None` when the id is unknown.
    pub fn update<F>(&self, id: &MissionId, f: F) -> Option<Result<(), DomainError>>
    where
        F: FnOnce(&mut Mission) -> Result<(), DomainError>,
    {
        self.write().get_mut(id).map(|e| f(&mut e.mission))
    }

    pub fn cancellation(&self, id: &MissionId) -> Option<CancellationToken> {
        self.read().get(id).map(|e| e.cancellation.clone())
    }

    /// Trigger every cancellation token, returning how many missions were still live
    pub fn cancel_all(&self) -> usize {
        let entries = self.read();
        let mut live = 0;
        for entry in entries.values().filter(|e| !e.mission.is_terminal()) {
            entry.cancellation.cancel();
            live += 1;
        }
        live
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<MissionId, LedgerEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<MissionId, LedgerEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}
