//! In-memory store implementations.
//!
//! Used by the test suites and by headless runs without a data directory.
//! Semantics mirror the JSON store exactly: upsert on save, logical delete
//! on invalidate, append-only stats.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use tui_fifteen_types::{PuzzleId, SavedState, StatsRecord, UserId};

use crate::record::SnapshotRecord;
use crate::{SnapshotStore, StatsSink};

type Key = (String, String);

/// Mutex-backed snapshot store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshots: Mutex<HashMap<Key, SnapshotRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(user: &UserId, puzzle: &PuzzleId) -> Key {
        (user.as_str().to_owned(), puzzle.as_str().to_owned())
    }

    /// Whether a live snapshot exists for this key (test helper).
    pub fn has_active(&self, user: &UserId, puzzle: &PuzzleId) -> bool {
        self.snapshots
            .lock()
            .expect("snapshot map poisoned")
            .get(&Self::key(user, puzzle))
            .is_some_and(|r| r.is_active)
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, user: &UserId, puzzle: &PuzzleId) -> Result<Option<SavedState>> {
        let map = self.snapshots.lock().expect("snapshot map poisoned");
        Ok(map
            .get(&Self::key(user, puzzle))
            .filter(|r| r.is_active)
            .cloned()
            .map(SnapshotRecord::into_saved_state))
    }

    fn save(&self, user: &UserId, puzzle: &PuzzleId, state: &SavedState) -> Result<()> {
        let mut map = self.snapshots.lock().expect("snapshot map poisoned");
        map.insert(
            Self::key(user, puzzle),
            SnapshotRecord::new(user, puzzle, state),
        );
        Ok(())
    }

    fn invalidate(&self, user: &UserId, puzzle: &PuzzleId) -> Result<()> {
        let mut map = self.snapshots.lock().expect("snapshot map poisoned");
        if let Some(record) = map.get_mut(&Self::key(user, puzzle)) {
            record.is_active = false;
        }
        Ok(())
    }
}

/// Mutex-backed append-only stats sink.
#[derive(Debug, Default)]
pub struct MemoryStats {
    records: Mutex<Vec<StatsRecord>>,
}

impl MemoryStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<StatsRecord> {
        self.records.lock().expect("stats vec poisoned").clone()
    }
}

impl StatsSink for MemoryStats {
    fn record(&self, record: &StatsRecord) -> Result<()> {
        self.records
            .lock()
            .expect("stats vec poisoned")
            .push(record.clone());
        Ok(())
    }
}
