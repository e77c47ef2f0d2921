//! Fire-and-forget wrapper around a store pair.
//!
//! Durability calls must never block or roll back an in-memory session
//! transition, so writes are shipped to a background tokio runtime and
//! acknowledged immediately; a failed write is logged and otherwise dropped.
//! Loads stay synchronous - resume happens before play starts, where
//! blocking is fine.
//!
//! Dropping the wrapper drops the runtime; tasks still in flight at process
//! exit are abandoned, which is the deliberate contract at the
//! navigate-away boundary (an unconfirmed save is simply never confirmed).

use std::sync::Arc;

use anyhow::Result;
use tokio::runtime::Runtime;
use tracing::warn;
use tui_fifteen_types::{PuzzleId, SavedState, StatsRecord, UserId};

use crate::{SnapshotStore, StatsSink};

/// Store pair whose writes run detached on a background runtime.
pub struct DetachedStore {
    rt: Runtime,
    snapshots: Arc<dyn SnapshotStore>,
    stats: Arc<dyn StatsSink>,
}

impl DetachedStore {
    pub fn new(snapshots: Arc<dyn SnapshotStore>, stats: Arc<dyn StatsSink>) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;
        Ok(Self {
            rt,
            snapshots,
            stats,
        })
    }
}

impl SnapshotStore for DetachedStore {
    fn load(&self, user: &UserId, puzzle: &PuzzleId) -> Result<Option<SavedState>> {
        self.snapshots.load(user, puzzle)
    }

    fn save(&self, user: &UserId, puzzle: &PuzzleId, state: &SavedState) -> Result<()> {
        let snapshots = Arc::clone(&self.snapshots);
        let (user, puzzle, state) = (user.clone(), puzzle.clone(), state.clone());
        self.rt.spawn(async move {
            if let Err(err) = snapshots.save(&user, &puzzle, &state) {
                warn!(user = user.as_str(), puzzle = puzzle.as_str(), %err, "snapshot save failed");
            }
        });
        Ok(())
    }

    fn invalidate(&self, user: &UserId, puzzle: &PuzzleId) -> Result<()> {
        let snapshots = Arc::clone(&self.snapshots);
        let (user, puzzle) = (user.clone(), puzzle.clone());
        self.rt.spawn(async move {
            if let Err(err) = snapshots.invalidate(&user, &puzzle) {
                warn!(user = user.as_str(), puzzle = puzzle.as_str(), %err, "snapshot invalidate failed");
            }
        });
        Ok(())
    }
}

impl StatsSink for DetachedStore {
    fn record(&self, record: &StatsRecord) -> Result<()> {
        let stats = Arc::clone(&self.stats);
        let record = record.clone();
        self.rt.spawn(async move {
            if let Err(err) = stats.record(&record) {
                warn!(user = record.user.as_str(), %err, "stats record failed");
            }
        });
        Ok(())
    }
}
