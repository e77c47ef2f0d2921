//! Durable collaborators of the game session.
//!
//! The session core talks to two external stores through narrow contracts:
//! a snapshot store for save/resume and an append-only stats sink for
//! completed runs. Everything here is a boundary concern - failures are
//! returned to the caller, which absorbs and logs them without ever touching
//! session state.
//!
//! # Module Structure
//!
//! - [`record`]: serde document shapes (the on-disk/wire schema)
//! - [`memory`]: `Mutex`-backed implementations for tests and headless use
//! - [`json`]: one-JSON-file-per-snapshot store with logical deletion
//! - [`detached`]: fire-and-forget async wrapper around any store pair
//! - [`config`]: environment-driven configuration

pub mod config;
pub mod detached;
pub mod json;
pub mod memory;
pub mod record;

use anyhow::Result;
use tui_fifteen_types::{PuzzleId, SavedState, StatsRecord, UserId};

pub use config::StoreConfig;
pub use detached::DetachedStore;
pub use json::JsonStore;
pub use memory::{MemoryStats, MemoryStore};

/// Durable snapshot store enabling save/resume.
///
/// Upsert semantics: at most one live snapshot per (user, puzzle) pair, and
/// repeated saves with the same key overwrite it. `load` returning None
/// means "no active session", which is not an error.
pub trait SnapshotStore: Send + Sync {
    fn load(&self, user: &UserId, puzzle: &PuzzleId) -> Result<Option<SavedState>>;

    fn save(&self, user: &UserId, puzzle: &PuzzleId, state: &SavedState) -> Result<()>;

    /// Soft-deactivate the snapshot for this key. A logical delete: the
    /// record may remain on disk, it just stops being loadable.
    fn invalidate(&self, user: &UserId, puzzle: &PuzzleId) -> Result<()>;
}

/// Append-only store for completed-run outcomes.
///
/// Never updates a prior record; ranking and presentation live elsewhere.
pub trait StatsSink: Send + Sync {
    fn record(&self, record: &StatsRecord) -> Result<()>;
}
