//! JSON-file store.
//!
//! One pretty-printed JSON document per (user, puzzle) snapshot under the
//! data directory, plus an append-only `stats.jsonl`. Invalidation rewrites
//! the document with `is_active: false` rather than deleting it, matching
//! the logical-delete contract.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tui_fifteen_types::{PuzzleId, SavedState, StatsRecord, UserId};

use crate::record::{SnapshotRecord, StatsRow};
use crate::{SnapshotStore, StatsSink};

const STATS_FILE: &str = "stats.jsonl";

/// Snapshot store and stats sink backed by a directory of JSON files.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating data directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn snapshot_path(&self, user: &UserId, puzzle: &PuzzleId) -> PathBuf {
        // Identities are opaque; flatten anything path-hostile.
        let name = format!("{}__{}.json", sanitize(user.as_str()), sanitize(puzzle.as_str()));
        self.dir.join(name)
    }

    fn read_record(&self, path: &Path) -> Result<Option<SnapshotRecord>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("reading {}", path.display()))
            }
        };
        let record = serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(record))
    }

    fn write_record(&self, path: &Path, record: &SnapshotRecord) -> Result<()> {
        let json = serde_json::to_vec_pretty(record)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))
    }
}

impl SnapshotStore for JsonStore {
    fn load(&self, user: &UserId, puzzle: &PuzzleId) -> Result<Option<SavedState>> {
        let path = self.snapshot_path(user, puzzle);
        Ok(self
            .read_record(&path)?
            .filter(|r| r.is_active)
            .map(SnapshotRecord::into_saved_state))
    }

    fn save(&self, user: &UserId, puzzle: &PuzzleId, state: &SavedState) -> Result<()> {
        let path = self.snapshot_path(user, puzzle);
        self.write_record(&path, &SnapshotRecord::new(user, puzzle, state))
    }

    fn invalidate(&self, user: &UserId, puzzle: &PuzzleId) -> Result<()> {
        let path = self.snapshot_path(user, puzzle);
        if let Some(mut record) = self.read_record(&path)? {
            record.is_active = false;
            self.write_record(&path, &record)?;
        }
        Ok(())
    }
}

impl StatsSink for JsonStore {
    fn record(&self, record: &StatsRecord) -> Result<()> {
        let path = self.dir.join(STATS_FILE);
        let mut line = serde_json::to_vec(&StatsRow::from(record))?;
        line.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening {}", path.display()))?;
        file.write_all(&line)
            .with_context(|| format!("appending to {}", path.display()))
    }
}

fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
