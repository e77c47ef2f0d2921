//! Serialized document shapes for the stores.
//!
//! Field names follow the backing schema the game was built against
//! (`board_state`, `moves_count`, `time_seconds`, `is_active`), so dumps
//! stay readable next to the server-side tables.

use serde::{Deserialize, Serialize};
use tui_fifteen_types::{Pos, PuzzleId, SavedState, StatsRecord, Tile, UserId, BOARD_SIDE};

const SIDE: usize = BOARD_SIDE as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRef {
    pub row: u8,
    pub col: u8,
}

impl From<Pos> for CellRef {
    fn from(value: Pos) -> Self {
        Self {
            row: value.row,
            col: value.col,
        }
    }
}

impl From<CellRef> for Pos {
    fn from(value: CellRef) -> Self {
        Pos::new(value.row, value.col)
    }
}

/// One persisted session snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub user_id: String,
    pub puzzle_id: String,
    pub board_state: [[Tile; SIDE]; SIDE],
    pub empty_position: CellRef,
    pub moves_count: u32,
    pub time_seconds: u32,
    pub is_active: bool,
}

impl SnapshotRecord {
    pub fn new(user: &UserId, puzzle: &PuzzleId, state: &SavedState) -> Self {
        Self {
            user_id: user.as_str().to_owned(),
            puzzle_id: puzzle.as_str().to_owned(),
            board_state: state.grid,
            empty_position: state.empty.into(),
            moves_count: state.move_count,
            time_seconds: state.elapsed_seconds,
            is_active: true,
        }
    }

    pub fn into_saved_state(self) -> SavedState {
        SavedState {
            grid: self.board_state,
            empty: self.empty_position.into(),
            move_count: self.moves_count,
            elapsed_seconds: self.time_seconds,
        }
    }
}

/// One appended completion outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsRow {
    pub user_id: String,
    pub puzzle_id: String,
    pub moves_count: u32,
    pub time_taken_seconds: u32,
}

impl From<&StatsRecord> for StatsRow {
    fn from(value: &StatsRecord) -> Self {
        Self {
            user_id: value.user.as_str().to_owned(),
            puzzle_id: value.puzzle.as_str().to_owned(),
            moves_count: value.move_count,
            time_taken_seconds: value.elapsed_seconds,
        }
    }
}
