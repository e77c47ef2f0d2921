//! Core types shared across the application.
//! This crate contains pure data types with no external dependencies.

/// Board side length. The engine only supports the classic 4x4 layout.
pub const BOARD_SIDE: u8 = 4;

/// Number of cells on the board (15 tiles + 1 empty).
pub const CELL_COUNT: u8 = BOARD_SIDE * BOARD_SIDE;

/// Randomized legal moves performed by the shuffle walk.
pub const SHUFFLE_STEPS: u32 = 100;

/// Visual settle time for a single-tile move (milliseconds).
pub const SETTLE_BASE_MS: u32 = 300;

/// Extra settle time per shifted tile in a line slide (milliseconds).
pub const SETTLE_PER_TILE_MS: u32 = 50;

/// Session clock granularity (milliseconds per elapsed second).
pub const CLOCK_SECOND_MS: u64 = 1000;

/// Tile value. 0 denotes the empty cell, 1..=15 are the numbered tiles.
pub type Tile = u8;

/// A cell coordinate on the 4x4 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Whether the coordinate lies on the board.
    pub fn in_bounds(&self) -> bool {
        self.row < BOARD_SIDE && self.col < BOARD_SIDE
    }

    /// Manhattan distance to another cell.
    pub fn manhattan(&self, other: Pos) -> u8 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True iff the two cells share an edge.
    pub fn is_adjacent(&self, other: Pos) -> bool {
        self.manhattan(other) == 1
    }

    /// True iff the two cells share a row or a column.
    pub fn in_line(&self, other: Pos) -> bool {
        self.row == other.row || self.col == other.col
    }
}

/// Kind of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// The clicked tile is adjacent to the empty cell.
    Single,
    /// The clicked tile shares a line with the empty cell; every tile
    /// between them shifts one position toward the empty slot.
    LineSlide,
}

/// Lifecycle state of a play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No shuffled board yet; moves are ignored and the clock is stopped.
    Idle,
    /// Clock running, moves accepted.
    Playing,
    /// Terminal for the run: counters frozen, moves ignored.
    Solved,
}

/// Opaque key for the puzzle variant/skin in play.
///
/// The core never interprets this value; it only keys persistence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PuzzleId(pub String);

impl PuzzleId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Opaque player identity used for persistence keying.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Durable snapshot of an interrupted session.
///
/// The grid is carried as raw rows so the store crates can (de)serialize it
/// without depending on the board type; the core re-validates on restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedState {
    pub grid: [[Tile; BOARD_SIDE as usize]; BOARD_SIDE as usize],
    pub empty: Pos,
    pub move_count: u32,
    pub elapsed_seconds: u32,
}

/// Completed-run outcome handed to the stats recorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRecord {
    pub user: UserId,
    pub puzzle: PuzzleId,
    pub move_count: u32,
    pub elapsed_seconds: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency() {
        let center = Pos::new(1, 1);
        assert!(center.is_adjacent(Pos::new(0, 1)));
        assert!(center.is_adjacent(Pos::new(2, 1)));
        assert!(center.is_adjacent(Pos::new(1, 0)));
        assert!(center.is_adjacent(Pos::new(1, 2)));

        assert!(!center.is_adjacent(center));
        assert!(!center.is_adjacent(Pos::new(0, 0)));
        assert!(!center.is_adjacent(Pos::new(3, 1)));
    }

    #[test]
    fn test_in_line() {
        let p = Pos::new(2, 3);
        assert!(p.in_line(Pos::new(2, 0)));
        assert!(p.in_line(Pos::new(0, 3)));
        assert!(!p.in_line(Pos::new(1, 0)));
    }

    #[test]
    fn test_bounds() {
        assert!(Pos::new(3, 3).in_bounds());
        assert!(!Pos::new(4, 0).in_bounds());
        assert!(!Pos::new(0, 4).in_bounds());
    }
}
