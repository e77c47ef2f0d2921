//! Board module - the 4x4 tile arrangement.
//!
//! `Board` is an immutable-by-contract value type: every operation returns a
//! new board, the grid is never mutated in place. This keeps history/undo
//! feasible later and makes the pending-move handoff in the session layer a
//! plain value swap.
//!
//! Invariant: `grid` is always a permutation of {0..=15} and `empty` always
//! names the cell holding 0. The only entry point that can see an arbitrary
//! grid is [`Board::from_grid`], which validates; everything else preserves
//! the invariant by construction.

use arrayvec::ArrayVec;

use crate::types::{Pos, Tile, BOARD_SIDE, CELL_COUNT};

const SIDE: usize = BOARD_SIDE as usize;

/// The puzzle board: 15 numbered tiles plus one empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    grid: [[Tile; SIDE]; SIDE],
    empty: Pos,
}

impl Board {
    /// The canonical solved arrangement: cell (r, c) holds `r*4 + c + 1`,
    /// except (3, 3) which is empty.
    pub fn solved() -> Self {
        let mut grid = [[0u8; SIDE]; SIDE];
        for (r, row) in grid.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (r * SIDE + c + 1) as Tile;
            }
        }
        grid[SIDE - 1][SIDE - 1] = 0;
        Self {
            grid,
            empty: Pos::new(BOARD_SIDE - 1, BOARD_SIDE - 1),
        }
    }

    /// Rebuild a board from a raw grid, validating the permutation invariant.
    ///
    /// Returns None if the grid is not a permutation of {0..=15}. This is the
    /// restore boundary; boards produced by the shuffler or the engine are
    /// valid by construction and never pass through here.
    pub fn from_grid(grid: [[Tile; SIDE]; SIDE]) -> Option<Self> {
        let mut seen = [false; CELL_COUNT as usize];
        let mut empty = None;
        for (r, row) in grid.iter().enumerate() {
            for (c, &tile) in row.iter().enumerate() {
                if tile >= CELL_COUNT || seen[tile as usize] {
                    return None;
                }
                seen[tile as usize] = true;
                if tile == 0 {
                    empty = Some(Pos::new(r as u8, c as u8));
                }
            }
        }
        empty.map(|empty| Self { grid, empty })
    }

    /// Tile at a cell. Callers pass in-bounds coordinates.
    pub fn tile(&self, pos: Pos) -> Tile {
        self.grid[pos.row as usize][pos.col as usize]
    }

    /// Position of the empty cell.
    pub fn empty_pos(&self) -> Pos {
        self.empty
    }

    /// Raw grid rows, row-major.
    pub fn grid(&self) -> &[[Tile; SIDE]; SIDE] {
        &self.grid
    }

    /// Exact comparison against the canonical solved arrangement.
    pub fn is_solved(&self) -> bool {
        self.grid == Self::solved().grid
    }

    /// New board with the tile at `from` swapped into the empty cell.
    ///
    /// `from` must be adjacent to the empty cell; this is the shuffle-walk
    /// step and the engine's single-tile move primitive.
    pub fn with_tile_into_empty(&self, from: Pos) -> Self {
        debug_assert!(from.is_adjacent(self.empty));
        let mut grid = self.grid;
        grid[self.empty.row as usize][self.empty.col as usize] = self.tile(from);
        grid[from.row as usize][from.col as usize] = 0;
        Self { grid, empty: from }
    }

    /// New board built from an explicit ordered list of (from -> to) tile
    /// assignments ending with the empty cell landing on `new_empty`.
    ///
    /// Assignments are applied against the *old* grid, so overlapping chains
    /// (a line slide) cannot observe partially shifted tiles.
    pub fn with_assignments(&self, assignments: &[(Pos, Pos)], new_empty: Pos) -> Self {
        let mut grid = self.grid;
        for &(from, to) in assignments {
            grid[to.row as usize][to.col as usize] = self.tile(from);
        }
        grid[new_empty.row as usize][new_empty.col as usize] = 0;
        let board = Self {
            grid,
            empty: new_empty,
        };
        debug_assert!(board.check_permutation());
        board
    }

    /// Cells adjacent to the empty slot (2 to 4 of them).
    pub fn empty_neighbors(&self) -> ArrayVec<Pos, 4> {
        let mut out = ArrayVec::new();
        let Pos { row, col } = self.empty;
        if row > 0 {
            out.push(Pos::new(row - 1, col));
        }
        if row < BOARD_SIDE - 1 {
            out.push(Pos::new(row + 1, col));
        }
        if col > 0 {
            out.push(Pos::new(row, col - 1));
        }
        if col < BOARD_SIDE - 1 {
            out.push(Pos::new(row, col + 1));
        }
        out
    }

    fn check_permutation(&self) -> bool {
        let mut seen = [false; CELL_COUNT as usize];
        for row in &self.grid {
            for &tile in row {
                if tile >= CELL_COUNT || seen[tile as usize] {
                    return false;
                }
                seen[tile as usize] = true;
            }
        }
        self.tile(self.empty) == 0
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::solved()
    }
}
