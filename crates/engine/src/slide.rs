//! Move planning and application.
//!
//! Rules, evaluated in order for a requested cell:
//!
//! 1. the empty cell itself: rejected (no-op click on the hole)
//! 2. adjacent to the empty cell: single-tile move
//! 3. same row or column: line slide - every cell strictly between the empty
//!    cell and the requested cell, inclusive of the requested cell, shifts
//!    one position toward the empty slot
//! 4. anything else: rejected
//!
//! The cascade in case 3 is expressed as an explicit ordered (from -> to)
//! assignment list computed from the two endpoints, rather than an iterative
//! overwrite with direction-dependent loop bounds; the board applies every
//! assignment against the pre-move grid, so there is no off-by-one hazard at
//! the line's boundary cell.

use arrayvec::ArrayVec;

use tui_fifteen_core::Board;
use tui_fifteen_types::{MoveKind, Pos, SETTLE_BASE_MS, SETTLE_PER_TILE_MS};

/// Longest possible slide: three tiles between a board edge and the hole.
pub const MAX_SLIDE_LEN: usize = 3;

/// A validated move derived from the current board and a requested cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideMove {
    pub kind: MoveKind,
    /// The clicked cell; after application it holds the empty slot.
    pub origin: Pos,
    /// Position of the empty cell before the move.
    pub empty: Pos,
    /// Cells whose tiles shift one position toward the empty cell, ordered
    /// from the cell nearest the empty slot outward. The origin is last.
    pub cells: ArrayVec<Pos, MAX_SLIDE_LEN>,
}

impl SlideMove {
    /// Ordered (from -> to) tile assignments realizing the move.
    ///
    /// The first moved tile lands on the old empty cell; each further tile
    /// lands on its predecessor's cell.
    pub fn assignments(&self) -> ArrayVec<(Pos, Pos), MAX_SLIDE_LEN> {
        let mut out = ArrayVec::new();
        let mut to = self.empty;
        for &from in &self.cells {
            out.push((from, to));
            to = from;
        }
        out
    }

    /// Visual settle time for this move.
    ///
    /// A single tile settles in a fixed window; a line slide adds a stagger
    /// per shifted tile, matching the front-end animation.
    pub fn settle_ms(&self) -> u32 {
        match self.kind {
            MoveKind::Single => SETTLE_BASE_MS,
            MoveKind::LineSlide => SETTLE_BASE_MS + SETTLE_PER_TILE_MS * self.cells.len() as u32,
        }
    }
}

/// Result of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveApplied {
    pub board: Board,
    pub mv: SlideMove,
    /// Whether the resulting board is the solved arrangement; the caller
    /// uses this to transition session status.
    pub solved: bool,
}

/// Derive the move for a requested cell, or None if the request is not
/// move-eligible.
pub fn plan(board: &Board, requested: Pos) -> Option<SlideMove> {
    if !requested.in_bounds() {
        return None;
    }

    let empty = board.empty_pos();
    if requested == empty {
        return None;
    }

    if requested.is_adjacent(empty) {
        let mut cells = ArrayVec::new();
        cells.push(requested);
        return Some(SlideMove {
            kind: MoveKind::Single,
            origin: requested,
            empty,
            cells,
        });
    }

    if !requested.in_line(empty) {
        return None;
    }

    // Walk from the empty cell toward the requested cell, collecting every
    // cell strictly between them plus the requested cell itself.
    let mut cells = ArrayVec::new();
    let mut cursor = empty;
    while cursor != requested {
        cursor = step_toward(cursor, requested);
        cells.push(cursor);
    }

    Some(SlideMove {
        kind: MoveKind::LineSlide,
        origin: requested,
        empty,
        cells,
    })
}

/// Validate and apply a move. None means the request was rejected and the
/// board is unchanged.
pub fn apply(board: &Board, requested: Pos) -> Option<MoveApplied> {
    let mv = plan(board, requested)?;
    let next = board.with_assignments(&mv.assignments(), mv.origin);
    let solved = next.is_solved();
    Some(MoveApplied {
        board: next,
        mv,
        solved,
    })
}

fn step_toward(from: Pos, to: Pos) -> Pos {
    if from.row == to.row {
        if to.col > from.col {
            Pos::new(from.row, from.col + 1)
        } else {
            Pos::new(from.row, from.col - 1)
        }
    } else if to.row > from.row {
        Pos::new(from.row + 1, from.col)
    } else {
        Pos::new(from.row - 1, from.col)
    }
}
