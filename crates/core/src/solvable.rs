//! Solvability check - reachability from the canonical solved arrangement.
//!
//! For a 4-wide board the 15-puzzle group action admits a closed-form parity
//! invariant: flatten the non-zero tiles row-major, count inversions (pairs
//! appearing out of solved order), and take the 0-based row of the empty
//! cell. The arrangement is reachable from solved iff exactly one of
//! {empty-row parity, inversion parity} is odd:
//!
//! - empty row even (0 or 2)  -> solvable iff inversions odd
//! - empty row odd  (1 or 3)  -> solvable iff inversions even
//!
//! This is O(n^2) over the 15 tiles, not a search; at n = 15 a merge-sort
//! inversion count would be a pessimization.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::Tile;

/// True iff `board` is reachable from the solved board via legal moves.
pub fn is_solvable(board: &Board) -> bool {
    let mut tiles: ArrayVec<Tile, 15> = ArrayVec::new();
    let mut empty_row = 0u8;

    for (r, row) in board.grid().iter().enumerate() {
        for &tile in row {
            if tile == 0 {
                empty_row = r as u8;
            } else {
                tiles.push(tile);
            }
        }
    }

    let mut inversions = 0u32;
    for i in 0..tiles.len() {
        for j in (i + 1)..tiles.len() {
            if tiles[i] > tiles[j] {
                inversions += 1;
            }
        }
    }

    (empty_row % 2 == 0) == (inversions % 2 == 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Pos;

    #[test]
    fn test_solved_board_is_solvable() {
        // Zero inversions, empty row 3 (odd): solvable.
        assert!(is_solvable(&Board::solved()));
    }

    #[test]
    fn test_single_transposition_is_not_solvable() {
        // Swapping two adjacent tiles flips inversion parity without moving
        // the empty cell, which makes the board unreachable.
        let mut grid = *Board::solved().grid();
        grid[0].swap(0, 1);
        let board = Board::from_grid(grid).unwrap();
        assert!(!is_solvable(&board));
    }

    #[test]
    fn test_known_solvable_arrangement() {
        // 12 sits before 13, 14, 15 -> 3 inversions (odd); empty row 2
        // (even) -> solvable.
        let board = Board::from_grid([
            [1, 2, 3, 4],
            [5, 6, 7, 8],
            [9, 10, 11, 0],
            [13, 14, 15, 12],
        ])
        .unwrap();
        assert_eq!(board.empty_pos(), Pos::new(2, 3));
        assert!(is_solvable(&board));
    }

    #[test]
    fn test_legal_move_preserves_solvability() {
        let mut board = Board::solved();
        for neighbor in [Pos::new(2, 3), Pos::new(2, 2), Pos::new(1, 2)] {
            board = board.with_tile_into_empty(neighbor);
            assert!(is_solvable(&board));
        }
    }
}
