//! Move engine - validates and applies player-requested moves.
//!
//! A request names a cell; the engine derives the move from the current
//! board, it is never stored. Rejection (clicking the hole, or a cell not in
//! line with it) is a no-op signal, not an error: the caller simply ignores
//! the click.

pub mod slide;

pub use slide::{apply, plan, MoveApplied, SlideMove};
