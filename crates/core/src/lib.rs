//! Core puzzle logic - pure, deterministic, and testable.
//!
//! This crate contains the board model, the solvability check, and the
//! shuffle generator. It has **zero dependencies** on UI, persistence, or
//! I/O, making it:
//!
//! - **Deterministic**: the same seed produces the identical shuffle
//! - **Testable**: every rule is exercised by unit tests
//! - **Portable**: runs headless, in a terminal, or under a bench harness
//!
//! # Module Structure
//!
//! - [`board`]: immutable 4x4 board value type with the empty-cell position
//! - [`solvable`]: closed-form parity test for reachability from solved
//! - [`shuffle`]: random-walk generator of guaranteed-solvable boards
//! - [`rng`]: small seeded LCG backing the shuffle walk
//!
//! # Example
//!
//! ```
//! use tui_fifteen_core::{is_solvable, Shuffler};
//!
//! let mut shuffler = Shuffler::new(12345);
//! let board = shuffler.generate();
//! assert!(is_solvable(&board));
//! assert!(!board.is_solved());
//! ```

pub mod board;
pub mod rng;
pub mod shuffle;
pub mod solvable;

pub use tui_fifteen_types as types;

// Re-export commonly used items for convenience
pub use board::Board;
pub use rng::SimpleRng;
pub use shuffle::Shuffler;
pub use solvable::is_solvable;
