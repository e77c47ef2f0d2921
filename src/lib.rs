//! TUI Fifteen (workspace facade crate).
//!
//! This package keeps a stable `tui_fifteen::{core,engine,session,store,term,input,types}`
//! public API while the implementation lives in dedicated crates under `crates/`.

pub use tui_fifteen_core as core;
pub use tui_fifteen_engine as engine;
pub use tui_fifteen_input as input;
pub use tui_fifteen_session as session;
pub use tui_fifteen_store as store;
pub use tui_fifteen_term as term;
pub use tui_fifteen_types as types;
