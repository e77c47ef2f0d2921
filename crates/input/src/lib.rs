//! Keyboard handling for the terminal front end.

pub mod map;

pub use map::{handle_key_event, should_quit, UiAction};
