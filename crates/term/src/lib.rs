//! Terminal front end: a pure board view plus a thin renderer.

pub mod renderer;
pub mod view;

pub use renderer::Screen;
pub use view::{encode_into, format_clock, ViewState};
