//! Markdown rendering of a note tree.

mod renderer;

pub use renderer::{DEFAULT_TITLE, Renderer};
