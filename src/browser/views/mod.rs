//! # Views Module
//!
//! Terminal rendering of the search bar, result grid, detail overlay and
//! status bar.

pub mod terminal_renderer;
mod text;

pub use terminal_renderer::{TerminalRenderer, ViewRenderer};
