//! # Events Module
//!
//! Re-exports all event system components organized by category.

pub mod notices;
pub mod types;
pub mod view_events;

pub use notices::{Notice, DETAIL_FAILED_MESSAGE, SEARCH_FAILED_MESSAGE};
pub use types::{Focus, GridDirection, Track};
pub use view_events::ViewEvent;
