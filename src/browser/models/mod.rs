//! # Models
//!
//! Plain state containers with no I/O: the controller's track state, the
//! generation counter and the status line.

pub mod controller_state;
pub mod generation;
pub mod status_line;

pub use controller_state::{Completion, ControllerState, DetailOutcome, PageInfo, SearchOutcome};
pub use generation::Generation;
pub use status_line::StatusLine;
