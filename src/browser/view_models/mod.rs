//! # ViewModel Module
//!
//! The list/detail controller owns catalog state and the two request
//! tracks; the ViewModel layers input focus, the query line and the grid
//! cursor on top of it.

mod core;
pub mod list_detail;

pub use core::{ViewModel, CARD_WIDTH};
pub use list_detail::{ListDetailController, ValidationError};
