//! # Command Context
//!
//! Read-only snapshot of ViewModel state handed to commands.

use crate::browser::events::Focus;
use crate::browser::view_models::ViewModel;

/// Read-only snapshot of ViewModel state for commands
#[derive(Debug, Clone)]
pub struct ViewModelSnapshot {
    pub focus: Focus,
    pub query_input: String,
    pub has_results: bool,
    pub has_error: bool,
    pub terminal_dimensions: (u16, u16),
}

impl ViewModelSnapshot {
    /// Create snapshot from current ViewModel state
    pub fn from_view_model(view_model: &ViewModel) -> Self {
        let state = view_model.state();
        Self {
            focus: view_model.focus(),
            query_input: view_model.query_input().to_string(),
            has_results: !state.results().is_empty(),
            has_error: state.search_error().is_some() || state.detail_error().is_some(),
            terminal_dimensions: view_model.terminal_size(),
        }
    }
}

/// Base context available to all commands
pub struct CommandContext {
    pub state: ViewModelSnapshot,
}

impl CommandContext {
    pub fn new(state: ViewModelSnapshot) -> Self {
        Self { state }
    }

    pub fn focus(&self) -> Focus {
        self.state.focus
    }
}
