//! # Command Events
//!
//! Events produced by commands that describe what should happen.
//! Commands produce these events, and the controller applies them to the ViewModel.

use crate::browser::events::{Focus, GridDirection};

/// Which way to turn the result page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Next,
    Previous,
}

/// Events that commands can produce to request changes
#[derive(Debug, Clone, PartialEq)]
pub enum CommandEvent {
    /// Append a character to the query line
    QueryCharRequested { ch: char },

    /// Delete the last character of the query line
    QueryBackspaceRequested,

    /// Submit the query line as a new search
    SearchSubmitRequested,

    /// Move input focus between the search bar and the grid
    FocusChangeRequested { focus: Focus },

    /// Move the grid cursor
    GridMoveRequested { direction: GridDirection },

    /// Open the detail overlay for the highlighted result
    ItemSelectRequested,

    /// Close the detail overlay
    DetailCloseRequested,

    /// Clear the current error on the focused track
    ErrorDismissRequested,

    /// Turn the result page
    PageChangeRequested { direction: PageDirection },

    /// Quit the application
    QuitRequested,
}

impl CommandEvent {
    pub fn grid_move(direction: GridDirection) -> Self {
        Self::GridMoveRequested { direction }
    }

    pub fn focus(focus: Focus) -> Self {
        Self::FocusChangeRequested { focus }
    }

    pub fn page(direction: PageDirection) -> Self {
        Self::PageChangeRequested { direction }
    }
}
