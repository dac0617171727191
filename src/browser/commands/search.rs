//! # Search Bar Commands
//!
//! Editing and submitting the query line.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent};
use crate::browser::events::Focus;

fn in_search_bar(context: &CommandContext) -> bool {
    context.focus() == Focus::SearchBar
}

/// Type a character into the query line
pub struct QueryCharCommand;

impl Command for QueryCharCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        in_search_bar(context)
            && matches!(event.code, KeyCode::Char(_))
            && !event.modifiers.contains(KeyModifiers::CONTROL)
            && !event.modifiers.contains(KeyModifiers::ALT)
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        match event.code {
            KeyCode::Char(ch) => Ok(vec![CommandEvent::QueryCharRequested { ch }]),
            _ => Ok(Vec::new()),
        }
    }

    fn name(&self) -> &'static str {
        "QueryChar"
    }
}

/// Delete the last character of the query line (Backspace)
pub struct QueryBackspaceCommand;

impl Command for QueryBackspaceCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        in_search_bar(context) && event.code == KeyCode::Backspace
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::QueryBackspaceRequested])
    }

    fn name(&self) -> &'static str {
        "QueryBackspace"
    }
}

/// Submit the query line (Enter)
pub struct SubmitSearchCommand;

impl Command for SubmitSearchCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        in_search_bar(context) && event.code == KeyCode::Enter
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::SearchSubmitRequested])
    }

    fn name(&self) -> &'static str {
        "SubmitSearch"
    }
}

/// Move focus from the search bar to the grid (Tab, Down or Esc)
pub struct LeaveSearchBarCommand;

impl Command for LeaveSearchBarCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        in_search_bar(context) && matches!(event.code, KeyCode::Tab | KeyCode::Down | KeyCode::Esc)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::focus(Focus::Grid)])
    }

    fn name(&self) -> &'static str {
        "LeaveSearchBar"
    }
}
