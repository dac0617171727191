//! # Grid and Overlay Commands
//!
//! Cursor movement over the result grid, paging, opening and closing the
//! detail overlay and dismissing errors.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent, PageDirection};
use crate::browser::events::{Focus, GridDirection};

fn in_grid(context: &CommandContext, event: &KeyEvent) -> bool {
    context.focus() == Focus::Grid
        && !event.modifiers.contains(KeyModifiers::CONTROL)
        && !event.modifiers.contains(KeyModifiers::ALT)
}

fn grid_direction(code: KeyCode) -> Option<GridDirection> {
    match code {
        KeyCode::Left | KeyCode::Char('h') => Some(GridDirection::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(GridDirection::Right),
        KeyCode::Up | KeyCode::Char('k') => Some(GridDirection::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(GridDirection::Down),
        KeyCode::Home | KeyCode::Char('g') => Some(GridDirection::First),
        KeyCode::End | KeyCode::Char('G') => Some(GridDirection::Last),
        _ => None,
    }
}

/// Move the grid cursor (arrows, hjkl, Home/End, g/G)
pub struct GridMoveCommand;

impl Command for GridMoveCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        in_grid(context, event) && grid_direction(event.code).is_some()
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(grid_direction(event.code)
            .map(CommandEvent::grid_move)
            .into_iter()
            .collect())
    }

    fn name(&self) -> &'static str {
        "GridMove"
    }
}

/// Open the detail overlay for the highlighted result (Enter)
pub struct SelectItemCommand;

impl Command for SelectItemCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        in_grid(context, event) && event.code == KeyCode::Enter
    }

    fn execute(&self, _event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        if context.state.has_results {
            Ok(vec![CommandEvent::ItemSelectRequested])
        } else {
            Ok(Vec::new())
        }
    }

    fn name(&self) -> &'static str {
        "SelectItem"
    }
}

/// Return to the search bar (/ or Tab)
pub struct FocusSearchCommand;

impl Command for FocusSearchCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        in_grid(context, event) && matches!(event.code, KeyCode::Char('/') | KeyCode::Tab)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::focus(Focus::SearchBar)])
    }

    fn name(&self) -> &'static str {
        "FocusSearch"
    }
}

/// Turn the result page (n/p, PageDown/PageUp)
pub struct PageCommand;

impl PageCommand {
    fn direction(code: KeyCode) -> Option<PageDirection> {
        match code {
            KeyCode::Char('n') | KeyCode::PageDown => Some(PageDirection::Next),
            KeyCode::Char('p') | KeyCode::PageUp => Some(PageDirection::Previous),
            _ => None,
        }
    }
}

impl Command for PageCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        in_grid(context, event) && Self::direction(event.code).is_some()
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(Self::direction(event.code)
            .map(CommandEvent::page)
            .into_iter()
            .collect())
    }

    fn name(&self) -> &'static str {
        "Page"
    }
}

/// Dismiss the current error (x) from the grid or the overlay
pub struct DismissErrorCommand;

impl Command for DismissErrorCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(context.focus(), Focus::Grid | Focus::Overlay)
            && event.code == KeyCode::Char('x')
            && event.modifiers.is_empty()
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::ErrorDismissRequested])
    }

    fn name(&self) -> &'static str {
        "DismissError"
    }
}

/// Close the detail overlay (Esc, q, Enter or Backspace)
pub struct CloseDetailCommand;

impl Command for CloseDetailCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.focus() == Focus::Overlay
            && matches!(
                event.code,
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter | KeyCode::Backspace
            )
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::DetailCloseRequested])
    }

    fn name(&self) -> &'static str {
        "CloseDetail"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::commands::test_support::{context, key};

    #[test]
    fn grid_move_should_map_arrows_and_vim_keys() {
        let ctx = context(Focus::Grid);
        let cases = [
            (KeyCode::Left, GridDirection::Left),
            (KeyCode::Char('l'), GridDirection::Right),
            (KeyCode::Up, GridDirection::Up),
            (KeyCode::Char('j'), GridDirection::Down),
            (KeyCode::Home, GridDirection::First),
            (KeyCode::Char('G'), GridDirection::Last),
        ];
        for (code, direction) in cases {
            assert!(GridMoveCommand.is_relevant(&ctx, &key(code)));
            assert_eq!(
                GridMoveCommand.execute(key(code), &ctx).unwrap(),
                vec![CommandEvent::grid_move(direction)]
            );
        }
    }

    #[test]
    fn select_should_do_nothing_without_results() {
        let mut ctx = context(Focus::Grid);
        ctx.state.has_results = false;

        assert!(SelectItemCommand.is_relevant(&ctx, &key(KeyCode::Enter)));
        assert!(SelectItemCommand
            .execute(key(KeyCode::Enter), &ctx)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn page_keys_should_request_page_turns() {
        let ctx = context(Focus::Grid);
        assert_eq!(
            PageCommand.execute(key(KeyCode::Char('n')), &ctx).unwrap(),
            vec![CommandEvent::page(PageDirection::Next)]
        );
        assert_eq!(
            PageCommand.execute(key(KeyCode::PageUp), &ctx).unwrap(),
            vec![CommandEvent::page(PageDirection::Previous)]
        );
        assert!(!PageCommand.is_relevant(&context(Focus::SearchBar), &key(KeyCode::Char('n'))));
    }

    #[test]
    fn close_detail_should_only_apply_to_overlay() {
        let overlay = context(Focus::Overlay);
        for code in [KeyCode::Esc, KeyCode::Char('q'), KeyCode::Enter, KeyCode::Backspace] {
            assert!(CloseDetailCommand.is_relevant(&overlay, &key(code)));
        }
        assert!(!CloseDetailCommand.is_relevant(&context(Focus::Grid), &key(KeyCode::Esc)));
    }

    #[test]
    fn dismiss_should_apply_to_grid_and_overlay() {
        let event = key(KeyCode::Char('x'));
        assert!(DismissErrorCommand.is_relevant(&context(Focus::Grid), &event));
        assert!(DismissErrorCommand.is_relevant(&context(Focus::Overlay), &event));
        assert!(!DismissErrorCommand.is_relevant(&context(Focus::SearchBar), &event));
    }
}
