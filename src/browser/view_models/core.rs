//! # Core ViewModel Structure
//!
//! Presentation state around the list/detail controller: the query input
//! line, input focus, the grid cursor, the status line and the queue of
//! pending view events. All catalog state lives in the controller; this
//! layer only reads it.

use super::list_detail::ListDetailController;
use crate::browser::events::{Focus, GridDirection, ViewEvent};
use crate::browser::models::{Completion, ControllerState, StatusLine};
use crate::catalog::{CatalogClient, ImageResolver, SearchResultItem};
use std::sync::Arc;

/// Width of one result card in the grid, including its gutter
pub const CARD_WIDTH: u16 = 30;

pub struct ViewModel {
    controller: ListDetailController,
    images: ImageResolver,
    query_input: String,
    focus: Focus,
    grid_cursor: usize,
    terminal_size: (u16, u16),
    status_line: StatusLine,
    pending_view_events: Vec<ViewEvent>,
}

impl ViewModel {
    pub fn new(client: Arc<dyn CatalogClient>, images: ImageResolver) -> Self {
        Self {
            controller: ListDetailController::new(client),
            images,
            query_input: String::new(),
            focus: Focus::SearchBar,
            grid_cursor: 0,
            terminal_size: (80, 24),
            status_line: StatusLine::new(),
            pending_view_events: Vec::new(),
        }
    }

    // === Read Access ===

    pub fn controller(&self) -> &ListDetailController {
        &self.controller
    }

    pub fn state(&self) -> &ControllerState {
        self.controller.state()
    }

    pub fn images(&self) -> &ImageResolver {
        &self.images
    }

    pub fn query_input(&self) -> &str {
        &self.query_input
    }

    /// Effective focus; the overlay takes focus while an item is selected
    pub fn focus(&self) -> Focus {
        if self.state().is_overlay_open() {
            Focus::Overlay
        } else {
            self.focus
        }
    }

    pub fn grid_cursor(&self) -> usize {
        self.grid_cursor
    }

    /// Result under the grid cursor
    pub fn highlighted_result(&self) -> Option<&SearchResultItem> {
        self.state().results().get(self.grid_cursor)
    }

    pub fn status_line(&self) -> &StatusLine {
        &self.status_line
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Number of cards per grid row at the current width
    pub fn grid_columns(&self) -> usize {
        (self.terminal_size.0 / CARD_WIDTH).max(1) as usize
    }

    pub fn set_profile_info(&mut self, name: String, path: String) {
        self.status_line.set_profile(name, path);
    }

    pub fn update_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        self.emit_view_event([ViewEvent::FullRedrawRequired]);
    }

    // === Query Input ===

    pub fn insert_query_char(&mut self, ch: char) {
        self.query_input.push(ch);
        self.emit_view_event([ViewEvent::SearchBarUpdateRequired]);
    }

    pub fn backspace_query(&mut self) {
        if self.query_input.pop().is_some() {
            self.emit_view_event([ViewEvent::SearchBarUpdateRequired]);
        }
    }

    /// Submit the input line as a new search.
    ///
    /// A valid query clears the input line and moves focus to the grid; a
    /// blank one only raises a notice.
    pub fn submit_query(&mut self) {
        let query = self.query_input.clone();
        match self.controller.submit_search(&query) {
            Ok(()) => {
                self.query_input.clear();
                self.grid_cursor = 0;
                self.focus = Focus::Grid;
                self.emit_view_event([ViewEvent::FullRedrawRequired]);
            }
            Err(e) => {
                tracing::debug!("Search not submitted: {}", e);
                self.emit_view_event([ViewEvent::StatusBarUpdateRequired]);
            }
        }
        self.sync_with_controller();
    }

    /// Submit a query without going through the input line
    pub fn search(&mut self, query: &str) {
        self.query_input = query.to_string();
        self.submit_query();
    }

    // === Grid & Overlay ===

    pub fn set_focus(&mut self, focus: Focus) {
        if focus == Focus::Overlay || self.focus == focus {
            return;
        }
        self.focus = focus;
        self.status_line.set_focus(self.focus());
        self.emit_view_event([
            ViewEvent::SearchBarUpdateRequired,
            ViewEvent::BodyRedrawRequired,
            ViewEvent::StatusBarUpdateRequired,
        ]);
    }

    pub fn move_grid_cursor(&mut self, direction: GridDirection) {
        let count = self.state().results().len();
        if count == 0 {
            return;
        }
        let columns = self.grid_columns();
        let last = count - 1;
        let cursor = self.grid_cursor.min(last);

        let target = match direction {
            GridDirection::Left => cursor.saturating_sub(1),
            GridDirection::Right => (cursor + 1).min(last),
            GridDirection::Up => cursor.checked_sub(columns).unwrap_or(cursor),
            GridDirection::Down => {
                if cursor + columns <= last {
                    cursor + columns
                } else {
                    cursor
                }
            }
            GridDirection::First => 0,
            GridDirection::Last => last,
        };

        if target != self.grid_cursor {
            self.grid_cursor = target;
            self.emit_view_event([ViewEvent::BodyRedrawRequired]);
        }
    }

    /// Open the overlay for the highlighted result
    pub fn open_highlighted(&mut self) {
        let Some(id) = self.highlighted_result().map(|item| item.id) else {
            return;
        };
        self.controller.select_item(id);
        self.emit_view_event([ViewEvent::FullRedrawRequired]);
        self.sync_with_controller();
    }

    pub fn close_overlay(&mut self) {
        if !self.state().is_overlay_open() {
            return;
        }
        self.controller.close_detail();
        self.emit_view_event([ViewEvent::FullRedrawRequired]);
        self.sync_with_controller();
    }

    pub fn dismiss_error(&mut self) {
        let had_overlay = self.state().is_overlay_open();
        if self.controller.dismiss_error() {
            self.status_line.clear_notice();
            let event = if had_overlay != self.state().is_overlay_open() {
                ViewEvent::FullRedrawRequired
            } else {
                ViewEvent::BodyRedrawRequired
            };
            self.emit_view_event([event, ViewEvent::StatusBarUpdateRequired]);
        }
        self.sync_with_controller();
    }

    pub fn next_page(&mut self) {
        if self.controller.next_page() {
            self.grid_cursor = 0;
            self.emit_view_event([ViewEvent::BodyRedrawRequired]);
        }
        self.sync_with_controller();
    }

    pub fn previous_page(&mut self) {
        if self.controller.previous_page() {
            self.grid_cursor = 0;
            self.emit_view_event([ViewEvent::BodyRedrawRequired]);
        }
        self.sync_with_controller();
    }

    // === Catalog Completions ===

    /// Apply completions that already arrived. Returns how many changed state.
    pub fn poll_catalog(&mut self) -> usize {
        let was_searching = self.state().is_searching();
        let was_loading = self.state().is_detail_loading();

        let applied = self.controller.poll_responses();
        if applied > 0 {
            self.after_completion(was_searching, was_loading);
        }
        applied
    }

    /// Wait for the next completion and apply it
    pub async fn wait_for_catalog(&mut self) -> Option<Completion> {
        let was_searching = self.state().is_searching();
        let was_loading = self.state().is_detail_loading();

        let completion = self.controller.wait_for_response().await?;
        if completion.is_applied() {
            self.after_completion(was_searching, was_loading);
        }
        Some(completion)
    }

    fn after_completion(&mut self, was_searching: bool, was_loading: bool) {
        if was_searching && !self.state().is_searching() {
            self.grid_cursor = 0;
            self.emit_view_event([
                ViewEvent::BodyRedrawRequired,
                ViewEvent::SearchBarUpdateRequired,
            ]);
        }
        if was_loading && !self.state().is_detail_loading() {
            self.emit_view_event([ViewEvent::OverlayRedrawRequired]);
        }
        self.sync_with_controller();
    }

    /// Pull notices and activity from the controller into the status line
    fn sync_with_controller(&mut self) {
        let notices = self.controller.take_notices();
        let has_notice = !notices.is_empty();
        for notice in notices {
            tracing::debug!("Notice: {}", notice);
            self.status_line.set_notice(notice);
        }

        let busy = self.controller.has_pending_requests();
        let focus = self.focus();
        if has_notice || busy != self.status_line.is_busy() || focus != self.status_line.focus() {
            self.status_line.set_busy(busy);
            self.status_line.set_focus(focus);
            self.emit_view_event([ViewEvent::StatusBarUpdateRequired]);
        }
    }

    // === View Events ===

    /// Queue view events, skipping ones an already queued event covers
    pub fn emit_view_event(&mut self, events: impl IntoIterator<Item = ViewEvent>) {
        for event in events {
            if !self
                .pending_view_events
                .iter()
                .any(|pending| pending.supersedes(&event))
            {
                self.pending_view_events.push(event);
            }
        }
    }

    pub fn collect_pending_view_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.pending_view_events)
    }
}
