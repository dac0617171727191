//! # Terminal Renderer
//!
//! Draws the ViewModel onto a [`RenderStream`].
//!
//! ```text
//! row 0        search bar
//! row 1        result header ("Found N movies.", page) or hint
//! rows 2..h-1  result grid, loader or error message
//! row h-1      status bar
//! ```
//!
//! The detail overlay is drawn centered on top of the body while an item
//! is selected.

use super::text::{fit, truncate, wrap};
use crate::browser::events::{Focus, ViewEvent};
use crate::browser::io::RenderStream;
use crate::browser::models::{DetailOutcome, SearchOutcome};
use crate::browser::view_models::{ViewModel, CARD_WIDTH};
use crate::catalog::{DetailRecord, SearchResultItem};
use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use unicode_width::UnicodeWidthStr;

const SEARCH_PROMPT: &str = " Search › ";
const SEARCH_PLACEHOLDER: &str = "Search movies...";
const START_HINT: &str = "Enter a keyword to search for movies.";
const LOADING_TEXT: &str = "Loading...";
const SEARCH_ERROR_TEXT: &str = "There was an error, please try again...";
const GRID_TOP: u16 = 3;
const CARD_HEIGHT: u16 = 4;

/// Trait for rendering views
pub trait ViewRenderer {
    /// Prepare the terminal for drawing
    fn initialize(&mut self) -> Result<()>;

    fn render_full(&mut self, view_model: &ViewModel) -> Result<()>;

    fn render_search_bar(&mut self, view_model: &ViewModel) -> Result<()>;

    /// Header row plus grid, loader, hint or error
    fn render_body(&mut self, view_model: &ViewModel) -> Result<()>;

    /// Detail overlay; draws nothing while no item is selected
    fn render_overlay(&mut self, view_model: &ViewModel) -> Result<()>;

    fn render_status_bar(&mut self, view_model: &ViewModel) -> Result<()>;

    fn handle_view_event(&mut self, event: &ViewEvent, view_model: &ViewModel) -> Result<()>;

    /// Restore the terminal on exit
    fn cleanup(&mut self) -> Result<()>;
}

/// Renderer that owns the render stream
pub struct TerminalRenderer<RS: RenderStream> {
    render_stream: RS,
    terminal_size: (u16, u16),
}

impl<RS: RenderStream> TerminalRenderer<RS> {
    pub fn with_render_stream(render_stream: RS) -> Result<Self> {
        let terminal_size = render_stream.get_size()?;
        Ok(Self {
            render_stream,
            terminal_size,
        })
    }

    pub fn update_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    fn width(&self) -> usize {
        self.terminal_size.0 as usize
    }

    fn status_row(&self) -> u16 {
        self.terminal_size.1.saturating_sub(1)
    }

    /// Overwrite a whole row with `text`
    fn print_row(&mut self, row: u16, text: &str) -> Result<()> {
        let line = fit(text, self.width());
        queue!(self.render_stream, MoveTo(0, row), Print(line))?;
        Ok(())
    }

    fn clear_body(&mut self) -> Result<()> {
        for row in 1..self.status_row() {
            self.print_row(row, "")?;
        }
        Ok(())
    }

    /// Leave the terminal cursor at the end of the query when typing
    fn place_cursor(&mut self, view_model: &ViewModel) -> Result<()> {
        if view_model.focus() == Focus::SearchBar {
            let column = UnicodeWidthStr::width(SEARCH_PROMPT)
                + UnicodeWidthStr::width(view_model.query_input());
            let column = column.min(self.width().saturating_sub(1)) as u16;
            queue!(self.render_stream, MoveTo(column, 0), Show)?;
        } else {
            queue!(self.render_stream, Hide)?;
        }
        Ok(())
    }

    fn finish(&mut self, view_model: &ViewModel) -> Result<()> {
        self.place_cursor(view_model)?;
        self.render_stream.flush()?;
        Ok(())
    }

    fn draw_message(&mut self, text: &str, color: Option<Color>) -> Result<()> {
        let line = truncate(text, self.width().saturating_sub(2));
        queue!(self.render_stream, MoveTo(1, GRID_TOP))?;
        if let Some(color) = color {
            queue!(self.render_stream, SetForegroundColor(color))?;
        }
        queue!(self.render_stream, Print(line), ResetColor)?;
        Ok(())
    }

    fn draw_grid(&mut self, view_model: &ViewModel, results: &[SearchResultItem]) -> Result<()> {
        let columns = view_model.grid_columns();
        let body_rows = self.status_row().saturating_sub(GRID_TOP);
        let visible_rows = (body_rows / CARD_HEIGHT).max(1) as usize;

        // Scroll so the highlighted card's row stays visible
        let cursor_row = view_model.grid_cursor() / columns;
        let first_row = cursor_row.saturating_sub(visible_rows - 1);
        let highlight = (view_model.focus() == Focus::Grid).then(|| view_model.grid_cursor());

        for (index, item) in results.iter().enumerate() {
            let grid_row = index / columns;
            if grid_row < first_row || grid_row >= first_row + visible_rows {
                continue;
            }
            let x = (index % columns) as u16 * CARD_WIDTH;
            let y = GRID_TOP + (grid_row - first_row) as u16 * CARD_HEIGHT;
            self.draw_card(x, y, item, highlight == Some(index))?;
        }
        Ok(())
    }

    fn draw_card(&mut self, x: u16, y: u16, item: &SearchResultItem, highlighted: bool) -> Result<()> {
        let inner = CARD_WIDTH.saturating_sub(2) as usize;

        queue!(self.render_stream, MoveTo(x, y))?;
        if highlighted {
            queue!(self.render_stream, SetAttribute(Attribute::Reverse))?;
        }
        queue!(
            self.render_stream,
            SetAttribute(Attribute::Bold),
            Print(fit(&item.title, inner)),
            SetAttribute(Attribute::Reset)
        )?;

        let year = item.release_year().unwrap_or("----");
        let meta = format!("{year}  ★ {:.1}", item.vote_average);
        queue!(
            self.render_stream,
            MoveTo(x, y + 1),
            SetForegroundColor(Color::DarkGrey),
            Print(fit(&meta, inner)),
            ResetColor
        )?;

        let overview = item.overview.lines().next().unwrap_or("");
        queue!(
            self.render_stream,
            MoveTo(x, y + 2),
            Print(fit(overview, inner))
        )?;
        Ok(())
    }

    fn overlay_lines(view_model: &ViewModel, inner: usize) -> Vec<(String, Option<Color>)> {
        let mut lines = Vec::new();
        match view_model.state().detail_outcome() {
            DetailOutcome::Closed => {}
            DetailOutcome::Loading { .. } => {
                lines.push((LOADING_TEXT.to_string(), None));
            }
            DetailOutcome::Failed { message, .. } => {
                lines.push((message.clone(), Some(Color::Red)));
                lines.push((String::new(), None));
                lines.push(("x dismiss  Esc close".to_string(), Some(Color::DarkGrey)));
            }
            DetailOutcome::Shown { record } => {
                lines.extend(Self::detail_lines(view_model, record, inner));
            }
        }
        lines
    }

    fn detail_lines(
        view_model: &ViewModel,
        record: &DetailRecord,
        inner: usize,
    ) -> Vec<(String, Option<Color>)> {
        let summary = &record.summary;
        let mut lines = vec![(record.title().to_string(), Some(Color::Cyan))];
        if let Some(tagline) = record.tagline.as_deref().filter(|t| !t.is_empty()) {
            lines.push((format!("\"{tagline}\""), Some(Color::DarkGrey)));
        }
        lines.push((String::new(), None));

        let mut facts = Vec::new();
        if !summary.release_date.is_empty() {
            facts.push(format!("Release: {}", summary.release_date));
        }
        if let Some(runtime) = record.formatted_runtime() {
            facts.push(format!("Runtime: {runtime}"));
        }
        facts.push(format!("Rating: {:.1}/10", summary.vote_average));
        lines.push((facts.join("   "), None));

        if !record.genres.is_empty() {
            lines.push((format!("Genres: {}", record.genre_names()), None));
        }
        lines.push((String::new(), None));

        for line in wrap(&summary.overview, inner) {
            lines.push((line, None));
        }
        lines.push((String::new(), None));

        let images = view_model.images();
        lines.push((
            format!("Backdrop: {}", images.backdrop_url(record.backdrop_path.as_deref())),
            Some(Color::DarkGrey),
        ));
        lines.push((
            format!("Poster: {}", images.poster_url(summary.poster_path.as_deref())),
            Some(Color::DarkGrey),
        ));
        lines
    }
}

impl<RS: RenderStream> ViewRenderer for TerminalRenderer<RS> {
    fn initialize(&mut self) -> Result<()> {
        self.render_stream.enable_raw_mode()?;
        self.render_stream.enter_alternate_screen()?;
        self.render_stream.hide_cursor()?;
        self.render_stream.clear_screen()?;
        Ok(())
    }

    fn render_full(&mut self, view_model: &ViewModel) -> Result<()> {
        self.render_stream.clear_screen()?;
        self.render_search_bar(view_model)?;
        self.render_body(view_model)?;
        self.render_status_bar(view_model)?;
        self.render_overlay(view_model)?;
        self.finish(view_model)
    }

    fn render_search_bar(&mut self, view_model: &ViewModel) -> Result<()> {
        let focused = view_model.focus() == Focus::SearchBar;
        let input = view_model.query_input();
        let available = self
            .width()
            .saturating_sub(UnicodeWidthStr::width(SEARCH_PROMPT));

        queue!(self.render_stream, MoveTo(0, 0))?;
        if focused {
            queue!(self.render_stream, SetAttribute(Attribute::Bold))?;
        }
        queue!(
            self.render_stream,
            SetForegroundColor(Color::Blue),
            Print(SEARCH_PROMPT),
            ResetColor,
            SetAttribute(Attribute::Reset)
        )?;

        if input.is_empty() {
            queue!(
                self.render_stream,
                SetForegroundColor(Color::DarkGrey),
                Print(fit(SEARCH_PLACEHOLDER, available)),
                ResetColor
            )?;
        } else {
            queue!(self.render_stream, Print(fit(input, available)))?;
        }
        self.finish(view_model)
    }

    fn render_body(&mut self, view_model: &ViewModel) -> Result<()> {
        self.clear_body()?;

        match view_model.state().search_outcome() {
            SearchOutcome::Idle | SearchOutcome::Empty { .. } => {
                self.draw_message(START_HINT, Some(Color::DarkGrey))?;
            }
            SearchOutcome::Searching { .. } => {
                self.draw_message(LOADING_TEXT, Some(Color::Yellow))?;
            }
            SearchOutcome::Failed { .. } => {
                self.draw_message(SEARCH_ERROR_TEXT, Some(Color::Red))?;
            }
            SearchOutcome::Populated { page, .. } => {
                let mut header = format!(" Found {} movies.", page.results.len());
                if page.total_pages > 1 {
                    header.push_str(&format!(
                        "   Page {} of {} ({} total)",
                        page.page, page.total_pages, page.total_results
                    ));
                }
                self.print_row(1, &header)?;
                self.draw_grid(view_model, &page.results)?;
            }
        }

        if view_model.state().is_overlay_open() {
            self.render_overlay(view_model)?;
        }
        self.finish(view_model)
    }

    fn render_overlay(&mut self, view_model: &ViewModel) -> Result<()> {
        if !view_model.state().is_overlay_open() {
            return Ok(());
        }

        let (width, height) = self.terminal_size;
        let box_width = width.saturating_sub(8).clamp(20, 76).min(width);
        let box_height = height.saturating_sub(4).clamp(6, 20).min(height);
        let left = (width - box_width) / 2;
        let top = (height - box_height) / 2;
        let inner = box_width.saturating_sub(4) as usize;
        let horizontal = "─".repeat(box_width.saturating_sub(2) as usize);

        let content = Self::overlay_lines(view_model, inner);
        let content_rows = box_height.saturating_sub(2) as usize;

        queue!(
            self.render_stream,
            MoveTo(left, top),
            Print(format!("┌{horizontal}┐"))
        )?;
        for row in 0..content_rows {
            let y = top + 1 + row as u16;
            queue!(self.render_stream, MoveTo(left, y), Print("│ "))?;
            match content.get(row) {
                Some((text, color)) => {
                    if let Some(color) = color {
                        queue!(self.render_stream, SetForegroundColor(*color))?;
                    }
                    queue!(self.render_stream, Print(fit(text, inner)), ResetColor)?;
                }
                None => {
                    queue!(self.render_stream, Print(" ".repeat(inner)))?;
                }
            }
            queue!(self.render_stream, Print(" │"))?;
        }
        queue!(
            self.render_stream,
            MoveTo(left, top + box_height.saturating_sub(1)),
            Print(format!("└{horizontal}┘"))
        )?;
        self.finish(view_model)
    }

    fn render_status_bar(&mut self, view_model: &ViewModel) -> Result<()> {
        let status = view_model.status_line();
        let width = self.width();

        let (left, color) = match status.notice() {
            Some(notice) if notice.is_error() => (format!(" {notice}"), Color::Red),
            Some(notice) => (format!(" {notice}"), Color::Yellow),
            None if status.is_busy() => (format!(" {LOADING_TEXT}"), Color::Yellow),
            None => (String::new(), Color::Reset),
        };
        // Notices win over key hints when both do not fit
        let mut right = format!("{}  [{}] ", status.key_hints(), status.profile_name());
        if UnicodeWidthStr::width(left.as_str()) + UnicodeWidthStr::width(right.as_str()) > width {
            right = format!("[{}] ", status.profile_name());
        }

        let right_width = UnicodeWidthStr::width(right.as_str()).min(width);
        let left_width = width - right_width;
        let status_row = self.status_row();

        queue!(
            self.render_stream,
            MoveTo(0, status_row),
            SetAttribute(Attribute::Reverse),
            SetForegroundColor(color),
            Print(fit(&left, left_width)),
            ResetColor,
            SetAttribute(Attribute::Reverse),
            Print(fit(&right, right_width)),
            SetAttribute(Attribute::Reset)
        )?;
        self.finish(view_model)
    }

    fn handle_view_event(&mut self, event: &ViewEvent, view_model: &ViewModel) -> Result<()> {
        match event {
            ViewEvent::FullRedrawRequired => self.render_full(view_model),
            ViewEvent::SearchBarUpdateRequired => self.render_search_bar(view_model),
            ViewEvent::BodyRedrawRequired => self.render_body(view_model),
            ViewEvent::OverlayRedrawRequired => self.render_overlay(view_model),
            ViewEvent::StatusBarUpdateRequired => self.render_status_bar(view_model),
        }
    }

    fn cleanup(&mut self) -> Result<()> {
        self.render_stream.show_cursor()?;
        self.render_stream.leave_alternate_screen()?;
        self.render_stream.disable_raw_mode()?;
        self.render_stream.flush()?;
        Ok(())
    }
}
