//! # List/Detail Controller
//!
//! Owns the search and detail tracks, issues catalog requests in response to
//! user intents and applies completions. Every issued request carries its
//! track's generation; a completion whose generation is no longer current is
//! discarded, so a late response can never overwrite state set by a newer
//! action. The two tracks are independent and may be in flight together.
//!
//! Catalog errors stop here: they are logged in full and replaced by one
//! generic message per track plus a [`Notice`].

use crate::browser::events::{Notice, Track};
use crate::browser::models::{Completion, ControllerState};
use crate::browser::services::{CatalogResponse, CatalogService};
use crate::catalog::{CatalogClient, MovieId};
use std::sync::Arc;
use thiserror::Error;

/// Rejected user input; never reaches the catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("search query is blank")]
    BlankQuery,
}

pub struct ListDetailController {
    state: ControllerState,
    service: CatalogService,
    notices: Vec<Notice>,
}

impl ListDetailController {
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        Self {
            state: ControllerState::new(),
            service: CatalogService::new(client),
            notices: Vec::new(),
        }
    }

    /// Read-only view of both tracks
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    // === Search Track ===

    /// Start a new search for `query`, page 1.
    ///
    /// Blank queries queue [`Notice::EmptyQuery`] and leave state untouched.
    pub fn submit_search(&mut self, query: &str) -> Result<(), ValidationError> {
        let query = query.trim();
        if query.is_empty() {
            tracing::debug!("Ignoring blank search query");
            self.notices.push(Notice::EmptyQuery);
            return Err(ValidationError::BlankQuery);
        }

        self.issue_search(query.to_string(), 1);
        Ok(())
    }

    /// Re-run the populated query for another page, replacing the results.
    ///
    /// The page is clamped to the known page range. Returns whether a
    /// request was issued.
    pub fn goto_page(&mut self, page: u32) -> bool {
        let (Some(info), Some(query)) = (self.state.page_info(), self.state.current_query())
        else {
            return false;
        };

        let target = page.clamp(1, info.total_pages.max(1));
        if target == info.page {
            return false;
        }
        let query = query.to_string();
        self.issue_search(query, target);
        true
    }

    pub fn next_page(&mut self) -> bool {
        match self.state.page_info() {
            Some(info) => self.goto_page(info.page.saturating_add(1)),
            None => false,
        }
    }

    pub fn previous_page(&mut self) -> bool {
        match self.state.page_info() {
            Some(info) => self.goto_page(info.page.saturating_sub(1)),
            None => false,
        }
    }

    fn issue_search(&mut self, query: String, page: u32) {
        let generation = self.state.begin_search(query.clone(), page);
        tracing::debug!("Search track entered Searching ({})", generation);
        self.service.search_async(generation, query, page);
    }

    // === Detail Track ===

    /// Open the overlay for `id` and fetch its details afresh
    pub fn select_item(&mut self, id: MovieId) {
        let generation = self.state.begin_detail(id);
        tracing::debug!("Detail track entered Loading for {} ({})", id, generation);
        self.service.detail_async(generation, id);
    }

    /// Close the overlay from any detail state
    pub fn close_detail(&mut self) {
        self.state.close_detail();
    }

    /// Clear failed tracks so the screen returns to a neutral state
    pub fn dismiss_error(&mut self) -> bool {
        self.state.dismiss_error()
    }

    // === Completions ===

    /// Apply one catalog completion, or discard it if superseded
    pub fn apply(&mut self, response: CatalogResponse) -> Completion {
        let track = response.track();
        let generation = response.generation();
        if !self.state.is_current(track, generation) {
            tracing::debug!("Discarding stale {} response ({})", track, generation);
            return Completion::Stale(track);
        }

        match response {
            CatalogResponse::Search {
                generation,
                query,
                page,
                result,
            } => {
                match &result {
                    Ok(found) if found.is_empty() => {
                        tracing::debug!("Search for '{}' returned no results", query);
                        self.notices.push(Notice::NoResults { query });
                    }
                    Ok(found) => {
                        tracing::debug!(
                            "Search for '{}' page {} returned {} of {} results",
                            query,
                            page,
                            found.results.len(),
                            found.total_results
                        );
                    }
                    Err(e) => {
                        tracing::error!("Search for '{}' page {} failed: {}", query, page, e);
                        self.notices.push(Notice::SearchFailed);
                    }
                }
                self.state.complete_search(generation, result)
            }
            CatalogResponse::Detail {
                generation,
                id,
                result,
            } => {
                if let Err(e) = &result {
                    tracing::error!("Detail lookup for movie {} failed: {}", id, e);
                    self.notices.push(Notice::DetailFailed);
                }
                self.state.complete_detail(generation, result)
            }
        }
    }

    /// Apply every completion that has already arrived. Returns how many were applied.
    pub fn poll_responses(&mut self) -> usize {
        let mut applied = 0;
        while let Some(response) = self.service.poll_response() {
            if self.apply(response).is_applied() {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next completion and apply it
    pub async fn wait_for_response(&mut self) -> Option<Completion> {
        let response = self.service.next_response().await?;
        Some(self.apply(response))
    }

    /// Whether either track is waiting on the catalog
    pub fn has_pending_requests(&self) -> bool {
        self.state.is_searching() || self.state.is_detail_loading()
    }

    pub fn is_pending(&self, track: Track) -> bool {
        match track {
            Track::Search => self.state.is_searching(),
            Track::Detail => self.state.is_detail_loading(),
        }
    }

    /// Drain the notices raised since the last call
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
