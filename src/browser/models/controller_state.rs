//! # Controller State
//!
//! State of the two request tracks owned by the list/detail controller.
//! Each track is a single enum, so a track can never be loading and failed
//! at the same time, and results only exist in the populated state.

use super::generation::Generation;
use crate::browser::events::{Track, DETAIL_FAILED_MESSAGE, SEARCH_FAILED_MESSAGE};
use crate::catalog::{CatalogError, DetailRecord, MovieId, SearchPage, SearchResultItem};

/// Search track: `Idle → Searching → {Populated | Empty | Failed}`
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchOutcome {
    #[default]
    Idle,
    Searching {
        query: String,
        page: u32,
    },
    Populated {
        query: String,
        page: SearchPage,
    },
    Empty {
        query: String,
    },
    Failed {
        query: String,
        message: String,
    },
}

/// Detail track: `Closed → Loading → {Shown | Failed}`, back to `Closed` on dismiss
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailOutcome {
    #[default]
    Closed,
    Loading {
        id: MovieId,
    },
    Shown {
        record: DetailRecord,
    },
    Failed {
        id: MovieId,
        message: String,
    },
}

/// Paging metadata of the populated page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
}

/// Result of offering a completion to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The completion belonged to the current generation and was applied
    Applied(Track),
    /// The completion was superseded and discarded
    Stale(Track),
}

impl Completion {
    pub fn is_applied(&self) -> bool {
        matches!(self, Completion::Applied(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ControllerState {
    search: SearchOutcome,
    search_generation: Generation,
    detail: DetailOutcome,
    detail_generation: Generation,
}

impl ControllerState {
    pub fn new() -> Self {
        Self::default()
    }

    // === Search Track ===

    /// Enter `Searching`, closing any open overlay first
    pub fn begin_search(&mut self, query: String, page: u32) -> Generation {
        self.close_detail();
        self.search = SearchOutcome::Searching { query, page };
        self.search_generation.advance()
    }

    /// Apply a search completion if it belongs to the current generation
    pub fn complete_search(
        &mut self,
        generation: Generation,
        result: Result<SearchPage, CatalogError>,
    ) -> Completion {
        if !self.is_current(Track::Search, generation) {
            return Completion::Stale(Track::Search);
        }
        let SearchOutcome::Searching { query, .. } = &self.search else {
            return Completion::Stale(Track::Search);
        };
        let query = query.clone();

        self.search = match result {
            Ok(page) if page.is_empty() => SearchOutcome::Empty { query },
            Ok(page) => SearchOutcome::Populated { query, page },
            Err(_) => SearchOutcome::Failed {
                query,
                message: SEARCH_FAILED_MESSAGE.to_string(),
            },
        };
        Completion::Applied(Track::Search)
    }

    // === Detail Track ===

    /// Enter `Loading` for `id`, discarding any previous detail state
    pub fn begin_detail(&mut self, id: MovieId) -> Generation {
        self.detail = DetailOutcome::Loading { id };
        self.detail_generation.advance()
    }

    /// Apply a detail completion if it belongs to the current generation
    pub fn complete_detail(
        &mut self,
        generation: Generation,
        result: Result<DetailRecord, CatalogError>,
    ) -> Completion {
        if !self.is_current(Track::Detail, generation) {
            return Completion::Stale(Track::Detail);
        }
        let DetailOutcome::Loading { id } = self.detail else {
            return Completion::Stale(Track::Detail);
        };

        self.detail = match result {
            Ok(record) => DetailOutcome::Shown { record },
            Err(_) => DetailOutcome::Failed {
                id,
                message: DETAIL_FAILED_MESSAGE.to_string(),
            },
        };
        Completion::Applied(Track::Detail)
    }

    /// Return to `Closed` from any detail state; in-flight lookups become stale
    pub fn close_detail(&mut self) {
        if self.detail != DetailOutcome::Closed {
            self.detail_generation.advance();
        }
        self.detail = DetailOutcome::Closed;
    }

    /// Clear a failed search or a failed detail lookup. Returns whether anything changed.
    pub fn dismiss_error(&mut self) -> bool {
        let mut changed = false;
        if matches!(self.search, SearchOutcome::Failed { .. }) {
            self.search = SearchOutcome::Idle;
            changed = true;
        }
        if matches!(self.detail, DetailOutcome::Failed { .. }) {
            self.close_detail();
            changed = true;
        }
        changed
    }

    /// Whether a completion tagged `generation` may still update `track`
    pub fn is_current(&self, track: Track, generation: Generation) -> bool {
        match track {
            Track::Search => {
                generation == self.search_generation
                    && matches!(self.search, SearchOutcome::Searching { .. })
            }
            Track::Detail => {
                generation == self.detail_generation
                    && matches!(self.detail, DetailOutcome::Loading { .. })
            }
        }
    }

    // === Accessors ===

    pub fn search_outcome(&self) -> &SearchOutcome {
        &self.search
    }

    pub fn detail_outcome(&self) -> &DetailOutcome {
        &self.detail
    }

    pub fn search_generation(&self) -> Generation {
        self.search_generation
    }

    pub fn detail_generation(&self) -> Generation {
        self.detail_generation
    }

    /// Current result list; empty unless the search track is populated
    pub fn results(&self) -> &[SearchResultItem] {
        match &self.search {
            SearchOutcome::Populated { page, .. } => &page.results,
            _ => &[],
        }
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.search, SearchOutcome::Searching { .. })
    }

    pub fn search_error(&self) -> Option<&str> {
        match &self.search {
            SearchOutcome::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Query of the latest search, whatever its outcome
    pub fn current_query(&self) -> Option<&str> {
        match &self.search {
            SearchOutcome::Idle => None,
            SearchOutcome::Searching { query, .. }
            | SearchOutcome::Populated { query, .. }
            | SearchOutcome::Empty { query }
            | SearchOutcome::Failed { query, .. } => Some(query),
        }
    }

    pub fn page_info(&self) -> Option<PageInfo> {
        match &self.search {
            SearchOutcome::Populated { page, .. } => Some(PageInfo {
                page: page.page,
                total_pages: page.total_pages,
                total_results: page.total_results,
            }),
            _ => None,
        }
    }

    /// Selected item; presence means the overlay is open
    pub fn selected_id(&self) -> Option<MovieId> {
        match &self.detail {
            DetailOutcome::Closed => None,
            DetailOutcome::Loading { id } | DetailOutcome::Failed { id, .. } => Some(*id),
            DetailOutcome::Shown { record } => Some(record.id()),
        }
    }

    pub fn is_overlay_open(&self) -> bool {
        self.selected_id().is_some()
    }

    pub fn detail(&self) -> Option<&DetailRecord> {
        match &self.detail {
            DetailOutcome::Shown { record } => Some(record),
            _ => None,
        }
    }

    pub fn is_detail_loading(&self) -> bool {
        matches!(self.detail, DetailOutcome::Loading { .. })
    }

    pub fn detail_error(&self) -> Option<&str> {
        match &self.detail {
            DetailOutcome::Failed { message, .. } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::mock::{sample_detail, sample_item, sample_page};

    fn network_error() -> CatalogError {
        CatalogError::Network("connection reset".to_string())
    }

    #[test]
    fn new_state_should_be_idle_and_closed() {
        let state = ControllerState::new();

        assert_eq!(state.search_outcome(), &SearchOutcome::Idle);
        assert_eq!(state.detail_outcome(), &DetailOutcome::Closed);
        assert!(state.results().is_empty());
        assert!(!state.is_searching());
        assert_eq!(state.search_error(), None);
        assert_eq!(state.selected_id(), None);
    }

    #[test]
    fn search_should_populate_in_server_order() {
        let mut state = ControllerState::new();
        let generation = state.begin_search("batman".to_string(), 1);
        assert!(state.is_searching());

        let page = sample_page(vec![sample_item(268, "Batman"), sample_item(272, "Batman Begins")]);
        let completion = state.complete_search(generation, Ok(page));

        assert_eq!(completion, Completion::Applied(Track::Search));
        let ids: Vec<_> = state.results().iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![268, 272]);
        assert!(!state.is_searching());
        assert_eq!(state.search_error(), None);
        assert_eq!(
            state.page_info(),
            Some(PageInfo {
                page: 1,
                total_pages: 1,
                total_results: 2
            })
        );
    }

    #[test]
    fn zero_results_should_be_empty_not_failed() {
        let mut state = ControllerState::new();
        let generation = state.begin_search("zzzznotfound".to_string(), 1);

        state.complete_search(generation, Ok(SearchPage::empty()));

        assert_eq!(
            state.search_outcome(),
            &SearchOutcome::Empty {
                query: "zzzznotfound".to_string()
            }
        );
        assert_eq!(state.search_error(), None);
    }

    #[test]
    fn failed_search_should_clear_previous_results() {
        let mut state = ControllerState::new();
        let first = state.begin_search("batman".to_string(), 1);
        state.complete_search(first, Ok(sample_page(vec![sample_item(268, "Batman")])));

        let second = state.begin_search("robin".to_string(), 1);
        assert!(state.results().is_empty());
        state.complete_search(second, Err(network_error()));

        assert!(state.results().is_empty());
        assert_eq!(state.search_error(), Some(SEARCH_FAILED_MESSAGE));
        assert_eq!(state.current_query(), Some("robin"));
    }

    #[test]
    fn superseded_search_completion_should_be_stale() {
        let mut state = ControllerState::new();
        let first = state.begin_search("a".to_string(), 1);
        let second = state.begin_search("b".to_string(), 1);

        let page_b = sample_page(vec![sample_item(2, "B")]);
        assert!(state.complete_search(second, Ok(page_b)).is_applied());

        let page_a = sample_page(vec![sample_item(1, "A")]);
        assert_eq!(
            state.complete_search(first, Ok(page_a)),
            Completion::Stale(Track::Search)
        );
        assert_eq!(state.results()[0].id, 2);
    }

    #[test]
    fn begin_search_should_close_overlay_and_stale_its_lookup() {
        let mut state = ControllerState::new();
        let detail = state.begin_detail(550);

        state.begin_search("batman".to_string(), 1);

        assert_eq!(state.selected_id(), None);
        assert_eq!(
            state.complete_detail(detail, Ok(sample_detail(550, "Fight Club"))),
            Completion::Stale(Track::Detail)
        );
        assert_eq!(state.detail(), None);
    }

    #[test]
    fn detail_should_show_record_for_selected_id() {
        let mut state = ControllerState::new();
        let generation = state.begin_detail(550);
        assert!(state.is_detail_loading());
        assert_eq!(state.selected_id(), Some(550));

        state.complete_detail(generation, Ok(sample_detail(550, "Fight Club")));

        assert_eq!(state.selected_id(), Some(550));
        assert_eq!(state.detail().map(DetailRecord::id), Some(550));
        assert!(!state.is_detail_loading());
    }

    #[test]
    fn reselecting_should_discard_previous_lookup() {
        let mut state = ControllerState::new();
        let first = state.begin_detail(1);
        let second = state.begin_detail(2);

        assert!(!state
            .complete_detail(first, Ok(sample_detail(1, "A")))
            .is_applied());
        assert!(state.is_detail_loading());
        assert!(state
            .complete_detail(second, Ok(sample_detail(2, "B")))
            .is_applied());
        assert_eq!(state.selected_id(), Some(2));
    }

    #[test]
    fn detail_failure_should_keep_selection_with_generic_message() {
        let mut state = ControllerState::new();
        let generation = state.begin_detail(7);

        state.complete_detail(generation, Err(network_error()));

        assert_eq!(state.selected_id(), Some(7));
        assert_eq!(state.detail_error(), Some(DETAIL_FAILED_MESSAGE));
        assert_eq!(state.detail(), None);
    }

    #[test]
    fn close_detail_should_be_idempotent() {
        let mut state = ControllerState::new();
        let generation = state.begin_detail(550);
        state.complete_detail(generation, Ok(sample_detail(550, "Fight Club")));

        state.close_detail();
        let after_once = state.detail_outcome().clone();
        let generation_once = state.detail_generation();
        state.close_detail();

        assert_eq!(after_once, DetailOutcome::Closed);
        assert_eq!(state.detail_outcome(), &DetailOutcome::Closed);
        assert_eq!(state.detail_generation(), generation_once);
        assert_eq!(state.selected_id(), None);
    }

    #[test]
    fn dismiss_error_should_reset_failed_tracks() {
        let mut state = ControllerState::new();
        let search = state.begin_search("x".to_string(), 1);
        state.complete_search(search, Err(network_error()));
        let detail = state.begin_detail(3);
        state.complete_detail(detail, Err(network_error()));

        assert!(state.dismiss_error());

        assert_eq!(state.search_outcome(), &SearchOutcome::Idle);
        assert_eq!(state.detail_outcome(), &DetailOutcome::Closed);
        assert!(!state.dismiss_error());
    }
}
