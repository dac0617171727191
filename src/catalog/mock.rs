//! # Mock Catalog for Testing
//!
//! Scripted implementation of [`CatalogClient`] for tests without network
//! access. Responses are canned per query or id, calls are counted, and
//! gates can hold a response back so tests control completion order.

use super::client::CatalogClient;
use super::error::CatalogError;
use super::types::{DetailRecord, Genre, MovieId, SearchPage, SearchResultItem};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Semaphore;

type Gate = Arc<Semaphore>;

/// A poisoned lock only means another test thread already panicked
fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Scripted catalog
///
/// Unscripted queries answer with an empty page; unscripted ids answer
/// with a 404 API error, as the real catalog does.
#[derive(Default)]
pub struct MockCatalog {
    pages: Mutex<HashMap<(String, u32), SearchPage>>,
    search_errors: Mutex<HashMap<String, CatalogError>>,
    details: Mutex<HashMap<MovieId, Result<DetailRecord, CatalogError>>>,
    search_gates: Mutex<HashMap<String, Gate>>,
    detail_gates: Mutex<HashMap<MovieId, Gate>>,
    searched: Mutex<Vec<(String, u32)>>,
    search_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `query` with `page` for that page's number
    pub fn with_search_page(self, query: &str, page: SearchPage) -> Self {
        locked(&self.pages).insert((query.to_string(), page.page), page);
        self
    }

    /// Fail every page of `query` with `error`
    pub fn with_search_error(self, query: &str, error: CatalogError) -> Self {
        locked(&self.search_errors).insert(query.to_string(), error);
        self
    }

    pub fn with_detail(self, record: DetailRecord) -> Self {
        locked(&self.details).insert(record.id(), Ok(record));
        self
    }

    pub fn with_detail_error(self, id: MovieId, error: CatalogError) -> Self {
        locked(&self.details).insert(id, Err(error));
        self
    }

    /// Hold back responses for `query` until [`release_search`](Self::release_search)
    pub fn gate_search(&self, query: &str) {
        locked(&self.search_gates).insert(query.to_string(), Arc::new(Semaphore::new(0)));
    }

    /// Let one held-back response for `query` through
    pub fn release_search(&self, query: &str) {
        if let Some(gate) = locked(&self.search_gates).get(query) {
            gate.add_permits(1);
        }
    }

    pub fn gate_detail(&self, id: MovieId) {
        locked(&self.detail_gates).insert(id, Arc::new(Semaphore::new(0)));
    }

    pub fn release_detail(&self, id: MovieId) {
        if let Some(gate) = locked(&self.detail_gates).get(&id) {
            gate.add_permits(1);
        }
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    /// Every `(query, page)` the catalog was asked for, in call order
    pub fn searched(&self) -> Vec<(String, u32)> {
        locked(&self.searched).clone()
    }

    async fn pass_gate(gate: Option<Gate>) {
        if let Some(gate) = gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
    }
}

#[async_trait]
impl CatalogClient for MockCatalog {
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, CatalogError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        locked(&self.searched).push((query.to_string(), page));

        let gate = locked(&self.search_gates).get(query).cloned();
        Self::pass_gate(gate).await;

        if let Some(error) = locked(&self.search_errors).get(query) {
            return Err(error.clone());
        }
        let scripted = locked(&self.pages)
            .get(&(query.to_string(), page))
            .cloned();
        Ok(scripted.unwrap_or_else(SearchPage::empty))
    }

    async fn get_detail(&self, id: MovieId) -> Result<DetailRecord, CatalogError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);

        let gate = locked(&self.detail_gates).get(&id).cloned();
        Self::pass_gate(gate).await;

        let scripted = locked(&self.details).get(&id).cloned();
        scripted.unwrap_or_else(|| {
            Err(CatalogError::Api {
                status: 404,
                message: "The resource you requested could not be found.".to_string(),
            })
        })
    }
}

/// Summary record with plausible field values
pub fn sample_item(id: MovieId, title: &str) -> SearchResultItem {
    SearchResultItem {
        id,
        title: title.to_string(),
        overview: format!("Overview of {title}."),
        poster_path: Some(format!("/poster-{id}.jpg")),
        release_date: "1999-10-15".to_string(),
        vote_average: 7.5,
    }
}

/// Single page holding `results`
pub fn sample_page(results: Vec<SearchResultItem>) -> SearchPage {
    let total_results = results.len() as u32;
    SearchPage {
        page: 1,
        results,
        total_pages: 1,
        total_results,
    }
}

/// Detail record built on [`sample_item`]
pub fn sample_detail(id: MovieId, title: &str) -> DetailRecord {
    DetailRecord {
        summary: sample_item(id, title),
        runtime: Some(139),
        genres: vec![Genre {
            id: 18,
            name: "Drama".to_string(),
        }],
        tagline: Some("Mischief. Mayhem. Soap.".to_string()),
        backdrop_path: Some(format!("/backdrop-{id}.jpg")),
    }
}
