//! # Catalog Service
//!
//! Runs catalog requests off the event loop and hands completions back.

use crate::browser::events::Track;
use crate::browser::models::Generation;
use crate::catalog::{CatalogClient, CatalogError, DetailRecord, MovieId, SearchPage};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Message type for async catalog completions
#[derive(Debug)]
pub enum CatalogResponse {
    Search {
        generation: Generation,
        query: String,
        page: u32,
        result: Result<SearchPage, CatalogError>,
    },
    Detail {
        generation: Generation,
        id: MovieId,
        result: Result<DetailRecord, CatalogError>,
    },
}

impl CatalogResponse {
    pub fn track(&self) -> Track {
        match self {
            CatalogResponse::Search { .. } => Track::Search,
            CatalogResponse::Detail { .. } => Track::Detail,
        }
    }

    pub fn generation(&self) -> Generation {
        match self {
            CatalogResponse::Search { generation, .. }
            | CatalogResponse::Detail { generation, .. } => *generation,
        }
    }
}

/// Service for running catalog requests as background tasks
///
/// Each request runs in its own tokio task tagged with the generation of
/// the track that issued it. Superseded tasks are not aborted; their
/// completions are discarded by the controller.
pub struct CatalogService {
    client: Arc<dyn CatalogClient>,
    /// Channel for receiving async catalog completions
    response_receiver: mpsc::Receiver<CatalogResponse>,
    /// Channel sender cloned into each request task
    response_sender: mpsc::Sender<CatalogResponse>,
    /// Spawned tasks whose completion has not been received yet
    in_flight: usize,
}

impl CatalogService {
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        let (response_sender, response_receiver) = mpsc::channel(16);
        Self {
            client,
            response_receiver,
            response_sender,
            in_flight: 0,
        }
    }

    /// Number of requests still waiting for a completion
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Spawn a keyword search tagged with `generation`
    pub fn search_async(&mut self, generation: Generation, query: String, page: u32) {
        let client = Arc::clone(&self.client);
        let result_sender = self.response_sender.clone();

        tracing::info!("Searching catalog for '{}' page {} ({})", query, page, generation);
        self.in_flight += 1;
        tokio::spawn(async move {
            let result = client.search(&query, page).await;
            // Ignore send errors (receiver might have been dropped)
            let _ = result_sender
                .send(CatalogResponse::Search {
                    generation,
                    query,
                    page,
                    result,
                })
                .await;
        });
    }

    /// Spawn a detail lookup tagged with `generation`
    pub fn detail_async(&mut self, generation: Generation, id: MovieId) {
        let client = Arc::clone(&self.client);
        let result_sender = self.response_sender.clone();

        tracing::info!("Fetching details for movie {} ({})", id, generation);
        self.in_flight += 1;
        tokio::spawn(async move {
            let result = client.get_detail(id).await;
            let _ = result_sender
                .send(CatalogResponse::Detail {
                    generation,
                    id,
                    result,
                })
                .await;
        });
    }

    /// Check if there are any pending completions (non-blocking)
    pub fn poll_response(&mut self) -> Option<CatalogResponse> {
        let response = self.response_receiver.try_recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(response)
    }

    /// Wait for the next completion
    ///
    /// Returns `None` right away when no request is outstanding.
    pub async fn next_response(&mut self) -> Option<CatalogResponse> {
        if self.in_flight == 0 {
            return None;
        }
        let response = self.response_receiver.recv().await?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(response)
    }
}
