//! # Catalog Client
//!
//! Read-only access to the remote movie catalog: keyword search and
//! single-title detail lookup. Each call is one best-effort round trip.

use super::error::CatalogError;
use super::types::{DetailRecord, MovieId, SearchPage};
use crate::config::{AuthMode, CatalogConfig};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use serde::de::DeserializeOwned;

/// Remote catalog contract
///
/// Implementations are shared between the controller and the tasks that
/// run requests, hence `Send + Sync` and object safety.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Keyword search. Callers must not pass a blank query.
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, CatalogError>;

    /// Extended record for one title; unknown ids surface as a 404 API error.
    async fn get_detail(&self, id: MovieId) -> Result<DetailRecord, CatalogError>;
}

/// HTTP implementation of [`CatalogClient`] backed by reqwest
#[derive(Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    base_url: String,
    credential: String,
    auth_mode: AuthMode,
    language: String,
}

impl HttpCatalogClient {
    /// Create a client; credential, auth mode and locale are fixed from here on
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        tracing::debug!("Creating HttpCatalogClient for {}", config.base_url);

        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json;charset=utf-8"),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credential: config.credential.clone(),
            auth_mode: config.auth_mode,
            language: config.language.clone(),
        })
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, CatalogError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| CatalogError::Network(format!("invalid catalog URL: {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("language", &self.language);
            if self.auth_mode == AuthMode::QueryParameter {
                pairs.append_pair("api_key", &self.credential);
            }
        }
        Ok(url)
    }

    pub(crate) fn search_url(&self, query: &str, page: u32) -> Result<Url, CatalogError> {
        self.endpoint(
            "/search/movie",
            &[("query", query), ("page", &page.to_string())],
        )
    }

    pub(crate) fn detail_url(&self, id: MovieId) -> Result<Url, CatalogError> {
        self.endpoint(&format!("/movie/{id}"), &[])
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        // The query string may carry the credential, so only the path is logged
        let path = url.path().to_string();
        let mut request = self.http.get(url);
        if self.auth_mode == AuthMode::BearerToken {
            request = request.bearer_auth(&self.credential);
        }

        let start_time = std::time::Instant::now();
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(
            "GET {} -> {} in {}ms ({} bytes)",
            path,
            status.as_u16(),
            start_time.elapsed().as_millis(),
            body.len()
        );

        if !status.is_success() {
            return Err(CatalogError::from_status(status, &body));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, CatalogError> {
        let url = self.search_url(query, page)?;
        self.get_json(url).await
    }

    async fn get_detail(&self, id: MovieId) -> Result<DetailRecord, CatalogError> {
        let url = self.detail_url(id)?;
        self.get_json(url).await
    }
}
