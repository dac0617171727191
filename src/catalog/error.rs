//! # Catalog Errors
//!
//! Failure taxonomy for catalog round trips.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The request never produced a response (connection, TLS, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// The catalog answered with a non-2xx status
    #[error("catalog rejected request ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected shape
    #[error("could not decode catalog response: {0}")]
    Decode(String),
}

impl CatalogError {
    /// Build an API error from a status code and the raw response body.
    ///
    /// The catalog reports failures as `{"status_code": .., "status_message": ..}`;
    /// bodies without that shape fall back to the canonical reason phrase.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            status_message: String,
        }

        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|parsed| parsed.status_message)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string()
            });

        CatalogError::Api {
            status: status.as_u16(),
            message,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::Api { status: 404, .. })
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(error: reqwest::Error) -> Self {
        // Request URLs may carry the api_key query parameter
        let error = error.without_url();
        if error.is_timeout() {
            CatalogError::Network(format!("request timed out: {error}"))
        } else {
            CatalogError::Network(error.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(error: serde_json::Error) -> Self {
        CatalogError::Decode(error.to_string())
    }
}
