//! # Catalog Access
//!
//! Typed client for the remote movie catalog.
//!
//! ```text
//! ListDetailController ──▶ CatalogService ──▶ Arc<dyn CatalogClient>
//!                                               ├─ HttpCatalogClient ──▶ reqwest ──▶ catalog API
//!                                               └─ MockCatalog       ──▶ scripted responses
//! ```

pub mod client;
pub mod error;
pub mod images;
pub mod mock;
pub mod types;

pub use client::{CatalogClient, HttpCatalogClient};
pub use error::CatalogError;
pub use images::{ImageKind, ImageResolver};
pub use mock::MockCatalog;
pub use types::{DetailRecord, Genre, MovieId, SearchPage, SearchResultItem};
