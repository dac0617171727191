//! # cinescope - Terminal Movie Browser
//!
//! Search a remote movie catalog, page through the results as a grid of
//! cards and open any title for its details.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    Events    ┌──────────────┐   Completions  ┌──────────────┐
//! │    View     │◄─────────────│  ViewModel   │◄───────────────│   Catalog    │
//! │             │              │              │                │              │
//! │ - Terminal  │              │ - List/detail│   Requests     │ - HTTP client│
//! │ - Rendering │              │   controller │───────────────▶│ - tokio tasks│
//! │ - Overlay   │              │ - Focus      │                │              │
//! └─────────────┘              └──────────────┘                └──────────────┘
//!                                      ▲
//!                                      │ Commands
//!                                      ▼
//!                               ┌──────────────┐
//!                               │  Controller  │
//!                               │ - Key map    │
//!                               │ - Event loop │
//!                               └──────────────┘
//! ```
//!
//! Search and detail lookups run concurrently. Each track carries a
//! generation counter, so a response that arrives after the user moved on
//! is dropped instead of overwriting newer state.

pub mod browser;
pub mod catalog;
pub mod cmd_args;
pub mod config;
pub mod logging;

pub use browser::{AppController, ListDetailController, ViewModel};
pub use catalog::{CatalogClient, CatalogError, HttpCatalogClient, MockCatalog};
pub use config::{AuthMode, CatalogConfig, ConfigError};
