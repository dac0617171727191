//! # Services Layer
//!
//! Services encapsulate access to external resources so the view models
//! only deal with state transitions.

pub mod catalog;

pub use catalog::{CatalogResponse, CatalogService};
