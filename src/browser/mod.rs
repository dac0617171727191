//! # Movie Browser
//!
//! Terminal front end over the catalog, laid out MVVM style:
//!
//! ```text
//! EventStream ──▶ AppController ──▶ CommandRegistry ──▶ CommandEvent
//!                      │                                    │
//!                      ▼                                    ▼
//!               TerminalRenderer ◀── ViewEvent ◀── ViewModel ──▶ ListDetailController
//!                      │                                              │
//!                      ▼                                              ▼
//!                RenderStream                              CatalogService (tokio tasks)
//! ```

pub mod commands;
pub mod controllers;
pub mod events;
pub mod io;
pub mod models;
pub mod services;
pub mod view_models;
pub mod views;

pub use controllers::AppController;
pub use events::{Focus, Notice, Track, ViewEvent};
pub use io::{EventStream, RenderStream};
pub use models::{Completion, ControllerState, DetailOutcome, SearchOutcome};
pub use services::{CatalogResponse, CatalogService};
pub use view_models::{ListDetailController, ValidationError, ViewModel};
pub use views::{TerminalRenderer, ViewRenderer};
