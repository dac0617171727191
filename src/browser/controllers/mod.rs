//! # Controllers
//!
//! The application controller runs the event loop and connects key input,
//! commands, the ViewModel and the renderer.

pub mod app_controller;

pub use app_controller::AppController;
