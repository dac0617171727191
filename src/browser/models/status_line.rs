//! # Status Line Model
//!
//! Encapsulates all state related to the status line display,
//! providing a clean interface for status bar rendering.

use crate::browser::events::{Focus, Notice};
use crate::config::DEFAULT_PROFILE_PATH;

/// Status line model containing all status bar display state
#[derive(Debug, Clone)]
pub struct StatusLine {
    /// Latest transient notice, replaced by the next one
    notice: Option<Notice>,

    /// Profile name and path
    profile_name: String,
    profile_path: String,

    /// Current input focus
    focus: Focus,

    /// Whether any catalog request is in flight
    is_busy: bool,
}

impl StatusLine {
    /// Create a new StatusLine with default values
    pub fn new() -> Self {
        Self {
            notice: None,
            profile_name: "default".to_string(),
            profile_path: DEFAULT_PROFILE_PATH.to_string(),
            focus: Focus::SearchBar,
            is_busy: false,
        }
    }

    // === Notice Methods ===

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    // === Profile Methods ===

    /// Set profile information
    pub fn set_profile(&mut self, name: String, path: String) {
        self.profile_name = name;
        self.profile_path = path;
    }

    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    pub fn profile_path(&self) -> &str {
        &self.profile_path
    }

    // === Focus & Activity ===

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.is_busy = busy;
    }

    pub fn is_busy(&self) -> bool {
        self.is_busy
    }

    /// Key hints for the current focus
    pub fn key_hints(&self) -> &'static str {
        match self.focus {
            Focus::SearchBar => "Enter search  Tab results  Ctrl+C quit",
            Focus::Grid => "Enter details  / search  n/p page  x dismiss  q quit",
            Focus::Overlay => "Esc close  x dismiss",
        }
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new()
    }
}
