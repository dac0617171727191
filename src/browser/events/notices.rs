//! # Notices
//!
//! Transient messages raised by the list/detail controller for the status
//! line. They never carry raw transport errors.

use std::fmt;

/// User-facing message for a failed search
pub const SEARCH_FAILED_MESSAGE: &str = "An unexpected error occurred during search.";

/// User-facing message for a failed detail lookup
pub const DETAIL_FAILED_MESSAGE: &str = "Failed to load movie details.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A blank query was submitted
    EmptyQuery,
    /// A search succeeded with zero results
    NoResults { query: String },
    SearchFailed,
    DetailFailed,
}

impl Notice {
    /// Error notices are styled differently from informational ones
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::SearchFailed | Notice::DetailFailed)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::EmptyQuery => write!(f, "Please enter your search query."),
            Notice::NoResults { query } => {
                write!(f, "No movies found for your request: \"{query}\"")
            }
            Notice::SearchFailed => write!(f, "{SEARCH_FAILED_MESSAGE}"),
            Notice::DetailFailed => write!(f, "{DETAIL_FAILED_MESSAGE}"),
        }
    }
}
