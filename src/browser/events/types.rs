//! # Core Event Types
//!
//! Common types shared by commands, view models and views.

/// Which part of the screen receives key input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Focus {
    /// The query input line
    #[default]
    SearchBar,
    /// The result grid
    Grid,
    /// The detail overlay (only while an item is selected)
    Overlay,
}

/// Movement inside the result grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridDirection {
    Left,
    Right,
    Up,
    Down,
    First,
    Last,
}

/// The two independent request tracks of the list/detail controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    Search,
    Detail,
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Track::Search => write!(f, "search"),
            Track::Detail => write!(f, "detail"),
        }
    }
}
