//! # View Events
//!
//! Events emitted when parts of the screen need repainting.

/// Events emitted when view updates are needed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// Full screen redraw required (terminal resize, overlay opened or closed)
    FullRedrawRequired,

    /// The query input line changed
    SearchBarUpdateRequired,

    /// Result grid, loader or error message changed
    BodyRedrawRequired,

    /// Detail overlay content changed
    OverlayRedrawRequired,

    /// Status bar needs updating
    StatusBarUpdateRequired,
}

impl ViewEvent {
    /// Whether this event already covers `other`
    pub fn supersedes(&self, other: &ViewEvent) -> bool {
        *self == ViewEvent::FullRedrawRequired || self == other
    }
}
