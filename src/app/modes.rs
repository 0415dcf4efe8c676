//! Input and listing status enums.
//!
//! [`InputMode`] decides how keys are interpreted: in `Browse` every key is a
//! command, in `SearchTyping` printable keys go into the search box.
//! [`ListingStatus`] tracks the movie request that fills the grid.

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Navigation and control keys (`g`, `f`, `h`, `l`, `j`, `k`, ...).
    #[default]
    Browse,

    /// Keys edit the search box. Submission is debounced.
    SearchTyping,
}

/// State of the grid's movie request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingStatus {
    /// Request in flight (or waiting for permissions).
    #[default]
    Loading,

    /// Cards reflect the latest response.
    Loaded,

    /// The latest request failed; the grid shows the failure placeholder and
    /// pagination is hidden.
    Failed,
}
