//! Domain layer for the Cinescope plugin.
//!
//! This module contains the core domain types, independent of Zellij-specific
//! APIs or infrastructure concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Movie, genre and video records as served by TMDB
//! - [`locale`]: Localized UI strings and release date formatting

pub mod error;
pub mod locale;
pub mod movie;

pub use error::{CinescopeError, Result};
pub use locale::{DateStyle, Locale};
pub use movie::{Genre, GenreList, MovieSummary, ResultPage, Video, VideoList};
