//! Movie catalog domain model.
//!
//! These types mirror the TMDB v3 JSON documents the plugin consumes. Every
//! optional field degrades to a default instead of failing deserialization, so a
//! sparse record never takes down a whole page of results.

use serde::{Deserialize, Serialize};

/// Site name TMDB uses for YouTube-hosted videos.
const YOUTUBE_SITE: &str = "YouTube";

/// Video type TMDB uses for official trailers.
const TRAILER_TYPE: &str = "Trailer";

/// One movie in a listing.
///
/// Immutable once received; lives for a single render pass of the card list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// A genre from the catalog (`/genre/movie/list`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// Response body of `/genre/movie/list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// One page of a discovery or search listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultPage {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<MovieSummary>,
    /// Upstream page count. TMDB reports `0` for an empty listing.
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_results: Option<u64>,
}

const fn first_page() -> u32 {
    1
}

/// A video attached to a movie (trailer, teaser, clip...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl Video {
    #[must_use]
    pub fn is_youtube(&self) -> bool {
        self.site == YOUTUBE_SITE
    }

    #[must_use]
    pub fn is_youtube_trailer(&self) -> bool {
        self.is_youtube() && self.kind == TRAILER_TYPE
    }
}

/// Response body of `/movie/{id}/videos`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

impl VideoList {
    /// Picks the video to play on hover.
    ///
    /// The first YouTube trailer wins; otherwise the first YouTube video of any
    /// type. Videos hosted elsewhere are never chosen.
    ///
    /// # Examples
    ///
    /// ```
    /// use cinescope::domain::{Video, VideoList};
    ///
    /// let list = VideoList {
    ///     results: vec![
    ///         Video { key: "clip".into(), name: String::new(), site: "YouTube".into(), kind: "Clip".into() },
    ///         Video { key: "trl".into(), name: String::new(), site: "YouTube".into(), kind: "Trailer".into() },
    ///     ],
    /// };
    /// assert_eq!(list.pick_trailer().map(|v| v.key.as_str()), Some("trl"));
    /// ```
    #[must_use]
    pub fn pick_trailer(&self) -> Option<&Video> {
        self.results
            .iter()
            .find(|v| v.is_youtube_trailer())
            .or_else(|| self.results.iter().find(|v| v.is_youtube()))
    }
}
