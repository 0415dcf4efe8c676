//! Typed listing queries and their TMDB query parameters.

use chrono::NaiveDate;

/// Sort orders used by discovery requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    PopularityDesc,
    VoteAverageDesc,
    ReleaseDateAsc,
    ReleaseDateDesc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PopularityDesc => "popularity.desc",
            Self::VoteAverageDesc => "vote_average.desc",
            Self::ReleaseDateAsc => "primary_release_date.asc",
            Self::ReleaseDateDesc => "primary_release_date.desc",
        }
    }
}

/// Filters for `/discover/movie`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverParams {
    pub page: u32,
    pub sort_by: SortOrder,
    pub min_vote_count: Option<u32>,
    pub release_from: Option<NaiveDate>,
    pub release_to: Option<NaiveDate>,
    pub genre: Option<u32>,
}

impl DiscoverParams {
    /// Renders the filters as query parameters, in a stable order.
    #[must_use]
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("sort_by".to_string(), self.sort_by.as_str().to_string()),
        ];
        if let Some(count) = self.min_vote_count {
            params.push(("vote_count.gte".to_string(), count.to_string()));
        }
        if let Some(from) = self.release_from {
            params.push(("primary_release_date.gte".to_string(), iso_date(from)));
        }
        if let Some(to) = self.release_to {
            params.push(("primary_release_date.lte".to_string(), iso_date(to)));
        }
        if let Some(genre) = self.genre {
            params.push(("with_genres".to_string(), genre.to_string()));
        }
        params
    }
}

/// A movie listing request derived from the view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieQuery {
    /// Free-text title search (`/search/movie`), adult titles excluded.
    Search { query: String, page: u32 },
    /// Filtered, sorted listing (`/discover/movie`).
    Discover(DiscoverParams),
}

fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
