//! Listing state and its pure transitions.
//!
//! [`ViewState`] holds what is being browsed: `{page, total_pages, genre, query,
//! mode}`. It is a plain value. Every transition consumes the current state and
//! returns the next one, and [`ViewState::movie_query`] derives the remote
//! request from a state snapshot. Nothing here performs I/O or reads the clock;
//! "today" is passed in by the caller.
//!
//! # Invariant
//!
//! `1 <= page <= total_pages <= MAX_TOTAL_PAGES` holds after every transition.

use crate::api::query::{DiscoverParams, MovieQuery, SortOrder};
use chrono::{Duration, NaiveDate};

/// Upper bound on navigable pages, regardless of what TMDB reports.
pub const MAX_TOTAL_PAGES: u32 = 50;

/// Minimum vote count for the popular and top rated listings.
pub const MIN_VOTE_COUNT: u32 = 50;

/// Trailing window, in days, of the "recent releases" listing.
pub const RELEASE_WINDOW_DAYS: i64 = 30;

/// Active listing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Popular,
    TopRated,
    Upcoming,
    Recent,
    /// Free-text search. Never a value of the filter control.
    Search,
}

impl Mode {
    /// Values of the filter control, in display order.
    pub const FILTERS: [Self; 4] = [Self::Popular, Self::Recent, Self::TopRated, Self::Upcoming];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::TopRated => "top_rated",
            Self::Upcoming => "upcoming",
            Self::Recent => "recent",
            Self::Search => "search",
        }
    }

    /// Next filter control value, wrapping around. `Search` maps to the first filter.
    #[must_use]
    pub fn next_filter(self) -> Self {
        Self::FILTERS
            .iter()
            .position(|m| *m == self)
            .map_or(Self::FILTERS[0], |i| Self::FILTERS[(i + 1) % Self::FILTERS.len()])
    }

    /// Previous filter control value, wrapping around.
    #[must_use]
    pub fn prev_filter(self) -> Self {
        let len = Self::FILTERS.len();
        Self::FILTERS
            .iter()
            .position(|m| *m == self)
            .map_or(Self::FILTERS[0], |i| Self::FILTERS[(i + len - 1) % len])
    }
}

/// What is currently being browsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub page: u32,
    pub total_pages: u32,
    pub genre: Option<u32>,
    pub query: String,
    pub mode: Mode,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 1,
            genre: None,
            query: String::new(),
            mode: Mode::Popular,
        }
    }
}

impl ViewState {
    /// Applies a genre selection: first page, no search, same mode.
    #[must_use]
    pub fn select_genre(self, genre: Option<u32>) -> Self {
        Self {
            genre,
            page: 1,
            query: String::new(),
            ..self
        }
    }

    /// Applies debounced search text.
    ///
    /// Non-empty text switches to [`Mode::Search`]; empty text restores the mode
    /// shown by the filter control.
    ///
    /// # Examples
    ///
    /// ```
    /// use cinescope::app::{Mode, ViewState};
    ///
    /// let state = ViewState::default().submit_search("matrix", Mode::Popular);
    /// assert_eq!(state.mode, Mode::Search);
    /// let state = state.submit_search("", Mode::Popular);
    /// assert_eq!(state.mode, Mode::Popular);
    /// assert_eq!(state.page, 1);
    /// ```
    #[must_use]
    pub fn submit_search(self, text: &str, filter_control: Mode) -> Self {
        let query = text.trim().to_string();
        let mode = if query.is_empty() {
            if filter_control == Mode::Search {
                Mode::Popular
            } else {
                filter_control
            }
        } else {
            Mode::Search
        };
        Self {
            query,
            mode,
            page: 1,
            ..self
        }
    }

    /// Applies a filter control selection: first page, no search.
    #[must_use]
    pub fn select_filter(self, mode: Mode) -> Self {
        let mode = if mode == Mode::Search { Mode::Popular } else { mode };
        Self {
            mode,
            page: 1,
            query: String::new(),
            ..self
        }
    }

    /// Moves to `target`, clamped into `[1, total_pages]`.
    #[must_use]
    pub fn goto_page(self, target: u32) -> Self {
        let page = target.clamp(1, self.total_pages.max(1));
        Self { page, ..self }
    }

    /// Records the page count of a fresh response and re-clamps the page.
    ///
    /// A missing or zero upstream count counts as one page; anything above
    /// [`MAX_TOTAL_PAGES`] is capped.
    #[must_use]
    pub fn apply_total_pages(self, upstream: Option<u32>) -> Self {
        let total_pages = upstream.filter(|t| *t > 0).unwrap_or(1).min(MAX_TOTAL_PAGES);
        let page = self.page.clamp(1, total_pages);
        Self {
            total_pages,
            page,
            ..self
        }
    }

    /// Active search text, if any.
    #[must_use]
    pub fn active_query(&self) -> Option<&str> {
        let trimmed = self.query.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Derives the listing request for this state.
    #[must_use]
    pub fn movie_query(&self, today: NaiveDate) -> MovieQuery {
        if let Some(query) = self.active_query() {
            return MovieQuery::Search {
                query: query.to_string(),
                page: self.page,
            };
        }

        let base = DiscoverParams {
            page: self.page,
            sort_by: SortOrder::PopularityDesc,
            min_vote_count: None,
            release_from: None,
            release_to: None,
            genre: self.genre,
        };

        let params = match self.mode {
            Mode::Popular => DiscoverParams {
                min_vote_count: Some(MIN_VOTE_COUNT),
                ..base
            },
            Mode::TopRated => DiscoverParams {
                sort_by: SortOrder::VoteAverageDesc,
                min_vote_count: Some(MIN_VOTE_COUNT),
                ..base
            },
            Mode::Upcoming => DiscoverParams {
                sort_by: SortOrder::ReleaseDateAsc,
                release_from: Some(today),
                ..base
            },
            // A genre change during a search clears the query but keeps Search mode.
            Mode::Recent | Mode::Search => DiscoverParams {
                sort_by: SortOrder::ReleaseDateDesc,
                release_from: Some(today - Duration::days(RELEASE_WINDOW_DAYS)),
                release_to: Some(today),
                ..base
            },
        };

        MovieQuery::Discover(params)
    }
}
