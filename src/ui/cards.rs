//! Result list to card view mapping.
//!
//! Cards are plain values computed from a [`MovieSummary`]; nothing here
//! knows about the terminal. The grid renderer draws them and the app state
//! decorates them with hover and trailer status.

use crate::api::poster_url;
use crate::domain::{Locale, MovieSummary};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Poster slot of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosterView {
    Url(String),
    Placeholder(&'static str),
}

/// Trailer slot of a card.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TrailerView {
    /// No player: idle, delay running, fetching, or nothing to play.
    #[default]
    Hidden,
    Playing {
        title: String,
        embed_url: String,
        /// Localized hint that a click opens the trailer fullscreen.
        hint: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub movie_id: u64,
    pub poster: PosterView,
    pub title: String,
    /// Localized release date, empty when unknown.
    pub date: String,
    pub overview: String,
    /// Character ranges of `title` matching the search query.
    pub highlight_ranges: Vec<(usize, usize)>,
    pub is_hovered: bool,
    pub trailer: TrailerView,
}

/// Contents of the grid area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridView {
    Cards(Vec<CardView>),
    /// Single message in place of the cards.
    Placeholder(String),
}

/// Maps a result list to cards, preserving order.
///
/// An empty list yields the localized "no results" placeholder. With a search
/// query, title characters matching it are highlighted.
#[must_use]
pub fn render_cards(results: &[MovieSummary], locale: &Locale, query: Option<&str>) -> GridView {
    if results.is_empty() {
        return GridView::Placeholder(locale.no_results.to_string());
    }

    let matcher = query.filter(|q| !q.trim().is_empty()).map(|q| (SkimMatcherV2::default(), q));

    GridView::Cards(
        results
            .iter()
            .map(|movie| {
                let mut card = render_card(movie, locale);
                if let Some((matcher, query)) = &matcher {
                    card.highlight_ranges = highlight_ranges(&card.title, query, matcher);
                }
                card
            })
            .collect(),
    )
}

/// Maps one movie to its card.
#[must_use]
pub fn render_card(movie: &MovieSummary, locale: &Locale) -> CardView {
    let poster = movie
        .poster_path
        .as_deref()
        .filter(|p| !p.is_empty())
        .map_or(PosterView::Placeholder(locale.no_image), |p| PosterView::Url(poster_url(p)));

    CardView {
        movie_id: movie.id,
        poster,
        title: movie.title.clone(),
        date: locale.format_release_date(movie.release_date.as_deref()),
        overview: movie.overview.clone().unwrap_or_default(),
        highlight_ranges: Vec::new(),
        is_hovered: false,
        trailer: TrailerView::Hidden,
    }
}

/// Coalesces fuzzy match indices into `(start, end)` character ranges.
fn highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    let Some((_score, indices)) = matcher.fuzzy_indices(text, query.trim()) else {
        return Vec::new();
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64, title: &str) -> MovieSummary {
        MovieSummary {
            id,
            title: title.to_string(),
            overview: None,
            release_date: None,
            poster_path: None,
        }
    }

    #[test]
    fn empty_list_is_a_single_placeholder() {
        let grid = render_cards(&[], &Locale::default(), None);
        assert_eq!(grid, GridView::Placeholder("Nessun risultato trovato.".to_string()));

        let grid = render_cards(&[], &Locale::for_language("en-US"), None);
        assert_eq!(grid, GridView::Placeholder("No results found.".to_string()));
    }

    #[test]
    fn order_is_preserved() {
        let movies = [movie(3, "C"), movie(1, "A"), movie(2, "B")];
        let GridView::Cards(cards) = render_cards(&movies, &Locale::default(), None) else {
            panic!("expected cards");
        };
        let ids: Vec<_> = cards.iter().map(|c| c.movie_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn full_card_fields() {
        let movie = MovieSummary {
            id: 603,
            title: "Matrix".to_string(),
            overview: Some("Un hacker scopre la verità.".to_string()),
            release_date: Some("1999-03-31".to_string()),
            poster_path: Some("/matrix.jpg".to_string()),
        };
        let card = render_card(&movie, &Locale::default());
        assert_eq!(
            card.poster,
            PosterView::Url("https://image.tmdb.org/t/p/w500/matrix.jpg".to_string())
        );
        assert_eq!(card.date, "31/3/1999");
        assert_eq!(card.overview, "Un hacker scopre la verità.");
        assert_eq!(card.trailer, TrailerView::Hidden);
    }

    #[test]
    fn missing_fields_render_blank() {
        let card = render_card(
            &MovieSummary {
                release_date: Some(String::new()),
                poster_path: Some(String::new()),
                ..movie(1, "Senza data")
            },
            &Locale::default(),
        );
        assert_eq!(card.poster, PosterView::Placeholder("Nessuna immagine"));
        assert_eq!(card.date, "");
        assert_eq!(card.overview, "");
    }

    #[test]
    fn search_query_highlights_title() {
        let GridView::Cards(cards) = render_cards(&[movie(603, "The Matrix")], &Locale::default(), Some("matrix"))
        else {
            panic!("expected cards");
        };
        assert_eq!(cards[0].highlight_ranges, vec![(4, 10)]);

        let GridView::Cards(cards) = render_cards(&[movie(603, "The Matrix")], &Locale::default(), Some("  "))
        else {
            panic!("expected cards");
        };
        assert!(cards[0].highlight_ranges.is_empty());
    }
}
