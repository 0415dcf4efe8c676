//! User-facing strings and date formatting for the supported languages.
//!
//! The language tag configured for the plugin is also sent to TMDB, so titles,
//! overviews and genre names come back in the same language as the chrome.
//! Italian is the default; any `en*` tag selects English. Other tags keep the
//! Italian strings but format dates as ISO `YYYY-MM-DD`.

use chrono::NaiveDate;

/// Date layout used for release dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `12/9/2025`
    DayMonthYear,
    /// `9/12/2025`
    MonthDayYear,
    /// `2025-09-12`
    Iso,
}

/// Localized strings for the plugin UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub date_style: DateStyle,
    pub no_results: &'static str,
    pub load_failed: &'static str,
    pub loading: &'static str,
    pub no_image: &'static str,
    pub all_genres: &'static str,
    pub filter_prefix: &'static str,
    pub genre_label: &'static str,
    pub search_label: &'static str,
    pub popular: &'static str,
    pub top_rated: &'static str,
    pub upcoming: &'static str,
    pub recent: &'static str,
    pub search: &'static str,
    pub trailer_hint: &'static str,
    pub keys_browse: &'static str,
    pub keys_search: &'static str,
}

impl Locale {
    /// Italian strings, matching the default `it-IT` response language.
    #[must_use]
    pub const fn italian() -> Self {
        Self {
            date_style: DateStyle::DayMonthYear,
            no_results: "Nessun risultato trovato.",
            load_failed: "Errore nel caricamento dei film.",
            loading: "Caricamento...",
            no_image: "Nessuna immagine",
            all_genres: "Tutti i generi",
            filter_prefix: "Filtro",
            genre_label: "Genere",
            search_label: "Cerca",
            popular: "Popolari",
            top_rated: "Più votati",
            upcoming: "In arrivo",
            recent: "Novità",
            search: "Ricerca",
            trailer_hint: "clic per schermo intero",
            keys_browse: "j/k: scegli  Invio: trailer  g/G: genere  f/F: filtro  /: cerca  h/l: pagina  H/L: ±10  q: esci",
            keys_search: "Esc: chiudi ricerca  Invio: cerca subito  Ctrl+u: svuota  Scrivi per cercare",
        }
    }

    #[must_use]
    pub const fn english() -> Self {
        Self {
            date_style: DateStyle::MonthDayYear,
            no_results: "No results found.",
            load_failed: "Failed to load movies.",
            loading: "Loading...",
            no_image: "No image",
            all_genres: "All genres",
            filter_prefix: "Filter",
            genre_label: "Genre",
            search_label: "Search",
            popular: "Popular",
            top_rated: "Top rated",
            upcoming: "Upcoming",
            recent: "New releases",
            search: "Search",
            trailer_hint: "click for fullscreen",
            keys_browse: "j/k: select  Enter: trailer  g/G: genre  f/F: filter  /: search  h/l: page  H/L: ±10  q: quit",
            keys_search: "Esc: close search  Enter: search now  Ctrl+u: clear  Type to search",
        }
    }

    /// Selects the locale for a language tag such as `it-IT` or `en-US`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cinescope::domain::{DateStyle, Locale};
    ///
    /// assert_eq!(Locale::for_language("en-GB").no_results, "No results found.");
    /// assert_eq!(Locale::for_language("it-IT").date_style, DateStyle::DayMonthYear);
    /// assert_eq!(Locale::for_language("de-DE").date_style, DateStyle::Iso);
    /// ```
    #[must_use]
    pub fn for_language(tag: &str) -> Self {
        let lower = tag.to_ascii_lowercase();
        if lower.starts_with("en") {
            Self::english()
        } else if lower.starts_with("it") {
            Self::italian()
        } else {
            Self {
                date_style: DateStyle::Iso,
                ..Self::italian()
            }
        }
    }

    /// Formats a TMDB release date (`YYYY-MM-DD`) for display.
    ///
    /// Absent, empty and unparsable dates all render as an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use cinescope::domain::Locale;
    ///
    /// let it = Locale::for_language("it-IT");
    /// assert_eq!(it.format_release_date(Some("2025-09-12")), "12/9/2025");
    /// assert_eq!(it.format_release_date(Some("")), "");
    /// assert_eq!(it.format_release_date(None), "");
    /// ```
    #[must_use]
    pub fn format_release_date(&self, date: Option<&str>) -> String {
        let Some(raw) = date.map(str::trim).filter(|d| !d.is_empty()) else {
            return String::new();
        };
        let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") else {
            tracing::trace!(date = %raw, "unparsable release date");
            return String::new();
        };
        let pattern = match self.date_style {
            DateStyle::DayMonthYear => "%-d/%-m/%Y",
            DateStyle::MonthDayYear => "%-m/%-d/%Y",
            DateStyle::Iso => "%Y-%m-%d",
        };
        parsed.format(pattern).to_string()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::italian()
    }
}
