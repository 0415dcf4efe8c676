//! Application state management and view model computation.
//!
//! [`AppState`] is the single owner of everything the plugin knows: the
//! browsing [`ViewState`], the genre catalog, the controls' values, the cards
//! with their trailer controllers and the timer queue. The event handler calls
//! the methods here; each returns the [`Action`]s its state change requires.
//!
//! # Screen Layout
//!
//! ```text
//! row 1          (blank)
//! row 2          header: title + filter indicator
//! row 3          border
//! row 4          controls bar: genre | filter | search
//! row 5          border
//! rows 6..R-5    cards, CARD_HEIGHT rows each
//! row R-4        border
//! row R-3        pagination
//! row R-2        border
//! row R-1        footer
//! ```

use super::modes::{InputMode, ListingStatus};
use super::timers::{TimerId, TimerKind, TimerQueue};
use super::trailer::TrailerController;
use super::view_state::{Mode, ViewState};
use crate::api::{RequestPurpose, TmdbClient};
use crate::app::Action;
use crate::domain::error::Result;
use crate::domain::{Genre, GenreList, Locale, MovieSummary, ResultPage, VideoList};
use crate::ui::cards::{render_cards, GridView, TrailerView};
use crate::ui::pagination::{self, ControlKind, PageControl};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CardSlot, ControlSegment, ControlsBar, FooterInfo, HeaderInfo, ScreenLayout, UIViewModel,
};
use chrono::{NaiveDate, Utc};
use std::time::{Duration, Instant};

/// Quiet time after the last keystroke before a search is submitted.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(450);

/// Terminal rows per card: title, overview, poster or trailer, spacer.
pub const CARD_HEIGHT: usize = 4;

const HEADER_ROW: usize = 2;
const CONTROLS_ROW: usize = 4;
const GRID_FIRST_ROW: usize = 6;
const CONTROLS_INDENT: usize = 1;
const CONTROLS_GAP: usize = 3;
const PAGINATION_INDENT: usize = 2;

/// One result in the grid and its trailer lifecycle.
#[derive(Debug, Clone)]
pub struct Card {
    pub movie: MovieSummary,
    pub trailer: TrailerController,
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub view: ViewState,

    /// Value shown by the filter control. Stays put while a search is active.
    pub filter_control: Mode,

    pub genres: Vec<Genre>,
    /// Genre control position: `0` is "all genres", `n` is `genres[n - 1]`.
    pub genre_cursor: usize,

    /// Search box contents, submitted after [`SEARCH_DEBOUNCE`].
    pub search_input: String,
    pub input_mode: InputMode,

    pub listing: ListingStatus,
    pub cards: Vec<Card>,
    /// Card under the mouse or keyboard selection.
    pub hovered: Option<usize>,
    /// Index of the first visible card.
    pub scroll: usize,

    pub timers: TimerQueue,
    debounce: Option<TimerId>,
    /// Sequence number of the latest movie request.
    movies_seq: u64,

    pub client: TmdbClient,
    pub locale: Locale,
    pub theme: Theme,
    /// Whether a fullscreen player command is configured.
    pub fullscreen_player: bool,
    /// Last rendered `(rows, cols)`.
    pub viewport: (usize, usize),
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

impl AppState {
    #[must_use]
    pub fn new(client: TmdbClient, locale: Locale, theme: Theme) -> Self {
        Self {
            view: ViewState::default(),
            filter_control: Mode::Popular,
            genres: Vec::new(),
            genre_cursor: 0,
            search_input: String::new(),
            input_mode: InputMode::Browse,
            listing: ListingStatus::Loading,
            cards: Vec::new(),
            hovered: None,
            scroll: 0,
            timers: TimerQueue::new(),
            debounce: None,
            movies_seq: 0,
            client,
            locale,
            theme,
            fullscreen_player: false,
            viewport: (24, 80),
        }
    }

    #[must_use]
    pub const fn movies_seq(&self) -> u64 {
        self.movies_seq
    }

    #[must_use]
    pub const fn debounce_pending(&self) -> bool {
        self.debounce.is_some()
    }

    /// Genre currently selected in the genre control.
    #[must_use]
    pub fn selected_genre(&self) -> Option<&Genre> {
        self.genre_cursor.checked_sub(1).and_then(|i| self.genres.get(i))
    }

    /// Requests the genre catalog.
    pub fn fetch_genres(&self) -> Vec<Action> {
        match self.client.fetch_genres() {
            Ok(url) => vec![Action::Fetch {
                url: url.into(),
                purpose: RequestPurpose::Genres,
            }],
            Err(e) => {
                tracing::warn!(error = %e, "failed loading genres");
                vec![]
            }
        }
    }

    /// Applies the genre catalog response. Failures leave only "all genres".
    pub fn apply_genres(&mut self, result: Result<GenreList>) {
        match result {
            Ok(list) => {
                tracing::debug!(count = list.genres.len(), "genres loaded");
                self.genres = list.genres;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed loading genres");
                self.genres.clear();
            }
        }
        self.genre_cursor = 0;
    }

    /// Clears the grid and requests the listing for the current view state.
    ///
    /// Bumps the request sequence so responses to earlier requests are ignored.
    pub fn load_movies(&mut self) -> Vec<Action> {
        self.movies_seq += 1;
        self.clear_cards();
        self.listing = ListingStatus::Loading;

        let query = self.view.movie_query(today());
        match self.client.movies(&query) {
            Ok(url) => {
                tracing::debug!(seq = self.movies_seq, page = self.view.page, mode = self.view.mode.as_str(), "loading movies");
                vec![Action::Fetch {
                    url: url.into(),
                    purpose: RequestPurpose::Movies { seq: self.movies_seq },
                }]
            }
            Err(e) => {
                tracing::error!(error = %e, "load movies failed");
                self.listing = ListingStatus::Failed;
                vec![]
            }
        }
    }

    /// Applies a listing response. Returns `false` for a stale response.
    pub fn apply_movies(&mut self, seq: u64, result: Result<ResultPage>) -> bool {
        if seq != self.movies_seq {
            tracing::debug!(seq, latest = self.movies_seq, "discarding stale movies response");
            return false;
        }

        match result {
            Ok(page) => {
                self.view = std::mem::take(&mut self.view).apply_total_pages(page.total_pages);
                self.show_results(page.results);
                self.listing = ListingStatus::Loaded;
                tracing::debug!(
                    results = self.cards.len(),
                    page = self.view.page,
                    total_pages = self.view.total_pages,
                    "movies loaded"
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "load movies failed");
                self.clear_cards();
                self.listing = ListingStatus::Failed;
            }
        }
        true
    }

    /// Replaces the cards unconditionally, tearing down the previous ones.
    pub fn show_results(&mut self, results: Vec<MovieSummary>) {
        self.clear_cards();
        self.cards = results
            .into_iter()
            .enumerate()
            .map(|(i, movie)| Card {
                trailer: TrailerController::new(i, movie.id, movie.title.clone()),
                movie,
            })
            .collect();
    }

    fn clear_cards(&mut self) {
        for card in &mut self.cards {
            card.trailer.teardown(&mut self.timers);
        }
        self.cards.clear();
        self.hovered = None;
        self.scroll = 0;
    }

    /// Moves the genre control and reloads.
    pub fn cycle_genre(&mut self, forward: bool) -> Vec<Action> {
        let options = self.genres.len() + 1;
        self.genre_cursor = if forward {
            (self.genre_cursor + 1) % options
        } else {
            (self.genre_cursor + options - 1) % options
        };
        let genre = self.selected_genre().map(|g| g.id);

        self.reset_search_box();
        self.view = std::mem::take(&mut self.view).select_genre(genre);
        self.load_movies()
    }

    /// Moves the filter control and reloads.
    pub fn cycle_filter(&mut self, forward: bool) -> Vec<Action> {
        self.filter_control = if forward {
            self.filter_control.next_filter()
        } else {
            self.filter_control.prev_filter()
        };

        self.reset_search_box();
        self.view = std::mem::take(&mut self.view).select_filter(self.filter_control);
        self.load_movies()
    }

    fn reset_search_box(&mut self) {
        self.cancel_debounce();
        self.search_input.clear();
        self.input_mode = InputMode::Browse;
    }

    fn cancel_debounce(&mut self) {
        if let Some(id) = self.debounce.take() {
            self.timers.cancel(id);
        }
    }

    /// Edits the search box and restarts the debounce.
    pub fn edit_search(&mut self, edit: impl FnOnce(&mut String), now: Instant) -> Vec<Action> {
        let before = self.search_input.clone();
        edit(&mut self.search_input);
        if self.search_input == before {
            return vec![];
        }

        self.cancel_debounce();
        self.debounce = Some(self.timers.schedule(TimerKind::SearchDebounce, SEARCH_DEBOUNCE, now));
        vec![Action::ScheduleWakeup(SEARCH_DEBOUNCE)]
    }

    /// Submits the search box contents and reloads.
    pub fn submit_search(&mut self) -> Vec<Action> {
        self.cancel_debounce();
        self.view = std::mem::take(&mut self.view).submit_search(&self.search_input, self.filter_control);
        tracing::debug!(query = %self.view.query, mode = self.view.mode.as_str(), "search submitted");
        self.load_movies()
    }

    /// Activates the pagination control of `kind`, if present and enabled.
    pub fn paginate(&mut self, kind: ControlKind) -> Vec<Action> {
        let controls = self.pagination_controls();
        match pagination::find(&controls, kind) {
            Some(control) => self.jump_via(control),
            None => vec![],
        }
    }

    fn pagination_controls(&self) -> Vec<PageControl> {
        if self.listing == ListingStatus::Loaded {
            pagination::render(self.view.page, self.view.total_pages)
        } else {
            Vec::new()
        }
    }

    fn jump_via(&mut self, control: &PageControl) -> Vec<Action> {
        let mut target = None;
        control.activate(|page| target = Some(page));
        match target {
            Some(page) => {
                self.view = std::mem::take(&mut self.view).goto_page(page);
                self.load_movies()
            }
            None => vec![],
        }
    }

    /// Moves hover to `target`, leaving the previous card.
    pub fn set_hover(&mut self, target: Option<usize>, now: Instant) -> Vec<Action> {
        let target = target.filter(|i| *i < self.cards.len());
        if target == self.hovered {
            return vec![];
        }

        if let Some(card) = self.hovered.and_then(|i| self.cards.get_mut(i)) {
            card.trailer.hover_leave(&mut self.timers);
        }
        self.hovered = target;

        target
            .and_then(|i| self.cards.get_mut(i))
            .and_then(|card| card.trailer.hover_enter(&mut self.timers, now))
            .map(Action::ScheduleWakeup)
            .into_iter()
            .collect()
    }

    /// Keyboard selection: moves hover by one card, wrapping around.
    pub fn move_selection(&mut self, down: bool, now: Instant) -> Vec<Action> {
        let len = self.cards.len();
        if len == 0 {
            return vec![];
        }
        let next = match (self.hovered, down) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        self.ensure_visible(next);
        self.set_hover(Some(next), now)
    }

    fn ensure_visible(&mut self, index: usize) {
        let capacity = card_capacity(self.viewport.0);
        if capacity == 0 {
            return;
        }
        if index < self.scroll {
            self.scroll = index;
        } else if index >= self.scroll + capacity {
            self.scroll = index + 1 - capacity;
        }
    }

    /// Handles a host wakeup: fires due timers and re-arms if needed.
    pub fn on_wakeup(&mut self, now: Instant) -> Vec<Action> {
        let (due, rearm) = self.timers.wake(now);
        let mut actions = Vec::new();

        for (id, kind) in due {
            match kind {
                TimerKind::SearchDebounce if self.debounce == Some(id) => {
                    self.debounce = None;
                    actions.extend(self.submit_search());
                }
                TimerKind::SearchDebounce => {}
                TimerKind::TrailerDelay { card } => actions.extend(self.load_trailer(card, id)),
            }
        }

        actions.extend(rearm.map(Action::ScheduleWakeup));
        actions
    }

    fn load_trailer(&mut self, card: usize, timer: TimerId) -> Vec<Action> {
        let Some(entry) = self.cards.get_mut(card) else {
            return vec![];
        };
        let Some(generation) = entry.trailer.delay_expired(timer) else {
            return vec![];
        };

        let movie_id = entry.movie.id;
        match self.client.fetch_movie_videos(movie_id) {
            Ok(url) => vec![Action::Fetch {
                url: url.into(),
                purpose: RequestPurpose::Videos {
                    card,
                    movie_id,
                    generation,
                },
            }],
            Err(e) => {
                entry.trailer.videos_loaded(generation, Err(e));
                vec![]
            }
        }
    }

    /// Applies a videos response to its card. Returns whether a player was attached.
    pub fn apply_videos(&mut self, card: usize, movie_id: u64, generation: u64, result: Result<VideoList>) -> bool {
        match self.cards.get_mut(card) {
            Some(entry) if entry.movie.id == movie_id => entry.trailer.videos_loaded(generation, result),
            _ => {
                tracing::debug!(card, movie_id, "videos response for a card no longer shown");
                false
            }
        }
    }

    /// Click on a card's trailer: fullscreen when available, else the opener.
    pub fn play_trailer(&self, card: Option<usize>) -> Vec<Action> {
        let Some(url) = card.and_then(|i| self.cards.get(i)).and_then(|c| c.trailer.activate()) else {
            return vec![];
        };

        let url = url.to_string();
        if self.fullscreen_player {
            vec![Action::RequestFullscreen { url }]
        } else {
            vec![Action::OpenExternal { url }]
        }
    }

    /// Screen geometry for the last rendered viewport.
    #[must_use]
    pub fn layout(&self) -> ScreenLayout {
        self.layout_for(self.viewport.0, &self.controls_bar())
    }

    fn layout_for(&self, rows: usize, controls: &ControlsBar) -> ScreenLayout {
        let footer_row = rows.saturating_sub(1);
        let pagination_row = rows.saturating_sub(3);
        let grid_last_row = rows.saturating_sub(5);

        let card_slots = self
            .visible_range(rows)
            .enumerate()
            .map(|(slot, card)| {
                let first_row = GRID_FIRST_ROW + slot * CARD_HEIGHT;
                CardSlot {
                    card,
                    first_row,
                    last_row: first_row + CARD_HEIGHT - 2,
                }
            })
            .collect();

        let pagination_spans = pagination::layout(&self.pagination_controls())
            .into_iter()
            .map(|(start, end)| (start + PAGINATION_INDENT, end + PAGINATION_INDENT))
            .collect();

        ScreenLayout {
            header_row: HEADER_ROW,
            controls_row: CONTROLS_ROW,
            genre_span: controls.genre.span,
            filter_span: controls.filter.span,
            search_span: controls.search.span,
            grid_first_row: GRID_FIRST_ROW,
            grid_last_row,
            card_slots,
            pagination_row,
            pagination_spans,
            footer_row,
        }
    }

    fn visible_range(&self, rows: usize) -> std::ops::Range<usize> {
        let capacity = card_capacity(rows);
        let start = self.scroll.min(self.cards.len());
        start..(start + capacity).min(self.cards.len())
    }

    /// Pagination control under `col` on the pagination row.
    #[must_use]
    pub fn pagination_control_at(&self, col: usize) -> Option<PageControl> {
        let layout = self.layout();
        let index = pagination::hit_test(&layout.pagination_spans, col)?;
        self.pagination_controls().into_iter().nth(index)
    }

    /// Activates a pagination control found by hit-testing.
    pub fn activate_control(&mut self, control: &PageControl) -> Vec<Action> {
        self.jump_via(control)
    }

    /// Computes a renderable view model for a `rows` x `cols` terminal.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, _cols: usize) -> UIViewModel {
        let controls = self.controls_bar();
        let layout = self.layout_for(rows, &controls);

        let grid = match self.listing {
            ListingStatus::Loading => GridView::Placeholder(self.locale.loading.to_string()),
            ListingStatus::Failed => GridView::Placeholder(self.locale.load_failed.to_string()),
            ListingStatus::Loaded => self.compute_grid(rows),
        };

        let pagination = (self.listing == ListingStatus::Loaded).then(|| self.pagination_controls());

        UIViewModel {
            header: self.compute_header(),
            controls,
            grid,
            pagination,
            footer: self.compute_footer(),
            layout,
        }
    }

    fn compute_grid(&self, rows: usize) -> GridView {
        let range = self.visible_range(rows);
        let movies: Vec<MovieSummary> = self.cards[range.clone()].iter().map(|c| c.movie.clone()).collect();
        let query = (self.view.mode == Mode::Search).then(|| self.view.active_query()).flatten();

        match render_cards(&movies, &self.locale, query) {
            GridView::Cards(mut views) => {
                for (view, index) in views.iter_mut().zip(range) {
                    view.is_hovered = self.hovered == Some(index);
                    if let Some(player) = self.cards[index].trailer.player() {
                        view.trailer = TrailerView::Playing {
                            title: player.title.clone(),
                            embed_url: player.embed_url.clone(),
                            hint: self.locale.trailer_hint.to_string(),
                        };
                    }
                }
                GridView::Cards(views)
            }
            placeholder => placeholder,
        }
    }

    fn mode_label(&self, mode: Mode) -> &'static str {
        match mode {
            Mode::Popular => self.locale.popular,
            Mode::TopRated => self.locale.top_rated,
            Mode::Upcoming => self.locale.upcoming,
            Mode::Recent => self.locale.recent,
            Mode::Search => self.locale.search,
        }
    }

    /// Filter-status indicator text.
    #[must_use]
    pub fn filter_indicator(&self) -> String {
        let prefix = self.locale.filter_prefix;
        if self.view.mode == Mode::Search {
            return match self.view.active_query() {
                Some(query) => format!("{prefix}: {} — \"{query}\"", self.locale.search),
                None => format!("{prefix}: {}", self.locale.search),
            };
        }

        let genre = self
            .view
            .genre
            .and_then(|id| self.genres.iter().find(|g| g.id == id))
            .map(|g| format!(" — {}: {}", self.locale.genre_label, g.name))
            .unwrap_or_default();
        format!("{prefix}: {}{genre}", self.mode_label(self.view.mode))
    }

    fn compute_header(&self) -> HeaderInfo {
        HeaderInfo {
            title: " Cinescope ".to_string(),
            indicator: self.filter_indicator(),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Browse => self.locale.keys_browse,
            InputMode::SearchTyping => self.locale.keys_search,
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn controls_bar(&self) -> ControlsBar {
        let genre_value = self
            .selected_genre()
            .map_or(self.locale.all_genres, |g| g.name.as_str());
        let typing = self.input_mode == InputMode::SearchTyping;
        let search_value = if typing {
            format!("{}_", self.search_input)
        } else {
            self.search_input.clone()
        };

        let mut col = CONTROLS_INDENT;
        let mut segment = |label: &str, value: String, focused: bool| {
            let mut control = ControlSegment {
                label: label.to_string(),
                value,
                span: (0, 0),
                focused,
            };
            let width = control.text().chars().count();
            control.span = (col, col + width);
            col += width + CONTROLS_GAP;
            control
        };

        ControlsBar {
            genre: segment(self.locale.genre_label, format!("{genre_value} ▾"), false),
            filter: segment(
                self.locale.filter_prefix,
                format!("{} ▾", self.mode_label(self.filter_control)),
                false,
            ),
            search: segment(self.locale.search_label, search_value, typing),
        }
    }
}

/// Number of cards that fit in a terminal of `rows` rows. Zero when the grid
/// has no room for a whole card.
#[must_use]
pub fn card_capacity(rows: usize) -> usize {
    rows.saturating_sub(GRID_FIRST_ROW + 4) / CARD_HEIGHT
}
