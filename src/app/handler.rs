//! Event handling and state transition logic.
//!
//! The plugin runtime translates host events (keys, mouse, timers, web and
//! command results) into [`Event`]s. [`handle_event`] applies each one to the
//! [`AppState`] and returns whether a re-render is needed plus the actions to
//! execute.
//!
//! # Event Types
//!
//! - **Controls**: `NextGenre`, `PrevGenre`, `NextFilter`, `PrevFilter`,
//!   pagination and search box editing
//! - **Cards**: `KeyDown`, `KeyUp`, `Hover`, `Click`, `PlayTrailer`
//! - **Responses**: `GenresLoaded`, `MoviesLoaded`, `VideosLoaded`
//! - **System**: `PermissionsGranted`, `PermissionsDenied`, `TimerFired`,
//!   `PlaybackFailed`
//!
//! Every control event performs one view-state transition and one reload.

use crate::app::modes::{InputMode, ListingStatus};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{GenreList, ResultPage, VideoList};
use crate::ui::pagination::ControlKind;
use crate::ui::viewmodel::ControlTarget;
use std::time::Instant;

/// Events triggered by user input, timers or remote responses.
#[derive(Debug)]
pub enum Event {
    /// Host permissions granted; start loading.
    PermissionsGranted,
    /// Host permissions refused; nothing can be loaded.
    PermissionsDenied,

    GenresLoaded(Result<GenreList>),
    MoviesLoaded {
        seq: u64,
        result: Result<ResultPage>,
    },
    VideosLoaded {
        card: usize,
        movie_id: u64,
        generation: u64,
        result: Result<VideoList>,
    },

    /// A host wakeup arrived.
    TimerFired,

    /// Selects the next card (keyboard hover).
    KeyDown,
    /// Selects the previous card (keyboard hover).
    KeyUp,
    NextGenre,
    PrevGenre,
    NextFilter,
    PrevFilter,

    /// Focuses the search box.
    SearchMode,
    /// Leaves the search box; its text stays.
    ExitSearch,
    /// Submits the search box without waiting for the debounce.
    SubmitSearch,
    Char(char),
    Backspace,
    ClearSearch,

    NextPage,
    PrevPage,
    JumpForward,
    JumpBack,

    /// Mouse moved over `row` (1-based).
    Hover { row: usize },
    /// Left click at `row` (1-based), `col` (0-based).
    Click { row: usize, col: usize },
    /// Plays the hovered card's trailer.
    PlayTrailer,
    /// The fullscreen player could not be started.
    PlaybackFailed { url: String },

    CloseFocus,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the UI must be re-rendered.
///
/// # Errors
///
/// Propagates failures from state transitions. Remote failures are not
/// errors here: they arrive as `Err` payloads of the response events and are
/// absorbed into the state.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: Event, now: Instant) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(&event)).entered();

    let typing = state.input_mode == InputMode::SearchTyping;

    match event {
        Event::PermissionsGranted => {
            let mut actions = state.fetch_genres();
            actions.extend(state.load_movies());
            Ok((true, actions))
        }
        Event::PermissionsDenied => {
            tracing::error!("web access permission denied");
            state.listing = ListingStatus::Failed;
            Ok((true, vec![]))
        }
        Event::GenresLoaded(result) => {
            state.apply_genres(result);
            Ok((true, vec![]))
        }
        Event::MoviesLoaded { seq, result } => Ok((state.apply_movies(seq, result), vec![])),
        Event::VideosLoaded {
            card,
            movie_id,
            generation,
            result,
        } => Ok((state.apply_videos(card, movie_id, generation, result), vec![])),
        Event::TimerFired => {
            let actions = state.on_wakeup(now);
            Ok((true, actions))
        }
        Event::KeyDown => Ok((true, state.move_selection(true, now))),
        Event::KeyUp => Ok((true, state.move_selection(false, now))),
        Event::NextGenre => Ok((true, state.cycle_genre(true))),
        Event::PrevGenre => Ok((true, state.cycle_genre(false))),
        Event::NextFilter => Ok((true, state.cycle_filter(true))),
        Event::PrevFilter => Ok((true, state.cycle_filter(false))),
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::SearchTyping;
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            state.input_mode = InputMode::Browse;
            Ok((true, vec![]))
        }
        Event::SubmitSearch => {
            state.input_mode = InputMode::Browse;
            Ok((true, state.submit_search()))
        }
        Event::Char(c) => {
            if !typing {
                return Ok((false, vec![]));
            }
            tracing::trace!(char = %c, "search box edited");
            Ok((true, state.edit_search(|input| input.push(c), now)))
        }
        Event::Backspace => {
            if !typing {
                return Ok((false, vec![]));
            }
            Ok((true, state.edit_search(|input| { input.pop(); }, now)))
        }
        Event::ClearSearch => {
            if !typing {
                return Ok((false, vec![]));
            }
            Ok((true, state.edit_search(String::clear, now)))
        }
        Event::NextPage => Ok((true, state.paginate(ControlKind::Next))),
        Event::PrevPage => Ok((true, state.paginate(ControlKind::Previous))),
        Event::JumpForward => Ok((true, state.paginate(ControlKind::JumpForward))),
        Event::JumpBack => Ok((true, state.paginate(ControlKind::JumpBack))),
        Event::Hover { row } => {
            let target = state.layout().card_at(row);
            if target == state.hovered {
                return Ok((false, vec![]));
            }
            Ok((true, state.set_hover(target, now)))
        }
        Event::Click { row, col } => Ok((true, handle_click(state, row, col, now))),
        Event::PlayTrailer => Ok((false, state.play_trailer(state.hovered))),
        Event::PlaybackFailed { url } => {
            tracing::warn!(url = %url, "fullscreen playback failed, opening externally");
            Ok((false, vec![Action::OpenExternal { url }]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
    }
}

fn handle_click(state: &mut AppState, row: usize, col: usize, now: Instant) -> Vec<Action> {
    let layout = state.layout();

    if let Some(card) = layout.card_at(row) {
        let has_player = state.cards.get(card).is_some_and(|c| c.trailer.player().is_some());
        return if has_player {
            state.play_trailer(Some(card))
        } else {
            state.set_hover(Some(card), now)
        };
    }

    if row == layout.pagination_row {
        return match state.pagination_control_at(col) {
            Some(control) => state.activate_control(&control),
            None => vec![],
        };
    }

    match layout.control_at(row, col) {
        Some(ControlTarget::Genre) => state.cycle_genre(true),
        Some(ControlTarget::Filter) => state.cycle_filter(true),
        Some(ControlTarget::Search) => {
            state.input_mode = InputMode::SearchTyping;
            vec![]
        }
        None => vec![],
    }
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::PermissionsGranted => "permissions_granted",
        Event::PermissionsDenied => "permissions_denied",
        Event::GenresLoaded(_) => "genres_loaded",
        Event::MoviesLoaded { .. } => "movies_loaded",
        Event::VideosLoaded { .. } => "videos_loaded",
        Event::TimerFired => "timer_fired",
        Event::KeyDown => "key_down",
        Event::KeyUp => "key_up",
        Event::NextGenre => "next_genre",
        Event::PrevGenre => "prev_genre",
        Event::NextFilter => "next_filter",
        Event::PrevFilter => "prev_filter",
        Event::SearchMode => "search_mode",
        Event::ExitSearch => "exit_search",
        Event::SubmitSearch => "submit_search",
        Event::Char(_) => "char",
        Event::Backspace => "backspace",
        Event::ClearSearch => "clear_search",
        Event::NextPage => "next_page",
        Event::PrevPage => "prev_page",
        Event::JumpForward => "jump_forward",
        Event::JumpBack => "jump_back",
        Event::Hover { .. } => "hover",
        Event::Click { .. } => "click",
        Event::PlayTrailer => "play_trailer",
        Event::PlaybackFailed { .. } => "playback_failed",
        Event::CloseFocus => "close_focus",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{RequestPurpose, TmdbClient};
    use crate::app::state::SEARCH_DEBOUNCE;
    use crate::app::trailer::TRAILER_DELAY;
    use crate::app::Mode;
    use crate::domain::{CinescopeError, Genre, Locale, MovieSummary, Video};
    use crate::ui::{GridView, Theme, TrailerView};
    use std::time::Duration;

    fn new_state() -> AppState {
        AppState::new(
            TmdbClient::new(Some("secret".to_string()), "it-IT"),
            Locale::default(),
            Theme::default(),
        )
    }

    fn run(state: &mut AppState, event: Event, now: Instant) -> Vec<Action> {
        handle_event(state, event, now).unwrap().1
    }

    fn fetches(actions: &[Action]) -> Vec<(&str, RequestPurpose)> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::Fetch { url, purpose } => Some((url.as_str(), *purpose)),
                _ => None,
            })
            .collect()
    }

    fn movies_seq(actions: &[Action]) -> u64 {
        fetches(actions)
            .into_iter()
            .find_map(|(_, p)| match p {
                RequestPurpose::Movies { seq } => Some(seq),
                _ => None,
            })
            .expect("a movies request")
    }

    fn page(total_pages: u32, count: u64) -> ResultPage {
        ResultPage {
            page: 1,
            results: (1..=count)
                .map(|id| MovieSummary {
                    id: 600 + id,
                    title: format!("Film {id}"),
                    overview: None,
                    release_date: None,
                    poster_path: None,
                })
                .collect(),
            total_pages: Some(total_pages),
            total_results: None,
        }
    }

    fn trailer() -> VideoList {
        VideoList {
            results: vec![
                Video {
                    key: "clip".to_string(),
                    name: "Clip".to_string(),
                    site: "YouTube".to_string(),
                    kind: "Clip".to_string(),
                },
                Video {
                    key: "official".to_string(),
                    name: "Trailer".to_string(),
                    site: "YouTube".to_string(),
                    kind: "Trailer".to_string(),
                },
            ],
        }
    }

    /// State after startup with one page of `count` cards out of `total` pages.
    fn started(total: u32, count: u64, t0: Instant) -> AppState {
        let mut state = new_state();
        let actions = run(&mut state, Event::PermissionsGranted, t0);
        let seq = movies_seq(&actions);
        run(
            &mut state,
            Event::MoviesLoaded {
                seq,
                result: Ok(page(total, count)),
            },
            t0,
        );
        state
    }

    #[test]
    fn startup_requests_genres_and_movies() {
        let mut state = new_state();
        let actions = run(&mut state, Event::PermissionsGranted, Instant::now());
        let purposes: Vec<_> = fetches(&actions).into_iter().map(|(_, p)| p).collect();
        assert_eq!(purposes, vec![RequestPurpose::Genres, RequestPurpose::Movies { seq: 1 }]);
        assert!(fetches(&actions)[1].0.contains("/discover/movie"));
    }

    #[test]
    fn genre_failure_degrades_silently() {
        let mut state = new_state();
        let (render, actions) = handle_event(
            &mut state,
            Event::GenresLoaded(Err(CinescopeError::Network("offline".to_string()))),
            Instant::now(),
        )
        .unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert!(state.genres.is_empty());
        assert!(state.selected_genre().is_none());
    }

    #[test]
    fn stale_movie_response_is_ignored() {
        let t0 = Instant::now();
        let mut state = started(5, 3, t0);
        let first = movies_seq(&run(&mut state, Event::NextFilter, t0));
        let second = movies_seq(&run(&mut state, Event::NextFilter, t0));
        assert!(second > first);

        run(&mut state, Event::MoviesLoaded { seq: second, result: Ok(page(7, 2)) }, t0);
        let (render, _) = handle_event(
            &mut state,
            Event::MoviesLoaded { seq: first, result: Ok(page(3, 9)) },
            t0,
        )
        .unwrap();
        assert!(!render);
        assert_eq!(state.cards.len(), 2);
        assert_eq!(state.view.total_pages, 7);
    }

    #[test]
    fn movie_failure_hides_pagination() {
        let t0 = Instant::now();
        let mut state = started(5, 3, t0);
        let seq = movies_seq(&run(&mut state, Event::NextPage, t0));
        run(
            &mut state,
            Event::MoviesLoaded { seq, result: Err(CinescopeError::Upstream { status: 503 }) },
            t0,
        );
        assert_eq!(state.listing, ListingStatus::Failed);
        assert!(state.cards.is_empty());
        assert!(run(&mut state, Event::NextPage, t0).is_empty());
    }

    #[test]
    fn pagination_keys_jump_and_clamp() {
        let t0 = Instant::now();
        let mut state = started(50, 3, t0);

        assert!(run(&mut state, Event::PrevPage, t0).is_empty(), "previous disabled on page 1");
        assert!(run(&mut state, Event::JumpBack, t0).is_empty(), "jump back disabled on page 1");

        let actions = run(&mut state, Event::JumpForward, t0);
        assert_eq!(state.view.page, 11);
        assert!(fetches(&actions)[0].0.contains("page=11"));

        let seq = movies_seq(&actions);
        run(&mut state, Event::MoviesLoaded { seq, result: Ok(page(12, 3)) }, t0);
        run(&mut state, Event::JumpForward, t0);
        assert_eq!(state.view.page, 12);
    }

    #[test]
    fn search_is_debounced_and_superseded() {
        let t0 = Instant::now();
        let mut state = started(5, 3, t0);
        run(&mut state, Event::SearchMode, t0);

        let actions = run(&mut state, Event::Char('m'), t0);
        assert_eq!(actions, vec![Action::ScheduleWakeup(SEARCH_DEBOUNCE)]);
        let t1 = t0 + Duration::from_millis(200);
        run(&mut state, Event::Char('x'), t1);

        let early = run(&mut state, Event::TimerFired, t0 + SEARCH_DEBOUNCE);
        assert!(fetches(&early).is_empty(), "first keystroke was superseded");
        assert_eq!(state.view.mode, Mode::Popular);

        let fired = run(&mut state, Event::TimerFired, t1 + SEARCH_DEBOUNCE);
        let requests = fetches(&fired);
        assert_eq!(requests.len(), 1);
        assert!(requests[0].0.contains("/search/movie"));
        assert!(requests[0].0.contains("query=mx"));
        assert_eq!(state.view.mode, Mode::Search);
        assert_eq!(state.view.page, 1);
    }

    #[test]
    fn clearing_search_restores_filter_mode() {
        let t0 = Instant::now();
        let mut state = started(5, 3, t0);
        run(&mut state, Event::SearchMode, t0);
        for c in "matrix".chars() {
            run(&mut state, Event::Char(c), t0);
        }
        run(&mut state, Event::SubmitSearch, t0);
        assert_eq!(state.view.mode, Mode::Search);

        run(&mut state, Event::SearchMode, t0);
        run(&mut state, Event::ClearSearch, t0);
        let fired = run(&mut state, Event::TimerFired, t0 + SEARCH_DEBOUNCE);
        assert!(fetches(&fired)[0].0.contains("/discover/movie"));
        assert_eq!(state.view.mode, Mode::Popular);
        assert_eq!(state.view.page, 1);
    }

    #[test]
    fn genre_change_cancels_pending_search() {
        let t0 = Instant::now();
        let mut state = started(5, 3, t0);
        state.genres = vec![Genre { id: 35, name: "Commedia".to_string() }];
        run(&mut state, Event::SearchMode, t0);
        run(&mut state, Event::Char('a'), t0);

        let actions = run(&mut state, Event::NextGenre, t0);
        assert!(fetches(&actions)[0].0.contains("with_genres=35"));
        assert!(state.search_input.is_empty());
        assert!(!state.debounce_pending());

        let fired = run(&mut state, Event::TimerFired, t0 + SEARCH_DEBOUNCE);
        assert!(fetches(&fired).is_empty());
    }

    #[test]
    fn typing_keys_are_ignored_outside_search_box() {
        let t0 = Instant::now();
        let mut state = started(5, 3, t0);
        let (render, actions) = handle_event(&mut state, Event::Char('x'), t0).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.search_input.is_empty());
    }

    #[test]
    fn short_hover_never_fetches_videos() {
        let t0 = Instant::now();
        let mut state = started(5, 3, t0);

        let actions = run(&mut state, Event::Hover { row: 6 }, t0);
        assert_eq!(actions, vec![Action::ScheduleWakeup(TRAILER_DELAY)]);
        run(&mut state, Event::Hover { row: 2 }, t0 + Duration::from_millis(749));

        let fired = run(&mut state, Event::TimerFired, t0 + TRAILER_DELAY);
        assert!(fetches(&fired).is_empty());
    }

    #[test]
    fn superseded_debounce_wakeup_does_not_start_trailer_early() {
        let t0 = Instant::now();
        let mut state = started(5, 3, t0);
        run(&mut state, Event::Hover { row: 6 }, t0);
        run(&mut state, Event::SearchMode, t0);
        run(&mut state, Event::Char('m'), t0 + Duration::from_millis(298));
        run(&mut state, Event::Char('x'), t0 + Duration::from_millis(301));

        let early = run(&mut state, Event::TimerFired, t0 + Duration::from_millis(748));
        assert!(fetches(&early).is_empty(), "trailer delay has not elapsed");

        let fired = run(&mut state, Event::TimerFired, t0 + TRAILER_DELAY);
        let requests = fetches(&fired);
        assert_eq!(requests.len(), 1);
        assert!(matches!(requests[0].1, RequestPurpose::Videos { movie_id: 601, .. }));
    }

    #[test]
    fn debounce_does_not_submit_before_quiet_period() {
        let t0 = Instant::now();
        let mut state = started(5, 3, t0);
        run(&mut state, Event::SearchMode, t0);
        run(&mut state, Event::Char('a'), t0);

        let early = run(&mut state, Event::TimerFired, t0 + SEARCH_DEBOUNCE - Duration::from_millis(2));
        assert!(fetches(&early).is_empty());
        assert_eq!(early, vec![Action::ScheduleWakeup(Duration::from_millis(2))]);
        assert_eq!(state.view.mode, Mode::Popular);

        let fired = run(&mut state, Event::TimerFired, t0 + SEARCH_DEBOUNCE);
        assert_eq!(fetches(&fired).len(), 1);
        assert_eq!(state.view.mode, Mode::Search);
    }

    #[test]
    fn long_hover_fetches_once_and_attaches_player() {
        let t0 = Instant::now();
        let mut state = started(5, 3, t0);
        run(&mut state, Event::Hover { row: 7 }, t0);
        run(&mut state, Event::Hover { row: 8 }, t0 + Duration::from_millis(100));

        let fired = run(&mut state, Event::TimerFired, t0 + TRAILER_DELAY);
        let requests = fetches(&fired);
        assert_eq!(requests.len(), 1);
        assert!(requests[0].0.contains("/movie/601/videos"));
        let RequestPurpose::Videos { card, movie_id, generation } = requests[0].1 else {
            panic!("expected a videos request");
        };

        let (render, _) = handle_event(
            &mut state,
            Event::VideosLoaded { card, movie_id, generation, result: Ok(trailer()) },
            t0,
        )
        .unwrap();
        assert!(render);
        let player = state.cards[0].trailer.player().unwrap().clone();
        assert_eq!(player.video_key, "official");

        let GridView::Cards(views) = state.compute_viewmodel(24, 80).grid else {
            panic!("expected cards");
        };
        assert_eq!(
            views[0].trailer,
            TrailerView::Playing {
                title: player.title,
                embed_url: player.embed_url,
                hint: Locale::default().trailer_hint.to_string(),
            }
        );

        assert!(run(&mut state, Event::TimerFired, t0 + Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn re_entering_after_teardown_fetches_again() {
        let t0 = Instant::now();
        let mut state = started(5, 3, t0);
        run(&mut state, Event::KeyDown, t0);
        assert_eq!(fetches(&run(&mut state, Event::TimerFired, t0 + TRAILER_DELAY)).len(), 1);

        run(&mut state, Event::KeyDown, t0 + Duration::from_secs(1));
        let t1 = t0 + Duration::from_secs(2);
        run(&mut state, Event::KeyUp, t1);
        let fired = run(&mut state, Event::TimerFired, t1 + TRAILER_DELAY);
        assert_eq!(fetches(&fired).len(), 1);
    }

    #[test]
    fn videos_for_replaced_cards_are_dropped() {
        let t0 = Instant::now();
        let mut state = started(5, 3, t0);
        run(&mut state, Event::KeyDown, t0);
        let fired = run(&mut state, Event::TimerFired, t0 + TRAILER_DELAY);
        let RequestPurpose::Videos { card, movie_id, generation } = fetches(&fired)[0].1 else {
            panic!("expected a videos request");
        };

        let seq = movies_seq(&run(&mut state, Event::NextFilter, t0));
        let mut replacement = page(5, 3);
        replacement.results[0].id = 999;
        run(&mut state, Event::MoviesLoaded { seq, result: Ok(replacement) }, t0);

        let (render, _) = handle_event(
            &mut state,
            Event::VideosLoaded { card, movie_id, generation, result: Ok(trailer()) },
            t0,
        )
        .unwrap();
        assert!(!render);
        assert!(state.cards[0].trailer.player().is_none());
    }

    fn with_player(fullscreen: bool) -> (AppState, Instant) {
        let t0 = Instant::now();
        let mut state = started(5, 3, t0);
        state.fullscreen_player = fullscreen;
        run(&mut state, Event::KeyDown, t0);
        let fired = run(&mut state, Event::TimerFired, t0 + TRAILER_DELAY);
        let RequestPurpose::Videos { card, movie_id, generation } = fetches(&fired)[0].1 else {
            panic!("expected a videos request");
        };
        run(&mut state, Event::VideosLoaded { card, movie_id, generation, result: Ok(trailer()) }, t0);
        (state, t0)
    }

    #[test]
    fn trailer_click_prefers_fullscreen_then_falls_back() {
        let (mut state, t0) = with_player(true);
        let url = "https://www.youtube.com/watch?v=official".to_string();

        assert_eq!(
            run(&mut state, Event::PlayTrailer, t0),
            vec![Action::RequestFullscreen { url: url.clone() }]
        );
        assert_eq!(
            run(&mut state, Event::Click { row: 6, col: 10 }, t0),
            vec![Action::RequestFullscreen { url: url.clone() }]
        );
        assert_eq!(
            run(&mut state, Event::PlaybackFailed { url: url.clone() }, t0),
            vec![Action::OpenExternal { url }]
        );
    }

    #[test]
    fn trailer_click_without_player_opens_externally() {
        let (mut state, t0) = with_player(false);
        assert_eq!(
            run(&mut state, Event::PlayTrailer, t0),
            vec![Action::OpenExternal {
                url: "https://www.youtube.com/watch?v=official".to_string()
            }]
        );

        run(&mut state, Event::KeyDown, t0);
        assert!(state.cards[0].trailer.player().is_none(), "leaving hover removes the player");
        assert!(run(&mut state, Event::Click { row: 6, col: 10 }, t0)
            .iter()
            .all(|a| matches!(a, Action::ScheduleWakeup(_))));
    }

    #[test]
    fn clicking_pagination_and_controls() {
        let t0 = Instant::now();
        let mut state = started(50, 3, t0);
        let layout = state.layout();

        // ‹‹ « 1 2 3 ... 50 » ››
        let next_span = layout.pagination_spans[layout.pagination_spans.len() - 2];
        run(&mut state, Event::Click { row: layout.pagination_row, col: next_span.0 + 1 }, t0);
        assert_eq!(state.view.page, 2);

        let actions = run(
            &mut state,
            Event::Click { row: layout.controls_row, col: layout.filter_span.0 },
            t0,
        );
        assert_eq!(state.filter_control, Mode::Recent);
        assert_eq!(state.view.page, 1);
        assert_eq!(fetches(&actions).len(), 1);

        let layout = state.layout();
        run(&mut state, Event::Click { row: layout.controls_row, col: layout.search_span.0 }, t0);
        assert_eq!(state.input_mode, InputMode::SearchTyping);
    }

    #[test]
    fn quit_closes_plugin() {
        let mut state = new_state();
        assert_eq!(run(&mut state, Event::CloseFocus, Instant::now()), vec![Action::CloseFocus]);
    }
}
