//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the Cinescope library and
//! the Zellij plugin system. It translates host events into library events,
//! runs the library's event handler, and performs the returned actions with
//! host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess` and `RunCommands`
//! 3. **Granted**: Fetch the genre catalog and the first listing page
//! 4. **Update**: Handle events, delegate to library layer
//! 5. **Render**: Record the viewport, call library render function
//!
//! # Event Mapping
//!
//! - `Key` → navigation, control and typing events (see below)
//! - `Mouse(Hover)` → `Event::Hover`, `Mouse(LeftClick)` → `Event::Click`
//! - `Mouse(ScrollDown/ScrollUp)` → `Event::KeyDown` / `Event::KeyUp`
//! - `WebRequestResult` → `GenresLoaded`, `MoviesLoaded` or `VideosLoaded`
//!   according to the request tag in the context
//! - `Timer` → `Event::TimerFired`
//! - `RunCommandResult` of a failed player launch → `Event::PlaybackFailed`
//!
//! # Keybindings
//!
//! Browsing:
//! - `j`/`Down`, `k`/`Up`: Move the card selection
//! - `Enter`: Play the selected card's trailer
//! - `g`/`G`: Next/previous genre
//! - `f`/`F`: Next/previous filter
//! - `/`: Type in the search box
//! - `l`/`Right`, `h`/`Left`: Next/previous page
//! - `L`, `H`: Jump ten pages forward/back
//! - `q`: Close plugin
//!
//! Typing in the search box:
//! - Characters and `Backspace`: Edit the query (submitted after a pause)
//! - `Ctrl+u`: Clear the query
//! - `Enter`: Search now
//! - `Esc`: Leave the search box

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::time::Instant;
use zellij_tile::prelude::*;

use cinescope::api::{decode_response, ApiResponse, RequestPurpose};
use cinescope::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Context key tagging `run_command` calls.
const RUN_CONTEXT_KEY: &str = "cinescope_run";
const RUN_PLAYBACK: &str = "playback";
const RUN_OPEN: &str = "open";
const RUN_URL_KEY: &str = "url";

/// Plugin state wrapper.
struct State {
    /// Core application state from library layer.
    app: cinescope::app::AppState,

    /// Parsed configuration, kept for the player and opener commands.
    config: Config,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: cinescope::initialize(&config),
            config,
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, builds the application state, requests
    /// permissions and subscribes to events. Nothing is fetched until the
    /// permissions are granted.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        cinescope::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(language = %config.language, "parsed configuration");
        if config.api_key.is_none() {
            tracing::warn!("no api_key configured, listings will fail");
        }
        self.app = cinescope::initialize(&config);
        self.config = config;

        request_permission(&[PermissionType::WebAccess, PermissionType::RunCommands]);

        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::RunCommandResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates a host event, runs the handler and executes its actions.
    ///
    /// Returns `true` if the plugin UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Mouse(mouse) => match Self::map_mouse_event(mouse) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, headers, body, context) => {
                match Self::map_web_result(status, &headers, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::TimerFired,
            zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, context) => {
                match Self::map_command_result(exit_code, &stderr, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => Event::PermissionsGranted,
                PermissionStatus::Denied => Event::PermissionsDenied,
            },
            _ => return false,
        };

        match handle_event(&mut self.app, our_event, Instant::now()) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(a);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.app.viewport = (rows, cols);
        cinescope::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(_) => "Mouse".to_string(),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if self.app.input_mode == InputMode::SearchTyping {
            if key.bare_key == BareKey::Char('u') && key.has_modifiers(&[KeyModifier::Ctrl]) {
                return Some(Event::ClearSearch);
            }
            return Some(match key.bare_key {
                BareKey::Esc => Event::ExitSearch,
                BareKey::Enter => Event::SubmitSearch,
                BareKey::Backspace => Event::Backspace,
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            });
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter => Event::PlayTrailer,
            BareKey::Char('g') => Event::NextGenre,
            BareKey::Char('G') => Event::PrevGenre,
            BareKey::Char('f') => Event::NextFilter,
            BareKey::Char('F') => Event::PrevFilter,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Right | BareKey::Char('l') => Event::NextPage,
            BareKey::Left | BareKey::Char('h') => Event::PrevPage,
            BareKey::Char('L') => Event::JumpForward,
            BareKey::Char('H') => Event::JumpBack,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Maps mouse events. Host lines are 0-based; layout rows are 1-based.
    fn map_mouse_event(mouse: Mouse) -> Option<Event> {
        let row = |line: isize| usize::try_from(line).ok().map(|l| l + 1);
        match mouse {
            Mouse::Hover(line, _col) => Some(Event::Hover { row: row(line)? }),
            Mouse::LeftClick(line, col) => Some(Event::Click { row: row(line)?, col }),
            Mouse::ScrollDown(_) => Some(Event::KeyDown),
            Mouse::ScrollUp(_) => Some(Event::KeyUp),
            _ => None,
        }
    }

    /// Decodes a web result according to the purpose tag in its context.
    fn map_web_result(
        status: u16,
        headers: &BTreeMap<String, String>,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let purpose = RequestPurpose::from_context(context)?;
        let response = ApiResponse::from_host(status, headers.len(), body);
        tracing::debug!(purpose = ?purpose, status = status, "web request result");

        Some(match purpose {
            RequestPurpose::Genres => Event::GenresLoaded(decode_response(&response)),
            RequestPurpose::Movies { seq } => Event::MoviesLoaded {
                seq,
                result: decode_response(&response),
            },
            RequestPurpose::Videos {
                card,
                movie_id,
                generation,
            } => Event::VideosLoaded {
                card,
                movie_id,
                generation,
                result: decode_response(&response),
            },
        })
    }

    /// Maps a finished command. Only failed player launches matter.
    fn map_command_result(
        exit_code: Option<i32>,
        stderr: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let kind = context.get(RUN_CONTEXT_KEY)?;
        let failed = exit_code != Some(0);

        if failed {
            tracing::warn!(
                kind = %kind,
                exit_code = ?exit_code,
                stderr = %String::from_utf8_lossy(stderr),
                "command failed"
            );
        }

        if kind == RUN_PLAYBACK && failed {
            let url = context.get(RUN_URL_KEY)?.clone();
            return Some(Event::PlaybackFailed { url });
        }
        None
    }

    fn run_context(kind: &str, url: &str) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(RUN_CONTEXT_KEY.to_string(), kind.to_string());
        context.insert(RUN_URL_KEY.to_string(), url.to_string());
        context
    }

    fn run(argv: &[String], context: BTreeMap<String, String>) {
        let args: Vec<&str> = argv.iter().map(String::as_str).collect();
        run_command(&args, context);
    }

    /// Performs one action with host calls.
    fn execute_action(&self, action: Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::Fetch { url, purpose } => {
                // The URL carries the credential; log the tag only.
                tracing::debug!(purpose = ?purpose, "dispatching request");
                web_request(url, HttpVerb::Get, BTreeMap::new(), Vec::new(), purpose.to_context());
            }
            Action::ScheduleWakeup(delay) => set_timeout(delay.as_secs_f64()),
            Action::RequestFullscreen { url } => match self.config.player_command(&url) {
                Some(argv) => Self::run(&argv, Self::run_context(RUN_PLAYBACK, &url)),
                None => Self::run(&self.config.opener_command(&url), Self::run_context(RUN_OPEN, &url)),
            },
            Action::OpenExternal { url } => {
                Self::run(&self.config.opener_command(&url), Self::run_context(RUN_OPEN, &url));
            }
        }
    }
}
