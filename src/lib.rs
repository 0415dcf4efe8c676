//! Cinescope: a Zellij plugin for browsing movies from TMDB.
//!
//! Cinescope shows a paginated list of movie cards with:
//! - Filter categories: popular, top rated, upcoming, recent releases
//! - A genre selector fed by the TMDB genre catalog
//! - Debounced free-text search
//! - Hover trailers: resting on a card fetches its YouTube trailer and embeds
//!   a player link in the card
//! - Mouse and keyboard navigation, localized Italian or English UI

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Host calls
//! └─────────────────────────────────────────────────────┘
//!                        │ Event ↓   ↑ Action
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, timers, trailer lifecycle        │
//! │  - View state and query derivation                  │
//! └─────────────────────────────────────────────────────┘
//!         │                    │
//! ┌───────────────┐   ┌──────────────────┐
//! │ UI Layer      │   │ API Layer        │
//! │ (ui/)         │   │ (api/)           │
//! │ - Cards       │   │ - URL building   │
//! │ - Pagination  │   │ - Decoding       │
//! │ - Components  │   │ - Request tags   │
//! └───────────────┘   └──────────────────┘
//!         │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/), Infrastructure, Observability    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The library never calls the host. The event handler returns [`Action`]s and
//! the shim in `main.rs` performs them, feeding results back as [`Event`]s.
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/cinescope.wasm" {
//!         api_key "your-tmdb-v3-key"
//!         language "it-IT"
//!         theme "catppuccin-mocha"
//!         player "mpv --fs"
//!         opener "xdg-open"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use cinescope::{handle_event, initialize, Action, Config, Event};
//! use std::time::Instant;
//!
//! let config = Config {
//!     api_key: Some("key".to_string()),
//!     ..Default::default()
//! };
//! let mut state = initialize(&config);
//!
//! let (_render, actions) = handle_event(&mut state, Event::PermissionsGranted, Instant::now())?;
//! assert!(actions.iter().any(|a| matches!(a, Action::Fetch { .. })));
//! # Ok::<(), cinescope::CinescopeError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{CinescopeError, Result};
pub use ui::Theme;

use api::{TmdbClient, DEFAULT_LANGUAGE};
use domain::Locale;
use std::collections::BTreeMap;

/// Command used to open URLs when none is configured.
pub const DEFAULT_OPENER: &str = "xdg-open";

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone)]
pub struct Config {
    /// TMDB v3 API key. Without it every listing fails with a config error.
    pub api_key: Option<String>,

    /// Response language sent with every request, e.g. `it-IT` or `en-US`.
    /// Also selects the UI locale. Default: `it-IT`
    pub language: String,

    /// Built-in theme name. Ignored if `theme_file` loads.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. `~` expands to the sandbox home.
    pub theme_file: Option<String>,

    /// Filter directive for the log file. Default: `"info"`
    pub trace_level: Option<String>,

    /// Fullscreen player command; the trailer URL is appended as the last
    /// argument. Unset means trailers go straight to `opener`.
    pub player: Option<String>,

    /// Command that opens a URL. Default: `xdg-open`
    pub opener: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            language: DEFAULT_LANGUAGE.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
            player: None,
            opener: DEFAULT_OPENER.to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Blank values count as unset.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use cinescope::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_key".to_string(), "abc".to_string());
    /// map.insert("language".to_string(), "en-US".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_key.as_deref(), Some("abc"));
    /// assert_eq!(config.language, "en-US");
    /// assert_eq!(config.opener, "xdg-open");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        Self {
            api_key: get("api_key"),
            language: get("language").unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            theme_name: get("theme"),
            theme_file: get("theme_file").map(|p| infrastructure::expand_tilde(&p)),
            trace_level: get("trace_level"),
            player: get("player"),
            opener: get("opener").unwrap_or_else(|| DEFAULT_OPENER.to_string()),
        }
    }

    /// Argument vector launching the fullscreen player on `url`, if one is
    /// configured.
    #[must_use]
    pub fn player_command(&self, url: &str) -> Option<Vec<String>> {
        let player = self.player.as_deref()?;
        let mut argv: Vec<String> = player.split_whitespace().map(String::from).collect();
        if argv.is_empty() {
            return None;
        }
        argv.push(url.to_string());
        Some(argv)
    }

    /// Argument vector opening `url` with the system opener.
    #[must_use]
    pub fn opener_command(&self, url: &str) -> Vec<String> {
        let mut argv: Vec<String> = self.opener.split_whitespace().map(String::from).collect();
        if argv.is_empty() {
            argv.push(DEFAULT_OPENER.to_string());
        }
        argv.push(url.to_string());
        argv
    }
}

/// Builds the application state for `config`.
///
/// Resolves the theme (file, then name, then default), picks the locale from
/// the language tag and sets up the TMDB client. Nothing is fetched until
/// permissions are granted.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        language = %config.language,
        has_api_key = config.api_key.is_some(),
        has_player = config.player.is_some(),
        "initializing cinescope plugin"
    );

    let theme = Theme::resolve(config.theme_name.as_deref(), config.theme_file.as_deref());
    let locale = Locale::for_language(&config.language);
    let client = TmdbClient::new(config.api_key.clone(), config.language.clone());

    let mut state = AppState::new(client, locale, theme);
    state.fullscreen_player = config.player_command("").is_some();
    state
}
