//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the plugin runtime (`main.rs`) and the pure
//! `api`/`domain`/`ui` modules. It never calls the host directly.
//!
//! ```text
//! Host event → Event → handle_event → AppState transitions → Actions → Host calls
//!                 ↑                                               │
//!                 └──── web results, timer wakeups, exit codes ───┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and transition coordinator
//! - [`modes`]: Input mode and listing status
//! - [`state`]: Central application state and view model computation
//! - [`timers`]: Cancellable timers over host wakeups
//! - [`trailer`]: Per-card hover trailer lifecycle
//! - [`view_state`]: Browsing state, pure transitions and query derivation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;
pub mod timers;
pub mod trailer;
pub mod view_state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, ListingStatus};
pub use state::{AppState, Card};
pub use timers::{TimerId, TimerKind, TimerQueue};
pub use trailer::{EmbeddedPlayer, TrailerController, TrailerPhase};
pub use view_state::{Mode, ViewState};
