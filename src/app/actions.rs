//! Side effects requested by the event handler.
//!
//! The handler never touches the host. It returns a `Vec<Action>` and the
//! plugin runtime executes them in order after each event.

use crate::api::RequestPurpose;
use std::time::Duration;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Dispatches a GET request. The purpose travels in the request context
    /// and comes back with the result.
    Fetch {
        url: String,
        purpose: RequestPurpose,
    },

    /// Asks the host for a `Timer` event after the given delay.
    ScheduleWakeup(Duration),

    /// Plays a trailer with the configured fullscreen player.
    ///
    /// A failed launch comes back as `Event::PlaybackFailed`.
    RequestFullscreen {
        url: String,
    },

    /// Opens a URL with the system opener.
    OpenExternal {
        url: String,
    },
}
