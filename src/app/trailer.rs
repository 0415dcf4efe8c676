//! Per-card hover trailer lifecycle.
//!
//! ```text
//!            hover enter               delay expires
//!   Idle ──────────────────▶ Pending ───────────────▶ Loaded ──┐
//!    ▲                          │     (fetch videos)            │
//!    │        hover leave       │                               │ hover leave /
//!    └──────────────────────────┴───────────────────────────────┘ card removed
//! ```
//!
//! `Loaded` is entered when the delay expires, before the videos arrive, and
//! holds the embedded player once a YouTube video is found. Every exit to `Idle`
//! bumps the controller's generation so a videos response from an abandoned
//! cycle cannot attach a player.

use crate::app::timers::{TimerId, TimerKind, TimerQueue};
use crate::domain::error::Result;
use crate::domain::{Video, VideoList};
use std::time::{Duration, Instant};

/// Hover time before a trailer starts loading.
pub const TRAILER_DELAY: Duration = Duration::from_millis(750);

/// A muted, autoplaying trailer attached to a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedPlayer {
    pub video_key: String,
    pub title: String,
    /// Embed URL with autoplay and mute enabled.
    pub embed_url: String,
    /// Watch page, used for fullscreen playback and the external fallback.
    pub watch_url: String,
}

impl EmbeddedPlayer {
    #[must_use]
    pub fn youtube(video: &Video, movie_title: &str) -> Self {
        let key = &video.key;
        Self {
            video_key: key.clone(),
            title: format!("{movie_title} - Trailer"),
            embed_url: format!(
                "https://www.youtube.com/embed/{key}?autoplay=1&mute=1&rel=0&controls=1&modestbranding=1"
            ),
            watch_url: format!("https://www.youtube.com/watch?v={key}"),
        }
    }
}

/// Lifecycle phase of a card's trailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrailerPhase {
    Idle,
    Pending { timer: TimerId },
    Loaded { player: Option<EmbeddedPlayer> },
}

/// Trailer state of one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailerController {
    card: usize,
    movie_id: u64,
    title: String,
    phase: TrailerPhase,
    generation: u64,
}

impl TrailerController {
    #[must_use]
    pub fn new(card: usize, movie_id: u64, title: impl Into<String>) -> Self {
        Self {
            card,
            movie_id,
            title: title.into(),
            phase: TrailerPhase::Idle,
            generation: 0,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> &TrailerPhase {
        &self.phase
    }

    /// The embedded player, when one is attached.
    #[must_use]
    pub const fn player(&self) -> Option<&EmbeddedPlayer> {
        match &self.phase {
            TrailerPhase::Loaded { player } => player.as_ref(),
            _ => None,
        }
    }

    /// Starts the hover delay.
    ///
    /// Replaces any timer still pending from an earlier cycle. Returns the
    /// wakeup delay the host must be asked for, or `None` when the trailer is
    /// already loaded.
    pub fn hover_enter(&mut self, timers: &mut TimerQueue, now: Instant) -> Option<Duration> {
        match self.phase {
            TrailerPhase::Loaded { .. } => None,
            TrailerPhase::Pending { timer } => {
                timers.cancel(timer);
                self.arm(timers, now)
            }
            TrailerPhase::Idle => self.arm(timers, now),
        }
    }

    fn arm(&mut self, timers: &mut TimerQueue, now: Instant) -> Option<Duration> {
        let timer = timers.schedule(TimerKind::TrailerDelay { card: self.card }, TRAILER_DELAY, now);
        self.phase = TrailerPhase::Pending { timer };
        Some(TRAILER_DELAY)
    }

    /// Cancels a pending delay or removes the player; back to `Idle`.
    pub fn hover_leave(&mut self, timers: &mut TimerQueue) {
        match std::mem::replace(&mut self.phase, TrailerPhase::Idle) {
            TrailerPhase::Idle => return,
            TrailerPhase::Pending { timer } => {
                timers.cancel(timer);
                tracing::trace!(card = self.card, "trailer delay cancelled");
            }
            TrailerPhase::Loaded { player } => {
                tracing::debug!(
                    card = self.card,
                    had_player = player.is_some(),
                    "trailer unloaded"
                );
            }
        }
        self.generation += 1;
    }

    /// Handles the expiry of this card's delay timer.
    ///
    /// Returns the generation to tag the videos request with, or `None` if the
    /// timer does not belong to the current cycle.
    pub fn delay_expired(&mut self, timer: TimerId) -> Option<u64> {
        match self.phase {
            TrailerPhase::Pending { timer: current } if current == timer => {
                self.phase = TrailerPhase::Loaded { player: None };
                Some(self.generation)
            }
            _ => None,
        }
    }

    /// Applies a videos response. Returns `true` if a player was attached.
    ///
    /// Failures and listings without a YouTube video leave the card without a
    /// player; nothing is surfaced to the user.
    pub fn videos_loaded(&mut self, generation: u64, result: Result<VideoList>) -> bool {
        if generation != self.generation || self.phase != (TrailerPhase::Loaded { player: None }) {
            tracing::debug!(
                card = self.card,
                response_generation = generation,
                current_generation = self.generation,
                "discarding stale videos response"
            );
            return false;
        }

        let videos = match result {
            Ok(videos) => videos,
            Err(e) => {
                tracing::warn!(movie_id = self.movie_id, error = %e, "failed loading trailer");
                return false;
            }
        };

        let Some(video) = videos.pick_trailer() else {
            tracing::debug!(movie_id = self.movie_id, "no YouTube video available");
            return false;
        };

        self.phase = TrailerPhase::Loaded {
            player: Some(EmbeddedPlayer::youtube(video, &self.title)),
        };
        true
    }

    /// Click handler of the embedded player: the URL to play, if attached.
    #[must_use]
    pub fn activate(&self) -> Option<&str> {
        self.player().map(|p| p.watch_url.as_str())
    }

    /// Releases everything the card holds (card removed from the list).
    pub fn teardown(&mut self, timers: &mut TimerQueue) {
        self.hover_leave(timers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CinescopeError;

    fn trailer_list() -> VideoList {
        VideoList {
            results: vec![Video {
                key: "m8e-FF8MsqU".to_string(),
                name: "Trailer".to_string(),
                site: "YouTube".to_string(),
                kind: "Trailer".to_string(),
            }],
        }
    }

    fn fire(controller: &mut TrailerController, timers: &mut TimerQueue, now: Instant) -> Option<u64> {
        let (due, _) = timers.wake(now);
        due.into_iter()
            .filter_map(|(id, _)| controller.delay_expired(id))
            .next()
    }

    #[test]
    fn leaving_before_delay_never_loads() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let mut c = TrailerController::new(0, 603, "Matrix");

        assert_eq!(c.hover_enter(&mut timers, t0), Some(TRAILER_DELAY));
        c.hover_leave(&mut timers);
        assert_eq!(c.phase(), &TrailerPhase::Idle);
        assert_eq!(fire(&mut c, &mut timers, t0 + TRAILER_DELAY), None);
    }

    #[test]
    fn delay_expiry_then_videos_attach_player() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let mut c = TrailerController::new(0, 603, "Matrix");
        c.hover_enter(&mut timers, t0);

        let generation = fire(&mut c, &mut timers, t0 + TRAILER_DELAY).expect("delay fired");
        assert!(c.player().is_none());
        assert!(c.videos_loaded(generation, Ok(trailer_list())));

        let player = c.player().expect("player attached");
        assert!(player.embed_url.contains("autoplay=1"));
        assert!(player.embed_url.contains("mute=1"));
        assert_eq!(c.activate(), Some("https://www.youtube.com/watch?v=m8e-FF8MsqU"));
    }

    #[test]
    fn hover_enter_while_loaded_is_a_no_op() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let mut c = TrailerController::new(0, 603, "Matrix");
        c.hover_enter(&mut timers, t0);
        let generation = fire(&mut c, &mut timers, t0 + TRAILER_DELAY).unwrap();
        c.videos_loaded(generation, Ok(trailer_list()));

        assert_eq!(c.hover_enter(&mut timers, t0 + TRAILER_DELAY), None);
        assert!(timers.is_empty());
        assert!(c.player().is_some());
    }

    #[test]
    fn leave_removes_player_and_detaches_click() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let mut c = TrailerController::new(0, 603, "Matrix");
        c.hover_enter(&mut timers, t0);
        let generation = fire(&mut c, &mut timers, t0 + TRAILER_DELAY).unwrap();
        c.videos_loaded(generation, Ok(trailer_list()));

        c.hover_leave(&mut timers);
        assert!(c.player().is_none());
        assert_eq!(c.activate(), None);
        assert_eq!(c.phase(), &TrailerPhase::Idle);
    }

    #[test]
    fn late_response_after_leave_is_discarded() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let mut c = TrailerController::new(0, 603, "Matrix");
        c.hover_enter(&mut timers, t0);
        let stale = fire(&mut c, &mut timers, t0 + TRAILER_DELAY).unwrap();
        c.hover_leave(&mut timers);

        assert!(!c.videos_loaded(stale, Ok(trailer_list())));
        assert!(c.player().is_none());

        c.hover_enter(&mut timers, t0 + Duration::from_secs(2));
        let fresh = fire(&mut c, &mut timers, t0 + Duration::from_secs(2) + TRAILER_DELAY).unwrap();
        assert_ne!(stale, fresh);
        assert!(!c.videos_loaded(stale, Ok(trailer_list())));
        assert!(c.videos_loaded(fresh, Ok(trailer_list())));
    }

    #[test]
    fn failures_and_missing_videos_stay_silent() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let mut c = TrailerController::new(0, 603, "Matrix");
        c.hover_enter(&mut timers, t0);
        let generation = fire(&mut c, &mut timers, t0 + TRAILER_DELAY).unwrap();

        assert!(!c.videos_loaded(generation, Err(CinescopeError::Upstream { status: 404 })));
        assert!(c.player().is_none());

        c.hover_leave(&mut timers);
        c.hover_enter(&mut timers, t0);
        let generation = fire(&mut c, &mut timers, t0 + TRAILER_DELAY).unwrap();
        assert!(!c.videos_loaded(generation, Ok(VideoList::default())));
        assert!(c.player().is_none());
    }

    #[test]
    fn re_entering_replaces_pending_timer() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let mut c = TrailerController::new(0, 603, "Matrix");
        c.hover_enter(&mut timers, t0);
        c.hover_enter(&mut timers, t0 + Duration::from_millis(300));
        assert_eq!(timers.len(), 1);

        assert_eq!(fire(&mut c, &mut timers, t0 + TRAILER_DELAY), None);
        assert!(fire(&mut c, &mut timers, t0 + Duration::from_millis(300) + TRAILER_DELAY).is_some());
    }
}
