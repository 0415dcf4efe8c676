//! Cancellable timers on top of the host's fire-and-forget `set_timeout`.
//!
//! A Zellij timeout cannot be cancelled and its `Timer` event does not say which
//! request it answers. [`TimerQueue`] keeps the real deadlines instead. Each
//! scheduled timer asks the host for one wakeup; on every wakeup the queue fires
//! the deadlines that are due. Cancelling a timer just forgets its deadline, so
//! the wakeup it requested later finds nothing to do.
//!
//! A timer fires only once its deadline has passed. A wakeup that arrives
//! before the earliest remaining deadline (host timers are not exact) re-arms
//! a wakeup for that deadline.

use std::time::{Duration, Instant};

/// How far apart an outstanding wakeup and a deadline may be for the wakeup
/// to still count as covering it. Never used to fire early.
pub const WAKEUP_SLACK: Duration = Duration::from_millis(2);

/// Handle returned by [`TimerQueue::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Search text has been quiet long enough to submit.
    SearchDebounce,
    /// A card has been hovered long enough to load its trailer.
    TrailerDelay { card: usize },
}

#[derive(Debug, Clone)]
struct PendingTimer {
    id: TimerId,
    deadline: Instant,
    kind: TimerKind,
}

/// Deadline queue multiplexed over host wakeups.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    next_id: u64,
    pending: Vec<PendingTimer>,
    wakeups: Vec<Instant>,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `kind` to fire `delay` after `now`.
    ///
    /// The caller must request a host wakeup of `delay`.
    pub fn schedule(&mut self, kind: TimerKind, delay: Duration, now: Instant) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let deadline = now + delay;
        self.pending.push(PendingTimer { id, deadline, kind });
        self.wakeups.push(deadline);
        tracing::trace!(timer = ?id, kind = ?kind, delay_ms = delay.as_millis() as u64, "timer scheduled");
        id
    }

    /// Cancels a timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.id != id);
        let cancelled = self.pending.len() != before;
        if cancelled {
            tracing::trace!(timer = ?id, "timer cancelled");
        }
        cancelled
    }

    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|t| t.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Handles one host wakeup.
    ///
    /// Returns the timers that are due, in deadline order, and the delay of a
    /// wakeup to re-arm if a remaining deadline has no wakeup covering it.
    pub fn wake(&mut self, now: Instant) -> (Vec<(TimerId, TimerKind)>, Option<Duration>) {
        if let Some(earliest) = self
            .wakeups
            .iter()
            .enumerate()
            .min_by_key(|(_, w)| **w)
            .map(|(i, _)| i)
        {
            self.wakeups.swap_remove(earliest);
        }

        let mut due: Vec<PendingTimer> = Vec::new();
        self.pending.retain(|t| {
            if t.deadline <= now {
                due.push(t.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|t| t.deadline);

        let rearm = self.pending.iter().map(|t| t.deadline).min().and_then(|next| {
            let covered = self.wakeups.iter().any(|w| *w + WAKEUP_SLACK >= next);
            if covered {
                None
            } else {
                self.wakeups.push(next);
                Some(next.saturating_duration_since(now))
            }
        });

        (due.into_iter().map(|t| (t.id, t.kind)).collect(), rearm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEBOUNCE: Duration = Duration::from_millis(450);
    const TRAILER: Duration = Duration::from_millis(750);

    #[test]
    fn fires_when_due() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let id = timers.schedule(TimerKind::SearchDebounce, DEBOUNCE, t0);
        assert!(timers.is_pending(id));

        let (due, rearm) = timers.wake(t0 + DEBOUNCE);
        assert_eq!(due, vec![(id, TimerKind::SearchDebounce)]);
        assert_eq!(rearm, None);
        assert!(timers.is_empty());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let id = timers.schedule(TimerKind::TrailerDelay { card: 0 }, TRAILER, t0);
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));

        let (due, rearm) = timers.wake(t0 + TRAILER);
        assert!(due.is_empty());
        assert_eq!(rearm, None);
    }

    #[test]
    fn early_wakeup_rearms_for_remaining_deadline() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let id = timers.schedule(TimerKind::SearchDebounce, DEBOUNCE, t0);

        let (due, rearm) = timers.wake(t0 + Duration::from_millis(400));
        assert!(due.is_empty());
        assert_eq!(rearm, Some(Duration::from_millis(50)));

        let (due, rearm) = timers.wake(t0 + DEBOUNCE);
        assert_eq!(due, vec![(id, TimerKind::SearchDebounce)]);
        assert_eq!(rearm, None);
    }

    #[test]
    fn marginally_early_wakeup_does_not_fire() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let id = timers.schedule(TimerKind::TrailerDelay { card: 0 }, TRAILER, t0);

        let (due, rearm) = timers.wake(t0 + TRAILER - Duration::from_millis(1));
        assert!(due.is_empty());
        assert_eq!(rearm, Some(Duration::from_millis(1)));

        let (due, _) = timers.wake(t0 + TRAILER);
        assert_eq!(due, vec![(id, TimerKind::TrailerDelay { card: 0 })]);
    }

    #[test]
    fn leftover_wakeup_of_cancelled_timer_does_not_fire_others() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let trailer = timers.schedule(TimerKind::TrailerDelay { card: 0 }, TRAILER, t0);
        let stale = timers.schedule(TimerKind::SearchDebounce, DEBOUNCE, t0 + Duration::from_millis(298));
        timers.cancel(stale);

        let (due, rearm) = timers.wake(t0 + Duration::from_millis(748));
        assert!(due.is_empty());
        assert_eq!(rearm, None, "the trailer's own wakeup is still outstanding");
        assert!(timers.is_pending(trailer));
    }

    #[test]
    fn mixed_deadlines_fire_in_order() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let trailer = timers.schedule(TimerKind::TrailerDelay { card: 2 }, TRAILER, t0);
        let debounce = timers.schedule(TimerKind::SearchDebounce, DEBOUNCE, t0);

        let (due, rearm) = timers.wake(t0 + DEBOUNCE);
        assert_eq!(due, vec![(debounce, TimerKind::SearchDebounce)]);
        assert_eq!(rearm, None, "the trailer wakeup is still outstanding");

        let (due, _) = timers.wake(t0 + TRAILER);
        assert_eq!(due, vec![(trailer, TimerKind::TrailerDelay { card: 2 })]);
    }

    #[test]
    fn ids_are_unique() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let a = timers.schedule(TimerKind::SearchDebounce, DEBOUNCE, t0);
        let b = timers.schedule(TimerKind::SearchDebounce, DEBOUNCE, t0);
        assert_ne!(a, b);
        assert_eq!(timers.len(), 2);
    }
}
