// SPDX-License-Identifier: MPL-2.0
//! One-shot deadlines owned by the controller.
//!
//! Every suspension point of the controller is a [`TimerKind`]. At most one
//! deadline per kind is armed; arming a kind again replaces its deadline, which
//! is how a superseding operation unschedules the stale one.

use tokio::time::Instant;

/// The things the controller waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Periodic status poll.
    Poll,
    /// Post-load seek-mode calibration.
    Calibration,
    /// Settle wait after the calibration probe seek.
    ProbeSettle,
    /// Settle wait after a verified-seek attempt.
    SeekSettle,
    /// Quiet period before the scrub preview appears.
    PreviewDebounce,
}

impl TimerKind {
    /// Fixed firing order for deadlines that fall on the same instant.
    pub const ALL: [TimerKind; 5] = [
        TimerKind::SeekSettle,
        TimerKind::ProbeSettle,
        TimerKind::PreviewDebounce,
        TimerKind::Calibration,
        TimerKind::Poll,
    ];

    fn slot(self) -> usize {
        match self {
            TimerKind::SeekSettle => 0,
            TimerKind::ProbeSettle => 1,
            TimerKind::PreviewDebounce => 2,
            TimerKind::Calibration => 3,
            TimerKind::Poll => 4,
        }
    }
}

/// The armed deadlines, one slot per [`TimerKind`].
#[derive(Debug, Clone, Default)]
pub struct Timers {
    slots: [Option<Instant>; 5],
}

impl Timers {
    /// Arms `kind` to fire at `at`, replacing any earlier deadline for it.
    pub fn arm(&mut self, kind: TimerKind, at: Instant) {
        self.slots[kind.slot()] = Some(at);
    }

    /// Unschedules `kind`. Returns whether it was armed.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        self.slots[kind.slot()].take().is_some()
    }

    pub fn cancel_all(&mut self) {
        self.slots = [None; 5];
    }

    #[must_use]
    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.slots[kind.slot()].is_some()
    }

    #[must_use]
    pub fn deadline(&self, kind: TimerKind) -> Option<Instant> {
        self.slots[kind.slot()]
    }

    /// The earliest armed deadline.
    #[must_use]
    pub fn next(&self) -> Option<Instant> {
        self.slots.iter().flatten().min().copied()
    }

    /// Disarms and returns the earliest kind due at `now`.
    ///
    /// Ties resolve in [`TimerKind::ALL`] order.
    pub fn pop_due(&mut self, now: Instant) -> Option<TimerKind> {
        let kind = TimerKind::ALL
            .iter()
            .copied()
            .filter_map(|kind| self.deadline(kind).map(|at| (at, kind)))
            .filter(|(at, _)| *at <= now)
            .min_by_key(|(at, kind)| (*at, kind.slot()))
            .map(|(_, kind)| kind)?;
        self.cancel(kind);
        Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn empty_set_has_no_deadline() {
        let mut timers = Timers::default();
        assert_eq!(timers.next(), None);
        assert_eq!(timers.pop_due(Instant::now()), None);
    }

    #[test]
    fn rearming_replaces_the_deadline() {
        let start = Instant::now();
        let mut timers = Timers::default();
        let first = start + Duration::from_millis(400);
        let second = start + Duration::from_millis(900);
        timers.arm(TimerKind::PreviewDebounce, first);
        timers.arm(TimerKind::PreviewDebounce, second);
        assert_eq!(timers.next(), Some(second));
    }

    #[test]
    fn pop_due_returns_earliest_first() {
        let start = Instant::now();
        let mut timers = Timers::default();
        timers.arm(TimerKind::Poll, start + Duration::from_millis(500));
        timers.arm(TimerKind::Calibration, start + Duration::from_millis(600));
        timers.arm(TimerKind::SeekSettle, start + Duration::from_millis(180));

        let later = start + Duration::from_secs(1);
        assert_eq!(timers.pop_due(later), Some(TimerKind::SeekSettle));
        assert_eq!(timers.pop_due(later), Some(TimerKind::Poll));
        assert_eq!(timers.pop_due(later), Some(TimerKind::Calibration));
        assert_eq!(timers.pop_due(later), None);
    }

    #[test]
    fn pop_due_ignores_future_deadlines() {
        let start = Instant::now();
        let mut timers = Timers::default();
        timers.arm(TimerKind::Poll, start + Duration::from_millis(500));
        assert_eq!(timers.pop_due(start), None);
        assert!(timers.is_armed(TimerKind::Poll));
    }

    #[test]
    fn simultaneous_deadlines_fire_in_fixed_order() {
        let at = Instant::now();
        let mut timers = Timers::default();
        timers.arm(TimerKind::Poll, at);
        timers.arm(TimerKind::SeekSettle, at);
        assert_eq!(timers.pop_due(at), Some(TimerKind::SeekSettle));
        assert_eq!(timers.pop_due(at), Some(TimerKind::Poll));
    }

    #[test]
    fn cancel_reports_whether_armed() {
        let mut timers = Timers::default();
        assert!(!timers.cancel(TimerKind::Calibration));
        timers.arm(TimerKind::Calibration, Instant::now());
        assert!(timers.cancel(TimerKind::Calibration));
        timers.arm(TimerKind::Poll, Instant::now());
        timers.cancel_all();
        assert_eq!(timers.next(), None);
    }
}
