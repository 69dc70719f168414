//! Cancelable timers driven by elapsed time
//!
//! Stand-ins for `setInterval`/`setTimeout` that only move when the owner
//! calls `advance`, so a test can replay ten seconds of spin instantly.

use crate::consts::MAX_TICKS_PER_ADVANCE;

/// Recurring timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    period_ms: u32,
    accumulator_ms: u32,
}

impl Interval {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms.max(1),
            accumulator_ms: 0,
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Ticks due after `elapsed_ms` (capped at `MAX_TICKS_PER_ADVANCE`)
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        self.accumulator_ms = self.accumulator_ms.saturating_add(elapsed_ms);
        let due = self.accumulator_ms / self.period_ms;
        self.accumulator_ms %= self.period_ms;
        due.min(MAX_TICKS_PER_ADVANCE)
    }
}

/// One-shot timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeout {
    remaining_ms: u32,
    fired: bool,
}

impl Timeout {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            remaining_ms: delay_ms,
            fired: false,
        }
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    /// True exactly once, on the call that crosses the deadline
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        if self.fired {
            return false;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        if self.remaining_ms == 0 {
            self.fired = true;
            return true;
        }
        false
    }
}

/// What fired during one `SpinTimers::advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerFires {
    pub shuffle_ticks: u32,
    pub settle: bool,
}

/// The shuffle interval and settle timeout of one spin
#[derive(Debug, Clone, Default)]
pub struct SpinTimers {
    shuffle: Option<Interval>,
    settle: Option<Timeout>,
}

impl SpinTimers {
    pub fn start(shuffle_tick_ms: u32, spin_duration_ms: u32) -> Self {
        Self {
            shuffle: Some(Interval::new(shuffle_tick_ms)),
            settle: Some(Timeout::new(spin_duration_ms)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.shuffle.is_some() || self.settle.is_some()
    }

    /// Clear both timers; returns true if anything was pending
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        self.shuffle = None;
        self.settle = None;
        was_active
    }

    /// Shuffle ticks only count up to the settle deadline; the settle
    /// firing clears the interval.
    pub fn advance(&mut self, elapsed_ms: u32) -> TimerFires {
        let until_settle = self
            .settle
            .as_ref()
            .map_or(elapsed_ms, |t| t.remaining_ms().min(elapsed_ms));

        let shuffle_ticks = self
            .shuffle
            .as_mut()
            .map_or(0, |interval| interval.advance(until_settle));

        let settle = self
            .settle
            .as_mut()
            .is_some_and(|timeout| timeout.advance(elapsed_ms));

        if settle {
            self.cancel();
        }

        TimerFires {
            shuffle_ticks,
            settle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_ticks() {
        let mut interval = Interval::new(80);
        assert_eq!(interval.advance(79), 0);
        assert_eq!(interval.advance(1), 1);
        assert_eq!(interval.advance(160), 2);
        assert_eq!(interval.advance(10_000), MAX_TICKS_PER_ADVANCE);
    }

    #[test]
    fn test_timeout_fires_once() {
        let mut timeout = Timeout::new(100);
        assert!(!timeout.advance(50));
        assert!(timeout.advance(60));
        assert!(!timeout.advance(1000));
    }

    #[test]
    fn test_spin_timers_settle_clears() {
        let mut timers = SpinTimers::start(80, 400);
        let fires = timers.advance(160);
        assert_eq!(fires, TimerFires { shuffle_ticks: 2, settle: false });

        let fires = timers.advance(1000);
        // Only 240ms of shuffle remained before the deadline
        assert_eq!(fires.shuffle_ticks, 3);
        assert!(fires.settle);
        assert!(!timers.is_active());
        assert_eq!(timers.advance(1000), TimerFires::default());
    }

    #[test]
    fn test_cancel() {
        let mut timers = SpinTimers::start(80, 400);
        assert!(timers.cancel());
        assert!(!timers.cancel());
        assert_eq!(timers.advance(1000), TimerFires::default());
    }
}
