//! Cooperative timers on the session clock.
//!
//! The dashboard has no threads. Every timer is plain data polled from the
//! frame loop with the current session time in milliseconds, so timers can be
//! driven deterministically in tests. A timer is cancelled by dropping it.
//!
//! - [`Deadline`]: one-shot, fires once when `now >= due`
//! - [`IntervalTimer`]: periodic, reports how many whole periods elapsed so a
//!   slow frame catches up instead of losing ticks

/// One-shot timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deadline {
    due_ms: u64,
    fired: bool,
}

impl Deadline {
    /// Create a deadline `delay_ms` after `now_ms`.
    pub const fn after(now_ms: u64, delay_ms: u64) -> Self {
        Self {
            due_ms: now_ms.saturating_add(delay_ms),
            fired: false,
        }
    }

    /// Returns `true` exactly once, on the first poll at or after the due time.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if self.fired || now_ms < self.due_ms {
            return false;
        }
        self.fired = true;
        true
    }

    /// Progress through the delay in `0.0..=1.0`, measured from `start_ms`.
    pub fn progress(&self, start_ms: u64, now_ms: u64) -> f32 {
        let total = self.due_ms.saturating_sub(start_ms);
        if total == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(start_ms).min(total);
        elapsed as f32 / total as f32
    }
}

/// Periodic timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntervalTimer {
    period_ms: u64,
    next_ms: u64,
}

impl IntervalTimer {
    /// Create a timer whose first tick is one period after `now_ms`.
    ///
    /// A zero period is treated as 1 ms so `poll` always terminates.
    pub const fn starting_at(now_ms: u64, period_ms: u64) -> Self {
        let period_ms = if period_ms == 0 { 1 } else { period_ms };
        Self {
            period_ms,
            next_ms: now_ms.saturating_add(period_ms),
        }
    }

    /// Number of periods that elapsed since the last poll.
    pub fn poll(&mut self, now_ms: u64) -> u32 {
        if now_ms < self.next_ms {
            return 0;
        }
        let behind = now_ms - self.next_ms;
        let ticks = behind / self.period_ms + 1;
        self.next_ms = self.next_ms.saturating_add(ticks.saturating_mul(self.period_ms));
        u32::try_from(ticks).unwrap_or(u32::MAX)
    }
}
