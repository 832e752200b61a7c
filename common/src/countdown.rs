//! Emergency accept countdown.
//!
//! Counts down from [`COUNTDOWN_START_SECS`] in one-second ticks. Reaching
//! zero reports expiry exactly once; the flow controller turns that into an
//! automatic decline. The countdown is cancelled by dropping it.

use core::fmt::Write;

use heapless::String;

use crate::thresholds::{COUNTDOWN_START_SECS, COUNTDOWN_TICK_MS, COUNTDOWN_URGENT_SECS};
use crate::timer::IntervalTimer;

/// Running countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    remaining: u8,
    timer: IntervalTimer,
    expired: bool,
}

impl Countdown {
    /// Start a fresh countdown at `now_ms`.
    pub const fn start(now_ms: u64) -> Self {
        Self {
            remaining: COUNTDOWN_START_SECS,
            timer: IntervalTimer::starting_at(now_ms, COUNTDOWN_TICK_MS),
            expired: false,
        }
    }

    /// Advance the countdown. Returns `true` exactly once, when it reaches zero.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if self.expired {
            return false;
        }
        let ticks = self.timer.poll(now_ms);
        if ticks == 0 {
            return false;
        }
        let step = u8::try_from(ticks).unwrap_or(u8::MAX);
        self.remaining = self.remaining.saturating_sub(step);
        if self.remaining == 0 {
            self.expired = true;
            return true;
        }
        false
    }

    /// Whole seconds left.
    #[inline]
    pub const fn remaining_secs(&self) -> u8 { self.remaining }

    /// Whether the remaining time is in the urgent band.
    #[inline]
    pub const fn is_urgent(&self) -> bool { self.remaining <= COUNTDOWN_URGENT_SECS }

    /// Remaining time as `00:SS`.
    pub fn label(&self) -> String<8> {
        let mut s = String::new();
        let _ = write!(s, "00:{:02}", self.remaining);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_starts_at_thirty() {
        let c = Countdown::start(0);
        assert_eq!(c.remaining_secs(), 30);
        assert_eq!(c.label().as_str(), "00:30");
        assert!(!c.is_urgent());
    }

    #[test]
    fn test_countdown_ticks_each_second() {
        let mut c = Countdown::start(500);
        assert!(!c.poll(1_499));
        assert_eq!(c.remaining_secs(), 30);
        assert!(!c.poll(1_500));
        assert_eq!(c.remaining_secs(), 29);
        assert_eq!(c.label().as_str(), "00:29");
    }

    #[test]
    fn test_countdown_expires_exactly_once() {
        let mut c = Countdown::start(0);
        let mut fired = 0;
        for now in (0..=40_000).step_by(100) {
            if c.poll(now) {
                fired += 1;
            }
        }
        assert_eq!(fired, 1, "Expiry should be reported once");
        assert_eq!(c.remaining_secs(), 0);
        assert_eq!(c.label().as_str(), "00:00");
    }

    #[test]
    fn test_countdown_expires_after_long_stall() {
        let mut c = Countdown::start(0);
        assert!(c.poll(120_000), "A single late poll still expires");
        assert!(!c.poll(121_000));
    }

    #[test]
    fn test_countdown_urgent_band() {
        let mut c = Countdown::start(0);
        c.poll(19_000);
        assert_eq!(c.remaining_secs(), 11);
        assert!(!c.is_urgent());
        c.poll(20_000);
        assert!(c.is_urgent(), "10 s left is urgent");
    }
}
