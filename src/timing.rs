//! Timing constants and the session clock.
//!
//! These use `std::time` which is not available in `no_std` environments, so
//! they live here rather than in the common crate. The common crate only ever
//! sees plain milliseconds from [`SessionClock::now_ms`].

use std::time::{Duration, Instant};

/// Target frame time (~50 FPS). The main loop sleeps if frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// Duration that toast popups remain visible on screen (ms).
pub const POPUP_DURATION_MS: u64 = 2_500;

/// Monotonic milliseconds since the dashboard started.
#[derive(Clone, Copy, Debug)]
pub struct SessionClock {
    start: Instant,
}

impl SessionClock {
    pub fn start() -> Self { Self { start: Instant::now() } }

    /// Milliseconds since [`start`](Self::start). Saturates instead of wrapping.
    #[inline]
    pub fn now_ms(&self) -> u64 { u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_is_monotonic() {
        let clock = SessionClock::start();
        let a = clock.now_ms();
        std::thread::sleep(Duration::from_millis(5));
        let b = clock.now_ms();
        assert!(b >= a + 5, "Clock should advance with wall time ({a} -> {b})");
    }

    #[test]
    fn test_frame_time_is_fifty_fps() {
        assert_eq!(FRAME_TIME.as_millis(), 20);
    }
}
