//! Centralized timing and threshold configuration.
//!
//! All values are compile-time constants with validation assertions, so the
//! countdown, dispatch and signal feed agree on one set of numbers.
//!
//! # Compile-Time Validation
//!
//! Each group carries `const` assertions on ordering. A misconfigured value
//! (for example a yellow threshold above the red one) fails the build.

// =============================================================================
// Dispatch / Alert Timing
// =============================================================================

/// Delay between going online and the simulated emergency alert (ms).
pub const DISPATCH_DELAY_MS: u64 = 3_000;

/// Seconds the driver has to accept an emergency before it auto-declines.
pub const COUNTDOWN_START_SECS: u8 = 30;

/// Countdown tick period (ms).
pub const COUNTDOWN_TICK_MS: u64 = 1_000;

/// At or below this many seconds the countdown is drawn as urgent.
pub const COUNTDOWN_URGENT_SECS: u8 = 10;

const _: () = assert!(COUNTDOWN_URGENT_SECS < COUNTDOWN_START_SECS);
const _: () = assert!(COUNTDOWN_START_SECS > 0);

// =============================================================================
// Traffic Signal Feed
// =============================================================================

/// Number of simulated signals between the ambulance and the hospital.
pub const SIGNAL_COUNT: usize = 5;

/// Route length used to seed signal distances (km).
pub const ROUTE_LENGTH_KM: f32 = 4.2;

/// Signals farther than this stay red (km).
pub const SIGNAL_RED_ABOVE_KM: f32 = 2.5;

/// Signals farther than this (and not red) turn yellow; closer ones turn green (km).
pub const SIGNAL_YELLOW_ABOVE_KM: f32 = 1.5;

/// Distance every signal closes per feed tick (km).
pub const SIGNAL_STEP_KM: f32 = 0.2;

/// Feed tick period (ms).
pub const SIGNAL_TICK_MS: u64 = 2_000;

const _: () = assert!(SIGNAL_YELLOW_ABOVE_KM < SIGNAL_RED_ABOVE_KM);
const _: () = assert!(SIGNAL_RED_ABOVE_KM < ROUTE_LENGTH_KM);
const _: () = assert!(SIGNAL_COUNT > 0);

// =============================================================================
// Voice Capture
// =============================================================================

/// Recording duration tick period (ms).
pub const RECORDING_TICK_MS: u64 = 1_000;

// =============================================================================
// Trip Summary
// =============================================================================

/// Length of the simulated "Sharing with Hospital..." animation (ms).
pub const SHARE_DURATION_MS: u64 = 3_000;

/// Milliseconds per minute, for trip duration display.
pub const MS_PER_MINUTE: u64 = 60_000;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
#[allow(clippy::assertions_on_constants)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_threshold_ordering() {
        assert!(SIGNAL_YELLOW_ABOVE_KM < SIGNAL_RED_ABOVE_KM);
        assert!(SIGNAL_RED_ABOVE_KM < ROUTE_LENGTH_KM);
    }

    #[test]
    fn test_countdown_urgent_inside_window() {
        assert!(COUNTDOWN_URGENT_SECS < COUNTDOWN_START_SECS);
    }

    #[test]
    fn test_countdown_total_is_thirty_seconds() {
        let total_ms = u64::from(COUNTDOWN_START_SECS) * COUNTDOWN_TICK_MS;
        assert_eq!(total_ms, 30_000, "Emergency should auto-decline after 30 s");
    }

    #[test]
    fn test_signal_step_reaches_zero() {
        // Farthest signal starts at 4.2 * 5/6 = 3.5 km; it must reach 0 in finite ticks
        let ticks = (ROUTE_LENGTH_KM / SIGNAL_STEP_KM).ceil() as u32;
        assert!(ticks > 0 && ticks < 100);
    }
}
