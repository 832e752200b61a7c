//! Simulated traffic-signal preemption feed.
//!
//! There is no routing engine. The route is the straight line from the
//! ambulance to the hospital, with [`SIGNAL_COUNT`] signals spaced evenly
//! along it (endpoints excluded). Every feed tick each signal is recolored
//! from its current distance and then moved [`SIGNAL_STEP_KM`] closer, so a
//! signal shows the color of its previous distance for one tick.
//!
//! ```text
//! ambulance ---- s1 ---- s2 ---- s3 ---- s4 ---- s5 ---- hospital
//!           1/6     2/6     3/6     4/6     5/6
//! ```

use embedded_graphics::pixelcolor::Rgb565;

use crate::colors::{SIGNAL_GREEN, SIGNAL_RED, SIGNAL_YELLOW};
use crate::thresholds::{
    ROUTE_LENGTH_KM,
    SIGNAL_COUNT,
    SIGNAL_RED_ABOVE_KM,
    SIGNAL_STEP_KM,
    SIGNAL_TICK_MS,
    SIGNAL_YELLOW_ABOVE_KM,
};
use crate::timer::IntervalTimer;
use crate::trip::GeoPoint;

// =============================================================================
// Static Banner Values
// =============================================================================

/// ETA shown in the navigation banner.
pub const BANNER_ETA: &str = "12 min";

/// Remaining distance shown in the navigation banner.
pub const BANNER_DISTANCE: &str = "4.2 km";

/// Current speed shown in the navigation banner.
pub const BANNER_SPEED: &str = "45 km/h";

/// Preemption status line.
pub const PREEMPTION_ACTIVE: &str = "Preemption Active";

/// Preemption detail line.
pub const GREEN_LIGHTS_AHEAD: &str = "Green Lights Ahead";

/// Distance to the next signal.
pub const NEXT_SIGNAL: &str = "Next signal: 200m";

// =============================================================================
// Signals
// =============================================================================

/// Signal light color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalStatus {
    Red,
    Yellow,
    Green,
}

impl SignalStatus {
    /// Status for a signal `distance_km` away.
    pub fn for_distance(distance_km: f32) -> Self {
        if distance_km > SIGNAL_RED_ABOVE_KM {
            Self::Red
        } else if distance_km > SIGNAL_YELLOW_ABOVE_KM {
            Self::Yellow
        } else {
            Self::Green
        }
    }

    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Red => SIGNAL_RED,
            Self::Yellow => SIGNAL_YELLOW,
            Self::Green => SIGNAL_GREEN,
        }
    }
}

/// One simulated traffic signal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrafficSignal {
    /// 1-based position along the route.
    pub id: u8,
    pub location: GeoPoint,
    pub status: SignalStatus,
    pub distance_km: f32,
}

/// The set of signals along the route plus the timer that advances them.
#[derive(Clone, Debug, PartialEq)]
pub struct SignalFeed {
    signals: [TrafficSignal; SIGNAL_COUNT],
    timer: IntervalTimer,
}

impl SignalFeed {
    /// Place signals between `from` and `to`; the first update is one tick after `now_ms`.
    pub fn new(from: GeoPoint, to: GeoPoint, now_ms: u64) -> Self {
        let segments = (SIGNAL_COUNT + 1) as f32;
        let signals = core::array::from_fn(|i| {
            let fraction = (i + 1) as f32 / segments;
            TrafficSignal {
                id: (i + 1) as u8,
                location: from.lerp(to, fraction),
                status: SignalStatus::Red,
                distance_km: ROUTE_LENGTH_KM * (1.0 - fraction),
            }
        });
        Self {
            signals,
            timer: IntervalTimer::starting_at(now_ms, SIGNAL_TICK_MS),
        }
    }

    #[inline]
    pub fn signals(&self) -> &[TrafficSignal] { &self.signals }

    /// Apply one update: recolor from the current distance, then close in.
    pub fn step(&mut self) {
        for s in &mut self.signals {
            s.status = SignalStatus::for_distance(s.distance_km);
            s.distance_km = (s.distance_km - SIGNAL_STEP_KM).max(0.0);
        }
    }

    /// Apply every update due by `now_ms`. Returns the number applied.
    pub fn poll(&mut self, now_ms: u64) -> u32 {
        let ticks = self.timer.poll(now_ms);
        for _ in 0..ticks {
            self.step();
        }
        ticks
    }

    /// Number of signals currently green.
    pub fn green_count(&self) -> usize { self.signals.iter().filter(|s| s.status == SignalStatus::Green).count() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{AMBULANCE_POSITION, DESTINATION_LOCATION};

    fn feed() -> SignalFeed { SignalFeed::new(AMBULANCE_POSITION, DESTINATION_LOCATION, 0) }

    #[test]
    fn test_initial_signals() {
        let f = feed();
        assert_eq!(f.signals().len(), 5);
        for (i, s) in f.signals().iter().enumerate() {
            let fraction = (i + 1) as f32 / 6.0;
            assert_eq!(s.id as usize, i + 1);
            assert_eq!(s.status, SignalStatus::Red, "All signals start red");
            assert!((s.distance_km - 4.2 * (1.0 - fraction)).abs() < 1e-4);
        }
        assert!((f.signals()[0].distance_km - 3.5).abs() < 1e-4);
        assert!((f.signals()[4].distance_km - 0.7).abs() < 1e-4);
    }

    #[test]
    fn test_endpoints_excluded() {
        let f = feed();
        for s in f.signals() {
            assert_ne!(s.location, AMBULANCE_POSITION);
            assert_ne!(s.location, DESTINATION_LOCATION);
            assert!(s.location.lat > AMBULANCE_POSITION.lat && s.location.lat < DESTINATION_LOCATION.lat);
        }
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(SignalStatus::for_distance(2.6), SignalStatus::Red);
        assert_eq!(SignalStatus::for_distance(2.5), SignalStatus::Yellow, "2.5 is not above 2.5");
        assert_eq!(SignalStatus::for_distance(1.6), SignalStatus::Yellow);
        assert_eq!(SignalStatus::for_distance(1.5), SignalStatus::Green);
        assert_eq!(SignalStatus::for_distance(0.0), SignalStatus::Green);
    }

    #[test]
    fn test_recolor_uses_distance_before_decrement() {
        let mut f = feed();
        // Signal 5 starts at 0.7 km: green after the first update, then 0.5 km
        f.step();
        let s5 = f.signals()[4];
        assert_eq!(s5.status, SignalStatus::Green);
        assert!((s5.distance_km - 0.5).abs() < 1e-4);
        // Signal 1 at 3.5 km stays red and moves to 3.3 km
        let s1 = f.signals()[0];
        assert_eq!(s1.status, SignalStatus::Red);
        assert!((s1.distance_km - 3.3).abs() < 1e-4);
    }

    #[test]
    fn test_distance_floors_at_zero() {
        let mut f = feed();
        for _ in 0..50 {
            f.step();
        }
        for s in f.signals() {
            assert_eq!(s.distance_km, 0.0);
            assert_eq!(s.status, SignalStatus::Green);
        }
        assert_eq!(f.green_count(), 5);
    }

    #[test]
    fn test_poll_every_two_seconds() {
        let mut f = feed();
        assert_eq!(f.poll(1_999), 0);
        assert_eq!(f.poll(2_000), 1);
        assert_eq!(f.poll(8_000), 3, "Catches up after a stall");
        assert!((f.signals()[0].distance_km - (3.5 - 4.0 * 0.2)).abs() < 1e-3);
    }
}
