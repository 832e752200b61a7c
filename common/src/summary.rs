//! Trip summary text and the simulated share with the hospital.
//!
//! Distance and average speed are fixed display values; only the duration is
//! computed from the trip clock.

use core::fmt::Write;

use heapless::{String, Vec};

use crate::text::truncated;
use crate::thresholds::SHARE_DURATION_MS;
use crate::timer::Deadline;
use crate::trip::{Consciousness, Trip, VitalsRecord, VoiceNote};

/// Distance shown in the trip statistics.
pub const TRIP_DISTANCE: &str = "5.2 km";

/// Average speed shown in the trip statistics.
pub const TRIP_AVG_SPEED: &str = "17.3 km/h";

/// Maximum detail lines for one vitals record.
pub const MAX_VITALS_LINES: usize = 5;

// =============================================================================
// Statistics
// =============================================================================

/// Values for the "Trip Statistics" card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TripStats {
    pub duration_minutes: u64,
    /// `None` if the trip never had a priority assigned.
    pub criticality: Option<&'static str>,
    pub hospital: String<32>,
}

impl TripStats {
    pub fn from_trip(trip: &Trip, now_ms: u64) -> Self {
        Self {
            duration_minutes: trip.duration_minutes(now_ms),
            criticality: trip.priority.map(|p| p.badge()),
            hospital: trip.destination.as_ref().map(|d| d.name.clone()).unwrap_or_default(),
        }
    }

    /// `"N minutes"`.
    pub fn duration_label(&self) -> String<24> {
        let mut s = String::new();
        let _ = write!(s, "{} minutes", self.duration_minutes);
        s
    }
}

// =============================================================================
// Record Text
// =============================================================================

/// Session time as `HH:MM:SS`.
pub fn clock_label(ms: u64) -> String<12> {
    let secs = ms / 1_000;
    let mut s = String::new();
    let _ = write!(s, "{:02}:{:02}:{:02}", secs / 3_600, (secs / 60) % 60, secs % 60);
    s
}

/// Heading line for a voice note.
pub fn voice_note_heading(note: &VoiceNote) -> String<40> {
    let mut s = String::new();
    let _ = write!(s, "Voice Recording - {} seconds", note.duration_secs);
    s
}

/// `"N vital sign record"` / `"N vital sign records"`.
pub fn vitals_count_label(count: usize) -> String<32> {
    let mut s = String::new();
    let plural = if count > 1 { "s" } else { "" };
    let _ = write!(s, "{count} vital sign record{plural}");
    s
}

/// Detail lines for one vitals record. Absent or zero readings are skipped.
pub fn vitals_lines(record: &VitalsRecord) -> Vec<String<24>, MAX_VITALS_LINES> {
    let mut lines = Vec::new();
    let mut push = |args: core::fmt::Arguments<'_>| {
        let mut s: String<24> = String::new();
        let _ = s.write_fmt(args);
        lines.push(s).ok();
    };

    if let Some(bp) = record.blood_pressure
        && bp.systolic > 0
        && bp.diastolic > 0
    {
        push(format_args!("BP: {}/{}", bp.systolic, bp.diastolic));
    }
    if let Some(hr) = record.heart_rate.filter(|v| *v > 0) {
        push(format_args!("HR: {hr} BPM"));
    }
    if let Some(spo2) = record.spo2.filter(|v| *v > 0) {
        push(format_args!("SpO2: {spo2}%"));
    }
    if let Some(temp) = record.temperature.filter(|v| *v > 0.0) {
        push(format_args!("Temp: {temp:.1}F"));
    }
    push(format_args!("Level: {}", level_text(record.consciousness)));
    lines
}

/// Observation notes, truncated for a single line.
pub fn vitals_notes(record: &VitalsRecord) -> Option<String<36>> {
    if record.notes.is_empty() {
        return None;
    }
    Some(truncated(&record.notes))
}

const fn level_text(c: Consciousness) -> &'static str {
    match c {
        Consciousness::Alert => "Alert",
        Consciousness::Verbal => "Verbal",
        Consciousness::Pain => "Pain",
        Consciousness::Unresponsive => "Unresponsive",
    }
}

// =============================================================================
// Share Animation
// =============================================================================

/// Share state machine: `Idle -> Sharing -> Shared`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShareProgress {
    #[default]
    Idle,
    Sharing {
        started_ms: u64,
        deadline: Deadline,
    },
    Shared,
}

impl ShareProgress {
    /// Begin sharing. Ignored unless idle.
    pub fn start(&mut self, now_ms: u64) {
        if *self == Self::Idle {
            *self = Self::Sharing {
                started_ms: now_ms,
                deadline: Deadline::after(now_ms, SHARE_DURATION_MS),
            };
        }
    }

    /// Advance. Returns `true` on the poll that completes the share.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if let Self::Sharing { deadline, .. } = self
            && deadline.poll(now_ms)
        {
            *self = Self::Shared;
            return true;
        }
        false
    }

    /// Animation progress in `0.0..=1.0`.
    pub fn fraction(&self, now_ms: u64) -> f32 {
        match self {
            Self::Idle => 0.0,
            Self::Sharing { started_ms, deadline } => deadline.progress(*started_ms, now_ms),
            Self::Shared => 1.0,
        }
    }

    #[inline]
    pub fn is_sharing(&self) -> bool { matches!(self, Self::Sharing { .. }) }

    #[inline]
    pub fn is_complete(&self) -> bool { *self == Self::Shared }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch;
    use crate::trip::{BloodPressure, Priority};

    fn record() -> VitalsRecord {
        VitalsRecord {
            id: 1,
            timestamp_ms: 0,
            blood_pressure: Some(BloodPressure {
                systolic: 120,
                diastolic: 80,
            }),
            heart_rate: Some(0),
            spo2: Some(97),
            temperature: Some(98.6),
            respiratory_rate: None,
            consciousness: Consciousness::Pain,
            notes: String::new(),
        }
    }

    #[test]
    fn test_stats_from_trip() {
        let mut trip = Trip::from_dispatch(0);
        trip.priority = Some(Priority::High);
        trip.destination = Some(dispatch::destination());
        let stats = TripStats::from_trip(&trip, 5 * 60_000 + 30_000);
        assert_eq!(stats.duration_minutes, 5);
        assert_eq!(stats.duration_label().as_str(), "5 minutes");
        assert_eq!(stats.criticality, Some("HIGH"));
        assert_eq!(stats.hospital.as_str(), "Apollo Hospital");
    }

    #[test]
    fn test_stats_without_priority() {
        let trip = Trip::from_dispatch(0);
        let stats = TripStats::from_trip(&trip, 0);
        assert_eq!(stats.criticality, None);
        assert!(stats.hospital.is_empty());
    }

    #[test]
    fn test_vitals_count_label() {
        assert_eq!(vitals_count_label(1).as_str(), "1 vital sign record");
        assert_eq!(vitals_count_label(3).as_str(), "3 vital sign records");
    }

    #[test]
    fn test_vitals_lines_skip_zero_and_absent() {
        let lines = vitals_lines(&record());
        let texts: std::vec::Vec<&str> = lines.iter().map(|s| s.as_str()).collect();
        assert_eq!(texts, ["BP: 120/80", "SpO2: 97%", "Temp: 98.6F", "Level: Pain"]);
    }

    #[test]
    fn test_vitals_notes() {
        let mut rec = record();
        assert_eq!(vitals_notes(&rec), None);
        rec.notes = truncated("Pupils equal and reactive to light, no trauma");
        assert_eq!(vitals_notes(&rec).unwrap().len(), 36);
    }

    #[test]
    fn test_clock_label() {
        assert_eq!(clock_label(0).as_str(), "00:00:00");
        assert_eq!(clock_label(3_725_000).as_str(), "01:02:05");
    }

    #[test]
    fn test_voice_note_heading() {
        let note = VoiceNote::new(0, 12, "x");
        assert_eq!(voice_note_heading(&note).as_str(), "Voice Recording - 12 seconds");
    }

    #[test]
    fn test_share_completes_after_three_seconds() {
        let mut share = ShareProgress::default();
        assert!(!share.poll(10_000), "Idle share never completes");
        share.start(1_000);
        assert!(share.is_sharing());
        assert!(!share.poll(3_999));
        assert!((share.fraction(2_500) - 0.5).abs() < 1e-6);
        assert!(share.poll(4_000));
        assert!(share.is_complete());
        assert!(!share.poll(5_000), "Completion reported once");
        share.start(6_000);
        assert!(share.is_complete(), "Restart ignored once shared");
    }
}
