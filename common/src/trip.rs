//! Trip record: one emergency transport from acceptance to completion.
//!
//! A [`Trip`] is created when the driver accepts an emergency and is filled in
//! screen by screen: priority on the triage screen, hospital categories and
//! destination on the hospital screen, voice notes and vitals during
//! navigation. It is dropped when the driver returns home.
//!
//! Voice notes and vitals records are append-only. Record ids are assigned by
//! the trip on append, are unique within the trip and increase monotonically.
//!
//! # Bounded Storage
//!
//! All lists are `heapless` with fixed capacity. Appending to a full list
//! returns [`TripError`] and leaves the existing entries untouched.

use embedded_graphics::pixelcolor::Rgb565;
use heapless::{String, Vec};

use crate::colors::{AMBER_500, GREEN_600, RED_600};
use crate::dispatch;
use crate::text::truncated;

// =============================================================================
// Capacities
// =============================================================================

/// Maximum voice notes kept per trip.
pub const MAX_VOICE_NOTES: usize = 16;

/// Maximum vitals records kept per trip.
pub const MAX_VITALS: usize = 16;

/// Maximum transcript length in bytes.
pub const TRANSCRIPT_LEN: usize = 256;

/// Maximum free-text vitals notes length in bytes.
pub const NOTES_LEN: usize = 96;

/// Number of hospital categories.
pub const HOSPITAL_TYPE_COUNT: usize = 8;

// =============================================================================
// Geography
// =============================================================================

/// A latitude/longitude pair in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub lat: f32,
    pub lng: f32,
}

impl GeoPoint {
    pub const fn new(lat: f32, lng: f32) -> Self { Self { lat, lng } }

    /// Linear interpolation toward `to`; `fraction` 0.0 is `self`, 1.0 is `to`.
    #[inline]
    pub fn lerp(self, to: Self, fraction: f32) -> Self {
        Self {
            lat: self.lat + (to.lat - self.lat) * fraction,
            lng: self.lng + (to.lng - self.lng) * fraction,
        }
    }
}

/// Receiving hospital.
#[derive(Clone, Debug, PartialEq)]
pub struct Destination {
    pub name: String<32>,
    pub location: GeoPoint,
}

impl Destination {
    pub fn new(name: &str, location: GeoPoint) -> Self {
        Self {
            name: truncated(name),
            location,
        }
    }
}

// =============================================================================
// Triage
// =============================================================================

/// Triage severity assigned on the criticality screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// All priorities in display order.
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Card title.
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "HIGH PRIORITY",
            Self::Medium => "MEDIUM PRIORITY",
            Self::Low => "LOW PRIORITY",
        }
    }

    /// Card subtitle.
    pub const fn description(self) -> &'static str {
        match self {
            Self::High => "Life-threatening, immediate care",
            Self::Medium => "Serious but stable",
            Self::Low => "Non-emergency transport",
        }
    }

    /// Short badge text for the trip summary.
    pub const fn badge(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }

    /// Fill color of a selected card.
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::High => RED_600,
            Self::Medium => AMBER_500,
            Self::Low => GREEN_600,
        }
    }
}

/// Hospital categories the patient may need.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HospitalType {
    MultiSpecialty,
    Cardiac,
    Trauma,
    Maternity,
    Pediatric,
    Neurology,
    Orthopedic,
    General,
}

impl HospitalType {
    /// All categories in grid order (two columns, row major).
    pub const ALL: [Self; HOSPITAL_TYPE_COUNT] = [
        Self::MultiSpecialty,
        Self::Cardiac,
        Self::Trauma,
        Self::Maternity,
        Self::Pediatric,
        Self::Neurology,
        Self::Orthopedic,
        Self::General,
    ];

    /// Stable identifier.
    pub const fn id(self) -> &'static str {
        match self {
            Self::MultiSpecialty => "multi-specialty",
            Self::Cardiac => "cardiac",
            Self::Trauma => "trauma",
            Self::Maternity => "maternity",
            Self::Pediatric => "pediatric",
            Self::Neurology => "neurology",
            Self::Orthopedic => "orthopedic",
            Self::General => "general",
        }
    }

    /// Full display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::MultiSpecialty => "Multi-Specialty Hospital",
            Self::Cardiac => "Cardiac Care Center",
            Self::Trauma => "Trauma Center",
            Self::Maternity => "Maternity/Gynecology",
            Self::Pediatric => "Pediatric Hospital",
            Self::Neurology => "Neurology Center",
            Self::Orthopedic => "Orthopedic Center",
            Self::General => "General Hospital",
        }
    }

    /// Name split over two lines for the narrow grid cards.
    pub const fn card_lines(self) -> (&'static str, &'static str) {
        match self {
            Self::MultiSpecialty => ("Multi-Specialty", "Hospital"),
            Self::Cardiac => ("Cardiac Care", "Center"),
            Self::Trauma => ("Trauma", "Center"),
            Self::Maternity => ("Maternity/", "Gynecology"),
            Self::Pediatric => ("Pediatric", "Hospital"),
            Self::Neurology => ("Neurology", "Center"),
            Self::Orthopedic => ("Orthopedic", "Center"),
            Self::General => ("General", "Hospital"),
        }
    }
}

// =============================================================================
// Voice Notes
// =============================================================================

/// A recorded and transcribed voice note.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoiceNote {
    /// Assigned by [`Trip::add_voice_note`].
    pub id: u32,
    /// Session time when the note was saved.
    pub timestamp_ms: u64,
    /// Recording length in whole seconds.
    pub duration_secs: u32,
    pub transcription: String<TRANSCRIPT_LEN>,
}

impl VoiceNote {
    /// Build an unsaved note; the id is filled in when appended to a trip.
    pub fn new(timestamp_ms: u64, duration_secs: u32, transcription: &str) -> Self {
        Self {
            id: 0,
            timestamp_ms,
            duration_secs,
            transcription: truncated(transcription),
        }
    }
}

// =============================================================================
// Vitals
// =============================================================================

/// Blood pressure reading in mmHg.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BloodPressure {
    pub systolic: u16,
    pub diastolic: u16,
}

/// AVPU consciousness level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Consciousness {
    #[default]
    Alert,
    Verbal,
    Pain,
    Unresponsive,
}

impl Consciousness {
    pub const ALL: [Self; 4] = [Self::Alert, Self::Verbal, Self::Pain, Self::Unresponsive];

    /// Stable identifier.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::Verbal => "verbal",
            Self::Pain => "pain",
            Self::Unresponsive => "unresponsive",
        }
    }

    /// Form option text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Alert => "Alert",
            Self::Verbal => "Responds to Verbal",
            Self::Pain => "Responds to Pain",
            Self::Unresponsive => "Unresponsive",
        }
    }

    /// Next option, wrapping.
    pub const fn next(self) -> Self {
        match self {
            Self::Alert => Self::Verbal,
            Self::Verbal => Self::Pain,
            Self::Pain => Self::Unresponsive,
            Self::Unresponsive => Self::Alert,
        }
    }

    /// Previous option, wrapping.
    pub const fn prev(self) -> Self {
        match self {
            Self::Alert => Self::Unresponsive,
            Self::Verbal => Self::Alert,
            Self::Pain => Self::Verbal,
            Self::Unresponsive => Self::Pain,
        }
    }
}

/// One set of vital signs.
#[derive(Clone, Debug, PartialEq)]
pub struct VitalsRecord {
    /// Assigned by [`Trip::add_vitals`].
    pub id: u32,
    pub timestamp_ms: u64,
    pub blood_pressure: Option<BloodPressure>,
    /// Beats per minute.
    pub heart_rate: Option<u16>,
    /// Oxygen saturation in percent.
    pub spo2: Option<u16>,
    /// Body temperature in degrees Fahrenheit.
    pub temperature: Option<f32>,
    /// Breaths per minute.
    pub respiratory_rate: Option<u16>,
    pub consciousness: Consciousness,
    pub notes: String<NOTES_LEN>,
}

// =============================================================================
// Errors
// =============================================================================

/// Errors raised when appending to a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TripError {
    #[error("voice note list is full ({MAX_VOICE_NOTES} notes)")]
    NotesFull,
    #[error("vitals list is full ({MAX_VITALS} records)")]
    VitalsFull,
}

// =============================================================================
// Trip
// =============================================================================

/// The active trip.
#[derive(Clone, Debug, PartialEq)]
pub struct Trip {
    pub emergency_location: GeoPoint,
    pub address: String<64>,
    pub contact: String<24>,
    pub condition: String<64>,
    pub priority: Option<Priority>,
    pub destination: Option<Destination>,
    /// Session time when the emergency was accepted.
    pub start_ms: u64,
    hospital_types: Vec<HospitalType, HOSPITAL_TYPE_COUNT>,
    voice_notes: Vec<VoiceNote, MAX_VOICE_NOTES>,
    vitals: Vec<VitalsRecord, MAX_VITALS>,
    next_id: u32,
}

impl Trip {
    /// Create a trip from the simulated dispatch data, accepted at `start_ms`.
    pub fn from_dispatch(start_ms: u64) -> Self {
        Self {
            emergency_location: dispatch::EMERGENCY_LOCATION,
            address: truncated(dispatch::EMERGENCY_ADDRESS),
            contact: truncated(dispatch::EMERGENCY_CONTACT),
            condition: truncated(dispatch::EMERGENCY_CONDITION),
            priority: None,
            destination: None,
            start_ms,
            hospital_types: Vec::new(),
            voice_notes: Vec::new(),
            vitals: Vec::new(),
            next_id: 1,
        }
    }

    /// Chosen hospital categories in selection order.
    #[inline]
    pub fn hospital_types(&self) -> &[HospitalType] { &self.hospital_types }

    /// Replace the chosen categories, dropping duplicates but keeping order.
    pub fn set_hospital_types(&mut self, types: &[HospitalType]) {
        self.hospital_types.clear();
        for t in types {
            if !self.hospital_types.contains(t) {
                // Capacity equals the number of distinct categories
                self.hospital_types.push(*t).ok();
            }
        }
    }

    /// Recorded voice notes, oldest first.
    #[inline]
    pub fn voice_notes(&self) -> &[VoiceNote] { &self.voice_notes }

    /// Recorded vitals, oldest first.
    #[inline]
    pub fn vitals(&self) -> &[VitalsRecord] { &self.vitals }

    /// Append a voice note and return its assigned id.
    pub fn add_voice_note(&mut self, mut note: VoiceNote) -> Result<u32, TripError> {
        if self.voice_notes.is_full() {
            return Err(TripError::NotesFull);
        }
        note.id = self.take_id();
        let id = note.id;
        self.voice_notes.push(note).map_err(|_| TripError::NotesFull)?;
        Ok(id)
    }

    /// Append a vitals record and return its assigned id.
    pub fn add_vitals(&mut self, mut record: VitalsRecord) -> Result<u32, TripError> {
        if self.vitals.is_full() {
            return Err(TripError::VitalsFull);
        }
        record.id = self.take_id();
        let id = record.id;
        self.vitals.push(record).map_err(|_| TripError::VitalsFull)?;
        Ok(id)
    }

    /// Whole minutes elapsed since the trip started.
    pub fn duration_minutes(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.start_ms) / crate::thresholds::MS_PER_MINUTE
    }

    fn take_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vitals(heart_rate: u16) -> VitalsRecord {
        VitalsRecord {
            id: 0,
            timestamp_ms: 0,
            blood_pressure: Some(BloodPressure {
                systolic: 120,
                diastolic: 80,
            }),
            heart_rate: Some(heart_rate),
            spo2: None,
            temperature: None,
            respiratory_rate: None,
            consciousness: Consciousness::Alert,
            notes: String::new(),
        }
    }

    #[test]
    fn test_trip_from_dispatch() {
        let trip = Trip::from_dispatch(42);
        assert_eq!(trip.address.as_str(), "Indiranagar, Bengaluru, Karnataka 560038");
        assert_eq!(trip.contact.as_str(), "+91 98765 43210");
        assert_eq!(trip.condition.as_str(), "Chest pain, difficulty breathing");
        assert_eq!(trip.emergency_location, GeoPoint::new(12.975, 77.6));
        assert_eq!(trip.start_ms, 42);
        assert!(trip.priority.is_none(), "Priority starts unset");
        assert!(trip.destination.is_none());
        assert!(trip.voice_notes().is_empty());
        assert!(trip.vitals().is_empty());
    }

    #[test]
    fn test_add_voice_note_appends_one() {
        let mut trip = Trip::from_dispatch(0);
        trip.add_voice_note(VoiceNote::new(1_000, 5, "first")).unwrap();
        let before = trip.voice_notes().to_vec();

        trip.add_voice_note(VoiceNote::new(2_000, 7, "second")).unwrap();

        assert_eq!(trip.voice_notes().len(), before.len() + 1);
        assert_eq!(&trip.voice_notes()[..before.len()], &before[..], "Prior notes unchanged");
        assert_eq!(trip.voice_notes()[1].transcription.as_str(), "second");
    }

    #[test]
    fn test_add_vitals_appends_one() {
        let mut trip = Trip::from_dispatch(0);
        trip.add_vitals(sample_vitals(80)).unwrap();
        let before = trip.vitals().to_vec();

        trip.add_vitals(sample_vitals(95)).unwrap();

        assert_eq!(trip.vitals().len(), 2);
        assert_eq!(&trip.vitals()[..1], &before[..]);
        assert_eq!(trip.vitals()[1].heart_rate, Some(95));
    }

    #[test]
    fn test_record_ids_unique_and_increasing() {
        let mut trip = Trip::from_dispatch(0);
        let a = trip.add_voice_note(VoiceNote::new(0, 1, "a")).unwrap();
        let b = trip.add_vitals(sample_vitals(70)).unwrap();
        let c = trip.add_voice_note(VoiceNote::new(0, 1, "c")).unwrap();
        assert!(a < b && b < c, "ids should increase: {a} {b} {c}");
        assert_eq!(trip.voice_notes()[1].id, c);
    }

    #[test]
    fn test_full_note_list_rejects_without_mutation() {
        let mut trip = Trip::from_dispatch(0);
        for i in 0..MAX_VOICE_NOTES {
            trip.add_voice_note(VoiceNote::new(i as u64, 1, "n")).unwrap();
        }
        let before = trip.voice_notes().to_vec();
        let result = trip.add_voice_note(VoiceNote::new(99, 1, "overflow"));
        assert_eq!(result, Err(TripError::NotesFull));
        assert_eq!(trip.voice_notes(), &before[..]);
    }

    #[test]
    fn test_full_vitals_list_rejects() {
        let mut trip = Trip::from_dispatch(0);
        for _ in 0..MAX_VITALS {
            trip.add_vitals(sample_vitals(60)).unwrap();
        }
        assert_eq!(trip.add_vitals(sample_vitals(61)), Err(TripError::VitalsFull));
        assert_eq!(trip.vitals().len(), MAX_VITALS);
    }

    #[test]
    fn test_set_hospital_types_dedups_in_order() {
        let mut trip = Trip::from_dispatch(0);
        trip.set_hospital_types(&[HospitalType::Trauma, HospitalType::Cardiac, HospitalType::Trauma]);
        assert_eq!(trip.hospital_types(), &[HospitalType::Trauma, HospitalType::Cardiac]);
    }

    #[test]
    fn test_duration_minutes_floors() {
        let trip = Trip::from_dispatch(1_000);
        assert_eq!(trip.duration_minutes(1_000), 0);
        assert_eq!(trip.duration_minutes(60_999), 0);
        assert_eq!(trip.duration_minutes(61_000), 1);
        assert_eq!(trip.duration_minutes(0), 0, "Clock skew never underflows");
    }

    #[test]
    fn test_geo_lerp_endpoints() {
        let a = GeoPoint::new(12.0, 77.0);
        let b = GeoPoint::new(13.0, 78.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        let mid = a.lerp(b, 0.5);
        assert!((mid.lat - 12.5).abs() < 1e-5);
        assert!((mid.lng - 77.5).abs() < 1e-5);
    }

    #[test]
    fn test_consciousness_ids_unique() {
        for (i, a) in Consciousness::ALL.iter().enumerate() {
            for b in &Consciousness::ALL[i + 1..] {
                assert_ne!(a.id(), b.id());
            }
        }
    }

    #[test]
    fn test_hospital_type_ids_unique() {
        for (i, a) in HospitalType::ALL.iter().enumerate() {
            for b in &HospitalType::ALL[i + 1..] {
                assert_ne!(a.id(), b.id());
            }
        }
    }

    #[test]
    fn test_consciousness_cycle() {
        let mut c = Consciousness::default();
        assert_eq!(c, Consciousness::Alert);
        for _ in 0..4 {
            c = c.next();
        }
        assert_eq!(c, Consciousness::Alert, "Four steps wrap around");
        assert_eq!(Consciousness::Alert.prev(), Consciousness::Unresponsive);
    }

    #[test]
    fn test_priority_labels() {
        assert_eq!(Priority::High.label(), "HIGH PRIORITY");
        assert_eq!(Priority::Medium.badge(), "MEDIUM");
        assert_eq!(Priority::Low.description(), "Non-emergency transport");
    }
}
