//! Screen flow controller.
//!
//! [`FlowController`] is the single owner of the current screen, the online
//! flag, the pending emergency alert and the active [`Trip`]. Screens never
//! change each other directly; they call one operation here and the
//! controller either applies it or rejects it without touching any state.
//!
//! # Flow
//!
//! ```text
//!            open_alert           accept              confirm_priority
//!   Home -------------> Emergency -------> Criticality ----------------> Hospital
//!    ^  <---------------    |    <-------                <----------------   |
//!    |   decline / expiry   |   back_to_emergency       back_to_criticality |
//!    |                                                   confirm_hospitals  v
//!    +------------------- Summary <----------------------------------- Navigation
//!         return_home              complete_trip
//! ```
//!
//! # Timers
//!
//! [`FlowController::tick`] polls the two flow timers: the dispatch delay on
//! the home screen (raises the alert) and the accept countdown on the
//! emergency screen (declines on expiry). The dispatch delay is re-armed
//! whenever the driver is online on the home screen with no alert pending,
//! so a new request follows every decline or completed trip.

use core::fmt;

use crate::countdown::Countdown;
use crate::dispatch;
use crate::thresholds::DISPATCH_DELAY_MS;
use crate::timer::Deadline;
use crate::trip::{HospitalType, Priority, Trip, TripError, VitalsRecord, VoiceNote};

// =============================================================================
// Screens and Actions
// =============================================================================

/// The screen currently shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Home,
    Emergency,
    Criticality,
    Hospital,
    Navigation,
    Summary,
}

impl Screen {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Emergency => "emergency",
            Self::Criticality => "criticality",
            Self::Hospital => "hospital",
            Self::Navigation => "navigation",
            Self::Summary => "summary",
        }
    }

    /// Whether this screen requires an active trip.
    pub const fn requires_trip(self) -> bool {
        matches!(self, Self::Criticality | Self::Hospital | Self::Navigation | Self::Summary)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// Operations that can be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    SetOnline,
    OpenAlert,
    AcceptEmergency,
    DeclineEmergency,
    ConfirmPriority,
    BackToEmergency,
    ConfirmHospitals,
    BackToCriticality,
    AddVoiceNote,
    AddVitals,
    CompleteTrip,
    ReturnHome,
}

impl Action {
    pub const fn name(self) -> &'static str {
        match self {
            Self::SetOnline => "set_online",
            Self::OpenAlert => "open_alert",
            Self::AcceptEmergency => "accept_emergency",
            Self::DeclineEmergency => "decline_emergency",
            Self::ConfirmPriority => "confirm_priority",
            Self::BackToEmergency => "back_to_emergency",
            Self::ConfirmHospitals => "confirm_hospitals",
            Self::BackToCriticality => "back_to_criticality",
            Self::AddVoiceNote => "add_voice_note",
            Self::AddVitals => "add_vitals",
            Self::CompleteTrip => "complete_trip",
            Self::ReturnHome => "return_home",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

// =============================================================================
// Results
// =============================================================================

/// What an accepted operation or a timer tick changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Nothing observable changed.
    Unchanged,
    /// The screen changed.
    Screen { from: Screen, to: Screen },
    /// The online flag changed.
    Online(bool),
    /// A voice note or vitals record was appended.
    RecordAdded { id: u32 },
    /// The dispatch delay elapsed and an emergency alert is pending.
    AlertRaised,
    /// The accept countdown expired and the emergency was declined.
    AutoDeclined,
}

/// Rejected operations. State is unchanged whenever one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("{action} is not allowed on the {from} screen")]
    InvalidTransition { from: Screen, action: Action },
    #[error("no emergency alert is pending")]
    NoPendingAlert,
    #[error("at least one hospital type must be selected")]
    NoHospitalType,
    #[error("no active trip")]
    NoActiveTrip,
    #[error(transparent)]
    Trip(#[from] TripError),
}

// =============================================================================
// Controller
// =============================================================================

/// Screen flow state machine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowController {
    screen: Screen,
    online: bool,
    alert_pending: bool,
    dispatch: Option<Deadline>,
    countdown: Option<Countdown>,
    trip: Option<Trip>,
}

impl FlowController {
    /// Offline on the home screen with no trip.
    pub fn new() -> Self { Self::default() }

    #[inline]
    pub const fn screen(&self) -> Screen { self.screen }

    #[inline]
    pub const fn is_online(&self) -> bool { self.online }

    #[inline]
    pub const fn alert_pending(&self) -> bool { self.alert_pending }

    #[inline]
    pub const fn trip(&self) -> Option<&Trip> { self.trip.as_ref() }

    /// Running accept countdown (emergency screen only).
    #[inline]
    pub const fn countdown(&self) -> Option<&Countdown> { self.countdown.as_ref() }

    fn expect_screen(&self, expected: Screen, action: Action) -> Result<(), FlowError> {
        if self.screen == expected {
            Ok(())
        } else {
            Err(FlowError::InvalidTransition {
                from: self.screen,
                action,
            })
        }
    }

    fn move_to(&mut self, to: Screen) -> Transition {
        debug_assert!(!to.requires_trip() || self.trip.is_some(), "{to} entered without a trip");
        let from = self.screen;
        self.screen = to;
        Transition::Screen { from, to }
    }

    fn trip_mut(&mut self) -> Result<&mut Trip, FlowError> { self.trip.as_mut().ok_or(FlowError::NoActiveTrip) }

    // -------------------------------------------------------------------------
    // Home
    // -------------------------------------------------------------------------

    /// Go online or offline.
    ///
    /// Going online arms the dispatch delay unless an alert is already
    /// pending. Going offline disarms it and withdraws any pending alert.
    pub fn set_online(&mut self, online: bool, now_ms: u64) -> Result<Transition, FlowError> {
        self.expect_screen(Screen::Home, Action::SetOnline)?;
        if online == self.online {
            return Ok(Transition::Unchanged);
        }
        self.online = online;
        if online {
            if !self.alert_pending {
                self.dispatch = Some(Deadline::after(now_ms, DISPATCH_DELAY_MS));
            }
        } else {
            self.dispatch = None;
            self.alert_pending = false;
        }
        Ok(Transition::Online(online))
    }

    /// Open the pending alert and start the accept countdown.
    pub fn open_alert(&mut self, now_ms: u64) -> Result<Transition, FlowError> {
        self.expect_screen(Screen::Home, Action::OpenAlert)?;
        if !self.alert_pending {
            return Err(FlowError::NoPendingAlert);
        }
        self.countdown = Some(Countdown::start(now_ms));
        Ok(self.move_to(Screen::Emergency))
    }

    // -------------------------------------------------------------------------
    // Emergency
    // -------------------------------------------------------------------------

    /// Accept the emergency and start a new trip at `now_ms`.
    pub fn accept_emergency(&mut self, now_ms: u64) -> Result<Transition, FlowError> {
        self.expect_screen(Screen::Emergency, Action::AcceptEmergency)?;
        self.countdown = None;
        self.trip = Some(Trip::from_dispatch(now_ms));
        Ok(self.move_to(Screen::Criticality))
    }

    /// Decline the emergency and return home.
    pub fn decline_emergency(&mut self) -> Result<Transition, FlowError> {
        self.expect_screen(Screen::Emergency, Action::DeclineEmergency)?;
        self.abandon_alert();
        Ok(self.move_to(Screen::Home))
    }

    fn abandon_alert(&mut self) {
        self.countdown = None;
        self.alert_pending = false;
        self.trip = None;
    }

    // -------------------------------------------------------------------------
    // Criticality
    // -------------------------------------------------------------------------

    /// Record the triage priority and continue to hospital selection.
    pub fn confirm_priority(&mut self, priority: Priority) -> Result<Transition, FlowError> {
        self.expect_screen(Screen::Criticality, Action::ConfirmPriority)?;
        self.trip_mut()?.priority = Some(priority);
        Ok(self.move_to(Screen::Hospital))
    }

    /// Return to the alert with a fresh countdown.
    pub fn back_to_emergency(&mut self, now_ms: u64) -> Result<Transition, FlowError> {
        self.expect_screen(Screen::Criticality, Action::BackToEmergency)?;
        self.countdown = Some(Countdown::start(now_ms));
        Ok(self.move_to(Screen::Emergency))
    }

    // -------------------------------------------------------------------------
    // Hospital
    // -------------------------------------------------------------------------

    /// Record the hospital categories, assign the destination and start navigating.
    pub fn confirm_hospitals(&mut self, types: &[HospitalType]) -> Result<Transition, FlowError> {
        self.expect_screen(Screen::Hospital, Action::ConfirmHospitals)?;
        if types.is_empty() {
            return Err(FlowError::NoHospitalType);
        }
        let trip = self.trip_mut()?;
        trip.set_hospital_types(types);
        trip.destination = Some(dispatch::destination());
        Ok(self.move_to(Screen::Navigation))
    }

    pub fn back_to_criticality(&mut self) -> Result<Transition, FlowError> {
        self.expect_screen(Screen::Hospital, Action::BackToCriticality)?;
        Ok(self.move_to(Screen::Criticality))
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    pub fn add_voice_note(&mut self, note: VoiceNote) -> Result<Transition, FlowError> {
        self.expect_screen(Screen::Navigation, Action::AddVoiceNote)?;
        let id = self.trip_mut()?.add_voice_note(note)?;
        Ok(Transition::RecordAdded { id })
    }

    pub fn add_vitals(&mut self, record: VitalsRecord) -> Result<Transition, FlowError> {
        self.expect_screen(Screen::Navigation, Action::AddVitals)?;
        let id = self.trip_mut()?.add_vitals(record)?;
        Ok(Transition::RecordAdded { id })
    }

    pub fn complete_trip(&mut self) -> Result<Transition, FlowError> {
        self.expect_screen(Screen::Navigation, Action::CompleteTrip)?;
        if self.trip.is_none() {
            return Err(FlowError::NoActiveTrip);
        }
        Ok(self.move_to(Screen::Summary))
    }

    // -------------------------------------------------------------------------
    // Summary
    // -------------------------------------------------------------------------

    /// Drop the trip and any pending alert. The online flag is kept.
    pub fn return_home(&mut self) -> Result<Transition, FlowError> {
        self.expect_screen(Screen::Summary, Action::ReturnHome)?;
        self.abandon_alert();
        Ok(self.move_to(Screen::Home))
    }

    // -------------------------------------------------------------------------
    // Timers
    // -------------------------------------------------------------------------

    /// Poll the flow timers.
    pub fn tick(&mut self, now_ms: u64) -> Transition {
        match self.screen {
            Screen::Home => self.tick_dispatch(now_ms),
            Screen::Emergency => self.tick_countdown(now_ms),
            _ => Transition::Unchanged,
        }
    }

    fn tick_dispatch(&mut self, now_ms: u64) -> Transition {
        if !self.online || self.alert_pending {
            return Transition::Unchanged;
        }
        let deadline = self
            .dispatch
            .get_or_insert_with(|| Deadline::after(now_ms, DISPATCH_DELAY_MS));
        if deadline.poll(now_ms) {
            self.dispatch = None;
            self.alert_pending = true;
            return Transition::AlertRaised;
        }
        Transition::Unchanged
    }

    fn tick_countdown(&mut self, now_ms: u64) -> Transition {
        let expired = self.countdown.as_mut().is_some_and(|c| c.poll(now_ms));
        if !expired {
            return Transition::Unchanged;
        }
        self.abandon_alert();
        self.screen = Screen::Home;
        Transition::AutoDeclined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip::{Consciousness, MAX_VOICE_NOTES};

    /// Controller online with an alert pending, on the home screen.
    fn alerted() -> FlowController {
        let mut flow = FlowController::new();
        flow.set_online(true, 0).unwrap();
        assert_eq!(flow.tick(3_000), Transition::AlertRaised);
        flow
    }

    /// Controller on the navigation screen with a full trip.
    fn navigating() -> FlowController {
        let mut flow = alerted();
        flow.open_alert(4_000).unwrap();
        flow.accept_emergency(5_000).unwrap();
        flow.confirm_priority(Priority::High).unwrap();
        flow.confirm_hospitals(&[HospitalType::Cardiac]).unwrap();
        flow
    }

    fn vitals() -> VitalsRecord {
        VitalsRecord {
            id: 0,
            timestamp_ms: 0,
            blood_pressure: None,
            heart_rate: Some(88),
            spo2: None,
            temperature: None,
            respiratory_rate: None,
            consciousness: Consciousness::Alert,
            notes: heapless::String::new(),
        }
    }

    #[test]
    fn test_initial_state() {
        let flow = FlowController::new();
        assert_eq!(flow.screen(), Screen::Home);
        assert!(!flow.is_online());
        assert!(!flow.alert_pending());
        assert!(flow.trip().is_none());
    }

    #[test]
    fn test_alert_raised_three_seconds_after_online() {
        let mut flow = FlowController::new();
        assert_eq!(flow.tick(10_000), Transition::Unchanged, "Offline never dispatches");
        flow.set_online(true, 1_000).unwrap();
        assert_eq!(flow.tick(3_999), Transition::Unchanged);
        assert_eq!(flow.tick(4_000), Transition::AlertRaised);
        assert!(flow.alert_pending());
        assert_eq!(flow.tick(8_000), Transition::Unchanged, "Only one alert at a time");
    }

    #[test]
    fn test_going_offline_disarms_dispatch() {
        let mut flow = FlowController::new();
        flow.set_online(true, 0).unwrap();
        assert_eq!(flow.set_online(false, 1_000), Ok(Transition::Online(false)));
        assert_eq!(flow.tick(5_000), Transition::Unchanged);
        assert!(!flow.alert_pending());
    }

    #[test]
    fn test_open_alert_requires_pending_alert() {
        let mut flow = FlowController::new();
        assert_eq!(flow.open_alert(0), Err(FlowError::NoPendingAlert));
        assert_eq!(flow.screen(), Screen::Home);
    }

    #[test]
    fn test_full_forward_flow() {
        let mut flow = alerted();
        assert_eq!(
            flow.open_alert(4_000),
            Ok(Transition::Screen {
                from: Screen::Home,
                to: Screen::Emergency
            })
        );
        assert_eq!(flow.countdown().unwrap().remaining_secs(), 30);

        flow.accept_emergency(5_000).unwrap();
        assert_eq!(flow.screen(), Screen::Criticality);
        assert!(flow.countdown().is_none(), "Accept cancels the countdown");
        let trip = flow.trip().unwrap();
        assert_eq!(trip.start_ms, 5_000);
        assert!(trip.priority.is_none());

        flow.confirm_priority(Priority::Medium).unwrap();
        assert_eq!(flow.screen(), Screen::Hospital);
        assert_eq!(flow.trip().unwrap().priority, Some(Priority::Medium));

        flow.confirm_hospitals(&[HospitalType::Trauma, HospitalType::General]).unwrap();
        assert_eq!(flow.screen(), Screen::Navigation);
        let trip = flow.trip().unwrap();
        assert_eq!(trip.hospital_types(), &[HospitalType::Trauma, HospitalType::General]);
        assert_eq!(trip.destination.as_ref().unwrap().name.as_str(), "Apollo Hospital");

        flow.complete_trip().unwrap();
        assert_eq!(flow.screen(), Screen::Summary);
    }

    #[test]
    fn test_countdown_expiry_declines_exactly_once() {
        let mut flow = alerted();
        flow.open_alert(10_000).unwrap();
        let mut declines = 0;
        for now in (10_000..60_000).step_by(250) {
            if flow.tick(now) == Transition::AutoDeclined {
                declines += 1;
                assert_eq!(flow.screen(), Screen::Home);
                assert!(!flow.alert_pending());
            }
        }
        assert_eq!(declines, 1);
    }

    #[test]
    fn test_countdown_expiry_timing() {
        let mut flow = alerted();
        flow.open_alert(10_000).unwrap();
        assert_eq!(flow.tick(39_999), Transition::Unchanged);
        assert_eq!(flow.screen(), Screen::Emergency);
        assert_eq!(flow.tick(40_000), Transition::AutoDeclined);
    }

    #[test]
    fn test_new_alert_after_decline_while_online() {
        let mut flow = alerted();
        flow.open_alert(3_000).unwrap();
        flow.decline_emergency().unwrap();
        assert!(flow.is_online());
        assert_eq!(flow.tick(5_000), Transition::Unchanged, "Dispatch re-armed at 5 s");
        assert_eq!(flow.tick(7_999), Transition::Unchanged);
        assert_eq!(flow.tick(8_000), Transition::AlertRaised);
    }

    #[test]
    fn test_decline_after_back_drops_trip() {
        let mut flow = alerted();
        flow.open_alert(3_000).unwrap();
        flow.accept_emergency(4_000).unwrap();
        flow.back_to_emergency(5_000).unwrap();
        assert_eq!(flow.countdown().unwrap().remaining_secs(), 30, "Countdown restarts");
        flow.decline_emergency().unwrap();
        assert!(flow.trip().is_none(), "No trip on the home screen");
    }

    #[test]
    fn test_back_transitions() {
        let mut flow = alerted();
        flow.open_alert(3_000).unwrap();
        flow.accept_emergency(4_000).unwrap();
        flow.confirm_priority(Priority::Low).unwrap();
        flow.back_to_criticality().unwrap();
        assert_eq!(flow.screen(), Screen::Criticality);
        assert_eq!(flow.trip().unwrap().priority, Some(Priority::Low), "Back keeps the trip");
    }

    #[test]
    fn test_empty_hospital_selection_rejected() {
        let mut flow = alerted();
        flow.open_alert(3_000).unwrap();
        flow.accept_emergency(4_000).unwrap();
        flow.confirm_priority(Priority::High).unwrap();
        let before = flow.clone();
        assert_eq!(flow.confirm_hospitals(&[]), Err(FlowError::NoHospitalType));
        assert_eq!(flow, before, "Rejection leaves state untouched");
    }

    #[test]
    fn test_invalid_transitions_leave_state_untouched() {
        let mut flow = FlowController::new();
        let before = flow.clone();
        assert_eq!(
            flow.accept_emergency(0),
            Err(FlowError::InvalidTransition {
                from: Screen::Home,
                action: Action::AcceptEmergency
            })
        );
        assert!(flow.complete_trip().is_err());
        assert!(flow.return_home().is_err());
        assert!(flow.confirm_priority(Priority::High).is_err());
        assert!(flow.add_voice_note(VoiceNote::new(0, 1, "x")).is_err());
        assert_eq!(flow, before);

        let mut flow = navigating();
        let before = flow.clone();
        assert!(flow.set_online(false, 0).is_err(), "Online toggle only on home");
        assert!(flow.open_alert(0).is_err());
        assert!(flow.back_to_criticality().is_err());
        assert_eq!(flow, before);
    }

    #[test]
    fn test_add_records_during_navigation() {
        let mut flow = navigating();
        let t1 = flow.add_voice_note(VoiceNote::new(6_000, 4, "Patient conscious")).unwrap();
        let t2 = flow.add_vitals(vitals()).unwrap();
        assert!(matches!(t1, Transition::RecordAdded { .. }));
        assert!(matches!(t2, Transition::RecordAdded { .. }));
        let trip = flow.trip().unwrap();
        assert_eq!(trip.voice_notes().len(), 1);
        assert_eq!(trip.vitals().len(), 1);
    }

    #[test]
    fn test_full_note_list_surfaces_trip_error() {
        let mut flow = navigating();
        for _ in 0..MAX_VOICE_NOTES {
            flow.add_voice_note(VoiceNote::new(0, 1, "n")).unwrap();
        }
        assert_eq!(
            flow.add_voice_note(VoiceNote::new(0, 1, "n")),
            Err(FlowError::Trip(TripError::NotesFull))
        );
    }

    #[test]
    fn test_return_home_resets_to_initial_screen() {
        let mut flow = navigating();
        flow.complete_trip().unwrap();
        flow.return_home().unwrap();
        assert_eq!(flow.screen(), Screen::Home);
        assert!(flow.trip().is_none());
        assert!(!flow.alert_pending());
        assert!(flow.is_online(), "Online flag survives the trip");
        assert_eq!(flow.tick(100_000), Transition::Unchanged);
        assert_eq!(flow.tick(103_000), Transition::AlertRaised);
    }

    #[test]
    fn test_trip_exists_only_on_trip_screens() {
        let mut flow = alerted();
        assert!(flow.trip().is_none());
        flow.open_alert(3_000).unwrap();
        flow.accept_emergency(3_500).unwrap();
        for _ in 0..2 {
            assert!(flow.screen().requires_trip());
            assert!(flow.trip().is_some());
            flow.confirm_priority(Priority::High).ok();
            flow.confirm_hospitals(&[HospitalType::General]).ok();
        }
        flow.complete_trip().unwrap();
        assert!(flow.trip().is_some());
        flow.return_home().unwrap();
        assert!(!flow.screen().requires_trip());
        assert!(flow.trip().is_none());
    }

    #[test]
    fn test_error_messages() {
        let err = FlowError::InvalidTransition {
            from: Screen::Home,
            action: Action::CompleteTrip,
        };
        assert_eq!(err.to_string(), "complete_trip is not allowed on the home screen");
        assert_eq!(FlowError::Trip(TripError::VitalsFull).to_string(), "vitals list is full (16 records)");
    }
}
