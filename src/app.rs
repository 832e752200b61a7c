//! Application state: the flow controller plus per-screen UI state.
//!
//! The [`FlowController`] decides which screen is shown and owns the trip.
//! Everything else here is presentation state that only lives as long as its
//! screen: selector cursors, the signal feed, the open overlay, the share
//! animation and the toast popup. Keys are routed to the overlay first, then
//! to the current screen.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use smartevp_common::colors::SLATE_50;
use smartevp_common::dispatch::AMBULANCE_POSITION;
use smartevp_common::navigation::SignalFeed;
use smartevp_common::selection::{HospitalSelector, PrioritySelector};
use smartevp_common::summary::ShareProgress;
use smartevp_common::trip::TripError;
use smartevp_common::vitals::{VitalsError, VitalsField, VitalsForm};
use smartevp_common::voice::VoiceRecorder;
use smartevp_common::widgets::draw_toast;
use smartevp_common::{FlowController, FlowError, Screen, Transition};

use crate::config::Settings;
use crate::dictation::ScriptedDictation;
use crate::input::{Key, Shortcut};
use crate::popup::Popup;
use crate::screens::{self, ButtonFocus};

/// Voice recorder backed by the scripted dictation engine.
pub type Recorder = VoiceRecorder<ScriptedDictation>;

/// Modal overlay on the navigation screen.
pub enum Overlay {
    None,
    Voice(Recorder),
    Vitals(VitalsForm),
}

impl Overlay {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Voice(_) => "voice",
            Self::Vitals(_) => "vitals",
        }
    }
}

/// Scroll step of the summary list (px).
const SCROLL_STEP: i32 = 24;

pub struct App {
    settings: Settings,
    flow: FlowController,
    priority: PrioritySelector,
    hospitals: HospitalSelector,
    feed: Option<SignalFeed>,
    overlay: Overlay,
    share: ShareProgress,
    popup: Option<Popup>,
    focus: ButtonFocus,
    summary_scroll: i32,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            flow: FlowController::new(),
            priority: PrioritySelector::new(),
            hospitals: HospitalSelector::new(),
            feed: None,
            overlay: Overlay::None,
            share: ShareProgress::default(),
            popup: None,
            focus: ButtonFocus::Primary,
            summary_scroll: 0,
        }
    }

    #[cfg(test)]
    pub const fn flow(&self) -> &FlowController { &self.flow }

    #[cfg(test)]
    pub const fn overlay(&self) -> &Overlay { &self.overlay }

    #[cfg(test)]
    pub const fn popup(&self) -> Option<&Popup> { self.popup.as_ref() }

    #[cfg(test)]
    pub const fn share(&self) -> &ShareProgress { &self.share }

    #[cfg(test)]
    pub const fn feed(&self) -> Option<&SignalFeed> { self.feed.as_ref() }

    /// Whether keys currently type into a text field.
    #[inline]
    pub const fn is_editing_text(&self) -> bool { matches!(self.overlay, Overlay::Vitals(_)) }

    // =========================================================================
    // Timers
    // =========================================================================

    /// Poll every timer once per frame.
    pub fn tick(&mut self, now_ms: u64) {
        let transition = self.flow.tick(now_ms);
        self.apply(transition, now_ms);

        if let Some(feed) = self.feed.as_mut() {
            let steps = feed.poll(now_ms);
            if steps > 0 {
                tracing::debug!(steps, green = feed.green_count(), "signal feed advanced");
            }
        }

        if let Overlay::Voice(recorder) = &mut self.overlay {
            recorder.poll(now_ms);
        }

        if self.share.poll(now_ms) {
            tracing::info!("trip details shared with hospital");
        }

        if self.popup.is_some_and(|p| p.is_expired(now_ms)) {
            self.popup = None;
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    pub fn handle_key(&mut self, key: Key, now_ms: u64) {
        tracing::debug!(?key, screen = %self.flow.screen(), overlay = self.overlay.name(), "key");
        match self.overlay {
            Overlay::Voice(_) => self.voice_key(key, now_ms),
            Overlay::Vitals(_) => self.vitals_key(key, now_ms),
            Overlay::None => self.screen_key(key, now_ms),
        }
    }

    fn screen_key(&mut self, key: Key, now_ms: u64) {
        let shortcut = key.shortcut();
        let result = match self.flow.screen() {
            Screen::Home => match (key, shortcut) {
                (_, Some(Shortcut::ToggleOnline)) => {
                    let online = !self.flow.is_online();
                    self.flow.set_online(online, now_ms)
                }
                (Key::Enter, _) => self.flow.open_alert(now_ms),
                _ => Ok(Transition::Unchanged),
            },
            Screen::Emergency => match key {
                Key::Left | Key::Right | Key::Tab { .. } => {
                    self.focus = self.focus.toggled();
                    Ok(Transition::Unchanged)
                }
                Key::Enter if self.focus == ButtonFocus::Primary => self.flow.accept_emergency(now_ms),
                Key::Enter | Key::Escape | Key::Backspace => self.flow.decline_emergency(),
                _ => Ok(Transition::Unchanged),
            },
            Screen::Criticality => match key {
                Key::Up => {
                    self.priority.move_up();
                    Ok(Transition::Unchanged)
                }
                Key::Down => {
                    self.priority.move_down();
                    Ok(Transition::Unchanged)
                }
                Key::Space => {
                    self.priority.select_cursor();
                    Ok(Transition::Unchanged)
                }
                Key::Enter => match self.priority.confirm() {
                    Some(priority) => self.flow.confirm_priority(priority),
                    None => {
                        self.priority.select_cursor();
                        Ok(Transition::Unchanged)
                    }
                },
                Key::Backspace | Key::Escape => self.flow.back_to_emergency(now_ms),
                _ => Ok(Transition::Unchanged),
            },
            Screen::Hospital => match key {
                Key::Up => {
                    self.hospitals.move_up();
                    Ok(Transition::Unchanged)
                }
                Key::Down => {
                    self.hospitals.move_down();
                    Ok(Transition::Unchanged)
                }
                Key::Left => {
                    self.hospitals.move_left();
                    Ok(Transition::Unchanged)
                }
                Key::Right => {
                    self.hospitals.move_right();
                    Ok(Transition::Unchanged)
                }
                Key::Space => {
                    self.hospitals.toggle_cursor();
                    Ok(Transition::Unchanged)
                }
                Key::Enter => self.flow.confirm_hospitals(self.hospitals.selected()),
                Key::Backspace | Key::Escape => self.flow.back_to_criticality(),
                _ => Ok(Transition::Unchanged),
            },
            Screen::Navigation => match (key, shortcut) {
                (_, Some(Shortcut::VoiceNote)) => {
                    self.open_voice(now_ms);
                    Ok(Transition::Unchanged)
                }
                (_, Some(Shortcut::Vitals)) => {
                    tracing::info!("vitals form opened");
                    self.overlay = Overlay::Vitals(VitalsForm::new());
                    Ok(Transition::Unchanged)
                }
                (Key::Enter, _) | (_, Some(Shortcut::CompleteTrip)) => self.flow.complete_trip(),
                _ => Ok(Transition::Unchanged),
            },
            Screen::Summary => match (key, shortcut) {
                (_, Some(Shortcut::Share)) => {
                    self.start_share(now_ms);
                    Ok(Transition::Unchanged)
                }
                (_, Some(Shortcut::ReturnHome)) => self.flow.return_home(),
                (Key::Left | Key::Right | Key::Tab { .. }, _) => {
                    self.focus = self.focus.toggled();
                    Ok(Transition::Unchanged)
                }
                (Key::Up, _) => {
                    self.summary_scroll = (self.summary_scroll - SCROLL_STEP).max(0);
                    Ok(Transition::Unchanged)
                }
                (Key::Down, _) => {
                    let max = self.summary_scroll_limit();
                    self.summary_scroll = (self.summary_scroll + SCROLL_STEP).min(max);
                    Ok(Transition::Unchanged)
                }
                (Key::Enter, _) if self.focus == ButtonFocus::Primary && !self.share.is_complete() => {
                    self.start_share(now_ms);
                    Ok(Transition::Unchanged)
                }
                (Key::Enter, _) => self.flow.return_home(),
                _ => Ok(Transition::Unchanged),
            },
        };
        self.finish(result, now_ms);
    }

    fn voice_key(&mut self, key: Key, now_ms: u64) {
        let Overlay::Voice(recorder) = &mut self.overlay else {
            return;
        };
        match key {
            Key::Enter | Key::Space => {
                let note = recorder.stop(now_ms);
                self.overlay = Overlay::None;
                if let Some(note) = note {
                    tracing::info!(secs = note.duration_secs, chars = note.transcription.len(), "voice note recorded");
                    let result = self.flow.add_voice_note(note);
                    if result.is_ok() {
                        self.popup = Some(Popup::VoiceSaved(now_ms));
                    }
                    self.finish(result, now_ms);
                }
            }
            Key::Escape => {
                recorder.cancel();
                self.overlay = Overlay::None;
                tracing::info!("voice note cancelled");
            }
            _ => {}
        }
    }

    fn vitals_key(&mut self, key: Key, now_ms: u64) {
        let Overlay::Vitals(form) = &mut self.overlay else {
            return;
        };
        match key {
            Key::Up | Key::Tab { reverse: true } => form.focus_prev(),
            Key::Down | Key::Tab { reverse: false } => form.focus_next(),
            Key::Left if form.focus() == VitalsField::Consciousness => form.cycle_consciousness(false),
            Key::Right | Key::Space if form.focus() == VitalsField::Consciousness => form.cycle_consciousness(true),
            Key::Space => {
                form.type_char(' ');
            }
            Key::Char(c) => {
                if !form.type_char(c) {
                    tracing::debug!(%c, field = %form.focus(), "character rejected");
                }
            }
            Key::Backspace => form.backspace(),
            Key::Escape => {
                self.overlay = Overlay::None;
                tracing::info!("vitals form closed without saving");
            }
            Key::Enter => match form.build(now_ms) {
                Ok(record) => {
                    tracing::debug!(consciousness = record.consciousness.id(), "vitals form saved");
                    self.overlay = Overlay::None;
                    let result = self.flow.add_vitals(record);
                    if result.is_ok() {
                        self.popup = Some(Popup::VitalsSaved(now_ms));
                    }
                    self.finish(result, now_ms);
                }
                Err(VitalsError::InvalidNumber { field }) => {
                    tracing::warn!(%field, "vitals not saved: invalid number");
                    self.popup = Some(Popup::InvalidVitals(now_ms, field));
                }
            },
            Key::Left | Key::Right => {}
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    fn open_voice(&mut self, now_ms: u64) {
        let engine = self.settings.speech.then(ScriptedDictation::new);
        let mut recorder = Recorder::new(engine);
        recorder.start(now_ms);
        tracing::info!(recognizer = recorder.has_recognizer(), "voice recording started");
        self.overlay = Overlay::Voice(recorder);
    }

    fn start_share(&mut self, now_ms: u64) {
        if self.share == ShareProgress::Idle {
            tracing::info!("sharing trip details");
        }
        self.share.start(now_ms);
    }

    fn summary_scroll_limit(&self) -> i32 { self.flow.trip().map_or(0, screens::summary_scroll_limit) }

    /// Log the outcome of a flow operation and apply its side effects.
    fn finish(&mut self, result: Result<Transition, FlowError>, now_ms: u64) {
        match result {
            Ok(transition) => self.apply(transition, now_ms),
            Err(FlowError::Trip(err @ (TripError::NotesFull | TripError::VitalsFull))) => {
                tracing::warn!(%err, "record not added");
                self.popup = Some(Popup::ListFull(now_ms));
            }
            Err(err) => tracing::warn!(%err, screen = %self.flow.screen(), "action rejected"),
        }
    }

    fn apply(&mut self, transition: Transition, now_ms: u64) {
        match transition {
            Transition::Unchanged => {}
            Transition::Screen { from, to } => {
                tracing::info!(%from, %to, "screen changed");
                self.enter(from, to, now_ms);
            }
            Transition::Online(online) => {
                tracing::info!(online, "availability changed");
                self.popup = Some(if online { Popup::Online(now_ms) } else { Popup::Offline(now_ms) });
            }
            Transition::RecordAdded { id } => tracing::info!(id, "record added to trip"),
            Transition::AlertRaised => tracing::info!("new emergency request"),
            Transition::AutoDeclined => {
                tracing::warn!("emergency auto-declined after countdown");
                self.popup = Some(Popup::AutoDeclined(now_ms));
                self.enter(Screen::Emergency, Screen::Home, now_ms);
            }
        }
    }

    /// Reset per-screen state when a screen is entered.
    fn enter(&mut self, from: Screen, to: Screen, now_ms: u64) {
        self.focus = ButtonFocus::Primary;
        match to {
            Screen::Criticality => self.priority = PrioritySelector::new(),
            Screen::Hospital if from == Screen::Criticality => self.hospitals = HospitalSelector::new(),
            Screen::Navigation => {
                for ty in self.flow.trip().map_or(&[][..], |t| t.hospital_types()) {
                    tracing::debug!(hospital_type = ty.id(), "routing by hospital type");
                }
                let destination = self.flow.trip().and_then(|t| t.destination.as_ref()).map(|d| d.location);
                self.feed = destination.map(|to| SignalFeed::new(AMBULANCE_POSITION, to, now_ms));
            }
            Screen::Summary => {
                self.feed = None;
                self.overlay = Overlay::None;
                self.share = ShareProgress::Idle;
                self.summary_scroll = 0;
            }
            Screen::Home => {
                self.feed = None;
                self.overlay = Overlay::None;
                self.share = ShareProgress::Idle;
            }
            _ => {}
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Draw the current screen, its overlay and any popup.
    pub fn render<D>(&self, display: &mut D, now_ms: u64)
    where
        D: DrawTarget<Color = Rgb565>,
    {
        display.clear(SLATE_50).ok();

        match self.flow.screen() {
            Screen::Home => screens::draw_home(display, &self.flow, now_ms),
            Screen::Emergency => screens::draw_emergency(display, &self.flow, self.focus, now_ms),
            Screen::Criticality => screens::draw_criticality(display, &self.priority),
            Screen::Hospital => screens::draw_hospital(display, &self.hospitals),
            Screen::Navigation => {
                if let Some(trip) = self.flow.trip() {
                    screens::draw_navigation(display, trip, self.feed.as_ref());
                }
            }
            Screen::Summary => {
                if let Some(trip) = self.flow.trip() {
                    let view = screens::SummaryView {
                        share: &self.share,
                        focus: self.focus,
                        scroll: self.summary_scroll,
                    };
                    screens::draw_summary(display, trip, &view, now_ms);
                }
            }
        }

        match &self.overlay {
            Overlay::None => {}
            Overlay::Voice(recorder) => screens::draw_voice_overlay(display, recorder, now_ms),
            Overlay::Vitals(form) => screens::draw_vitals_overlay(display, form),
        }

        if let Some(popup) = &self.popup {
            draw_toast(display, &popup.message(), popup.color());
        }
    }
}
