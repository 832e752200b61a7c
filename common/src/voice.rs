//! Voice note capture.
//!
//! [`VoiceRecorder`] drives an optional [`SpeechRecognizer`]. The recorder is
//! created when the voice overlay opens and starts immediately. Without a
//! recognizer it shows a canned dictation so the flow still produces a note.
//!
//! # Lifecycle
//!
//! ```text
//! Idle --start--> Recording --stop--> Stopped (one VoiceNote produced)
//!                     |
//!                     +-----cancel--> Idle (nothing produced)
//! ```

use core::fmt::Write;

use heapless::String;

use crate::text::truncated;
use crate::thresholds::RECORDING_TICK_MS;
use crate::timer::IntervalTimer;
use crate::trip::{TRANSCRIPT_LEN, VoiceNote};

/// Transcript shown while recording when no recognizer is available.
pub const FALLBACK_TRANSCRIPT: &str = "Patient is a 45-year-old male complaining of severe chest pain radiating to left arm \
                                       for the past 30 minutes. Patient appears anxious, skin is pale and clammy...";

/// Transcript saved when recording stops with nothing recognized.
pub const EMPTY_TRANSCRIPT: &str = "Patient is a 45-year-old male complaining of severe chest pain...";

/// A streaming speech-to-text engine.
pub trait SpeechRecognizer {
    /// Begin capturing at `now_ms`, discarding any previous transcript.
    fn start(&mut self, now_ms: u64);

    /// Stop capturing. The transcript stays readable.
    fn stop(&mut self);

    /// Text recognized so far.
    fn transcript(&self) -> &str;

    /// Advance the engine. Engines driven by their own thread ignore this.
    fn poll(&mut self, _now_ms: u64) {}
}

/// Recorder state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordingState {
    Idle,
    Recording,
    Stopped,
}

/// Records one voice note.
pub struct VoiceRecorder<R> {
    recognizer: Option<R>,
    state: RecordingState,
    timer: IntervalTimer,
    started_ms: u64,
    duration_secs: u32,
    transcript: String<TRANSCRIPT_LEN>,
}

impl<R: SpeechRecognizer> VoiceRecorder<R> {
    pub fn new(recognizer: Option<R>) -> Self {
        Self {
            recognizer,
            state: RecordingState::Idle,
            timer: IntervalTimer::starting_at(0, RECORDING_TICK_MS),
            started_ms: 0,
            duration_secs: 0,
            transcript: String::new(),
        }
    }

    /// Begin recording, resetting duration and transcript.
    pub fn start(&mut self, now_ms: u64) {
        self.state = RecordingState::Recording;
        self.timer = IntervalTimer::starting_at(now_ms, RECORDING_TICK_MS);
        self.started_ms = now_ms;
        self.duration_secs = 0;
        self.transcript.clear();
        match self.recognizer.as_mut() {
            Some(r) => r.start(now_ms),
            None => self.transcript = truncated(FALLBACK_TRANSCRIPT),
        }
    }

    /// Advance the duration and pull the latest transcript.
    pub fn poll(&mut self, now_ms: u64) {
        if self.state != RecordingState::Recording {
            return;
        }
        self.duration_secs = self.duration_secs.saturating_add(self.timer.poll(now_ms));
        if let Some(r) = self.recognizer.as_mut() {
            r.poll(now_ms);
            self.transcript = truncated(r.transcript());
        }
    }

    /// Stop recording and produce the note. `None` unless currently recording.
    pub fn stop(&mut self, now_ms: u64) -> Option<VoiceNote> {
        if self.state != RecordingState::Recording {
            return None;
        }
        self.poll(now_ms);
        if let Some(r) = self.recognizer.as_mut() {
            r.stop();
        }
        self.state = RecordingState::Stopped;
        let text = if self.transcript.is_empty() {
            EMPTY_TRANSCRIPT
        } else {
            self.transcript.as_str()
        };
        Some(VoiceNote::new(now_ms, self.duration_secs, text))
    }

    /// Abandon the recording without producing a note.
    pub fn cancel(&mut self) {
        if self.state == RecordingState::Recording
            && let Some(r) = self.recognizer.as_mut()
        {
            r.stop();
        }
        self.state = RecordingState::Idle;
    }

    #[inline]
    pub fn state(&self) -> RecordingState { self.state }

    #[inline]
    pub fn is_recording(&self) -> bool { self.state == RecordingState::Recording }

    #[inline]
    pub fn has_recognizer(&self) -> bool { self.recognizer.is_some() }

    #[inline]
    pub fn duration_secs(&self) -> u32 { self.duration_secs }

    #[inline]
    pub fn transcript(&self) -> &str { &self.transcript }

    /// Session time the current recording started.
    #[inline]
    pub fn started_ms(&self) -> u64 { self.started_ms }

    /// Elapsed time as `M:SS`.
    pub fn duration_label(&self) -> String<8> { duration_label(self.duration_secs) }
}

/// Format whole seconds as `M:SS`.
pub fn duration_label(secs: u32) -> String<8> {
    let mut s = String::new();
    let _ = write!(s, "{}:{:02}", secs / 60, secs % 60);
    s
}
