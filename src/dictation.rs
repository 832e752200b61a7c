//! Scripted dictation engine.
//!
//! Stands in for a speech recognizer: once started it "hears" a fixed clinical
//! dictation and reveals it one word at a time, so the voice overlay shows a
//! transcript growing while the paramedic talks.

use smartevp_common::voice::SpeechRecognizer;

/// Words revealed per second of recording.
pub const WORD_INTERVAL_MS: u64 = 350;

/// What the scripted paramedic says.
pub const DICTATION_SCRIPT: &str = "Patient conscious and breathing. Complaining of crushing chest pain radiating to \
                                    the left arm. Skin pale and diaphoretic. Aspirin 325 milligrams given, oxygen at \
                                    four liters per minute. Requesting cardiac team on arrival.";

/// Replays [`DICTATION_SCRIPT`] word by word.
#[derive(Clone, Debug)]
pub struct ScriptedDictation {
    script: &'static str,
    started_ms: u64,
    listening: bool,
    /// Byte length of the revealed prefix.
    revealed: usize,
}

impl ScriptedDictation {
    pub const fn new() -> Self { Self::with_script(DICTATION_SCRIPT) }

    pub const fn with_script(script: &'static str) -> Self {
        Self {
            script,
            started_ms: 0,
            listening: false,
            revealed: 0,
        }
    }

    #[cfg(test)]
    pub const fn is_listening(&self) -> bool { self.listening }
}

impl Default for ScriptedDictation {
    fn default() -> Self { Self::new() }
}

/// Byte length of the first `words` whitespace-separated words of `text`.
fn prefix_len(text: &str, words: usize) -> usize {
    if words == 0 {
        return 0;
    }
    let mut seen = 0;
    let mut in_word = false;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if in_word {
                seen += 1;
                if seen == words {
                    return i;
                }
            }
            in_word = false;
        } else {
            in_word = true;
        }
    }
    text.len()
}

impl SpeechRecognizer for ScriptedDictation {
    fn start(&mut self, now_ms: u64) {
        self.started_ms = now_ms;
        self.listening = true;
        self.revealed = 0;
        tracing::debug!(now_ms, "dictation started");
    }

    fn stop(&mut self) {
        if self.listening {
            tracing::debug!(chars = self.revealed, "dictation stopped");
        }
        self.listening = false;
    }

    fn transcript(&self) -> &str { &self.script[..self.revealed] }

    fn poll(&mut self, now_ms: u64) {
        if !self.listening {
            return;
        }
        let words = (now_ms.saturating_sub(self.started_ms) / WORD_INTERVAL_MS) as usize;
        self.revealed = prefix_len(self.script, words);
    }
}

#[cfg(test)]
mod tests {
    use smartevp_common::voice::{RecordingState, VoiceRecorder};

    use super::*;

    #[test]
    fn test_prefix_len() {
        assert_eq!(prefix_len("one two  three", 0), 0);
        assert_eq!(prefix_len("one two  three", 1), 3);
        assert_eq!(prefix_len("one two  three", 2), 7);
        assert_eq!(prefix_len("one two  three", 3), 14);
        assert_eq!(prefix_len("one two  three", 10), 14, "Clamped to the whole text");
    }

    #[test]
    fn test_reveals_words_over_time() {
        let mut engine = ScriptedDictation::with_script("alpha beta gamma");
        engine.start(1_000);
        engine.poll(1_000);
        assert_eq!(engine.transcript(), "");

        engine.poll(1_000 + WORD_INTERVAL_MS);
        assert_eq!(engine.transcript(), "alpha");

        engine.poll(1_000 + 2 * WORD_INTERVAL_MS);
        assert_eq!(engine.transcript(), "alpha beta");

        engine.poll(1_000 + 100 * WORD_INTERVAL_MS);
        assert_eq!(engine.transcript(), "alpha beta gamma");
    }

    #[test]
    fn test_stop_freezes_transcript() {
        let mut engine = ScriptedDictation::with_script("alpha beta gamma");
        engine.start(0);
        engine.poll(WORD_INTERVAL_MS);
        engine.stop();
        engine.poll(10 * WORD_INTERVAL_MS);
        assert_eq!(engine.transcript(), "alpha", "No new words after stop");
        assert!(!engine.is_listening());
    }

    #[test]
    fn test_restart_clears_transcript() {
        let mut engine = ScriptedDictation::new();
        engine.start(0);
        engine.poll(5 * WORD_INTERVAL_MS);
        assert!(!engine.transcript().is_empty());
        engine.start(10_000);
        assert_eq!(engine.transcript(), "");
    }

    #[test]
    fn test_recorder_streams_dictation() {
        let mut recorder = VoiceRecorder::new(Some(ScriptedDictation::new()));
        recorder.start(0);
        recorder.poll(3 * WORD_INTERVAL_MS);
        assert_eq!(recorder.transcript(), "Patient conscious and");

        let note = recorder.stop(4_000);
        assert_eq!(recorder.state(), RecordingState::Stopped);
        let note = note.expect("stop while recording yields a note");
        assert!(note.transcription.starts_with("Patient conscious and breathing."));
        assert_eq!(note.duration_secs, 4);
    }

    #[test]
    fn test_script_fits_transcript() {
        assert!(DICTATION_SCRIPT.len() <= smartevp_common::trip::TRANSCRIPT_LEN);
    }
}
