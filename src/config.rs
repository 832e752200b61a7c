//! Window configuration and runtime settings.
//!
//! Layout lives in `smartevp_common::config`; this module holds what only the
//! desktop simulator needs. Two settings can be overridden from the
//! environment:
//!
//! | Variable | Values | Default |
//! |----------|--------|---------|
//! | `SMARTEVP_SPEECH` | `on` / `off` | `on` |
//! | `SMARTEVP_SCALE` | `1`..=`4` | `2` |
//!
//! Unparseable values are logged and replaced by the default.

use std::env;

use thiserror::Error;

// =============================================================================
// Window Configuration
// =============================================================================

/// Window title.
pub const WINDOW_TITLE: &str = "SmartEVP Ambulance Dashboard";

/// Default pixel scale of the simulator window.
pub const DEFAULT_SCALE: u32 = 2;

/// Largest accepted pixel scale.
pub const MAX_SCALE: u32 = 4;

const _: () = assert!(DEFAULT_SCALE >= 1 && DEFAULT_SCALE <= MAX_SCALE);

pub const SPEECH_VAR: &str = "SMARTEVP_SPEECH";
pub const SCALE_VAR: &str = "SMARTEVP_SCALE";

// =============================================================================
// Runtime Settings
// =============================================================================

/// A rejected environment value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("{var} must be \"on\" or \"off\", got {value:?}")]
    InvalidSwitch { var: &'static str, value: String },
    #[error("{var} must be a whole number from 1 to {MAX_SCALE}, got {value:?}")]
    InvalidScale { var: &'static str, value: String },
}

/// Settings resolved at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Use the scripted dictation engine. When off, voice notes fall back to
    /// the canned transcript.
    pub speech: bool,
    /// Window pixel scale.
    pub scale: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speech: true,
            scale: DEFAULT_SCALE,
        }
    }
}

impl Settings {
    /// Read settings from the process environment, logging and skipping
    /// invalid values.
    pub fn from_env() -> Self {
        let (settings, errors) = Self::resolve(env::var(SPEECH_VAR).ok().as_deref(), env::var(SCALE_VAR).ok().as_deref());
        for err in errors {
            tracing::warn!(%err, "ignoring invalid setting");
        }
        settings
    }

    /// Resolve settings from optional raw values. Returns the settings plus
    /// every value that had to be replaced by its default.
    pub fn resolve(speech: Option<&str>, scale: Option<&str>) -> (Self, Vec<SettingsError>) {
        let mut settings = Self::default();
        let mut errors = Vec::new();

        if let Some(raw) = speech {
            match parse_switch(raw) {
                Some(on) => settings.speech = on,
                None => errors.push(SettingsError::InvalidSwitch {
                    var: SPEECH_VAR,
                    value: raw.to_owned(),
                }),
            }
        }

        if let Some(raw) = scale {
            match raw.trim().parse::<u32>() {
                Ok(s) if (1..=MAX_SCALE).contains(&s) => settings.scale = s,
                _ => errors.push(SettingsError::InvalidScale {
                    var: SCALE_VAR,
                    value: raw.to_owned(),
                }),
            }
        }

        (settings, errors)
    }
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "on" | "1" | "true" | "yes" => Some(true),
        "off" | "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
