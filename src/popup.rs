//! Toast popups with time-based expiration.
//!
//! Each popup variant holds its start time on the session clock for
//! expiration checking.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use heapless::String;
use smartevp_common::colors::{AMBER_500, GRAY_400, GREEN_600, RED_600, SLATE_600};
use smartevp_common::vitals::VitalsField;

use crate::timing::POPUP_DURATION_MS;

/// Active popup with its start time (ms).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Popup {
    /// A voice note was appended to the trip.
    VoiceSaved(u64),
    /// A vitals record was appended to the trip.
    VitalsSaved(u64),
    /// A vitals field did not parse; the form stays open.
    InvalidVitals(u64, VitalsField),
    /// The trip's note or vitals list is full.
    ListFull(u64),
    /// The accept countdown ran out.
    AutoDeclined(u64),
    /// Going online: the next alert is being dispatched.
    Online(u64),
    /// Going offline: no alerts until the driver is back online.
    Offline(u64),
}

impl Popup {
    /// Get the start time of this popup.
    #[inline]
    pub const fn start_ms(&self) -> u64 {
        match self {
            Self::VoiceSaved(t)
            | Self::VitalsSaved(t)
            | Self::InvalidVitals(t, _)
            | Self::ListFull(t)
            | Self::AutoDeclined(t)
            | Self::Online(t)
            | Self::Offline(t) => *t,
        }
    }

    /// Check if this popup has expired.
    #[inline]
    pub const fn is_expired(&self, now_ms: u64) -> bool { now_ms.saturating_sub(self.start_ms()) >= POPUP_DURATION_MS }

    /// Toast text.
    pub fn message(&self) -> String<32> {
        let mut text = String::new();
        match self {
            Self::VoiceSaved(_) => text.push_str("Voice note saved").ok(),
            Self::VitalsSaved(_) => text.push_str("Vitals saved").ok(),
            Self::InvalidVitals(_, field) => write!(text, "Invalid {field}").ok(),
            Self::ListFull(_) => text.push_str("Trip record is full").ok(),
            Self::AutoDeclined(_) => text.push_str("Emergency timed out").ok(),
            Self::Online(_) => text.push_str("Online: awaiting dispatch").ok(),
            Self::Offline(_) => text.push_str("Offline").ok(),
        };
        text
    }

    /// Toast fill color.
    pub const fn color(&self) -> Rgb565 {
        match self {
            Self::VoiceSaved(_) | Self::VitalsSaved(_) => GREEN_600,
            Self::InvalidVitals(..) | Self::ListFull(_) => RED_600,
            Self::AutoDeclined(_) => AMBER_500,
            Self::Online(_) => SLATE_600,
            Self::Offline(_) => GRAY_400,
        }
    }
}
