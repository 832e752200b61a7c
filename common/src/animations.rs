//! Time-based animation helpers.
//!
//! Everything here is a pure function of the session clock, so a frame can be
//! redrawn from state alone:
//! - **Pulse**: smooth 0..1 oscillation for the urgent countdown and the
//!   recording indicator
//! - **Blend**: RGB565 interpolation used to fade between pulse colors
//! - **Spinner**: classic `| / - \` text spinner for the boot and share screens
//!
//! The sine comes from `micromath` so the crate stays `no_std`.

use core::f32::consts::TAU;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::IntoStorage;
use micromath::F32;

// =============================================================================
// Animation Constants
// =============================================================================

/// Period of the urgent countdown pulse (ms).
pub const URGENT_PULSE_MS: u64 = 1_000;

/// Period of the recording indicator pulse (ms).
pub const RECORDING_PULSE_MS: u64 = 1_200;

/// Time each spinner character is shown (ms).
pub const SPINNER_STEP_MS: u64 = 130;

/// Spinner characters in rotation order.
pub const SPINNER_CHARS: [char; 4] = ['|', '/', '-', '\\'];

// =============================================================================
// Pulse
// =============================================================================

/// Pulse level in `0.0..=1.0`, starting at 0 and peaking mid-period.
#[inline]
pub fn pulse(now_ms: u64, period_ms: u64) -> f32 {
    if period_ms == 0 {
        return 0.0;
    }
    let phase = (now_ms % period_ms) as f32 / period_ms as f32;
    let wave = F32(phase * TAU - TAU / 4.0).sin().0;
    ((wave + 1.0) / 2.0).clamp(0.0, 1.0)
}

// =============================================================================
// Color Blend
// =============================================================================

/// Linear interpolation between two colors; `t` is clamped to `0.0..=1.0`.
///
/// Components are interpolated in 8-bit fixed point on the raw 5-6-5 values.
pub fn blend_rgb565(from: Rgb565, to: Rgb565, t: f32) -> Rgb565 {
    let t_fixed = (t.clamp(0.0, 1.0) * 256.0) as i32;
    let from_raw = from.into_storage();
    let to_raw = to.into_storage();

    let channel = |shift: u16, mask: u16| -> u8 {
        let a = i32::from((from_raw >> shift) & mask);
        let b = i32::from((to_raw >> shift) & mask);
        (a + (((b - a) * t_fixed) >> 8)).clamp(0, i32::from(mask)) as u8
    };

    Rgb565::new(channel(11, 0x1F), channel(5, 0x3F), channel(0, 0x1F))
}

// =============================================================================
// Spinner
// =============================================================================

/// Spinner character for `now_ms`; `offset` shifts the phase by whole steps.
#[inline]
pub fn spinner_char(now_ms: u64, offset: usize) -> char {
    let step = (now_ms / SPINNER_STEP_MS) as usize;
    SPINNER_CHARS[(step + offset) % SPINNER_CHARS.len()]
}
