//! Screen rendering: the boot sequence plus one module per flow screen.
//!
//! Flow screens are pure drawing functions generic over
//! `DrawTarget<Color = Rgb565>`; they read state and never change it.

mod boot;
mod criticality;
mod emergency;
mod home;
mod hospital;
mod navigation;
mod summary;
mod vitals;
mod voice;

pub use boot::run_boot_screen;
pub use criticality::draw_criticality;
pub use emergency::draw_emergency;
pub use home::draw_home;
pub use hospital::draw_hospital;
pub use navigation::draw_navigation;
pub use summary::{SummaryView, draw_summary, summary_scroll_limit};
pub use vitals::draw_vitals_overlay;
pub use voice::draw_voice_overlay;

/// Which of a screen's two bottom buttons has keyboard focus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonFocus {
    /// Left / affirmative button (Accept, Share).
    #[default]
    Primary,
    /// Right / alternative button (Decline, Return Home).
    Secondary,
}

impl ButtonFocus {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Primary,
        }
    }
}
