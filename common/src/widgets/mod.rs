//! Widget components for the dashboard display.
//!
//! All widgets are generic over `DrawTarget<Color = Rgb565>` for platform independence.

mod header;
mod map;
mod overlays;
mod primitives;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use header::{HeaderRight, draw_header};
pub use map::{
    MARKER_SIZE,
    SIGNAL_SIZE,
    draw_ambulance_marker,
    draw_coverage,
    draw_emergency_marker,
    draw_hospital_marker,
    draw_map_background,
    draw_route,
    draw_signal,
};
pub use overlays::{MODAL_RECT, draw_modal, draw_scrim, draw_toast};
pub use primitives::{
    BADGE_HEIGHT,
    ButtonKind,
    CHECKBOX_SIZE,
    CORNER_RADIUS,
    badge_width,
    draw_badge,
    draw_badge_right,
    draw_button,
    draw_card,
    draw_checkbox,
    draw_divider,
    draw_focus_ring,
    draw_label_value,
    draw_progress_bar,
    draw_radio,
    draw_tick,
    draw_wrapped_text,
};
