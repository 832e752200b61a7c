//! Layout configuration constants.
//!
//! The dashboard targets a 240x320 portrait panel, the shape of the phone
//! mounted in the cab. Layout values are `const` so screen code never
//! recomputes them per frame.

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels.
pub const SCREEN_WIDTH: u32 = 240;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 320;

/// Screen center X coordinate.
pub const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;

// =============================================================================
// Shared Layout
// =============================================================================

/// Height of the top header bar on every screen.
pub const HEADER_HEIGHT: u32 = 28;

/// Outer margin used by cards and buttons.
pub const MARGIN: u32 = 8;

/// Width of full-width cards and buttons.
pub const CONTENT_WIDTH: u32 = SCREEN_WIDTH - 2 * MARGIN;

/// Height of primary action buttons.
pub const BUTTON_HEIGHT: u32 = 28;

/// Y position of the bottom action button.
pub const BOTTOM_BUTTON_Y: i32 = (SCREEN_HEIGHT - MARGIN - BUTTON_HEIGHT) as i32;

/// Line height for the 6x10 label font.
pub const LINE_HEIGHT: i32 = 12;

// =============================================================================
// Map Viewport
// =============================================================================

/// Top of the map area on the home and navigation screens.
pub const MAP_TOP: i32 = HEADER_HEIGHT as i32;

/// Height of the map area on the home screen (stats card sits below).
pub const HOME_MAP_HEIGHT: u32 = 212;

/// Top of the map area on the navigation screen (trip banner sits above).
pub const NAV_MAP_TOP: i32 = 64;

/// Height of the map area on the navigation screen (preemption strip and
/// control bar sit below).
pub const NAV_MAP_HEIGHT: u32 = 150;

/// Padding kept between fitted map content and the viewport edge.
pub const MAP_PADDING: u32 = 24;

const _: () = assert!(NAV_MAP_TOP + NAV_MAP_HEIGHT as i32 + 40 < BOTTOM_BUTTON_Y);
const _: () = assert!(MAP_TOP + (HOME_MAP_HEIGHT as i32) < SCREEN_HEIGHT as i32);
