//! Color constants for the SmartEVP dashboard.
//!
//! Light theme: slate backgrounds and text, red for emergencies, green for
//! go/accept, amber for medium priority and blue for navigation actions.
//!
//! ## Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! - Red: 0-31 (5 bits)
//! - Green: 0-63 (6 bits)
//! - Blue: 0-31 (5 bits)

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black. Used for map outlines and marker borders.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. Card backgrounds and text on saturated buttons.
pub const WHITE: Rgb565 = Rgb565::WHITE;

// =============================================================================
// Slate Scale (neutral UI)
// =============================================================================

/// Page background (#F8FAFC).
pub const SLATE_50: Rgb565 = Rgb565::new(31, 62, 31);

/// Selected-card tint and field background (#F1F5F9).
pub const SLATE_100: Rgb565 = Rgb565::new(30, 61, 30);

/// Card borders and map land (#E2E8F0).
pub const SLATE_200: Rgb565 = Rgb565::new(28, 58, 30);

/// Disabled buttons and unchecked boxes (#CBD5E1).
pub const SLATE_300: Rgb565 = Rgb565::new(25, 53, 28);

/// Secondary text (#475569).
pub const SLATE_600: Rgb565 = Rgb565::new(8, 21, 13);

/// Primary text (#0F172A).
pub const SLATE_900: Rgb565 = Rgb565::new(1, 5, 5);

// =============================================================================
// Accent Colors
// =============================================================================

/// Emergency red (#DC2626). Alerts, high priority, record button.
pub const RED_600: Rgb565 = Rgb565::new(27, 9, 4);

/// Red traffic signal (#EF4444).
pub const SIGNAL_RED: Rgb565 = Rgb565::new(29, 17, 8);

/// Light red badge background (#FEE2E2).
pub const RED_100: Rgb565 = Rgb565::new(31, 56, 28);

/// Amber for medium priority (#F59E0B).
pub const AMBER_500: Rgb565 = Rgb565::new(30, 39, 1);

/// Yellow traffic signal (#EAB308).
pub const SIGNAL_YELLOW: Rgb565 = Rgb565::new(29, 44, 1);

/// Accept / low priority green (#16A34A).
pub const GREEN_600: Rgb565 = Rgb565::new(2, 40, 9);

/// Green traffic signal (#22C55E).
pub const SIGNAL_GREEN: Rgb565 = Rgb565::new(4, 49, 11);

/// Light green panel (#F0FDF4 / #DCFCE7).
pub const GREEN_50: Rgb565 = Rgb565::new(27, 62, 28);

/// Navigation blue (#2563EB). Route line, primary buttons, badges.
pub const BLUE_600: Rgb565 = Rgb565::new(4, 24, 29);

/// Selected hospital card tint (#EFF6FF).
pub const BLUE_50: Rgb565 = Rgb565::new(29, 61, 31);

/// Offline gray (#9CA3AF).
pub const GRAY_400: Rgb565 = Rgb565::new(19, 40, 21);

/// Schematic map water/park tint.
pub const MAP_GREEN: Rgb565 = Rgb565::new(24, 58, 24);

/// Dim overlay drawn behind modals.
pub const SCRIM: Rgb565 = Rgb565::new(6, 12, 7);
