//! Pre-computed static text styles.
//!
//! `MonoTextStyle` and `TextStyle` constructors are const fn in
//! embedded-graphics 0.8, so every style used by the screens is built at
//! compile time. Styles that need a runtime color use [`LABEL_FONT`] or
//! [`TITLE_FONT`] with `MonoTextStyle::new(font, color)`.

use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_6X10, FONT_6X13_BOLD, FONT_7X13_BOLD, FONT_10X20},
    },
    pixelcolor::Rgb565,
    text::{Alignment, TextStyle, TextStyleBuilder},
};
use profont::{PROFONT_18_POINT, PROFONT_24_POINT};

use crate::colors::{BLUE_600, RED_600, SLATE_600, SLATE_900, WHITE};

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Centered text alignment.
pub const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).build();

/// Left-aligned text.
pub const LEFT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Left).build();

/// Right-aligned text. Used for header badges.
pub const RIGHT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Right).build();

// =============================================================================
// Font References (for dynamic color styles)
// =============================================================================

/// Small label font (6x10 pixels).
pub const LABEL_FONT: &MonoFont = &FONT_6X10;

/// Bold heading font (7x13 pixels).
pub const HEADING_FONT: &MonoFont = &FONT_7X13_BOLD;

/// Large title font (10x20 pixels).
pub const TITLE_FONT: &MonoFont = &FONT_10X20;

/// Width of one [`LABEL_FONT`] character in pixels.
pub const LABEL_CHAR_WIDTH: u32 = 6;

// =============================================================================
// Pre-computed Text Styles
// =============================================================================

/// Primary body text.
pub const BODY_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, SLATE_900);

/// Secondary body text.
pub const MUTED_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, SLATE_600);

/// White label text on saturated buttons.
pub const LABEL_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, WHITE);

/// Blue label text (links, counters).
pub const LABEL_STYLE_BLUE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, BLUE_600);

/// Bold section headings.
pub const HEADING_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_7X13_BOLD, SLATE_900);

/// White bold headings on saturated backgrounds.
pub const HEADING_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_7X13_BOLD, WHITE);

/// Narrow white bold text for long one-line banners.
pub const BANNER_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X13_BOLD, WHITE);

/// Red screen titles ("EMERGENCY REQUEST", "SmartEVP").
pub const TITLE_STYLE_RED: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_10X20, RED_600);

/// Dark screen titles.
pub const TITLE_STYLE_DARK: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_10X20, SLATE_900);

/// Large numerals (ETA, countdown) in blue (`ProFont` 24pt).
pub const VALUE_STYLE_BLUE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_24_POINT, BLUE_600);

/// Large numerals in dark slate.
pub const VALUE_STYLE_DARK: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_24_POINT, SLATE_900);

/// Large numeral font for runtime colors (countdown pulse).
pub const VALUE_FONT: &MonoFont = &PROFONT_24_POINT;

/// Medium numeral font (`ProFont` 18pt). Stats values and recording timer.
pub const VALUE_FONT_MEDIUM: &MonoFont = &PROFONT_18_POINT;
