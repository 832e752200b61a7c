//! Overlays drawn on top of a screen.
//!
//! A modal panel (voice recorder, vitals form) sits over a dithered scrim so
//! the screen underneath stays visible but recedes. Toasts are short-lived
//! status messages: a white border around a colored box with centered text.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;

use crate::colors::{SCRIM, SLATE_200, WHITE};
use crate::config::{CENTER_X, MARGIN, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::styles::{CENTERED, HEADING_STYLE, HEADING_STYLE_WHITE, LEFT_ALIGNED, MUTED_STYLE, RIGHT_ALIGNED};
use crate::widgets::primitives::draw_card;

// =============================================================================
// Modal Geometry
// =============================================================================

/// Modal panel: full width minus margins, below the header.
pub const MODAL_RECT: Rectangle = Rectangle::new(
    Point::new(MARGIN as i32, 36),
    Size::new(SCREEN_WIDTH - 2 * MARGIN, SCREEN_HEIGHT - 36 - MARGIN),
);

/// Height of the title row inside a modal.
const MODAL_TITLE_HEIGHT: u32 = 24;

/// Inner padding of a modal.
const MODAL_PADDING: u32 = 8;

// =============================================================================
// Toast Geometry
// =============================================================================

const TOAST_WIDTH: u32 = 200;
const TOAST_HEIGHT: u32 = 32;
const TOAST_X: i32 = (SCREEN_WIDTH - TOAST_WIDTH) as i32 / 2;
const TOAST_Y: i32 = SCREEN_HEIGHT as i32 - 84;

const TOAST_BORDER_POS: Point = Point::new(TOAST_X - 2, TOAST_Y - 2);
const TOAST_BORDER_SIZE: Size = Size::new(TOAST_WIDTH + 4, TOAST_HEIGHT + 4);
const TOAST_BG_POS: Point = Point::new(TOAST_X, TOAST_Y);
const TOAST_BG_SIZE: Size = Size::new(TOAST_WIDTH, TOAST_HEIGHT);
const TOAST_TEXT_POS: Point = Point::new(CENTER_X, TOAST_Y + TOAST_HEIGHT as i32 / 2 + 4);

const WHITE_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(WHITE);

const _: () = assert!(TOAST_WIDTH + 4 <= SCREEN_WIDTH);
const _: () = assert!(TOAST_Y > 0);

// =============================================================================
// Scrim
// =============================================================================

/// Checkerboard dither over `area`. RGB565 has no alpha, so every other pixel
/// is darkened instead of blending.
pub fn draw_scrim<D>(display: &mut D, area: Rectangle)
where
    D: DrawTarget<Color = Rgb565>,
{
    let pixels = area
        .points()
        .filter(|p| (p.x + p.y) % 2 == 0)
        .map(|p| Pixel(p, SCRIM));
    display.draw_iter(pixels).ok();
}

// =============================================================================
// Modal
// =============================================================================

/// Modal panel with a title row and a close hint.
///
/// Returns the content area below the title row.
pub fn draw_modal<D>(display: &mut D, title: &str) -> Rectangle
where
    D: DrawTarget<Color = Rgb565>,
{
    draw_scrim(display, display.bounding_box());
    draw_card(display, MODAL_RECT, WHITE, SLATE_200);

    let left = MODAL_RECT.top_left.x + MODAL_PADDING as i32;
    let right = MODAL_RECT.top_left.x + MODAL_RECT.size.width as i32 - MODAL_PADDING as i32;
    let baseline = MODAL_RECT.top_left.y + 16;
    Text::with_text_style(title, Point::new(left, baseline), HEADING_STYLE, LEFT_ALIGNED)
        .draw(display)
        .ok();
    Text::with_text_style("Esc", Point::new(right, baseline), MUTED_STYLE, RIGHT_ALIGNED)
        .draw(display)
        .ok();

    Rectangle::new(
        MODAL_RECT.top_left + Point::new(MODAL_PADDING as i32, MODAL_TITLE_HEIGHT as i32),
        Size::new(
            MODAL_RECT.size.width - 2 * MODAL_PADDING,
            MODAL_RECT.size.height - MODAL_TITLE_HEIGHT - MODAL_PADDING,
        ),
    )
}

// =============================================================================
// Toast
// =============================================================================

/// Short status message above the control bar.
pub fn draw_toast<D>(display: &mut D, message: &str, fill: Rgb565)
where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(TOAST_BORDER_POS, TOAST_BORDER_SIZE)
        .into_styled(WHITE_FILL)
        .draw(display)
        .ok();

    Rectangle::new(TOAST_BG_POS, TOAST_BG_SIZE)
        .into_styled(PrimitiveStyle::with_fill(fill))
        .draw(display)
        .ok();

    Text::with_text_style(message, TOAST_TEXT_POS, HEADING_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();
}
