//! Low-level drawing primitives shared across screens.
//!
//! Cards, buttons, badges and form controls. Geometry is passed in as a
//! `Rectangle` so screens keep their layout in `const` values; styles that do
//! not depend on runtime color are `const` as well.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle,
    CornerRadii,
    Line,
    PrimitiveStyle,
    PrimitiveStyleBuilder,
    Rectangle,
    RoundedRectangle,
};
use embedded_graphics::text::Text;

use crate::colors::{BLUE_600, SLATE_200, SLATE_300, SLATE_900, WHITE};
use crate::config::{LINE_HEIGHT, MARGIN, SCREEN_WIDTH};
use crate::styles::{BODY_STYLE, CENTERED, LABEL_CHAR_WIDTH, LABEL_FONT, LABEL_STYLE_WHITE, LEFT_ALIGNED, MUTED_STYLE};
use crate::text::wrap_lines;

// =============================================================================
// Shared Geometry and Styles
// =============================================================================

/// Corner radius of cards and buttons.
pub const CORNER_RADIUS: u32 = 6;

/// Horizontal padding inside badges.
const BADGE_PADDING: u32 = 4;

/// Badge height.
pub const BADGE_HEIGHT: u32 = 14;

/// Checkbox edge length.
pub const CHECKBOX_SIZE: u32 = 12;

/// Focus ring drawn around the element under the keyboard cursor.
const FOCUS_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(BLUE_600, 2);

/// Thin divider between card sections.
const DIVIDER_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(SLATE_200, 1);

/// Text baseline offset inside a box for the 6x10 font, centered vertically.
const fn text_baseline(area: &Rectangle) -> i32 { area.top_left.y + (area.size.height as i32) / 2 + 3 }

fn rounded(area: Rectangle) -> RoundedRectangle { RoundedRectangle::new(area, CornerRadii::new(Size::new_equal(CORNER_RADIUS))) }

// =============================================================================
// Cards
// =============================================================================

/// Rounded card with a 1px border.
pub fn draw_card<D>(display: &mut D, area: Rectangle, fill: Rgb565, border: Rgb565)
where
    D: DrawTarget<Color = Rgb565>,
{
    let style = PrimitiveStyleBuilder::new()
        .fill_color(fill)
        .stroke_color(border)
        .stroke_width(1)
        .build();
    rounded(area).into_styled(style).draw(display).ok();
}

/// Two-pixel focus ring just outside `area`.
pub fn draw_focus_ring<D>(display: &mut D, area: Rectangle)
where
    D: DrawTarget<Color = Rgb565>,
{
    rounded(area.offset(2)).into_styled(FOCUS_STYLE).draw(display).ok();
}

/// Horizontal divider across the content width at `y`.
pub fn draw_divider<D>(display: &mut D, y: i32)
where
    D: DrawTarget<Color = Rgb565>,
{
    Line::new(Point::new(MARGIN as i32, y), Point::new((SCREEN_WIDTH - MARGIN) as i32 - 1, y))
        .into_styled(DIVIDER_STYLE)
        .draw(display)
        .ok();
}

// =============================================================================
// Buttons
// =============================================================================

/// Button appearance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonKind {
    /// Solid fill with white label.
    Filled(Rgb565),
    /// White with a gray border and dark label.
    Outline,
    /// Gray fill, white label. Used for controls that cannot be activated yet.
    Disabled,
}

/// Rounded button with a centered single-line label.
pub fn draw_button<D>(display: &mut D, area: Rectangle, label: &str, kind: ButtonKind, focused: bool)
where
    D: DrawTarget<Color = Rgb565>,
{
    let (fill, border, text_style) = match kind {
        ButtonKind::Filled(color) => (color, color, LABEL_STYLE_WHITE),
        ButtonKind::Outline => (WHITE, SLATE_300, BODY_STYLE),
        ButtonKind::Disabled => (SLATE_300, SLATE_300, LABEL_STYLE_WHITE),
    };
    draw_card(display, area, fill, border);
    if focused && kind != ButtonKind::Disabled {
        draw_focus_ring(display, area);
    }
    let pos = Point::new(area.center().x, text_baseline(&area));
    Text::with_text_style(label, pos, text_style, CENTERED)
        .draw(display)
        .ok();
}

// =============================================================================
// Badges
// =============================================================================

/// Width of a badge holding `text`.
#[inline]
pub const fn badge_width(text: &str) -> u32 { text.len() as u32 * LABEL_CHAR_WIDTH + 2 * BADGE_PADDING }

/// Small pill with text. Returns the badge width.
pub fn draw_badge<D>(display: &mut D, top_left: Point, text: &str, fill: Rgb565, text_color: Rgb565) -> u32
where
    D: DrawTarget<Color = Rgb565>,
{
    let width = badge_width(text);
    let area = Rectangle::new(top_left, Size::new(width, BADGE_HEIGHT));
    RoundedRectangle::with_equal_corners(area, Size::new_equal(BADGE_HEIGHT / 2))
        .into_styled(PrimitiveStyle::with_fill(fill))
        .draw(display)
        .ok();
    let style = MonoTextStyle::new(LABEL_FONT, text_color);
    Text::with_text_style(text, Point::new(area.center().x, text_baseline(&area)), style, CENTERED)
        .draw(display)
        .ok();
    width
}

/// Badge whose right edge sits at `right_x`.
pub fn draw_badge_right<D>(display: &mut D, right_x: i32, y: i32, text: &str, fill: Rgb565, text_color: Rgb565)
where
    D: DrawTarget<Color = Rgb565>,
{
    let x = right_x - badge_width(text) as i32;
    draw_badge(display, Point::new(x, y), text, fill, text_color);
}

// =============================================================================
// Form Controls
// =============================================================================

/// Square checkbox; checked boxes are filled with `color` and show a tick.
pub fn draw_checkbox<D>(display: &mut D, top_left: Point, checked: bool, color: Rgb565)
where
    D: DrawTarget<Color = Rgb565>,
{
    let area = Rectangle::new(top_left, Size::new_equal(CHECKBOX_SIZE));
    if checked {
        area.into_styled(PrimitiveStyle::with_fill(color)).draw(display).ok();
        draw_tick(display, area.center(), WHITE);
    } else {
        area.into_styled(PrimitiveStyle::with_stroke(SLATE_300, 2))
            .draw(display)
            .ok();
    }
}

/// Round selection indicator; selected shows a filled dot.
pub fn draw_radio<D>(display: &mut D, center: Point, selected: bool, color: Rgb565)
where
    D: DrawTarget<Color = Rgb565>,
{
    let ring_color = if selected { color } else { SLATE_300 };
    Circle::with_center(center, 14)
        .into_styled(PrimitiveStyle::with_stroke(ring_color, 2))
        .draw(display)
        .ok();
    if selected {
        Circle::with_center(center, 6)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(display)
            .ok();
    }
}

/// Small tick mark centered on `center`.
pub fn draw_tick<D>(display: &mut D, center: Point, color: Rgb565)
where
    D: DrawTarget<Color = Rgb565>,
{
    let style = PrimitiveStyle::with_stroke(color, 2);
    Line::new(center + Point::new(-4, 0), center + Point::new(-1, 3))
        .into_styled(style)
        .draw(display)
        .ok();
    Line::new(center + Point::new(-1, 3), center + Point::new(4, -3))
        .into_styled(style)
        .draw(display)
        .ok();
}

/// Horizontal progress bar; `fraction` is clamped to `0.0..=1.0`.
pub fn draw_progress_bar<D>(display: &mut D, area: Rectangle, fraction: f32, fill: Rgb565, track: Rgb565)
where
    D: DrawTarget<Color = Rgb565>,
{
    area.into_styled(PrimitiveStyle::with_fill(track)).draw(display).ok();
    let filled = (area.size.width as f32 * fraction.clamp(0.0, 1.0)) as u32;
    if filled > 0 {
        Rectangle::new(area.top_left, Size::new(filled, area.size.height))
            .into_styled(PrimitiveStyle::with_fill(fill))
            .draw(display)
            .ok();
    }
}

// =============================================================================
// Text Blocks
// =============================================================================

/// Muted caption with a dark value underneath.
pub fn draw_label_value<D>(display: &mut D, top_left: Point, label: &str, value: &str)
where
    D: DrawTarget<Color = Rgb565>,
{
    Text::with_text_style(label, top_left + Point::new(0, 8), MUTED_STYLE, LEFT_ALIGNED)
        .draw(display)
        .ok();
    let value_style = MonoTextStyle::new(LABEL_FONT, SLATE_900);
    Text::with_text_style(value, top_left + Point::new(0, 8 + LINE_HEIGHT), value_style, LEFT_ALIGNED)
        .draw(display)
        .ok();
}

/// Word-wrapped text inside `width` pixels, at most `max_lines` lines.
///
/// `top_left` is the top of the first line. Returns the y coordinate just
/// below the last drawn line.
pub fn draw_wrapped_text<D>(
    display: &mut D,
    text: &str,
    top_left: Point,
    width: u32,
    max_lines: usize,
    style: MonoTextStyle<'_, Rgb565>,
) -> i32
where
    D: DrawTarget<Color = Rgb565>,
{
    let chars = (width / LABEL_CHAR_WIDTH) as usize;
    let mut y = top_left.y;
    for line in wrap_lines(text, chars).take(max_lines) {
        Text::with_text_style(line, Point::new(top_left.x, y + 8), style, LEFT_ALIGNED)
            .draw(display)
            .ok();
        y += LINE_HEIGHT;
    }
    y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{GREEN_600, RED_600, SLATE_100};
    use crate::widgets::mock::CountingDisplay;

    #[test]
    fn test_badge_width() {
        assert_eq!(badge_width(""), 8);
        assert_eq!(badge_width("HIGH"), 4 * 6 + 8);
    }

    #[test]
    fn test_draw_button_kinds() {
        for kind in [ButtonKind::Filled(GREEN_600), ButtonKind::Outline, ButtonKind::Disabled] {
            let mut display = CountingDisplay::new();
            draw_button(&mut display, Rectangle::new(Point::new(8, 280), Size::new(224, 28)), "Accept", kind, true);
            assert!(display.pixels_drawn() > 0, "{kind:?} drew nothing");
            assert_eq!(display.out_of_bounds(), 0);
        }
    }

    #[test]
    fn test_divider_spans_content_width() {
        let mut display = CountingDisplay::new();
        draw_divider(&mut display, 100);
        assert_eq!(display.count_color(SLATE_200), (SCREEN_WIDTH - 2 * MARGIN) as usize);
        assert_eq!(display.out_of_bounds(), 0);
    }

    #[test]
    fn test_disabled_button_has_no_focus_ring() {
        let area = Rectangle::new(Point::new(8, 280), Size::new(224, 28));
        let mut focused = CountingDisplay::new();
        draw_button(&mut focused, area, "Next", ButtonKind::Disabled, true);
        let mut plain = CountingDisplay::new();
        draw_button(&mut plain, area, "Next", ButtonKind::Disabled, false);
        assert_eq!(focused.pixels_drawn(), plain.pixels_drawn());
    }

    #[test]
    fn test_checkbox_states_differ() {
        let mut checked = CountingDisplay::new();
        draw_checkbox(&mut checked, Point::new(10, 10), true, RED_600);
        let mut unchecked = CountingDisplay::new();
        draw_checkbox(&mut unchecked, Point::new(10, 10), false, RED_600);
        assert!(checked.pixels_drawn() > unchecked.pixels_drawn());
        assert!(checked.count_color(RED_600) > 0);
    }

    #[test]
    fn test_progress_bar_fill() {
        let area = Rectangle::new(Point::new(0, 0), Size::new(100, 4));
        let mut display = CountingDisplay::new();
        draw_progress_bar(&mut display, area, 0.25, RED_600, SLATE_100);
        assert_eq!(display.count_color(RED_600), 25 * 4);

        let mut display = CountingDisplay::new();
        draw_progress_bar(&mut display, area, 3.0, RED_600, SLATE_100);
        assert_eq!(display.count_color(RED_600), 100 * 4, "Fraction is clamped");
    }

    #[test]
    fn test_wrapped_text_respects_max_lines() {
        let mut display = CountingDisplay::new();
        let bottom = draw_wrapped_text(
            &mut display,
            "one two three four five six seven eight",
            Point::new(8, 40),
            60,
            2,
            BODY_STYLE,
        );
        assert_eq!(bottom, 40 + 2 * LINE_HEIGHT);
        assert!(display.pixels_drawn() > 0);
    }
}
