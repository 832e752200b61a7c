//! Screen header bar.
//!
//! Every screen starts with the same white bar: a bold title on the left, an
//! optional muted subtitle underneath or beside it, and an optional badge on
//! the right (online status, step counter, selection count).

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;

use crate::colors::{SLATE_200, WHITE};
use crate::config::{HEADER_HEIGHT, MARGIN, SCREEN_WIDTH};
use crate::styles::{HEADING_STYLE, LEFT_ALIGNED, MUTED_STYLE, RIGHT_ALIGNED};
use crate::widgets::primitives::{BADGE_HEIGHT, draw_badge_right};

// =============================================================================
// Header Layout Constants
// =============================================================================

const HEADER_RECT: Rectangle = Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, HEADER_HEIGHT));

/// Title baseline when there is no subtitle.
const TITLE_POS: Point = Point::new(MARGIN as i32, 18);

/// Title baseline when a subtitle sits underneath.
const TITLE_POS_STACKED: Point = Point::new(MARGIN as i32, 12);

const SUBTITLE_POS: Point = Point::new(MARGIN as i32, 23);

const RIGHT_EDGE: i32 = (SCREEN_WIDTH - MARGIN) as i32;

const BADGE_Y: i32 = (HEADER_HEIGHT - BADGE_HEIGHT) as i32 / 2;

const BORDER_START: Point = Point::new(0, HEADER_HEIGHT as i32 - 1);
const BORDER_END: Point = Point::new(SCREEN_WIDTH as i32 - 1, HEADER_HEIGHT as i32 - 1);

const HEADER_FILL_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(WHITE);
const BORDER_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(SLATE_200, 1);

/// Right-hand element of the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderRight<'a> {
    None,
    /// Plain muted text ("1 of 2").
    Text(&'a str),
    /// Colored pill (fill, text color).
    Badge(&'a str, Rgb565, Rgb565),
}

/// Draw the header bar.
pub fn draw_header<D>(display: &mut D, title: &str, subtitle: Option<&str>, right: HeaderRight<'_>)
where
    D: DrawTarget<Color = Rgb565>,
{
    HEADER_RECT.into_styled(HEADER_FILL_STYLE).draw(display).ok();
    Line::new(BORDER_START, BORDER_END)
        .into_styled(BORDER_STYLE)
        .draw(display)
        .ok();

    let title_pos = if subtitle.is_some() { TITLE_POS_STACKED } else { TITLE_POS };
    Text::with_text_style(title, title_pos, HEADING_STYLE, LEFT_ALIGNED)
        .draw(display)
        .ok();
    if let Some(sub) = subtitle {
        Text::with_text_style(sub, SUBTITLE_POS, MUTED_STYLE, LEFT_ALIGNED)
            .draw(display)
            .ok();
    }

    match right {
        HeaderRight::None => {}
        HeaderRight::Text(text) => {
            Text::with_text_style(text, Point::new(RIGHT_EDGE, TITLE_POS.y), MUTED_STYLE, RIGHT_ALIGNED)
                .draw(display)
                .ok();
        }
        HeaderRight::Badge(text, fill, fg) => draw_badge_right(display, RIGHT_EDGE, BADGE_Y, text, fill, fg),
    }
}
