//! Criticality triage: pick one of three priorities, then continue.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Text;
use smartevp_common::colors::{BLUE_600, SLATE_100, SLATE_200, WHITE};
use smartevp_common::config::{BOTTOM_BUTTON_Y, BUTTON_HEIGHT, CONTENT_WIDTH, HEADER_HEIGHT, MARGIN};
use smartevp_common::selection::{PRIORITY_NEXT_LABEL, PrioritySelector};
use smartevp_common::styles::{HEADING_STYLE, LEFT_ALIGNED, MUTED_STYLE};
use smartevp_common::trip::Priority;
use smartevp_common::widgets::{
    ButtonKind,
    HeaderRight,
    draw_badge_right,
    draw_button,
    draw_card,
    draw_focus_ring,
    draw_header,
    draw_radio,
};

const CARD_TOP: i32 = HEADER_HEIGHT as i32 + 24;
const CARD_HEIGHT: u32 = 60;
const CARD_GAP: i32 = 10;
const PROMPT_POS: Point = Point::new(MARGIN as i32, HEADER_HEIGHT as i32 + 16);

const NEXT_RECT: Rectangle = Rectangle::new(
    Point::new(MARGIN as i32, BOTTOM_BUTTON_Y),
    Size::new(CONTENT_WIDTH, BUTTON_HEIGHT),
);

const _: () = assert!(CARD_TOP + 3 * (CARD_HEIGHT as i32 + CARD_GAP) <= BOTTOM_BUTTON_Y);

const fn card_rect(index: usize) -> Rectangle {
    Rectangle::new(
        Point::new(MARGIN as i32, CARD_TOP + index as i32 * (CARD_HEIGHT as i32 + CARD_GAP)),
        Size::new(CONTENT_WIDTH, CARD_HEIGHT),
    )
}

/// Draw the triage screen.
pub fn draw_criticality<D>(display: &mut D, selector: &PrioritySelector)
where
    D: DrawTarget<Color = Rgb565>,
{
    draw_header(display, "Select Criticality", None, HeaderRight::Text("1 of 2"));
    Text::with_text_style("How critical is the patient?", PROMPT_POS, MUTED_STYLE, LEFT_ALIGNED)
        .draw(display)
        .ok();

    for (i, priority) in Priority::ALL.into_iter().enumerate() {
        draw_priority_card(
            display,
            card_rect(i),
            priority,
            selector.selected() == Some(priority),
            selector.cursor() == priority,
        );
    }

    let kind = if selector.next_enabled() {
        ButtonKind::Filled(BLUE_600)
    } else {
        ButtonKind::Disabled
    };
    draw_button(display, NEXT_RECT, PRIORITY_NEXT_LABEL, kind, true);
}

fn draw_priority_card<D>(display: &mut D, area: Rectangle, priority: Priority, selected: bool, focused: bool)
where
    D: DrawTarget<Color = Rgb565>,
{
    let (fill, border) = if selected {
        (SLATE_100, priority.color())
    } else {
        (WHITE, SLATE_200)
    };
    draw_card(display, area, fill, border);
    if focused {
        draw_focus_ring(display, area);
    }

    let top = area.top_left;
    draw_radio(display, top + Point::new(16, 20), selected, priority.color());
    Text::with_text_style(priority.label(), top + Point::new(32, 24), HEADING_STYLE, LEFT_ALIGNED)
        .draw(display)
        .ok();
    Text::with_text_style(priority.description(), top + Point::new(32, 42), MUTED_STYLE, LEFT_ALIGNED)
        .draw(display)
        .ok();

    let right = top.x + area.size.width as i32 - 8;
    draw_badge_right(display, right, top.y + 6, priority.badge(), priority.color(), WHITE);
}
