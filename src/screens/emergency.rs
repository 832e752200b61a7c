//! Emergency alert: dispatch details, accept countdown, Accept / Decline.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Text;
use smartevp_common::animations::{URGENT_PULSE_MS, blend_rgb565, pulse};
use smartevp_common::colors::{GREEN_600, RED_100, RED_600, SLATE_200, SLATE_900, WHITE};
use smartevp_common::config::{BOTTOM_BUTTON_Y, BUTTON_HEIGHT, CENTER_X, CONTENT_WIDTH, LINE_HEIGHT, MAP_PADDING, MARGIN};
use smartevp_common::dispatch::{
    AMBULANCE_POSITION,
    EMERGENCY_ADDRESS,
    EMERGENCY_CONDITION,
    EMERGENCY_CONTACT,
    EMERGENCY_DISTANCE,
    EMERGENCY_ETA,
    EMERGENCY_LOCATION,
};
use smartevp_common::map::MapProjection;
use smartevp_common::styles::{BODY_STYLE, CENTERED, MUTED_STYLE, VALUE_FONT};
use smartevp_common::widgets::{
    ButtonKind,
    HeaderRight,
    draw_ambulance_marker,
    draw_button,
    draw_card,
    draw_emergency_marker,
    draw_header,
    draw_label_value,
    draw_map_background,
    draw_route,
    draw_wrapped_text,
};
use smartevp_common::FlowController;

use super::ButtonFocus;

const COUNTDOWN_POS: Point = Point::new(CENTER_X, 58);

const CARD_RECT: Rectangle = Rectangle::new(Point::new(MARGIN as i32, 68), Size::new(CONTENT_WIDTH, 124));
const CARD_PAD: i32 = 6;
const CARD_TEXT_WIDTH: u32 = CONTENT_WIDTH - 2 * CARD_PAD as u32;
const HALF_COLUMN: i32 = CONTENT_WIDTH as i32 / 2;

const MAP_RECT: Rectangle = Rectangle::new(Point::new(MARGIN as i32, 198), Size::new(CONTENT_WIDTH, 80));

const BUTTON_WIDTH: u32 = (CONTENT_WIDTH - MARGIN) / 2;
const ACCEPT_RECT: Rectangle = Rectangle::new(Point::new(MARGIN as i32, BOTTOM_BUTTON_Y), Size::new(BUTTON_WIDTH, BUTTON_HEIGHT));
const DECLINE_RECT: Rectangle = Rectangle::new(
    Point::new((MARGIN * 2 + BUTTON_WIDTH) as i32, BOTTOM_BUTTON_Y),
    Size::new(BUTTON_WIDTH, BUTTON_HEIGHT),
);

const _: () = assert!(MAP_RECT.top_left.y + MAP_RECT.size.height as i32 <= BOTTOM_BUTTON_Y - 4);

/// Draw the emergency alert.
pub fn draw_emergency<D>(display: &mut D, flow: &FlowController, focus: ButtonFocus, now_ms: u64)
where
    D: DrawTarget<Color = Rgb565>,
{
    let countdown = flow.countdown();
    let label = countdown.map(|c| c.label()).unwrap_or_default();
    let urgent = countdown.is_some_and(|c| c.is_urgent());

    let badge_fill = if urgent {
        blend_rgb565(RED_600, RED_100, pulse(now_ms, URGENT_PULSE_MS))
    } else {
        RED_600
    };
    draw_header(display, "Emergency Alert", Some("Accept before time runs out"), HeaderRight::Badge(&label, badge_fill, WHITE));

    let countdown_color = if urgent { RED_600 } else { SLATE_900 };
    Text::with_text_style(&label, COUNTDOWN_POS, MonoTextStyle::new(VALUE_FONT, countdown_color), CENTERED)
        .draw(display)
        .ok();

    // Dispatch details
    draw_card(display, CARD_RECT, WHITE, SLATE_200);
    let left = CARD_RECT.top_left.x + CARD_PAD;
    let mut y = CARD_RECT.top_left.y + CARD_PAD;
    Text::new("Location", Point::new(left, y + 8), MUTED_STYLE).draw(display).ok();
    y = draw_wrapped_text(display, EMERGENCY_ADDRESS, Point::new(left, y + LINE_HEIGHT), CARD_TEXT_WIDTH, 2, BODY_STYLE);
    y += 2;
    draw_label_value(display, Point::new(left, y), "Condition", EMERGENCY_CONDITION);
    y += 2 * LINE_HEIGHT + 2;
    draw_label_value(display, Point::new(left, y), "Contact", EMERGENCY_CONTACT);
    y += 2 * LINE_HEIGHT + 2;
    draw_label_value(display, Point::new(left, y), "Distance", EMERGENCY_DISTANCE);
    draw_label_value(display, Point::new(left + HALF_COLUMN, y), "ETA", EMERGENCY_ETA);

    // Route preview
    draw_map_background(display, MAP_RECT);
    let projection = MapProjection::fit(&[AMBULANCE_POSITION, EMERGENCY_LOCATION], MAP_RECT, MAP_PADDING);
    let ambulance = projection.project(AMBULANCE_POSITION);
    let scene = projection.project(EMERGENCY_LOCATION);
    draw_route(display, MAP_RECT, &[ambulance, scene]);
    draw_ambulance_marker(display, MAP_RECT, ambulance, RED_600);
    draw_emergency_marker(display, MAP_RECT, scene);

    draw_button(display, ACCEPT_RECT, "Accept", ButtonKind::Filled(GREEN_600), focus == ButtonFocus::Primary);
    draw_button(display, DECLINE_RECT, "Decline", ButtonKind::Outline, focus == ButtonFocus::Secondary);
}

#[cfg(test)]
mod tests {
    use smartevp_common::thresholds::DISPATCH_DELAY_MS;
    use smartevp_common::widgets::mock::CountingDisplay;

    use super::*;

    fn on_emergency(now_ms: u64) -> FlowController {
        let mut flow = FlowController::new();
        flow.set_online(true, 0).ok();
        flow.tick(DISPATCH_DELAY_MS);
        flow.open_alert(now_ms).ok();
        flow
    }

    #[test]
    fn test_emergency_screen_draws() {
        let flow = on_emergency(5_000);
        let mut display = CountingDisplay::new();
        draw_emergency(&mut display, &flow, ButtonFocus::Primary, 5_000);
        assert_eq!(display.out_of_bounds(), 0);
        assert!(display.count_color(GREEN_600) > 0, "Accept button");
        assert!(display.count_color(RED_600) > 0, "Countdown badge");
    }

    #[test]
    fn test_urgent_countdown_is_red() {
        let mut flow = on_emergency(0);
        flow.tick(25_000);
        assert!(flow.countdown().is_some_and(|c| c.is_urgent()));
        let mut display = CountingDisplay::new();
        draw_emergency(&mut display, &flow, ButtonFocus::Secondary, 25_000);
        assert_eq!(display.out_of_bounds(), 0);
        assert!(display.count_color(RED_600) > 0);
    }

    #[test]
    fn test_card_content_fits() {
        // Location label + 2 address lines + 3 label/value pairs
        let content = CARD_PAD + LINE_HEIGHT + 2 * LINE_HEIGHT + 2 + 3 * (2 * LINE_HEIGHT + 2);
        assert!(content <= CARD_RECT.size.height as i32);
    }
}
