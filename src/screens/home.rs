//! Home screen: availability toggle, coverage map and daily stats.
//!
//! ```text
//! ┌──────────────────────────┐
//! │ SmartEVP        [Online] │
//! │ Rajesh Kumar             │
//! ├──────────────────────────┤
//! │ [O: go offline]          │
//! │        ( coverage )      │  5 km circle around the ambulance
//! │           [+]            │
//! │ ┌──────────────────────┐ │
//! │ │ New Emergency Request│ │  Pulsing while an alert is pending
//! │ └──────────────────────┘ │
//! ├──────────────────────────┤
//! │ Trips today | Avg | Stat │
//! └──────────────────────────┘
//! ```

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Text;
use heapless::String;
use smartevp_common::animations::{URGENT_PULSE_MS, blend_rgb565, pulse};
use smartevp_common::colors::{GRAY_400, GREEN_50, GREEN_600, RED_600, SIGNAL_RED, SLATE_200, SLATE_600, WHITE};
use smartevp_common::config::{CONTENT_WIDTH, HOME_MAP_HEIGHT, MAP_PADDING, MAP_TOP, MARGIN, SCREEN_HEIGHT, SCREEN_WIDTH};
use smartevp_common::dispatch::{AMBULANCE_POSITION, AVG_RESPONSE_MIN, COVERAGE_RADIUS_M, DRIVER_NAME, EMERGENCY_DISTANCE, TODAYS_TRIPS};
use smartevp_common::map::MapProjection;
use smartevp_common::styles::{BANNER_STYLE_WHITE, LABEL_STYLE_WHITE, LEFT_ALIGNED};
use smartevp_common::widgets::{
    HeaderRight,
    draw_ambulance_marker,
    draw_badge,
    draw_card,
    draw_coverage,
    draw_header,
    draw_label_value,
    draw_map_background,
};
use smartevp_common::FlowController;

const MAP_RECT: Rectangle = Rectangle::new(Point::new(0, MAP_TOP), Size::new(SCREEN_WIDTH, HOME_MAP_HEIGHT));

const HINT_POS: Point = Point::new(MARGIN as i32, MAP_TOP + 6);

const ALERT_HEIGHT: u32 = 40;
const ALERT_RECT: Rectangle = Rectangle::new(
    Point::new(MARGIN as i32, MAP_TOP + HOME_MAP_HEIGHT as i32 - ALERT_HEIGHT as i32 - 6),
    Size::new(CONTENT_WIDTH, ALERT_HEIGHT),
);

const ALERT_PAD: i32 = 7;

const STATS_TOP: i32 = MAP_TOP + HOME_MAP_HEIGHT as i32 + 6;
const STATS_RECT: Rectangle = Rectangle::new(
    Point::new(MARGIN as i32, STATS_TOP),
    Size::new(CONTENT_WIDTH, SCREEN_HEIGHT - STATS_TOP as u32 - MARGIN),
);
const STATS_COLUMN: i32 = CONTENT_WIDTH as i32 / 3;

const _: () = assert!(STATS_RECT.size.height >= 34);

/// Draw the home screen.
pub fn draw_home<D>(display: &mut D, flow: &FlowController, now_ms: u64)
where
    D: DrawTarget<Color = Rgb565>,
{
    let online = flow.is_online();
    let (status, badge_fill, badge_fg) = if online {
        ("Online", GREEN_50, GREEN_600)
    } else {
        ("Offline", SLATE_200, SLATE_600)
    };
    draw_header(display, "SmartEVP", Some(DRIVER_NAME), HeaderRight::Badge(status, badge_fill, badge_fg));

    // Coverage map
    draw_map_background(display, MAP_RECT);
    let projection = MapProjection::fit_with_radius(&[AMBULANCE_POSITION], COVERAGE_RADIUS_M, MAP_RECT, MAP_PADDING);
    let marker_color = if online { RED_600 } else { GRAY_400 };
    let ambulance = projection.project(AMBULANCE_POSITION);
    draw_coverage(display, MAP_RECT, ambulance, projection.meters_to_px(COVERAGE_RADIUS_M), marker_color);
    draw_ambulance_marker(display, MAP_RECT, ambulance, marker_color);

    let hint = if online { "O: go offline" } else { "O: go online" };
    draw_badge(display, HINT_POS, hint, WHITE, SLATE_600);

    if flow.alert_pending() {
        draw_alert_banner(display, now_ms);
    }

    // Stats card
    draw_card(display, STATS_RECT, WHITE, SLATE_200);
    let mut trips: String<8> = String::new();
    let _ = write!(trips, "{TODAYS_TRIPS}");
    let mut response: String<12> = String::new();
    let _ = write!(response, "{AVG_RESPONSE_MIN} min");
    let origin = STATS_RECT.top_left + Point::new(6, 4);
    draw_label_value(display, origin, "Trips today", &trips);
    draw_label_value(display, origin + Point::new(STATS_COLUMN, 0), "Avg response", &response);
    draw_label_value(display, origin + Point::new(2 * STATS_COLUMN, 0), "Status", status);
}

fn draw_alert_banner<D>(display: &mut D, now_ms: u64)
where
    D: DrawTarget<Color = Rgb565>,
{
    let fill = blend_rgb565(RED_600, SIGNAL_RED, pulse(now_ms, URGENT_PULSE_MS));
    draw_card(display, ALERT_RECT, fill, RED_600);

    let mut title: String<40> = String::new();
    let _ = write!(title, "New Emergency Request - {EMERGENCY_DISTANCE}");
    let left = ALERT_RECT.top_left.x + ALERT_PAD;
    Text::with_text_style(&title, Point::new(left, ALERT_RECT.top_left.y + 16), BANNER_STYLE_WHITE, LEFT_ALIGNED)
        .draw(display)
        .ok();
    Text::with_text_style(
        "Press Enter to view details",
        Point::new(left, ALERT_RECT.top_left.y + 31),
        LABEL_STYLE_WHITE,
        LEFT_ALIGNED,
    )
    .draw(display)
    .ok();
}

#[cfg(test)]
mod tests {
    use smartevp_common::styles::LABEL_CHAR_WIDTH;
    use smartevp_common::thresholds::DISPATCH_DELAY_MS;
    use smartevp_common::widgets::mock::CountingDisplay;

    use super::*;

    #[test]
    fn test_offline_home_is_gray() {
        let flow = FlowController::new();
        let mut display = CountingDisplay::new();
        draw_home(&mut display, &flow, 0);
        assert_eq!(display.out_of_bounds(), 0);
        assert!(display.count_color(GRAY_400) > 0, "Offline coverage is gray");
        assert_eq!(display.count_color(RED_600), 0);
    }

    #[test]
    fn test_online_home_is_red() {
        let mut flow = FlowController::new();
        flow.set_online(true, 0).ok();
        let mut display = CountingDisplay::new();
        draw_home(&mut display, &flow, 0);
        assert!(display.count_color(RED_600) > 0);
        assert!(display.count_color(GREEN_50) > 0, "Online badge");
    }

    #[test]
    fn test_alert_banner_when_pending() {
        let mut flow = FlowController::new();
        flow.set_online(true, 0).ok();
        let mut quiet = CountingDisplay::new();
        draw_home(&mut quiet, &flow, 0);

        flow.tick(DISPATCH_DELAY_MS);
        assert!(flow.alert_pending());
        let mut alert = CountingDisplay::new();
        draw_home(&mut alert, &flow, 0);
        assert!(alert.count_color(RED_600) > quiet.count_color(RED_600), "Banner adds red");
        assert_eq!(alert.out_of_bounds(), 0);
    }

    #[test]
    fn test_banner_title_fits() {
        let title_chars = "New Emergency Request - ".len() + EMERGENCY_DISTANCE.len();
        assert_eq!(title_chars, 35);
        assert_eq!(BANNER_STYLE_WHITE.font.character_size.width, LABEL_CHAR_WIDTH);
        let title_width = title_chars as u32 * LABEL_CHAR_WIDTH;
        assert!(title_width + 2 * ALERT_PAD as u32 <= CONTENT_WIDTH, "Banner title must fit the card");
    }
}
