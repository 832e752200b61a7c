//! Live navigation: trip banner, route map with signal states, preemption
//! strip and the record / complete controls.
//!
//! ```text
//! ┌──────────────────────────┐
//! │ Navigating to     [HIGH] │
//! │ Apollo Hospital          │
//! ├──────────────────────────┤
//! │ ETA    Distance   Speed  │
//! ├──────────────────────────┤
//! │  [+]--o--o--o--o--o--[H] │  Signals colored by distance
//! ├──────────────────────────┤
//! │ Preemption Active   3/5  │
//! │ Green Lights Ahead  200m │
//! │ 2 voice notes, 1 vitals  │
//! │ [V Voice][T Vitals][C ..]│  Complete is focused
//! └──────────────────────────┘
//! ```

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Text;
use heapless::{String, Vec};
use smartevp_common::colors::{BLUE_600, GREEN_50, GREEN_600, RED_600, WHITE};
use smartevp_common::config::{
    BOTTOM_BUTTON_Y,
    BUTTON_HEIGHT,
    CONTENT_WIDTH,
    HEADER_HEIGHT,
    MAP_PADDING,
    MARGIN,
    NAV_MAP_HEIGHT,
    NAV_MAP_TOP,
    SCREEN_WIDTH,
};
use smartevp_common::dispatch::AMBULANCE_POSITION;
use smartevp_common::map::MapProjection;
use smartevp_common::navigation::{
    BANNER_DISTANCE,
    BANNER_ETA,
    BANNER_SPEED,
    GREEN_LIGHTS_AHEAD,
    NEXT_SIGNAL,
    PREEMPTION_ACTIVE,
    SignalFeed,
};
use smartevp_common::styles::{BODY_STYLE, HEADING_FONT, LEFT_ALIGNED, MUTED_STYLE, RIGHT_ALIGNED};
use smartevp_common::thresholds::SIGNAL_COUNT;
use smartevp_common::trip::Trip;
use smartevp_common::widgets::{
    ButtonKind,
    HeaderRight,
    draw_ambulance_marker,
    draw_button,
    draw_card,
    draw_header,
    draw_hospital_marker,
    draw_label_value,
    draw_map_background,
    draw_route,
    draw_signal,
};

const BANNER_TOP: i32 = HEADER_HEIGHT as i32 + 2;
const BANNER_COLUMN: i32 = CONTENT_WIDTH as i32 / 3;

const MAP_RECT: Rectangle = Rectangle::new(Point::new(0, NAV_MAP_TOP), Size::new(SCREEN_WIDTH, NAV_MAP_HEIGHT));

const STRIP_TOP: i32 = NAV_MAP_TOP + NAV_MAP_HEIGHT as i32 + 4;
const STRIP_RECT: Rectangle = Rectangle::new(Point::new(MARGIN as i32, STRIP_TOP), Size::new(CONTENT_WIDTH, 34));
const STRIP_LEFT: i32 = MARGIN as i32 + 6;
const STRIP_RIGHT: i32 = (MARGIN + CONTENT_WIDTH) as i32 - 6;

const RECORDS_POS: Point = Point::new(MARGIN as i32, STRIP_TOP + 34 + 14);

const BUTTON_GAP: u32 = 8;
const BUTTON_WIDTH: u32 = (CONTENT_WIDTH - 2 * BUTTON_GAP) / 3;

const _: () = assert!(RECORDS_POS.y < BOTTOM_BUTTON_Y);

const fn button_rect(index: u32) -> Rectangle {
    Rectangle::new(
        Point::new((MARGIN + index * (BUTTON_WIDTH + BUTTON_GAP)) as i32, BOTTOM_BUTTON_Y),
        Size::new(BUTTON_WIDTH, BUTTON_HEIGHT),
    )
}

const STRIP_TITLE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(HEADING_FONT, GREEN_600);

/// Draw the navigation screen.
pub fn draw_navigation<D>(display: &mut D, trip: &Trip, feed: Option<&SignalFeed>)
where
    D: DrawTarget<Color = Rgb565>,
{
    let destination = trip.destination.as_ref().map_or("Hospital", |d| d.name.as_str());
    let right = match trip.priority {
        Some(p) => HeaderRight::Badge(p.badge(), p.color(), WHITE),
        None => HeaderRight::None,
    };
    draw_header(display, "Navigating to", Some(destination), right);

    // Trip banner
    let banner = Point::new(MARGIN as i32, BANNER_TOP);
    draw_label_value(display, banner, "ETA", BANNER_ETA);
    draw_label_value(display, banner + Point::new(BANNER_COLUMN, 0), "Distance", BANNER_DISTANCE);
    draw_label_value(display, banner + Point::new(2 * BANNER_COLUMN, 0), "Speed", BANNER_SPEED);

    draw_route_map(display, trip, feed);

    // Preemption strip
    draw_card(display, STRIP_RECT, GREEN_50, GREEN_600);
    Text::with_text_style(PREEMPTION_ACTIVE, Point::new(STRIP_LEFT, STRIP_TOP + 14), STRIP_TITLE_STYLE, LEFT_ALIGNED)
        .draw(display)
        .ok();
    let mut greens: String<16> = String::new();
    let _ = write!(greens, "{}/{SIGNAL_COUNT} green", feed.map_or(0, SignalFeed::green_count));
    Text::with_text_style(&greens, Point::new(STRIP_RIGHT, STRIP_TOP + 13), MUTED_STYLE, RIGHT_ALIGNED)
        .draw(display)
        .ok();
    Text::with_text_style(GREEN_LIGHTS_AHEAD, Point::new(STRIP_LEFT, STRIP_TOP + 28), BODY_STYLE, LEFT_ALIGNED)
        .draw(display)
        .ok();
    Text::with_text_style(NEXT_SIGNAL, Point::new(STRIP_RIGHT, STRIP_TOP + 28), BODY_STYLE, RIGHT_ALIGNED)
        .draw(display)
        .ok();

    let mut records: String<48> = String::new();
    let _ = write!(
        records,
        "{} voice note(s), {} vitals record(s)",
        trip.voice_notes().len(),
        trip.vitals().len()
    );
    Text::with_text_style(&records, RECORDS_POS, MUTED_STYLE, LEFT_ALIGNED)
        .draw(display)
        .ok();

    draw_button(display, button_rect(0), "V Voice", ButtonKind::Filled(RED_600), false);
    draw_button(display, button_rect(1), "T Vitals", ButtonKind::Filled(BLUE_600), false);
    draw_button(display, button_rect(2), "C Complete", ButtonKind::Filled(GREEN_600), true);
}

fn draw_route_map<D>(display: &mut D, trip: &Trip, feed: Option<&SignalFeed>)
where
    D: DrawTarget<Color = Rgb565>,
{
    draw_map_background(display, MAP_RECT);
    let Some(destination) = trip.destination.as_ref() else {
        return;
    };

    let projection = MapProjection::fit(&[AMBULANCE_POSITION, destination.location], MAP_RECT, MAP_PADDING);
    let start = projection.project(AMBULANCE_POSITION);
    let end = projection.project(destination.location);

    let mut route: Vec<Point, { SIGNAL_COUNT + 2 }> = Vec::new();
    route.push(start).ok();
    if let Some(feed) = feed {
        for signal in feed.signals() {
            route.push(projection.project(signal.location)).ok();
        }
    }
    route.push(end).ok();
    draw_route(display, MAP_RECT, &route);

    if let Some(feed) = feed {
        for signal in feed.signals() {
            draw_signal(display, MAP_RECT, projection.project(signal.location), signal.status);
        }
    }
    draw_hospital_marker(display, MAP_RECT, end);
    draw_ambulance_marker(display, MAP_RECT, start, RED_600);
}
