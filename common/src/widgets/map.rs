//! Schematic map drawing.
//!
//! There are no tiles: the map is a flat land color with a fixed street grid,
//! and markers are drawn on top at positions from a
//! [`MapProjection`](crate::map::MapProjection). Drawing is clipped to the
//! map viewport so markers near the edge never spill into the header or the
//! control bar.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, Polyline, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle};
use embedded_graphics::text::Text;

use crate::colors::{BLACK, BLUE_600, MAP_GREEN, RED_600, SLATE_200, WHITE};
use crate::navigation::SignalStatus;
use crate::styles::{CENTERED, HEADING_FONT};

// =============================================================================
// Map Style Constants
// =============================================================================

/// Spacing of the schematic street grid.
const STREET_SPACING: i32 = 36;

/// Width of minor streets.
const STREET_WIDTH: u32 = 3;

const LAND_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(SLATE_200);
const STREET_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(WHITE, STREET_WIDTH);
const PARK_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(MAP_GREEN);
const ROUTE_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(BLUE_600, 4);

/// Marker edge length / diameter.
pub const MARKER_SIZE: u32 = 16;

/// Traffic signal dot diameter.
pub const SIGNAL_SIZE: u32 = 10;

const MARKER_LABEL_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(HEADING_FONT, WHITE);

// =============================================================================
// Background
// =============================================================================

/// Land, parks and a street grid filling `viewport`.
pub fn draw_map_background<D>(display: &mut D, viewport: Rectangle)
where
    D: DrawTarget<Color = Rgb565>,
{
    let mut map = display.clipped(&viewport);
    viewport.into_styled(LAND_STYLE).draw(&mut map).ok();

    let origin = viewport.top_left;
    let w = viewport.size.width as i32;
    let h = viewport.size.height as i32;

    // Two parks in opposite quadrants
    Rectangle::new(origin + Point::new(w / 8, h / 6), Size::new((w / 5) as u32, (h / 6) as u32))
        .into_styled(PARK_STYLE)
        .draw(&mut map)
        .ok();
    Rectangle::new(origin + Point::new(w * 5 / 8, h * 5 / 8), Size::new((w / 4) as u32, (h / 7) as u32))
        .into_styled(PARK_STYLE)
        .draw(&mut map)
        .ok();

    let mut x = STREET_SPACING / 2;
    while x < w {
        Line::new(origin + Point::new(x, 0), origin + Point::new(x, h))
            .into_styled(STREET_STYLE)
            .draw(&mut map)
            .ok();
        x += STREET_SPACING;
    }
    let mut y = STREET_SPACING / 2;
    while y < h {
        Line::new(origin + Point::new(0, y), origin + Point::new(w, y))
            .into_styled(STREET_STYLE)
            .draw(&mut map)
            .ok();
        y += STREET_SPACING;
    }

    // One diagonal arterial road
    Line::new(origin + Point::new(0, h), origin + Point::new(w, 0))
        .into_styled(PrimitiveStyle::with_stroke(WHITE, STREET_WIDTH + 2))
        .draw(&mut map)
        .ok();
}

// =============================================================================
// Overlays
// =============================================================================

/// Coverage circle outline around `center`.
pub fn draw_coverage<D>(display: &mut D, viewport: Rectangle, center: Point, radius_px: u32, color: Rgb565)
where
    D: DrawTarget<Color = Rgb565>,
{
    let mut map = display.clipped(&viewport);
    Circle::with_center(center, radius_px * 2)
        .into_styled(PrimitiveStyle::with_stroke(color, 2))
        .draw(&mut map)
        .ok();
}

/// Route polyline through `points`.
pub fn draw_route<D>(display: &mut D, viewport: Rectangle, points: &[Point])
where
    D: DrawTarget<Color = Rgb565>,
{
    if points.len() < 2 {
        return;
    }
    let mut map = display.clipped(&viewport);
    Polyline::new(points).into_styled(ROUTE_STYLE).draw(&mut map).ok();
}

// =============================================================================
// Markers
// =============================================================================

fn draw_square_marker<D>(display: &mut D, center: Point, fill: Rgb565, label: &str)
where
    D: DrawTarget<Color = Rgb565>,
{
    let style = PrimitiveStyleBuilder::new()
        .fill_color(fill)
        .stroke_color(WHITE)
        .stroke_width(2)
        .build();
    Rectangle::with_center(center, Size::new_equal(MARKER_SIZE))
        .into_styled(style)
        .draw(display)
        .ok();
    Text::with_text_style(label, center + Point::new(0, 5), MARKER_LABEL_STYLE, CENTERED)
        .draw(display)
        .ok();
}

/// Ambulance position: color follows the online state on the home screen.
pub fn draw_ambulance_marker<D>(display: &mut D, viewport: Rectangle, center: Point, color: Rgb565)
where
    D: DrawTarget<Color = Rgb565>,
{
    let mut map = display.clipped(&viewport);
    draw_square_marker(&mut map, center, color, "+");
}

/// Destination hospital.
pub fn draw_hospital_marker<D>(display: &mut D, viewport: Rectangle, center: Point)
where
    D: DrawTarget<Color = Rgb565>,
{
    let mut map = display.clipped(&viewport);
    draw_square_marker(&mut map, center, BLUE_600, "H");
}

/// Emergency location pin.
pub fn draw_emergency_marker<D>(display: &mut D, viewport: Rectangle, center: Point)
where
    D: DrawTarget<Color = Rgb565>,
{
    let mut map = display.clipped(&viewport);
    let style = PrimitiveStyleBuilder::new()
        .fill_color(RED_600)
        .stroke_color(WHITE)
        .stroke_width(2)
        .build();
    Circle::with_center(center, MARKER_SIZE)
        .into_styled(style)
        .draw(&mut map)
        .ok();
    Text::with_text_style("!", center + Point::new(0, 5), MARKER_LABEL_STYLE, CENTERED)
        .draw(&mut map)
        .ok();
}

/// Traffic signal dot in its current color.
pub fn draw_signal<D>(display: &mut D, viewport: Rectangle, center: Point, status: SignalStatus)
where
    D: DrawTarget<Color = Rgb565>,
{
    let mut map = display.clipped(&viewport);
    let style = PrimitiveStyleBuilder::new()
        .fill_color(status.color())
        .stroke_color(BLACK)
        .stroke_width(1)
        .build();
    Circle::with_center(center, SIGNAL_SIZE)
        .into_styled(style)
        .draw(&mut map)
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{SIGNAL_GREEN, SIGNAL_RED};
    use crate::widgets::mock::CountingDisplay;

    fn viewport() -> Rectangle { Rectangle::new(Point::new(0, 28), Size::new(240, 212)) }

    #[test]
    fn test_background_fills_viewport_only() {
        let mut display = CountingDisplay::new();
        draw_map_background(&mut display, viewport());
        assert_eq!(display.out_of_bounds(), 0);
        assert_eq!(display.count_color(SLATE_200), 240 * 212, "Land covers the viewport");
        assert!(display.count_color(MAP_GREEN) > 0);
    }

    #[test]
    fn test_markers_clipped_to_viewport() {
        let mut display = CountingDisplay::new();
        // Centered on the viewport's top edge: half the marker must be clipped
        draw_hospital_marker(&mut display, viewport(), Point::new(120, 28));
        let clipped = display.pixels_drawn();
        let mut display = CountingDisplay::new();
        draw_hospital_marker(&mut display, viewport(), Point::new(120, 120));
        assert!(clipped < display.pixels_drawn());
    }

    #[test]
    fn test_signal_uses_status_color() {
        let mut display = CountingDisplay::new();
        draw_signal(&mut display, viewport(), Point::new(50, 100), SignalStatus::Green);
        assert!(display.count_color(SIGNAL_GREEN) > 0);
        assert_eq!(display.count_color(SIGNAL_RED), 0);
    }

    #[test]
    fn test_route_needs_two_points() {
        let mut display = CountingDisplay::new();
        draw_route(&mut display, viewport(), &[Point::new(10, 50)]);
        assert_eq!(display.pixels_drawn(), 0);
        draw_route(&mut display, viewport(), &[Point::new(10, 50), Point::new(200, 200)]);
        assert!(display.count_color(BLUE_600) > 0);
    }

    #[test]
    fn test_coverage_circle() {
        let mut display = CountingDisplay::new();
        draw_coverage(&mut display, viewport(), Point::new(120, 134), 90, RED_600);
        assert!(display.count_color(RED_600) > 0);
        assert_eq!(display.out_of_bounds(), 0);
    }
}
