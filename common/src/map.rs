//! Lat/lng to screen projection for the schematic map.
//!
//! The map has no tiles. A [`MapProjection`] fits a set of points (and
//! optionally a circle around one of them) into a pixel viewport with padding,
//! north up, using a local equirectangular approximation. At city scale the
//! error is far below one pixel.

use embedded_graphics::prelude::Point;
use embedded_graphics::primitives::Rectangle;
use micromath::F32;

use crate::trip::GeoPoint;

/// Meters per degree of latitude.
const METERS_PER_DEG_LAT: f32 = 111_320.0;

/// Scale used when every point coincides (pixels per meter).
const FALLBACK_PX_PER_M: f32 = 0.02;

/// Projection from geographic coordinates into a viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapProjection {
    center: GeoPoint,
    origin: Point,
    meters_per_deg_lng: f32,
    px_per_m: f32,
}

impl MapProjection {
    /// Fit `points` into `viewport`, keeping `padding` pixels clear on each side.
    ///
    /// Returns a projection centered on the viewport even for zero or one point.
    pub fn fit(points: &[GeoPoint], viewport: Rectangle, padding: u32) -> Self { Self::fit_with_radius(points, 0.0, viewport, padding) }

    /// Like [`fit`](Self::fit), but also keeps a circle of `radius_m` around
    /// every point inside the viewport.
    pub fn fit_with_radius(points: &[GeoPoint], radius_m: f32, viewport: Rectangle, padding: u32) -> Self {
        let Some(first) = points.first() else {
            return Self::centered(GeoPoint::new(0.0, 0.0), viewport, FALLBACK_PX_PER_M);
        };

        let (mut min_lat, mut max_lat, mut min_lng, mut max_lng) = (first.lat, first.lat, first.lng, first.lng);
        for p in &points[1..] {
            min_lat = min_lat.min(p.lat);
            max_lat = max_lat.max(p.lat);
            min_lng = min_lng.min(p.lng);
            max_lng = max_lng.max(p.lng);
        }

        let center = GeoPoint::new((min_lat + max_lat) / 2.0, (min_lng + max_lng) / 2.0);
        let meters_per_deg_lng = meters_per_deg_lng(center.lat);
        let span_x_m = (max_lng - min_lng) * meters_per_deg_lng + 2.0 * radius_m;
        let span_y_m = (max_lat - min_lat) * METERS_PER_DEG_LAT + 2.0 * radius_m;

        let avail_w = viewport.size.width.saturating_sub(2 * padding).max(1) as f32;
        let avail_h = viewport.size.height.saturating_sub(2 * padding).max(1) as f32;

        let px_per_m = match (span_x_m > 0.0, span_y_m > 0.0) {
            (true, true) => (avail_w / span_x_m).min(avail_h / span_y_m),
            (true, false) => avail_w / span_x_m,
            (false, true) => avail_h / span_y_m,
            (false, false) => FALLBACK_PX_PER_M,
        };

        Self::centered(center, viewport, px_per_m)
    }

    fn centered(center: GeoPoint, viewport: Rectangle, px_per_m: f32) -> Self {
        Self {
            center,
            origin: viewport.center(),
            meters_per_deg_lng: meters_per_deg_lng(center.lat),
            px_per_m,
        }
    }

    /// Pixel position of `p`.
    pub fn project(&self, p: GeoPoint) -> Point {
        let dx_m = (p.lng - self.center.lng) * self.meters_per_deg_lng;
        let dy_m = (p.lat - self.center.lat) * METERS_PER_DEG_LAT;
        Point::new(
            self.origin.x + F32(dx_m * self.px_per_m).round().0 as i32,
            self.origin.y - F32(dy_m * self.px_per_m).round().0 as i32,
        )
    }

    /// Length of `meters` in pixels (at least 1).
    pub fn meters_to_px(&self, meters: f32) -> u32 { (F32(meters * self.px_per_m).round().0 as u32).max(1) }

    /// Bounding square of a circle of `radius_m` around `p`, ready for `Circle::new`.
    pub fn circle_bounds(&self, p: GeoPoint, radius_m: f32) -> (Point, u32) {
        let r = self.meters_to_px(radius_m) as i32;
        let c = self.project(p);
        (c - Point::new(r, r), (2 * r) as u32)
    }
}

fn meters_per_deg_lng(lat_deg: f32) -> f32 { METERS_PER_DEG_LAT * F32(lat_deg.to_radians()).cos().0 }
