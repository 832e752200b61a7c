//! Counting draw target for rendering tests.
//!
//! Records how many pixels were drawn, how many fell outside the panel and a
//! small per-color histogram. Nothing is stored per pixel, so it works in
//! `no_std` builds with the `mock` feature.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Distinct colors tracked by the histogram; later colors are only counted in totals.
const HISTOGRAM_SLOTS: usize = 64;

/// Mock display the size of the dashboard panel.
pub struct CountingDisplay {
    size: Size,
    drawn: usize,
    out_of_bounds: usize,
    histogram: heapless::Vec<(Rgb565, usize), HISTOGRAM_SLOTS>,
}

impl CountingDisplay {
    pub fn new() -> Self { Self::with_size(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)) }

    pub fn with_size(size: Size) -> Self {
        Self {
            size,
            drawn: 0,
            out_of_bounds: 0,
            histogram: heapless::Vec::new(),
        }
    }

    /// Pixels drawn inside the panel.
    pub fn pixels_drawn(&self) -> usize { self.drawn }

    /// Pixels that fell outside the panel.
    pub fn out_of_bounds(&self) -> usize { self.out_of_bounds }

    /// Pixels drawn in `color` (including overdraw).
    pub fn count_color(&self, color: Rgb565) -> usize {
        self.histogram
            .iter()
            .find(|(c, _)| *c == color)
            .map_or(0, |(_, n)| *n)
    }

    fn record(&mut self, color: Rgb565) {
        if let Some((_, n)) = self.histogram.iter_mut().find(|(c, _)| *c == color) {
            *n += 1;
        } else {
            self.histogram.push((color, 1)).ok();
        }
    }
}

impl Default for CountingDisplay {
    fn default() -> Self { Self::new() }
}

impl DrawTarget for CountingDisplay {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        for Pixel(point, color) in pixels {
            if bounds.contains(point) {
                self.drawn += 1;
                self.record(color);
            } else {
                self.out_of_bounds += 1;
            }
        }
        Ok(())
    }
}

impl OriginDimensions for CountingDisplay {
    fn size(&self) -> Size { self.size }
}
