//! Boot screen with console-style initialization messages.
//!
//! Displays a "booting" sequence with an animated spinner and sequential
//! messages simulating the in-cab unit acquiring GPS, loading the map and
//! linking to dispatch.
//!
//! # Visual Layout
//!
//! ```text
//! ┌──────────────────────────┐
//! │  |  Loading map...  -    │  Title with spinner
//! │──────────────────────────│  Divider line
//! │   Acquiring GPS fix...   │
//! │   GPS lock: 12.9716 N    │  Console output
//! │ > Linking to dispatch... │  (scrolling)
//! └──────────────────────────┘
//! ```
//!
//! The newest line carries a `>` marker; at most [`MAX_CONSOLE_LINES`] are
//! visible and older lines scroll off.

use core::fmt::Write;
use std::thread;
use std::time::Duration;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::Text;
use embedded_graphics_simulator::{SimulatorDisplay, SimulatorEvent, Window};
use heapless::{String, Vec};
use smartevp_common::animations::spinner_char;
use smartevp_common::colors::{RED_600, SLATE_900, WHITE};
use smartevp_common::config::{CENTER_X, MARGIN, SCREEN_WIDTH};
use smartevp_common::styles::{CENTERED, LABEL_FONT, LEFT_ALIGNED, TITLE_FONT};

use crate::timing::{FRAME_TIME, SessionClock};

const TITLE_POS: Point = Point::new(CENTER_X, 30);
const LINE_START: Point = Point::new(MARGIN as i32, 40);
const LINE_END: Point = Point::new((SCREEN_WIDTH - MARGIN) as i32, 40);
const CONSOLE_X: i32 = MARGIN as i32;
const CONSOLE_START_Y: i32 = 58;
const CONSOLE_LINE_HEIGHT: i32 = 14;

/// Console lines kept on screen.
pub const MAX_CONSOLE_LINES: usize = 16;

const TITLE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(TITLE_FONT, RED_600);
const CONSOLE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(LABEL_FONT, SLATE_900);
const DIVIDER_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(RED_600, 1);

/// Boot messages and how long each stays current (ms).
const BOOT_MESSAGES: [(&str, u64); 8] = [
    ("SmartEVP in-cab unit v0.1", 500),
    ("Acquiring GPS fix...", 900),
    ("GPS lock: 12.9716 N 77.5946 E", 500),
    ("Loading map tiles...", 1_000),
    ("Map ready: Bengaluru", 400),
    ("Linking to dispatch...", 900),
    ("Signal preemption link up", 500),
    ("Ready.", 500),
];

/// Draw one boot frame: spinner title, divider and the console.
pub fn draw_boot_frame<D>(display: &mut D, lines: &[&str], now_ms: u64)
where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(WHITE).ok();

    let left_spinner = spinner_char(now_ms, 0);
    let right_spinner = spinner_char(now_ms, 2);
    let mut title: String<32> = String::new();
    let _ = write!(title, "{left_spinner} Loading map... {right_spinner}");
    Text::with_text_style(&title, TITLE_POS, TITLE_STYLE, CENTERED)
        .draw(display)
        .ok();

    Line::new(LINE_START, LINE_END)
        .into_styled(DIVIDER_STYLE)
        .draw(display)
        .ok();

    let skip = lines.len().saturating_sub(MAX_CONSOLE_LINES);
    let visible = &lines[skip..];
    for (i, line) in visible.iter().enumerate() {
        let y_pos = CONSOLE_START_Y + (i as i32 * CONSOLE_LINE_HEIGHT);
        let prefix = if i == visible.len() - 1 { "> " } else { "  " };
        let mut full_line: String<48> = String::new();
        let _ = write!(full_line, "{prefix}{line}");
        Text::with_text_style(&full_line, Point::new(CONSOLE_X, y_pos), CONSOLE_STYLE, LEFT_ALIGNED)
            .draw(display)
            .ok();
    }
}

/// Run the boot sequence. Returns `false` if the window was closed.
pub fn run_boot_screen(display: &mut SimulatorDisplay<Rgb565>, window: &mut Window, clock: &SessionClock) -> bool {
    let mut console_lines: Vec<&str, { BOOT_MESSAGES.len() }> = Vec::new();

    for (msg, duration_ms) in BOOT_MESSAGES {
        console_lines.push(msg).ok();
        tracing::debug!(msg, "boot");

        let msg_end = clock.now_ms() + duration_ms;
        while clock.now_ms() < msg_end {
            for ev in window.events() {
                if matches!(ev, SimulatorEvent::Quit) {
                    return false;
                }
            }

            draw_boot_frame(display, &console_lines, clock.now_ms());
            window.update(display);
            thread::sleep(FRAME_TIME);
        }
    }

    thread::sleep(Duration::from_millis(300));
    true
}

#[cfg(test)]
mod tests {
    use smartevp_common::widgets::mock::CountingDisplay;

    use super::*;

    #[test]
    fn test_boot_frame_draws_console() {
        let mut empty = CountingDisplay::new();
        draw_boot_frame(&mut empty, &[], 0);

        let mut display = CountingDisplay::new();
        draw_boot_frame(&mut display, &["Acquiring GPS fix...", "Ready."], 0);
        assert!(display.count_color(SLATE_900) > 0, "Console text drawn");
        assert!(display.pixels_drawn() > empty.pixels_drawn());
        assert_eq!(display.out_of_bounds(), 0);
    }

    #[test]
    fn test_console_scrolls() {
        let lines = ["line"; MAX_CONSOLE_LINES + 5];
        let mut display = CountingDisplay::new();
        draw_boot_frame(&mut display, &lines, 0);
        assert_eq!(display.out_of_bounds(), 0, "Old lines scroll off instead of overflowing");
    }

    #[test]
    fn test_messages_fit_console() {
        assert!(BOOT_MESSAGES.len() <= MAX_CONSOLE_LINES);
        for (msg, _) in BOOT_MESSAGES {
            assert!(msg.len() + 2 <= 38, "{msg} is wider than the panel");
        }
    }
}
