// Crate-level lints: Allow common embedded/graphics patterns that pedantic lints flag
#![allow(clippy::cast_possible_truncation)] // Intentional u32->i32 and f32->u32 casts for pixel math
#![allow(clippy::cast_precision_loss)] // u32->f32 in progress and projection math
#![allow(clippy::cast_possible_wrap)] // u32->i32 wrapping is acceptable for screen-sized values
#![allow(clippy::cast_sign_loss)] // i32->u32 where the layout guarantees a positive value
#![allow(clippy::module_name_repetitions)] // SummaryView in screens::summary reads fine

//! SmartEVP ambulance driver dashboard.
//!
//! Desktop simulator of the in-cab tablet used by an ambulance driver during
//! an emergency run. The driver goes online, receives a dispatch, triages the
//! patient, picks a receiving hospital type and drives with traffic signal
//! preemption while recording voice notes and vitals. The trip ends with a
//! summary that can be shared with the hospital.
//!
//! # Screens
//!
//! ```text
//! Home --(alert)--> Emergency --accept--> Criticality --> Hospital --> Navigation --> Summary
//!   ^                  |  decline / timeout                                              |
//!   +------------------+------------------------------------------------------------------+
//! ```
//!
//! # Keys
//!
//! | Key | Action |
//! |-----|--------|
//! | `O` | Go online / offline (home) |
//! | `Enter` | Open the alert, activate the focused button, save a form |
//! | `Esc` | Decline, go back, or close an overlay |
//! | Arrows / `Tab` | Move focus, scroll the summary |
//! | `Space` | Toggle the focused hospital type |
//! | `V` / `T` / `C` | Voice note / vitals / complete trip (navigation) |
//! | `S` / `H` | Share details / return home (summary) |
//!
//! # Environment
//!
//! - `SMARTEVP_SPEECH=off` disables the speech recognizer (a canned transcript is used)
//! - `SMARTEVP_SCALE=1..4` sets the window scale
//! - `RUST_LOG` filters log output (default `info`)

mod app;
mod config;
mod dictation;
mod input;
mod popup;
mod screens;
mod timing;

use std::thread;
use std::time::Instant;

use app::App;
use config::{Settings, WINDOW_TITLE};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use input::key_from_sdl;
use screens::run_boot_screen;
use smartevp_common::colors::BLACK;
use smartevp_common::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use timing::{FRAME_TIME, SessionClock};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::from_env();
    tracing::info!(speech = settings.speech, scale = settings.scale, "starting dashboard");

    // Initialize display and window (simulator mode)
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(settings.scale).build();
    let mut window = Window::new(WINDOW_TITLE, &output_settings);

    display.clear(BLACK).ok();
    window.update(&display);

    let clock = SessionClock::start();

    // Returns false if the user closes the window during boot
    if !run_boot_screen(&mut display, &mut window, &clock) {
        tracing::info!("window closed during boot");
        return;
    }

    let mut app = App::new(settings);

    loop {
        let frame_start = Instant::now();
        let now_ms = clock.now_ms();

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => {
                    tracing::info!("window closed");
                    return;
                }
                SimulatorEvent::KeyDown { keycode, keymod, repeat } => {
                    let Some(key) = key_from_sdl(keycode, keymod) else {
                        continue;
                    };
                    // Held keys only repeat while typing into a text field
                    if repeat && !(app.is_editing_text() && key.repeats_in_text()) {
                        continue;
                    }
                    app.handle_key(key, now_ms);
                }
                _ => {}
            }
        }

        app.tick(now_ms);
        app.render(&mut display, now_ms);
        window.update(&display);

        // Sleep to maintain target frame rate (~50 FPS)
        if let Some(remaining) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }
}
