//! Common types and logic for the SmartEVP ambulance dashboard.
//!
//! This crate contains the platform-agnostic half of the dashboard: everything
//! that can be tested on the host without a window.
//!
//! - [`colors`]: RGB565 palette
//! - [`config`]: Layout constants for the 240x320 portrait display
//! - [`styles`]: Pre-computed text styles
//! - [`thresholds`]: Timer periods, countdown length and signal thresholds
//! - [`timer`]: Millisecond deadlines and interval timers on the session clock
//! - [`dispatch`]: Hardcoded dispatch data (emergency, destination, driver)
//! - [`trip`]: Trip record, voice notes and vitals records
//! - [`flow`]: Screen flow controller
//! - [`countdown`]: Emergency accept countdown
//! - [`navigation`]: Simulated traffic-signal preemption feed
//! - [`map`]: Lat/lng to screen projection for the schematic map
//! - [`voice`]: Voice note capture with recognizer fallback
//! - [`vitals`]: Vitals entry form
//! - [`selection`]: Triage and hospital-type selectors
//! - [`summary`]: Trip statistics and the share animation
//! - [`animations`]: Pulse effects
//! - [`widgets`]: Drawing helpers generic over `DrawTarget<Color = Rgb565>`
//!
//! # no_std Compatibility
//!
//! The crate is `no_std` outside of tests. Time is passed in as milliseconds
//! since session start, so nothing here depends on `std::time`.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod animations;
pub mod colors;
pub mod config;
pub mod countdown;
pub mod dispatch;
pub mod flow;
pub mod map;
pub mod navigation;
pub mod selection;
pub mod styles;
pub mod summary;
pub mod thresholds;
pub mod timer;
pub mod trip;
pub mod vitals;
pub mod voice;
pub mod widgets;

mod text;

pub use flow::{FlowController, FlowError, Screen, Transition};
pub use text::{truncated, wrap_lines};
pub use trip::{Priority, Trip};
