//! # Rev Matrix Library
//!
//! Show Project CARS 2 gear and RPM telemetry on an 8x8 RGB LED matrix.
//!
//! This library provides the pieces between the game's UDP telemetry stream
//! and the LED board: a packet decoder, the retained car state, a pure
//! renderer from state to pixels, and the sinks that display the result.

pub mod config;
pub mod error;
pub mod pcars2;
pub mod telemetry;
pub mod display;
pub mod matrix;
pub mod render_loop;
