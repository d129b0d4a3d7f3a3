//! # Telemetry Module
//!
//! Accumulates the car state the display needs from decoded packets.

pub mod state;

pub use state::{TelemetryState, MIN_RPM_MAX};
