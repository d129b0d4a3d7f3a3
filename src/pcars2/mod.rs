//! # Project CARS 2 Telemetry Module
//!
//! Decoder for the game's SMS UDP telemetry stream.
//!
//! This module handles:
//! - Fixed 12-byte header parsing
//! - Packet type dispatch with per-type length checks
//! - Extraction of gear and RPM from CarPhysics packets

pub mod protocol;
pub mod decoder;

#[cfg(test)]
pub(crate) mod testing;

pub use decoder::decode;
pub use protocol::{CarPhysics, Packet, PacketHeader, PacketType};
