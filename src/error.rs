//! # Error Types
//!
//! Custom error types for Rev Matrix using `thiserror`.

use thiserror::Error;

use crate::pcars2::PacketType;

/// Reasons a single telemetry datagram is rejected.
///
/// None of these are fatal: the render loop drops the datagram and keeps
/// listening. Telemetry state is never touched by a rejected datagram.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Buffer is shorter than the fixed packet header
    #[error("Malformed header: {len} bytes, need at least {min}")]
    MalformedHeader { len: usize, min: usize },

    /// Header declares a packet type outside the known enumeration
    #[error("Unknown packet type: {0}")]
    UnknownPacketType(u8),

    /// Buffer is shorter than the body declared by its packet type
    #[error("Truncated {packet_type:?} packet: expected {expected} bytes, got {actual}")]
    TruncatedPacket {
        packet_type: PacketType,
        expected: usize,
        actual: usize,
    },
}

/// Main error type for Rev Matrix
#[derive(Debug, Error)]
pub enum RevMatrixError {
    /// Telemetry decode errors
    #[error("Telemetry decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// LED matrix frame errors
    #[error("Invalid matrix frame: {0}")]
    InvalidFrame(String),

    /// Serial port errors
    #[error("Serial error: {0}")]
    Serial(String),

    /// No LED matrix found on any candidate path
    #[error("LED matrix serial port not found (tried: {0})")]
    SerialPortNotFound(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Rev Matrix
pub type Result<T> = std::result::Result<T, RevMatrixError>;
