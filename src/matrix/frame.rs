//! # Matrix Frame Codec
//!
//! Wire format for pushing a pixel grid to a serial-attached LED board:
//!
//! ```text
//! ┌─────────┬────────┬─────────┬──────────────────┬────────┐
//! │ Sync(1) │ Len(1) │ Type(1) │ RGB payload(192) │ CRC(1) │
//! └─────────┴────────┴─────────┴──────────────────┴────────┘
//! ```
//!
//! - `Len` counts type + payload + CRC (194)
//! - Payload is row-major, top row first, `R G B` per pixel
//! - CRC8-DVB-S2 covers `Len`, `Type` and the payload

use super::crc::crc8_dvb_s2;
use crate::display::grid::{PixelGrid, Rgb, GRID_RGB_BYTES, GRID_WIDTH};
use crate::error::{Result, RevMatrixError};

/// Frame sync byte
pub const MATRIX_SYNC_BYTE: u8 = 0xA5;

/// Full-frame pixel update
pub const MATRIX_FRAMETYPE_PIXELS: u8 = 0x01;

/// Length byte of a pixel frame (type + payload + crc)
pub const MATRIX_PIXELS_FRAME_LENGTH: u8 = (1 + GRID_RGB_BYTES + 1) as u8;

/// Total bytes on the wire for one pixel frame
pub const MATRIX_PIXELS_FRAME_SIZE: usize = 2 + MATRIX_PIXELS_FRAME_LENGTH as usize;

/// Encode a pixel grid into a complete frame
///
/// # Examples
///
/// ```
/// use rev_matrix::display::PixelGrid;
/// use rev_matrix::matrix::frame::{encode_pixels_frame, MATRIX_PIXELS_FRAME_SIZE};
///
/// let frame = encode_pixels_frame(&PixelGrid::new());
/// assert_eq!(frame.len(), MATRIX_PIXELS_FRAME_SIZE);
/// ```
pub fn encode_pixels_frame(grid: &PixelGrid) -> Vec<u8> {
    let mut frame = Vec::with_capacity(MATRIX_PIXELS_FRAME_SIZE);
    frame.push(MATRIX_SYNC_BYTE);
    frame.push(MATRIX_PIXELS_FRAME_LENGTH);
    frame.push(MATRIX_FRAMETYPE_PIXELS);
    frame.extend_from_slice(&grid.to_rgb_bytes());

    // CRC over Length + Type + Payload
    let crc = crc8_dvb_s2(&frame[1..]);
    frame.push(crc);

    frame
}

/// Decode a complete pixel frame back into a grid
///
/// # Errors
///
/// Returns `InvalidFrame` if:
/// - Frame length is wrong
/// - Sync byte, length byte or frame type is incorrect
/// - CRC check fails
pub fn decode_pixels_frame(frame: &[u8]) -> Result<PixelGrid> {
    if frame.len() != MATRIX_PIXELS_FRAME_SIZE {
        return Err(RevMatrixError::InvalidFrame(format!(
            "expected {} bytes, got {}",
            MATRIX_PIXELS_FRAME_SIZE,
            frame.len()
        )));
    }

    if frame[0] != MATRIX_SYNC_BYTE {
        return Err(RevMatrixError::InvalidFrame(format!(
            "invalid sync byte: 0x{:02X}",
            frame[0]
        )));
    }

    if frame[1] != MATRIX_PIXELS_FRAME_LENGTH || frame[2] != MATRIX_FRAMETYPE_PIXELS {
        return Err(RevMatrixError::InvalidFrame(format!(
            "unexpected length 0x{:02X} / type 0x{:02X}",
            frame[1], frame[2]
        )));
    }

    let crc_index = MATRIX_PIXELS_FRAME_SIZE - 1;
    let calculated = crc8_dvb_s2(&frame[1..crc_index]);
    if calculated != frame[crc_index] {
        return Err(RevMatrixError::InvalidFrame(format!(
            "CRC mismatch: expected 0x{:02X}, got 0x{:02X}",
            calculated, frame[crc_index]
        )));
    }

    let mut grid = PixelGrid::new();
    for (i, rgb) in frame[3..crc_index].chunks_exact(3).enumerate() {
        grid.set(i / GRID_WIDTH, i % GRID_WIDTH, Rgb::new(rgb[0], rgb[1], rgb[2]));
    }
    Ok(grid)
}
