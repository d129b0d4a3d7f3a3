//! # Serial LED Matrix
//!
//! Drives an 8x8 RGB board attached over USB serial (for example a
//! microcontroller running a WS2812 matrix). Every push writes one
//! checksummed frame, see [`frame`](super::frame).

use async_trait::async_trait;
use std::io;
use tokio_serial::SerialPortBuilderExt;
use tracing::{debug, info, trace, warn};

use super::frame::encode_pixels_frame;
use super::MatrixSink;
use crate::display::PixelGrid;
use crate::error::{Result, RevMatrixError};

/// Device paths tried when none is configured, in order of preference
pub const DEFAULT_DEVICE_PATHS: &[&str] = &[
    "/dev/ttyACM0", // USB CDC boards (RP2040, Arduino Leonardo)
    "/dev/ttyUSB0", // USB-to-serial adapters
];

/// Byte-level access to the serial port, mockable in tests
#[async_trait]
pub trait SerialPortIO: Send {
    /// Write all data to the port
    async fn write_all(&mut self, data: &[u8]) -> io::Result<()>;

    /// Flush the output buffer
    async fn flush(&mut self) -> io::Result<()>;
}

/// [`SerialPortIO`] over a real tokio-serial stream
pub struct TokioSerialPort {
    port: tokio_serial::SerialStream,
}

#[async_trait]
impl SerialPortIO for TokioSerialPort {
    async fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        use tokio::io::AsyncWriteExt;
        self.port.write_all(data).await
    }

    async fn flush(&mut self) -> io::Result<()> {
        use tokio::io::AsyncWriteExt;
        self.port.flush().await
    }
}

/// LED matrix behind a serial port
pub struct SerialMatrix<P: SerialPortIO = TokioSerialPort> {
    port: P,
    device_path: String,
    brightness: f32,
    frames_sent: u64,
}

impl<P: SerialPortIO> std::fmt::Debug for SerialMatrix<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialMatrix")
            .field("device_path", &self.device_path)
            .field("brightness", &self.brightness)
            .field("frames_sent", &self.frames_sent)
            .finish_non_exhaustive()
    }
}

impl SerialMatrix<TokioSerialPort> {
    /// Open the matrix board
    ///
    /// An empty `path` auto-detects the board by trying
    /// [`DEFAULT_DEVICE_PATHS`].
    ///
    /// # Errors
    ///
    /// Returns `SerialPortNotFound` if no candidate path could be opened.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rev_matrix::matrix::SerialMatrix;
    ///
    /// let matrix = SerialMatrix::open("/dev/ttyACM0", 115_200, 0.75)?;
    /// println!("Connected to: {}", matrix.device_path());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open(path: &str, baud_rate: u32, brightness: f32) -> Result<Self> {
        if path.is_empty() {
            Self::open_with_paths(DEFAULT_DEVICE_PATHS, baud_rate, brightness)
        } else {
            Self::open_with_paths(&[path], baud_rate, brightness)
        }
    }

    /// Open the first path in `paths` that succeeds
    pub fn open_with_paths(paths: &[&str], baud_rate: u32, brightness: f32) -> Result<Self> {
        for path in paths {
            debug!("Trying to open LED matrix on {}", path);

            match Self::open_port(path, baud_rate) {
                Ok(port) => {
                    info!("Opened LED matrix at {} ({} baud)", path, baud_rate);
                    return Ok(Self::with_port(TokioSerialPort { port }, *path, brightness));
                }
                Err(e) => {
                    warn!("Failed to open {}: {}", path, e);
                }
            }
        }

        Err(RevMatrixError::SerialPortNotFound(paths.join(", ")))
    }

    /// Open one port as 8N1 without flow control
    fn open_port(path: &str, baud_rate: u32) -> Result<tokio_serial::SerialStream> {
        tokio_serial::new(path, baud_rate)
            .data_bits(tokio_serial::DataBits::Eight)
            .parity(tokio_serial::Parity::None)
            .stop_bits(tokio_serial::StopBits::One)
            .flow_control(tokio_serial::FlowControl::None)
            .open_native_async()
            .map_err(|e| RevMatrixError::Serial(format!("Failed to open {}: {}", path, e)))
    }
}

impl<P: SerialPortIO> SerialMatrix<P> {
    /// Wrap an already open port
    pub fn with_port(port: P, device_path: impl Into<String>, brightness: f32) -> Self {
        Self {
            port,
            device_path: device_path.into(),
            brightness: brightness.clamp(0.0, 1.0),
            frames_sent: 0,
        }
    }

    /// Write one encoded frame and flush it
    ///
    /// # Errors
    ///
    /// Returns `Serial` if the write or flush fails.
    pub async fn send_frame(&mut self, frame: &[u8]) -> Result<()> {
        self.port
            .write_all(frame)
            .await
            .map_err(|e| RevMatrixError::Serial(format!("Failed to write frame: {}", e)))?;

        self.port
            .flush()
            .await
            .map_err(|e| RevMatrixError::Serial(format!("Failed to flush serial port: {}", e)))?;

        self.frames_sent += 1;
        trace!("Sent matrix frame ({} bytes)", frame.len());
        Ok(())
    }

    /// Path of the opened device (e.g. "/dev/ttyACM0")
    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    /// Frames written successfully
    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }
}

#[async_trait]
impl<P: SerialPortIO> MatrixSink for SerialMatrix<P> {
    async fn push(&mut self, grid: &PixelGrid) -> Result<()> {
        let frame = encode_pixels_frame(&grid.scaled(self.brightness));
        self.send_frame(&frame).await
    }
}
