//! # LED Matrix Module
//!
//! Everything that takes a rendered [`PixelGrid`] and shows it.
//!
//! This module handles:
//! - The [`MatrixSink`] capability the render loop pushes frames into
//! - A no-op sink for dry runs and tests
//! - A serial-attached matrix board with a checksummed frame format

pub mod crc;
pub mod frame;
pub mod serial;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::display::PixelGrid;
use crate::error::Result;

pub use serial::SerialMatrix;

/// Something that can display a pixel grid
///
/// The render loop treats a push as fire-and-forget: a failed push is
/// logged and the next update tries again.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MatrixSink: Send {
    /// Show `grid` on the matrix
    async fn push(&mut self, grid: &PixelGrid) -> Result<()>;
}

/// Sink that discards frames, keeping only the last one
#[derive(Debug, Default, Clone)]
pub struct NullMatrix {
    frames: u64,
    last: Option<PixelGrid>,
}

impl NullMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames pushed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Most recently pushed grid
    pub fn last_grid(&self) -> Option<&PixelGrid> {
        self.last.as_ref()
    }
}

#[async_trait]
impl MatrixSink for NullMatrix {
    async fn push(&mut self, grid: &PixelGrid) -> Result<()> {
        self.frames += 1;
        self.last = Some(*grid);
        Ok(())
    }
}
