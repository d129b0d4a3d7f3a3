//! # Display Module
//!
//! Maps telemetry state onto the 8x8 LED matrix.
//!
//! This module handles:
//! - The RGB pixel grid type
//! - The gear glyph font
//! - Rendering gear and RPM into a grid

pub mod grid;
pub mod font;
pub mod mapper;

pub use grid::{PixelGrid, Rgb, GRID_HEIGHT, GRID_WIDTH};
pub use mapper::render;
