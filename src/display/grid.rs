//! # Pixel Grid
//!
//! The 8x8 RGB frame pushed to the LED matrix on every update.

/// Matrix width in pixels
pub const GRID_WIDTH: usize = 8;

/// Matrix height in pixels
pub const GRID_HEIGHT: usize = 8;

/// Bytes in one row-major RGB frame
pub const GRID_RGB_BYTES: usize = GRID_WIDTH * GRID_HEIGHT * 3;

/// One RGB pixel, 0-255 per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Creates a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scales every channel by `factor` (clamped to `0.0..=1.0`).
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (f32::from(c) * factor).round() as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }

    /// True if every channel is zero.
    pub fn is_off(self) -> bool {
        self == OFF
    }
}

/// Unlit pixel
pub const OFF: Rgb = Rgb::new(0, 0, 0);

/// 8x8 grid of pixels, indexed `[row][col]` with row 0 at the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct PixelGrid {
    pixels: [[Rgb; GRID_WIDTH]; GRID_HEIGHT],
}

impl PixelGrid {
    /// Creates a grid with every pixel off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pixel at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is 8 or more.
    pub fn get(&self, row: usize, col: usize) -> Rgb {
        self.pixels[row][col]
    }

    /// Sets the pixel at `(row, col)`; out-of-range coordinates are ignored.
    pub fn set(&mut self, row: usize, col: usize, color: Rgb) {
        if let Some(pixel) = self.pixels.get_mut(row).and_then(|r| r.get_mut(col)) {
            *pixel = color;
        }
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> &[[Rgb; GRID_WIDTH]; GRID_HEIGHT] {
        &self.pixels
    }

    /// Number of pixels that are not off.
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().flatten().filter(|p| !p.is_off()).count()
    }

    /// Copy of the grid with every pixel scaled by `brightness`.
    #[must_use]
    pub fn scaled(&self, brightness: f32) -> Self {
        let mut out = *self;
        for pixel in out.pixels.iter_mut().flatten() {
            *pixel = pixel.scaled(brightness);
        }
        out
    }

    /// Row-major `R, G, B` bytes, 192 in total.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(GRID_RGB_BYTES);
        for pixel in self.pixels.iter().flatten() {
            bytes.extend_from_slice(&[pixel.r, pixel.g, pixel.b]);
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_dark() {
        let grid = PixelGrid::new();
        assert_eq!(grid.lit_count(), 0);
        assert!(grid.rows().iter().flatten().all(|p| p.is_off()));
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = PixelGrid::new();
        grid.set(7, 0, Rgb::new(0, 255, 0));
        assert_eq!(grid.get(7, 0), Rgb::new(0, 255, 0));
        assert_eq!(grid.lit_count(), 1);
    }

    #[test]
    fn test_set_out_of_range_ignored() {
        let mut grid = PixelGrid::new();
        grid.set(8, 0, Rgb::new(1, 2, 3));
        grid.set(0, 8, Rgb::new(1, 2, 3));
        assert_eq!(grid, PixelGrid::new());
    }

    #[test]
    fn test_rgb_bytes_row_major() {
        let mut grid = PixelGrid::new();
        grid.set(0, 1, Rgb::new(10, 20, 30));
        grid.set(1, 0, Rgb::new(40, 50, 60));

        let bytes = grid.to_rgb_bytes();
        assert_eq!(bytes.len(), GRID_RGB_BYTES);
        assert_eq!(&bytes[3..6], &[10, 20, 30]);
        assert_eq!(&bytes[24..27], &[40, 50, 60]);
    }

    #[test]
    fn test_scaled_brightness() {
        assert_eq!(Rgb::new(255, 0, 255).scaled(0.75), Rgb::new(191, 0, 191));
        assert_eq!(Rgb::new(255, 255, 255).scaled(2.0), Rgb::new(255, 255, 255));
        assert!(Rgb::new(255, 128, 1).scaled(0.0).is_off());

        let mut grid = PixelGrid::new();
        grid.set(3, 3, Rgb::new(200, 100, 0));
        assert_eq!(grid.scaled(0.5).get(3, 3), Rgb::new(100, 50, 0));
    }
}
