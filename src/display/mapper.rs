//! # Display Mapper
//!
//! Turns a [`TelemetryState`] into the pixel grid shown on the matrix.
//!
//! ## Layout
//!
//! ```text
//!     col 0 1 2 3 4 5 6 7
//! row 0   . > > > > > > >     rev bar, top row
//! row 1   ^ ^ . . . . . .     rev bar, diagonal step
//! row 2   ^ . G G G G G G
//! ...     ^ . G G G G G G     gear glyph, rows 2..=7, cols 2..=7
//! row 7   ^ . G G G G G G
//! ```
//!
//! The rev bar starts at the bottom of column 0, climbs to row 1, steps
//! across to column 1 and runs along the top row. It lights a number of
//! cells proportional to `rpm / rpm_max`, all in one color picked from
//! fixed bands:
//!
//! | RPM ratio    | Color  |
//! |--------------|--------|
//! | < 0.60       | green  |
//! | 0.60 - 0.85  | yellow |
//! | 0.85 - 0.95  | red    |
//! | >= 0.95      | blue (shift now) |

use super::font::Glyph;
use super::grid::{PixelGrid, Rgb};
use crate::telemetry::TelemetryState;

pub const GREEN: Rgb = Rgb::new(0, 255, 0);
pub const YELLOW: Rgb = Rgb::new(255, 191, 0);
pub const RED: Rgb = Rgb::new(255, 0, 0);
pub const SHIFT_BLUE: Rgb = Rgb::new(0, 0, 255);

/// Gear glyph color
pub const GEAR_COLOR: Rgb = Rgb::new(255, 0, 255);

/// Ratio at which the bar turns yellow
pub const YELLOW_THRESHOLD: f32 = 0.60;

/// Ratio at which the bar turns red
pub const RED_THRESHOLD: f32 = 0.85;

/// Ratio at which the bar shows the shift color
pub const SHIFT_THRESHOLD: f32 = 0.95;

/// Rev bar cells as `(row, col)`, in fill order
pub const RPM_PATH: [(usize, usize); 15] = [
    (7, 0),
    (6, 0),
    (5, 0),
    (4, 0),
    (3, 0),
    (2, 0),
    (1, 0),
    (1, 1),
    (0, 1),
    (0, 2),
    (0, 3),
    (0, 4),
    (0, 5),
    (0, 6),
    (0, 7),
];

/// Renders gear and RPM into a fresh grid.
///
/// Pure: the same state always yields the same grid.
///
/// # Examples
///
/// ```
/// use rev_matrix::display::mapper::render;
/// use rev_matrix::telemetry::TelemetryState;
///
/// let state = TelemetryState { gear: 3, rpm: 6500, rpm_max: 8000, ..Default::default() };
/// assert_eq!(render(&state), render(&state));
/// ```
#[must_use]
pub fn render(state: &TelemetryState) -> PixelGrid {
    let mut grid = PixelGrid::new();
    draw_gear(&mut grid, Glyph::for_gear(state.gear));
    draw_rev_bar(&mut grid, state.rpm_ratio());
    grid
}

/// Bar color for an RPM ratio.
#[must_use]
pub fn rpm_color(ratio: f32) -> Rgb {
    let ratio = ratio.clamp(0.0, 1.0);
    if ratio >= SHIFT_THRESHOLD {
        SHIFT_BLUE
    } else if ratio >= RED_THRESHOLD {
        RED
    } else if ratio >= YELLOW_THRESHOLD {
        YELLOW
    } else {
        GREEN
    }
}

/// Number of bar cells lit for an RPM ratio.
#[must_use]
pub fn lit_cells(ratio: f32) -> usize {
    let ratio = ratio.clamp(0.0, 1.0);
    (ratio * RPM_PATH.len() as f32).round() as usize
}

fn draw_rev_bar(grid: &mut PixelGrid, ratio: f32) {
    let color = rpm_color(ratio);
    for &(row, col) in RPM_PATH.iter().take(lit_cells(ratio)) {
        grid.set(row, col, color);
    }
}

fn draw_gear(grid: &mut PixelGrid, glyph: Glyph) {
    for row in 0..8 {
        for col in 0..8 {
            if glyph.covers(row, col) {
                grid.set(row, col, GEAR_COLOR);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::font::GLYPH_TOP_ROW;

    fn state(gear: i8, rpm: u16, rpm_max: u16) -> TelemetryState {
        TelemetryState {
            gear,
            rpm,
            rpm_max,
            ..TelemetryState::default()
        }
    }

    fn bar_pixels(grid: &PixelGrid) -> Vec<Rgb> {
        RPM_PATH.iter().map(|&(row, col)| grid.get(row, col)).collect()
    }

    fn glyph_pixels(grid: &PixelGrid) -> Vec<Rgb> {
        (GLYPH_TOP_ROW..8)
            .flat_map(|row| (2..8).map(move |col| (row, col)))
            .map(|(row, col)| grid.get(row, col))
            .collect()
    }

    #[test]
    fn test_render_deterministic() {
        let s = state(3, 6500, 8000);
        assert_eq!(render(&s), render(&s));
    }

    #[test]
    fn test_ratio_clamped_above_max() {
        let at_max = render(&state(4, 8000, 8000));
        let over_max = render(&state(4, 16000, 8000));
        assert_eq!(at_max, over_max);
        assert!(bar_pixels(&over_max).iter().all(|&p| p == SHIFT_BLUE));
    }

    #[test]
    fn test_color_bands() {
        assert_eq!(rpm_color(0.0), GREEN);
        assert_eq!(rpm_color(0.59), GREEN);
        assert_eq!(rpm_color(0.60), YELLOW);
        assert_eq!(rpm_color(0.84), YELLOW);
        assert_eq!(rpm_color(0.85), RED);
        assert_eq!(rpm_color(0.94), RED);
        assert_eq!(rpm_color(0.95), SHIFT_BLUE);
        assert_eq!(rpm_color(1.0), SHIFT_BLUE);
        assert_eq!(rpm_color(7.5), SHIFT_BLUE);
        assert_eq!(rpm_color(-1.0), GREEN);
    }

    #[test]
    fn test_lit_cells() {
        assert_eq!(lit_cells(0.0), 0);
        assert_eq!(lit_cells(0.5), 8); // 7.5 rounds up
        assert_eq!(lit_cells(1.0), RPM_PATH.len());
        assert_eq!(lit_cells(3.0), RPM_PATH.len());
    }

    #[test]
    fn test_bar_fill_is_contiguous() {
        // 6500 / 8000 = 0.8125 -> 12 cells, yellow
        let grid = render(&state(3, 6500, 8000));
        let bar = bar_pixels(&grid);

        assert!(bar[..12].iter().all(|&p| p == YELLOW));
        assert!(bar[12..].iter().all(|p| p.is_off()));
    }

    #[test]
    fn test_zero_rpm_leaves_bar_dark() {
        let grid = render(&state(2, 0, 8000));
        assert!(bar_pixels(&grid).iter().all(|p| p.is_off()));
    }

    #[test]
    fn test_bar_and_glyph_do_not_overlap() {
        for &(row, col) in RPM_PATH.iter() {
            assert!(row < GLYPH_TOP_ROW || col < 2, "bar cell ({}, {}) in glyph region", row, col);
        }
    }

    #[test]
    fn test_gear_glyph_boundaries() {
        let reverse = render(&state(-1, 0, 8000));
        let neutral = render(&state(0, 0, 8000));
        let unknown = render(&state(99, 0, 8000));
        let third = render(&state(3, 0, 8000));

        assert_eq!(glyph_pixels(&reverse), glyph_of(Glyph::Reverse));
        assert_eq!(glyph_pixels(&neutral), glyph_of(Glyph::Neutral));
        assert_eq!(glyph_pixels(&unknown), glyph_of(Glyph::Unknown));
        assert_eq!(glyph_pixels(&third), glyph_of(Glyph::Forward(3)));
        assert_ne!(reverse, neutral);
        assert_ne!(neutral, unknown);
    }

    #[test]
    fn test_negative_out_of_range_gear() {
        let grid = render(&state(-5, 0, 8000));
        assert_eq!(glyph_pixels(&grid), glyph_of(Glyph::Unknown));
    }

    #[test]
    fn test_only_expected_colors() {
        let grid = render(&state(7, 7000, 8000)); // 0.875, red band
        for pixel in grid.rows().iter().flatten() {
            assert!(
                pixel.is_off() || *pixel == GEAR_COLOR || *pixel == RED,
                "unexpected color {:?}",
                pixel
            );
        }
    }

    fn glyph_of(glyph: Glyph) -> Vec<Rgb> {
        (GLYPH_TOP_ROW..8)
            .flat_map(|row| (2..8).map(move |col| (row, col)))
            .map(|(row, col)| if glyph.covers(row, col) { GEAR_COLOR } else { Rgb::default() })
            .collect()
    }
}
