//! # Gear Font
//!
//! Bitmaps for the gear indicator. Every glyph covers rows 2..=7 of the
//! matrix. Each row byte maps bit 7 to column 0, so glyphs only ever set
//! the low six bits (columns 2..=7).
//!
//! Single digits sit in columns 4..=7. Gears 10 and up add a tens bar in
//! column 2 to the left of the units digit.

/// First matrix row used by glyphs
pub const GLYPH_TOP_ROW: usize = 2;

/// Glyph height in rows
pub const GLYPH_ROWS: usize = 6;

/// Columns glyphs may light (columns 2..=7)
pub const GLYPH_COLUMN_MASK: u8 = 0b0011_1111;

/// Highest forward gear with a glyph
pub const MAX_FORWARD_GEAR: i8 = 14;

/// Glyph bitmap, one byte per row
pub type GlyphRows = [u8; GLYPH_ROWS];

/// Digits 0-9
const DIGITS: [GlyphRows; 10] = [
    [0b0110, 0b1001, 0b1001, 0b1001, 0b1001, 0b0110],
    [0b0010, 0b0110, 0b0010, 0b0010, 0b0010, 0b1111],
    [0b0110, 0b1001, 0b0001, 0b0010, 0b0100, 0b1111],
    [0b0110, 0b1001, 0b0010, 0b0001, 0b1001, 0b0110],
    [0b0010, 0b0110, 0b1010, 0b1111, 0b0010, 0b0010],
    [0b1111, 0b1000, 0b1110, 0b0001, 0b1001, 0b0110],
    [0b0110, 0b1000, 0b1110, 0b1001, 0b1001, 0b0110],
    [0b1111, 0b0001, 0b0010, 0b0100, 0b0100, 0b0100],
    [0b0110, 0b1001, 0b0110, 0b1001, 0b1001, 0b0110],
    [0b0110, 0b1001, 0b1001, 0b0111, 0b0001, 0b0110],
];

const NEUTRAL: GlyphRows = [
    0b10_0001, 0b11_0001, 0b10_1001, 0b10_0101, 0b10_0011, 0b10_0001,
];

const REVERSE: GlyphRows = [
    0b11_1100, 0b10_0010, 0b11_1100, 0b10_1000, 0b10_0100, 0b10_0010,
];

const UNKNOWN: GlyphRows = [0b0110, 0b1001, 0b0001, 0b0010, 0b0000, 0b0010];

/// Column 2 lit on every row
const TENS_BAR: u8 = 0b10_0000;

/// What the gear indicator shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// `N`
    Neutral,
    /// `R`
    Reverse,
    /// Forward gear 1..=14
    Forward(u8),
    /// `?` for gear values with no glyph
    Unknown,
}

impl Glyph {
    /// Picks the glyph for a gear value.
    ///
    /// # Examples
    ///
    /// ```
    /// use rev_matrix::display::font::Glyph;
    ///
    /// assert_eq!(Glyph::for_gear(-1), Glyph::Reverse);
    /// assert_eq!(Glyph::for_gear(0), Glyph::Neutral);
    /// assert_eq!(Glyph::for_gear(4), Glyph::Forward(4));
    /// assert_eq!(Glyph::for_gear(99), Glyph::Unknown);
    /// ```
    pub fn for_gear(gear: i8) -> Self {
        match gear {
            -1 => Glyph::Reverse,
            0 => Glyph::Neutral,
            1..=MAX_FORWARD_GEAR => Glyph::Forward(gear as u8),
            _ => Glyph::Unknown,
        }
    }

    /// Row bitmaps for this glyph.
    pub fn rows(self) -> GlyphRows {
        match self {
            Glyph::Neutral => NEUTRAL,
            Glyph::Reverse => REVERSE,
            Glyph::Forward(gear) if gear < 10 => DIGITS[usize::from(gear)],
            Glyph::Forward(gear) if i16::from(gear) <= i16::from(MAX_FORWARD_GEAR) => {
                DIGITS[usize::from(gear % 10)].map(|row| row | TENS_BAR)
            }
            Glyph::Forward(_) | Glyph::Unknown => UNKNOWN,
        }
    }

    /// True if the glyph lights `(row, col)` of the matrix.
    pub fn covers(self, row: usize, col: usize) -> bool {
        if !(GLYPH_TOP_ROW..GLYPH_TOP_ROW + GLYPH_ROWS).contains(&row) || col > 7 {
            return false;
        }
        self.rows()[row - GLYPH_TOP_ROW] & (0x80 >> col) != 0
    }
}
