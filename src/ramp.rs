//! Temperature-to-color lookup

use crate::util::Color;
use anyhow::bail;

/// Number of entries in a ramp. Temperatures index the table directly, so
/// this also bounds the range of temperatures with a "real" color.
pub const RAMP_SIZE: usize = 128;

/// Gradient stops for the built-in ramp, as (degrees, color). Must be sorted
/// and span the whole table.
const DEFAULT_STOPS: &[(usize, Color)] = &[
    (0, Color::new(96, 0, 160)),
    (20, Color::new(0, 48, 255)),
    (40, Color::new(0, 192, 255)),
    (55, Color::new(0, 220, 80)),
    (70, Color::new(255, 220, 0)),
    (85, Color::new(255, 120, 0)),
    (100, Color::new(255, 0, 0)),
    (127, Color::new(220, 0, 96)),
];

const DEFAULT_TABLE: [Color; RAMP_SIZE] = build_table(DEFAULT_STOPS);

/// Fixed gradient table mapping a whole-degree temperature to a color. There
/// is no interpolation at lookup time; every degree has its own entry.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorRamp {
    table: [Color; RAMP_SIZE],
}

impl ColorRamp {
    /// Color for anything below the table
    pub const OUT_OF_RANGE: Color = Color::WHITE;
    /// Color for anything above the table
    pub const TOO_HOT: Color = Color::RED;

    pub fn new(table: [Color; RAMP_SIZE]) -> Self {
        Self { table }
    }

    /// Look up a temperature. Total over all integers.
    pub fn color_for(&self, degrees: i32) -> Color {
        if degrees < 0 {
            Self::OUT_OF_RANGE
        } else if degrees >= RAMP_SIZE as i32 {
            Self::TOO_HOT
        } else {
            self.table[degrees as usize]
        }
    }
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE)
    }
}

impl TryFrom<Vec<Color>> for ColorRamp {
    type Error = anyhow::Error;

    fn try_from(colors: Vec<Color>) -> Result<Self, Self::Error> {
        let len = colors.len();
        match <[Color; RAMP_SIZE]>::try_from(colors) {
            Ok(table) => Ok(Self::new(table)),
            Err(_) => bail!(
                "Color ramp must have exactly {RAMP_SIZE} entries, got {len}"
            ),
        }
    }
}

/// Linearly interpolate between gradient stops, one entry per degree
const fn build_table(stops: &[(usize, Color)]) -> [Color; RAMP_SIZE] {
    let mut table = [Color::BLACK; RAMP_SIZE];
    let mut i = 0;
    while i + 1 < stops.len() {
        let (start, from) = stops[i];
        let (end, to) = stops[i + 1];
        let mut degree = start;
        while degree <= end {
            let step = (degree - start) as i32;
            let span = (end - start) as i32;
            table[degree] = Color::new(
                lerp(from.red, to.red, step, span),
                lerp(from.green, to.green, step, span),
                lerp(from.blue, to.blue, step, span),
            );
            degree += 1;
        }
        i += 1;
    }
    table
}

const fn lerp(from: u8, to: u8, step: i32, span: i32) -> u8 {
    (from as i32 + (to as i32 - from as i32) * step / span) as u8
}
