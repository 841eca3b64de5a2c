//! Colors and the fixed spiral-family palettes.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse any SVG color string (`#rgb`, `#rrggbb`, `rgb(...)`, named).
    ///
    /// Alpha is discarded; opacity is a separate rendering option.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let color = svgtypes::Color::from_str(s.trim())
            .map_err(|_| Error::InvalidColor(s.to_string()))?;
        Ok(Self::new(color.red, color.green, color.blue))
    }

    /// Const parser for `#rrggbb` literals in the palette tables.
    const fn from_hex(hex: &str) -> Self {
        let b = hex.as_bytes();
        Self::new(
            hex_byte(b[1], b[2]),
            hex_byte(b[3], b[4]),
            hex_byte(b[5], b[6]),
        )
    }
}

const fn hex_digit(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

const fn hex_byte(hi: u8, lo: u8) -> u8 {
    hex_digit(hi) * 16 + hex_digit(lo)
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Pick the palette entry for a spiral family, cycling past the end.
#[inline]
pub fn palette_color(palette: &[Rgb], family: usize) -> Rgb {
    palette[family % palette.len()]
}

/// Darken `color` toward a fixed dark offset according to its family index.
///
/// Family 0 is darkest (factor 0.4), the last family keeps the base color.
pub fn shade(color: Rgb, family: usize, total_families: usize) -> Rgb {
    let span = total_families.saturating_sub(1).max(1) as f64;
    let factor = 0.4 + 0.6 * (family as f64 / span);
    let channel = |c: u8| -> u8 {
        (c as f64 * factor + (1.0 - factor) * 40.0)
            .clamp(0.0, 255.0)
            .round() as u8
    };
    Rgb::new(channel(color.r), channel(color.g), channel(color.b))
}

macro_rules! palette {
    ($($hex:literal),* $(,)?) => {
        [$(Rgb::from_hex($hex)),*]
    };
}

/// Distinct hues for single-spiral family coloring.
pub const SPIRAL_PALETTE: [Rgb; 55] = palette![
    "#e6194b", "#3cb44b", "#4363d8", "#f58231", "#911eb4",
    "#42d4f4", "#f032e6", "#bfef45", "#fabed4", "#469990",
    "#dcbeff", "#9a6324", "#fffac8", "#800000", "#aaffc3",
    "#808000", "#ffd8b1", "#000075", "#a9a9a9", "#e6beff",
    "#1abc9c", "#e74c3c", "#2ecc71", "#3498db", "#9b59b6",
    "#f39c12", "#1abc9c", "#e67e22", "#e91e63", "#00bcd4",
    "#8bc34a", "#ff5722", "#607d8b", "#795548", "#cddc39",
    "#ff9800", "#2196f3", "#4caf50", "#9c27b0", "#00e5ff",
    "#76ff03", "#ff1744", "#651fff", "#00b0ff", "#69f0ae",
    "#ff6d00", "#d500f9", "#304ffe", "#64dd17", "#dd2c00",
    "#00bfa5", "#aa00ff", "#6200ea", "#ffd600", "#c51162",
];

/// Reds, oranges and pinks for clockwise (arm A) families.
pub const WARM_PALETTE: [Rgb; 55] = palette![
    "#e6194b", "#ff4444", "#f58231", "#ff6d00", "#e91e63",
    "#d32f2f", "#ff5722", "#ff9800", "#f44336", "#e65100",
    "#c62828", "#ff7043", "#ff8a65", "#ef5350", "#d84315",
    "#bf360c", "#e53935", "#ff5252", "#ff6e40", "#dd2c00",
    "#b71c1c", "#ff1744", "#ff3d00", "#ff9100", "#ffab00",
    "#e64a19", "#f4511e", "#ff8f00", "#ff6f00", "#e57373",
    "#ffab91", "#ffccbc", "#ff8a80", "#ea80fc", "#ce93d8",
    "#f48fb1", "#ef9a9a", "#ffcdd2", "#d50000", "#c51162",
    "#ff80ab", "#ff4081", "#f50057", "#ff1744", "#d81b60",
    "#ad1457", "#880e4f", "#e91e63", "#f06292", "#ec407a",
    "#ff5252", "#ff1744", "#d50000", "#c62828", "#b71c1c",
];

/// Blues, greens and purples for counter-clockwise (arm B) families.
pub const COOL_PALETTE: [Rgb; 55] = palette![
    "#4363d8", "#2196f3", "#00bcd4", "#009688", "#3f51b5",
    "#1565c0", "#0288d1", "#00acc1", "#00897b", "#303f9f",
    "#0d47a1", "#01579b", "#006064", "#004d40", "#1a237e",
    "#1976d2", "#0097a7", "#00796b", "#283593", "#0277bd",
    "#00838f", "#00695c", "#1b5e20", "#2e7d32", "#388e3c",
    "#43a047", "#4caf50", "#66bb6a", "#81c784", "#a5d6a7",
    "#00e5ff", "#00b0ff", "#2979ff", "#304ffe", "#651fff",
    "#6200ea", "#aa00ff", "#d500f9", "#536dfe", "#448aff",
    "#40c4ff", "#18ffff", "#64ffda", "#69f0ae", "#b2ff59",
    "#00bfa5", "#00b8d4", "#0091ea", "#2962ff", "#6200ea",
    "#304ffe", "#2979ff", "#448aff", "#00b0ff", "#0091ea",
];
