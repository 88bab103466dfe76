use anyhow::anyhow;
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// 24-bit Red-Green-Blue color. Serializes/deserializes as HTML format
/// (#rrggbb), so color tables can be written by hand in the config.
#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const RED: Self = Self::new(255, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub fn to_bytes(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// Alpha-composite `src` over `self`. An alpha of 255 replaces the color
    /// outright, 0 leaves it untouched.
    pub fn blend(self, src: Self, alpha: u8) -> Self {
        Self {
            red: blend_channel(self.red, src.red, alpha),
            green: blend_channel(self.green, src.green, alpha),
            blue: blend_channel(self.blue, src.blue, alpha),
        }
    }

    /// Additive composite, clamped per channel
    pub fn saturating_add(self, other: Self) -> Self {
        Self {
            red: self.red.saturating_add(other.red),
            green: self.green.saturating_add(other.green),
            blue: self.blue.saturating_add(other.blue),
        }
    }

    /// This color drawn over black at the given alpha
    pub fn scale(self, alpha: u8) -> Self {
        Self::BLACK.blend(self, alpha)
    }
}

fn blend_channel(dst: u8, src: u8, alpha: u8) -> u8 {
    let alpha = alpha as u32;
    // Rounded integer lerp, so results never depend on float behavior
    ((src as u32 * alpha + dst as u32 * (255 - alpha) + 127) / 255) as u8
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        // Casting will truncate the 24 most significant bits
        let red = (value >> 16) as u8;
        let green = (value >> 8) as u8;
        let blue = value as u8;
        Self { red, green, blue }
    }
}

impl From<Rgb888> for Color {
    fn from(color: Rgb888) -> Self {
        Self::new(color.r(), color.g(), color.b())
    }
}

impl From<Color> for Rgb888 {
    fn from(color: Color) -> Self {
        Rgb888::new(color.red, color.green, color.blue)
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 7 && s.starts_with('#') {
            let value = u32::from_str_radix(&s[1..], 16)?;
            Ok(value.into())
        } else {
            Err(anyhow!("Invalid color string: {}", s))
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:0>2x}{:0>2x}{:0>2x}", self.red, self.green, self.blue)
    }
}

// These impls are needed for serde
impl TryFrom<String> for Color {
    type Error = <Color as FromStr>::Err;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display() {
        let color: Color = "#ff8000".parse().unwrap();
        assert_eq!(color, Color::new(255, 128, 0));
        assert_eq!(color.to_string(), "#ff8000");
        assert!("ff8000".parse::<Color>().is_err());
        assert!("#ff80".parse::<Color>().is_err());
    }

    #[test]
    fn test_blend() {
        let base = Color::new(200, 100, 0);
        assert_eq!(base.blend(Color::WHITE, 255), Color::WHITE);
        assert_eq!(base.blend(Color::WHITE, 0), base);
        assert_eq!(Color::WHITE.scale(128), Color::new(128, 128, 128));
        assert_eq!(base.scale(128), Color::new(100, 50, 0));
    }

    #[test]
    fn test_saturating_add() {
        let sum = Color::new(200, 10, 0).saturating_add(Color::new(100, 10, 0));
        assert_eq!(sum, Color::new(255, 20, 0));
    }
}
