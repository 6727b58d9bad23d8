//! Colors for the SVG output: parsing and the endpoint mark palette.

use anyhow::{bail, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parse `#rgb`, `#rrggbb`, or one of a few well-known names.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim().to_ascii_lowercase();
        match trimmed.as_str() {
            "black" => return Ok(Self::new(0, 0, 0)),
            "white" => return Ok(Self::new(255, 255, 255)),
            "red" => return Ok(Self::new(220, 40, 40)),
            "green" => return Ok(Self::new(40, 160, 60)),
            "blue" => return Ok(Self::new(40, 80, 220)),
            "gray" | "grey" => return Ok(Self::new(128, 128, 128)),
            _ => {}
        }
        let Some(digits) = trimmed.strip_prefix('#') else {
            bail!("'{text}' is not a valid color; use '#rgb', '#rrggbb' or a color name");
        };
        let nibble = |c: char| c.to_digit(16).map(|v| v as u8);
        let values: Option<Vec<u8>> = digits.chars().map(nibble).collect();
        let Some(values) = values else {
            bail!("'{text}' contains invalid hex digits");
        };
        match values.as_slice() {
            [r, g, b] => Ok(Self::new(r * 17, g * 17, b * 17)),
            [r1, r2, g1, g2, b1, b2] => {
                Ok(Self::new(r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2))
            }
            _ => bail!("'{text}' must have three or six hex digits"),
        }
    }

    /// Hue in degrees, saturation and value in 0..=1.
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Self {
        let hue = hue.rem_euclid(360.0) / 60.0;
        let chroma = value * saturation;
        let x = chroma * (1.0 - (hue % 2.0 - 1.0).abs());
        let (r, g, b) = match hue as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = value - chroma;
        let to_byte = |v: f64| ((v + m) * 255.0).round() as u8;
        Self::new(to_byte(r), to_byte(g), to_byte(b))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// The mark color for one endpoint: an explicit override when configured,
/// otherwise a hue evenly spread over the number of endpoints.
pub fn endpoint_color(index: usize, total: usize, overrides: &[Color]) -> Color {
    if let Some(color) = overrides.get(index) {
        return *color;
    }
    let hue = 360.0 * index as f64 / (total + 1) as f64;
    Color::from_hsv(hue, 0.7, 0.7)
}
