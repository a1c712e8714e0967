use crate::constants::INITIAL_COLOR_HEX;
use crate::error::{KineticError, Result};
use std::fmt;
use std::str::FromStr;

/// Display colour of the particle cloud in sRGB bytes.
///
/// The engine never interprets it; it is passed through to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for Rgb {
    fn default() -> Self {
        // #4f46e5
        Self::new(0x4f, 0x46, 0xe5)
    }
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb`; the leading `#` is optional.
    pub fn from_hex(input: &str) -> Result<Self> {
        let invalid = || KineticError::InvalidColor(input.to_string());
        let hex = input.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map_err(|_| invalid());
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?)),
            3 => Ok(Self::new(nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17)),
            _ => Err(invalid()),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Normalized sRGB components in \[0, 1\].
    pub fn to_srgb_f32(self) -> [f32; 3] {
        [self.r, self.g, self.b].map(|c| c as f32 / 255.0)
    }

    /// Linear-light components, for sRGB render targets.
    pub fn to_linear(self) -> [f32; 3] {
        self.to_srgb_f32().map(srgb_to_linear)
    }
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = KineticError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

/// Colour used before the user picks one.
pub fn initial_color() -> Rgb {
    Rgb::from_hex(INITIAL_COLOR_HEX).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_forms() {
        assert_eq!(Rgb::from_hex("#4f46e5"), Ok(Rgb::new(0x4f, 0x46, 0xe5)));
        assert_eq!(Rgb::from_hex("4F46E5"), Ok(Rgb::new(0x4f, 0x46, 0xe5)));
        assert_eq!(Rgb::from_hex("#fa0"), Ok(Rgb::new(0xff, 0xaa, 0x00)));
        assert_eq!(" #000000 ".parse::<Rgb>(), Ok(Rgb::new(0, 0, 0)));
    }

    #[test]
    fn rejects_malformed_colours() {
        for bad in ["", "#", "#12345", "#gg0000", "#1234567", "#ééé", "red"] {
            assert_eq!(
                Rgb::from_hex(bad),
                Err(KineticError::InvalidColor(bad.to_string())),
                "{bad}"
            );
        }
    }

    #[test]
    fn hex_round_trips_and_default_is_indigo() {
        assert_eq!(Rgb::default().to_hex(), INITIAL_COLOR_HEX);
        assert_eq!(initial_color(), Rgb::default());
        assert_eq!(Rgb::new(1, 2, 255).to_string(), "#0102ff");
    }

    #[test]
    fn linear_conversion_keeps_endpoints() {
        assert_eq!(Rgb::new(0, 0, 0).to_linear(), [0.0; 3]);
        let white = Rgb::new(255, 255, 255).to_linear();
        assert!(white.iter().all(|c| (c - 1.0).abs() < 1e-6));
        let mid = Rgb::new(128, 128, 128).to_linear()[0];
        assert!(mid > 0.2 && mid < 0.23, "{mid}");
    }
}
