//! Color tokens used by the backdrop gradient.
//!
//! Tokens keep the syntax they were written in (`#69c4cf` stays hex,
//! `hsl(200, 60%, 70%)` stays HSL) so a host can display them back to the
//! user unchanged. The compositor only ever asks for [`ColorToken::to_rgb`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when parsing a color token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The token is neither `#rgb`, `#rrggbb` nor `hsl(...)`.
    #[error("Unrecognized color token: {0}")]
    Unrecognized(String),

    /// A hex digit or numeric component could not be parsed.
    #[error("Invalid color component in {0}")]
    InvalidComponent(String),
}

/// An opaque 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as floats in 0.0..=1.0.
    #[inline]
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

/// A user-facing color value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColorToken {
    /// `#rrggbb` (or the `#rgb` shorthand when parsed).
    Hex(Rgb),
    /// `hsl(hue, saturation%, lightness%)`, hue in degrees, the others in percent.
    Hsl {
        hue: f32,
        saturation: f32,
        lightness: f32,
    },
}

impl ColorToken {
    pub const fn hex(r: u8, g: u8, b: u8) -> Self {
        ColorToken::Hex(Rgb::new(r, g, b))
    }

    pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        ColorToken::Hsl {
            hue,
            saturation,
            lightness,
        }
    }

    /// Resolve the token to an sRGB color.
    pub fn to_rgb(self) -> Rgb {
        match self {
            ColorToken::Hex(rgb) => rgb,
            ColorToken::Hsl {
                hue,
                saturation,
                lightness,
            } => hsl_to_rgb(hue, saturation / 100.0, lightness / 100.0),
        }
    }
}

/// Convert HSL (hue in degrees, saturation/lightness in 0-1) to sRGB.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> Rgb {
    let h = hue.rem_euclid(360.0) / 60.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let m = l - chroma / 2.0;

    let (r1, g1, b1) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let to_u8 = |v: f32| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgb::new(to_u8(r1), to_u8(g1), to_u8(b1))
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorToken::Hex(Rgb { r, g, b }) => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
            ColorToken::Hsl {
                hue,
                saturation,
                lightness,
            } => write!(f, "hsl({}, {}%, {}%)", hue, saturation, lightness),
        }
    }
}

impl FromStr for ColorToken {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if let Some(digits) = token.strip_prefix('#') {
            return parse_hex(digits)
                .ok_or_else(|| ColorParseError::InvalidComponent(s.to_string()));
        }

        let lower = token.to_ascii_lowercase();
        if let Some(body) = lower
            .strip_prefix("hsl(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_hsl(body).ok_or_else(|| ColorParseError::InvalidComponent(s.to_string()));
        }

        Err(ColorParseError::Unrecognized(s.to_string()))
    }
}

fn parse_hex(digits: &str) -> Option<ColorToken> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        3 => {
            let mut channels = [0u8; 3];
            for (i, c) in digits.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                channels[i] = v * 17;
            }
            Some(ColorToken::hex(channels[0], channels[1], channels[2]))
        }
        6 => {
            let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
            Some(ColorToken::hex(channel(0)?, channel(2)?, channel(4)?))
        }
        _ => None,
    }
}

fn parse_hsl(body: &str) -> Option<ColorToken> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return None;
    }

    let hue: f32 = parts[0].trim_end_matches("deg").trim().parse().ok()?;
    let saturation: f32 = parts[1].strip_suffix('%')?.trim().parse().ok()?;
    let lightness: f32 = parts[2].strip_suffix('%')?.trim().parse().ok()?;

    if !(hue.is_finite() && saturation.is_finite() && lightness.is_finite()) {
        return None;
    }
    Some(ColorToken::hsl(hue, saturation, lightness))
}

impl TryFrom<String> for ColorToken {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColorToken> for String {
    fn from(value: ColorToken) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_long() {
        let token: ColorToken = "#69c4cf".parse().unwrap();
        assert_eq!(token.to_rgb(), Rgb::new(0x69, 0xc4, 0xcf));
    }

    #[test]
    fn test_parse_hex_short() {
        let token: ColorToken = "#fa0".parse().unwrap();
        assert_eq!(token.to_rgb(), Rgb::new(0xff, 0xaa, 0x00));
    }

    #[test]
    fn test_parse_hex_rejects_bad_digits() {
        assert!(matches!(
            "#12345g".parse::<ColorToken>(),
            Err(ColorParseError::InvalidComponent(_))
        ));
        assert!("#1234".parse::<ColorToken>().is_err());
    }

    #[test]
    fn test_parse_hsl() {
        let token: ColorToken = "hsl(120, 100%, 50%)".parse().unwrap();
        assert_eq!(token, ColorToken::hsl(120.0, 100.0, 50.0));
        assert_eq!(token.to_rgb(), Rgb::new(0, 255, 0));
    }

    #[test]
    fn test_parse_unknown() {
        assert!(matches!(
            "rebeccapurple".parse::<ColorToken>(),
            Err(ColorParseError::Unrecognized(_))
        ));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for text in ["#69c4cf", "hsl(200, 75%, 60%)"] {
            let token: ColorToken = text.parse().unwrap();
            assert_eq!(token.to_string(), text);
        }
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), Rgb::new(255, 0, 0));
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), Rgb::new(0, 0, 255));
        assert_eq!(hsl_to_rgb(360.0, 1.0, 0.5), Rgb::new(255, 0, 0));
        assert_eq!(hsl_to_rgb(90.0, 0.0, 1.0), Rgb::new(255, 255, 255));
        assert_eq!(hsl_to_rgb(90.0, 0.0, 0.5), Rgb::new(128, 128, 128));
    }

    #[test]
    fn test_serde_uses_token_text() {
        let token = ColorToken::hex(0xf8, 0xf9, 0xfa);
        let text: String = token.into();
        assert_eq!(text, "#f8f9fa");
        assert_eq!(ColorToken::try_from(text).unwrap(), token);
    }
}
