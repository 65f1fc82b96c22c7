//! Color representation and CSS color string parsing
//!
//! Board definitions store tile colors as CSS strings such as
//! `rgb(255, 241, 118)` or `#bbdefb`. Only the hex and `rgb()`/`rgba()`
//! notations are understood; named colors are rejected.

use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

impl Color {
    pub const fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    pub const fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba_u8(r, g, b, 255)
    }

    pub fn r(&self) -> f32 {
        self.0
    }

    pub fn g(&self) -> f32 {
        self.1
    }

    pub fn b(&self) -> f32 {
        self.2
    }

    pub fn a(&self) -> f32 {
        self.3
    }

    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self(self.0, self.1, self.2, alpha)
    }

    pub const WHITE: Color = Color(1.0, 1.0, 1.0, 1.0);

    /// Parses a CSS color string (`#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()`).
    pub fn parse_css(input: &str) -> Result<Self, ColorParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex);
        }
        let lower = trimmed.to_ascii_lowercase();
        if let Some(body) = functional_body(&lower, "rgba") {
            return parse_rgb_components(body, true);
        }
        if let Some(body) = functional_body(&lower, "rgb") {
            return parse_rgb_components(body, false);
        }
        Err(ColorParseError::UnsupportedFormat(trimmed.to_string()))
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse_css(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    Empty,
    UnsupportedFormat(String),
    InvalidHex(String),
    ComponentCount { expected: usize, found: usize },
    InvalidComponent(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorParseError::Empty => write!(f, "empty color string"),
            ColorParseError::UnsupportedFormat(input) => {
                write!(f, "unsupported color format: {input}")
            }
            ColorParseError::InvalidHex(input) => write!(f, "invalid hex color: #{input}"),
            ColorParseError::ComponentCount { expected, found } => {
                write!(f, "expected {expected} color components, found {found}")
            }
            ColorParseError::InvalidComponent(component) => {
                write!(f, "invalid color component: {component}")
            }
        }
    }
}

impl std::error::Error for ColorParseError {}

fn functional_body<'a>(input: &'a str, name: &str) -> Option<&'a str> {
    input
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_hex(hex: &str) -> Result<Color, ColorParseError> {
    let invalid = || ColorParseError::InvalidHex(hex.to_string());
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
    };
    let short = |index: usize| channel(index..index + 1).map(|value| value * 17);
    match hex.len() {
        3 => Ok(Color::from_rgb_u8(short(0)?, short(1)?, short(2)?)),
        6 => Ok(Color::from_rgb_u8(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        8 => Ok(Color::from_rgba_u8(
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            channel(6..8)?,
        )),
        _ => Err(invalid()),
    }
}

fn parse_rgb_components(body: &str, with_alpha: bool) -> Result<Color, ColorParseError> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return Err(ColorParseError::ComponentCount {
            expected,
            found: parts.len(),
        });
    }
    let channel = |part: &str| {
        part.parse::<u8>()
            .map_err(|_| ColorParseError::InvalidComponent(part.to_string()))
    };
    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    let alpha = if with_alpha {
        let part = parts[3];
        let value = part
            .parse::<f32>()
            .map_err(|_| ColorParseError::InvalidComponent(part.to_string()))?;
        if !(0.0..=1.0).contains(&value) {
            return Err(ColorParseError::InvalidComponent(part.to_string()));
        }
        value
    } else {
        1.0
    };
    Ok(Color::from_rgb_u8(r, g, b).with_alpha(alpha))
}
