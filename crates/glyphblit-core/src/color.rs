//! Canonical 24-bit color

use std::str::FromStr;

use crate::error::BlitError;

/// An RGB triple, the common currency between every target format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub const fn gray(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    /// `0x00RRGGBB`
    pub const fn to_u32(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Inverse of [`Color::to_u32`]; the top byte is ignored.
    pub const fn from_u32(value: u32) -> Self {
        Self::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}

/// Parse `#RRGGBB` (an `#RRGGBBAA` alpha byte is accepted and dropped)
impl FromStr for Color {
    type Err = BlitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| BlitError::Config(format!("color must start with '#': {s}")))?;
        if hex.len() != 6 && hex.len() != 8 {
            return Err(BlitError::Config(format!("bad color length: {s}")));
        }
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .ok_or_else(|| BlitError::Config(format!("bad color digits: {s}")))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}
