// this_file: crates/glyphblit/src/codec.rs

//! Native pixel encodings of the five target formats
//!
//! Each target stores a [`Color`] differently. The bit formulas below are
//! part of the compatibility contract with callers that pre-render into these
//! formats, so they are spelled out exactly, including the low-bit
//! replication used when widening 5- and 6-bit fields back to 8 bits.
//!
//! Multi-byte pixels are stored in host byte order, as a framebuffer word.

use glyphblit_core::{Color, TargetFormat};

use crate::gamma::ChannelTables;

/// `((r & 0xF8) << 8) | ((g & 0xFC) << 3) | (b >> 3)`
pub const fn pack_rgb565(c: Color) -> u16 {
    ((c.r as u16) << 8 & 0xF800) | ((c.g as u16) << 3 & 0x07E0) | (c.b as u16 >> 3)
}

/// Widen a 5/6/5 word, replicating the top bits into the freed low bits.
pub const fn unpack_rgb565(p: u16) -> Color {
    let p = p as u32;
    Color::rgb(
        ((p >> 8 & 0xF8) | (p >> 13 & 0x07)) as u8,
        ((p >> 3 & 0xFC) | (p >> 9 & 0x03)) as u8,
        ((p << 3 & 0xF8) | (p >> 2 & 0x07)) as u8,
    )
}

/// 5/5/5 with the top bit unused.
pub const fn pack_rgb555(c: Color) -> u16 {
    ((c.r as u16) << 7 & 0x7C00) | ((c.g as u16) << 2 & 0x03E0) | (c.b as u16 >> 3)
}

pub const fn unpack_rgb555(p: u16) -> Color {
    let p = p as u32;
    Color::rgb(
        ((p >> 7 & 0xF8) | (p >> 12 & 0x07)) as u8,
        ((p >> 2 & 0xF8) | (p >> 7 & 0x07)) as u8,
        ((p << 3 & 0xF8) | (p >> 2 & 0x07)) as u8,
    )
}

/// Integer luma with (3, 6, 1) / 10 weights, truncating.
pub const fn luma(c: Color) -> u8 {
    ((3 * c.r as u32 + 6 * c.g as u32 + c.b as u32) / 10) as u8
}

/// Read/write/pack primitives for one framebuffer layout
///
/// `pixel` slices handed to the load/store methods start at the pixel and
/// hold at least [`TargetFormat::bytes_per_pixel`] bytes.
pub trait PixelCodec: Copy {
    /// Encode a color into the native word.
    fn pack(self, color: Color) -> u32;

    /// Decode a native word.
    fn unpack(self, value: u32) -> Color;

    /// Fetch the native word stored at `pixel`.
    fn load(self, pixel: &[u8]) -> u32;

    /// Store a native word at `pixel`.
    fn store(self, pixel: &mut [u8], value: u32);

    fn read_color(self, pixel: &[u8]) -> Color {
        self.unpack(self.load(pixel))
    }

    fn store_color(self, pixel: &mut [u8], color: Color) {
        self.store(pixel, self.pack(color));
    }

    /// Blend `existing` toward the pen per channel and store the result.
    ///
    /// Bytes come straight out of the precomputed tables; no gamma math
    /// happens here.
    fn store_blended(
        self,
        pixel: &mut [u8],
        tables: &ChannelTables,
        existing: Color,
        coverage: [u8; 3],
    ) {
        self.store_color(pixel, tables.blend(existing, coverage));
    }
}

impl PixelCodec for TargetFormat {
    fn pack(self, color: Color) -> u32 {
        match self {
            TargetFormat::Gray8 => luma(color) as u32,
            TargetFormat::Rgb32 | TargetFormat::Rgb24 => color.to_u32(),
            TargetFormat::Rgb565 => pack_rgb565(color) as u32,
            TargetFormat::Rgb555 => pack_rgb555(color) as u32,
        }
    }

    fn unpack(self, value: u32) -> Color {
        match self {
            TargetFormat::Gray8 => Color::gray(value as u8),
            TargetFormat::Rgb32 | TargetFormat::Rgb24 => Color::from_u32(value),
            TargetFormat::Rgb565 => unpack_rgb565(value as u16),
            TargetFormat::Rgb555 => unpack_rgb555(value as u16),
        }
    }

    fn load(self, pixel: &[u8]) -> u32 {
        match self {
            TargetFormat::Gray8 => pixel[0] as u32,
            TargetFormat::Rgb24 => {
                (pixel[0] as u32) << 16 | (pixel[1] as u32) << 8 | pixel[2] as u32
            }
            TargetFormat::Rgb32 => {
                u32::from_ne_bytes([pixel[0], pixel[1], pixel[2], pixel[3]]) & 0x00FF_FFFF
            }
            TargetFormat::Rgb565 | TargetFormat::Rgb555 => {
                u16::from_ne_bytes([pixel[0], pixel[1]]) as u32
            }
        }
    }

    fn store(self, pixel: &mut [u8], value: u32) {
        match self {
            TargetFormat::Gray8 => pixel[0] = value as u8,
            TargetFormat::Rgb24 => {
                pixel[0] = (value >> 16) as u8;
                pixel[1] = (value >> 8) as u8;
                pixel[2] = value as u8;
            }
            TargetFormat::Rgb32 => pixel[..4].copy_from_slice(&value.to_ne_bytes()),
            TargetFormat::Rgb565 | TargetFormat::Rgb555 => {
                pixel[..2].copy_from_slice(&(value as u16).to_ne_bytes())
            }
        }
    }
}

/// A pen color as a given target will actually store it
///
/// `channels` is the color after quantization, which is what full coverage
/// reproduces and what the blend tables are keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PenColor {
    pub format: TargetFormat,
    pub value: u32,
    pub channels: Color,
}

impl PenColor {
    pub fn new(format: TargetFormat, color: Color) -> Self {
        let value = format.pack(color);
        Self {
            format,
            value,
            channels: format.unpack(value),
        }
    }
}
