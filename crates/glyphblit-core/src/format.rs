// this_file: crates/glyphblit-core/src/format.rs

//! Pixel modes and the two format families the blitter accepts
//!
//! A [`PixelMode`] describes how any bitmap stores its pixels. Only some
//! modes can take part in a blit: five of them as a destination
//! ([`TargetFormat`]) and six as a coverage source ([`SourceFormat`]).
//! Conversion is fallible so a bitmap in any other mode is still a
//! perfectly good value, it just cannot be drawn with.

use std::fmt;

use crate::error::BlitError;

/// Every storage layout known to the graphics layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelMode {
    None,
    /// 1 bit per pixel, MSB first
    Mono,
    /// 4-bit palette index
    Pal4,
    /// 8-bit palette index
    Pal8,
    /// 8-bit gray levels
    Gray,
    /// 2-bit gray levels
    Gray2,
    /// 4-bit gray levels
    Gray4,
    /// 15-bit color, 5/5/5 with one padding bit
    Rgb555,
    /// 16-bit color, 5/6/5
    Rgb565,
    /// 24-bit color, one byte per channel
    Rgb24,
    /// 32-bit color packed in a host word, top byte unused
    Rgb32,
    /// Horizontal sub-pixel coverage, R G B order
    Lcd,
    /// Vertical sub-pixel coverage, R G B order
    Lcdv,
    /// Horizontal sub-pixel coverage, B G R order
    Lcd2,
    /// Vertical sub-pixel coverage, B G R order
    Lcdv2,
    /// Premultiplied 32-bit color, B G R A byte order
    Bgra,
}

impl PixelMode {
    /// Minimum number of bytes one row of `width` pixels occupies.
    ///
    /// For the sub-pixel modes `width` counts coverage samples, not visual
    /// pixels, matching how rasterizers report those bitmaps.
    pub fn row_bytes(self, width: u32) -> Option<usize> {
        let width = width as usize;
        match self {
            PixelMode::None => Some(0),
            PixelMode::Mono => Some(width.div_ceil(8)),
            PixelMode::Pal4 | PixelMode::Gray4 => Some(width.div_ceil(2)),
            PixelMode::Gray2 => Some(width.div_ceil(4)),
            PixelMode::Pal8
            | PixelMode::Gray
            | PixelMode::Lcd
            | PixelMode::Lcdv
            | PixelMode::Lcd2
            | PixelMode::Lcdv2 => Some(width),
            PixelMode::Rgb555 | PixelMode::Rgb565 => width.checked_mul(2),
            PixelMode::Rgb24 => width.checked_mul(3),
            PixelMode::Rgb32 | PixelMode::Bgra => width.checked_mul(4),
        }
    }

    /// Whole bytes per pixel, `None` for packed sub-byte modes.
    pub const fn bytes_per_pixel(self) -> Option<usize> {
        match self {
            PixelMode::Pal8
            | PixelMode::Gray
            | PixelMode::Lcd
            | PixelMode::Lcdv
            | PixelMode::Lcd2
            | PixelMode::Lcdv2 => Some(1),
            PixelMode::Rgb555 | PixelMode::Rgb565 => Some(2),
            PixelMode::Rgb24 => Some(3),
            PixelMode::Rgb32 | PixelMode::Bgra => Some(4),
            PixelMode::None
            | PixelMode::Mono
            | PixelMode::Pal4
            | PixelMode::Gray2
            | PixelMode::Gray4 => None,
        }
    }
}

/// Framebuffer layouts a glyph can be blitted onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetFormat {
    Gray8,
    Rgb32,
    Rgb24,
    Rgb565,
    Rgb555,
}

impl TargetFormat {
    pub const COUNT: usize = 5;

    pub const ALL: [TargetFormat; Self::COUNT] = [
        TargetFormat::Gray8,
        TargetFormat::Rgb32,
        TargetFormat::Rgb24,
        TargetFormat::Rgb565,
        TargetFormat::Rgb555,
    ];

    /// Row of this format in the dispatch matrix
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            TargetFormat::Gray8 => 1,
            TargetFormat::Rgb565 | TargetFormat::Rgb555 => 2,
            TargetFormat::Rgb24 => 3,
            TargetFormat::Rgb32 => 4,
        }
    }

    pub const fn pixel_mode(self) -> PixelMode {
        match self {
            TargetFormat::Gray8 => PixelMode::Gray,
            TargetFormat::Rgb32 => PixelMode::Rgb32,
            TargetFormat::Rgb24 => PixelMode::Rgb24,
            TargetFormat::Rgb565 => PixelMode::Rgb565,
            TargetFormat::Rgb555 => PixelMode::Rgb555,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            TargetFormat::Gray8 => "gray8",
            TargetFormat::Rgb32 => "rgb32",
            TargetFormat::Rgb24 => "rgb24",
            TargetFormat::Rgb565 => "rgb565",
            TargetFormat::Rgb555 => "rgb555",
        }
    }
}

impl TryFrom<PixelMode> for TargetFormat {
    type Error = BlitError;

    fn try_from(mode: PixelMode) -> Result<Self, Self::Error> {
        match mode {
            PixelMode::Gray => Ok(TargetFormat::Gray8),
            PixelMode::Rgb32 => Ok(TargetFormat::Rgb32),
            PixelMode::Rgb24 => Ok(TargetFormat::Rgb24),
            PixelMode::Rgb565 => Ok(TargetFormat::Rgb565),
            PixelMode::Rgb555 => Ok(TargetFormat::Rgb555),
            other => Err(BlitError::unsupported(format!(
                "{other:?} is not a blit target"
            ))),
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Order of the three coverage samples of a sub-pixel bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelOrder {
    Rgb,
    Bgr,
}

/// Coverage layouts a glyph bitmap can arrive in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Gray8,
    HorizontalRgb,
    VerticalRgb,
    HorizontalBgr,
    VerticalBgr,
    Bgra,
}

impl SourceFormat {
    pub const COUNT: usize = 6;

    pub const ALL: [SourceFormat; Self::COUNT] = [
        SourceFormat::Gray8,
        SourceFormat::HorizontalRgb,
        SourceFormat::VerticalRgb,
        SourceFormat::HorizontalBgr,
        SourceFormat::VerticalBgr,
        SourceFormat::Bgra,
    ];

    /// Column of this format in the dispatch matrix
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Coverage samples stacked side by side per visual pixel
    pub const fn horizontal_samples(self) -> u32 {
        match self {
            SourceFormat::HorizontalRgb | SourceFormat::HorizontalBgr => 3,
            _ => 1,
        }
    }

    /// Coverage rows stacked per visual row
    pub const fn vertical_samples(self) -> u32 {
        match self {
            SourceFormat::VerticalRgb | SourceFormat::VerticalBgr => 3,
            _ => 1,
        }
    }

    /// Bytes one visual pixel spans within a source row
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            SourceFormat::HorizontalRgb | SourceFormat::HorizontalBgr => 3,
            SourceFormat::Bgra => 4,
            _ => 1,
        }
    }

    pub const fn channel_order(self) -> Option<ChannelOrder> {
        match self {
            SourceFormat::HorizontalRgb | SourceFormat::VerticalRgb => Some(ChannelOrder::Rgb),
            SourceFormat::HorizontalBgr | SourceFormat::VerticalBgr => Some(ChannelOrder::Bgr),
            SourceFormat::Gray8 | SourceFormat::Bgra => None,
        }
    }

    pub const fn pixel_mode(self) -> PixelMode {
        match self {
            SourceFormat::Gray8 => PixelMode::Gray,
            SourceFormat::HorizontalRgb => PixelMode::Lcd,
            SourceFormat::VerticalRgb => PixelMode::Lcdv,
            SourceFormat::HorizontalBgr => PixelMode::Lcd2,
            SourceFormat::VerticalBgr => PixelMode::Lcdv2,
            SourceFormat::Bgra => PixelMode::Bgra,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            SourceFormat::Gray8 => "gray8",
            SourceFormat::HorizontalRgb => "hrgb",
            SourceFormat::VerticalRgb => "vrgb",
            SourceFormat::HorizontalBgr => "hbgr",
            SourceFormat::VerticalBgr => "vbgr",
            SourceFormat::Bgra => "bgra",
        }
    }
}

impl TryFrom<PixelMode> for SourceFormat {
    type Error = BlitError;

    fn try_from(mode: PixelMode) -> Result<Self, Self::Error> {
        match mode {
            PixelMode::Gray => Ok(SourceFormat::Gray8),
            PixelMode::Lcd => Ok(SourceFormat::HorizontalRgb),
            PixelMode::Lcdv => Ok(SourceFormat::VerticalRgb),
            PixelMode::Lcd2 => Ok(SourceFormat::HorizontalBgr),
            PixelMode::Lcdv2 => Ok(SourceFormat::VerticalBgr),
            PixelMode::Bgra => Ok(SourceFormat::Bgra),
            other => Err(BlitError::unsupported(format!(
                "{other:?} is not a coverage source"
            ))),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
