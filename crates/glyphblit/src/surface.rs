// this_file: crates/glyphblit/src/surface.rs

//! Owned framebuffers
//!
//! A [`Surface`] is the destination of every blit: pixel storage, its
//! geometry, the gamma cache blits on it use, and the pen brush that span
//! drawing starts from.

use glyphblit_core::config::{default_gamma, BlendCacheConfig, DisplaySpec};
use glyphblit_core::{BlitError, BufferLayout, Color, PixelMode, Result, TargetFormat};

use crate::codec::{PenColor, PixelCodec};
use crate::gamma::GammaBlendCache;

/// Where span drawing starts and with what color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PenBrush {
    pub x: i32,
    pub y: i32,
    /// Byte offset of pixel `(x, y - 1)`, may lie outside the buffer
    pub origin: isize,
    pub pen: PenColor,
}

impl PenBrush {
    pub fn bytes_per_pixel(&self) -> usize {
        self.pen.format.bytes_per_pixel()
    }
}

/// A framebuffer with its own gamma tables
#[derive(Debug)]
pub struct Surface {
    buffer: Vec<u8>,
    layout: BufferLayout,
    gamma: GammaBlendCache,
    brush: Option<PenBrush>,
}

impl Surface {
    /// Zeroed top-down surface.
    pub fn new(width: u32, height: u32, mode: PixelMode) -> Result<Self> {
        let layout = BufferLayout::packed(width, height, mode)
            .map_err(|_| BlitError::InvalidDimensions { width, height })?;
        Ok(Self::with_layout(vec![0; layout.required_len()], layout))
    }

    /// Zeroed surface stored last row first.
    pub fn bottom_up(width: u32, height: u32, mode: PixelMode) -> Result<Self> {
        let layout = BufferLayout::packed_bottom_up(width, height, mode)
            .map_err(|_| BlitError::InvalidDimensions { width, height })?;
        Ok(Self::with_layout(vec![0; layout.required_len()], layout))
    }

    /// Wrap existing pixels; `buffer` must cover `height` rows of `pitch`.
    pub fn from_raw(
        buffer: Vec<u8>,
        width: u32,
        height: u32,
        pitch: i32,
        mode: PixelMode,
    ) -> Result<Self> {
        let layout = BufferLayout::new(width, height, pitch, mode)?;
        layout.check_buffer(buffer.len())?;
        Ok(Self::with_layout(buffer, layout))
    }

    pub fn from_display_spec(spec: &DisplaySpec) -> Result<Self> {
        Self::new(spec.width, spec.height, spec.mode())
    }

    fn with_layout(buffer: Vec<u8>, layout: BufferLayout) -> Self {
        Self {
            buffer,
            layout,
            gamma: GammaBlendCache::new(default_gamma()),
            brush: None,
        }
    }

    /// Replace the gamma cache with one bounded by `config`, keeping the gamma.
    pub fn with_cache_config(mut self, config: BlendCacheConfig) -> Self {
        self.gamma = GammaBlendCache::with_config(self.gamma.gamma(), config);
        self
    }

    pub fn width(&self) -> u32 {
        self.layout.width()
    }

    pub fn height(&self) -> u32 {
        self.layout.rows()
    }

    pub fn pitch(&self) -> i32 {
        self.layout.pitch()
    }

    pub fn mode(&self) -> PixelMode {
        self.layout.mode()
    }

    pub fn layout(&self) -> &BufferLayout {
        &self.layout
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    pub fn gamma_cache(&self) -> &GammaBlendCache {
        &self.gamma
    }

    /// The surface mode as a blit target, if it is one.
    pub fn target_format(&self) -> Result<TargetFormat> {
        TargetFormat::try_from(self.layout.mode())
    }

    /// Rebuild the gamma tables; later blits use the new curve.
    pub fn set_gamma(&mut self, gamma: f64) {
        self.gamma.set_gamma(gamma);
    }

    /// Anchor span drawing at `(x, y)` with `color`.
    ///
    /// Surfaces that are not blit targets get no brush, which leaves span
    /// drawing disabled until a brush is set on a supported surface.
    pub fn set_pen_brush(&mut self, x: i32, y: i32, color: Color) {
        let format = match self.target_format() {
            Ok(format) => format,
            Err(err) => {
                log::warn!("pen brush disabled: {err}");
                self.brush = None;
                return;
            }
        };
        let origin = self.layout.origin() as isize
            + (y as isize - 1) * self.layout.pitch() as isize
            + x as isize * format.bytes_per_pixel() as isize;
        let brush = PenBrush {
            x,
            y,
            origin,
            pen: PenColor::new(format, color),
        };
        log::debug!("pen brush at ({x}, {y}), origin {origin}, {format}");
        self.brush = Some(brush);
    }

    pub fn brush(&self) -> Option<&PenBrush> {
        self.brush.as_ref()
    }

    /// Byte offset of pixel `(x, y)`.
    fn offset(&self, x: u32, y: u32, format: TargetFormat) -> usize {
        self.layout.row_offset(y) + x as usize * format.bytes_per_pixel()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let format = self.target_format().ok()?;
        let at = self.offset(x, y, format);
        Some(format.read_color(&self.buffer[at..]))
    }

    /// Paint a rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) -> Result<()> {
        let format = self.target_format()?;
        let x0 = i64::from(x).clamp(0, self.width().into());
        let y0 = i64::from(y).clamp(0, self.height().into());
        let x1 = (i64::from(x) + i64::from(width)).clamp(0, self.width().into());
        let y1 = (i64::from(y) + i64::from(height)).clamp(0, self.height().into());
        if x0 >= x1 || y0 >= y1 {
            return Ok(());
        }

        let value = format.pack(color);
        let bpp = format.bytes_per_pixel();
        for row in y0 as u32..y1 as u32 {
            let start = self.offset(x0 as u32, row, format);
            let end = start + (x1 - x0) as usize * bpp;
            for pixel in self.buffer[start..end].chunks_exact_mut(bpp) {
                format.store(pixel, value);
            }
        }
        Ok(())
    }

    pub fn clear(&mut self, color: Color) -> Result<()> {
        self.fill_rect(0, 0, self.width(), self.height(), color)
    }

    /// Split borrows for a blit.
    pub(crate) fn parts_mut(&mut self) -> (&mut [u8], &BufferLayout, &mut GammaBlendCache) {
        (&mut self.buffer, &self.layout, &mut self.gamma)
    }
}
