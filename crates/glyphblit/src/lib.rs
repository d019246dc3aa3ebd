//! glyphblit: anti-aliased glyph coverage onto native framebuffers
//!
//! A blit takes a coverage bitmap from a rasterizer and a pen color, and
//! blends the pen into a [`Surface`] through that surface's gamma tables.
//!
//! ```text
//! CoverageBitmap + Surface
//!     → BlitDescriptor::build   (formats, dispatch, clipping)
//!     → BlitRunner::run         (row kernels, GammaBlendCache lookups)
//! ```
//!
//! Five target layouts and six coverage layouts are supported; the pairing
//! goes through a [`DispatchTable`] that callers can restrict.
//!
//! ```
//! use glyphblit::{blit_glyph, set_target_gamma, BlitStatus, Color, CoverageBitmap, PixelMode, Surface};
//!
//! let mut surface = Surface::new(16, 16, PixelMode::Rgb24)?;
//! set_target_gamma(&mut surface, 1.0);
//!
//! let coverage = [255u8, 128, 0, 255];
//! let glyph = CoverageBitmap::new(&coverage, 2, 2, 2, PixelMode::Gray)?;
//! let status = blit_glyph(&mut surface, &glyph, 3, 4, Color::white())?;
//!
//! assert_eq!(status, BlitStatus::Drawn);
//! assert_eq!(surface.pixel(3, 4), Some(Color::white()));
//! assert_eq!(surface.pixel(4, 4), Some(Color::gray(128)));
//! # Ok::<(), glyphblit::BlitError>(())
//! ```

pub mod codec;
pub mod descriptor;
pub mod dispatch;
pub mod gamma;
pub mod runner;
pub mod spans;
pub mod surface;

pub use codec::{PenColor, PixelCodec};
pub use descriptor::{BlitDescriptor, Placement};
pub use dispatch::{DispatchTable, Kernel};
pub use gamma::{CacheStats, GammaBlendCache, GammaCurve};
pub use glyphblit_core::config::{BlendCacheConfig, DisplaySpec, GammaSetting};
pub use glyphblit_core::{
    status_code, BlitError, BlitStatus, BufferLayout, ChannelOrder, Color, CoverageBitmap,
    PixelMode, Result, SourceFormat, TargetFormat,
};
pub use runner::BlitRunner;
pub use spans::Span;
pub use surface::{PenBrush, Surface};

/// Blits through a chosen dispatch table
#[derive(Debug, Clone, Default)]
pub struct Blitter {
    table: DispatchTable,
}

impl Blitter {
    pub fn new(table: DispatchTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &DispatchTable {
        &self.table
    }

    /// Draw `glyph` with its top-left corner at `(x, y)` in `color`.
    ///
    /// Nothing is written unless the result is [`BlitStatus::Drawn`].
    pub fn blit(
        &self,
        surface: &mut Surface,
        glyph: &CoverageBitmap<'_>,
        x: i32,
        y: i32,
        color: Color,
    ) -> Result<BlitStatus> {
        if glyph.width() == 0 || glyph.rows() == 0 {
            return Ok(BlitStatus::NothingToDraw);
        }

        let (buffer, layout, cache) = surface.parts_mut();
        let placement = BlitDescriptor::build(&self.table, layout, glyph, x, y).map_err(|err| {
            log::warn!("glyph blit rejected: {err}");
            err
        })?;
        let desc = match placement {
            Placement::Blit(desc) => desc,
            Placement::NothingToDraw => {
                log::trace!("glyph at ({x}, {y}) is entirely clipped");
                return Ok(BlitStatus::NothingToDraw);
            }
        };
        log::trace!(
            "{} <- {}: {}x{} from ({}, {}) to ({}, {})",
            desc.target,
            desc.source,
            desc.width,
            desc.height,
            desc.src_x,
            desc.src_y,
            desc.dst_x,
            desc.dst_y
        );

        let pen = PenColor::new(desc.target, color);
        BlitRunner::new(desc, glyph.buffer(), buffer).run(&pen, cache);
        Ok(BlitStatus::Drawn)
    }
}

/// Switch the gamma used by later blits on `surface`.
///
/// Gamma <= 0 selects the sRGB curve.
pub fn set_target_gamma(surface: &mut Surface, gamma: f64) {
    surface.set_gamma(gamma);
}

/// Set where span drawing starts and the color it uses.
pub fn set_pen_brush(surface: &mut Surface, x: i32, y: i32, color: Color) {
    surface.set_pen_brush(x, y, color);
}

/// Blit with every supported format pair enabled.
pub fn blit_glyph(
    surface: &mut Surface,
    glyph: &CoverageBitmap<'_>,
    x: i32,
    y: i32,
    color: Color,
) -> Result<BlitStatus> {
    Blitter::default().blit(surface, glyph, x, y, color)
}
