//! glyphblit core: the vocabulary shared by the blitter and its callers
//!
//! A rasterizer hands over coverage, a framebuffer receives color. This crate
//! names both sides without doing any blending itself:
//!
//! - [`PixelMode`] - every storage layout, blittable or not
//! - [`TargetFormat`] / [`SourceFormat`] - the layouts a blit accepts
//! - [`Color`] - the canonical 24-bit RGB triple
//! - [`BufferLayout`] / [`CoverageBitmap`] - signed-pitch buffer geometry
//! - [`BlitError`] / [`BlitStatus`] - how a blit reports back
//! - [`config`] - display strings, default gamma, cache bounds
//!
//! ```
//! use glyphblit_core::{CoverageBitmap, PixelMode};
//!
//! let coverage = [0u8, 128, 255, 128];
//! let glyph = CoverageBitmap::new(&coverage, 2, 2, 2, PixelMode::Gray)?;
//! assert_eq!(glyph.row(1), Some(&[255u8, 128][..]));
//! # Ok::<(), glyphblit_core::BlitError>(())
//! ```

pub mod bitmap;
pub mod color;
pub mod config;
pub mod error;
pub mod format;

pub use bitmap::{BufferLayout, CoverageBitmap};
pub use color::Color;
pub use error::{status_code, BlitError, BlitStatus, Result};
pub use format::{ChannelOrder, PixelMode, SourceFormat, TargetFormat};
