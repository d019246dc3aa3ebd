// this_file: crates/glyphblit/src/descriptor.rs

//! Clipped blit geometry
//!
//! [`BlitDescriptor::build`] does every check a blit needs before any pixel
//! is written: level count, format tags, dispatch lookup, clipping. What it
//! returns is enough for the runner to walk both buffers with nothing but
//! additions; all bounds reasoning happens here, once per call.

use glyphblit_core::{
    BlitError, BufferLayout, CoverageBitmap, Result, SourceFormat, TargetFormat,
};

use crate::dispatch::{DispatchTable, Kernel};

/// Coverage levels a bitmap must declare to be blitted
pub const COVERAGE_LEVELS: u32 = 256;

/// Geometry of one blit, already clipped to both buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlitDescriptor {
    pub source: SourceFormat,
    pub target: TargetFormat,
    pub kernel: Kernel,
    /// Visual pixels per row to draw
    pub width: usize,
    /// Visual rows to draw
    pub height: usize,
    /// First visual source pixel drawn
    pub src_x: usize,
    pub src_y: usize,
    /// First destination pixel written
    pub dst_x: usize,
    pub dst_y: usize,
    /// Byte offset of the first drawn source sample
    pub src_line: usize,
    /// Signed distance between stored source rows
    pub src_pitch: isize,
    /// Signed distance between visual source rows
    pub src_step: isize,
    /// Byte offset of the first written destination pixel
    pub dst_line: usize,
    /// Signed distance between destination rows
    pub dst_step: isize,
}

/// Outcome of preparing a blit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Blit(BlitDescriptor),
    /// The glyph lies entirely outside the target
    NothingToDraw,
}

/// Clip one axis: `(source start, extent, destination start)`.
fn clip_axis(mut dst: i64, mut extent: i64, limit: i64) -> (i64, i64, i64) {
    let mut src = 0;
    if dst < 0 {
        extent += dst;
        src -= dst;
        dst = 0;
    }
    let overflow = dst + extent - limit;
    if overflow > 0 {
        extent -= overflow;
    }
    (src, extent, dst)
}

impl BlitDescriptor {
    /// Validate formats and clip `glyph` placed at `(dst_x, dst_y)` on a
    /// buffer laid out as `target`.
    pub fn build(
        table: &DispatchTable,
        target: &BufferLayout,
        glyph: &CoverageBitmap<'_>,
        dst_x: i32,
        dst_y: i32,
    ) -> Result<Placement> {
        if glyph.grays() != COVERAGE_LEVELS {
            return Err(BlitError::unsupported(format!(
                "coverage bitmaps need {COVERAGE_LEVELS} levels, got {}",
                glyph.grays()
            )));
        }
        let source = SourceFormat::try_from(glyph.mode())?;
        let target_format = TargetFormat::try_from(target.mode())?;
        let kernel = table.get(target_format, source).ok_or_else(|| {
            BlitError::unsupported(format!("no kernel for {target_format} <- {source}"))
        })?;

        let src_layout = glyph.layout();
        let samples_x = source.horizontal_samples();
        let samples_y = source.vertical_samples();

        let (src_x, width, dst_x) = clip_axis(
            dst_x.into(),
            (src_layout.width() / samples_x).into(),
            target.width().into(),
        );
        let (src_y, height, dst_y) = clip_axis(
            dst_y.into(),
            (src_layout.rows() / samples_y).into(),
            target.rows().into(),
        );
        if width <= 0 || height <= 0 {
            return Ok(Placement::NothingToDraw);
        }

        // all four are non-negative and inside their buffers after clipping
        let (src_x, src_y) = (src_x as u32, src_y as u32);
        let (dst_x, dst_y) = (dst_x as u32, dst_y as u32);

        let src_pitch = src_layout.pitch() as isize;
        let src_line = src_layout.row_offset(src_y * samples_y)
            + src_x as usize * source.bytes_per_pixel();
        let dst_line =
            target.row_offset(dst_y) + dst_x as usize * target_format.bytes_per_pixel();

        Ok(Placement::Blit(BlitDescriptor {
            source,
            target: target_format,
            kernel,
            width: width as usize,
            height: height as usize,
            src_x: src_x as usize,
            src_y: src_y as usize,
            dst_x: dst_x as usize,
            dst_y: dst_y as usize,
            src_line,
            src_pitch,
            src_step: src_pitch * samples_y as isize,
            dst_line,
            dst_step: target.pitch() as isize,
        }))
    }

    /// Bytes of one source row the kernel reads
    pub fn src_row_bytes(&self) -> usize {
        self.width * self.source.bytes_per_pixel()
    }

    /// Bytes of one destination row the kernel writes
    pub fn dst_row_bytes(&self) -> usize {
        self.width * self.target.bytes_per_pixel()
    }
}
