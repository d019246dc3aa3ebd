// this_file: crates/glyphblit-core/src/bitmap.rs

//! Buffer geometry and borrowed coverage bitmaps
//!
//! Rows are `pitch` bytes apart. A negative pitch means the image is stored
//! bottom-up: row 0 lives in the *last* `|pitch|` bytes of the buffer and
//! each following row sits `|pitch|` bytes before the previous one. Written
//! as offsets, row `r` always starts at `origin + r * pitch`, where `origin`
//! is 0 for top-down buffers and `(rows - 1) * |pitch|` for bottom-up ones.
//! Everything that walks a buffer goes through [`BufferLayout`] so both
//! directions are handled by the same arithmetic.

use crate::error::{BlitError, Result};
use crate::format::PixelMode;

/// Width, height, signed pitch and pixel mode of a pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferLayout {
    width: u32,
    rows: u32,
    pitch: i32,
    mode: PixelMode,
}

impl BufferLayout {
    /// Validate a layout.
    ///
    /// A non-empty layout needs `|pitch|` to hold at least one row of pixels.
    pub fn new(width: u32, rows: u32, pitch: i32, mode: PixelMode) -> Result<Self> {
        let row_bytes = mode.row_bytes(width).ok_or_else(|| {
            BlitError::bad_argument(format!("{width} pixels of {mode:?} overflow a row"))
        })?;
        if rows > 0 && (pitch.unsigned_abs() as usize) < row_bytes {
            return Err(BlitError::bad_argument(format!(
                "pitch {pitch} is shorter than a {row_bytes}-byte row"
            )));
        }
        let layout = Self {
            width,
            rows,
            pitch,
            mode,
        };
        layout.checked_len().ok_or_else(|| {
            BlitError::bad_argument(format!("{rows} rows of pitch {pitch} overflow"))
        })?;
        Ok(layout)
    }

    /// Tightly packed top-down layout.
    pub fn packed(width: u32, rows: u32, mode: PixelMode) -> Result<Self> {
        let pitch = Self::packed_pitch(width, rows, mode)?;
        Self::new(width, rows, pitch, mode)
    }

    /// Tightly packed bottom-up layout.
    pub fn packed_bottom_up(width: u32, rows: u32, mode: PixelMode) -> Result<Self> {
        let pitch = Self::packed_pitch(width, rows, mode)?;
        Self::new(width, rows, -pitch, mode)
    }

    fn packed_pitch(width: u32, rows: u32, mode: PixelMode) -> Result<i32> {
        mode.row_bytes(width)
            .and_then(|bytes| i32::try_from(bytes).ok())
            .ok_or(BlitError::InvalidDimensions {
                width,
                height: rows,
            })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn pitch(&self) -> i32 {
        self.pitch
    }

    pub fn mode(&self) -> PixelMode {
        self.mode
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.rows == 0
    }

    /// Bytes of one row that actually hold pixels.
    pub fn row_bytes(&self) -> usize {
        // validated in `new`
        self.mode.row_bytes(self.width).unwrap_or(0)
    }

    fn checked_len(&self) -> Option<usize> {
        if self.rows == 0 {
            return Some(0);
        }
        (self.rows as usize - 1)
            .checked_mul(self.pitch.unsigned_abs() as usize)?
            .checked_add(self.row_bytes())
    }

    /// Smallest buffer that can back this layout.
    pub fn required_len(&self) -> usize {
        self.checked_len().unwrap_or(usize::MAX)
    }

    /// Offset of row 0, wherever the storage direction puts it.
    pub fn origin(&self) -> usize {
        if self.pitch < 0 && self.rows > 0 {
            (self.rows as usize - 1) * self.pitch.unsigned_abs() as usize
        } else {
            0
        }
    }

    /// Byte offset where logical row `row` starts.
    pub fn row_offset(&self, row: u32) -> usize {
        debug_assert!(row < self.rows);
        let step = self.pitch.unsigned_abs() as usize * row as usize;
        if self.pitch < 0 {
            self.origin() - step
        } else {
            step
        }
    }

    /// Ensure `len` bytes are enough for this layout.
    pub fn check_buffer(&self, len: usize) -> Result<()> {
        let required = self.required_len();
        if len < required {
            return Err(BlitError::bad_argument(format!(
                "buffer holds {len} bytes, layout needs {required}"
            )));
        }
        Ok(())
    }
}

/// A read-only glyph coverage image
///
/// Borrowed from whoever rasterized it; the blitter never keeps it past a
/// single call.
#[derive(Debug, Clone, Copy)]
pub struct CoverageBitmap<'a> {
    buffer: &'a [u8],
    layout: BufferLayout,
    grays: u32,
}

impl<'a> CoverageBitmap<'a> {
    /// Wrap a coverage buffer with 256 coverage levels.
    pub fn new(
        buffer: &'a [u8],
        width: u32,
        rows: u32,
        pitch: i32,
        mode: PixelMode,
    ) -> Result<Self> {
        let layout = BufferLayout::new(width, rows, pitch, mode)?;
        Self::from_layout(buffer, layout)
    }

    pub fn from_layout(buffer: &'a [u8], layout: BufferLayout) -> Result<Self> {
        layout.check_buffer(buffer.len())?;
        Ok(Self {
            buffer,
            layout,
            grays: 256,
        })
    }

    /// Override the declared number of coverage levels.
    ///
    /// Only 256 is accepted by the blitter; other counts are kept so the
    /// rejection happens at blit time like any other format mismatch.
    pub fn with_grays(mut self, grays: u32) -> Self {
        self.grays = grays;
        self
    }

    pub fn buffer(&self) -> &'a [u8] {
        self.buffer
    }

    pub fn layout(&self) -> &BufferLayout {
        &self.layout
    }

    pub fn width(&self) -> u32 {
        self.layout.width()
    }

    pub fn rows(&self) -> u32 {
        self.layout.rows()
    }

    pub fn pitch(&self) -> i32 {
        self.layout.pitch()
    }

    pub fn mode(&self) -> PixelMode {
        self.layout.mode()
    }

    pub fn grays(&self) -> u32 {
        self.grays
    }

    /// The pixel bytes of logical row `row`.
    pub fn row(&self, row: u32) -> Option<&'a [u8]> {
        if row >= self.layout.rows() {
            return None;
        }
        let start = self.layout.row_offset(row);
        self.buffer.get(start..start + self.layout.row_bytes())
    }
}
