//! Error types for glyphblit
//!
//! Every blit either draws, finds nothing to draw, or fails. Only the last
//! case is an error; [`BlitStatus`] carries the two successful outcomes.
//!
//! Failures are deterministic functions of the input. Geometry and format
//! problems are detected before any pixel is touched, so an `Err` always
//! means the destination buffer is unchanged.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BlitError>;

/// Main error type for glyphblit
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlitError {
    /// Buffer geometry that cannot describe a valid image
    #[error("Invalid argument: {reason}")]
    BadArgument {
        /// What was wrong with the argument.
        reason: String,
    },

    /// Pixel mode, level count, or format pair the blitter cannot handle
    #[error("Unsupported format: {reason}")]
    UnsupportedFormat {
        /// Which format check rejected the call.
        reason: String,
    },

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BlitError {
    /// Create a new bad-argument error
    ///
    /// ```
    /// # use glyphblit_core::BlitError;
    /// let err = BlitError::bad_argument("pitch smaller than a row");
    /// assert_eq!(err.to_string(), "Invalid argument: pitch smaller than a row");
    /// ```
    pub fn bad_argument(reason: impl Into<String>) -> Self {
        Self::BadArgument {
            reason: reason.into(),
        }
    }

    /// Create a new unsupported-format error
    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            reason: reason.into(),
        }
    }

    /// Legacy integer status for a failed call.
    pub const fn code(&self) -> i32 {
        -1
    }
}

/// Successful outcome of a blit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlitStatus {
    /// At least one destination pixel was visited by a kernel.
    Drawn,
    /// Empty glyph or fully clipped placement. Nothing was written.
    NothingToDraw,
}

impl BlitStatus {
    /// Legacy integer status: positive when drawn, zero when empty.
    pub const fn code(self) -> i32 {
        match self {
            BlitStatus::Drawn => 1,
            BlitStatus::NothingToDraw => 0,
        }
    }
}

/// Fold a blit result into the legacy `>0 / 0 / <0` convention.
pub fn status_code(result: &Result<BlitStatus>) -> i32 {
    match result {
        Ok(status) => status.code(),
        Err(err) => err.code(),
    }
}
