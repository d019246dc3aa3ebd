//! Display and gamma configuration
//!
//! Surfaces are usually described by a compact `WIDTHxHEIGHT[xDEPTH]`
//! string, and the starting gamma can be overridden with the
//! `GLYPHBLIT_GAMMA` environment variable:
//!
//! ```bash
//! GLYPHBLIT_GAMMA=2.2 ./my_app
//! GLYPHBLIT_GAMMA=0 ./my_app   # sRGB
//! ```
//!
//! # Example
//!
//! ```
//! use glyphblit_core::config::DisplaySpec;
//! use glyphblit_core::PixelMode;
//!
//! let spec: DisplaySpec = "640x480x16".parse().unwrap();
//! assert_eq!(spec.mode(), PixelMode::Rgb565);
//! ```

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::BlitError;
use crate::format::PixelMode;

/// Gamma used when nothing else is configured
pub const DEFAULT_GAMMA: f64 = 1.8;

/// Environment variable consulted by [`default_gamma`]
pub const GAMMA_ENV: &str = "GLYPHBLIT_GAMMA";

static ENV_GAMMA: OnceLock<f64> = OnceLock::new();

/// Gamma new surfaces start with.
///
/// Reads `GLYPHBLIT_GAMMA` on first call and caches the answer. Values that
/// do not parse as a finite number fall back to [`DEFAULT_GAMMA`].
pub fn default_gamma() -> f64 {
    *ENV_GAMMA.get_or_init(|| match std::env::var(GAMMA_ENV) {
        Ok(raw) => match raw.trim().parse::<f64>() {
            Ok(gamma) if gamma.is_finite() => {
                log::info!("glyphblit gamma {gamma} taken from {GAMMA_ENV}");
                gamma
            }
            _ => {
                log::warn!("ignoring unparsable {GAMMA_ENV}={raw:?}");
                DEFAULT_GAMMA
            }
        },
        Err(_) => DEFAULT_GAMMA,
    })
}

/// A gamma value as shown in status lines
///
/// Zero and negative values are the reserved sRGB setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GammaSetting(pub f64);

impl GammaSetting {
    pub fn is_srgb(self) -> bool {
        self.0 <= 0.0
    }
}

impl fmt::Display for GammaSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_srgb() {
            f.write_str("gamma: sRGB")
        } else {
            write!(f, "gamma = {:.1}", self.0)
        }
    }
}

/// Size and depth of a display surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySpec {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl DisplaySpec {
    pub const DEFAULT_DEPTH: u32 = 24;

    /// Surface mode for the configured depth; unknown depths mean 24-bit.
    pub fn mode(&self) -> PixelMode {
        match self.depth {
            8 => PixelMode::Gray,
            15 => PixelMode::Rgb555,
            16 => PixelMode::Rgb565,
            32 => PixelMode::Rgb32,
            _ => PixelMode::Rgb24,
        }
    }
}

impl FromStr for DisplaySpec {
    type Err = BlitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim().split('x').collect();
        if fields.len() < 2 || fields.len() > 3 {
            return Err(BlitError::Config(format!(
                "display must look like WIDTHxHEIGHT[xDEPTH], got {s:?}"
            )));
        }
        let number = |field: &str| {
            field
                .trim()
                .parse::<u32>()
                .map_err(|e| BlitError::Config(format!("bad display field {field:?}: {e}")))
        };
        let width = number(fields[0])?;
        let height = number(fields[1])?;
        let depth = match fields.get(2) {
            Some(field) => number(field)?,
            None => Self::DEFAULT_DEPTH,
        };
        Ok(Self {
            width,
            height,
            depth,
        })
    }
}

/// Bounds on the per-surface blend table cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendCacheConfig {
    /// Pen channel values whose blend tables are kept around
    pub table_capacity: NonZeroUsize,
}

impl BlendCacheConfig {
    pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(16) {
        Some(v) => v,
        None => unreachable!(),
    };

    /// Zero is coerced to a single table.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table_capacity: NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl Default for BlendCacheConfig {
    fn default() -> Self {
        Self {
            table_capacity: Self::DEFAULT_CAPACITY,
        }
    }
}
