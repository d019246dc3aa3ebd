// this_file: crates/glyphblit/src/gamma.rs

//! Gamma-correct blending, paid for once per gamma change
//!
//! Coverage is a linear quantity: 50% coverage should emit half the light of
//! a solid pixel. Framebuffer values are not linear, so blending them
//! directly makes anti-aliased edges look too thin on dark backgrounds and
//! too heavy on light ones. The cache converts both ends of the blend to
//! linear light, interpolates there, and converts back.
//!
//! Two layers keep that off the per-pixel path:
//!
//! 1. A ramp from each 8-bit encoded value to linear light is rebuilt by
//!    [`GammaBlendCache::set_gamma`].
//! 2. For each pen channel value in use, a [`BlendTable`] holds the final
//!    byte for every `(coverage, existing)` pair. Tables live in an LRU and
//!    are handed out as `Arc`s, so a blit looks them up three times and then
//!    only indexes arrays.
//!
//! Gamma 1.0 is special: the tables are exact integer interpolation,
//! `existing + coverage * (pen - existing) / 255`, without a detour through
//! the ramps.

use std::fmt;
use std::sync::Arc;

use glyphblit_core::config::{BlendCacheConfig, GammaSetting, DEFAULT_GAMMA};
use glyphblit_core::Color;
use lru::LruCache;

/// Transfer function between encoded bytes and linear light
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GammaCurve {
    /// Gamma 1.0; blending is plain interpolation
    Linear,
    /// `linear = encoded ^ gamma`
    Power(f64),
    /// The piecewise sRGB curve, selected by gamma <= 0
    Srgb,
}

impl GammaCurve {
    /// Curve for a gamma value; `None` for NaN and infinities.
    pub fn from_gamma(gamma: f64) -> Option<Self> {
        if !gamma.is_finite() {
            None
        } else if gamma <= 0.0 {
            Some(GammaCurve::Srgb)
        } else if gamma == 1.0 {
            Some(GammaCurve::Linear)
        } else {
            Some(GammaCurve::Power(gamma))
        }
    }

    fn decode(self, encoded: f64) -> f64 {
        match self {
            GammaCurve::Linear => encoded,
            GammaCurve::Power(gamma) => encoded.powf(gamma),
            GammaCurve::Srgb => {
                if encoded <= 0.04045 {
                    encoded / 12.92
                } else {
                    ((encoded + 0.055) / 1.055).powf(2.4)
                }
            }
        }
    }

    fn encode(self, linear: f64) -> f64 {
        match self {
            GammaCurve::Linear => linear,
            GammaCurve::Power(gamma) => linear.powf(gamma.recip()),
            GammaCurve::Srgb => {
                if linear <= 0.003_130_8 {
                    linear * 12.92
                } else {
                    1.055 * linear.powf(1.0 / 2.4) - 0.055
                }
            }
        }
    }
}

impl fmt::Display for GammaCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let setting = match self {
            GammaCurve::Linear => GammaSetting(1.0),
            GammaCurve::Power(gamma) => GammaSetting(*gamma),
            GammaCurve::Srgb => GammaSetting(0.0),
        };
        write!(f, "{setting}")
    }
}

/// Blend results for one pen channel value
///
/// `cells[coverage << 8 | existing]` is the byte to store.
pub struct BlendTable {
    pen: u8,
    cells: Box<[u8]>,
}

impl BlendTable {
    #[inline]
    pub fn blend(&self, existing: u8, coverage: u8) -> u8 {
        self.cells[(coverage as usize) << 8 | existing as usize]
    }
}

impl fmt::Debug for BlendTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlendTable").field("pen", &self.pen).finish()
    }
}

/// The three tables a blit toward one pen color needs
#[derive(Debug, Clone)]
pub struct ChannelTables {
    pub r: Arc<BlendTable>,
    pub g: Arc<BlendTable>,
    pub b: Arc<BlendTable>,
}

impl ChannelTables {
    /// Blend each channel of `existing` with its own coverage sample.
    #[inline]
    pub fn blend(&self, existing: Color, coverage: [u8; 3]) -> Color {
        Color::rgb(
            self.r.blend(existing.r, coverage[0]),
            self.g.blend(existing.g, coverage[1]),
            self.b.blend(existing.b, coverage[2]),
        )
    }
}

/// Snapshot of table cache behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub tables: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Gamma ramps plus an LRU of per-pen-channel blend tables
pub struct GammaBlendCache {
    gamma: f64,
    curve: GammaCurve,
    to_linear: [f64; 256],
    tables: LruCache<u8, Arc<BlendTable>>,
    hits: u64,
    misses: u64,
}

impl GammaBlendCache {
    pub fn new(gamma: f64) -> Self {
        Self::with_config(gamma, BlendCacheConfig::default())
    }

    /// Build a cache; a non-finite `gamma` falls back to the default.
    pub fn with_config(gamma: f64, config: BlendCacheConfig) -> Self {
        let gamma = if gamma.is_finite() {
            gamma
        } else {
            log::warn!("non-finite gamma {gamma}, using {DEFAULT_GAMMA}");
            DEFAULT_GAMMA
        };
        let mut cache = Self {
            gamma,
            curve: GammaCurve::Linear,
            to_linear: [0.0; 256],
            tables: LruCache::new(config.table_capacity),
            hits: 0,
            misses: 0,
        };
        cache.rebuild(gamma);
        cache
    }

    /// Switch to a new gamma, discarding every table built for the old one.
    ///
    /// Values <= 0 select sRGB. NaN and infinities are ignored.
    pub fn set_gamma(&mut self, gamma: f64) {
        if !gamma.is_finite() {
            log::warn!("ignoring non-finite gamma {gamma}, keeping {}", self.curve);
            return;
        }
        self.rebuild(gamma);
    }

    fn rebuild(&mut self, gamma: f64) {
        let Some(curve) = GammaCurve::from_gamma(gamma) else {
            return;
        };
        self.gamma = gamma;
        self.curve = curve;

        for (value, slot) in self.to_linear.iter_mut().enumerate() {
            *slot = curve.decode(value as f64 / 255.0);
        }

        self.tables.clear();
        log::debug!("gamma tables rebuilt for {curve}");
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn curve(&self) -> GammaCurve {
        self.curve
    }

    /// Blend table for one pen channel value, built on first use.
    pub fn table(&mut self, pen: u8) -> Arc<BlendTable> {
        if let Some(table) = self.tables.get(&pen) {
            self.hits += 1;
            return Arc::clone(table);
        }
        self.misses += 1;
        let table = Arc::new(self.build_table(pen));
        self.tables.put(pen, Arc::clone(&table));
        table
    }

    pub fn channel_tables(&mut self, pen: Color) -> ChannelTables {
        ChannelTables {
            r: self.table(pen.r),
            g: self.table(pen.g),
            b: self.table(pen.b),
        }
    }

    /// Blend one channel: `existing` toward `pen` by `coverage / 255`.
    pub fn blend(&mut self, existing: u8, coverage: u8, pen: u8) -> u8 {
        self.table(pen).blend(existing, coverage)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            tables: self.tables.len(),
            capacity: self.tables.cap().get(),
            hits: self.hits,
            misses: self.misses,
        }
    }

    fn build_table(&self, pen: u8) -> BlendTable {
        let mut cells = vec![0u8; 256 * 256].into_boxed_slice();
        for (index, cell) in cells.iter_mut().enumerate() {
            let coverage = (index >> 8) as u8;
            let existing = (index & 0xFF) as u8;
            *cell = self.mix(existing, coverage, pen);
        }
        BlendTable { pen, cells }
    }

    fn mix(&self, existing: u8, coverage: u8, pen: u8) -> u8 {
        match coverage {
            0 => existing,
            255 => pen,
            _ if self.curve == GammaCurve::Linear => {
                let (bg, fg, a) = (existing as i32, pen as i32, coverage as i32);
                (bg + a * (fg - bg) / 255) as u8
            }
            // blending a value into itself must return it, dark values included
            _ => {
                let bg = self.to_linear[existing as usize];
                let fg = self.to_linear[pen as usize];
                let a = coverage as f64 / 255.0;
                let encoded = self.curve.encode(bg + (fg - bg) * a);
                (encoded * 255.0).round().clamp(0.0, 255.0) as u8
            }
        }
    }
}

impl fmt::Debug for GammaBlendCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GammaBlendCache")
            .field("curve", &self.curve)
            .field("stats", &self.stats())
            .finish()
    }
}
