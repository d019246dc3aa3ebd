//! Which blend kernel handles a (target, source) pair
//!
//! The table is a plain 5 x 6 matrix. Rows are target formats, columns are
//! source formats, and an empty cell means the pair is unsupported. Callers
//! that only want something to run can use [`DispatchTable::resolve`], which
//! turns an empty cell into [`Kernel::Dummy`]; the blitter itself uses
//! [`DispatchTable::get`] so it can report the pair as unsupported before
//! touching any pixels.

use glyphblit_core::{ChannelOrder, SourceFormat, TargetFormat};

/// A per-row blend routine
///
/// The target side is handled by the codec of the destination format, so a
/// kernel only names how coverage is read from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kernel {
    /// Writes nothing
    Dummy,
    /// One coverage byte per pixel, applied to all three channels
    Gray,
    /// Three side-by-side samples per pixel
    HorizontalLcd(ChannelOrder),
    /// Three stacked sample rows per pixel row
    VerticalLcd(ChannelOrder),
    /// Premultiplied color composited with its own alpha
    Bgra,
}

impl Kernel {
    /// The kernel that reads `source` bitmaps.
    pub const fn for_source(source: SourceFormat) -> Kernel {
        match source.channel_order() {
            Some(order) if source.vertical_samples() > 1 => Kernel::VerticalLcd(order),
            Some(order) => Kernel::HorizontalLcd(order),
            None if matches!(source, SourceFormat::Bgra) => Kernel::Bgra,
            None => Kernel::Gray,
        }
    }

    /// Whether the kernel blends through the gamma tables.
    pub const fn uses_gamma(self) -> bool {
        matches!(
            self,
            Kernel::Gray | Kernel::HorizontalLcd(_) | Kernel::VerticalLcd(_)
        )
    }
}

/// Fixed kernel matrix keyed by (target, source)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchTable {
    entries: [[Option<Kernel>; SourceFormat::COUNT]; TargetFormat::COUNT],
}

impl DispatchTable {
    /// A table with no supported pairs.
    pub const fn empty() -> Self {
        Self {
            entries: [[None; SourceFormat::COUNT]; TargetFormat::COUNT],
        }
    }

    /// Every target paired with every source.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        for target in TargetFormat::ALL {
            for source in SourceFormat::ALL {
                table = table.with(target, source, Kernel::for_source(source));
            }
        }
        table
    }

    pub fn with(mut self, target: TargetFormat, source: SourceFormat, kernel: Kernel) -> Self {
        self.entries[target.index()][source.index()] = Some(kernel);
        self
    }

    /// Drop a pair so blits between those formats are rejected.
    pub fn without(mut self, target: TargetFormat, source: SourceFormat) -> Self {
        self.entries[target.index()][source.index()] = None;
        self
    }

    pub fn get(&self, target: TargetFormat, source: SourceFormat) -> Option<Kernel> {
        self.entries[target.index()][source.index()]
    }

    /// Like [`DispatchTable::get`], with the dummy standing in for a gap.
    pub fn resolve(&self, target: TargetFormat, source: SourceFormat) -> Kernel {
        self.get(target, source).unwrap_or(Kernel::Dummy)
    }

    pub fn supports(&self, target: TargetFormat, source: SourceFormat) -> bool {
        self.get(target, source).is_some()
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::standard()
    }
}
