// this_file: crates/glyphblit/src/runner.rs

//! Row-by-row execution of a prepared blit

use glyphblit_core::{ChannelOrder, Color, TargetFormat};

use crate::codec::{PenColor, PixelCodec};
use crate::descriptor::BlitDescriptor;
use crate::dispatch::Kernel;
use crate::gamma::{ChannelTables, GammaBlendCache};

/// Offset of row `row` when rows start at `base` and are `step` bytes apart.
#[inline]
fn line(base: usize, step: isize, row: usize) -> usize {
    (base as isize + step * row as isize) as usize
}

/// Walks the source and destination rows of one descriptor
pub struct BlitRunner<'a> {
    desc: BlitDescriptor,
    src: &'a [u8],
    dst: &'a mut [u8],
}

impl<'a> BlitRunner<'a> {
    /// `src` and `dst` must be the buffers the descriptor was built for.
    pub fn new(desc: BlitDescriptor, src: &'a [u8], dst: &'a mut [u8]) -> Self {
        Self { desc, src, dst }
    }

    /// Blend every row with `pen`.
    pub fn run(&mut self, pen: &PenColor, cache: &mut GammaBlendCache) {
        let desc = self.desc;
        if desc.kernel == Kernel::Dummy {
            return;
        }
        // BGRA never looks at the pen, so skip building its tables
        let tables = desc
            .kernel
            .uses_gamma()
            .then(|| cache.channel_tables(pen.channels));

        let src_bytes = desc.src_row_bytes();
        let dst_bytes = desc.dst_row_bytes();
        for row in 0..desc.height {
            let src_at = line(desc.src_line, desc.src_step, row);
            let dst_at = line(desc.dst_line, desc.dst_step, row);
            let dst = &mut self.dst[dst_at..dst_at + dst_bytes];

            match (desc.kernel, &tables) {
                (Kernel::Gray, Some(tables)) => {
                    gray_row(desc.target, pen, tables, &self.src[src_at..src_at + src_bytes], dst)
                }
                (Kernel::HorizontalLcd(order), Some(tables)) => hlcd_row(
                    desc.target,
                    order,
                    pen,
                    tables,
                    &self.src[src_at..src_at + src_bytes],
                    dst,
                ),
                (Kernel::VerticalLcd(order), Some(tables)) => {
                    let rows = [0, 1, 2].map(|k| {
                        let at = line(src_at, desc.src_pitch, k);
                        &self.src[at..at + src_bytes]
                    });
                    vlcd_row(desc.target, order, pen, tables, rows, dst)
                }
                (Kernel::Bgra, _) => {
                    bgra_row(desc.target, &self.src[src_at..src_at + src_bytes], dst)
                }
                _ => {}
            }
        }
    }
}

/// Store one pixel given its three coverage samples.
#[inline]
pub(crate) fn blend_pixel(
    target: TargetFormat,
    pen: &PenColor,
    tables: &ChannelTables,
    pixel: &mut [u8],
    coverage: [u8; 3],
) {
    match coverage {
        [0, 0, 0] => {}
        [255, 255, 255] => target.store(pixel, pen.value),
        _ => {
            let existing = target.read_color(pixel);
            target.store_blended(pixel, tables, existing, coverage);
        }
    }
}

#[inline]
fn ordered(order: ChannelOrder, a: u8, b: u8, c: u8) -> [u8; 3] {
    match order {
        ChannelOrder::Rgb => [a, b, c],
        ChannelOrder::Bgr => [c, b, a],
    }
}

/// One coverage byte per pixel.
fn gray_row(
    target: TargetFormat,
    pen: &PenColor,
    tables: &ChannelTables,
    src: &[u8],
    dst: &mut [u8],
) {
    let bpp = target.bytes_per_pixel();
    for (&a, pixel) in src.iter().zip(dst.chunks_exact_mut(bpp)) {
        blend_pixel(target, pen, tables, pixel, [a; 3]);
    }
}

fn hlcd_row(
    target: TargetFormat,
    order: ChannelOrder,
    pen: &PenColor,
    tables: &ChannelTables,
    src: &[u8],
    dst: &mut [u8],
) {
    let bpp = target.bytes_per_pixel();
    for (s, pixel) in src.chunks_exact(3).zip(dst.chunks_exact_mut(bpp)) {
        blend_pixel(target, pen, tables, pixel, ordered(order, s[0], s[1], s[2]));
    }
}

fn vlcd_row(
    target: TargetFormat,
    order: ChannelOrder,
    pen: &PenColor,
    tables: &ChannelTables,
    src: [&[u8]; 3],
    dst: &mut [u8],
) {
    let bpp = target.bytes_per_pixel();
    for (x, pixel) in dst.chunks_exact_mut(bpp).enumerate() {
        let coverage = ordered(order, src[0][x], src[1][x], src[2][x]);
        blend_pixel(target, pen, tables, pixel, coverage);
    }
}

/// Premultiplied color over the existing pixel: `out = src + dst * (255 - a) / 255`.
fn bgra_row(target: TargetFormat, src: &[u8], dst: &mut [u8]) {
    let bpp = target.bytes_per_pixel();
    for (s, pixel) in src.chunks_exact(4).zip(dst.chunks_exact_mut(bpp)) {
        let (b, g, r, a) = (s[0], s[1], s[2], s[3]);
        match a {
            0 => {}
            255 => target.store_color(pixel, Color::rgb(r, g, b)),
            _ => {
                let keep = 255 - a as u32;
                let over = |fg: u8, bg: u8| (fg as u32 + bg as u32 * keep / 255).min(255) as u8;
                let bg = target.read_color(pixel);
                target.store_color(pixel, Color::rgb(over(r, bg.r), over(g, bg.g), over(b, bg.b)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Placement;
    use crate::dispatch::DispatchTable;
    use glyphblit_core::{BufferLayout, CoverageBitmap, PixelMode};

    fn run(
        target: TargetFormat,
        canvas: &mut [u8],
        glyph: &CoverageBitmap<'_>,
        pen: Color,
        gamma: f64,
    ) {
        let layout = BufferLayout::packed(4, 2, target.pixel_mode()).unwrap();
        let Placement::Blit(desc) =
            BlitDescriptor::build(&DispatchTable::standard(), &layout, glyph, 0, 0).unwrap()
        else {
            panic!("glyph should be visible");
        };
        let mut cache = GammaBlendCache::new(gamma);
        BlitRunner::new(desc, glyph.buffer(), canvas).run(&PenColor::new(target, pen), &mut cache);
    }

    #[test]
    fn gray_row_applies_coverage() {
        let coverage = [0u8, 255, 128, 0, 0, 0, 0, 0];
        let glyph = CoverageBitmap::new(&coverage, 4, 2, 4, PixelMode::Gray).unwrap();
        let mut canvas = [10u8; 8];
        run(TargetFormat::Gray8, &mut canvas, &glyph, Color::white(), 1.0);
        // 10 + 128 * 245 / 255, truncated
        assert_eq!(canvas, [10, 255, 132, 10, 10, 10, 10, 10]);
    }

    #[test]
    fn horizontal_bgr_swaps_samples() {
        let coverage = [255u8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let glyph = CoverageBitmap::new(&coverage, 6, 2, 6, PixelMode::Lcd2).unwrap();
        let layout = BufferLayout::packed(2, 2, PixelMode::Rgb24).unwrap();
        let mut canvas = vec![0u8; layout.required_len()];
        let Placement::Blit(desc) =
            BlitDescriptor::build(&DispatchTable::standard(), &layout, &glyph, 0, 0).unwrap()
        else {
            panic!("glyph should be visible");
        };
        let mut cache = GammaBlendCache::new(1.0);
        let pen = PenColor::new(TargetFormat::Rgb24, Color::white());
        BlitRunner::new(desc, glyph.buffer(), &mut canvas).run(&pen, &mut cache);
        // first sample of a BGR triple covers blue
        assert_eq!(&canvas[..3], &[0, 0, 255]);
    }

    #[test]
    fn vertical_rows_feed_separate_channels() {
        // 1 pixel wide, 3 sample rows: full red, nothing, full blue
        let coverage = [255u8, 0, 255];
        let glyph = CoverageBitmap::new(&coverage, 1, 3, 1, PixelMode::Lcdv).unwrap();
        let layout = BufferLayout::packed(1, 1, PixelMode::Rgb24).unwrap();
        let mut canvas = [0u8; 3];
        let Placement::Blit(desc) =
            BlitDescriptor::build(&DispatchTable::standard(), &layout, &glyph, 0, 0).unwrap()
        else {
            panic!("glyph should be visible");
        };
        let mut cache = GammaBlendCache::new(1.0);
        let pen = PenColor::new(TargetFormat::Rgb24, Color::white());
        BlitRunner::new(desc, glyph.buffer(), &mut canvas).run(&pen, &mut cache);
        assert_eq!(canvas, [255, 0, 255]);
    }

    #[test]
    fn bgra_composites_premultiplied_color() {
        let pixels = [
            10u8, 20, 30, 255, // opaque
            0, 0, 0, 0, // transparent
            0, 0, 64, 128, // half red over grey
            0, 0, 0, 0,
        ];
        let glyph = CoverageBitmap::new(&pixels, 2, 2, 8, PixelMode::Bgra).unwrap();
        let layout = BufferLayout::packed(2, 2, PixelMode::Rgb24).unwrap();
        let mut canvas = [100u8; 12];
        let Placement::Blit(desc) =
            BlitDescriptor::build(&DispatchTable::standard(), &layout, &glyph, 0, 0).unwrap()
        else {
            panic!("glyph should be visible");
        };
        let mut cache = GammaBlendCache::new(1.0);
        let pen = PenColor::new(TargetFormat::Rgb24, Color::black());
        BlitRunner::new(desc, glyph.buffer(), &mut canvas).run(&pen, &mut cache);
        assert_eq!(&canvas[..3], &[30, 20, 10]);
        assert_eq!(&canvas[3..6], &[100, 100, 100]);
        let kept = (100 * 127 / 255) as u8;
        assert_eq!(&canvas[6..9], &[64 + kept, kept, kept]);
        // BGRA blits never need blend tables
        assert_eq!(cache.stats().misses, 0);
    }

    #[test]
    fn gray_on_rgb565_stores_quantized_pen() {
        let coverage = [255u8, 255, 255, 255, 0, 0, 0, 0];
        let glyph = CoverageBitmap::new(&coverage, 4, 2, 4, PixelMode::Gray).unwrap();
        let mut canvas = [0u8; 16];
        run(TargetFormat::Rgb565, &mut canvas, &glyph, Color::rgb(255, 0, 128), 1.8);
        for pixel in canvas[..8].chunks_exact(2) {
            assert_eq!(u16::from_ne_bytes([pixel[0], pixel[1]]), 0xF810);
        }
        assert!(canvas[8..].iter().all(|&b| b == 0));
    }
}
