//! Constant-coverage runs drawn from the pen brush
//!
//! Scanline rasterizers emit runs of equal coverage with `y` counted upward
//! from the baseline. The brush set by [`Surface::set_pen_brush`] turns that
//! into buffer addresses: run row `y` lands on surface row `brush.y - 1 - y`.

use glyphblit_core::{BlitError, BlitStatus, Result};

use crate::runner::blend_pixel;
use crate::surface::Surface;

/// A horizontal run of `len` pixels starting `x` pixels right of the brush
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub x: i32,
    pub len: u32,
    pub coverage: u8,
}

impl Span {
    pub const fn new(x: i32, len: u32, coverage: u8) -> Self {
        Self { x, len, coverage }
    }
}

impl Surface {
    /// Blend `spans` on run row `y` with the brush color.
    pub fn draw_spans(&mut self, y: i32, spans: &[Span]) -> Result<BlitStatus> {
        let Some(brush) = self.brush().copied() else {
            log::warn!("span drawing without a pen brush");
            return Err(BlitError::unsupported("no pen brush is set on this surface"));
        };
        let row = i64::from(brush.y) - 1 - i64::from(y);
        if row < 0 || row >= i64::from(self.height()) {
            return Ok(BlitStatus::NothingToDraw);
        }

        let width = i64::from(self.width());
        let bpp = brush.bytes_per_pixel();
        let pitch = self.pitch() as isize;
        let target = brush.pen.format;
        // offset of column 0 on the run row
        let line = brush.origin - y as isize * pitch - brush.x as isize * bpp as isize;

        let (buffer, _, cache) = self.parts_mut();
        let tables = cache.channel_tables(brush.pen.channels);
        let mut status = BlitStatus::NothingToDraw;
        for span in spans.iter().filter(|span| span.coverage > 0) {
            let start = i64::from(brush.x) + i64::from(span.x);
            let x0 = start.clamp(0, width);
            let x1 = (start + i64::from(span.len)).clamp(0, width);
            if x0 >= x1 {
                continue;
            }
            let at = (line + x0 as isize * bpp as isize) as usize;
            let end = at + (x1 - x0) as usize * bpp;
            for pixel in buffer[at..end].chunks_exact_mut(bpp) {
                blend_pixel(target, &brush.pen, &tables, pixel, [span.coverage; 3]);
            }
            status = BlitStatus::Drawn;
        }
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphblit_core::{Color, PixelMode};

    #[test]
    fn spans_land_above_the_brush() {
        let mut surface = Surface::new(6, 4, PixelMode::Gray).unwrap();
        surface.set_pen_brush(1, 3, Color::white());
        let status = surface.draw_spans(0, &[Span::new(0, 2, 255)]).unwrap();
        assert_eq!(status, BlitStatus::Drawn);
        assert_eq!(surface.pixel(1, 2), Some(Color::white()));
        assert_eq!(surface.pixel(2, 2), Some(Color::white()));
        assert_eq!(surface.pixel(3, 2), Some(Color::black()));

        surface.draw_spans(2, &[Span::new(-1, 1, 255)]).unwrap();
        assert_eq!(surface.pixel(0, 0), Some(Color::white()));
    }

    #[test]
    fn spans_match_on_bottom_up_surfaces() {
        let mut down = Surface::new(5, 5, PixelMode::Rgb565).unwrap();
        let mut up = Surface::bottom_up(5, 5, PixelMode::Rgb565).unwrap();
        for surface in [&mut down, &mut up] {
            surface.set_gamma(1.0);
            surface.set_pen_brush(2, 4, Color::rgb(255, 0, 128));
            surface
                .draw_spans(1, &[Span::new(-1, 3, 255), Span::new(0, 1, 100)])
                .unwrap();
        }
        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(down.pixel(x, y), up.pixel(x, y), "({x}, {y})");
            }
        }
        assert_eq!(down.pixel(1, 2), Some(Color::rgb(255, 0, 132)));
    }

    #[test]
    fn spans_are_clipped() {
        let mut surface = Surface::new(3, 3, PixelMode::Rgb32).unwrap();
        surface.set_pen_brush(0, 3, Color::white());
        assert_eq!(
            surface.draw_spans(0, &[Span::new(-5, 2, 255)]).unwrap(),
            BlitStatus::NothingToDraw
        );
        assert_eq!(
            surface.draw_spans(5, &[Span::new(0, 3, 255)]).unwrap(),
            BlitStatus::NothingToDraw
        );
        surface.draw_spans(0, &[Span::new(-1, 10, 255)]).unwrap();
        for x in 0..3 {
            assert_eq!(surface.pixel(x, 2), Some(Color::white()));
        }
    }

    #[test]
    fn zero_coverage_writes_nothing() {
        let mut surface = Surface::new(3, 1, PixelMode::Rgb24).unwrap();
        surface.clear(Color::rgb(9, 8, 7)).unwrap();
        surface.set_pen_brush(0, 1, Color::white());
        let status = surface.draw_spans(0, &[Span::new(0, 3, 0)]).unwrap();
        assert_eq!(status, BlitStatus::NothingToDraw);
        assert_eq!(surface.buffer(), &[9, 8, 7, 9, 8, 7, 9, 8, 7]);
    }

    #[test]
    fn missing_brush_is_unsupported() {
        let mut surface = Surface::new(3, 3, PixelMode::Gray).unwrap();
        let err = surface.draw_spans(0, &[Span::new(0, 1, 255)]).unwrap_err();
        assert!(matches!(err, BlitError::UnsupportedFormat { .. }));

        let mut pal = Surface::new(3, 3, PixelMode::Pal8).unwrap();
        pal.set_pen_brush(0, 1, Color::white());
        assert!(pal.draw_spans(0, &[Span::new(0, 1, 255)]).is_err());
        assert!(pal.buffer().iter().all(|&b| b == 0));
    }
}
