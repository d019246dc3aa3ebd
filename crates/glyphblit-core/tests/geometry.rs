//! Buffer geometry seen from outside the crate

use glyphblit_core::{BlitError, BufferLayout, CoverageBitmap, PixelMode};
use proptest::prelude::*;

#[test]
fn packed_layouts_use_minimal_pitch() {
    let down = BufferLayout::packed(7, 3, PixelMode::Rgb565).unwrap();
    assert_eq!(down.pitch(), 14);
    let up = BufferLayout::packed_bottom_up(7, 3, PixelMode::Rgb565).unwrap();
    assert_eq!(up.pitch(), -14);
    assert_eq!(down.required_len(), up.required_len());
}

#[test]
fn buffer_check_reports_bad_argument() {
    let layout = BufferLayout::packed(4, 4, PixelMode::Rgb32).unwrap();
    assert!(layout.check_buffer(64).is_ok());
    assert!(matches!(
        layout.check_buffer(63),
        Err(BlitError::BadArgument { .. })
    ));
}

#[test]
fn empty_bitmap_needs_no_storage() {
    let glyph = CoverageBitmap::new(&[], 0, 0, 0, PixelMode::Gray).unwrap();
    assert!(glyph.layout().is_empty());
}

// Property: every logical row of a bottom-up buffer lands inside the buffer
// and rows never overlap, whatever the pitch padding.
proptest! {
    #[test]
    fn prop_rows_stay_in_bounds(
        width in 1u32..40,
        rows in 1u32..40,
        padding in 0i32..8,
        bottom_up in any::<bool>(),
    ) {
        let row_bytes = PixelMode::Rgb24.row_bytes(width).unwrap() as i32;
        let pitch = if bottom_up { -(row_bytes + padding) } else { row_bytes + padding };
        let layout = BufferLayout::new(width, rows, pitch, PixelMode::Rgb24).unwrap();

        let mut starts: Vec<usize> = (0..rows).map(|r| layout.row_offset(r)).collect();
        for start in &starts {
            prop_assert!(start + layout.row_bytes() <= layout.required_len());
        }
        starts.sort_unstable();
        for pair in starts.windows(2) {
            prop_assert!(pair[1] - pair[0] >= layout.row_bytes());
        }
    }
}
