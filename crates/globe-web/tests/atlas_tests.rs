// Host-side tests for the glyph atlas layout.

#![allow(dead_code)]
mod atlas {
    include!("../src/atlas.rs");
}

use atlas::*;

#[test]
fn grid_is_near_square() {
    let cases = [(0, 1, 1), (1, 1, 1), (2, 2, 1), (4, 2, 2), (5, 3, 2), (9, 3, 3), (10, 4, 3)];
    for (count, columns, rows) in cases {
        let l = AtlasLayout::for_count(count, 64);
        assert_eq!((l.columns, l.rows), (columns, rows), "count {}", count);
        assert!(l.columns * l.rows >= count.max(1) as u32);
    }
}

#[test]
fn pixel_size_follows_grid() {
    let l = AtlasLayout::for_count(4, 128);
    assert_eq!((l.width(), l.height()), (256, 256));
    let l = AtlasLayout::for_count(3, 100);
    assert_eq!((l.width(), l.height()), (200, 200));
}

#[test]
fn cells_fill_row_major() {
    let l = AtlasLayout::for_count(5, 10);
    assert_eq!(l.cell_origin(0), (0, 0));
    assert_eq!(l.cell_origin(2), (20, 0));
    assert_eq!(l.cell_origin(3), (0, 10));
    assert_eq!(l.cell_origin(4), (10, 10));
}

#[test]
fn wide_glyphs_shrink_to_fit() {
    assert_eq!(fit_font_px(40.0, 60.0, 76.8), 60.0);
    let px = fit_font_px(153.6, 60.0, 76.8);
    assert!((px - 30.0).abs() < 1e-9);
    assert_eq!(fit_font_px(0.0, 60.0, 76.8), 60.0);
}
