// Layout of the marker glyph atlas.
//
// Cells are square and filled row-major in location order, so the cell index
// equals `MarkerInstance::glyph`. The marker shader derives the same cell
// rectangle from the column/row counts.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AtlasLayout {
    pub columns: u32,
    pub rows: u32,
    pub cell_px: u32,
}

impl AtlasLayout {
    /// Smallest near-square grid holding `count` cells (at least one).
    pub fn for_count(count: usize, cell_px: u32) -> Self {
        let n = count.max(1) as u32;
        let mut columns = 1;
        while columns * columns < n {
            columns += 1;
        }
        let rows = n.div_ceil(columns);
        Self {
            columns,
            rows,
            cell_px,
        }
    }

    pub fn width(&self) -> u32 {
        self.columns * self.cell_px
    }

    pub fn height(&self) -> u32 {
        self.rows * self.cell_px
    }

    /// Top-left pixel of cell `index`.
    pub fn cell_origin(&self, index: usize) -> (u32, u32) {
        let i = index as u32;
        ((i % self.columns) * self.cell_px, (i / self.columns) * self.cell_px)
    }
}

/// Font size that keeps text measured at `font_px` within `max_width`.
pub fn fit_font_px(measured_width: f64, font_px: f64, max_width: f64) -> f64 {
    if measured_width <= max_width || measured_width <= 0.0 {
        font_px
    } else {
        font_px * max_width / measured_width
    }
}

/// Rasterized atlas, RGBA8 rows top to bottom.
#[derive(Clone, Debug)]
pub struct GlyphAtlas {
    pub layout: AtlasLayout,
    pub rgba: Vec<u8>,
}
