// Browser host settings for the globe canvas, glyph atlas and frame loop.

// DOM
pub const CAPTION_ID: &str = "globe-caption";
pub const CAPTION_HIDDEN_ATTR: &str = "hidden";
pub const CONFIG_ATTR: &str = "data-globe-config";
pub const LOCATIONS_ATTR: &str = "data-globe-locations";
pub const CANVAS_STYLE: &str = "display:block;width:100%;height:100%;touch-action:none;";

// Glyph atlas (one cell per location, disc in alpha, glyph in green)
pub const GLYPH_CELL_PX: u32 = 128;
pub const GLYPH_DISC_RADIUS: f64 = 0.45; // fraction of the cell
pub const GLYPH_FONT_PX: f64 = 60.0;
pub const GLYPH_MAX_WIDTH: f64 = 0.6; // fraction of the cell
pub const DISC_FILL: &str = "#ff0000";
pub const GLYPH_FILL: &str = "#ffff00";

// Input
pub const WHEEL_LINE_PX: f32 = 16.0; // DOM_DELTA_LINE to pixels

// Frame loop
pub const MAX_FRAME_DT_MS: u64 = 100; // long gaps (hidden tab) count as one short frame
