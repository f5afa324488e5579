use crate::atlas::{fit_font_px, AtlasLayout, GlyphAtlas};
use crate::constants::*;
use crate::dom::js_err;
use globe_core::LocationSet;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Draw one disc and glyph per location into an offscreen 2D canvas and read
/// the pixels back for upload.
pub fn rasterize(document: &web::Document, locations: &LocationSet) -> anyhow::Result<GlyphAtlas> {
    let layout = AtlasLayout::for_count(locations.len(), GLYPH_CELL_PX);
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    canvas.set_width(layout.width());
    canvas.set_height(layout.height());
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(js_err)?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let cell = layout.cell_px as f64;
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    for (i, loc) in locations.iter().enumerate() {
        let (ox, oy) = layout.cell_origin(i);
        let cx = ox as f64 + cell * 0.5;
        let cy = oy as f64 + cell * 0.5;

        ctx.begin_path();
        ctx.arc(cx, cy, cell * GLYPH_DISC_RADIUS, 0.0, std::f64::consts::TAU)
            .map_err(js_err)?;
        ctx.set_fill_style_str(DISC_FILL);
        ctx.fill();

        ctx.set_font(&format!("bold {}px sans-serif", GLYPH_FONT_PX));
        let measured = ctx.measure_text(&loc.glyph).map_err(js_err)?.width();
        let font_px = fit_font_px(measured, GLYPH_FONT_PX, cell * GLYPH_MAX_WIDTH);
        ctx.set_font(&format!("bold {}px sans-serif", font_px.floor()));
        ctx.set_fill_style_str(GLYPH_FILL);
        ctx.fill_text(&loc.glyph, cx, cy).map_err(js_err)?;
    }

    let image = ctx
        .get_image_data(0.0, 0.0, layout.width() as f64, layout.height() as f64)
        .map_err(js_err)?;
    log::debug!(
        "[gpu] glyph atlas {}x{} for {} locations",
        layout.width(),
        layout.height(),
        locations.len()
    );
    Ok(GlyphAtlas {
        layout,
        rgba: image.data().0,
    })
}
