use crate::constants::CANVAS_STYLE;
use crate::input;
use globe_core::Viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

pub fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!(format!("{:?}", e))
}

/// CSS size of `el` and the device pixel ratio.
pub fn element_viewport(el: &web::Element, window: &web::Window) -> Viewport {
    let rect = el.get_bounding_client_rect();
    input::viewport_from_css(rect.width(), rect.height(), window.device_pixel_ratio())
}

/// Append a canvas filling `container`.
pub fn create_canvas(
    document: &web::Document,
    container: &web::Element,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    canvas.set_attribute("style", CANVAS_STYLE).map_err(js_err)?;
    container.append_child(&canvas).map_err(js_err)?;
    Ok(canvas)
}

/// Match the canvas backing store to its CSS size times the pixel ratio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, viewport: &Viewport) {
    let (w, h) = viewport.physical_size();
    if canvas.width() != w {
        canvas.set_width(w);
    }
    if canvas.height() != h {
        canvas.set_height(h);
    }
}

pub fn remove_canvas(canvas: &web::HtmlCanvasElement) {
    canvas.remove();
}
