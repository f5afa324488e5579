#![cfg(target_arch = "wasm32")]
//! Browser entry point: mounts the remittance globe into a page element.

mod atlas;
mod caption;
mod constants;
mod dom;
mod events;
mod frame;
mod glyphs;
mod input;
mod render;
mod settings;

use anyhow::Context;
use constants::{CONFIG_ATTR, LOCATIONS_ATTR};
use events::{Inbox, TickSlot, WebHost};
use frame::{FrameContext, ViewSlot};
use globe_core::{GlobeView, LocationSet};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("globe-web loaded");
    Ok(())
}

struct Shared {
    view: ViewSlot,
    cancelled: Cell<bool>,
    canvas: web::HtmlCanvasElement,
    document: web::Document,
}

/// Handle returned to the page. Dropping it on the JS side does not stop the
/// globe; call `teardown`.
#[wasm_bindgen]
pub struct GlobeHandle {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl GlobeHandle {
    /// False until the GPU is up, and forever if it never comes up.
    pub fn is_available(&self) -> bool {
        self.shared
            .view
            .try_borrow()
            .map(|slot| slot.as_ref().is_some_and(|v| v.is_available()))
            .unwrap_or(false)
    }

    pub fn hovered_location(&self) -> Option<String> {
        let slot = self.shared.view.try_borrow().ok()?;
        slot.as_ref()?.hovered_location_name().map(str::to_owned)
    }

    /// Stop the frame loop, detach every listener and remove the canvas.
    /// Calling it again does nothing.
    pub fn teardown(&self) {
        if self.shared.cancelled.replace(true) {
            return;
        }
        // dropping the view releases the host, which owns the frame callback
        let view = self.shared.view.borrow_mut().take();
        if let Some(mut view) = view {
            view.teardown();
        }
        caption::hide(&self.shared.document);
        dom::remove_canvas(&self.shared.canvas);
    }
}

/// Mount the globe into the element with id `element_id`.
///
/// Configuration and locations come from the element's `data-globe-config`
/// and `data-globe-locations` JSON attributes. GPU setup finishes
/// asynchronously; if it fails the canvas is removed and the page is left as
/// it was.
#[wasm_bindgen]
pub fn mount_globe(element_id: &str) -> Result<GlobeHandle, JsValue> {
    prepare(element_id).map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}

fn prepare(element_id: &str) -> anyhow::Result<GlobeHandle> {
    let (window, document) =
        dom::window_document().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let container = document
        .get_element_by_id(element_id)
        .with_context(|| format!("missing #{}", element_id))?;

    let config = settings::parse_config(container.get_attribute(CONFIG_ATTR).as_deref())?;
    let locations = LocationSet::new(settings::parse_locations(
        container.get_attribute(LOCATIONS_ATTR).as_deref(),
    )?)?;

    let canvas = dom::create_canvas(&document, &container)?;
    dom::sync_canvas_backing_size(&canvas, &dom::element_viewport(&container, &window));

    let shared = Rc::new(Shared {
        view: Rc::new(RefCell::new(None)),
        cancelled: Cell::new(false),
        canvas: canvas.clone(),
        document: document.clone(),
    });

    let pending = shared.clone();
    spawn_local(async move {
        let renderer = frame::init_gpu(&document, &canvas, &config, &locations).await;
        if pending.cancelled.get() {
            log::info!("[globe] torn down before the GPU was ready");
            return;
        }

        let inbox: Inbox = Rc::new(RefCell::new(VecDeque::new()));
        let tick: TickSlot = Rc::new(RefCell::new(None));
        // the callback must exist before mount schedules the first frame
        *tick.borrow_mut() = Some(frame::tick_closure(FrameContext::new(
            pending.view.clone(),
            inbox.clone(),
            document.clone(),
        )));
        let host = WebHost::new(window, container, canvas.clone(), inbox, tick);

        match GlobeView::mount(config, locations, host, renderer) {
            Ok(view) => {
                if !view.is_available() {
                    dom::remove_canvas(&canvas);
                }
                *pending.view.borrow_mut() = Some(view);
            }
            Err(e) => {
                log::error!("[globe] mount failed: {}", e);
                dom::remove_canvas(&canvas);
            }
        }
    });

    Ok(GlobeHandle { shared })
}
