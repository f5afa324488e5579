use crate::caption::{self, Caption};
use crate::constants::MAX_FRAME_DT_MS;
use crate::events::{Inbox, TickSlot, WebHost};
use crate::glyphs;
use crate::input;
use crate::render::GpuState;
use globe_core::{GlobeConfig, GlobeError, GlobeView, LocationSet, SphereMesh};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use web_sys as web;

pub type View = GlobeView<WebHost, GpuState>;
pub type ViewSlot = Rc<RefCell<Option<View>>>;

pub struct FrameContext {
    pub view: ViewSlot,
    pub inbox: Inbox,
    pub document: web::Document,
    pub last_instant: Instant,
    pub caption: Caption,
}

impl FrameContext {
    pub fn new(view: ViewSlot, inbox: Inbox, document: web::Document) -> Self {
        Self {
            view,
            inbox,
            document,
            last_instant: Instant::now(),
            caption: Caption::default(),
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = input::frame_dt(
            now - self.last_instant,
            Duration::from_millis(MAX_FRAME_DT_MS),
        );
        self.last_instant = now;

        // the slot is empty once torn down; a callback already queued by the
        // browser then does nothing
        let Ok(mut slot) = self.view.try_borrow_mut() else {
            return;
        };
        let Some(view) = slot.as_mut() else {
            return;
        };

        let events: Vec<_> = self.inbox.borrow_mut().drain(..).collect();
        for event in events {
            view.queue_input(event);
        }
        view.frame(dt);

        if let Some(update) = self.caption.update(view.hovered_location_name()) {
            caption::apply(&self.document, &update);
        }
    }
}

/// Wrap the frame context in the callback handed to `requestAnimationFrame`.
pub fn tick_closure(mut ctx: FrameContext) -> Closure<dyn FnMut()> {
    Closure::wrap(Box::new(move || ctx.frame()) as Box<dyn FnMut()>)
}

/// Rasterize glyphs and bring up the GPU. Any failure means the globe is not
/// shown.
pub async fn init_gpu(
    document: &web::Document,
    canvas: &web::HtmlCanvasElement,
    config: &GlobeConfig,
    locations: &LocationSet,
) -> globe_core::Result<GpuState> {
    let unavailable = |e: anyhow::Error| GlobeError::RendererUnavailable(format!("{:#}", e));
    let atlas = glyphs::rasterize(document, locations).map_err(unavailable)?;
    let mesh = SphereMesh::new(
        config.globe.radius,
        config.globe.segments,
        config.globe.segments,
    );
    GpuState::new(canvas, &mesh, &atlas)
        .await
        .map_err(unavailable)
}
