//! Browser implementation of the globe's `Host` seam.
//!
//! Listener closures only translate DOM events into `InputEvent`s and push
//! them onto a shared inbox; the frame callback drains it.

use crate::dom;
use crate::input::{self, ListenTarget};
use fnv::FnvHashMap;
use globe_core::{FrameHandle, Host, InputEvent, InputKind, ListenerHandle, Viewport};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type Inbox = Rc<RefCell<VecDeque<InputEvent>>>;
pub type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

pub struct WebHost {
    window: web::Window,
    container: web::Element,
    canvas: web::HtmlCanvasElement,
    inbox: Inbox,
    tick: TickSlot,
    listeners: FnvHashMap<u32, Listener>,
    next_id: u32,
}

impl WebHost {
    pub fn new(
        window: web::Window,
        container: web::Element,
        canvas: web::HtmlCanvasElement,
        inbox: Inbox,
        tick: TickSlot,
    ) -> Self {
        Self {
            window,
            container,
            canvas,
            inbox,
            tick,
            listeners: FnvHashMap::default(),
            next_id: 0,
        }
    }

    fn make_closure(&self, kind: InputKind) -> Closure<dyn FnMut(web::Event)> {
        let inbox = self.inbox.clone();
        let canvas = self.canvas.clone();
        let container = self.container.clone();
        let window = self.window.clone();
        Closure::wrap(Box::new(move |ev: web::Event| {
            if let Some(event) = translate(kind, &ev, &canvas, &container, &window) {
                inbox.borrow_mut().push_back(event);
            }
        }) as Box<dyn FnMut(_)>)
    }
}

fn local_pointer(x: i32, y: i32, canvas: &web::HtmlCanvasElement) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    input::local_px(x as f64, y as f64, rect.left(), rect.top())
}

fn first_touch(ev: &web::TouchEvent, canvas: &web::HtmlCanvasElement) -> Option<(f32, f32)> {
    let touch = ev.touches().get(0)?;
    Some(local_pointer(touch.client_x(), touch.client_y(), canvas))
}

fn translate(
    kind: InputKind,
    ev: &web::Event,
    canvas: &web::HtmlCanvasElement,
    container: &web::Element,
    window: &web::Window,
) -> Option<InputEvent> {
    match kind {
        InputKind::PointerMove | InputKind::PointerDown => {
            let pe = ev.dyn_ref::<web::PointerEvent>()?;
            if input::is_touch_pointer(&pe.pointer_type()) {
                return None;
            }
            let (x, y) = local_pointer(pe.client_x(), pe.client_y(), canvas);
            if kind == InputKind::PointerDown {
                let _ = canvas.set_pointer_capture(pe.pointer_id());
                pe.prevent_default();
                Some(InputEvent::PointerDown { x, y })
            } else {
                Some(InputEvent::PointerMove { x, y })
            }
        }
        InputKind::PointerUp | InputKind::PointerLeave => {
            let pe = ev.dyn_ref::<web::PointerEvent>()?;
            if input::is_touch_pointer(&pe.pointer_type()) {
                return None;
            }
            Some(if kind == InputKind::PointerUp {
                InputEvent::PointerUp
            } else {
                InputEvent::PointerLeave
            })
        }
        InputKind::TouchStart => {
            let te = ev.dyn_ref::<web::TouchEvent>()?;
            let (x, y) = first_touch(te, canvas)?;
            Some(InputEvent::TouchStart { x, y })
        }
        InputKind::TouchMove => {
            let te = ev.dyn_ref::<web::TouchEvent>()?;
            let (x, y) = first_touch(te, canvas)?;
            te.prevent_default();
            Some(InputEvent::TouchMove { x, y })
        }
        InputKind::TouchEnd => {
            let te = ev.dyn_ref::<web::TouchEvent>()?;
            (te.touches().length() == 0).then_some(InputEvent::TouchEnd)
        }
        InputKind::Wheel => {
            let we = ev.dyn_ref::<web::WheelEvent>()?;
            we.prevent_default();
            let page = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(800.0);
            Some(InputEvent::Wheel {
                delta_y: input::wheel_delta_px(we.delta_y(), we.delta_mode(), page),
            })
        }
        InputKind::Resize => {
            let vp = dom::element_viewport(container, window);
            Some(InputEvent::Resize {
                width: vp.width,
                height: vp.height,
                pixel_ratio: vp.pixel_ratio,
            })
        }
    }
}

impl Host for WebHost {
    fn add_listener(&mut self, kind: InputKind) -> Option<ListenerHandle> {
        let (event, target) = input::dom_event(kind);
        let target: web::EventTarget = match target {
            ListenTarget::Canvas => self.canvas.clone().into(),
            ListenTarget::Window => self.window.clone().into(),
        };
        let closure = self.make_closure(kind);
        let added = if kind == InputKind::Wheel {
            // must stay cancelable so the page does not scroll while zooming
            let opts = web::AddEventListenerOptions::new();
            opts.set_passive(false);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                event,
                closure.as_ref().unchecked_ref(),
                &opts,
            )
        } else {
            target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        };
        if let Err(e) = added {
            log::warn!("[input] could not listen for {}: {:?}", event, e);
            return None;
        }

        self.next_id += 1;
        self.listeners.insert(
            self.next_id,
            Listener {
                target,
                event,
                closure,
            },
        );
        Some(ListenerHandle(self.next_id))
    }

    fn remove_listener(&mut self, handle: ListenerHandle) {
        let Some(listener) = self.listeners.remove(&handle.0) else {
            log::warn!("[input] unknown listener {:?}", handle);
            return;
        };
        let _ = listener.target.remove_event_listener_with_callback(
            listener.event,
            listener.closure.as_ref().unchecked_ref(),
        );
    }

    fn request_frame(&mut self) -> Option<FrameHandle> {
        let tick = self.tick.borrow();
        let callback = tick.as_ref()?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .ok()
            .map(FrameHandle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let _ = self.window.cancel_animation_frame(handle.0);
    }

    fn viewport(&self) -> Viewport {
        dom::element_viewport(&self.container, &self.window)
    }
}
