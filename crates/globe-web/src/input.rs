use globe_core::{InputKind, Viewport};
use std::time::Duration;

use crate::constants::WHEEL_LINE_PX;

pub const DOM_DELTA_LINE: u32 = 1;
pub const DOM_DELTA_PAGE: u32 = 2;

/// Element a listener is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenTarget {
    Canvas,
    Window,
}

/// DOM event name and target for each listener kind. Pointer releases are
/// caught on the window so a drag that ends outside the canvas still ends.
#[inline]
pub fn dom_event(kind: InputKind) -> (&'static str, ListenTarget) {
    match kind {
        InputKind::PointerMove => ("pointermove", ListenTarget::Canvas),
        InputKind::PointerDown => ("pointerdown", ListenTarget::Canvas),
        InputKind::PointerUp => ("pointerup", ListenTarget::Window),
        InputKind::PointerLeave => ("pointerleave", ListenTarget::Canvas),
        InputKind::TouchStart => ("touchstart", ListenTarget::Canvas),
        InputKind::TouchMove => ("touchmove", ListenTarget::Canvas),
        InputKind::TouchEnd => ("touchend", ListenTarget::Canvas),
        InputKind::Wheel => ("wheel", ListenTarget::Canvas),
        InputKind::Resize => ("resize", ListenTarget::Window),
    }
}

/// Touch pointers are handled by the touch listeners; the pointer listeners
/// skip them so a tap is not seen twice.
#[inline]
pub fn is_touch_pointer(pointer_type: &str) -> bool {
    pointer_type == "touch"
}

/// Client coordinates relative to the top-left of a bounding rect, in CSS px.
#[inline]
pub fn local_px(client_x: f64, client_y: f64, left: f64, top: f64) -> (f32, f32) {
    ((client_x - left) as f32, (client_y - top) as f32)
}

/// Wheel delta in pixels regardless of the event's delta mode.
#[inline]
pub fn wheel_delta_px(delta_y: f64, delta_mode: u32, page_height: f64) -> f32 {
    let dy = delta_y as f32;
    match delta_mode {
        DOM_DELTA_LINE => dy * WHEEL_LINE_PX,
        DOM_DELTA_PAGE => dy * page_height as f32,
        _ => dy,
    }
}

#[inline]
pub fn viewport_from_css(width: f64, height: f64, device_pixel_ratio: f64) -> Viewport {
    Viewport::new(width as f32, height as f32, device_pixel_ratio as f32)
}

/// Frame delta clamped to `max`.
#[inline]
pub fn frame_dt(elapsed: Duration, max: Duration) -> Duration {
    elapsed.min(max)
}
