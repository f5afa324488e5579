// Host-side tests for the pure input helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}

use globe_core::InputKind;
use input::*;
use std::time::Duration;

#[test]
fn releases_and_resize_listen_on_window() {
    assert_eq!(dom_event(InputKind::PointerUp), ("pointerup", ListenTarget::Window));
    assert_eq!(dom_event(InputKind::Resize), ("resize", ListenTarget::Window));
    for kind in InputKind::ALL {
        if !matches!(kind, InputKind::PointerUp | InputKind::Resize) {
            assert_eq!(dom_event(kind).1, ListenTarget::Canvas, "{:?}", kind);
        }
    }
}

#[test]
fn every_kind_has_a_distinct_event_name() {
    let mut names: Vec<&str> = InputKind::ALL.iter().map(|k| dom_event(*k).0).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), InputKind::ALL.len());
}

#[test]
fn touch_pointers_are_left_to_touch_listeners() {
    assert!(is_touch_pointer("touch"));
    assert!(!is_touch_pointer("mouse"));
    assert!(!is_touch_pointer("pen"));
}

#[test]
fn local_px_is_relative_to_rect() {
    assert_eq!(local_px(150.0, 90.0, 100.0, 40.0), (50.0, 50.0));
    assert_eq!(local_px(10.0, 10.0, 20.0, 0.0), (-10.0, 10.0));
}

#[test]
fn wheel_delta_normalized_to_pixels() {
    assert_eq!(wheel_delta_px(-120.0, 0, 800.0), -120.0);
    assert_eq!(wheel_delta_px(3.0, DOM_DELTA_LINE, 800.0), 3.0 * constants::WHEEL_LINE_PX);
    assert_eq!(wheel_delta_px(1.0, DOM_DELTA_PAGE, 800.0), 800.0);
}

#[test]
fn viewport_from_css_keeps_pixel_ratio() {
    let vp = viewport_from_css(640.0, 480.0, 2.0);
    assert_eq!(vp.width, 640.0);
    assert_eq!(vp.height, 480.0);
    assert_eq!(vp.physical_size(), (1280, 960));
}

#[test]
fn frame_dt_clamps_long_gaps() {
    let max = Duration::from_millis(constants::MAX_FRAME_DT_MS);
    assert_eq!(frame_dt(Duration::from_millis(16), max), Duration::from_millis(16));
    assert_eq!(frame_dt(Duration::from_secs(30), max), max);
}
