// Mount, frame loop, hover reporting and teardown of a whole globe view.

mod common;

use common::*;
use globe_core::*;
use std::time::Duration;

#[test]
fn mount_registers_listeners_and_schedules_a_frame() {
    let (view, host, render) = mount_default();
    assert!(view.is_available());
    assert_eq!(view.lifecycle(), Lifecycle::Running);
    assert_eq!(host.borrow().added.len(), InputKind::ALL.len());
    assert_eq!(host.borrow().frames_requested, 1);
    assert!(view.has_pending_frame());
    assert_eq!(render.borrow().resizes, vec![viewport()]);
    assert_eq!(view.hovered_location_name(), None);
    assert_eq!(view.markers().len(), 4);
}

#[test]
fn wheel_is_left_to_the_page_when_zoom_is_disabled() {
    let mut config = GlobeConfig::default();
    config.orbit.zoom_enabled = false;
    let (mut view, host, _) = mount_with(config);
    {
        let log = host.borrow();
        assert_eq!(log.added.len(), InputKind::ALL.len() - 1);
        assert!(log.added.iter().all(|(kind, _)| *kind != InputKind::Wheel));
    }
    view.teardown();
    assert_eq!(host.borrow().live_listeners(), 0);
}

#[test]
fn teardown_removes_every_listener_once() {
    let (mut view, host, render) = mount_default();
    view.frame(FRAME);
    view.frame(FRAME);
    view.teardown();

    let log = host.borrow();
    assert_eq!(log.live_listeners(), 0);
    let mut added: Vec<_> = log.added.iter().map(|(_, h)| *h).collect();
    let mut removed = log.removed.clone();
    added.sort_by_key(|h| h.0);
    removed.sort_by_key(|h| h.0);
    assert_eq!(added, removed);
    assert_eq!(log.frames_cancelled.len(), 1);
    assert_eq!(render.borrow().releases, 1);
    assert_eq!(view.lifecycle(), Lifecycle::TornDown);
    assert!(!view.is_available());
}

#[test]
fn teardown_is_idempotent() {
    let (mut view, host, render) = mount_default();
    view.teardown();
    view.teardown();
    drop(view);
    let log = host.borrow();
    assert_eq!(log.removed.len(), InputKind::ALL.len());
    assert_eq!(log.frames_cancelled.len(), 1);
    assert_eq!(render.borrow().releases, 1);
}

#[test]
fn teardown_before_first_frame_cancels_the_scheduled_frame() {
    let (mut view, host, render) = mount_default();
    view.teardown();
    assert_eq!(host.borrow().frames_cancelled, vec![FrameHandle(1)]);
    assert_eq!(render.borrow().frames, 0);
}

#[test]
fn frames_after_teardown_do_nothing() {
    let (mut view, host, render) = mount_default();
    view.teardown();
    view.queue_input(InputEvent::PointerMove { x: 1.0, y: 1.0 });
    view.frame(FRAME);
    assert_eq!(host.borrow().frames_requested, 1);
    assert_eq!(render.borrow().frames, 0);
    assert_eq!(view.frames_rendered(), 0);
}

#[test]
fn dropping_the_view_tears_it_down() {
    let (view, host, render) = mount_default();
    drop(view);
    assert_eq!(host.borrow().live_listeners(), 0);
    assert_eq!(render.borrow().releases, 1);
}

#[test]
fn unavailable_renderer_leaves_a_static_view() {
    let (host, host_log) = RecordingHost::new(viewport());
    let mut view: TestView = GlobeView::mount(
        GlobeConfig::default(),
        default_set(),
        host,
        Err(GlobeError::RendererUnavailable("no adapter".into())),
    )
    .unwrap();

    assert!(!view.is_available());
    assert_eq!(view.lifecycle(), Lifecycle::Unavailable);
    assert!(host_log.borrow().added.is_empty());
    assert_eq!(host_log.borrow().frames_requested, 0);

    view.queue_input(InputEvent::PointerDown { x: 0.0, y: 0.0 });
    view.frame(FRAME);
    assert_eq!(view.frames_rendered(), 0);
    assert!(!view.resize(Viewport::new(10.0, 10.0, 1.0)));

    view.teardown();
    assert!(host_log.borrow().removed.is_empty());
    assert!(host_log.borrow().frames_cancelled.is_empty());
}

#[test]
fn invalid_config_fails_mount() {
    let mut config = GlobeConfig::default();
    config.globe.radius = -1.0;
    let (host, host_log) = RecordingHost::new(viewport());
    let (renderer, _) = FakeRenderer::new();
    let result = GlobeView::mount(config, default_set(), host, Ok(renderer));
    assert!(matches!(result, Err(GlobeError::InvalidConfig(_))));
    assert!(host_log.borrow().added.is_empty());
}

#[test]
fn zero_size_resize_is_ignored() {
    let (mut view, _, render) = mount_default();
    let aspect = view.camera().aspect;
    view.queue_input(InputEvent::Resize {
        width: 0.0,
        height: 0.0,
        pixel_ratio: 2.0,
    });
    view.frame(FRAME);
    assert_eq!(view.viewport(), viewport());
    assert_eq!(view.camera().aspect, aspect);
    assert_eq!(render.borrow().resizes.len(), 1);
    assert!(view.camera().view_proj().is_finite());
}

#[test]
fn resize_updates_aspect_and_renderer() {
    let (mut view, _, render) = mount_default();
    view.queue_input(InputEvent::Resize {
        width: 1024.0,
        height: 512.0,
        pixel_ratio: 2.0,
    });
    view.frame(FRAME);
    assert!(approx(view.camera().aspect, 2.0, 1e-6));
    let last = *render.borrow().resizes.last().unwrap();
    assert_eq!(last.physical_size(), (2048, 1024));
}

#[test]
fn globe_spins_until_the_user_grabs_it() {
    let (mut view, _, _) = mount_default();
    view.frame(Duration::from_secs(1));
    let spun = view.globe_rotation();
    assert!(spun.angle_between(glam::Quat::IDENTITY) > 0.05);

    view.queue_input(InputEvent::PointerDown { x: 400.0, y: 300.0 });
    view.frame(FRAME);
    let held = view.globe_rotation();
    for _ in 0..100 {
        view.frame(Duration::from_millis(100));
    }
    assert!(view.globe_rotation().angle_between(held) < 1e-6);
    assert_eq!(view.controller().state(), AutoRotateState::UserControlling);

    view.queue_input(InputEvent::PointerUp);
    for _ in 0..29 {
        view.frame(Duration::from_millis(100));
    }
    assert_eq!(view.controller().state(), AutoRotateState::Cooldown);
    assert!(view.globe_rotation().angle_between(held) < 1e-6);
    view.frame(Duration::from_millis(100));
    view.frame(Duration::from_millis(100));
    assert_eq!(view.controller().state(), AutoRotateState::AutoRotating);
    assert!(view.globe_rotation().angle_between(held) > 1e-4);
}

#[test]
fn hover_reports_the_marker_under_a_still_pointer() {
    let (mut view, _, render) = mount_default();
    view.frame(FRAME);
    let usa = view.locations().index_of("USA").unwrap();
    let px = marker_screen_px(&view, usa);

    view.queue_input(InputEvent::PointerMove { x: px.x, y: px.y });
    view.frame(FRAME);
    assert_eq!(view.hovered_location_name(), Some("USA"));
    assert_eq!(render.borrow().last_markers[usa].color[3], 1.0);
    assert_eq!(
        view.markers().markers().iter().filter(|m| m.is_hovered()).count(),
        1
    );

    // no further pointer events: the globe carries the marker away
    for _ in 0..1250 {
        view.frame(FRAME);
        assert!(view.markers().markers().iter().filter(|m| m.is_hovered()).count() <= 1);
    }
    assert_ne!(view.hovered_location_name(), Some("USA"));
    let usa_marker = view.markers().get(usa).unwrap();
    assert_eq!(usa_marker.scale(), view.config().markers.base_scale);
}

#[test]
fn pointer_leave_clears_hover() {
    let (mut view, _, _) = mount_default();
    view.frame(FRAME);
    let px = marker_screen_px(&view, 0);
    view.queue_input(InputEvent::PointerMove { x: px.x, y: px.y });
    view.frame(FRAME);
    assert_eq!(view.hovered_index(), Some(0));

    view.queue_input(InputEvent::PointerLeave);
    view.frame(FRAME);
    assert_eq!(view.hovered_location_name(), None);
}

#[test]
fn occlusion_hides_markers_on_the_far_side() {
    let mut config = GlobeConfig::default();
    config.markers.occlude_by_globe = true;
    config.orbit.auto_rotate = false;
    let (mut view, _, _) = mount_with(config);
    view.frame(FRAME);

    // India starts on the far side of the globe from the camera
    let india = view.locations().index_of("India").unwrap();
    let world = view.graph().world_position(view.markers().get(india).unwrap().node());
    assert!(world.z < 0.0);
    let px = marker_screen_px(&view, india);
    view.queue_input(InputEvent::PointerMove { x: px.x, y: px.y });
    view.frame(FRAME);
    assert_ne!(view.hovered_location_name(), Some("India"));
}

#[test]
fn render_errors_do_not_stop_the_loop() {
    let (host, host_log) = RecordingHost::new(viewport());
    let (renderer, render_log) = FakeRenderer::failing();
    let mut view = GlobeView::mount(GlobeConfig::default(), default_set(), host, Ok(renderer)).unwrap();
    view.frame(FRAME);
    view.frame(FRAME);
    assert_eq!(render_log.borrow().failed, 2);
    assert_eq!(host_log.borrow().frames_requested, 3);
    assert!(view.is_available());
}

#[test]
fn empty_location_set_mounts_without_markers() {
    let (host, _) = RecordingHost::new(viewport());
    let (renderer, render) = FakeRenderer::new();
    let mut view = GlobeView::mount(
        GlobeConfig::default(),
        LocationSet::new(Vec::new()).unwrap(),
        host,
        Ok(renderer),
    )
    .unwrap();
    view.queue_input(InputEvent::PointerMove { x: 400.0, y: 300.0 });
    view.frame(FRAME);
    assert_eq!(view.hovered_location_name(), None);
    assert!(render.borrow().last_markers.is_empty());
    assert_eq!(render.borrow().frames, 1);
}
