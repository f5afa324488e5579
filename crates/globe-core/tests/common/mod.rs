// Recording test doubles for the host and renderer seams.

#![allow(dead_code)]

use globe_core::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

pub const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Default)]
pub struct HostLog {
    pub added: Vec<(InputKind, ListenerHandle)>,
    pub removed: Vec<ListenerHandle>,
    pub frames_requested: u32,
    pub frames_cancelled: Vec<FrameHandle>,
}

impl HostLog {
    pub fn live_listeners(&self) -> usize {
        self.added.len() - self.removed.len()
    }
}

pub struct RecordingHost {
    log: Rc<RefCell<HostLog>>,
    viewport: Viewport,
    next_listener: u32,
    next_frame: i32,
}

impl RecordingHost {
    pub fn new(viewport: Viewport) -> (Self, Rc<RefCell<HostLog>>) {
        let log = Rc::new(RefCell::new(HostLog::default()));
        let host = Self {
            log: log.clone(),
            viewport,
            next_listener: 0,
            next_frame: 0,
        };
        (host, log)
    }
}

impl Host for RecordingHost {
    fn add_listener(&mut self, kind: InputKind) -> Option<ListenerHandle> {
        self.next_listener += 1;
        let handle = ListenerHandle(self.next_listener);
        self.log.borrow_mut().added.push((kind, handle));
        Some(handle)
    }

    fn remove_listener(&mut self, handle: ListenerHandle) {
        self.log.borrow_mut().removed.push(handle);
    }

    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next_frame += 1;
        self.log.borrow_mut().frames_requested += 1;
        Some(FrameHandle(self.next_frame))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.log.borrow_mut().frames_cancelled.push(handle);
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

#[derive(Debug, Default)]
pub struct RenderLog {
    pub resizes: Vec<Viewport>,
    pub frames: u32,
    pub failed: u32,
    pub releases: u32,
    pub last_markers: Vec<MarkerInstance>,
}

pub struct FakeRenderer {
    log: Rc<RefCell<RenderLog>>,
    fail_render: bool,
}

impl FakeRenderer {
    pub fn new() -> (Self, Rc<RefCell<RenderLog>>) {
        let log = Rc::new(RefCell::new(RenderLog::default()));
        (
            Self {
                log: log.clone(),
                fail_render: false,
            },
            log,
        )
    }

    pub fn failing() -> (Self, Rc<RefCell<RenderLog>>) {
        let (mut r, log) = Self::new();
        r.fail_render = true;
        (r, log)
    }
}

impl Renderer for FakeRenderer {
    fn resize(&mut self, viewport: &Viewport) {
        self.log.borrow_mut().resizes.push(*viewport);
    }

    fn render(&mut self, frame: &FrameView<'_>) -> Result<()> {
        let mut log = self.log.borrow_mut();
        if self.fail_render {
            log.failed += 1;
            return Err(GlobeError::Render("device lost".into()));
        }
        log.frames += 1;
        log.last_markers = frame.markers.to_vec();
        Ok(())
    }

    fn release(&mut self) {
        self.log.borrow_mut().releases += 1;
    }
}

pub type TestView = GlobeView<RecordingHost, FakeRenderer>;

pub fn viewport() -> Viewport {
    Viewport::new(800.0, 600.0, 1.0)
}

pub fn default_set() -> LocationSet {
    LocationSet::new(default_locations()).unwrap()
}

pub fn mount_with(
    config: GlobeConfig,
) -> (TestView, Rc<RefCell<HostLog>>, Rc<RefCell<RenderLog>>) {
    let (host, host_log) = RecordingHost::new(viewport());
    let (renderer, render_log) = FakeRenderer::new();
    let view = GlobeView::mount(config, default_set(), host, Ok(renderer)).unwrap();
    (view, host_log, render_log)
}

pub fn mount_default() -> (TestView, Rc<RefCell<HostLog>>, Rc<RefCell<RenderLog>>) {
    mount_with(GlobeConfig::default())
}

/// Screen position in CSS pixels of a marker's center for the current camera.
pub fn marker_screen_px<H: Host, R: Renderer>(view: &GlobeView<H, R>, index: usize) -> glam::Vec2 {
    let node = view.markers().get(index).unwrap().node();
    let world = view.graph().world_position(node);
    let clip = view.camera().view_proj() * world.extend(1.0);
    let ndc = clip.truncate() / clip.w;
    let vp = view.viewport();
    glam::Vec2::new(
        (ndc.x + 1.0) * 0.5 * vp.width,
        (1.0 - ndc.y) * 0.5 * vp.height,
    )
}

pub fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}
