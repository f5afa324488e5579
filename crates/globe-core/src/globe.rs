//! Scene manager: owns the scene graph, camera, interaction, markers and the
//! renderer for the lifetime of one mounted view.
//!
//! Frame order is fixed: input sampling, camera and globe update, hover pick,
//! marker feedback, draw.

use crate::camera::{Camera, Viewport};
use crate::config::GlobeConfig;
use crate::error::Result;
use crate::geo::LocationSet;
use crate::host::{FrameHandle, FrameView, Host, ListenerHandle, Renderer};
use crate::interaction::{InputEvent, InputKind, InteractionController};
use crate::marker::MarkerRenderer;
use crate::picking::pick_nearest;
use crate::scene::{NodeId, SceneGraph, Transform};
use glam::{Quat, Vec3};
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Running,
    /// The renderer could not be created; nothing is drawn or scheduled.
    Unavailable,
    TornDown,
}

pub struct GlobeView<H: Host, R: Renderer> {
    config: GlobeConfig,
    locations: LocationSet,
    graph: SceneGraph,
    globe_node: NodeId,
    camera: Camera,
    viewport: Viewport,
    controller: InteractionController,
    markers: MarkerRenderer,
    hovered: Option<usize>,
    pending_input: VecDeque<InputEvent>,
    host: H,
    renderer: Option<R>,
    listeners: Vec<ListenerHandle>,
    pending_frame: Option<FrameHandle>,
    lifecycle: Lifecycle,
    frames: u64,
}

impl<H: Host, R: Renderer> GlobeView<H, R> {
    /// Build the scene and start the frame loop.
    ///
    /// Invalid configuration is returned as an error. A failed renderer is not:
    /// the view comes back `Unavailable` with no listeners and no frame
    /// scheduled, so the page keeps working without the decoration.
    pub fn mount(
        config: GlobeConfig,
        locations: LocationSet,
        host: H,
        renderer: Result<R>,
    ) -> Result<Self> {
        config.validate()?;

        let viewport = host.viewport();
        let mut camera = Camera::new(
            Vec3::new(0.0, 0.0, config.camera.distance),
            config.camera.fov_deg.to_radians(),
            config.camera.near,
            config.camera.far,
        );
        camera.set_viewport(&viewport);

        let mut graph = SceneGraph::new();
        let globe_node = graph.spawn(Transform::IDENTITY, None);
        let markers = MarkerRenderer::build(
            &config.markers,
            &locations,
            config.globe.radius,
            &mut graph,
            globe_node,
        );
        let controller = InteractionController::new(&config, &camera);

        let mut view = Self {
            config,
            locations,
            graph,
            globe_node,
            camera,
            viewport,
            controller,
            markers,
            hovered: None,
            pending_input: VecDeque::new(),
            host,
            renderer: None,
            listeners: Vec::new(),
            pending_frame: None,
            lifecycle: Lifecycle::Unavailable,
            frames: 0,
        };

        match renderer {
            Ok(mut r) => {
                if !viewport.is_empty() {
                    r.resize(&viewport);
                }
                view.renderer = Some(r);
                view.lifecycle = Lifecycle::Running;
                // without zoom the wheel must keep scrolling the page
                let zoom = view.config.orbit.zoom_enabled;
                for kind in InputKind::ALL {
                    if kind == InputKind::Wheel && !zoom {
                        continue;
                    }
                    if let Some(handle) = view.host.add_listener(kind) {
                        view.listeners.push(handle);
                    }
                }
                view.pending_frame = view.host.request_frame();
                log::info!(
                    "[globe] mounted: {} markers, viewport {}x{}",
                    view.markers.len(),
                    viewport.width,
                    viewport.height
                );
            }
            Err(e) => {
                log::warn!("[globe] renderer unavailable, skipping animation: {}", e);
            }
        }
        Ok(view)
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_available(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    /// The component's observable output.
    pub fn hovered_location_name(&self) -> Option<&str> {
        self.hovered
            .and_then(|i| self.locations.get(i))
            .map(|loc| loc.name.as_str())
    }

    pub fn hovered_index(&self) -> Option<usize> {
        self.hovered
    }

    /// Queue host input; it is applied at the start of the next frame.
    pub fn queue_input(&mut self, event: InputEvent) {
        if self.lifecycle == Lifecycle::Running {
            self.pending_input.push_back(event);
        }
    }

    /// Update aspect ratio and output size. Empty viewports are ignored.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        if self.lifecycle != Lifecycle::Running || viewport.is_empty() {
            return false;
        }
        self.viewport = viewport;
        self.camera.set_viewport(&viewport);
        if let Some(r) = self.renderer.as_mut() {
            r.resize(&viewport);
        }
        true
    }

    /// Run one animation tick of length `dt` and schedule the next.
    pub fn frame(&mut self, dt: Duration) {
        if self.lifecycle != Lifecycle::Running {
            return;
        }
        self.pending_frame = None;

        while let Some(event) = self.pending_input.pop_front() {
            self.apply_input(event);
        }

        self.controller.update(dt, &mut self.camera);
        let spin = self.controller.auto_rotate_angle(dt);
        if spin != 0.0 {
            let current = self.globe_rotation();
            self.set_globe_rotation(Quat::from_rotation_y(spin) * current);
        }

        let hovered = self.pick();
        if hovered != self.hovered {
            log::debug!(
                "[globe] hover {:?} -> {:?}",
                self.hovered.and_then(|i| self.locations.get(i)).map(|l| &l.name),
                hovered.and_then(|i| self.locations.get(i)).map(|l| &l.name)
            );
            self.hovered = hovered;
        }

        self.markers.apply_hover(self.hovered, dt, &mut self.graph);
        self.draw();
        self.frames += 1;

        self.pending_frame = self.host.request_frame();
    }

    /// Detach listeners, cancel the scheduled frame and release the renderer.
    /// Safe to call repeatedly and before any frame has run.
    pub fn teardown(&mut self) {
        if self.lifecycle == Lifecycle::TornDown {
            return;
        }
        for handle in self.listeners.drain(..) {
            self.host.remove_listener(handle);
        }
        if let Some(frame) = self.pending_frame.take() {
            self.host.cancel_frame(frame);
        }
        self.controller.cancel();
        self.pending_input.clear();
        if let Some(mut r) = self.renderer.take() {
            r.release();
        }
        self.hovered = None;
        self.lifecycle = Lifecycle::TornDown;
        log::info!("[globe] torn down after {} frames", self.frames);
    }

    pub fn globe_rotation(&self) -> Quat {
        self.graph
            .local(self.globe_node)
            .map_or(Quat::IDENTITY, |t| t.rotation)
    }

    pub fn set_globe_rotation(&mut self, rotation: Quat) {
        self.graph.set_rotation(self.globe_node, rotation.normalize());
    }

    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }

    pub fn locations(&self) -> &LocationSet {
        &self.locations
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn globe_node(&self) -> NodeId {
        self.globe_node
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn markers(&self) -> &MarkerRenderer {
        &self.markers
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    fn apply_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Resize {
                width,
                height,
                pixel_ratio,
            } => {
                if !self.resize(Viewport::new(width, height, pixel_ratio)) {
                    log::debug!("[globe] ignoring resize to {}x{}", width, height);
                }
            }
            other => self.controller.handle(&other, &self.viewport),
        }
    }

    fn pick(&self) -> Option<usize> {
        if self.markers.is_empty() {
            return None;
        }
        let ndc = self.controller.pointer_ndc(&self.viewport)?;
        let ray = self.camera.ray_from_ndc(ndc);
        let targets = self.markers.pick_targets(&self.graph);
        let occluder = self.config.markers.occlude_by_globe.then(|| {
            (
                self.graph.world_position(self.globe_node),
                self.config.globe.radius,
            )
        });
        pick_nearest(&ray, &targets, occluder).map(|hit| hit.index)
    }

    fn draw(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        let instances = self.markers.instances(&self.graph, &self.locations);
        let frame = FrameView {
            view_proj: self.camera.view_proj(),
            eye: self.camera.eye,
            globe_model: self.graph.world_matrix(self.globe_node),
            globe_radius: self.config.globe.radius,
            markers: &instances,
            lights: &self.config.lights,
        };
        if let Err(e) = renderer.render(&frame) {
            log::error!("[globe] render error: {}", e);
        }
    }
}

impl<H: Host, R: Renderer> Drop for GlobeView<H, R> {
    fn drop(&mut self) {
        self.teardown();
    }
}
