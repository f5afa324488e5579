//! Seams between the platform-independent scene manager and its host.
//!
//! The browser implements `Host` with DOM listeners and
//! `requestAnimationFrame`, and `Renderer` with wgpu. Tests implement both
//! with recording doubles.

use crate::camera::Viewport;
use crate::config::LightConfig;
use crate::error::Result;
use crate::interaction::InputKind;
use crate::marker::MarkerInstance;
use glam::{Mat4, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Event registration and frame scheduling provided by the embedding page.
pub trait Host {
    /// Register a listener that forwards `kind` events to the globe.
    /// `None` means the host could not attach it; nothing needs removing.
    fn add_listener(&mut self, kind: InputKind) -> Option<ListenerHandle>;
    fn remove_listener(&mut self, handle: ListenerHandle);
    fn request_frame(&mut self) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
    /// Current size of the mount target.
    fn viewport(&self) -> Viewport;
}

/// Everything a renderer needs to draw one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    pub view_proj: Mat4,
    pub eye: Vec3,
    pub globe_model: Mat4,
    pub globe_radius: f32,
    pub markers: &'a [MarkerInstance],
    pub lights: &'a LightConfig,
}

pub trait Renderer {
    fn resize(&mut self, viewport: &Viewport);
    fn render(&mut self, frame: &FrameView<'_>) -> Result<()>;
    /// Free GPU resources; called once on teardown.
    fn release(&mut self);
}
