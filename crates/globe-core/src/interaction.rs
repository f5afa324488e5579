//! Pointer/touch handling, the auto-rotation state machine and the stored
//! pick pointer.
//!
//! ```text
//! AutoRotating --down--> UserControlling --up--> Cooldown --timer--> AutoRotating
//!                              ^                    |
//!                              +-------down---------+
//! ```
//!
//! The cooldown timer belongs to the controller instance, so several globes
//! on one page never share or cancel each other's timers.

use crate::camera::{Camera, Viewport};
use crate::config::GlobeConfig;
use crate::orbit::OrbitControls;
use glam::Vec2;
use std::time::Duration;

/// Host input, already converted to CSS pixels relative to the render surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerMove { x: f32, y: f32 },
    PointerDown { x: f32, y: f32 },
    PointerUp,
    PointerLeave,
    TouchStart { x: f32, y: f32 },
    TouchMove { x: f32, y: f32 },
    TouchEnd,
    Wheel { delta_y: f32 },
    Resize { width: f32, height: f32, pixel_ratio: f32 },
}

impl InputEvent {
    pub fn kind(&self) -> InputKind {
        match self {
            InputEvent::PointerMove { .. } => InputKind::PointerMove,
            InputEvent::PointerDown { .. } => InputKind::PointerDown,
            InputEvent::PointerUp => InputKind::PointerUp,
            InputEvent::PointerLeave => InputKind::PointerLeave,
            InputEvent::TouchStart { .. } => InputKind::TouchStart,
            InputEvent::TouchMove { .. } => InputKind::TouchMove,
            InputEvent::TouchEnd => InputKind::TouchEnd,
            InputEvent::Wheel { .. } => InputKind::Wheel,
            InputEvent::Resize { .. } => InputKind::Resize,
        }
    }
}

/// The listener kinds a mounted globe registers with its host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputKind {
    PointerMove,
    PointerDown,
    PointerUp,
    PointerLeave,
    TouchStart,
    TouchMove,
    TouchEnd,
    Wheel,
    Resize,
}

impl InputKind {
    pub const ALL: [InputKind; 9] = [
        InputKind::PointerMove,
        InputKind::PointerDown,
        InputKind::PointerUp,
        InputKind::PointerLeave,
        InputKind::TouchStart,
        InputKind::TouchMove,
        InputKind::TouchEnd,
        InputKind::Wheel,
        InputKind::Resize,
    ];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AutoRotateState {
    #[default]
    AutoRotating,
    UserControlling,
    Cooldown,
}

/// One-shot countdown driven by frame time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CooldownTimer {
    remaining: Option<Duration>,
}

impl CooldownTimer {
    pub fn arm(&mut self, duration: Duration) {
        self.remaining = Some(duration);
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.remaining
    }

    /// Count down by `dt`; returns `true` on the call that expires the timer.
    pub fn advance(&mut self, dt: Duration) -> bool {
        match self.remaining {
            Some(r) if dt >= r => {
                self.remaining = None;
                true
            }
            Some(r) => {
                self.remaining = Some(r - dt);
                false
            }
            None => false,
        }
    }
}

pub struct InteractionController {
    state: AutoRotateState,
    cooldown: CooldownTimer,
    cooldown_duration: Duration,
    /// Set when input arms the timer; the next `update` does not count down,
    /// since its `dt` elapsed before the release.
    armed_this_frame: bool,
    auto_rotate: bool,
    auto_rotate_rad_per_sec: f32,
    orbit: OrbitControls,
    pointer_px: Option<Vec2>,
}

impl InteractionController {
    pub fn new(config: &GlobeConfig, camera: &Camera) -> Self {
        Self {
            state: AutoRotateState::AutoRotating,
            cooldown: CooldownTimer::default(),
            cooldown_duration: config.interaction.cooldown(),
            armed_this_frame: false,
            auto_rotate: config.orbit.auto_rotate,
            auto_rotate_rad_per_sec: config.orbit.auto_rotate_rad_per_sec(),
            orbit: OrbitControls::new(config.orbit.clone(), camera.eye, camera.target),
            pointer_px: None,
        }
    }

    pub fn state(&self) -> AutoRotateState {
        self.state
    }

    pub fn cooldown(&self) -> &CooldownTimer {
        &self.cooldown
    }

    pub fn orbit(&self) -> &OrbitControls {
        &self.orbit
    }

    /// Last known pointer position in CSS pixels, kept between move events.
    pub fn pointer_px(&self) -> Option<Vec2> {
        self.pointer_px
    }

    pub fn pointer_ndc(&self, viewport: &Viewport) -> Option<Vec2> {
        self.pointer_px.and_then(|px| viewport.ndc_from_px(px))
    }

    pub fn handle(&mut self, event: &InputEvent, viewport: &Viewport) {
        match *event {
            InputEvent::PointerMove { x, y } | InputEvent::TouchMove { x, y } => {
                let px = Vec2::new(x, y);
                self.pointer_px = Some(px);
                if self.orbit.is_dragging() {
                    self.orbit.drag_to(px, viewport.height);
                }
            }
            InputEvent::PointerDown { x, y } | InputEvent::TouchStart { x, y } => {
                let px = Vec2::new(x, y);
                self.pointer_px = Some(px);
                self.cooldown.cancel();
                self.armed_this_frame = false;
                self.transition(AutoRotateState::UserControlling);
                self.orbit.begin_drag(px);
            }
            InputEvent::PointerUp | InputEvent::TouchEnd => {
                self.orbit.end_drag();
                if self.state == AutoRotateState::UserControlling {
                    self.arm_cooldown();
                    self.transition(AutoRotateState::Cooldown);
                }
            }
            InputEvent::PointerLeave => {
                self.pointer_px = None;
            }
            InputEvent::Wheel { delta_y } => {
                if !self.orbit.config().zoom_enabled {
                    return;
                }
                self.orbit.zoom(delta_y);
                if self.state != AutoRotateState::UserControlling {
                    self.arm_cooldown();
                    self.transition(AutoRotateState::Cooldown);
                }
            }
            InputEvent::Resize { .. } => {}
        }
    }

    /// Advance the cooldown timer and camera damping.
    pub fn update(&mut self, dt: Duration, camera: &mut Camera) {
        let fresh = std::mem::take(&mut self.armed_this_frame);
        if !fresh && self.cooldown.advance(dt) && self.state == AutoRotateState::Cooldown {
            self.transition(AutoRotateState::AutoRotating);
        }
        self.orbit.update(dt.as_secs_f32(), camera);
    }

    pub fn is_auto_rotating(&self) -> bool {
        self.auto_rotate && self.state == AutoRotateState::AutoRotating
    }

    /// Globe spin to apply for a frame of length `dt`.
    pub fn auto_rotate_angle(&self, dt: Duration) -> f32 {
        if self.is_auto_rotating() {
            self.auto_rotate_rad_per_sec * dt.as_secs_f32()
        } else {
            0.0
        }
    }

    /// Drop any pending timer and drag; used on teardown.
    pub fn cancel(&mut self) {
        self.cooldown.cancel();
        self.armed_this_frame = false;
        self.orbit.end_drag();
    }

    fn arm_cooldown(&mut self) {
        self.cooldown.arm(self.cooldown_duration);
        self.armed_this_frame = true;
    }

    fn transition(&mut self, next: AutoRotateState) {
        if self.state != next {
            log::debug!("[input] {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }
}
