//! Damped orbit camera around a fixed target.
//!
//! Semantics follow the familiar three.js `OrbitControls`: drag deltas are
//! accumulated into a spherical delta, a fraction of which is applied every
//! frame while the remainder decays. The per-frame damping factor is
//! normalized to a 60 Hz reference so the feel is frame-rate independent.

use crate::camera::Camera;
use crate::config::OrbitConfig;
use crate::constants::{POLAR_EPSILON, REFERENCE_FPS};
use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

const RESIDUAL_EPSILON: f32 = 1e-6;
const ZOOM_BASE: f32 = 0.95;

#[derive(Clone, Debug)]
pub struct OrbitControls {
    config: OrbitConfig,
    target: Vec3,
    radius: f32,
    theta: f32,
    phi: f32,
    delta_theta: f32,
    delta_phi: f32,
    drag_last_px: Option<Vec2>,
}

impl OrbitControls {
    /// Start orbiting from the current `eye` position around `target`.
    pub fn new(config: OrbitConfig, eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let radius = offset.length().max(f32::EPSILON);
        let theta = offset.x.atan2(offset.z);
        let phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
        let mut controls = Self {
            config,
            target,
            radius,
            theta,
            phi,
            delta_theta: 0.0,
            delta_phi: 0.0,
            drag_last_px: None,
        };
        controls.clamp();
        controls
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    pub fn azimuth(&self) -> f32 {
        self.theta
    }

    pub fn polar(&self) -> f32 {
        self.phi
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_last_px.is_some()
    }

    /// Pending rotation that damping has not applied yet.
    pub fn pending_rotation(&self) -> Vec2 {
        Vec2::new(self.delta_theta, self.delta_phi)
    }

    pub fn begin_drag(&mut self, px: Vec2) {
        self.drag_last_px = Some(px);
    }

    /// Accumulate rotation for a drag to `px`; a full viewport height of
    /// travel equals one turn at rotate speed 1.
    pub fn drag_to(&mut self, px: Vec2, viewport_height: f32) {
        let Some(last) = self.drag_last_px else {
            return;
        };
        self.drag_last_px = Some(px);
        if viewport_height <= 0.0 {
            return;
        }
        let delta = (px - last) * self.config.rotate_speed;
        self.rotate_left(TAU * delta.x / viewport_height);
        self.rotate_up(TAU * delta.y / viewport_height);
    }

    pub fn end_drag(&mut self) {
        self.drag_last_px = None;
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    /// Apply a wheel step: negative `delta_y` moves closer, positive away.
    pub fn zoom(&mut self, delta_y: f32) {
        if !self.config.zoom_enabled || delta_y == 0.0 || !delta_y.is_finite() {
            return;
        }
        let scale = ZOOM_BASE.powf(self.config.zoom_speed);
        if delta_y < 0.0 {
            self.radius *= scale;
        } else {
            self.radius /= scale;
        }
        self.clamp();
    }

    /// Advance damping by `dt_sec` and write the resulting eye into `camera`.
    pub fn update(&mut self, dt_sec: f32, camera: &mut Camera) {
        let steps = (dt_sec.max(0.0)) * REFERENCE_FPS;
        let keep = (1.0 - self.config.damping_factor).powf(steps);
        let applied = 1.0 - keep;

        self.theta += self.delta_theta * applied;
        self.phi += self.delta_phi * applied;
        self.delta_theta *= keep;
        self.delta_phi *= keep;
        if self.delta_theta.abs() < RESIDUAL_EPSILON {
            self.delta_theta = 0.0;
        }
        if self.delta_phi.abs() < RESIDUAL_EPSILON {
            self.delta_phi = 0.0;
        }
        self.theta = self.theta.rem_euclid(TAU);
        self.clamp();

        camera.target = self.target;
        camera.eye = self.eye();
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.target
            + Vec3::new(
                self.radius * sin_phi * sin_theta,
                self.radius * cos_phi,
                self.radius * sin_phi * cos_theta,
            )
    }

    fn clamp(&mut self) {
        self.phi = self.phi.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.radius = self
            .radius
            .clamp(self.config.min_distance, self.config.max_distance);
    }
}
