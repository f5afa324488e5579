//! Per-location markers attached to the globe node.
//!
//! Each marker is a quad whose +Z normal points away from the globe center.
//! Markers are children of the globe, so they co-rotate without any
//! per-frame re-projection. Hover feedback (scale, opacity, pulse) is state of
//! the marker itself.

use crate::config::MarkerConfig;
use crate::geo::LocationSet;
use crate::picking::PickTarget;
use crate::scene::{NodeId, SceneGraph, Transform};
use bytemuck::{Pod, Zeroable};
use glam::{Quat, Vec3};
use smallvec::SmallVec;
use std::f32::consts::TAU;
use std::time::Duration;

/// GPU-ready per-marker instance data.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MarkerInstance {
    pub model: [[f32; 4]; 4],
    /// Linear RGB tint and opacity.
    pub color: [f32; 4],
    /// Cell of the glyph atlas; equals the location index.
    pub glyph: u32,
    pub _pad: [u32; 3],
}

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    location: usize,
    node: NodeId,
    surface: Vec3,
    scale: f32,
    opacity: f32,
    pulse_phase: f32,
    hovered: bool,
}

impl Marker {
    pub fn location(&self) -> usize {
        self.location
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Projected point on the globe surface (before the outward lift), in
    /// globe-local space.
    pub fn surface(&self) -> Vec3 {
        self.surface
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }
}

pub struct MarkerRenderer {
    config: MarkerConfig,
    markers: SmallVec<[Marker; 8]>,
}

impl MarkerRenderer {
    /// Create one marker per location as a child of `parent`.
    pub fn build(
        config: &MarkerConfig,
        locations: &LocationSet,
        radius: f32,
        graph: &mut SceneGraph,
        parent: NodeId,
    ) -> Self {
        let mut markers = SmallVec::new();
        for (i, loc) in locations.iter().enumerate() {
            let surface = loc.surface_position(radius as f64).as_vec3();
            let mut normal = surface.normalize_or_zero();
            if normal == Vec3::ZERO {
                normal = Vec3::Y;
            }
            let rotation = Quat::from_rotation_arc(Vec3::Z, normal);
            let node = graph.spawn(
                Transform {
                    translation: normal * (radius + config.lift),
                    rotation,
                    scale: Vec3::splat(config.base_scale),
                },
                Some(parent),
            );
            markers.push(Marker {
                location: i,
                node,
                surface,
                scale: config.base_scale,
                opacity: config.base_opacity,
                pulse_phase: 0.0,
                hovered: false,
            });
        }
        log::debug!("[markers] placed {} markers", markers.len());
        Self {
            config: config.clone(),
            markers,
        }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn get(&self, index: usize) -> Option<&Marker> {
        self.markers.get(index)
    }

    /// Drive hover feedback for one frame: the hovered marker grows and pulses,
    /// every other marker snaps back to its baseline.
    pub fn apply_hover(&mut self, hovered: Option<usize>, dt: Duration, graph: &mut SceneGraph) {
        let c = &self.config;
        for m in self.markers.iter_mut() {
            if hovered == Some(m.location) {
                if !m.hovered {
                    m.pulse_phase = 0.0;
                }
                m.hovered = true;
                m.pulse_phase = (m.pulse_phase + TAU * c.pulse_hz * dt.as_secs_f32()) % TAU;
                let pulse = 1.0 + c.pulse_amplitude * m.pulse_phase.sin();
                m.scale = c.base_scale * c.hover_scale * pulse;
                m.opacity = c.hover_opacity;
            } else {
                m.hovered = false;
                m.pulse_phase = 0.0;
                m.scale = c.base_scale;
                m.opacity = c.base_opacity;
            }
            graph.set_uniform_scale(m.node, m.scale);
        }
    }

    /// World-space pick spheres for the current frame.
    pub fn pick_targets(&self, graph: &SceneGraph) -> SmallVec<[PickTarget; 8]> {
        self.markers
            .iter()
            .map(|m| {
                let (scale, _, center) = graph.world_matrix(m.node).to_scale_rotation_translation();
                PickTarget {
                    index: m.location,
                    center,
                    radius: scale.max_element() * self.config.pick_radius_factor,
                }
            })
            .collect()
    }

    pub fn instances(&self, graph: &SceneGraph, locations: &LocationSet) -> Vec<MarkerInstance> {
        self.markers
            .iter()
            .map(|m| {
                let [r, g, b] = locations
                    .get(m.location)
                    .map_or([1.0; 3], |loc| loc.role.linear_rgb());
                MarkerInstance {
                    model: graph.world_matrix(m.node).to_cols_array_2d(),
                    color: [r, g, b, m.opacity],
                    glyph: m.location as u32,
                    _pad: [0; 3],
                }
            })
            .collect()
    }
}
