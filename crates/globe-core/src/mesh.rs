//! UV-sphere tessellation for the globe body.
//!
//! The parameterization matches `geo::lat_lng_to_vec3`: `u = (lng + 180) / 360`
//! and `v = (90 - lat) / 180`, so a vertex at `(u, v)` sits exactly where the
//! projector would put the corresponding coordinate.

use bytemuck::{Pod, Zeroable};
use std::f32::consts::PI;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SphereVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Clone, Debug, Default)]
pub struct SphereMesh {
    pub vertices: Vec<SphereVertex>,
    pub indices: Vec<u32>,
}

impl SphereMesh {
    /// Build a sphere with `width_segments` slices around Y and
    /// `height_segments` stacks from pole to pole.
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let w = width_segments.max(3);
        let h = height_segments.max(2);

        let mut vertices = Vec::with_capacity(((w + 1) * (h + 1)) as usize);
        for iy in 0..=h {
            let v = iy as f32 / h as f32;
            let phi = v * PI;
            for ix in 0..=w {
                let u = ix as f32 / w as f32;
                let theta = u * 2.0 * PI;
                let n = [-theta.cos() * phi.sin(), phi.cos(), theta.sin() * phi.sin()];
                vertices.push(SphereVertex {
                    position: [n[0] * radius, n[1] * radius, n[2] * radius],
                    normal: n,
                    uv: [u, 1.0 - v],
                });
            }
        }

        let row = w + 1;
        let mut indices = Vec::with_capacity((w * h * 6) as usize);
        for iy in 0..h {
            for ix in 0..w {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;
                // the pole rows collapse to a single triangle per quad
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != h - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
