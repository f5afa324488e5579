//! Tunable parameters for a mounted globe.
//!
//! Every section has a `Default` matching the shipped landing page. With the
//! `serde` feature enabled, partial JSON objects deserialize on top of those
//! defaults.

use crate::constants::*;
use crate::error::{GlobeError, Result};
use std::time::Duration;

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GlobeConfig {
    pub globe: GlobeBodyConfig,
    pub camera: CameraConfig,
    pub orbit: OrbitConfig,
    pub interaction: InteractionConfig,
    pub markers: MarkerConfig,
    pub lights: LightConfig,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GlobeBodyConfig {
    pub radius: f32,
    pub segments: u32,
}

impl Default for GlobeBodyConfig {
    fn default() -> Self {
        Self {
            radius: GLOBE_RADIUS,
            segments: SPHERE_SEGMENTS,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CameraConfig {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: CAMERA_FOV_DEG,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            distance: CAMERA_DISTANCE,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OrbitConfig {
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_enabled: bool,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            damping_factor: DAMPING_FACTOR,
            rotate_speed: ROTATE_SPEED,
            zoom_enabled: true,
            zoom_speed: ZOOM_SPEED,
            min_distance: MIN_DISTANCE,
            max_distance: MAX_DISTANCE,
            auto_rotate: true,
            auto_rotate_speed: AUTO_ROTATE_SPEED,
        }
    }
}

impl OrbitConfig {
    /// Auto-rotation rate in radians per second (`2π/60` per speed unit).
    pub fn auto_rotate_rad_per_sec(&self) -> f32 {
        std::f32::consts::TAU / 60.0 * self.auto_rotate_speed
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InteractionConfig {
    pub cooldown_ms: u64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: COOLDOWN_MS,
        }
    }
}

impl InteractionConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MarkerConfig {
    pub lift: f32,
    pub base_scale: f32,
    pub hover_scale: f32,
    pub pulse_amplitude: f32,
    pub pulse_hz: f32,
    pub base_opacity: f32,
    pub hover_opacity: f32,
    pub pick_radius_factor: f32,
    /// Ignore markers hidden behind the globe body when picking.
    pub occlude_by_globe: bool,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            lift: MARKER_LIFT,
            base_scale: MARKER_BASE_SCALE,
            hover_scale: MARKER_HOVER_SCALE,
            pulse_amplitude: MARKER_PULSE_AMPLITUDE,
            pulse_hz: MARKER_PULSE_HZ,
            base_opacity: MARKER_BASE_OPACITY,
            hover_opacity: MARKER_HOVER_OPACITY,
            pick_radius_factor: MARKER_PICK_RADIUS_FACTOR,
            occlude_by_globe: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LightConfig {
    pub ambient_intensity: f32,
    pub point_intensity: f32,
    pub point_position: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            ambient_intensity: AMBIENT_INTENSITY,
            point_intensity: POINT_LIGHT_INTENSITY,
            point_position: POINT_LIGHT_POSITION,
        }
    }
}

fn ensure(ok: bool, what: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(GlobeError::InvalidConfig(what.to_string()))
    }
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

impl GlobeConfig {
    pub fn validate(&self) -> Result<()> {
        ensure(positive(self.globe.radius), "globe.radius must be > 0")?;
        ensure(self.globe.segments >= 3, "globe.segments must be >= 3")?;

        let c = &self.camera;
        ensure(
            c.fov_deg.is_finite() && c.fov_deg > 0.0 && c.fov_deg < 180.0,
            "camera.fov_deg must be within (0, 180)",
        )?;
        ensure(positive(c.near), "camera.near must be > 0")?;
        ensure(c.far.is_finite() && c.far > c.near, "camera.far must exceed camera.near")?;
        ensure(positive(c.distance), "camera.distance must be > 0")?;

        let o = &self.orbit;
        ensure(
            o.damping_factor.is_finite() && o.damping_factor > 0.0 && o.damping_factor <= 1.0,
            "orbit.damping_factor must be within (0, 1]",
        )?;
        ensure(
            o.rotate_speed.is_finite() && o.rotate_speed >= 0.0,
            "orbit.rotate_speed must be >= 0",
        )?;
        ensure(
            o.zoom_speed.is_finite() && o.zoom_speed >= 0.0,
            "orbit.zoom_speed must be >= 0",
        )?;
        ensure(positive(o.min_distance), "orbit.min_distance must be > 0")?;
        ensure(
            o.max_distance.is_finite() && o.max_distance >= o.min_distance,
            "orbit.max_distance must be >= orbit.min_distance",
        )?;
        ensure(
            o.auto_rotate_speed.is_finite(),
            "orbit.auto_rotate_speed must be finite",
        )?;

        let m = &self.markers;
        ensure(m.lift.is_finite() && m.lift >= 0.0, "markers.lift must be >= 0")?;
        ensure(positive(m.base_scale), "markers.base_scale must be > 0")?;
        ensure(
            m.hover_scale.is_finite() && m.hover_scale >= 1.0,
            "markers.hover_scale must be >= 1",
        )?;
        ensure(
            m.pulse_amplitude.is_finite() && (0.0..1.0).contains(&m.pulse_amplitude),
            "markers.pulse_amplitude must be within [0, 1)",
        )?;
        ensure(
            m.pulse_hz.is_finite() && m.pulse_hz >= 0.0,
            "markers.pulse_hz must be >= 0",
        )?;
        ensure(
            (0.0..=1.0).contains(&m.base_opacity) && (0.0..=1.0).contains(&m.hover_opacity),
            "marker opacities must be within [0, 1]",
        )?;
        ensure(
            positive(m.pick_radius_factor),
            "markers.pick_radius_factor must be > 0",
        )?;

        let l = &self.lights;
        ensure(
            l.ambient_intensity.is_finite() && l.ambient_intensity >= 0.0,
            "lights.ambient_intensity must be >= 0",
        )?;
        ensure(
            l.point_intensity.is_finite() && l.point_intensity >= 0.0,
            "lights.point_intensity must be >= 0",
        )?;
        Ok(())
    }
}
