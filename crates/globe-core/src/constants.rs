// Shared tuning constants for the globe. Defaults mirror the values the
// marketing page shipped with; `GlobeConfig::default()` is built from these.

// Globe geometry
pub const GLOBE_RADIUS: f32 = 2.0;
pub const SPHERE_SEGMENTS: u32 = 64; // width and height segments of the UV sphere

// Camera
pub const CAMERA_FOV_DEG: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_DISTANCE: f32 = 6.0; // initial eye distance along +Z

// Orbit controls (three.js OrbitControls units)
pub const DAMPING_FACTOR: f32 = 0.05;
pub const ROTATE_SPEED: f32 = 0.5;
pub const ZOOM_SPEED: f32 = 0.5;
pub const MIN_DISTANCE: f32 = 4.0;
pub const MAX_DISTANCE: f32 = 10.0;
pub const AUTO_ROTATE_SPEED: f32 = 0.5; // 2π/60 rad/s per unit, i.e. 120 s per turn at 0.5
pub const REFERENCE_FPS: f32 = 60.0; // damping factor is expressed per frame at this rate
pub const POLAR_EPSILON: f32 = 1e-6;

// Interaction
pub const COOLDOWN_MS: u64 = 3_000; // quiescence before auto-rotation resumes

// Markers
pub const MARKER_LIFT: f32 = 0.15; // outward offset from the surface
pub const MARKER_BASE_SCALE: f32 = 0.4;
pub const MARKER_HOVER_SCALE: f32 = 1.3; // multiplier over base while hovered
pub const MARKER_PULSE_AMPLITUDE: f32 = 0.07; // fraction of the hovered scale
pub const MARKER_PULSE_HZ: f32 = 1.5;
pub const MARKER_BASE_OPACITY: f32 = 0.8;
pub const MARKER_HOVER_OPACITY: f32 = 1.0;
pub const MARKER_PICK_RADIUS_FACTOR: f32 = 0.5; // pick sphere radius relative to world scale

// Role palette (sRGB hex, as drawn on the glyph canvas)
pub const SOURCE_COLOR_HEX: &str = "#1EAEDB";
pub const DESTINATION_COLOR_HEX: &str = "#34D399";

// Lights
pub const AMBIENT_INTENSITY: f32 = 0.15;
pub const POINT_LIGHT_INTENSITY: f32 = 0.6;
pub const POINT_LIGHT_POSITION: [f32; 3] = [5.0, 3.0, 5.0];
