pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod geo;
pub mod globe;
pub mod host;
pub mod interaction;
pub mod marker;
pub mod mesh;
pub mod orbit;
pub mod picking;
pub mod scene;

pub static GLOBE_WGSL: &str = include_str!("../shaders/globe.wgsl");
pub static MARKER_WGSL: &str = include_str!("../shaders/marker.wgsl");

pub use camera::*;
pub use config::*;
pub use error::*;
pub use geo::*;
pub use globe::*;
pub use host::*;
pub use interaction::*;
pub use marker::*;
pub use mesh::*;
pub use orbit::*;
pub use picking::*;
pub use scene::*;
