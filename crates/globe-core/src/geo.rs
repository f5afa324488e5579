//! Geographic input data and the lat/lng → sphere projection.

use crate::constants::{DESTINATION_COLOR_HEX, SOURCE_COLOR_HEX};
use crate::error::{GlobeError, Result};
use fnv::FnvHashMap;
use glam::DVec3;

/// Presentation hint that selects the marker color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Role {
    Source,
    Destination,
}

impl Role {
    pub fn color_hex(self) -> &'static str {
        match self {
            Role::Source => SOURCE_COLOR_HEX,
            Role::Destination => DESTINATION_COLOR_HEX,
        }
    }

    /// Role color as linear RGB, ready to tint a white glyph in the shader.
    pub fn linear_rgb(self) -> [f32; 3] {
        let [r, g, b] = parse_hex_rgb(self.color_hex());
        [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b)]
    }
}

/// A labeled point of interest on the globe.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct Location {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(alias = "lat"))]
    pub latitude: f64,
    #[cfg_attr(feature = "serde", serde(alias = "lng"))]
    pub longitude: f64,
    #[cfg_attr(feature = "serde", serde(alias = "type"))]
    pub role: Role,
    #[cfg_attr(feature = "serde", serde(alias = "currency"))]
    pub glyph: String,
}

impl Location {
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        role: Role,
        glyph: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            role,
            glyph: glyph.into(),
        }
    }

    /// Surface position of this location on a sphere of `radius`.
    pub fn surface_position(&self, radius: f64) -> DVec3 {
        lat_lng_to_vec3(self.latitude, self.longitude, radius)
    }

    fn check(&self) -> Result<()> {
        let invalid = |reason: &str| GlobeError::InvalidLocation {
            name: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.name.trim().is_empty() {
            return Err(invalid("name is empty"));
        }
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(invalid("latitude must be within [-90, 90]"));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(invalid("longitude must be within [-180, 180]"));
        }
        if self.glyph.is_empty() {
            return Err(invalid("glyph is empty"));
        }
        Ok(())
    }
}

/// The fixed, validated set of locations a globe is mounted with.
///
/// Names are unique; they are the lookup key for markers and the identity
/// reported as the hover state.
#[derive(Clone, Debug, Default)]
pub struct LocationSet {
    locations: Vec<Location>,
    by_name: FnvHashMap<String, usize>,
}

impl LocationSet {
    pub fn new(locations: Vec<Location>) -> Result<Self> {
        let mut by_name = FnvHashMap::default();
        for (i, loc) in locations.iter().enumerate() {
            loc.check()?;
            if by_name.insert(loc.name.clone(), i).is_some() {
                return Err(GlobeError::DuplicateLocation(loc.name.clone()));
            }
        }
        Ok(Self { locations, by_name })
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Location> {
        self.locations.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Location> {
        self.locations.iter()
    }
}

impl<'a> IntoIterator for &'a LocationSet {
    type Item = &'a Location;
    type IntoIter = std::slice::Iter<'a, Location>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The four corridors shown on the landing page.
pub fn default_locations() -> Vec<Location> {
    vec![
        Location::new("USA", 40.7128, -74.0060, Role::Source, "$"),
        Location::new("UAE", 25.2048, 55.2708, Role::Source, "د.إ"),
        Location::new("UK", 51.5074, -0.1278, Role::Source, "€"),
        Location::new("India", 20.5937, 78.9629, Role::Destination, "₹"),
    ]
}

/// Convert latitude/longitude in degrees to a point on a sphere of `radius`.
///
/// Out-of-range input is not rejected here; it yields a well-defined but
/// geographically meaningless point.
#[inline]
pub fn lat_lng_to_vec3(latitude: f64, longitude: f64, radius: f64) -> DVec3 {
    let phi = (90.0 - latitude).to_radians();
    let theta = (longitude + 180.0).to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    DVec3::new(
        -radius * sin_phi * cos_theta,
        radius * cos_phi,
        radius * sin_phi * sin_theta,
    )
}

fn parse_hex_rgb(hex: &str) -> [f32; 3] {
    let digits = hex.trim_start_matches('#');
    let channel = |i: usize| {
        digits
            .get(i..i + 2)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .map_or(1.0, |v| v as f32 / 255.0)
    };
    [channel(0), channel(2), channel(4)]
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
