// Configuration defaults and validation.

use globe_core::*;
use std::time::Duration;

#[test]
fn defaults_validate_and_match_landing_page() {
    let c = GlobeConfig::default();
    c.validate().unwrap();
    assert_eq!(c.globe.radius, 2.0);
    assert_eq!(c.camera.distance, 6.0);
    assert_eq!(c.camera.fov_deg, 45.0);
    assert_eq!(c.orbit.min_distance, 4.0);
    assert_eq!(c.orbit.max_distance, 10.0);
    assert_eq!(c.interaction.cooldown(), Duration::from_secs(3));
    assert!(!c.markers.occlude_by_globe);
}

#[test]
fn auto_rotate_rate_is_two_minutes_per_turn() {
    let c = OrbitConfig::default();
    let per_turn = std::f32::consts::TAU / c.auto_rotate_rad_per_sec();
    assert!((per_turn - 120.0).abs() < 1e-3, "{per_turn}");
}

#[test]
fn invalid_values_are_rejected() {
    let cases: Vec<fn(&mut GlobeConfig)> = vec![
        |c| c.globe.radius = 0.0,
        |c| c.globe.segments = 2,
        |c| c.camera.fov_deg = 180.0,
        |c| c.camera.far = c.camera.near,
        |c| c.orbit.damping_factor = 0.0,
        |c| c.orbit.max_distance = 3.0,
        |c| c.orbit.auto_rotate_speed = f32::NAN,
        |c| c.markers.base_scale = -1.0,
        |c| c.markers.hover_scale = 0.5,
        |c| c.markers.pulse_amplitude = 1.0,
        |c| c.markers.base_opacity = 1.5,
        |c| c.markers.pick_radius_factor = 0.0,
        |c| c.lights.point_intensity = -0.1,
    ];
    for (i, mutate) in cases.into_iter().enumerate() {
        let mut c = GlobeConfig::default();
        mutate(&mut c);
        assert!(
            matches!(c.validate(), Err(GlobeError::InvalidConfig(_))),
            "case {i} should fail"
        );
    }
}
