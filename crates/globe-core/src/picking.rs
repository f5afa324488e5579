use crate::camera::Ray;
use glam::Vec3;

/// Nearest entry distance along `ray_dir` (unit length) into a sphere, if the
/// sphere lies in front of the origin.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Pick volume of one marker in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickTarget {
    pub index: usize,
    pub center: Vec3,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub index: usize,
    pub distance: f32,
}

/// Closest target hit by `ray`.
///
/// Ordering contract: the smallest distance wins; equal distances resolve to
/// the lower target index. With an `occluder` sphere, targets whose hit lies
/// behind the occluder's entry point are skipped.
pub fn pick_nearest(
    ray: &Ray,
    targets: &[PickTarget],
    occluder: Option<(Vec3, f32)>,
) -> Option<PickHit> {
    let limit = occluder
        .and_then(|(center, radius)| ray_sphere(ray.origin, ray.dir, center, radius))
        .unwrap_or(f32::INFINITY);

    let mut best: Option<PickHit> = None;
    for target in targets {
        let Some(t) = ray_sphere(ray.origin, ray.dir, target.center, target.radius) else {
            continue;
        };
        if t > limit {
            continue;
        }
        let closer = match best {
            None => true,
            Some(b) => t < b.distance || (t == b.distance && target.index < b.index),
        };
        if closer {
            best = Some(PickHit {
                index: target.index,
                distance: t,
            });
        }
    }
    best
}
