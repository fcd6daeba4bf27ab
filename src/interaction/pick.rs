use bevy::prelude::*;

/// Parallel plane/ray detection threshold.
const PLANE_EPSILON: f32 = 1e-5;

/// Distance along `ray` to the surface of the sphere at `center`, if hit.
/// A ray starting inside the sphere reports distance 0.
pub fn ray_sphere_intersection(ray: &Ray3d, center: Vec3, radius: f32) -> Option<f32> {
    let m = ray.origin - center;
    let b = m.dot(*ray.direction);
    let c = m.length_squared() - radius * radius;
    if c > 0.0 && b > 0.0 {
        // Origin outside and pointing away.
        return None;
    }
    let discr = b * b - c;
    if discr < 0.0 {
        return None;
    }
    let t = -b - discr.sqrt();
    Some(t.max(0.0))
}

/// Intersection point of `ray` with the plane through `plane_origin` with
/// `plane_normal`. None for rays parallel to, or leaving away from, the plane.
pub fn ray_plane_intersection(ray: &Ray3d, plane_origin: Vec3, plane_normal: Vec3) -> Option<Vec3> {
    let denom = plane_normal.dot(*ray.direction);
    if denom.abs() < PLANE_EPSILON {
        return None;
    }
    let t = (plane_origin - ray.origin).dot(plane_normal) / denom;
    if t < 0.0 {
        return None;
    }
    Some(ray.origin + *ray.direction * t)
}

/// One pickable sub-part: the compound root that owns it plus the part's
/// world-space bounding sphere.
pub type PartCandidate = (Entity, Vec3, f32);

/// Resolve a pointer ray against every candidate part and return the owning
/// compound root of the nearest hit, with its ray distance. Callers always
/// receive the addressable root, never a sub-part; single-part shapes and
/// multi-part compounds resolve identically. Empty input resolves to None.
pub fn resolve_pick(
    ray: &Ray3d,
    parts: impl IntoIterator<Item = PartCandidate>,
) -> Option<(Entity, f32)> {
    let mut best: Option<(Entity, f32)> = None;
    for (root, center, radius) in parts {
        let Some(t) = ray_sphere_intersection(ray, center, radius) else {
            continue;
        };
        match best {
            Some((_, best_t)) if t >= best_t => {}
            _ => best = Some((root, t)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray(origin: Vec3, toward: Vec3) -> Ray3d {
        Ray3d {
            origin,
            direction: Dir3::new(toward - origin).unwrap(),
        }
    }

    #[test]
    fn sphere_hit_reports_entry_distance() {
        let r = ray(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        let t = ray_sphere_intersection(&r, Vec3::ZERO, 1.0).unwrap();
        assert!((t - 9.0).abs() < 1e-4);
    }

    #[test]
    fn sphere_behind_ray_misses() {
        let r = ray(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, 20.0));
        assert!(ray_sphere_intersection(&r, Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn parallel_ray_misses_plane() {
        let r = Ray3d {
            origin: Vec3::new(0.0, 0.0, 5.0),
            direction: Dir3::X,
        };
        assert!(ray_plane_intersection(&r, Vec3::ZERO, Vec3::Z).is_none());
    }

    #[test]
    fn plane_hit_lands_on_plane() {
        let r = ray(Vec3::new(1.0, 2.0, 10.0), Vec3::new(1.0, 2.0, 0.0));
        let p = ray_plane_intersection(&r, Vec3::ZERO, Vec3::Z).unwrap();
        assert!(p.z.abs() < 1e-4);
    }
}
