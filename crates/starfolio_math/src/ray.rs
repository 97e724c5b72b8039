//! Rays and ray/sphere intersection
//!
//! Used to turn a cursor position into a pick against body bounding spheres.

use glam::{Mat4, Vec2, Vec3};

/// A half-line with a normalized direction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; the direction is normalized
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Build a world-space ray through a point in normalized device coordinates
    ///
    /// `inv_view_proj` is the inverse of a projection that maps depth to [0, 1].
    pub fn from_ndc(ndc: Vec2, inv_view_proj: Mat4) -> Self {
        let near = inv_view_proj.project_point3(ndc.extend(0.0));
        let far = inv_view_proj.project_point3(ndc.extend(1.0));
        Self::new(near, far - near)
    }

    /// Point at distance `t` along the ray
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance to the first hit with a sphere, if any
    ///
    /// An origin inside the sphere reports the exit point.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrt_d = discriminant.sqrt();
        let t0 = -b - sqrt_d;
        if t0 >= 0.0 {
            return Some(t0);
        }
        let t1 = -b + sqrt_d;
        (t1 >= 0.0).then_some(t1)
    }
}

/// Closest sphere hit along a ray
///
/// Each candidate is `(key, center, radius)`; ties keep the first candidate.
pub fn nearest_sphere_hit<K, I>(ray: &Ray, spheres: I) -> Option<(K, f32)>
where
    I: IntoIterator<Item = (K, Vec3, f32)>,
{
    let mut best: Option<(K, f32)> = None;
    for (key, center, radius) in spheres {
        if let Some(t) = ray.intersect_sphere(center, radius) {
            match &best {
                Some((_, best_t)) if *best_t <= t => {}
                _ => best = Some((key, t)),
            }
        }
    }
    best
}

/// Convert a pixel position (origin top-left) to normalized device coordinates
pub fn screen_to_ndc(position: Vec2, viewport: Vec2) -> Vec2 {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        2.0 * position.x / viewport.x - 1.0,
        1.0 - 2.0 * position.y / viewport.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    #[test]
    fn test_hit_in_front() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        let t = ray.intersect_sphere(Vec3::ZERO, 1.0).unwrap();
        assert!((t - 9.0).abs() < EPSILON);
        assert!((ray.at(t) - Vec3::new(0.0, 0.0, 1.0)).length() < EPSILON);
    }

    #[test]
    fn test_miss_to_the_side() {
        let ray = Ray::new(Vec3::new(3.0, 0.0, 10.0), Vec3::NEG_Z);
        assert!(ray.intersect_sphere(Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn test_sphere_behind_origin() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z);
        assert!(ray.intersect_sphere(Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn test_origin_inside_reports_exit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = ray.intersect_sphere(Vec3::ZERO, 2.0).unwrap();
        assert!((t - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_nearest_hit_picks_closest() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 20.0), Vec3::NEG_Z);
        let spheres = vec![
            ("far", Vec3::new(0.0, 0.0, -5.0), 1.0),
            ("near", Vec3::new(0.0, 0.0, 5.0), 1.0),
            ("off", Vec3::new(10.0, 0.0, 5.0), 1.0),
        ];
        let (key, t) = nearest_sphere_hit(&ray, spheres).unwrap();
        assert_eq!(key, "near");
        assert!((t - 14.0).abs() < EPSILON);
    }

    #[test]
    fn test_nearest_hit_none() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        let spheres: Vec<(u32, Vec3, f32)> = vec![(1, Vec3::new(5.0, 0.0, 0.0), 1.0)];
        assert!(nearest_sphere_hit(&ray, spheres).is_none());
    }

    #[test]
    fn test_screen_to_ndc() {
        let viewport = Vec2::new(800.0, 600.0);
        assert_eq!(screen_to_ndc(Vec2::new(400.0, 300.0), viewport), Vec2::ZERO);
        assert_eq!(screen_to_ndc(Vec2::ZERO, viewport), Vec2::new(-1.0, 1.0));
        assert_eq!(screen_to_ndc(viewport, viewport), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_from_ndc_center_looks_down_view_axis() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(1.0, 1.5, 0.1, 100.0);
        let ray = Ray::from_ndc(Vec2::ZERO, (proj * view).inverse());
        assert!((ray.direction - Vec3::NEG_Z).length() < EPSILON);
        assert!((ray.origin.z - 9.9).abs() < 0.001);
    }
}
