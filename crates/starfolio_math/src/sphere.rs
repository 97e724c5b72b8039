//! Point placement on spheres
//!
//! Two layouts are provided: particle shells, which place points from a pair
//! of spherical angles drawn uniformly in [0, 2π), and star shells, which use
//! uniformly distributed directions at slowly shrinking radii.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Point at spherical angles `theta` (polar) and `phi` (azimuth)
pub fn shell_point(radius: f32, theta: f32, phi: f32) -> Vec3 {
    Vec3::new(
        radius * theta.sin() * phi.cos(),
        radius * theta.sin() * phi.sin(),
        radius * theta.cos(),
    )
}

/// Scatter `count` points around `radius`, each offset by up to `±jitter / 2`
///
/// Both angles are drawn from [0, 2π), which bunches points toward the poles.
/// That look is intentional for the decorative halos.
pub fn particle_shell<R: Rng + ?Sized>(rng: &mut R, count: usize, radius: f32, jitter: f32) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            let theta = rng.gen::<f32>() * TAU;
            let phi = rng.gen::<f32>() * TAU;
            let r = radius + (rng.gen::<f32>() - 0.5) * jitter;
            shell_point(r, theta, phi)
        })
        .collect()
}

/// Uniformly distributed unit direction
pub fn uniform_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let polar = (1.0 - 2.0 * rng.gen::<f32>()).clamp(-1.0, 1.0).acos();
    let azimuth = rng.gen::<f32>() * TAU;
    Vec3::new(
        polar.sin() * azimuth.sin(),
        polar.cos(),
        polar.sin() * azimuth.cos(),
    )
}

/// Star positions between `radius` and `radius + depth`
///
/// Starts at the outer edge and shrinks the shell by a random fraction of
/// `depth / count` per star.
pub fn star_shell<R: Rng + ?Sized>(rng: &mut R, count: usize, radius: f32, depth: f32) -> Vec<Vec3> {
    if count == 0 {
        return Vec::new();
    }
    let increment = depth / count as f32;
    let mut r = radius + depth;
    (0..count)
        .map(|_| {
            r -= increment * rng.gen::<f32>();
            uniform_direction(rng) * r
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_shell_point_poles() {
        let p = shell_point(2.0, 0.0, 1.0);
        assert!((p - Vec3::new(0.0, 0.0, 2.0)).length() < 0.0001);
    }

    #[test]
    fn test_particle_shell_radius_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let points = particle_shell(&mut rng, 100, 2.0, 0.2);
        assert_eq!(points.len(), 100);
        for p in points {
            let r = p.length();
            assert!((1.9 - 0.0001..=2.1 + 0.0001).contains(&r), "radius {}", r);
        }
    }

    #[test]
    fn test_uniform_direction_is_unit() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            assert!((uniform_direction(&mut rng).length() - 1.0).abs() < 0.0001);
        }
    }

    #[test]
    fn test_star_shell_stays_within_depth() {
        let mut rng = StdRng::seed_from_u64(3);
        let stars = star_shell(&mut rng, 500, 100.0, 50.0);
        assert_eq!(stars.len(), 500);
        for s in &stars {
            let r = s.length();
            assert!(r <= 150.001 && r >= 99.999, "radius {}", r);
        }
    }

    #[test]
    fn test_star_shell_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(star_shell(&mut rng, 0, 100.0, 50.0).is_empty());
    }
}
