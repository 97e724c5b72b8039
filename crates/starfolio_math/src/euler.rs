//! Euler-angle orientation
//!
//! Angles are applied as intrinsic rotations about X, then Y, then Z. The
//! equivalent quaternion is `qx * qy * qz`, so a roll about Z never changes
//! where the local +Z axis points.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Orientation as three angles in radians
///
/// `x` is pitch, `y` is yaw and `z` is roll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Euler {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Euler {
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    /// Create a new orientation from pitch, yaw and roll
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn from_array(a: [f32; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Convert to a unit quaternion (intrinsic XYZ)
    pub fn to_quat(self) -> Quat {
        Quat::from_rotation_x(self.x) * Quat::from_rotation_y(self.y) * Quat::from_rotation_z(self.z)
    }

    /// Rotate a vector by this orientation
    #[inline]
    pub fn rotate(self, v: Vec3) -> Vec3 {
        self.to_quat() * v
    }

    /// The canonical forward axis (0, 0, 1) rotated into this orientation, normalized
    pub fn forward(self) -> Vec3 {
        self.rotate(Vec3::Z).normalize_or_zero()
    }

    /// Same orientation with the roll component cleared
    #[inline]
    pub fn without_roll(self) -> Self {
        Self { z: 0.0, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 0.0001;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < EPSILON
    }

    #[test]
    fn test_identity_forward_is_plus_z() {
        assert!(vec_approx_eq(Euler::IDENTITY.forward(), Vec3::Z));
    }

    #[test]
    fn test_yaw_turns_forward_in_xz_plane() {
        let yaw = 0.3;
        let forward = Euler::new(0.0, yaw, 0.0).forward();
        assert!(vec_approx_eq(forward, Vec3::new(yaw.sin(), 0.0, yaw.cos())));
    }

    #[test]
    fn test_pitch_tilts_forward_down() {
        let pitch = 0.4;
        let forward = Euler::new(pitch, 0.0, 0.0).forward();
        assert!(vec_approx_eq(forward, Vec3::new(0.0, -pitch.sin(), pitch.cos())));
    }

    #[test]
    fn test_roll_does_not_move_forward() {
        let a = Euler::new(0.2, 0.7, 0.0).forward();
        let b = Euler::new(0.2, 0.7, 5.0).forward();
        assert!(vec_approx_eq(a, b), "{:?} vs {:?}", a, b);
    }

    #[test]
    fn test_intrinsic_order() {
        // Yaw a quarter turn then pitch: X rotation is applied in the already-yawed frame's parent
        let e = Euler::new(FRAC_PI_2, FRAC_PI_2, 0.0);
        let expected = Quat::from_rotation_x(FRAC_PI_2) * (Quat::from_rotation_y(FRAC_PI_2) * Vec3::Z);
        assert!(vec_approx_eq(e.rotate(Vec3::Z), expected));
    }

    #[test]
    fn test_forward_is_unit_length() {
        let forward = Euler::new(1.1, -2.3, 0.9).forward();
        assert!((forward.length() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_without_roll() {
        let e = Euler::new(1.0, 2.0, 3.0).without_roll();
        assert_eq!(e, Euler::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_array_conversion() {
        let e = Euler::from_array([0.1, 0.2, 0.3]);
        assert_eq!(e.to_array(), [0.1, 0.2, 0.3]);
    }
}
