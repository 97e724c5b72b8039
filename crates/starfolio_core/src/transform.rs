//! 3D Transform (position, orientation, scale)

use serde::{Deserialize, Serialize};
use starfolio_math::{Euler, Mat4, Vec3};

/// Position, Euler orientation, and uniform scale
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position in world space
    pub position: Vec3,
    /// Orientation (intrinsic XYZ)
    pub rotation: Euler,
    /// Uniform scale factor
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Create an identity transform
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Euler::IDENTITY,
            scale: 1.0,
        }
    }

    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Euler) -> Self {
        Self {
            position,
            rotation,
            scale: 1.0,
        }
    }

    /// Set the uniform scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Unit vector along the local +Z axis
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation.forward()
    }

    /// Model matrix: scale, then rotate, then translate
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.rotation.to_quat(),
            self.position,
        )
    }

    /// Transform a point from local to world space
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation.rotate(point * self.scale) + self.position
    }

    /// Transform a direction (ignores position)
    pub fn transform_direction(&self, direction: Vec3) -> Vec3 {
        self.rotation.rotate(direction * self.scale)
    }
}
