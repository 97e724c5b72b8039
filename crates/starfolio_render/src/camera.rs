//! Projection for the follow camera
//!
//! The camera rig in `starfolio_core` supplies position and look target; this
//! module adds the lens and the world-to-screen mapping used by the overlay.

use starfolio_core::CameraRig;
use starfolio_math::{Mat4, Vec2, Vec3};

/// Perspective lens parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraProjection {
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraProjection {
    fn default() -> Self {
        Self {
            fov_y: 75f32.to_radians(),
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// A world point mapped into the viewport
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    /// Pixel position, origin top-left
    pub position: Vec2,
    /// Distance in front of the camera along its view axis
    pub depth: f32,
}

impl CameraProjection {
    pub fn new(fov_y_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y: fov_y_degrees.to_radians(),
            near,
            far,
        }
    }

    /// Right-handed projection with depth in [0, 1]
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect.max(1e-4), self.near, self.far)
    }

    /// Combined view-projection for a rig
    pub fn view_projection(&self, rig: &CameraRig, aspect: f32) -> Mat4 {
        self.projection(aspect) * rig.view_matrix()
    }

    /// Pixels covered by one world unit at depth 1
    pub fn focal_length_px(&self, viewport_height: f32) -> f32 {
        0.5 * viewport_height / (0.5 * self.fov_y).tan()
    }

    /// Project a world point; `None` when it is behind the near plane
    pub fn world_to_screen(&self, view_proj: Mat4, point: Vec3, viewport: Vec2) -> Option<ScreenPoint> {
        let clip = view_proj * point.extend(1.0);
        if clip.w < self.near {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(ScreenPoint {
            position: Vec2::new(
                (ndc.x + 1.0) * 0.5 * viewport.x,
                (1.0 - ndc.y) * 0.5 * viewport.y,
            ),
            depth: clip.w,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfolio_core::{Actor, ControlScheme, FrameStep, Transform};

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    fn rig_looking_at_origin() -> CameraRig {
        let actor = Actor::new(Transform::identity(), ControlScheme::AutoAdvance);
        let mut rig = CameraRig::new(Vec3::new(0.0, 0.0, 10.0)).with_blend(0.0);
        rig.follow(&actor, FrameStep::unit());
        rig
    }

    #[test]
    fn test_default_lens() {
        let lens = CameraProjection::default();
        assert!((lens.fov_y - 75f32.to_radians()).abs() < 1e-6);
        assert_eq!(lens.near, 0.1);
        assert_eq!(lens.far, 1000.0);
    }

    #[test]
    fn test_target_projects_to_center() {
        let lens = CameraProjection::default();
        let vp = lens.view_projection(&rig_looking_at_origin(), VIEWPORT.x / VIEWPORT.y);
        let p = lens.world_to_screen(vp, Vec3::ZERO, VIEWPORT).unwrap();
        assert!((p.position - Vec2::new(400.0, 300.0)).length() < 0.01);
        assert!((p.depth - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_point_above_projects_higher_on_screen() {
        let lens = CameraProjection::default();
        let vp = lens.view_projection(&rig_looking_at_origin(), VIEWPORT.x / VIEWPORT.y);
        let p = lens.world_to_screen(vp, Vec3::new(0.0, 1.0, 0.0), VIEWPORT).unwrap();
        let expected = 300.0 - lens.focal_length_px(VIEWPORT.y) / 10.0;
        assert!((p.position.y - expected).abs() < 0.05, "{} vs {}", p.position.y, expected);
    }

    #[test]
    fn test_point_behind_camera_is_culled() {
        let lens = CameraProjection::default();
        let vp = lens.view_projection(&rig_looking_at_origin(), VIEWPORT.x / VIEWPORT.y);
        assert!(lens.world_to_screen(vp, Vec3::new(0.0, 0.0, 20.0), VIEWPORT).is_none());
    }

    #[test]
    fn test_focal_length() {
        let lens = CameraProjection::new(90.0, 0.1, 100.0);
        assert!((lens.focal_length_px(600.0) - 300.0).abs() < 0.01);
    }
}
