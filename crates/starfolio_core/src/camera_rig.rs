//! Follow camera
//!
//! The rig keeps a live position that eases toward a point fixed behind the
//! actor. Orientation is never stored: every frame the camera simply looks at
//! the actor.

use starfolio_math::smoothing::blend_for_scale;
use starfolio_math::{Mat4, Vec3};

use crate::actor::Actor;
use crate::clock::FrameStep;

/// Camera that trails an [`Actor`]
#[derive(Clone, Debug)]
pub struct CameraRig {
    position: Vec3,
    target: Vec3,
    start: Vec3,
    offset: Vec3,
    blend: f32,
    follow_roll: bool,
}

impl CameraRig {
    /// Default follow offset in the actor's local frame
    pub const DEFAULT_OFFSET: Vec3 = Vec3::new(0.0, 2.0, 8.0);
    /// Default fraction of the gap closed per reference frame
    pub const DEFAULT_BLEND: f32 = 0.1;

    /// Create a rig placed at `start`, looking at the origin
    pub fn new(start: Vec3) -> Self {
        Self {
            position: start,
            target: Vec3::ZERO,
            start,
            offset: Self::DEFAULT_OFFSET,
            blend: Self::DEFAULT_BLEND,
            follow_roll: false,
        }
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_blend(mut self, blend: f32) -> Self {
        self.blend = blend.clamp(0.0, 1.0);
        self
    }

    /// Rotate the offset by the actor's roll as well as pitch and yaw
    pub fn with_follow_roll(mut self, follow_roll: bool) -> Self {
        self.follow_roll = follow_roll;
        self
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Point the camera is looking at
    #[inline]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    #[inline]
    pub fn blend(&self) -> f32 {
        self.blend
    }

    /// Where the camera would sit if it had fully caught up with the actor
    pub fn desired_position(&self, actor: &Actor) -> Vec3 {
        let rotation = if self.follow_roll {
            actor.rotation()
        } else {
            actor.rotation().without_roll()
        };
        actor.position() + rotation.rotate(self.offset)
    }

    /// Ease toward the desired position and look at the actor
    pub fn follow(&mut self, actor: &Actor, step: FrameStep) {
        let desired = self.desired_position(actor);
        let t = blend_for_scale(self.blend, step.scale);
        self.position = self.position.lerp(desired, t);
        self.target = actor.position();
    }

    /// Jump back to the start position
    pub fn reset(&mut self) {
        self.position = self.start;
        self.target = Vec3::ZERO;
    }

    /// Right-handed view matrix looking from the camera to its target
    ///
    /// Falls back to looking down -Z when the camera sits on its target.
    pub fn view_matrix(&self) -> Mat4 {
        let dir = self.target - self.position;
        if dir.length_squared() < 1e-12 {
            return Mat4::look_to_rh(self.position, Vec3::NEG_Z, Vec3::Y);
        }
        // Avoid a degenerate basis when looking straight up or down
        let up = if dir.normalize().dot(Vec3::Y).abs() > 0.999 { Vec3::Z } else { Vec3::Y };
        Mat4::look_at_rh(self.position, self.target, up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{ActorCommand, ControlScheme};
    use crate::transform::Transform;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < EPSILON
    }

    #[test]
    fn test_new_rig_sits_at_start() {
        let rig = CameraRig::new(Vec3::new(0.0, 5.0, 10.0));
        assert_eq!(rig.position(), Vec3::new(0.0, 5.0, 10.0));
        assert_eq!(rig.blend(), 0.1);
    }

    #[test]
    fn test_desired_position_behind_identity_actor() {
        let rig = CameraRig::new(Vec3::ZERO);
        let actor = Actor::new(Transform::identity(), ControlScheme::AutoAdvance);
        assert!(approx_eq(rig.desired_position(&actor), Vec3::new(0.0, 2.0, 8.0)));
    }

    #[test]
    fn test_one_frame_closes_blend_fraction() {
        let actor = Actor::new(Transform::identity(), ControlScheme::AutoAdvance);
        let mut rig = CameraRig::new(Vec3::new(-7.0, 13.0, 1.0));
        let desired = rig.desired_position(&actor);
        let before = (rig.position() - desired).length();
        rig.follow(&actor, FrameStep::unit());
        let after = (rig.position() - desired).length();
        assert!((after - before * 0.9).abs() < EPSILON);
        assert_eq!(rig.target(), actor.position());
    }

    #[test]
    fn test_auto_advance_ignores_roll() {
        let mut actor = Actor::new(Transform::identity(), ControlScheme::AutoAdvance);
        for _ in 0..50 {
            actor.tick(FrameStep::unit());
        }
        let rig = CameraRig::new(Vec3::ZERO);
        assert!(approx_eq(rig.desired_position(&actor), Vec3::new(0.0, 2.0, 8.0)));
    }

    #[test]
    fn test_follow_roll_rotates_offset() {
        let spawn = Transform::from_position_rotation(Vec3::ZERO, starfolio_math::Euler::new(0.0, 0.0, 1.0));
        let actor = Actor::new(spawn, ControlScheme::FreeFly);
        let rig = CameraRig::new(Vec3::ZERO).with_follow_roll(true);
        let desired = rig.desired_position(&actor);
        assert!(!approx_eq(desired, Vec3::new(0.0, 2.0, 8.0)));
        assert!((desired.length() - Vec3::new(0.0, 2.0, 8.0).length()).abs() < EPSILON);
    }

    #[test]
    fn test_yaw_swings_offset() {
        let mut actor = Actor::new(Transform::identity(), ControlScheme::FreeFly);
        for _ in 0..10 {
            actor.apply(ActorCommand::YawLeft);
        }
        let rig = CameraRig::new(Vec3::ZERO);
        let desired = rig.desired_position(&actor);
        let yaw = 0.5f32;
        assert!(approx_eq(desired, Vec3::new(8.0 * yaw.sin(), 2.0, 8.0 * yaw.cos())));
    }

    #[test]
    fn test_reset_snaps_to_start() {
        let actor = Actor::new(Transform::identity(), ControlScheme::AutoAdvance);
        let mut rig = CameraRig::new(Vec3::new(0.0, 5.0, 10.0));
        rig.follow(&actor, FrameStep::unit());
        rig.reset();
        assert_eq!(rig.position(), Vec3::new(0.0, 5.0, 10.0));
    }

    #[test]
    fn test_view_matrix_places_target_in_front() {
        let actor = Actor::new(Transform::identity(), ControlScheme::AutoAdvance);
        let mut rig = CameraRig::new(Vec3::new(0.0, 5.0, 10.0));
        rig.follow(&actor, FrameStep::unit());
        let in_view = rig.view_matrix().transform_point3(rig.target());
        assert!(in_view.z < 0.0);
        assert!(in_view.x.abs() < EPSILON);
    }
}
