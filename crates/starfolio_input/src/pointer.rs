//! Pointer picking against body bounding spheres
//!
//! The picker remembers which body is under the cursor. Each frame it casts a
//! ray through the cursor and reports the change as a Leave for the old body
//! followed by an Enter for the new one.

use starfolio_core::{BodyKey, PointerEvent, SpaceWorld};
use starfolio_math::{nearest_sphere_hit, screen_to_ndc, Mat4, Ray, Vec2, Vec3};
use winit::event::{ElementState, MouseButton};

/// Tracks the cursor and the body beneath it
#[derive(Clone, Debug, Default)]
pub struct PointerPicker {
    cursor: Option<Vec2>,
    hovered: Option<BodyKey>,
}

impl PointerPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the cursor position in physical pixels
    pub fn cursor_moved(&mut self, x: f64, y: f64) {
        self.cursor = Some(Vec2::new(x as f32, y as f32));
    }

    /// The cursor left the window; ends any hover
    pub fn cursor_left(&mut self) -> Option<PointerEvent> {
        self.cursor = None;
        self.hovered.take().map(PointerEvent::Leave)
    }

    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    /// Body currently under the cursor
    pub fn hovered(&self) -> Option<BodyKey> {
        self.hovered
    }

    /// Left press over a body produces a click
    pub fn process_mouse_button(&self, button: MouseButton, state: ElementState) -> Option<PointerEvent> {
        if button == MouseButton::Left && state == ElementState::Pressed {
            self.hovered.map(PointerEvent::Click)
        } else {
            None
        }
    }

    /// Re-pick against `(key, center, radius)` spheres
    ///
    /// `inv_view_proj` maps NDC (depth 0..1) back to world space; `viewport`
    /// is the surface size in physical pixels.
    pub fn update<I>(&mut self, inv_view_proj: Mat4, viewport: Vec2, targets: I) -> Vec<PointerEvent>
    where
        I: IntoIterator<Item = (BodyKey, Vec3, f32)>,
    {
        let picked = self.cursor.and_then(|cursor| {
            let ray = Ray::from_ndc(screen_to_ndc(cursor, viewport), inv_view_proj);
            nearest_sphere_hit(&ray, targets).map(|(key, _)| key)
        });
        if picked == self.hovered {
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);
        if let Some(old) = self.hovered {
            events.push(PointerEvent::Leave(old));
        }
        if let Some(new) = picked {
            events.push(PointerEvent::Enter(new));
        }
        self.hovered = picked;
        events
    }

    /// Re-pick against every body in the world
    pub fn pick_world(&mut self, world: &SpaceWorld, inv_view_proj: Mat4, viewport: Vec2) -> Vec<PointerEvent> {
        let targets: Vec<(BodyKey, Vec3, f32)> = world
            .bodies()
            .map(|(key, body)| (key, body.position(), body.radius()))
            .collect();
        self.update(inv_view_proj, viewport, targets)
    }

    /// Forget the hovered body without emitting events
    pub fn clear(&mut self) {
        self.hovered = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfolio_core::{OrbitingBody, WorldSettings};

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    fn inv_view_proj() -> Mat4 {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(75f32.to_radians(), VIEWPORT.x / VIEWPORT.y, 0.1, 1000.0);
        (proj * view).inverse()
    }

    fn world() -> (SpaceWorld, BodyKey, BodyKey) {
        let mut world = SpaceWorld::new(WorldSettings::default());
        let near = world.add_body(OrbitingBody::new("Near", Vec3::new(0.0, 0.0, 2.0), 1.0, [1.0; 3]));
        let far = world.add_body(OrbitingBody::new("Far", Vec3::new(0.0, 0.0, -5.0), 3.0, [1.0; 3]));
        (world, near, far)
    }

    #[test]
    fn test_no_cursor_no_events() {
        let (world, _, _) = world();
        let mut picker = PointerPicker::new();
        assert!(picker.pick_world(&world, inv_view_proj(), VIEWPORT).is_empty());
    }

    #[test]
    fn test_enter_nearest_body() {
        let (world, near, _) = world();
        let mut picker = PointerPicker::new();
        picker.cursor_moved(400.0, 300.0);
        let events = picker.pick_world(&world, inv_view_proj(), VIEWPORT);
        assert_eq!(events, vec![PointerEvent::Enter(near)]);
        assert_eq!(picker.hovered(), Some(near));
        // Staying put reports nothing new
        assert!(picker.pick_world(&world, inv_view_proj(), VIEWPORT).is_empty());
    }

    #[test]
    fn test_leave_when_moving_off() {
        let (world, near, _) = world();
        let mut picker = PointerPicker::new();
        picker.cursor_moved(400.0, 300.0);
        picker.pick_world(&world, inv_view_proj(), VIEWPORT);
        picker.cursor_moved(5.0, 5.0);
        let events = picker.pick_world(&world, inv_view_proj(), VIEWPORT);
        assert_eq!(events, vec![PointerEvent::Leave(near)]);
        assert_eq!(picker.hovered(), None);
    }

    #[test]
    fn test_switching_bodies_leaves_then_enters() {
        let (world, near, far) = world();
        let mut picker = PointerPicker::new();
        picker.cursor_moved(400.0, 300.0);
        picker.pick_world(&world, inv_view_proj(), VIEWPORT);
        // Just above the near sphere but still inside the larger far one
        picker.cursor_moved(400.0, 240.0);
        let events = picker.pick_world(&world, inv_view_proj(), VIEWPORT);
        assert_eq!(events, vec![PointerEvent::Leave(near), PointerEvent::Enter(far)]);
    }

    #[test]
    fn test_click_only_over_body() {
        let (world, near, _) = world();
        let mut picker = PointerPicker::new();
        assert_eq!(picker.process_mouse_button(MouseButton::Left, ElementState::Pressed), None);
        picker.cursor_moved(400.0, 300.0);
        picker.pick_world(&world, inv_view_proj(), VIEWPORT);
        assert_eq!(
            picker.process_mouse_button(MouseButton::Left, ElementState::Pressed),
            Some(PointerEvent::Click(near))
        );
        assert_eq!(picker.process_mouse_button(MouseButton::Left, ElementState::Released), None);
        assert_eq!(picker.process_mouse_button(MouseButton::Right, ElementState::Pressed), None);
    }

    #[test]
    fn test_cursor_left_ends_hover() {
        let (world, near, _) = world();
        let mut picker = PointerPicker::new();
        picker.cursor_moved(400.0, 300.0);
        picker.pick_world(&world, inv_view_proj(), VIEWPORT);
        assert_eq!(picker.cursor_left(), Some(PointerEvent::Leave(near)));
        assert_eq!(picker.cursor_left(), None);
        assert!(picker.cursor().is_none());
    }
}
