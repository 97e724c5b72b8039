//! Input mapping from raw events to application actions
//!
//! Maps keyboard input to window-level actions like Exit and ToggleFullscreen.
//! Rocket keys (arrows, Space, W/S) are NOT mapped here - they go to the
//! RocketController.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions triggered by application keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (Escape)
    Exit,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
    /// Put the rocket and camera back at the scene start (R key)
    ResetScene,
}

/// Maps raw key events to application actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` for application keys, `None` for everything else.
    /// Held keys do not repeat actions.
    pub fn map_keyboard(key: KeyCode, state: ElementState, repeat: bool) -> Option<InputAction> {
        if state != ElementState::Pressed || repeat {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::KeyR => Some(InputAction::ResetScene),
            _ => None,
        }
    }
}
