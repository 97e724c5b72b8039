//! Keyboard control of the rocket
//!
//! AutoAdvance controls:
//! - Space: Toggle engine
//! - Left/Right arrows: Yaw
//! - Up/Down arrows: Pitch
//!
//! FreeFly controls:
//! - Down/Up arrows: Move along / against the nose
//! - Left/Right arrows: Yaw
//! - W/S: Pitch down / up

use starfolio_core::{ActorCommand, ControlScheme};
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Maps key presses to actor commands for one control scheme
#[derive(Clone, Copy, Debug, Default)]
pub struct RocketController {
    scheme: ControlScheme,
}

impl RocketController {
    pub fn new(scheme: ControlScheme) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> ControlScheme {
        self.scheme
    }

    /// Map a key event to a command
    ///
    /// Only presses produce commands. Auto-repeated presses keep turning or
    /// nudging, but never toggle the engine.
    pub fn process_keyboard(&self, key: KeyCode, state: ElementState, repeat: bool) -> Option<ActorCommand> {
        if state != ElementState::Pressed {
            return None;
        }
        let command = match self.scheme {
            ControlScheme::AutoAdvance => match key {
                KeyCode::Space => ActorCommand::ToggleEngine,
                KeyCode::ArrowLeft => ActorCommand::YawLeft,
                KeyCode::ArrowRight => ActorCommand::YawRight,
                KeyCode::ArrowUp => ActorCommand::PitchUp,
                KeyCode::ArrowDown => ActorCommand::PitchDown,
                _ => return None,
            },
            ControlScheme::FreeFly => match key {
                KeyCode::ArrowDown => ActorCommand::NudgeForward,
                KeyCode::ArrowUp => ActorCommand::NudgeBackward,
                KeyCode::ArrowLeft => ActorCommand::YawLeft,
                KeyCode::ArrowRight => ActorCommand::YawRight,
                KeyCode::KeyW => ActorCommand::PitchDown,
                KeyCode::KeyS => ActorCommand::PitchUp,
                _ => return None,
            },
        };
        if repeat && command == ActorCommand::ToggleEngine {
            return None;
        }
        log::debug!("Rocket command: {:?} ({:?})", command, key);
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(controller: &RocketController, key: KeyCode) -> Option<ActorCommand> {
        controller.process_keyboard(key, ElementState::Pressed, false)
    }

    #[test]
    fn test_auto_advance_bindings() {
        let c = RocketController::new(ControlScheme::AutoAdvance);
        assert_eq!(press(&c, KeyCode::Space), Some(ActorCommand::ToggleEngine));
        assert_eq!(press(&c, KeyCode::ArrowLeft), Some(ActorCommand::YawLeft));
        assert_eq!(press(&c, KeyCode::ArrowRight), Some(ActorCommand::YawRight));
        assert_eq!(press(&c, KeyCode::ArrowUp), Some(ActorCommand::PitchUp));
        assert_eq!(press(&c, KeyCode::ArrowDown), Some(ActorCommand::PitchDown));
        assert_eq!(press(&c, KeyCode::KeyW), None);
    }

    #[test]
    fn test_free_fly_bindings() {
        let c = RocketController::new(ControlScheme::FreeFly);
        assert_eq!(press(&c, KeyCode::ArrowDown), Some(ActorCommand::NudgeForward));
        assert_eq!(press(&c, KeyCode::ArrowUp), Some(ActorCommand::NudgeBackward));
        assert_eq!(press(&c, KeyCode::ArrowLeft), Some(ActorCommand::YawLeft));
        assert_eq!(press(&c, KeyCode::ArrowRight), Some(ActorCommand::YawRight));
        assert_eq!(press(&c, KeyCode::KeyW), Some(ActorCommand::PitchDown));
        assert_eq!(press(&c, KeyCode::KeyS), Some(ActorCommand::PitchUp));
        assert_eq!(press(&c, KeyCode::Space), None);
    }

    #[test]
    fn test_release_ignored() {
        let c = RocketController::default();
        assert_eq!(c.process_keyboard(KeyCode::ArrowLeft, ElementState::Released, false), None);
    }

    #[test]
    fn test_repeat_turns_but_does_not_toggle() {
        let c = RocketController::new(ControlScheme::AutoAdvance);
        assert_eq!(
            c.process_keyboard(KeyCode::ArrowLeft, ElementState::Pressed, true),
            Some(ActorCommand::YawLeft)
        );
        assert_eq!(c.process_keyboard(KeyCode::Space, ElementState::Pressed, true), None);
    }

    #[test]
    fn test_special_keys_not_mapped() {
        let c = RocketController::default();
        for key in [KeyCode::Escape, KeyCode::KeyF, KeyCode::KeyR] {
            assert_eq!(press(&c, key), None, "Key {:?} should not be mapped", key);
        }
    }
}
