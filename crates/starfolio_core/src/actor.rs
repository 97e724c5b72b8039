//! Keyboard-driven kinematic actor (the rocket)
//!
//! Input arrives as discrete [`ActorCommand`]s, one per key-down, each
//! applying a bounded orientation or position delta. Continuous motion
//! happens only in [`Actor::tick`].

use serde::{Deserialize, Serialize};
use starfolio_math::{Euler, Vec3};

use crate::clock::FrameStep;
use crate::transform::Transform;

/// Which keyboard layout and motion model drive the actor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlScheme {
    /// Engine toggle with automatic forward travel and constant roll
    #[default]
    AutoAdvance,
    /// Direct nudges along the forward axis, no engine and no spin
    FreeFly,
}

impl ControlScheme {
    /// Whether the follow camera inherits the actor's roll
    pub fn camera_follows_roll(&self) -> bool {
        matches!(self, ControlScheme::FreeFly)
    }
}

/// A single discrete input applied to the actor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActorCommand {
    /// Flip `engine_on`
    ToggleEngine,
    /// Yaw += rotation_speed
    YawLeft,
    /// Yaw -= rotation_speed
    YawRight,
    /// Pitch += rotation_speed
    PitchUp,
    /// Pitch -= rotation_speed
    PitchDown,
    /// Position += forward * speed
    NudgeForward,
    /// Position -= forward * speed
    NudgeBackward,
}

/// Motion constants for an actor
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActorParams {
    /// Distance per reference frame with the engine on, or per nudge
    pub speed: f32,
    /// Radians per turn command
    pub rotation_speed: f32,
    /// Radians added to roll every reference frame
    pub roll_increment: f32,
}

impl ActorParams {
    /// Constants for a control scheme
    pub fn preset(scheme: ControlScheme) -> Self {
        match scheme {
            ControlScheme::AutoAdvance => Self {
                speed: 0.01,
                rotation_speed: 0.01,
                roll_increment: -0.01,
            },
            ControlScheme::FreeFly => Self {
                speed: 0.2,
                rotation_speed: 0.05,
                roll_increment: 0.0,
            },
        }
    }
}

impl Default for ActorParams {
    fn default() -> Self {
        Self::preset(ControlScheme::default())
    }
}

/// The rocket
#[derive(Clone, Debug)]
pub struct Actor {
    transform: Transform,
    spawn: Transform,
    engine_on: bool,
    params: ActorParams,
    scheme: ControlScheme,
}

impl Actor {
    /// Create an actor at a spawn transform using the scheme's preset constants
    pub fn new(spawn: Transform, scheme: ControlScheme) -> Self {
        Self {
            transform: spawn,
            spawn,
            engine_on: false,
            params: ActorParams::preset(scheme),
            scheme,
        }
    }

    /// Override the motion constants
    pub fn with_params(mut self, params: ActorParams) -> Self {
        self.params = params;
        self
    }

    /// Start with the engine running
    pub fn with_engine(mut self, engine_on: bool) -> Self {
        self.engine_on = engine_on;
        self
    }

    #[inline]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    #[inline]
    pub fn rotation(&self) -> Euler {
        self.transform.rotation
    }

    #[inline]
    pub fn engine_on(&self) -> bool {
        self.engine_on
    }

    #[inline]
    pub fn params(&self) -> &ActorParams {
        &self.params
    }

    #[inline]
    pub fn scheme(&self) -> ControlScheme {
        self.scheme
    }

    /// Normalized forward direction of the current orientation
    pub fn forward(&self) -> Vec3 {
        self.transform.forward()
    }

    /// Apply one discrete input
    pub fn apply(&mut self, command: ActorCommand) {
        let rs = self.params.rotation_speed;
        let rotation = &mut self.transform.rotation;
        match command {
            ActorCommand::ToggleEngine => {
                self.engine_on = !self.engine_on;
                log::debug!("Engine {}", if self.engine_on { "on" } else { "off" });
            }
            ActorCommand::YawLeft => rotation.y += rs,
            ActorCommand::YawRight => rotation.y -= rs,
            ActorCommand::PitchUp => rotation.x += rs,
            ActorCommand::PitchDown => rotation.x -= rs,
            ActorCommand::NudgeForward => {
                let forward = self.transform.forward();
                self.transform.position += forward * self.params.speed;
            }
            ActorCommand::NudgeBackward => {
                let forward = self.transform.forward();
                self.transform.position -= forward * self.params.speed;
            }
        }
    }

    /// Advance one frame: roll first, then travel if the engine is on
    ///
    /// The engine pushes the actor against its forward axis, so an
    /// unrotated rocket flies toward -Z.
    pub fn tick(&mut self, step: FrameStep) {
        self.transform.rotation.z += self.params.roll_increment * step.scale;
        if self.engine_on {
            let forward = self.transform.forward();
            self.transform.position -= forward * (self.params.speed * step.scale);
        }
    }

    /// Return to the spawn transform with the engine off
    pub fn reset(&mut self) {
        self.transform = self.spawn;
        self.engine_on = false;
    }
}
