//! Orbiting bodies (planets)

use std::f32::consts::FRAC_PI_4;

use starfolio_math::{Euler, Vec3};

use crate::clock::FrameStep;
use crate::hover::HoverMachine;
use crate::transform::Transform;

/// Spinning ring and particle halo drawn around a body
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Decoration {
    /// Ring rotation about its local Z axis
    pub ring_angle: f32,
    /// Particle shell rotation about Y
    pub shell_angle: f32,
}

impl Decoration {
    /// Radians per reference frame for both the ring and the shell
    pub const SPIN_RATE: f32 = 0.001;
    /// Fixed tilt of the ring about X
    pub const RING_TILT: f32 = FRAC_PI_4;
    /// Ring sits at this multiple of the body radius
    pub const RING_RADIUS_FACTOR: f32 = 1.5;
    /// Half the ring's width
    pub const RING_HALF_WIDTH: f32 = 0.1;
    /// Particle shell sits at this multiple of the body radius
    pub const SHELL_RADIUS_FACTOR: f32 = 2.0;
    pub const SHELL_PARTICLES: usize = 100;

    pub fn tick(&mut self, step: FrameStep) {
        self.ring_angle += Self::SPIN_RATE * step.scale;
        self.shell_angle += Self::SPIN_RATE * step.scale;
    }

    /// Orientation of the ring
    pub fn ring_rotation(&self) -> Euler {
        Euler::new(Self::RING_TILT, 0.0, self.ring_angle)
    }

    /// Orientation of the particle shell
    pub fn shell_rotation(&self) -> Euler {
        Euler::new(0.0, self.shell_angle, 0.0)
    }
}

/// Text floated above a body once its info is revealed
#[derive(Clone, Debug, PartialEq)]
pub struct BodyLabel {
    pub name: String,
    pub info: String,
    /// World position of the name line
    pub name_anchor: Vec3,
    /// World position of the info line
    pub info_anchor: Vec3,
}

/// A planet: fixed position, constant spin, hover-driven labels
#[derive(Clone, Debug)]
pub struct OrbitingBody {
    name: String,
    info: String,
    transform: Transform,
    radius: f32,
    color: [f32; 3],
    spin_rate: f32,
    hover: HoverMachine,
    decoration: Option<Decoration>,
}

impl OrbitingBody {
    /// Height of the label block above the body's surface
    pub const LABEL_CLEARANCE: f32 = 1.0;
    /// Offset of the name line from the label block
    pub const NAME_OFFSET: f32 = 0.5;
    /// Offset of the info line from the label block
    pub const INFO_OFFSET: f32 = -0.2;
    /// Highlight strength while hovered
    pub const EMISSIVE_FACTOR: f32 = 0.5;

    pub fn new(name: impl Into<String>, position: Vec3, radius: f32, color: [f32; 3]) -> Self {
        Self {
            name: name.into(),
            info: String::new(),
            transform: Transform::from_position(position),
            radius,
            color,
            spin_rate: 0.01,
            hover: HoverMachine::new(),
            decoration: None,
        }
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = info.into();
        self
    }

    pub fn with_spin_rate(mut self, spin_rate: f32) -> Self {
        self.spin_rate = spin_rate;
        self
    }

    /// Give the body a ring and particle halo
    pub fn with_decoration(mut self) -> Self {
        self.decoration = Some(Decoration::default());
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn info(&self) -> &str {
        &self.info
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
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    #[inline]
    pub fn spin_rate(&self) -> f32 {
        self.spin_rate
    }

    #[inline]
    pub fn hover(&self) -> &HoverMachine {
        &self.hover
    }

    #[inline]
    pub(crate) fn hover_mut(&mut self) -> &mut HoverMachine {
        &mut self.hover
    }

    #[inline]
    pub fn decoration(&self) -> Option<&Decoration> {
        self.decoration.as_ref()
    }

    /// Spin about Y and advance the decoration
    pub fn tick(&mut self, step: FrameStep) {
        self.transform.rotation.y += self.spin_rate * step.scale;
        if let Some(decoration) = &mut self.decoration {
            decoration.tick(step);
        }
    }

    /// Emissive color: half the tint while hovered, black otherwise
    pub fn emissive(&self) -> [f32; 3] {
        if self.hover.is_hovered() {
            self.color.map(|c| c * Self::EMISSIVE_FACTOR)
        } else {
            [0.0; 3]
        }
    }

    /// Anchor of the label block
    pub fn label_anchor(&self) -> Vec3 {
        self.position() + Vec3::new(0.0, self.radius + Self::LABEL_CLEARANCE, 0.0)
    }

    /// Labels to draw, present only while the info is shown
    pub fn label(&self) -> Option<BodyLabel> {
        if !self.hover.info_visible() {
            return None;
        }
        let anchor = self.label_anchor();
        Some(BodyLabel {
            name: self.name.clone(),
            info: self.info.clone(),
            name_anchor: anchor + Vec3::new(0.0, Self::NAME_OFFSET, 0.0),
            info_anchor: anchor + Vec3::new(0.0, Self::INFO_OFFSET, 0.0),
        })
    }
}
