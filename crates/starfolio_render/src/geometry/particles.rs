//! Particle halo around decorated planets

use rand::Rng;
use starfolio_core::Decoration;
use starfolio_math::{sphere, Euler, Vec3};

use crate::pipeline::PrimitiveVertex;

/// Points scattered on a thin shell, relative to the body's center
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleShell {
    points: Vec<Vec3>,
}

impl ParticleShell {
    /// Halo opacity
    pub const ALPHA: f32 = 0.6;
    /// Total radial spread of the shell
    pub const JITTER: f32 = 0.2;

    pub fn generate<R: Rng + ?Sized>(rng: &mut R, radius: f32, count: usize) -> Self {
        Self {
            points: sphere::particle_shell(rng, count, radius, Self::JITTER),
        }
    }

    /// Shell sized for a body of the given radius
    pub fn for_body<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Self {
        Self::generate(
            rng,
            radius * Decoration::SHELL_RADIUS_FACTOR,
            Decoration::SHELL_PARTICLES,
        )
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn transformed(
        &self,
        center: Vec3,
        rotation: Euler,
        color: [f32; 3],
    ) -> impl Iterator<Item = PrimitiveVertex> + '_ {
        let quat = rotation.to_quat();
        let rgba = [color[0], color[1], color[2], Self::ALPHA];
        self.points
            .iter()
            .map(move |p| PrimitiveVertex::new(center + quat * *p, rgba))
    }
}
