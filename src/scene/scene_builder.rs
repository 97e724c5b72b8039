//! SceneBuilder - composes a playable space scene
//!
//! The builder takes the world settings from configuration, instantiates a
//! [`Scene`] template and generates the static visuals that go with it: the
//! starfield, per-planet rings and particle halos, and the debug axes.

use rand::rngs::StdRng;
use rand::SeedableRng;

use starfolio_core::{BodyKey, Scene, SceneLoadError, SpaceWorld, WorldSettings};
use starfolio_render::geometry::{axes, ParticleShell, Ring, Starfield};
use starfolio_render::pipeline::PrimitiveVertex;

/// Static decoration geometry for one planet
pub struct BodyDecor {
    pub key: BodyKey,
    pub ring: Ring,
    pub shell: ParticleShell,
}

/// A composed scene: live world plus the geometry generated for it
pub struct SpaceScene {
    pub name: String,
    pub world: SpaceWorld,
    /// Clear color (RGBA)
    pub background: [f32; 4],
    pub starfield: Starfield,
    pub decor: Vec<BodyDecor>,
    /// Line list for the axes helper, empty when disabled
    pub axes: Vec<PrimitiveVertex>,
}

impl SpaceScene {
    /// Ring triangles for every decorated body at its current rotation
    pub fn ring_vertices(&self) -> Vec<PrimitiveVertex> {
        let mut out = Vec::new();
        for decor in &self.decor {
            let Some(body) = self.world.body(decor.key) else {
                continue;
            };
            let Some(decoration) = body.decoration() else {
                continue;
            };
            out.extend(decor.ring.transformed(body.position(), decoration.ring_rotation(), body.color()));
        }
        out
    }

    /// Particle halo points for every decorated body at its current rotation
    pub fn particle_vertices(&self) -> Vec<PrimitiveVertex> {
        let mut out = Vec::new();
        for decor in &self.decor {
            let Some(body) = self.world.body(decor.key) else {
                continue;
            };
            let Some(decoration) = body.decoration() else {
                continue;
            };
            out.extend(decor.shell.transformed(body.position(), decoration.shell_rotation(), body.color()));
        }
        out
    }
}

/// Builder for a [`SpaceScene`]
///
/// # Example
/// ```ignore
/// let scene = SceneBuilder::new(config.world_settings())
///     .with_seed(7)
///     .with_axes(5.0)
///     .build(&Scene::load("assets/scenes/space.ron")?)?;
/// ```
pub struct SceneBuilder {
    settings: WorldSettings,
    decorations: bool,
    axes_size: Option<f32>,
    background: Option<[f32; 4]>,
    rng: StdRng,
}

impl SceneBuilder {
    pub fn new(settings: WorldSettings) -> Self {
        Self {
            settings,
            decorations: true,
            axes_size: None,
            background: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Make star and particle placement reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Allow planet decorations; a scene that is not decorated stays plain
    pub fn with_decorations(mut self, enabled: bool) -> Self {
        self.decorations = enabled;
        self
    }

    /// Draw axes of the given length at the origin
    pub fn with_axes(mut self, size: f32) -> Self {
        self.axes_size = Some(size);
        self
    }

    /// Override the scene's background color
    pub fn with_background(mut self, color: [f32; 4]) -> Self {
        self.background = Some(color);
        self
    }

    /// Instantiate `scene` and generate its visuals
    pub fn build(mut self, scene: &Scene) -> Result<SpaceScene, SceneLoadError> {
        let mut template = scene.clone();
        template.decorated &= self.decorations;

        let (world, keys) = template.instantiate(self.settings)?;

        let starfield_template = template.starfield.unwrap_or_default();
        let starfield = Starfield::generate(&starfield_template, &mut self.rng);

        let mut decor = Vec::new();
        for key in keys {
            let Some(body) = world.body(key) else {
                continue;
            };
            if body.decoration().is_none() {
                continue;
            }
            decor.push(BodyDecor {
                key,
                ring: Ring::for_body(body.radius()),
                shell: ParticleShell::for_body(&mut self.rng, body.radius()),
            });
        }

        log::info!(
            "Composed scene '{}': {} stars, {} decorated planets",
            template.name,
            starfield.len(),
            decor.len()
        );

        Ok(SpaceScene {
            name: template.name.clone(),
            world,
            background: self.background.unwrap_or_else(|| template.background_rgba()),
            starfield,
            decor,
            axes: self.axes_size.map(axes).unwrap_or_default(),
        })
    }
}
