//! Scene serialization
//!
//! Provides the Scene struct for loading space scenes from RON files.
//! A scene lists the planets to spawn, the starfield to scatter and where the
//! rocket and camera start.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use starfolio_math::Vec3;

use crate::body::OrbitingBody;
use crate::transform::Transform;
use crate::world::{BodyKey, SpaceWorld, WorldSettings};

/// Serializable description of one planet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetTemplate {
    pub name: String,
    pub position: [f32; 3],
    /// Tint as `#RRGGBB` or `#RGB`
    pub color: String,
    /// Sphere radius
    pub size: f32,
    /// Radians of spin per reference frame
    pub rotation_speed: f32,
    #[serde(default)]
    pub info: String,
}

impl PlanetTemplate {
    /// Build the body this template describes
    pub fn to_body(&self, decorated: bool) -> Result<OrbitingBody, SceneLoadError> {
        let rgba = parse_hex_color(&self.color).ok_or_else(|| SceneLoadError::InvalidColor {
            planet: self.name.clone(),
            value: self.color.clone(),
        })?;
        if !(self.size > 0.0) {
            return Err(SceneLoadError::InvalidSize {
                planet: self.name.clone(),
                size: self.size,
            });
        }
        let body = OrbitingBody::new(
            self.name.clone(),
            Vec3::from_array(self.position),
            self.size,
            [rgba[0], rgba[1], rgba[2]],
        )
        .with_info(self.info.clone())
        .with_spin_rate(self.rotation_speed);
        Ok(if decorated { body.with_decoration() } else { body })
    }
}

/// Serializable starfield parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarfieldTemplate {
    pub count: usize,
    /// Inner radius of the star shell
    pub radius: f32,
    /// Thickness of the star shell
    pub depth: f32,
    /// HSL saturation of star colors
    pub saturation: f32,
}

impl Default for StarfieldTemplate {
    fn default() -> Self {
        Self {
            count: 5000,
            radius: 100.0,
            depth: 50.0,
            saturation: 0.0,
        }
    }
}

fn default_background() -> String {
    "#000000".to_string()
}

fn default_decorated() -> bool {
    true
}

/// A serializable space scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name (for display/debugging)
    pub name: String,
    /// Clear color as `#RRGGBB`
    #[serde(default = "default_background")]
    pub background: String,
    /// Rocket spawn position [x, y, z]
    #[serde(default)]
    pub rocket_spawn: Option<[f32; 3]>,
    /// Initial camera position [x, y, z]
    #[serde(default)]
    pub camera_start: Option<[f32; 3]>,
    #[serde(default)]
    pub starfield: Option<StarfieldTemplate>,
    /// Whether planets get rings and particle halos
    #[serde(default = "default_decorated")]
    pub decorated: bool,
    #[serde(default)]
    pub planets: Vec<PlanetTemplate>,
}

impl Scene {
    /// Create a new empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: default_background(),
            rocket_spawn: None,
            camera_start: None,
            starfield: None,
            decorated: true,
            planets: Vec::new(),
        }
    }

    /// Load a scene from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneLoadError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Parse a scene from RON text
    pub fn from_ron(contents: &str) -> Result<Self, SceneLoadError> {
        let scene = ron::from_str(contents)?;
        Ok(scene)
    }

    /// Add a planet template to this scene
    pub fn add_planet(&mut self, planet: PlanetTemplate) {
        self.planets.push(planet);
    }

    /// Set the rocket spawn position
    pub fn with_rocket_spawn(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rocket_spawn = Some([x, y, z]);
        self
    }

    /// Set the starting camera position
    pub fn with_camera_start(mut self, x: f32, y: f32, z: f32) -> Self {
        self.camera_start = Some([x, y, z]);
        self
    }

    pub fn with_starfield(mut self, starfield: StarfieldTemplate) -> Self {
        self.starfield = Some(starfield);
        self
    }

    /// Background color as linear RGBA, black if unparseable
    pub fn background_rgba(&self) -> [f32; 4] {
        parse_hex_color(&self.background).unwrap_or([0.0, 0.0, 0.0, 1.0])
    }

    /// Build a world from this scene
    ///
    /// Spawn and camera positions in the scene override `settings`. Every
    /// planet is validated before any is added.
    pub fn instantiate(&self, mut settings: WorldSettings) -> Result<(SpaceWorld, Vec<BodyKey>), SceneLoadError> {
        let bodies = self
            .planets
            .iter()
            .map(|p| p.to_body(self.decorated))
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(spawn) = self.rocket_spawn {
            settings.actor_spawn = Transform {
                position: Vec3::from_array(spawn),
                ..settings.actor_spawn
            };
        }
        if let Some(start) = self.camera_start {
            settings.camera_start = Vec3::from_array(start);
        }

        let mut world = SpaceWorld::new(settings);
        let keys = bodies.into_iter().map(|b| world.add_body(b)).collect();
        log::info!("Instantiated scene '{}' with {} planets", self.name, world.body_count());
        Ok((world, keys))
    }
}

/// Parse `#RRGGBB` or `#RGB` into RGBA components in [0, 1]
pub fn parse_hex_color(hex: &str) -> Option<[f32; 4]> {
    let digits = hex.trim().strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f32 / 255.0);
    match digits.len() {
        6 => Some([
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
            1.0,
        ]),
        3 => {
            let short = |i: usize| channel(&digits[i..i + 1].repeat(2));
            Some([short(0)?, short(1)?, short(2)?, 1.0])
        }
        _ => None,
    }
}

/// Error loading a scene
#[derive(Debug)]
pub enum SceneLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
    /// A planet color is not a hex color
    InvalidColor { planet: String, value: String },
    /// A planet size is zero, negative or NaN
    InvalidSize { planet: String, size: f32 },
}

impl From<io::Error> for SceneLoadError {
    fn from(e: io::Error) -> Self {
        SceneLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneLoadError::Parse(e)
    }
}

impl std::fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneLoadError::Io(e) => write!(f, "IO error: {}", e),
            SceneLoadError::Parse(e) => write!(f, "Parse error: {}", e),
            SceneLoadError::InvalidColor { planet, value } => {
                write!(f, "Planet '{}' has invalid color '{}'", planet, value)
            }
            SceneLoadError::InvalidSize { planet, size } => {
                write!(f, "Planet '{}' has invalid size {}", planet, size)
            }
        }
    }
}

impl std::error::Error for SceneLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneLoadError::Io(e) => Some(e),
            SceneLoadError::Parse(e) => Some(e),
            _ => None,
        }
    }
}
