//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`SF_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;
use std::time::Duration;

use starfolio_core::{
    ActorParams, ControlScheme, MotionMode, SoundEffect, SoundEffects, Transform, WorldSettings,
};
use starfolio_math::Vec3;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    /// Rocket controls and model
    #[serde(default)]
    pub rocket: RocketConfig,
    /// Planet interaction and decoration
    #[serde(default)]
    pub planets: PlanetsConfig,
    /// Frame-rate coupling
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub rendering: RenderingConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`SF_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // SF_ROCKET__SPEED=0.05 -> rocket.speed = 0.05
        figment = figment.merge(Env::prefixed("SF_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Settings for a new world; the scene file may still override positions
    pub fn world_settings(&self) -> WorldSettings {
        WorldSettings {
            scheme: self.rocket.control_scheme,
            actor_params: self.rocket.params(),
            actor_spawn: Transform::from_position(Vec3::from_array(self.rocket.spawn)),
            camera_start: Vec3::from_array(self.camera.start_position),
            camera_offset: Vec3::from_array(self.camera.follow_offset),
            camera_blend: self.camera.blend,
            reveal_delay: Duration::from_millis(self.planets.reveal_delay_ms),
            effects: self.audio.effects(),
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Starfolio".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Camera position before the first follow step [x, y, z]
    pub start_position: [f32; 3],
    /// Follow offset behind the rocket, in the rocket's frame
    pub follow_offset: [f32; 3],
    /// Fraction of the remaining gap closed per reference frame
    pub blend: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
            start_position: [0.0, 5.0, 10.0],
            follow_offset: [0.0, 2.0, 8.0],
            blend: 0.1,
        }
    }
}

/// Rocket configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RocketConfig {
    pub control_scheme: ControlScheme,
    /// Overrides the scheme's preset speed
    pub speed: Option<f32>,
    /// Overrides the scheme's preset turn rate
    pub rotation_speed: Option<f32>,
    /// Overrides the scheme's preset roll per frame
    pub roll_increment: Option<f32>,
    /// Spawn position when the scene does not give one
    pub spawn: [f32; 3],
    /// RON mesh for the rocket
    pub model_path: String,
    /// Uniform scale applied to the model
    pub model_scale: f32,
    /// Rotation applied to the model before the rocket's own orientation
    pub model_rotation: [f32; 3],
    pub color: [f32; 3],
}

impl Default for RocketConfig {
    fn default() -> Self {
        Self {
            control_scheme: ControlScheme::AutoAdvance,
            speed: None,
            rotation_speed: None,
            roll_increment: None,
            spawn: [0.0, 0.0, 0.0],
            model_path: "assets/models/toy_rocket.ron".to_string(),
            model_scale: 0.3,
            model_rotation: [-std::f32::consts::FRAC_PI_2, 0.0, 0.0],
            color: [0.85, 0.85, 0.9],
        }
    }
}

impl RocketConfig {
    /// Preset for the scheme with any overrides applied, `None` if nothing is overridden
    pub fn params(&self) -> Option<ActorParams> {
        if self.speed.is_none() && self.rotation_speed.is_none() && self.roll_increment.is_none() {
            return None;
        }
        let preset = ActorParams::preset(self.control_scheme);
        Some(ActorParams {
            speed: self.speed.unwrap_or(preset.speed),
            rotation_speed: self.rotation_speed.unwrap_or(preset.rotation_speed),
            roll_increment: self.roll_increment.unwrap_or(preset.roll_increment),
        })
    }
}

/// Planet configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetsConfig {
    /// Hover time before a planet's labels appear
    pub reveal_delay_ms: u64,
    /// Allow rings and particle halos (the scene must also ask for them)
    pub decorations: bool,
    /// Longitude segments of the planet sphere
    pub sphere_segments: u32,
    /// Latitude rings of the planet sphere
    pub sphere_rings: u32,
}

impl Default for PlanetsConfig {
    fn default() -> Self {
        Self {
            reveal_delay_ms: 500,
            decorations: true,
            sphere_segments: 32,
            sphere_rings: 32,
        }
    }
}

/// Frame-rate coupling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Scale per-frame constants by elapsed time
    pub time_scaled: bool,
    /// Frame rate the per-frame constants were tuned for
    pub reference_hz: f32,
    /// Longest frame the simulation will step in one go, in seconds
    pub max_frame_time: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            time_scaled: true,
            reference_hz: 60.0,
            max_frame_time: 0.25,
        }
    }
}

impl MotionConfig {
    pub fn mode(&self) -> MotionMode {
        if self.time_scaled {
            MotionMode::TimeScaled {
                reference_hz: self.reference_hz,
            }
        } else {
            MotionMode::PerFrame
        }
    }

    pub fn max_dt(&self) -> Duration {
        Duration::from_secs_f32(self.max_frame_time.max(0.0))
    }
}

/// Scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Path to the scene RON file
    pub path: String,
    /// Loading screen duration before the first real frame
    pub boot_delay_ms: u64,
    pub loading_text: String,
    /// Seed for starfield and particle placement, random if unset
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            path: "assets/scenes/space.ron".to_string(),
            boot_delay_ms: 1000,
            loading_text: "Loading...".to_string(),
            seed: None,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Overrides the scene's background color when set [r, g, b, a]
    pub background_color: Option<[f32; 4]>,
    /// Direction the key light travels [x, y, z]
    pub light_dir: [f32; 3],
    pub light_color: [f32; 3],
    pub light_intensity: f32,
    /// Ambient light strength
    pub ambient_strength: f32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            light_dir: [-0.4, -1.0, -0.5],
            light_color: [1.0, 1.0, 1.0],
            light_intensity: 1.0,
            ambient_strength: 0.5,
        }
    }
}

/// Audio configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    /// Volume for both effects
    pub volume: f32,
    /// Directory searched for sound files
    pub sounds_dir: String,
    /// Sound ids: a file name, or a stem tried with each supported extension
    pub hover_sound: String,
    pub click_sound: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 0.5,
            sounds_dir: "assets/sounds".to_string(),
            hover_sound: "hover".to_string(),
            click_sound: "click".to_string(),
        }
    }
}

impl AudioConfig {
    pub fn effects(&self) -> SoundEffects {
        SoundEffects {
            hover: SoundEffect::new(self.hover_sound.clone(), self.volume),
            click: SoundEffect::new(self.click_sound.clone(), self.volume),
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Draw the XYZ axes at the origin
    pub show_axes: bool,
    /// Length of each axis line
    pub axes_size: f32,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_axes: true,
            axes_size: 5.0,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.camera.fov, 75.0);
        assert_eq!(config.planets.reveal_delay_ms, 500);
        assert_eq!(config.scene.boot_delay_ms, 1000);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("reveal_delay_ms"));
        assert!(toml.contains("control_scheme"));
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: AppConfig = toml::from_str("[camera]\nblend = 0.2\n").unwrap();
        assert_eq!(config.camera.blend, 0.2);
        assert_eq!(config.camera.fov, 75.0);
        assert_eq!(config.rocket.model_scale, 0.3);
    }

    #[test]
    fn test_rocket_overrides_merge_with_preset() {
        let mut rocket = RocketConfig::default();
        assert_eq!(rocket.params(), None);

        rocket.speed = Some(0.05);
        let params = rocket.params().unwrap();
        assert_eq!(params.speed, 0.05);
        assert_eq!(params.rotation_speed, 0.01);
        assert_eq!(params.roll_increment, -0.01);
    }

    #[test]
    fn test_free_fly_from_toml() {
        let config: AppConfig = toml::from_str("[rocket]\ncontrol_scheme = \"FreeFly\"\n").unwrap();
        let settings = config.world_settings();
        assert_eq!(settings.scheme, ControlScheme::FreeFly);
        assert_eq!(settings.reveal_delay, Duration::from_millis(500));
        assert_eq!(settings.camera_start, Vec3::new(0.0, 5.0, 10.0));
    }

    #[test]
    fn test_motion_modes() {
        let mut motion = MotionConfig::default();
        assert_eq!(motion.mode(), MotionMode::TimeScaled { reference_hz: 60.0 });
        motion.time_scaled = false;
        assert_eq!(motion.mode(), MotionMode::PerFrame);
        assert_eq!(motion.max_dt(), Duration::from_millis(250));
    }
}
