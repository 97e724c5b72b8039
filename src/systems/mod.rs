//! Application systems
//!
//! Each system owns one concern of the frame loop so `main.rs` stays wiring.

mod assets;
mod audio;
mod render;
mod simulation;
mod window;

pub use assets::{AssetSystem, LoadedMesh};
pub use audio::{open_sink, sound_path, LogAudioSink, SOUND_EXTENSIONS};
#[cfg(feature = "audio")]
pub use audio::{AudioError, RodioAudioSink};
pub use render::{rocket_matrix, RenderError, RenderSystem};
pub use simulation::{SimulationResult, SimulationSystem};
pub use window::{format_title, WindowError, WindowSystem};
