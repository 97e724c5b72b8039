//! Core types for the Starfolio space scene
//!
//! This crate holds every piece of scene state that changes from frame to frame:
//!
//! - [`Transform`] - Position, Euler orientation, and uniform scale
//! - [`Actor`] - The keyboard-driven rocket
//! - [`CameraRig`] - Camera that eases toward a point behind the actor
//! - [`OrbitingBody`] - A spinning planet with a [`HoverMachine`]
//! - [`TimerQueue`] - Delayed events keyed on scene time
//! - [`SpaceWorld`] - Container tying the above together
//! - [`Scene`] - Scene template loaded from RON
//! - [`BootScreen`] - Loading placeholder shown before the first frame
//! - [`AssetCache`] / [`AssetLoader`] - Mesh loading, cached and in the background

mod actor;
mod asset_cache;
mod asset_loader;
mod audio;
mod body;
mod boot;
mod camera_rig;
mod clock;
mod hover;
mod mesh;
mod scene;
mod timers;
mod transform;
mod world;

pub use actor::{Actor, ActorCommand, ActorParams, ControlScheme};
pub use asset_cache::{Asset, AssetCache, AssetHandle, AssetId};
pub use asset_loader::{AssetError, AssetLoader, LoadResult};
pub use audio::{AudioSink, SoundEffect, SoundEffects, SoundEvent};
#[cfg(any(test, feature = "test-support"))]
pub use audio::RecordingSink;
pub use body::{BodyLabel, Decoration, OrbitingBody};
pub use boot::BootScreen;
pub use camera_rig::CameraRig;
pub use clock::{FrameStep, MotionMode, SceneClock};
pub use hover::{HoverMachine, HoverSession, HoverState};
pub use mesh::MeshAsset;
pub use scene::{parse_hex_color, PlanetTemplate, Scene, SceneLoadError, StarfieldTemplate};
pub use timers::{TimerKey, TimerQueue};
pub use transform::Transform;
pub use world::{BodyKey, DirtyFlags, PointerEvent, SpaceWorld, WorldSettings};

// Re-export commonly used math types for convenience
pub use starfolio_math::{Euler, Mat4, Quat, Vec2, Vec3};
