//! Scene construction utilities
//!
//! Turns a scene file plus configuration into everything a frame needs.

mod scene_builder;

pub use scene_builder::{BodyDecor, SceneBuilder, SpaceScene};
