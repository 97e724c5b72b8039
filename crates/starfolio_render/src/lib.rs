//! Space scene rendering
//!
//! This crate provides the wgpu building blocks used to draw the scene.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::CameraProjection`] - Perspective projection and world-to-screen mapping
//! - [`pipeline::MeshPipeline`] - Lit, instanced triangle meshes (planets, rocket)
//! - [`pipeline::PrimitivePipeline`] - Unlit points, lines and translucent triangles
//! - [`geometry`] - Procedural spheres, rings, starfields and particle shells
//! - [`overlay::Overlay`] - egui layer for planet labels and the loading screen

pub mod camera;
pub mod context;
pub mod geometry;
pub mod overlay;
pub mod pipeline;

pub use camera::{CameraProjection, ScreenPoint};
pub use context::{ContextError, RenderContext};
pub use overlay::{project_label, LoadingView, Overlay, ScreenLabel};
