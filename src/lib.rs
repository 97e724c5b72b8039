//! Starfolio - interactive 3D portfolio space scene
//!
//! The binary in `main.rs` wires these modules into a winit application.

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;
