//! 3D Mathematics Library
//!
//! This crate provides the small amount of 3D math the Starfolio scene needs
//! on top of [`glam`].
//!
//! ## Core Types
//!
//! - [`Euler`] - Orientation as X/Y/Z angles applied in intrinsic XYZ order
//! - [`Ray`] - Half-line used for pointer picking
//!
//! ## Helpers
//!
//! - [`smoothing`] - Per-frame blend factors, optionally rescaled by elapsed time
//! - [`sphere`] - Point placement on spheres and spherical shells

mod euler;
pub mod ray;
pub mod smoothing;
pub mod sphere;

pub use euler::Euler;
pub use ray::{Ray, nearest_sphere_hit, screen_to_ndc};

// Re-export the glam types used throughout the workspace
pub use glam::{Mat4, Quat, Vec2, Vec3};
