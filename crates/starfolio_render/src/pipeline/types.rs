//! GPU-compatible data types
//!
//! These types match the shader layouts exactly. All types derive Pod and
//! Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use starfolio_math::{Mat4, Vec3};

/// A mesh vertex with a normal for lighting
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}

/// Per-instance data for the mesh pipeline
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshInstance {
    /// Model matrix, column major
    pub model: [[f32; 4]; 4],
    /// Base color (RGBA)
    pub color: [f32; 4],
    /// Emissive color added after lighting (RGB, A unused)
    pub emissive: [f32; 4],
}

impl MeshInstance {
    pub fn new(model: Mat4, color: [f32; 3], emissive: [f32; 3]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: [color[0], color[1], color[2], 1.0],
            emissive: [emissive[0], emissive[1], emissive[2], 0.0],
        }
    }
}

/// An unlit vertex with its own color
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PrimitiveVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl PrimitiveVertex {
    pub fn new(position: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }
}

/// Uniforms shared by the mesh shader
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    /// Direction the key light travels
    pub light_dir: [f32; 3],
    /// Ambient light intensity
    pub ambient: f32,
    pub light_color: [f32; 3],
    pub light_intensity: f32,
    pub camera_pos: [f32; 3],
    pub _padding: f32,
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            light_dir: [-0.3, -1.0, -0.5],
            ambient: 0.5,
            light_color: [1.0, 1.0, 1.0],
            light_intensity: 1.0,
            camera_pos: [0.0, 5.0, 10.0],
            _padding: 0.0,
        }
    }
}

/// Uniforms for the primitive shader
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PrimitiveUniforms {
    pub view_proj: [[f32; 4]; 4],
}

impl Default for PrimitiveUniforms {
    fn default() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }
}
