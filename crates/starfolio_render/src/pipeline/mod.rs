//! Rendering pipeline components
//!
//! Both pipelines draw into the same render pass. Meshes go first and write
//! depth; primitives are depth-tested against them without writing.

pub mod mesh_pipeline;
pub mod primitive_pipeline;
pub mod types;

pub use mesh_pipeline::{GpuMesh, MeshPipeline, DEPTH_FORMAT};
pub use primitive_pipeline::{PrimitiveBlend, PrimitivePipeline};
pub use types::{MeshInstance, MeshVertex, PrimitiveUniforms, PrimitiveVertex, SceneUniforms};
