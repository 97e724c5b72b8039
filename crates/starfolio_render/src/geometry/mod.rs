//! Procedural geometry for the space scene
//!
//! Lit meshes ([`MeshData`]) feed the mesh pipeline; everything else produces
//! colored points or triangles for the primitive pipeline.

mod axes;
mod particles;
mod ring;
mod sphere;
mod starfield;

pub use axes::axes;
pub use particles::ParticleShell;
pub use ring::Ring;
pub use sphere::uv_sphere;
pub use starfield::{hsl_to_rgb, Starfield};

use starfolio_core::MeshAsset;

use crate::pipeline::MeshVertex;

/// Indexed triangle mesh ready for upload
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Convert a loaded mesh asset
    pub fn from_asset(asset: &MeshAsset) -> Self {
        let vertices = asset
            .positions
            .iter()
            .zip(asset.normals.iter())
            .map(|(p, n)| MeshVertex::new(*p, *n))
            .collect();
        Self {
            vertices,
            indices: asset.indices.clone(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
