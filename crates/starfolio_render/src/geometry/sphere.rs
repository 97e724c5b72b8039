//! UV sphere used for planets

use std::f32::consts::{PI, TAU};

use super::MeshData;
use crate::pipeline::MeshVertex;

/// Latitude/longitude sphere centered at the origin
///
/// Produces `(segments + 1) * (rings + 1)` vertices; the seam and pole rows
/// are duplicated so each ring is a closed strip.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let segments = segments.max(3);
    let rings = rings.max(2);

    let mut vertices = Vec::with_capacity(((segments + 1) * (rings + 1)) as usize);
    for ring in 0..=rings {
        let polar = PI * ring as f32 / rings as f32;
        let (sin_p, cos_p) = polar.sin_cos();
        for segment in 0..=segments {
            let azimuth = TAU * segment as f32 / segments as f32;
            let (sin_a, cos_a) = azimuth.sin_cos();
            let normal = [sin_p * cos_a, cos_p, sin_p * sin_a];
            let position = normal.map(|c| c * radius);
            vertices.push(MeshVertex::new(position, normal));
        }
    }

    let stride = segments + 1;
    let mut indices = Vec::with_capacity((segments * rings * 6) as usize);
    for ring in 0..rings {
        for segment in 0..segments {
            let a = ring * stride + segment;
            let b = a + stride;
            // Pole rows collapse to a point, so skip their degenerate halves
            if ring != 0 {
                indices.extend_from_slice(&[a, a + 1, b]);
            }
            if ring != rings - 1 {
                indices.extend_from_slice(&[a + 1, b + 1, b]);
            }
        }
    }

    MeshData { vertices, indices }
}
