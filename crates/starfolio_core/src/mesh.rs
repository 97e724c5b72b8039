//! Triangle mesh assets stored as RON

use serde::{Deserialize, Serialize};
use std::path::Path;

use starfolio_math::Vec3;

use crate::asset_cache::Asset;
use crate::asset_loader::AssetError;

/// Indexed triangle mesh
///
/// `normals` may be omitted in the file, in which case smooth per-vertex
/// normals are derived from the triangles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshAsset {
    pub positions: Vec<[f32; 3]>,
    #[serde(default)]
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshAsset {
    /// Parse and validate a mesh from RON text
    pub fn from_ron(contents: &str) -> Result<Self, AssetError> {
        let mut mesh: MeshAsset = ron::from_str(contents)?;
        if mesh.normals.is_empty() {
            mesh.normals = mesh.smooth_normals();
        }
        mesh.validate()?;
        Ok(mesh)
    }

    /// Check index bounds and attribute lengths
    pub fn validate(&self) -> Result<(), AssetError> {
        if self.indices.len() % 3 != 0 {
            return Err(AssetError::Invalid(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        if self.normals.len() != self.positions.len() {
            return Err(AssetError::Invalid(format!(
                "{} normals for {} positions",
                self.normals.len(),
                self.positions.len()
            )));
        }
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= self.positions.len()) {
            return Err(AssetError::Invalid(format!(
                "index {} out of range for {} vertices",
                bad,
                self.positions.len()
            )));
        }
        Ok(())
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Area-weighted vertex normals
    ///
    /// Triangles with out-of-range indices are skipped; `validate` reports them.
    pub fn smooth_normals(&self) -> Vec<[f32; 3]> {
        let mut sums = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            if a >= sums.len() || b >= sums.len() || c >= sums.len() {
                continue;
            }
            let pa = Vec3::from_array(self.positions[a]);
            let pb = Vec3::from_array(self.positions[b]);
            let pc = Vec3::from_array(self.positions[c]);
            let n = (pb - pa).cross(pc - pa);
            sums[a] += n;
            sums[b] += n;
            sums[c] += n;
        }
        sums.into_iter()
            .map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
            .collect()
    }

    /// Axis-aligned bounds as (min, max)
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut points = self.positions.iter().map(|p| Vec3::from_array(*p));
        let first = points.next()?;
        Some(points.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }
}

impl Asset for MeshAsset {
    fn load_from_file(path: &Path) -> Result<Self, AssetError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "(positions: [(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0)], indices: [0, 1, 2])";

    #[test]
    fn test_parse_without_normals() {
        let mesh = MeshAsset::from_ron(TRIANGLE).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.normals.len(), 3);
        assert_eq!(mesh.normals[0], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        let text = "(positions: [(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0)], indices: [0, 1, 7])";
        match MeshAsset::from_ron(text) {
            Err(AssetError::Invalid(msg)) => assert!(msg.contains("index 7")),
            other => panic!("expected Invalid, got {:?}", other.map(|m| m.indices)),
        }
    }

    #[test]
    fn test_rejects_partial_triangle() {
        let text = "(positions: [(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)], indices: [0, 1])";
        assert!(matches!(MeshAsset::from_ron(text), Err(AssetError::Invalid(_))));
    }

    #[test]
    fn test_rejects_mismatched_normals() {
        let text = "(positions: [(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0)], normals: [(0.0, 0.0, 1.0)], indices: [0, 1, 2])";
        assert!(matches!(MeshAsset::from_ron(text), Err(AssetError::Invalid(_))));
    }

    #[test]
    fn test_rejects_bad_syntax() {
        assert!(matches!(MeshAsset::from_ron("(positions: ["), Err(AssetError::Parse(_))));
    }

    #[test]
    fn test_bounds() {
        let mesh = MeshAsset::from_ron(TRIANGLE).unwrap();
        let (lo, hi) = mesh.bounds().unwrap();
        assert_eq!(lo, Vec3::ZERO);
        assert_eq!(hi, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_load_missing_file() {
        let result = MeshAsset::load_from_file(Path::new("/nonexistent/rocket.ron"));
        assert!(matches!(result, Err(AssetError::Io(_))));
    }
}
