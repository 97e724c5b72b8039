//! Background mesh loading
//!
//! Meshes are requested once and loaded on the [`AssetLoader`] worker. Each
//! frame the system polls for finished loads; successes land in the
//! [`AssetCache`], failures are logged and the visual stays unset.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use starfolio_core::{AssetCache, AssetError, AssetLoader, MeshAsset};

/// A mesh that finished loading this frame
pub struct LoadedMesh {
    pub path: PathBuf,
    pub mesh: Arc<MeshAsset>,
}

/// Owns the mesh loader and cache
pub struct AssetSystem {
    loader: AssetLoader<MeshAsset>,
    cache: AssetCache,
}

impl AssetSystem {
    pub fn new() -> Self {
        Self {
            loader: AssetLoader::new(),
            cache: AssetCache::new(),
        }
    }

    /// Queue a mesh unless it is already cached
    pub fn request_mesh(&mut self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let path = path.as_ref();
        if self.cache.handle_for(path).is_some() {
            return Ok(());
        }
        log::info!("Loading mesh {:?}", path);
        self.loader.load_async(path.to_path_buf())
    }

    /// Collect finished loads without blocking
    pub fn poll(&mut self) -> Vec<LoadedMesh> {
        let mut loaded = Vec::new();
        for result in self.loader.poll_all() {
            match result.result {
                Ok(mesh) => {
                    log::info!(
                        "Loaded mesh {:?} ({} triangles)",
                        result.path,
                        mesh.triangle_count()
                    );
                    let handle = self.cache.insert(&result.path, mesh);
                    if let Some(mesh) = self.cache.get::<MeshAsset>(&handle) {
                        loaded.push(LoadedMesh {
                            path: result.path,
                            mesh,
                        });
                    }
                }
                Err(e) => log::warn!("Failed to load mesh {:?}: {}", result.path, e),
            }
        }
        loaded
    }

    /// Whether any load is still running
    pub fn is_busy(&self) -> bool {
        self.loader.is_busy()
    }

    pub fn cached_count(&self) -> usize {
        self.cache.asset_count()
    }
}

impl Default for AssetSystem {
    fn default() -> Self {
        Self::new()
    }
}
