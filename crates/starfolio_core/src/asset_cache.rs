//! Asset caching
//!
//! A type-erased cache for anything implementing [`Asset`]. Each file path is
//! loaded at most once; later requests for the same path get the same handle.
//! Assets loaded on the background [`AssetLoader`](crate::AssetLoader) are
//! handed to the cache with [`AssetCache::insert`].
//!
//! ```ignore
//! let mut cache = AssetCache::new();
//! let handle = cache.load::<MeshAsset>("assets/models/toy_rocket.ron")?;
//! let mesh: Arc<MeshAsset> = cache.get::<MeshAsset>(&handle).unwrap();
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::asset_loader::AssetError;

/// Unique identifier for an asset in the cache.
///
/// IDs are assigned sequentially starting from 1.
pub type AssetId = u64;

/// A lightweight handle to a cached asset.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct AssetHandle {
    id: AssetId,
    path: PathBuf,
}

impl AssetHandle {
    pub fn id(&self) -> AssetId {
        self.id
    }

    /// File path this asset was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Trait for types that can be loaded from files and cached.
///
/// The type must be `Send + Sync + 'static` so it can be loaded on a worker
/// thread and shared behind an `Arc`.
pub trait Asset: Sized + Send + Sync + 'static {
    /// Load this asset from the given file path.
    fn load_from_file(path: &Path) -> Result<Self, AssetError>;
}

/// Type-erased asset cache, deduplicated by path
#[derive(Default)]
pub struct AssetCache {
    assets: HashMap<AssetId, Arc<dyn Any + Send + Sync>>,
    path_index: HashMap<PathBuf, AssetId>,
    next_id: u64,
}

impl AssetCache {
    pub fn new() -> Self {
        Self {
            assets: HashMap::new(),
            path_index: HashMap::new(),
            next_id: 1,
        }
    }

    /// Load an asset synchronously, or return the cached handle if already loaded
    pub fn load<T: Asset>(&mut self, path: impl AsRef<Path>) -> Result<AssetHandle, AssetError> {
        let path = path.as_ref();
        if let Some(handle) = self.handle_for(path) {
            return Ok(handle);
        }
        let data = T::load_from_file(path)?;
        Ok(self.insert(path, data))
    }

    /// Store an already-loaded asset under `path`
    ///
    /// Replaces the data if the path is already cached; the handle is kept.
    pub fn insert<T: Asset>(&mut self, path: impl AsRef<Path>, data: T) -> AssetHandle {
        let path = path.as_ref().to_path_buf();
        let data: Arc<dyn Any + Send + Sync> = Arc::new(data);

        let id = match self.path_index.get(&path) {
            Some(&id) => id,
            None => {
                let id = self.next_id.max(1);
                self.next_id = id + 1;
                self.path_index.insert(path.clone(), id);
                id
            }
        };
        self.assets.insert(id, data);
        log::info!("Cached asset {} as #{}", path.display(), id);
        AssetHandle { id, path }
    }

    /// Handle for a path that is already cached
    pub fn handle_for(&self, path: impl AsRef<Path>) -> Option<AssetHandle> {
        let path = path.as_ref();
        self.path_index.get(path).map(|&id| AssetHandle {
            id,
            path: path.to_path_buf(),
        })
    }

    /// Retrieve a cached asset, downcasting to the requested type.
    ///
    /// Returns `None` for unknown handles or a type mismatch.
    pub fn get<T: Asset>(&self, handle: &AssetHandle) -> Option<Arc<T>> {
        self.assets.get(&handle.id)?.clone().downcast::<T>().ok()
    }

    /// Check if the handle's asset is still in the cache.
    pub fn contains(&self, handle: &AssetHandle) -> bool {
        self.assets.contains_key(&handle.id)
    }

    /// Number of assets currently cached
    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }
}
