use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::AssetError;
use crate::source::{AssetFuture, AssetSource};

/// In-memory asset source for tests and embedded assets.
///
/// Clones share storage, so a source can keep being filled after it has
/// been handed to a resource handler.
///
/// # Example
///
/// ```ignore
/// let mem = MemorySource::new();
/// mem.insert("shaders/basic.vert", vs_bytes);
/// let handler = ShaderHandler::new(Arc::new(mem.clone()));
/// ```
#[derive(Clone, Default)]
pub struct MemorySource {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemorySource {
    /// Create an empty in-memory source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an asset, overwriting any existing one at the same path.
    pub fn insert(&self, path: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.files.write().insert(path.into(), data.into());
    }

    /// Remove an asset, returning its data if it existed.
    pub fn remove(&self, path: &str) -> Option<Vec<u8>> {
        self.files.write().remove(path)
    }

    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }
}

impl AssetSource for MemorySource {
    fn read(&self, path: &str) -> AssetFuture<Vec<u8>> {
        let files = self.files.clone();
        let path = path.to_owned();
        Box::pin(async move {
            let map = files.read();
            map.get(&path).cloned().ok_or(AssetError::NotFound(path))
        })
    }

    fn exists(&self, path: &str) -> AssetFuture<bool> {
        let files = self.files.clone();
        let path = path.to_owned();
        Box::pin(async move { Ok(files.read().contains_key(&path)) })
    }
}
