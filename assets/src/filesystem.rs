use std::path::PathBuf;

use crate::source::{AssetFuture, AssetSource};

/// Asset source reading from a directory on disk.
///
/// All I/O is blocking (`std::fs`) inside the returned futures, so they
/// complete on the first poll.
///
/// # Example
///
/// ```ignore
/// let source = FileSystemSource::new("./assets");
/// // Reads ./assets/shaders/basic.vert
/// let bytes = poll_now(source.read("shaders/basic.vert"))?;
/// ```
pub struct FileSystemSource {
    root: PathBuf,
}

impl FileSystemSource {
    /// Create a source rooted at `root`.
    ///
    /// The directory does not need to exist yet.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl AssetSource for FileSystemSource {
    fn read(&self, path: &str) -> AssetFuture<Vec<u8>> {
        let full_path = self.resolve(path);
        Box::pin(async move { Ok(std::fs::read(full_path)?) })
    }

    fn exists(&self, path: &str) -> AssetFuture<bool> {
        let full_path = self.resolve(path);
        Box::pin(async move { Ok(full_path.is_file()) })
    }
}
