use std::future::Future;
use std::pin::Pin;

use crate::AssetError;

/// A boxed, `Send` future returning a `Result`.
///
/// All [`AssetSource`] methods return this type. The futures are
/// `Send + 'static` so they can be spawned on any async runtime, or driven
/// synchronously with [`poll_now`](crate::poll_now) when the source is
/// blocking.
pub type AssetFuture<T> = Pin<Box<dyn Future<Output = Result<T, AssetError>> + Send>>;

/// Byte-level storage that resource handlers fetch from.
///
/// Paths use forward slashes and have no leading slash.
pub trait AssetSource: Send + Sync + 'static {
    /// Read the entire contents of the asset at `path`.
    fn read(&self, path: &str) -> AssetFuture<Vec<u8>>;

    /// Check whether an asset exists at `path`.
    fn exists(&self, path: &str) -> AssetFuture<bool>;
}
