use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::{AssetError, LoadError};
use crate::registry::{Asset, AssetRegistry};
use crate::source::AssetSource;
use crate::url::AssetUrl;

/// Future returned by [`ResourceHandler::load`].
pub type LoadFuture = Pin<Box<dyn Future<Output = Result<Vec<u8>, LoadError>> + Send>>;

/// Attempts made when a handler retries transient failures.
pub const MAX_LOAD_ATTEMPTS: u32 = 5;

/// Turns asset bytes into a resource.
///
/// Loading is split in three steps: `load` fetches raw bytes, `open`
/// converts them into the resource, and `patch` fixes up references to
/// other assets once everything is registered.
pub trait ResourceHandler: Send + Sync {
    /// The opened resource.
    type Resource;

    /// Resource kind used in error messages.
    fn kind(&self) -> &'static str;

    /// Fetch the raw bytes behind `url`.
    fn load(&self, url: &AssetUrl) -> LoadFuture;

    /// Convert loaded bytes into the resource.
    fn open(&self, url: &AssetUrl, data: Vec<u8>) -> Result<Self::Resource, AssetError>;

    /// Resolve references to other assets. Nothing to do by default.
    fn patch(&self, _asset: &mut Asset, _registry: &AssetRegistry) {}
}

/// Shared `load` implementation for byte-fetching handlers.
///
/// With `retry` set, transient failures are retried up to
/// [`MAX_LOAD_ATTEMPTS`] times; the last error is reported.
pub(crate) fn load_bytes(
    source: Arc<dyn AssetSource>,
    kind: &'static str,
    url: &AssetUrl,
    retry: bool,
) -> LoadFuture {
    let url = url.clone();
    Box::pin(async move {
        let attempts = if retry { MAX_LOAD_ATTEMPTS } else { 1 };
        let mut attempt = 1;
        loop {
            match source.read(&url.load).await {
                Ok(bytes) => {
                    log::debug!("Loaded {} resource '{}' ({} bytes)", kind, url.original, bytes.len());
                    return Ok(bytes);
                }
                Err(err) if err.is_transient() && attempt < attempts => {
                    log::debug!(
                        "Retrying {} resource '{}' after attempt {}: {}",
                        kind,
                        url.original,
                        attempt,
                        err
                    );
                    attempt += 1;
                }
                Err(cause) => {
                    return Err(LoadError {
                        kind,
                        original: url.original,
                        source: cause,
                    });
                }
            }
        }
    })
}
