use std::sync::Arc;

use crate::error::AssetError;
use crate::handler::{LoadFuture, ResourceHandler, load_bytes};
use crate::source::AssetSource;
use crate::url::AssetUrl;

/// Loads GLSL source files as shader resources.
///
/// The opened resource is the source text; compiling it is up to the
/// graphics layer (see `lumen_graphics::shader::ShaderChunks`).
pub struct ShaderHandler {
    source: Arc<dyn AssetSource>,
    /// Retry transient load failures.
    pub retry_requests: bool,
}

impl ShaderHandler {
    pub fn new(source: Arc<dyn AssetSource>) -> Self {
        Self {
            source,
            retry_requests: false,
        }
    }

    pub fn with_retry_requests(mut self, retry: bool) -> Self {
        self.retry_requests = retry;
        self
    }
}

impl ResourceHandler for ShaderHandler {
    type Resource = String;

    fn kind(&self) -> &'static str {
        "shader"
    }

    fn load(&self, url: &AssetUrl) -> LoadFuture {
        load_bytes(self.source.clone(), self.kind(), url, self.retry_requests)
    }

    fn open(&self, _url: &AssetUrl, data: Vec<u8>) -> Result<String, AssetError> {
        Ok(String::from_utf8(data)?)
    }
}
