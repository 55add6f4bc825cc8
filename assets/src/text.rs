use std::sync::Arc;

use crate::error::AssetError;
use crate::handler::{LoadFuture, ResourceHandler, load_bytes};
use crate::source::AssetSource;
use crate::url::AssetUrl;

/// Loads plain UTF-8 text resources.
pub struct TextHandler {
    source: Arc<dyn AssetSource>,
    /// Retry transient load failures.
    pub retry_requests: bool,
}

impl TextHandler {
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

impl ResourceHandler for TextHandler {
    type Resource = String;

    fn kind(&self) -> &'static str {
        "text"
    }

    fn load(&self, url: &AssetUrl) -> LoadFuture {
        load_bytes(self.source.clone(), self.kind(), url, self.retry_requests)
    }

    fn open(&self, _url: &AssetUrl, data: Vec<u8>) -> Result<String, AssetError> {
        Ok(String::from_utf8(data)?)
    }
}
