use std::fmt;

/// Where to fetch a resource from, and what the caller originally asked for.
///
/// The two differ when a request is rewritten (cache busting, a CDN
/// prefix); errors always report `original`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetUrl {
    /// Path handed to the [`AssetSource`](crate::AssetSource).
    pub load: String,
    /// Path as originally requested.
    pub original: String,
}

impl AssetUrl {
    pub fn new(load: impl Into<String>, original: impl Into<String>) -> Self {
        Self {
            load: load.into(),
            original: original.into(),
        }
    }
}

impl From<&str> for AssetUrl {
    fn from(url: &str) -> Self {
        Self::new(url, url)
    }
}

impl From<String> for AssetUrl {
    fn from(url: String) -> Self {
        Self {
            load: url.clone(),
            original: url,
        }
    }
}

impl fmt::Display for AssetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}
