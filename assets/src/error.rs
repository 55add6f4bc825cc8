use thiserror::Error;

/// Errors produced by asset sources and resource handlers.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The requested path was not found in the source.
    #[error("not found: {0}")]
    NotFound(String),
    /// An IO error occurred while accessing a source.
    #[error("IO error: {0}")]
    Io(std::io::Error),
    /// Resource bytes are not valid UTF-8.
    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    /// A future needed a real async runtime to make progress.
    #[error("asset future is not ready")]
    WouldBlock,
}

impl AssetError {
    /// Whether a second attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, AssetError::Io(_) | AssetError::WouldBlock)
    }
}

impl From<std::io::Error> for AssetError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            AssetError::NotFound(err.to_string())
        } else {
            AssetError::Io(err)
        }
    }
}

/// A failed resource load, as reported to the asset's owner.
///
/// Displays as `Error loading <kind> resource: <url> [<cause>]`, where
/// `<url>` is the URL the caller asked for, not the one that was fetched.
#[derive(Debug, Error)]
#[error("Error loading {kind} resource: {original} [{source}]")]
pub struct LoadError {
    /// Resource kind, e.g. `shader` or `text`.
    pub kind: &'static str,
    /// URL as originally requested.
    pub original: String,
    #[source]
    pub source: AssetError,
}
