//! Asset sources and resource handlers for the Lumen engine.
//!
//! Resource handlers fetch raw bytes from an [`AssetSource`] and turn them
//! into resources in three steps (see [`ResourceHandler`]):
//!
//! ```ignore
//! let source = MemorySource::new();
//! source.insert("shaders/basic.vert", vs_bytes);
//!
//! let handler = ShaderHandler::new(Arc::new(source));
//! let url = AssetUrl::from("shaders/basic.vert");
//! let bytes = poll_ready(handler.load(&url)).expect("blocking source")?;
//! let text = handler.open(&url, bytes)?;
//! ```
//!
//! # Sources
//!
//! - [`MemorySource`]: in-memory storage for tests and embedded assets
//! - [`FileSystemSource`]: a directory on disk (`filesystem` feature)
//!
//! Source futures are not self-driving. Blocking sources complete on the
//! first poll, which [`poll_now`] and [`poll_ready`] rely on.

mod error;
#[cfg(feature = "filesystem")]
mod filesystem;
mod handler;
mod memory;
mod poll;
mod registry;
mod shader;
mod source;
mod text;
mod url;

pub use error::{AssetError, LoadError};
#[cfg(feature = "filesystem")]
pub use filesystem::FileSystemSource;
pub use handler::{LoadFuture, MAX_LOAD_ATTEMPTS, ResourceHandler};
pub use memory::MemorySource;
pub use poll::{poll_now, poll_ready};
pub use registry::{Asset, AssetId, AssetKind, AssetRegistry};
pub use shader::ShaderHandler;
pub use source::{AssetFuture, AssetSource};
pub use text::TextHandler;
pub use url::AssetUrl;
