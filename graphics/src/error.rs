//! Graphics error types.

use std::fmt;

use crate::shader::AttributeParseError;

/// Errors that can occur in the graphics system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphicsError {
    /// Failed to create a resource.
    ResourceCreationFailed(String),
    /// Out of GPU memory.
    OutOfMemory,
    /// The GPU device was lost.
    DeviceLost,
    /// An invalid parameter was provided.
    InvalidParameter(String),
    /// A shader stage failed to compile or link.
    ShaderCompilationFailed(String),
    /// A shader chunk was requested that is not in the chunk table.
    ShaderChunkNotFound(String),
    /// Attribute declarations in a vertex shader could not be scanned.
    AttributeParse(AttributeParseError),
    /// An internal error occurred.
    Internal(String),
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceCreationFailed(msg) => write!(f, "resource creation failed: {msg}"),
            Self::OutOfMemory => write!(f, "out of GPU memory"),
            Self::DeviceLost => write!(f, "GPU device lost"),
            Self::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            Self::ShaderCompilationFailed(msg) => write!(f, "shader compilation failed: {msg}"),
            Self::ShaderChunkNotFound(name) => write!(f, "shader chunk not found: {name}"),
            Self::AttributeParse(err) => write!(f, "attribute scan failed: {err}"),
            Self::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for GraphicsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::AttributeParse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AttributeParseError> for GraphicsError {
    fn from(err: AttributeParseError) -> Self {
        Self::AttributeParse(err)
    }
}
