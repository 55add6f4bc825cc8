//! Buffer types and descriptors.

use bitflags::bitflags;

bitflags! {
    /// Usage flags for buffers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BufferUsage: u32 {
        /// Buffer can be used as a vertex buffer.
        const VERTEX = 1 << 0;
        /// Buffer can be used as an index buffer.
        const INDEX = 1 << 1;
        /// Buffer can be used as a uniform buffer.
        const UNIFORM = 1 << 2;
        /// Buffer can be copied to.
        const COPY_DST = 1 << 3;
        /// Contents are rewritten frequently (every frame).
        const DYNAMIC = 1 << 4;
    }
}

impl Default for BufferUsage {
    fn default() -> Self {
        Self::empty()
    }
}

/// Descriptor for creating a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BufferDescriptor {
    /// Debug label for the buffer.
    pub label: Option<String>,
    /// Size in bytes.
    pub size: u64,
    /// Usage flags.
    pub usage: BufferUsage,
}

impl BufferDescriptor {
    /// Create a new buffer descriptor.
    pub fn new(size: u64, usage: BufferUsage) -> Self {
        Self {
            label: None,
            size,
            usage,
        }
    }

    /// Descriptor for a vertex buffer holding `vertex_count` vertices of `stride` bytes.
    pub fn vertices(vertex_count: u32, stride: u32, dynamic: bool) -> Self {
        let mut usage = BufferUsage::VERTEX | BufferUsage::COPY_DST;
        if dynamic {
            usage |= BufferUsage::DYNAMIC;
        }
        Self::new(vertex_count as u64 * stride as u64, usage)
    }

    /// Set the debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_descriptor() {
        let desc = BufferDescriptor::vertices(256, 16, true).with_label("lines");
        assert_eq!(desc.size, 4096);
        assert!(desc.usage.contains(BufferUsage::VERTEX | BufferUsage::DYNAMIC));
        assert_eq!(desc.label.as_deref(), Some("lines"));
    }

    #[test]
    fn test_static_vertex_descriptor() {
        let desc = BufferDescriptor::vertices(4, 12, false);
        assert_eq!(desc.size, 48);
        assert!(!desc.usage.contains(BufferUsage::DYNAMIC));
    }
}
