//! Mesh definition with a vertex buffer and one draw primitive.

use std::sync::Arc;

use crate::resources::Buffer;

use super::layout::VertexLayout;

/// How vertices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveTopology {
    PointList,
    /// Every pair of vertices forms one segment.
    LineList,
    LineStrip,
    #[default]
    TriangleList,
    TriangleStrip,
}

/// The draw range of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Primitive {
    pub topology: PrimitiveTopology,
    /// First vertex (or index) to draw.
    pub base: u32,
    /// Number of vertices (or indices) to draw.
    pub count: u32,
    pub indexed: bool,
}

/// A GPU mesh: vertex layout, vertex buffer and draw primitive.
///
/// Cloning is cheap; the vertex buffer is shared. Meshes referenced from
/// mesh instances are held as `Arc<Mesh>` and updated with
/// [`Arc::make_mut`] by their owner.
#[derive(Debug, Clone)]
pub struct Mesh {
    layout: Arc<VertexLayout>,
    vertex_buffer: Option<Arc<Buffer>>,
    /// Draw range.
    pub primitive: Primitive,
    label: Option<String>,
}

impl Mesh {
    /// Create a mesh with no vertex buffer yet.
    pub fn new(layout: Arc<VertexLayout>, primitive: Primitive) -> Self {
        Self {
            layout,
            vertex_buffer: None,
            primitive,
            label: None,
        }
    }

    /// Set the debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the vertex buffer.
    pub fn with_vertex_buffer(mut self, buffer: Arc<Buffer>) -> Self {
        self.vertex_buffer = Some(buffer);
        self
    }

    /// Replace the vertex buffer.
    pub fn set_vertex_buffer(&mut self, buffer: Option<Arc<Buffer>>) {
        self.vertex_buffer = buffer;
    }

    /// Get the vertex layout.
    pub fn layout(&self) -> &Arc<VertexLayout> {
        &self.layout
    }

    /// Get the vertex buffer, if assigned.
    pub fn vertex_buffer(&self) -> Option<&Arc<Buffer>> {
        self.vertex_buffer.as_ref()
    }

    /// Number of vertices drawn.
    pub fn vertex_count(&self) -> u32 {
        self.primitive.count
    }

    /// Get the debug label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}
