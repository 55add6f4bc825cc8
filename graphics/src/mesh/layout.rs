//! Vertex layout definitions for meshes.
//!
//! A [`VertexLayout`] describes one interleaved vertex buffer: the stride and
//! the attributes packed into each vertex. Layouts are shared via `Arc`
//! since there are only a few combinations across many meshes.
//!
//! # Example
//!
//! ```ignore
//! // Position (3 x f32) followed by a packed RGBA8 color: 16 bytes per vertex.
//! let layout = Arc::new(VertexLayout::new()
//!     .with_attribute(VertexAttributeSemantic::Position, VertexAttributeFormat::Float3)
//!     .with_attribute(VertexAttributeSemantic::Color, VertexAttributeFormat::Unorm8x4));
//! assert_eq!(layout.stride(), 16);
//! ```

use std::fmt;

/// Semantic meaning of a vertex attribute.
///
/// Semantics match mesh attributes with shader inputs. Attributes that have
/// no well-known meaning get a numbered [`Attr`](Self::Attr) slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttributeSemantic {
    Position,
    Normal,
    Tangent,
    TexCoord0,
    TexCoord1,
    TexCoord2,
    TexCoord3,
    TexCoord4,
    TexCoord5,
    TexCoord6,
    TexCoord7,
    Color,
    /// Bone indices for skinning.
    BlendIndices,
    /// Bone weights for skinning.
    BlendWeight,
    /// Generic attribute slot, displayed as `ATTR<n>`.
    Attr(u8),
}

impl VertexAttributeSemantic {
    /// Texture coordinate semantic for set `index` (0..=7).
    pub fn tex_coord(index: u8) -> Option<Self> {
        Some(match index {
            0 => Self::TexCoord0,
            1 => Self::TexCoord1,
            2 => Self::TexCoord2,
            3 => Self::TexCoord3,
            4 => Self::TexCoord4,
            5 => Self::TexCoord5,
            6 => Self::TexCoord6,
            7 => Self::TexCoord7,
            _ => return None,
        })
    }
}

impl fmt::Display for VertexAttributeSemantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position => f.write_str("POSITION"),
            Self::Normal => f.write_str("NORMAL"),
            Self::Tangent => f.write_str("TANGENT"),
            Self::TexCoord0 => f.write_str("TEXCOORD0"),
            Self::TexCoord1 => f.write_str("TEXCOORD1"),
            Self::TexCoord2 => f.write_str("TEXCOORD2"),
            Self::TexCoord3 => f.write_str("TEXCOORD3"),
            Self::TexCoord4 => f.write_str("TEXCOORD4"),
            Self::TexCoord5 => f.write_str("TEXCOORD5"),
            Self::TexCoord6 => f.write_str("TEXCOORD6"),
            Self::TexCoord7 => f.write_str("TEXCOORD7"),
            Self::Color => f.write_str("COLOR"),
            Self::BlendIndices => f.write_str("BLENDINDICES"),
            Self::BlendWeight => f.write_str("BLENDWEIGHT"),
            Self::Attr(n) => write!(f, "ATTR{n}"),
        }
    }
}

/// Format of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttributeFormat {
    /// Single 32-bit float.
    Float,
    /// Two 32-bit floats.
    Float2,
    /// Three 32-bit floats.
    Float3,
    /// Four 32-bit floats.
    Float4,
    /// Four 8-bit unsigned integers (normalized to 0.0-1.0).
    Unorm8x4,
}

impl VertexAttributeFormat {
    /// Get the size in bytes of this format.
    pub fn size(&self) -> u32 {
        match self {
            Self::Float => 4,
            Self::Float2 => 8,
            Self::Float3 => 12,
            Self::Float4 => 16,
            Self::Unorm8x4 => 4,
        }
    }
}

/// A single vertex attribute description.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexAttribute {
    /// Semantic meaning of this attribute.
    pub semantic: VertexAttributeSemantic,
    /// Data format of this attribute.
    pub format: VertexAttributeFormat,
    /// Byte offset within a vertex.
    pub offset: u32,
}

/// Interleaved vertex layout: attributes packed back to back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
    stride: u32,
    label: Option<String>,
}

impl VertexLayout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute after the previous ones.
    pub fn with_attribute(
        mut self,
        semantic: VertexAttributeSemantic,
        format: VertexAttributeFormat,
    ) -> Self {
        self.attributes.push(VertexAttribute {
            semantic,
            format,
            offset: self.stride,
        });
        self.stride += format.size();
        self
    }

    /// Set the debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Position only (12 bytes).
    pub fn position() -> Self {
        Self::new()
            .with_attribute(VertexAttributeSemantic::Position, VertexAttributeFormat::Float3)
            .with_label("position")
    }

    /// Position followed by a normalized RGBA8 color (16 bytes).
    pub fn position_color() -> Self {
        Self::new()
            .with_attribute(VertexAttributeSemantic::Position, VertexAttributeFormat::Float3)
            .with_attribute(VertexAttributeSemantic::Color, VertexAttributeFormat::Unorm8x4)
            .with_label("position_color")
    }

    /// Attributes in declaration order.
    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Find the attribute with a given semantic.
    pub fn attribute(&self, semantic: VertexAttributeSemantic) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| a.semantic == semantic)
    }

    /// Bytes between consecutive vertices.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Get the debug label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}
