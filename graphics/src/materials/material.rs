//! Material definition.
//!
//! A [`Material`] holds the fixed-function render state and an optional
//! shader program. Materials are shared as `Arc<Material>` by mesh
//! instances; owners that tweak per-frame state go through [`Arc::make_mut`].

use std::sync::Arc;

use crate::shader::Shader;
use crate::types::Color;

/// How fragment output is combined with the render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// Output replaces the target.
    #[default]
    None,
    /// `src * src_alpha + dst * (1 - src_alpha)`
    Normal,
    /// `src * src_alpha + dst`
    Additive,
}

/// Render state for a draw instance.
#[derive(Debug, Clone)]
pub struct Material {
    label: Option<String>,
    /// Base color, multiplied with vertex colors when enabled.
    pub color: Color,
    /// Read per-vertex colors from the `Color` attribute.
    pub vertex_colors: bool,
    pub blend: BlendMode,
    pub depth_test: bool,
    pub depth_write: bool,
    shader: Option<Arc<Shader>>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            label: None,
            color: Color::WHITE,
            vertex_colors: false,
            blend: BlendMode::None,
            depth_test: true,
            depth_write: true,
            shader: None,
        }
    }
}

impl Material {
    /// Create an opaque, depth-tested material.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unlit material that takes its color from the vertices and blends by alpha.
    pub fn vertex_colored() -> Self {
        Self {
            vertex_colors: true,
            blend: BlendMode::Normal,
            ..Self::default()
        }
    }

    /// Set the debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the base color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the blend mode.
    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }

    /// Enable or disable depth testing.
    pub fn with_depth_test(mut self, depth_test: bool) -> Self {
        self.depth_test = depth_test;
        self
    }

    /// Attach a compiled shader program.
    pub fn with_shader(mut self, shader: Arc<Shader>) -> Self {
        self.shader = Some(shader);
        self
    }

    /// Get the debug label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Get the shader program, if any.
    pub fn shader(&self) -> Option<&Arc<Shader>> {
        self.shader.as_ref()
    }

    /// Whether this material draws with blending enabled.
    pub fn is_transparent(&self) -> bool {
        self.blend != BlendMode::None
    }
}
