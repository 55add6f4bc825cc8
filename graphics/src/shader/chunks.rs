//! Named shader chunks and program assembly.
//!
//! A chunk is a named fragment of GLSL ES 1.00 source. [`ShaderChunks`]
//! turns chunks (or raw source) into compiled programs by adding the
//! device's precision preamble and, on GLSL ES 3.00 devices, the `#version`
//! directive plus the `gles3VS` / `gles3PS` compatibility shims.
//!
//! # Example
//!
//! ```ignore
//! let chunks = ShaderChunks::standard();
//! let shader = chunks.create_shader(&device, "basicVS", "basicPS", false)?;
//!
//! // Cached by name in the device's program library:
//! let quad = chunks.create_shader_from_code(&device, QUAD_VS, None, "quad-depth", false)?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::device::{DeviceCapabilities, GraphicsDevice};
use crate::error::GraphicsError;

use super::attribs::collect_attribs;
use super::library::{dummy_fragment_code, precision_code, version_code};
use super::program::{Shader, ShaderDefinition};

/// Vertex stage shim mapping GLSL ES 1.00 keywords onto GLSL ES 3.00.
pub const GLES3_VS: &str = "gles3VS";
/// Fragment stage shim mapping GLSL ES 1.00 keywords onto GLSL ES 3.00.
pub const GLES3_PS: &str = "gles3PS";

const GLES3_VS_SOURCE: &str = include_str!("../../../shaders/chunks/gles3VS.glsl");
const GLES3_PS_SOURCE: &str = include_str!("../../../shaders/chunks/gles3PS.glsl");
const BASIC_VS_SOURCE: &str = include_str!("../../../shaders/chunks/basicVS.glsl");
const BASIC_PS_SOURCE: &str = include_str!("../../../shaders/chunks/basicPS.glsl");
const QUAD_VS_SOURCE: &str = include_str!("../../../shaders/chunks/quadVS.glsl");

/// Table of named shader chunks.
///
/// Built once through the consuming `with_chunk` builder and read-only
/// afterwards; share it behind an `Arc` when several systems need it.
#[derive(Debug, Clone, Default)]
pub struct ShaderChunks {
    chunks: HashMap<String, String>,
}

impl ShaderChunks {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in chunks:
    ///
    /// | Name | Stage | Description |
    /// |------|-------|-------------|
    /// | `gles3VS` | vertex | GLSL ES 3.00 compatibility shim |
    /// | `gles3PS` | fragment | GLSL ES 3.00 compatibility shim |
    /// | `basicVS` | vertex | position + vertex color |
    /// | `basicPS` | fragment | vertex color times `uColor` |
    /// | `quadVS` | vertex | unit quad with derived UVs |
    pub fn standard() -> Self {
        Self::new()
            .with_chunk(GLES3_VS, GLES3_VS_SOURCE)
            .with_chunk(GLES3_PS, GLES3_PS_SOURCE)
            .with_chunk("basicVS", BASIC_VS_SOURCE)
            .with_chunk("basicPS", BASIC_PS_SOURCE)
            .with_chunk("quadVS", QUAD_VS_SOURCE)
    }

    /// Add (or replace) a chunk.
    pub fn with_chunk(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.chunks.insert(name.into(), source.into());
        self
    }

    /// Source of the chunk called `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.chunks.get(name).map(String::as_str)
    }

    /// Iterate over chunk names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.chunks.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Compile a program from two named chunks.
    ///
    /// The result is not cached; callers that build the same program
    /// repeatedly should keep the returned handle.
    pub fn create_shader(
        &self,
        device: &GraphicsDevice,
        vs_name: &str,
        ps_name: &str,
        use_transform_feedback: bool,
    ) -> Result<Arc<Shader>, GraphicsError> {
        let vs = self.require(vs_name)?;
        let ps = self.require(ps_name)?;
        let definition =
            self.assemble(device.capabilities(), vs, ps, use_transform_feedback)?;
        device.create_shader(definition)
    }

    /// Compile a program from raw source, cached by `unique_name`.
    ///
    /// If the device's program library already holds `unique_name`, that
    /// program is returned and `vs_source` / `ps_source` are not looked at:
    /// programs are reused by name, not by content. Without a fragment
    /// stage the device's dummy fragment shader is used.
    pub fn create_shader_from_code(
        &self,
        device: &GraphicsDevice,
        vs_source: &str,
        ps_source: Option<&str>,
        unique_name: &str,
        use_transform_feedback: bool,
    ) -> Result<Arc<Shader>, GraphicsError> {
        let mut programs = device.program_library();
        if let Some(cached) = programs.get(unique_name) {
            log::debug!("ShaderChunks: program '{}' served from cache", unique_name);
            return Ok(cached);
        }

        let ps = ps_source.unwrap_or_else(|| dummy_fragment_code());
        let definition =
            self.assemble(device.capabilities(), vs_source, ps, use_transform_feedback)?;
        let shader = device.create_shader(definition)?;
        log::debug!("ShaderChunks: compiled and cached program '{}'", unique_name);
        programs.insert(unique_name, shader.clone());
        Ok(shader)
    }

    fn require(&self, name: &str) -> Result<&str, GraphicsError> {
        self.get(name)
            .ok_or_else(|| GraphicsError::ShaderChunkNotFound(name.to_string()))
    }

    /// Build final stage sources for a device.
    ///
    /// Attributes are collected from the vertex source as written, before
    /// the shim (which redefines the `attribute` keyword) is prepended.
    pub fn assemble(
        &self,
        capabilities: &DeviceCapabilities,
        vs: &str,
        ps: &str,
        use_transform_feedback: bool,
    ) -> Result<ShaderDefinition, GraphicsError> {
        let attributes = collect_attribs(vs)?;
        let mut vshader = vs.to_string();
        let mut fshader = format!("{}\n{}", precision_code(capabilities), ps);

        if capabilities.requires_version_directive() {
            let version = version_code(capabilities);
            vshader = format!("{version}{}{vshader}", self.require(GLES3_VS)?);
            fshader = format!("{version}{}{fshader}", self.require(GLES3_PS)?);
        }

        Ok(ShaderDefinition {
            attributes,
            vshader,
            fshader,
            use_transform_feedback,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{FloatPrecision, ShadingLanguage};
    use crate::mesh::VertexAttributeSemantic;

    #[test]
    fn test_standard_chunks() {
        let chunks = ShaderChunks::standard();
        assert_eq!(chunks.len(), 5);
        assert!(chunks.get(GLES3_VS).unwrap().contains("#define attribute in"));
        assert!(chunks.get(GLES3_PS).unwrap().contains("pc_fragColor"));
        assert!(chunks.get("basicVS").unwrap().contains("vertex_color"));
        assert!(chunks.get("missing").is_none());
    }

    #[test]
    fn test_assemble_webgl1_leaves_vertex_untouched() {
        let caps = DeviceCapabilities::default()
            .with_shading_language(ShadingLanguage::GlslEs100)
            .with_float_precision(FloatPrecision::Medium);
        let chunks = ShaderChunks::standard();
        let vs = chunks.get("basicVS").unwrap();
        let def = chunks
            .assemble(&caps, vs, chunks.get("basicPS").unwrap(), false)
            .unwrap();

        assert_eq!(def.vshader, vs);
        assert!(def.fshader.starts_with("precision mediump float;\n\n"));
        assert!(!def.fshader.contains("#version"));
    }

    #[test]
    fn test_assemble_webgl2_prepends_version_and_shims() {
        let caps = DeviceCapabilities::default();
        let chunks = ShaderChunks::standard();
        let def = chunks
            .assemble(
                &caps,
                chunks.get("basicVS").unwrap(),
                chunks.get("basicPS").unwrap(),
                true,
            )
            .unwrap();

        assert!(def.vshader.starts_with("#version 300 es\n#define attribute in"));
        assert!(def.fshader.starts_with("#version 300 es\n#define varying in"));
        assert!(def.fshader.contains("precision highp float;"));
        assert!(def.use_transform_feedback);
        assert_eq!(
            def.attributes.get("vertex_position"),
            Some(VertexAttributeSemantic::Position)
        );
        assert_eq!(def.attributes.len(), 2);
    }

    #[test]
    fn test_assemble_without_shims_fails_on_webgl2() {
        let chunks = ShaderChunks::new();
        let result = chunks.assemble(
            &DeviceCapabilities::default(),
            "void main() {}",
            "void main() {}",
            false,
        );
        assert_eq!(
            result.unwrap_err(),
            GraphicsError::ShaderChunkNotFound(GLES3_VS.to_string())
        );
    }
}
