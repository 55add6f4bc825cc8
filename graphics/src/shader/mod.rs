//! Shader chunk assembly and program caching.
//!
//! The shader system consists of:
//! - [`ShaderChunks`] - Named GLSL fragments and program assembly
//! - [`collect_attribs`] - Vertex attribute to semantic binding
//! - [`ProgramLibrary`] - Device-scoped cache of programs by unique name
//! - [`Shader`] - A compiled program handle

mod attribs;
mod chunks;
mod library;
mod program;

pub use attribs::{AttributeBindings, AttributeParseError, collect_attribs, known_semantic};
pub use chunks::{GLES3_PS, GLES3_VS, ShaderChunks};
pub use library::{ProgramLibrary, dummy_fragment_code, precision_code, version_code};
pub use program::{Shader, ShaderDefinition};
