use crate::backend::GpuProgramId;

use super::attribs::AttributeBindings;

/// Everything the backend needs to build a shader program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderDefinition {
    /// Attribute name to semantic bindings for the vertex stage.
    pub attributes: AttributeBindings,
    /// Final vertex stage source.
    pub vshader: String,
    /// Final fragment stage source.
    pub fshader: String,
    /// Capture vertex stage output with transform feedback.
    pub use_transform_feedback: bool,
}

/// A compiled shader program.
#[derive(Debug)]
pub struct Shader {
    program: GpuProgramId,
    definition: ShaderDefinition,
}

impl Shader {
    pub(crate) fn new(program: GpuProgramId, definition: ShaderDefinition) -> Self {
        Self {
            program,
            definition,
        }
    }

    /// Backend handle of the linked program.
    pub fn program(&self) -> GpuProgramId {
        self.program
    }

    pub fn definition(&self) -> &ShaderDefinition {
        &self.definition
    }

    pub fn attributes(&self) -> &AttributeBindings {
        &self.definition.attributes
    }
}
