//! Device-scoped program cache and stage preambles.

use std::collections::HashMap;
use std::sync::Arc;

use crate::device::{DeviceCapabilities, ShadingLanguage};

use super::program::Shader;

/// Named cache of compiled programs owned by a [`GraphicsDevice`](crate::GraphicsDevice).
///
/// Entries are keyed by a caller-chosen unique name and are never evicted
/// implicitly. Two different sources stored under the same name share one
/// entry; the first one wins.
#[derive(Debug, Default)]
pub struct ProgramLibrary {
    cache: HashMap<String, Arc<Shader>>,
}

impl ProgramLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached program stored under `name`.
    pub fn get(&self, name: &str) -> Option<Arc<Shader>> {
        self.cache.get(name).cloned()
    }

    /// Store a program under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, shader: Arc<Shader>) {
        self.cache.insert(name.into(), shader);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cache.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Drop every cached program.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

/// Default precision declarations for the fragment stage.
pub fn precision_code(capabilities: &DeviceCapabilities) -> String {
    let precision = capabilities.float_precision.keyword();
    let mut code = format!("precision {precision} float;\n");
    if capabilities.shading_language == ShadingLanguage::GlslEs300 {
        code.push_str(&format!(
            "#ifdef GL2\nprecision {precision} sampler2DShadow;\n#endif\n"
        ));
    }
    code
}

/// `#version` directive required by the device, empty when none is needed.
pub fn version_code(capabilities: &DeviceCapabilities) -> &'static str {
    match capabilities.shading_language {
        ShadingLanguage::GlslEs100 => "",
        ShadingLanguage::GlslEs300 => "#version 300 es\n",
    }
}

/// Fragment stage that writes nothing useful, for vertex-only programs.
pub fn dummy_fragment_code() -> &'static str {
    "void main(void) {\n    gl_FragColor = vec4(0.0);\n}\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::FloatPrecision;

    #[test]
    fn test_precision_code_webgl1() {
        let caps = DeviceCapabilities::default()
            .with_shading_language(ShadingLanguage::GlslEs100)
            .with_float_precision(FloatPrecision::Medium);
        assert_eq!(precision_code(&caps), "precision mediump float;\n");
        assert_eq!(version_code(&caps), "");
    }

    #[test]
    fn test_precision_code_webgl2() {
        let caps = DeviceCapabilities::default();
        let code = precision_code(&caps);
        assert!(code.starts_with("precision highp float;\n"));
        assert!(code.contains("precision highp sampler2DShadow;"));
        assert_eq!(version_code(&caps), "#version 300 es\n");
    }

    #[test]
    fn test_dummy_fragment_has_entry_point() {
        assert!(dummy_fragment_code().contains("void main"));
    }

    #[test]
    fn test_empty_library() {
        let library = ProgramLibrary::new();
        assert!(library.is_empty());
        assert!(library.get("missing").is_none());
    }
}
