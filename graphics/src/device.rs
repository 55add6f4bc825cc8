//! Graphics device.
//!
//! The [`GraphicsDevice`] is the main interface for creating GPU resources.
//! It wraps a [`GpuBackend`] and owns the device-scoped [`ProgramLibrary`].

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::backend::GpuBackend;
use crate::error::GraphicsError;
use crate::resources::Buffer;
use crate::shader::{ProgramLibrary, Shader, ShaderDefinition};
use crate::types::BufferDescriptor;

/// Shading language dialect accepted by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShadingLanguage {
    /// GLSL ES 1.00 (WebGL 1). Sources are compiled as written.
    GlslEs100,
    /// GLSL ES 3.00 (WebGL 2). Sources need an explicit `#version` directive
    /// and the GLSL ES 1.00 compatibility shims.
    #[default]
    GlslEs300,
}

/// Default float precision for fragment shaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FloatPrecision {
    #[default]
    High,
    Medium,
    Low,
}

impl FloatPrecision {
    /// GLSL precision qualifier keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::High => "highp",
            Self::Medium => "mediump",
            Self::Low => "lowp",
        }
    }
}

/// Capabilities of a graphics device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceCapabilities {
    /// Maximum buffer size.
    pub max_buffer_size: u64,
    /// Highest shading language version supported.
    pub shading_language: ShadingLanguage,
    /// Fragment shader float precision.
    pub float_precision: FloatPrecision,
}

impl Default for DeviceCapabilities {
    fn default() -> Self {
        Self {
            max_buffer_size: 1 << 30, // 1 GB
            shading_language: ShadingLanguage::default(),
            float_precision: FloatPrecision::default(),
        }
    }
}

impl DeviceCapabilities {
    /// Set the shading language.
    pub fn with_shading_language(mut self, shading_language: ShadingLanguage) -> Self {
        self.shading_language = shading_language;
        self
    }

    /// Set the fragment float precision.
    pub fn with_float_precision(mut self, float_precision: FloatPrecision) -> Self {
        self.float_precision = float_precision;
        self
    }

    /// Set the maximum buffer size in bytes.
    pub fn with_max_buffer_size(mut self, max_buffer_size: u64) -> Self {
        self.max_buffer_size = max_buffer_size;
        self
    }

    /// Whether shader sources must start with a `#version` directive.
    pub fn requires_version_directive(&self) -> bool {
        self.shading_language == ShadingLanguage::GlslEs300
    }
}

/// A graphics device for creating GPU resources.
///
/// # Thread Safety
///
/// `GraphicsDevice` is `Send + Sync` and is shared through `Arc`. The
/// program library sits behind a mutex; the frame loop is the only
/// expected caller.
///
/// # Example
///
/// ```ignore
/// let device = GraphicsDevice::new("webgl2", backend, DeviceCapabilities::default());
/// let buffer = device.create_buffer(&BufferDescriptor::vertices(256, 16, true))?;
/// device.write_buffer(&buffer, 0, bytes)?;
/// ```
pub struct GraphicsDevice {
    name: String,
    capabilities: DeviceCapabilities,
    backend: Arc<dyn GpuBackend>,
    programs: Mutex<ProgramLibrary>,
}

impl GraphicsDevice {
    /// Create a device on top of a backend.
    pub fn new(
        name: impl Into<String>,
        backend: Arc<dyn GpuBackend>,
        capabilities: DeviceCapabilities,
    ) -> Arc<Self> {
        let name = name.into();
        log::info!(
            "GraphicsDevice: '{}' on {} ({:?}, {} precision)",
            name,
            backend.name(),
            capabilities.shading_language,
            capabilities.float_precision.keyword()
        );
        Arc::new(Self {
            name,
            capabilities,
            backend,
            programs: Mutex::new(ProgramLibrary::new()),
        })
    }

    /// Create a device backed by a fresh [`DummyBackend`](crate::backend::DummyBackend).
    ///
    /// The backend is returned alongside so callers can inspect recorded calls.
    #[cfg(feature = "dummy")]
    pub fn dummy(
        capabilities: DeviceCapabilities,
    ) -> (Arc<Self>, Arc<crate::backend::DummyBackend>) {
        let backend = Arc::new(crate::backend::DummyBackend::new());
        let device = Self::new("dummy", backend.clone(), capabilities);
        (device, backend)
    }

    /// Get the device name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the device capabilities.
    pub fn capabilities(&self) -> &DeviceCapabilities {
        &self.capabilities
    }

    pub(crate) fn backend(&self) -> &dyn GpuBackend {
        self.backend.as_ref()
    }

    /// Create a GPU buffer.
    ///
    /// The buffer is released when the last `Arc` to it is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the size is zero, exceeds device limits, or the
    /// backend allocation fails.
    pub fn create_buffer(
        self: &Arc<Self>,
        descriptor: &BufferDescriptor,
    ) -> Result<Arc<Buffer>, GraphicsError> {
        self.validate_buffer(descriptor)?;

        let gpu = self.backend.create_buffer(descriptor)?;
        let buffer = Arc::new(Buffer::new(Arc::downgrade(self), descriptor.clone(), gpu));

        log::trace!(
            "GraphicsDevice: created buffer {:?}, size={}",
            descriptor.label,
            descriptor.size
        );

        Ok(buffer)
    }

    /// Check a buffer descriptor against the device limits without allocating.
    ///
    /// `create_buffer` runs the same checks; backend allocation can still fail.
    pub fn validate_buffer(&self, descriptor: &BufferDescriptor) -> Result<(), GraphicsError> {
        if descriptor.size > self.capabilities.max_buffer_size {
            return Err(GraphicsError::InvalidParameter(format!(
                "buffer size {} exceeds maximum {}",
                descriptor.size, self.capabilities.max_buffer_size
            )));
        }

        if descriptor.size == 0 {
            return Err(GraphicsError::InvalidParameter(
                "buffer size cannot be zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Upload bytes into a buffer.
    pub fn write_buffer(
        &self,
        buffer: &Buffer,
        offset: u64,
        data: &[u8],
    ) -> Result<(), GraphicsError> {
        if offset + data.len() as u64 > buffer.size() {
            return Err(GraphicsError::InvalidParameter(format!(
                "write of {} bytes at offset {} exceeds buffer size {}",
                data.len(),
                offset,
                buffer.size()
            )));
        }
        self.backend.write_buffer(buffer.gpu_id(), offset, data)
    }

    /// Compile a shader program.
    ///
    /// Compilation errors from the backend are returned unchanged.
    pub fn create_shader(&self, definition: ShaderDefinition) -> Result<Arc<Shader>, GraphicsError> {
        let program = self.backend.compile_shader(&definition)?;
        Ok(Arc::new(Shader::new(program, definition)))
    }

    /// Lock the device's named program cache.
    pub fn program_library(&self) -> MutexGuard<'_, ProgramLibrary> {
        self.programs.lock()
    }
}

impl std::fmt::Debug for GraphicsDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphicsDevice")
            .field("name", &self.name)
            .field("backend", &self.backend.name())
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

static_assertions::assert_impl_all!(GraphicsDevice: Send, Sync);
