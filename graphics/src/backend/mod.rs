//! GPU backend abstraction layer.
//!
//! The graphics crate never talks to a GPU API directly. Every buffer
//! allocation, upload and shader compilation goes through a [`GpuBackend`],
//! which the [`GraphicsDevice`](crate::GraphicsDevice) owns.
//!
//! # Available Backends
//!
//! - `dummy` (default feature): recording backend for tests and headless runs
//!
//! Real backends (WebGL2, GLES) live outside this crate and implement the
//! same trait.

#[cfg(feature = "dummy")]
pub mod dummy;

use crate::error::GraphicsError;
use crate::shader::ShaderDefinition;
use crate::types::BufferDescriptor;

#[cfg(feature = "dummy")]
pub use dummy::{BackendEvent, DummyBackend};

/// Backend-side handle of a buffer allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GpuBufferId(pub u64);

/// Backend-side handle of a compiled shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GpuProgramId(pub u64);

/// Trait implemented by GPU API backends.
///
/// All methods take `&self`; backends use interior mutability where they
/// keep state. The device calls them from the frame thread only, but the
/// trait requires `Send + Sync` so the device can be shared through `Arc`.
pub trait GpuBackend: Send + Sync + 'static {
    /// Human readable backend name.
    fn name(&self) -> &'static str;

    /// Allocate a buffer.
    fn create_buffer(&self, descriptor: &BufferDescriptor) -> Result<GpuBufferId, GraphicsError>;

    /// Release a buffer. Called exactly once per allocation.
    fn destroy_buffer(&self, buffer: GpuBufferId);

    /// Upload `data` into `buffer` starting at `offset` bytes.
    fn write_buffer(
        &self,
        buffer: GpuBufferId,
        offset: u64,
        data: &[u8],
    ) -> Result<(), GraphicsError>;

    /// Compile and link both stages of a shader program.
    fn compile_shader(&self, definition: &ShaderDefinition) -> Result<GpuProgramId, GraphicsError>;
}
