//! # Lumen Graphics
//!
//! GPU-facing building blocks of the Lumen engine.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`GraphicsDevice`] - Resource creation on top of a [`GpuBackend`]
//! - [`shader`] - Shader chunks, attribute binding and the program cache
//! - [`scene`] - Layers, mesh instances and transform carriers
//! - [`mesh`] / [`materials`] - Geometry and render state
//! - A recording [`DummyBackend`] for tests (`dummy` feature, on by default)
//!
//! ## Example
//!
//! ```ignore
//! use lumen_graphics::{DeviceCapabilities, GraphicsDevice, shader::ShaderChunks};
//!
//! let (device, _backend) = GraphicsDevice::dummy(DeviceCapabilities::default());
//! let shader = ShaderChunks::standard().create_shader(&device, "basicVS", "basicPS", false)?;
//! ```

pub mod backend;
pub mod device;
pub mod error;
pub mod materials;
pub mod mesh;
pub mod resources;
pub mod scene;
pub mod shader;
pub mod types;

pub use backend::{GpuBackend, GpuBufferId, GpuProgramId};
#[cfg(feature = "dummy")]
pub use backend::{BackendEvent, DummyBackend};
pub use device::{DeviceCapabilities, FloatPrecision, GraphicsDevice, ShadingLanguage};
pub use error::GraphicsError;
pub use types::{BufferDescriptor, BufferUsage, Color};

/// Graphics library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_dummy_device() {
        let (device, backend) = GraphicsDevice::dummy(DeviceCapabilities::default());
        assert_eq!(device.name(), "dummy");
        assert_eq!(backend.name(), "Dummy Backend");
    }
}
