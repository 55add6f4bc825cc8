//! Dummy GPU backend for testing and development.
//!
//! This backend doesn't talk to a GPU. It keeps buffer contents in memory
//! and records every call as a [`BackendEvent`], so tests can check what
//! the engine asked the GPU to do and in which order.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::error::GraphicsError;
use crate::shader::ShaderDefinition;
use crate::types::BufferDescriptor;

use super::{GpuBackend, GpuBufferId, GpuProgramId};

/// A call made against the dummy backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendEvent {
    CreateBuffer { id: GpuBufferId, size: u64 },
    DestroyBuffer { id: GpuBufferId },
    WriteBuffer { id: GpuBufferId, offset: u64, len: usize },
    CompileShader { id: GpuProgramId },
}

/// Dummy GPU backend.
#[derive(Debug, Default)]
pub struct DummyBackend {
    next_id: AtomicU64,
    buffers: Mutex<HashMap<GpuBufferId, Vec<u8>>>,
    events: Mutex<Vec<BackendEvent>>,
    memory_limit: Mutex<Option<u64>>,
}

impl DummyBackend {
    /// Create a new dummy backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls recorded so far, oldest first.
    pub fn events(&self) -> Vec<BackendEvent> {
        self.events.lock().clone()
    }

    /// Forget recorded events. Buffer contents are kept.
    pub fn clear_events(&self) {
        self.events.lock().clear();
    }

    /// Number of buffers currently alive.
    pub fn live_buffer_count(&self) -> usize {
        self.buffers.lock().len()
    }

    /// Fail allocations that would push live buffer bytes above `limit`.
    pub fn set_memory_limit(&self, limit: Option<u64>) {
        *self.memory_limit.lock() = limit;
    }

    /// Total size of live buffers in bytes.
    pub fn live_bytes(&self) -> u64 {
        self.buffers.lock().values().map(|b| b.len() as u64).sum()
    }

    /// Copy of a live buffer's contents.
    pub fn read_buffer(&self, buffer: GpuBufferId) -> Option<Vec<u8>> {
        self.buffers.lock().get(&buffer).cloned()
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn record(&self, event: BackendEvent) {
        self.events.lock().push(event);
    }
}

impl GpuBackend for DummyBackend {
    fn name(&self) -> &'static str {
        "Dummy Backend"
    }

    fn create_buffer(&self, descriptor: &BufferDescriptor) -> Result<GpuBufferId, GraphicsError> {
        if let Some(limit) = *self.memory_limit.lock() {
            if self.live_bytes() + descriptor.size > limit {
                log::trace!(
                    "DummyBackend: out of memory for buffer {:?} (size: {})",
                    descriptor.label,
                    descriptor.size
                );
                return Err(GraphicsError::OutOfMemory);
            }
        }
        let id = GpuBufferId(self.next_id());
        log::trace!(
            "DummyBackend: creating buffer {:?} (size: {})",
            descriptor.label,
            descriptor.size
        );
        self.buffers
            .lock()
            .insert(id, vec![0u8; descriptor.size as usize]);
        self.record(BackendEvent::CreateBuffer {
            id,
            size: descriptor.size,
        });
        Ok(id)
    }

    fn destroy_buffer(&self, buffer: GpuBufferId) {
        log::trace!("DummyBackend: destroying buffer {:?}", buffer);
        self.buffers.lock().remove(&buffer);
        self.record(BackendEvent::DestroyBuffer { id: buffer });
    }

    fn write_buffer(
        &self,
        buffer: GpuBufferId,
        offset: u64,
        data: &[u8],
    ) -> Result<(), GraphicsError> {
        log::trace!(
            "DummyBackend: write_buffer {:?} offset={} len={}",
            buffer,
            offset,
            data.len()
        );
        {
            let mut buffers = self.buffers.lock();
            let storage = buffers.get_mut(&buffer).ok_or_else(|| {
                GraphicsError::InvalidParameter(format!("unknown buffer {buffer:?}"))
            })?;
            let start = offset as usize;
            let end = start + data.len();
            if end > storage.len() {
                return Err(GraphicsError::InvalidParameter(format!(
                    "write of {} bytes at offset {} overflows buffer of {} bytes",
                    data.len(),
                    offset,
                    storage.len()
                )));
            }
            storage[start..end].copy_from_slice(data);
        }
        self.record(BackendEvent::WriteBuffer {
            id: buffer,
            offset,
            len: data.len(),
        });
        Ok(())
    }

    fn compile_shader(&self, definition: &ShaderDefinition) -> Result<GpuProgramId, GraphicsError> {
        for (stage, source) in [("vertex", &definition.vshader), ("fragment", &definition.fshader)] {
            if !source.contains("main") {
                return Err(GraphicsError::ShaderCompilationFailed(format!(
                    "{stage} stage has no entry point"
                )));
            }
        }
        let id = GpuProgramId(self.next_id());
        log::trace!(
            "DummyBackend: compiled program {:?} ({} attributes)",
            id,
            definition.attributes.len()
        );
        self.record(BackendEvent::CompileShader { id });
        Ok(id)
    }
}
