//! Per-layer accumulator of immediate lines.

use std::sync::Arc;

use glam::Vec3;
use lumen_graphics::materials::Material;
use lumen_graphics::mesh::{Mesh, Primitive, PrimitiveTopology, VertexLayout};
use lumen_graphics::resources::Buffer;
use lumen_graphics::scene::{GraphNode, LayerComposition, LayerId, MeshInstance};
use lumen_graphics::{BufferDescriptor, Color, GraphicsDevice, GraphicsError};

use crate::error::LineError;
use crate::vertex::LineVertex;

/// Colors for a run of line vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineColors<'a> {
    /// One color for every vertex.
    Flat(Color),
    /// One color per vertex, paired index-wise with the positions.
    PerVertex(&'a [Color]),
}

impl LineColors<'_> {
    fn at(&self, index: usize) -> Color {
        match self {
            LineColors::Flat(color) => *color,
            LineColors::PerVertex(colors) => colors[index],
        }
    }
}

/// Check that `positions` form whole lines and `colors` pair up with them.
pub fn validate_lines(positions: &[Vec3], colors: LineColors<'_>) -> Result<(), LineError> {
    if let LineColors::PerVertex(colors) = colors {
        if colors.len() != positions.len() {
            return Err(LineError::ColorCountMismatch {
                positions: positions.len(),
                colors: colors.len(),
            });
        }
    }
    if positions.len() % 2 != 0 {
        return Err(LineError::OddPositionCount(positions.len()));
    }
    Ok(())
}

/// Lines drawn into one layer during a frame.
///
/// The batch owns a dynamic vertex buffer sized for `num_lines_allocated`
/// lines and a CPU staging copy of it. Capacity only grows: when a frame
/// needs more lines the buffer is released first, then capacity doubles
/// until the lines fit and a new buffer is created.
///
/// One [`MeshInstance`] (identity transform, culling off) draws the whole
/// batch. Its mesh and material are shared with layers through `Arc` and
/// updated in place with [`Arc::make_mut`].
///
/// Lines are meant to be drawn outside the `PreRender`..`PostRender`
/// window. Lines drawn inside it go to the next frame, and while the layer
/// still holds the registered instance a growth copies the mesh: the old
/// buffer then lives in the layer's copy until `PostRender` clears it, after
/// the new buffer is created.
#[derive(Debug)]
pub struct LineBatch {
    num_lines_allocated: usize,
    lines_used: usize,
    staging: Vec<LineVertex>,
    layer: Option<LayerId>,
    mesh_instance: Option<MeshInstance>,
}

impl LineBatch {
    /// Empty batch that will start with room for `initial_lines` lines.
    pub fn new(initial_lines: usize) -> Self {
        Self {
            num_lines_allocated: initial_lines.max(1),
            lines_used: 0,
            staging: Vec::new(),
            layer: None,
            mesh_instance: None,
        }
    }

    /// Prepare the batch to receive `lines_to_add` more lines for `layer`.
    ///
    /// Builds the mesh and material on first use, re-targets the batch at
    /// `layer` and grows the vertex buffer when needed.
    ///
    /// A growth the device limits reject fails before anything is released.
    /// When the backend allocation itself fails, a buffer at the previous
    /// capacity is recreated; either way the capacity stays put and lines
    /// staged so far are still drawn by the next `finalize`.
    pub fn init(
        &mut self,
        device: &Arc<GraphicsDevice>,
        vertex_layout: &Arc<VertexLayout>,
        layer: LayerId,
        lines_to_add: usize,
    ) -> Result<(), GraphicsError> {
        let instance = self.mesh_instance.get_or_insert_with(|| {
            let mesh = Mesh::new(
                vertex_layout.clone(),
                Primitive {
                    topology: PrimitiveTopology::LineList,
                    base: 0,
                    count: 0,
                    indexed: false,
                },
            )
            .with_label("immediate_lines");
            let material = Material::vertex_colored().with_label("immediate_lines");
            MeshInstance::new(GraphNode::IDENTITY, Arc::new(mesh), Arc::new(material))
                .without_culling()
        });

        self.layer = Some(layer);

        let needed = self.lines_used + lines_to_add;
        let mut capacity = self.num_lines_allocated;
        while needed > capacity {
            capacity *= 2;
        }
        let grows = capacity != self.num_lines_allocated;
        if !grows && instance.mesh.vertex_buffer().is_some() {
            return Ok(());
        }

        // Limits are checked before anything is released
        let descriptor = line_buffer_descriptor(capacity)?;
        device.validate_buffer(&descriptor)?;

        if grows {
            log::debug!("LineBatch: growing to {} lines for layer {:?}", capacity, layer);
            // Old buffer goes before the new one is created
            if instance.mesh.vertex_buffer().is_some() {
                Arc::make_mut(&mut instance.mesh).set_vertex_buffer(None);
            }
        }

        let buffer = match device.create_buffer(&descriptor) {
            Ok(buffer) => buffer,
            Err(err) if grows => {
                // Keep the current capacity so lines staged so far still draw
                let restored = line_buffer_descriptor(self.num_lines_allocated)
                    .and_then(|descriptor| device.create_buffer(&descriptor));
                match restored {
                    Ok(buffer) => {
                        self.staging
                            .resize(self.num_lines_allocated * 2, LineVertex::default());
                        Arc::make_mut(&mut instance.mesh).set_vertex_buffer(Some(buffer));
                    }
                    Err(restore_err) => {
                        log::error!(
                            "LineBatch: lost vertex buffer for layer {:?}, dropping {} lines: {}",
                            layer,
                            self.lines_used,
                            restore_err
                        );
                        self.lines_used = 0;
                    }
                }
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        self.num_lines_allocated = capacity;
        self.staging.resize(capacity * 2, LineVertex::default());
        Arc::make_mut(&mut instance.mesh).set_vertex_buffer(Some(buffer));
        Ok(())
    }

    /// Append lines to the staging vertices.
    ///
    /// `init` must have been called for at least `positions.len() / 2` lines.
    pub fn add_lines(&mut self, positions: &[Vec3], colors: LineColors<'_>) -> Result<(), LineError> {
        validate_lines(positions, colors)?;

        let start = self.lines_used * 2;
        let end = start + positions.len();
        if end > self.staging.len() {
            return Err(LineError::CapacityExceeded {
                needed: end / 2,
                allocated: self.staging.len() / 2,
            });
        }

        for (i, (slot, position)) in self.staging[start..end].iter_mut().zip(positions).enumerate() {
            *slot = LineVertex::new(*position, colors.at(i));
        }
        self.lines_used += positions.len() / 2;
        Ok(())
    }

    /// Upload this frame's lines and register the draw with the target layer.
    ///
    /// Does nothing but reset the line count when the batch is empty. A batch
    /// without a vertex buffer is never registered.
    pub fn finalize(&mut self, layers: &mut LayerComposition) -> Result<(), GraphicsError> {
        let lines = std::mem::take(&mut self.lines_used);
        if lines == 0 {
            return Ok(());
        }
        let (Some(instance), Some(layer)) = (self.mesh_instance.as_mut(), self.layer) else {
            return Ok(());
        };

        let vertex_count = lines * 2;
        let buffer = instance.mesh.vertex_buffer().ok_or_else(|| {
            GraphicsError::ResourceCreationFailed(format!(
                "line batch for {layer:?} has no vertex buffer"
            ))
        })?;
        upload(buffer, bytemuck::cast_slice(&self.staging[..vertex_count]))?;
        Arc::make_mut(&mut instance.mesh).primitive.count = vertex_count as u32;

        let target = layers.get_layer_by_id_mut(layer).ok_or_else(|| {
            GraphicsError::InvalidParameter(format!("layer {layer:?} is not in the composition"))
        })?;
        target.add_mesh_instances(std::slice::from_ref(instance), false);
        Ok(())
    }

    /// Apply a depth test setting to the batch material.
    pub fn set_depth_test(&mut self, depth_test: bool) {
        if let Some(instance) = self.mesh_instance.as_mut() {
            if instance.material.depth_test != depth_test {
                Arc::make_mut(&mut instance.material).depth_test = depth_test;
            }
        }
    }

    /// Set the camera visibility mask of the batch instance.
    pub fn set_mask(&mut self, mask: u32) {
        if let Some(instance) = self.mesh_instance.as_mut() {
            instance.mask = mask;
        }
    }

    /// Lines added since the last `finalize`.
    pub fn lines_used(&self) -> usize {
        self.lines_used
    }

    pub fn num_lines_allocated(&self) -> usize {
        self.num_lines_allocated
    }

    /// Vertices drawn by the last `finalize`.
    pub fn vertex_count(&self) -> u32 {
        self.mesh_instance
            .as_ref()
            .map_or(0, MeshInstance::vertex_count)
    }

    /// Layer targeted by the last `init`.
    pub fn layer(&self) -> Option<LayerId> {
        self.layer
    }

    /// Staging copy of the vertex buffer.
    pub fn staging_vertices(&self) -> &[LineVertex] {
        &self.staging
    }

    pub fn mesh_instance(&self) -> Option<&MeshInstance> {
        self.mesh_instance.as_ref()
    }
}

fn line_buffer_descriptor(lines: usize) -> Result<BufferDescriptor, GraphicsError> {
    let vertex_count = u32::try_from(lines * 2).map_err(|_| {
        GraphicsError::InvalidParameter(format!("{lines} lines exceed the vertex count limit"))
    })?;
    Ok(BufferDescriptor::vertices(vertex_count, LineVertex::STRIDE, true).with_label("immediate_lines"))
}

fn upload(buffer: &Buffer, bytes: &[u8]) -> Result<(), GraphicsError> {
    let device = buffer.device().ok_or(GraphicsError::DeviceLost)?;
    device.write_buffer(buffer, 0, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_graphics::{BackendEvent, DeviceCapabilities};

    fn setup() -> (Arc<GraphicsDevice>, Arc<VertexLayout>) {
        let (device, _backend) = GraphicsDevice::dummy(DeviceCapabilities::default());
        (device, Arc::new(VertexLayout::position_color()))
    }

    #[test]
    fn test_validate_lines() {
        let p = [Vec3::ZERO, Vec3::X, Vec3::Y];
        assert_eq!(
            validate_lines(&p, LineColors::Flat(Color::WHITE)),
            Err(LineError::OddPositionCount(3))
        );
        assert_eq!(
            validate_lines(&p[..2], LineColors::PerVertex(&[Color::RED])),
            Err(LineError::ColorCountMismatch {
                positions: 2,
                colors: 1
            })
        );
        assert!(validate_lines(&[], LineColors::Flat(Color::WHITE)).is_ok());
    }

    #[test]
    fn test_first_init_allocates() {
        let (device, layout) = setup();
        let mut batch = LineBatch::new(128);
        batch.init(&device, &layout, LayerId::IMMEDIATE, 1).unwrap();

        assert_eq!(batch.num_lines_allocated(), 128);
        assert_eq!(batch.staging_vertices().len(), 256);
        assert_eq!(batch.layer(), Some(LayerId::IMMEDIATE));

        let instance = batch.mesh_instance().unwrap();
        assert!(!instance.cull);
        assert_eq!(instance.node, GraphNode::IDENTITY);
        assert_eq!(instance.mesh.primitive.topology, PrimitiveTopology::LineList);
        assert!(!instance.mesh.primitive.indexed);
        assert!(instance.material.vertex_colors);
        assert_eq!(
            instance.mesh.vertex_buffer().unwrap().size(),
            256 * LineVertex::STRIDE as u64
        );
    }

    #[test]
    fn test_add_lines_flat_and_per_vertex() {
        let (device, layout) = setup();
        let mut batch = LineBatch::new(4);
        batch.init(&device, &layout, LayerId::IMMEDIATE, 2).unwrap();

        batch
            .add_lines(&[Vec3::ZERO, Vec3::X], LineColors::Flat(Color::RED))
            .unwrap();
        batch
            .add_lines(
                &[Vec3::Y, Vec3::Z],
                LineColors::PerVertex(&[Color::GREEN, Color::BLUE]),
            )
            .unwrap();

        assert_eq!(batch.lines_used(), 2);
        let v = batch.staging_vertices();
        assert_eq!(v[0].color, [255, 0, 0, 255]);
        assert_eq!(v[1].position(), Vec3::X);
        assert_eq!(v[2].color, [0, 255, 0, 255]);
        assert_eq!(v[3].color, [0, 0, 255, 255]);
    }

    #[test]
    fn test_add_lines_beyond_capacity() {
        let (device, layout) = setup();
        let mut batch = LineBatch::new(1);
        batch.init(&device, &layout, LayerId::IMMEDIATE, 1).unwrap();
        let err = batch
            .add_lines(&[Vec3::ZERO; 4], LineColors::Flat(Color::WHITE))
            .unwrap_err();
        assert_eq!(
            err,
            LineError::CapacityExceeded {
                needed: 2,
                allocated: 1
            }
        );
        assert_eq!(batch.lines_used(), 0);
    }

    #[test]
    fn test_growth_doubles_until_it_fits() {
        let (device, layout) = setup();
        let mut batch = LineBatch::new(128);
        batch.init(&device, &layout, LayerId::IMMEDIATE, 100).unwrap();
        batch
            .add_lines(&[Vec3::ONE; 200], LineColors::Flat(Color::WHITE))
            .unwrap();

        batch.init(&device, &layout, LayerId::IMMEDIATE, 300).unwrap();
        assert_eq!(batch.num_lines_allocated(), 512);
        assert_eq!(batch.staging_vertices().len(), 1024);
        // Lines staged before the reallocation are kept
        assert_eq!(batch.staging_vertices()[199].position(), Vec3::ONE);
    }

    #[test]
    fn test_finalize_registers_and_resets() {
        let (device, layout) = setup();
        let mut layers = LayerComposition::default();
        let mut batch = LineBatch::new(8);
        batch.init(&device, &layout, LayerId::WORLD, 1).unwrap();
        batch
            .add_lines(&[Vec3::ZERO, Vec3::X], LineColors::Flat(Color::WHITE))
            .unwrap();

        batch.finalize(&mut layers).unwrap();

        assert_eq!(batch.lines_used(), 0);
        assert_eq!(batch.vertex_count(), 2);
        let world = layers.get_layer_by_id(LayerId::WORLD).unwrap();
        assert_eq!(world.mesh_instances().len(), 1);
        assert_eq!(world.mesh_instances()[0].vertex_count(), 2);

        // Nothing staged: nothing registered
        batch.finalize(&mut layers).unwrap();
        assert_eq!(layers.get_layer_by_id(LayerId::WORLD).unwrap().mesh_instances().len(), 1);
    }

    #[test]
    fn test_depth_test_and_mask() {
        let (device, layout) = setup();
        let mut batch = LineBatch::new(8);
        batch.init(&device, &layout, LayerId::IMMEDIATE, 1).unwrap();
        batch.set_depth_test(false);
        batch.set_mask(0b10);
        let instance = batch.mesh_instance().unwrap();
        assert!(!instance.material.depth_test);
        assert_eq!(instance.mask, 0b10);
    }

    fn batch_with_one_line(device: &Arc<GraphicsDevice>, layout: &Arc<VertexLayout>) -> LineBatch {
        let mut batch = LineBatch::new(128);
        batch.init(device, layout, LayerId::IMMEDIATE, 1).unwrap();
        batch
            .add_lines(&[Vec3::ZERO, Vec3::X], LineColors::Flat(Color::WHITE))
            .unwrap();
        batch
    }

    #[test]
    fn test_growth_past_device_limit_keeps_buffer() {
        // 128 lines fill exactly 4096 bytes
        let caps = DeviceCapabilities::default().with_max_buffer_size(4096);
        let (device, backend) = GraphicsDevice::dummy(caps);
        let layout = Arc::new(VertexLayout::position_color());
        let mut batch = batch_with_one_line(&device, &layout);
        let buffer = batch.mesh_instance().unwrap().mesh.vertex_buffer().unwrap().gpu_id();
        backend.clear_events();

        let err = batch.init(&device, &layout, LayerId::IMMEDIATE, 128).unwrap_err();
        assert!(matches!(err, GraphicsError::InvalidParameter(_)));
        assert!(backend.events().is_empty());
        assert_eq!(batch.lines_used(), 1);
        assert_eq!(batch.num_lines_allocated(), 128);
        assert_eq!(batch.staging_vertices().len(), 256);
        assert_eq!(
            batch.mesh_instance().unwrap().mesh.vertex_buffer().unwrap().gpu_id(),
            buffer
        );

        let mut layers = LayerComposition::default();
        batch.finalize(&mut layers).unwrap();
        let registered = &layers.get_layer_by_id(LayerId::IMMEDIATE).unwrap().mesh_instances()[0];
        assert_eq!(registered.vertex_count(), 2);
        assert_eq!(registered.mesh.vertex_buffer().unwrap().gpu_id(), buffer);
        let uploaded = backend.read_buffer(buffer).unwrap();
        let end_position: &[u8] = bytemuck::cast_slice(&[1.0f32, 0.0, 0.0]);
        assert_eq!(&uploaded[16..28], end_position);
    }

    #[test]
    fn test_failed_allocation_restores_capacity() {
        let (device, backend) = GraphicsDevice::dummy(DeviceCapabilities::default());
        let layout = Arc::new(VertexLayout::position_color());
        let mut batch = batch_with_one_line(&device, &layout);
        let old = batch.mesh_instance().unwrap().mesh.vertex_buffer().unwrap().gpu_id();
        backend.clear_events();
        backend.set_memory_limit(Some(4096));

        let err = batch.init(&device, &layout, LayerId::IMMEDIATE, 200).unwrap_err();
        assert_eq!(err, GraphicsError::OutOfMemory);
        assert_eq!(batch.num_lines_allocated(), 128);
        assert_eq!(batch.lines_used(), 1);
        assert_eq!(batch.staging_vertices()[1].position(), Vec3::X);

        let events = backend.events();
        assert_eq!(events[0], BackendEvent::DestroyBuffer { id: old });
        assert!(matches!(events[1], BackendEvent::CreateBuffer { size: 4096, .. }));

        let mut layers = LayerComposition::default();
        batch.finalize(&mut layers).unwrap();
        let registered = &layers.get_layer_by_id(LayerId::IMMEDIATE).unwrap().mesh_instances()[0];
        assert_eq!(registered.vertex_count(), 2);
        assert!(registered.mesh.vertex_buffer().is_some());
    }

    #[test]
    fn test_lost_buffer_is_never_registered() {
        let (device, backend) = GraphicsDevice::dummy(DeviceCapabilities::default());
        let layout = Arc::new(VertexLayout::position_color());
        let mut batch = batch_with_one_line(&device, &layout);
        backend.set_memory_limit(Some(0));

        assert!(batch.init(&device, &layout, LayerId::IMMEDIATE, 200).is_err());
        assert_eq!(batch.lines_used(), 0);
        assert!(batch.mesh_instance().unwrap().mesh.vertex_buffer().is_none());

        let mut layers = LayerComposition::default();
        batch.finalize(&mut layers).unwrap();
        assert!(layers.get_layer_by_id(LayerId::IMMEDIATE).unwrap().mesh_instances().is_empty());
    }
}
