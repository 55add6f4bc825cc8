use std::collections::HashMap;
use std::sync::Arc;

use glam::{Mat4, Vec3};
use lumen_graphics::mesh::{Mesh, Primitive, PrimitiveTopology, VertexLayout};
use lumen_graphics::scene::{LayerComposition, LayerId};
use lumen_graphics::{BufferDescriptor, GraphicsDevice, GraphicsError};

use crate::config::ImmediateConfig;
use crate::line_batch::LineBatch;

/// Corners of a unit cube centered at the origin.
///
/// Bottom face (z = -0.5) first, then the top face in the same winding.
pub const UNIT_CUBE_CORNERS: [Vec3; 8] = [
    Vec3::new(-0.5, -0.5, -0.5),
    Vec3::new(-0.5, 0.5, -0.5),
    Vec3::new(0.5, 0.5, -0.5),
    Vec3::new(0.5, -0.5, -0.5),
    Vec3::new(-0.5, -0.5, 0.5),
    Vec3::new(-0.5, 0.5, 0.5),
    Vec3::new(0.5, 0.5, 0.5),
    Vec3::new(0.5, -0.5, 0.5),
];

/// Corner index pairs of the 12 cube edges: bottom, top, then verticals.
const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Unit quad in the XY plane, as a 4-vertex triangle strip.
const QUAD_POSITIONS: [[f32; 3]; 4] = [
    [-0.5, -0.5, 0.0],
    [0.5, -0.5, 0.0],
    [-0.5, 0.5, 0.0],
    [0.5, 0.5, 0.0],
];

/// Frame-scoped immediate draw state.
///
/// Holds one [`LineBatch`] per layer that has received lines, and the list
/// of layers that received any immediate geometry this frame. Batches live
/// for the lifetime of the context and keep their buffers between frames.
#[derive(Debug)]
pub struct ImmediateContext {
    config: ImmediateConfig,
    line_layout: Arc<VertexLayout>,
    line_batches: Vec<LineBatch>,
    layer_to_batch: HashMap<LayerId, usize>,
    active_layers: Vec<LayerId>,
    quad_mesh: Arc<Mesh>,
}

impl ImmediateContext {
    /// Create the context and its shared quad mesh.
    pub fn new(device: &Arc<GraphicsDevice>, config: ImmediateConfig) -> Result<Self, GraphicsError> {
        if config.initial_line_capacity == 0 {
            return Err(GraphicsError::InvalidParameter(
                "initial line capacity cannot be zero".to_string(),
            ));
        }

        let quad_layout = Arc::new(VertexLayout::position());
        let quad_buffer = device.create_buffer(
            &BufferDescriptor::vertices(4, quad_layout.stride(), false).with_label("immediate_quad"),
        )?;
        device.write_buffer(&quad_buffer, 0, bytemuck::cast_slice(&QUAD_POSITIONS))?;
        let quad_mesh = Mesh::new(
            quad_layout,
            Primitive {
                topology: PrimitiveTopology::TriangleStrip,
                base: 0,
                count: 4,
                indexed: false,
            },
        )
        .with_vertex_buffer(quad_buffer)
        .with_label("immediate_quad");

        log::debug!(
            "ImmediateContext: created (line capacity {}, default layer {:?})",
            config.initial_line_capacity,
            config.default_layer
        );

        Ok(Self {
            config,
            line_layout: Arc::new(VertexLayout::position_color().with_label("immediate_line")),
            line_batches: Vec::new(),
            layer_to_batch: HashMap::new(),
            active_layers: Vec::new(),
            quad_mesh: Arc::new(quad_mesh),
        })
    }

    pub fn config(&self) -> &ImmediateConfig {
        &self.config
    }

    /// Vertex layout shared by all line batches.
    pub fn line_layout(&self) -> &Arc<VertexLayout> {
        &self.line_layout
    }

    /// The batch for `layer`, created on first use, ready for `lines_to_add` lines.
    pub fn batch_for_layer(
        &mut self,
        device: &Arc<GraphicsDevice>,
        layer: LayerId,
        lines_to_add: usize,
    ) -> Result<&mut LineBatch, GraphicsError> {
        let index = match self.layer_to_batch.get(&layer) {
            Some(&index) => index,
            None => {
                let index = self.line_batches.len();
                self.line_batches
                    .push(LineBatch::new(self.config.initial_line_capacity));
                self.layer_to_batch.insert(layer, index);
                log::debug!("ImmediateContext: new line batch {} for layer {:?}", index, layer);
                index
            }
        };
        let batch = &mut self.line_batches[index];
        batch.init(device, &self.line_layout, layer, lines_to_add)?;
        Ok(batch)
    }

    /// Record that `layer` received immediate geometry this frame.
    pub fn mark_layer_active(&mut self, layer: LayerId) {
        if !self.active_layers.contains(&layer) {
            self.active_layers.push(layer);
        }
    }

    /// Upload every batch and register it with its layer.
    pub fn prerender(&mut self, layers: &mut LayerComposition) {
        for batch in &mut self.line_batches {
            if let Err(err) = batch.finalize(layers) {
                log::error!("ImmediateContext: failed to finalize line batch: {}", err);
            }
        }
    }

    /// Clear every layer touched this frame.
    pub fn postrender(&mut self, layers: &mut LayerComposition) {
        for layer in self.active_layers.drain(..) {
            if let Some(layer) = layers.get_layer_by_id_mut(layer) {
                layer.clear_mesh_instances();
            }
        }
    }

    pub fn line_batches(&self) -> &[LineBatch] {
        &self.line_batches
    }

    /// The batch drawing into `layer`, if one exists.
    pub fn batch(&self, layer: LayerId) -> Option<&LineBatch> {
        self.layer_to_batch
            .get(&layer)
            .map(|&index| &self.line_batches[index])
    }

    pub fn active_layers(&self) -> &[LayerId] {
        &self.active_layers
    }

    pub fn quad_mesh(&self) -> &Arc<Mesh> {
        &self.quad_mesh
    }
}

/// The 24 line endpoints of a unit cube transformed by `matrix`.
pub fn wire_cube_lines(matrix: &Mat4) -> [Vec3; 24] {
    let corners = UNIT_CUBE_CORNERS.map(|corner| matrix.transform_point3(corner));
    let mut lines = [Vec3::ZERO; 24];
    for (pair, &(a, b)) in lines.chunks_exact_mut(2).zip(CUBE_EDGES.iter()) {
        pair[0] = corners[a];
        pair[1] = corners[b];
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_graphics::DeviceCapabilities;

    fn context() -> (Arc<GraphicsDevice>, ImmediateContext) {
        let (device, _backend) = GraphicsDevice::dummy(DeviceCapabilities::default());
        let ctx = ImmediateContext::new(&device, ImmediateConfig::default()).unwrap();
        (device, ctx)
    }

    #[test]
    fn test_quad_mesh() {
        let (_device, ctx) = context();
        let quad = ctx.quad_mesh();
        assert_eq!(quad.primitive.topology, PrimitiveTopology::TriangleStrip);
        assert_eq!(quad.vertex_count(), 4);
        assert_eq!(quad.vertex_buffer().unwrap().size(), 48);
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let (device, _backend) = GraphicsDevice::dummy(DeviceCapabilities::default());
        let config = ImmediateConfig::default().with_initial_line_capacity(0);
        assert!(matches!(
            ImmediateContext::new(&device, config),
            Err(GraphicsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_one_batch_per_layer() {
        let (device, mut ctx) = context();
        ctx.batch_for_layer(&device, LayerId::IMMEDIATE, 1).unwrap();
        ctx.batch_for_layer(&device, LayerId::WORLD, 1).unwrap();
        ctx.batch_for_layer(&device, LayerId::IMMEDIATE, 1).unwrap();

        assert_eq!(ctx.line_batches().len(), 2);
        assert_eq!(ctx.batch(LayerId::WORLD).unwrap().layer(), Some(LayerId::WORLD));
        assert!(ctx.batch(LayerId::UI).is_none());
    }

    #[test]
    fn test_mark_layer_active_dedupes() {
        let (_device, mut ctx) = context();
        ctx.mark_layer_active(LayerId::IMMEDIATE);
        ctx.mark_layer_active(LayerId::WORLD);
        ctx.mark_layer_active(LayerId::IMMEDIATE);
        assert_eq!(ctx.active_layers(), &[LayerId::IMMEDIATE, LayerId::WORLD]);
    }

    #[test]
    fn test_wire_cube_identity() {
        let lines = wire_cube_lines(&Mat4::IDENTITY);
        assert_eq!(lines[0], UNIT_CUBE_CORNERS[0]);
        assert_eq!(lines[1], UNIT_CUBE_CORNERS[1]);
        // Last vertical edge
        assert_eq!(lines[22], UNIT_CUBE_CORNERS[3]);
        assert_eq!(lines[23], UNIT_CUBE_CORNERS[7]);
        for p in lines {
            assert_eq!(p.abs(), Vec3::splat(0.5));
        }
    }

    #[test]
    fn test_wire_cube_transformed() {
        let matrix = Mat4::from_scale_rotation_translation(
            Vec3::splat(2.0),
            glam::Quat::IDENTITY,
            Vec3::new(10.0, 0.0, 0.0),
        );
        let lines = wire_cube_lines(&matrix);
        assert_eq!(lines[0], Vec3::new(9.0, -1.0, -1.0));
        // Vertical edges run from the bottom face up
        assert_eq!(lines[16], Vec3::new(9.0, -1.0, -1.0));
        assert_eq!(lines[17], Vec3::new(9.0, -1.0, 1.0));
    }
}
