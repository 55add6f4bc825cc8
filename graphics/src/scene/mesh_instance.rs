use std::sync::Arc;

use crate::materials::Material;
use crate::mesh::Mesh;

use super::graph_node::GraphNode;

/// A draw instance: geometry, material and transform submitted to a layer.
///
/// Cheap to clone; layers keep their own copies.
#[derive(Debug, Clone)]
pub struct MeshInstance {
    pub node: GraphNode,
    pub mesh: Arc<Mesh>,
    pub material: Arc<Material>,
    /// Whether the renderer may frustum-cull this instance.
    pub cull: bool,
    /// Camera visibility mask.
    pub mask: u32,
}

impl MeshInstance {
    /// Mask value that is visible to every camera.
    pub const DEFAULT_MASK: u32 = u32::MAX;

    pub fn new(node: GraphNode, mesh: Arc<Mesh>, material: Arc<Material>) -> Self {
        Self {
            node,
            mesh,
            material,
            cull: true,
            mask: Self::DEFAULT_MASK,
        }
    }

    /// Disable frustum culling.
    pub fn without_culling(mut self) -> Self {
        self.cull = false;
        self
    }

    /// Set the visibility mask.
    pub fn with_mask(mut self, mask: u32) -> Self {
        self.mask = mask;
        self
    }

    /// Number of vertices the mesh draws.
    pub fn vertex_count(&self) -> u32 {
        self.mesh.vertex_count()
    }
}
