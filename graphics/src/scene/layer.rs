use std::fmt;

use super::mesh_instance::MeshInstance;

/// Identity of a render layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u32);

impl LayerId {
    pub const WORLD: Self = Self(0);
    pub const DEPTH: Self = Self(1);
    pub const SKYBOX: Self = Self(2);
    /// Default target of immediate-mode drawing.
    pub const IMMEDIATE: Self = Self(3);
    pub const UI: Self = Self(4);
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

/// A render-pass bucket that collects draw instances for one frame.
#[derive(Debug, Clone)]
pub struct Layer {
    id: LayerId,
    name: String,
    pub enabled: bool,
    mesh_instances: Vec<MeshInstance>,
}

impl Layer {
    pub fn new(id: LayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            enabled: true,
            mesh_instances: Vec::new(),
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Copy `instances` into this layer.
    ///
    /// With `clear_existing` the current instances are dropped first. The
    /// slice is not retained.
    pub fn add_mesh_instances(&mut self, instances: &[MeshInstance], clear_existing: bool) {
        if clear_existing {
            self.mesh_instances.clear();
        }
        self.mesh_instances.extend_from_slice(instances);
    }

    /// Drop every instance registered on this layer.
    pub fn clear_mesh_instances(&mut self) {
        self.mesh_instances.clear();
    }

    pub fn mesh_instances(&self) -> &[MeshInstance] {
        &self.mesh_instances
    }
}

/// Ordered set of layers making up a frame.
#[derive(Debug, Clone)]
pub struct LayerComposition {
    layers: Vec<Layer>,
}

impl Default for LayerComposition {
    /// The well-known layers: world, depth, skybox, immediate, UI.
    fn default() -> Self {
        Self {
            layers: vec![
                Layer::new(LayerId::WORLD, "World"),
                Layer::new(LayerId::DEPTH, "Depth"),
                Layer::new(LayerId::SKYBOX, "Skybox"),
                Layer::new(LayerId::IMMEDIATE, "Immediate"),
                Layer::new(LayerId::UI, "UI"),
            ],
        }
    }
}

impl LayerComposition {
    /// Composition with no layers.
    pub fn empty() -> Self {
        Self { layers: Vec::new() }
    }

    /// Append a layer. A layer with the same id is replaced in place.
    pub fn push(&mut self, layer: Layer) {
        match self.layers.iter_mut().find(|l| l.id == layer.id) {
            Some(existing) => *existing = layer,
            None => self.layers.push(layer),
        }
    }

    pub fn get_layer_by_id(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn get_layer_by_id_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    pub fn get_layer_by_name(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::materials::Material;
    use crate::mesh::{Mesh, Primitive, VertexLayout};
    use crate::scene::GraphNode;

    fn instance() -> MeshInstance {
        let mesh = Mesh::new(Arc::new(VertexLayout::position()), Primitive::default());
        MeshInstance::new(GraphNode::IDENTITY, Arc::new(mesh), Arc::new(Material::new()))
    }

    #[test]
    fn test_default_composition() {
        let layers = LayerComposition::default();
        assert_eq!(layers.len(), 5);
        assert_eq!(
            layers.get_layer_by_id(LayerId::IMMEDIATE).map(Layer::name),
            Some("Immediate")
        );
        assert_eq!(layers.get_layer_by_name("UI").map(Layer::id), Some(LayerId::UI));
        assert!(layers.get_layer_by_id(LayerId(42)).is_none());
    }

    #[test]
    fn test_add_appends_or_replaces() {
        let mut layer = Layer::new(LayerId(9), "Debug");
        layer.add_mesh_instances(std::slice::from_ref(&instance()), false);
        layer.add_mesh_instances(std::slice::from_ref(&instance()), false);
        assert_eq!(layer.mesh_instances().len(), 2);

        layer.add_mesh_instances(std::slice::from_ref(&instance()), true);
        assert_eq!(layer.mesh_instances().len(), 1);

        layer.clear_mesh_instances();
        assert!(layer.mesh_instances().is_empty());
    }

    #[test]
    fn test_push_replaces_same_id() {
        let mut layers = LayerComposition::empty();
        layers.push(Layer::new(LayerId(7), "A"));
        layers.push(Layer::new(LayerId(7), "B"));
        assert_eq!(layers.len(), 1);
        assert_eq!(layers.get_layer_by_id(LayerId(7)).map(Layer::name), Some("B"));
    }
}
