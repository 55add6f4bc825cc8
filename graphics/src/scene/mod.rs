//! Scene-side collaborators of the renderer.
//!
//! - [`GraphNode`] - World transform carrier
//! - [`MeshInstance`] - Draw instance submitted to a layer
//! - [`Layer`] / [`LayerComposition`] - Per-frame draw instance buckets

mod graph_node;
mod layer;
mod mesh_instance;

pub use graph_node::GraphNode;
pub use layer::{Layer, LayerComposition, LayerId};
pub use mesh_instance::MeshInstance;
