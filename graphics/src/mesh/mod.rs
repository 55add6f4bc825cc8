//! Mesh and vertex layout types.

mod data;
mod layout;

pub use data::{Mesh, Primitive, PrimitiveTopology};
pub use layout::{VertexAttribute, VertexAttributeFormat, VertexAttributeSemantic, VertexLayout};
