//! Materials: render state shared by draw instances.

mod material;

pub use material::{BlendMode, Material};
