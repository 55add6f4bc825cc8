//! Plain data types shared across the graphics crate.

mod buffer;
mod color;

pub use buffer::{BufferDescriptor, BufferUsage};
pub use color::Color;
