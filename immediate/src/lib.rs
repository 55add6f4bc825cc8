//! Immediate-mode drawing for the Lumen engine.
//!
//! Lines, wire cubes, meshes and quads drawn for a single frame, without
//! creating persistent scene entities.
//!
//! # Architecture
//!
//! - [`Application`] - Owns the layers and frame events; exposes the draw API
//! - [`ImmediateContext`] - Per-application state, created by the first draw call
//! - [`LineBatch`] - One per layer; stages line vertices and grows its GPU buffer
//! - [`LineVertex`] - 16-byte position + RGBA8 vertex
//!
//! # Usage
//!
//! ```ignore
//! let (device, _backend) = GraphicsDevice::dummy(DeviceCapabilities::default());
//! let mut app = Application::new(device, LayerComposition::default());
//!
//! // Each frame:
//! app.render_line(Vec3::ZERO, Vec3::X, Color::RED, ImmediateOptions::default());
//! app.render_lines(&points, LineColors::PerVertex(&colors), ImmediateOptions::default().on_layer(LayerId::WORLD));
//! app.fire(FrameEvent::PreRender);   // upload + register with layers
//! // ... renderer consumes app.layers() ...
//! app.fire(FrameEvent::PostRender);  // clear touched layers
//! ```

mod app;
mod config;
mod context;
mod error;
mod events;
mod line_batch;
mod options;
mod vertex;

pub use app::{Application, ImmediateState};
pub use config::{DEFAULT_LINE_CAPACITY, ImmediateConfig};
pub use context::{ImmediateContext, UNIT_CUBE_CORNERS, wire_cube_lines};
pub use error::LineError;
pub use events::{FrameEvent, FrameEvents, FrameHandler};
pub use line_batch::{LineBatch, LineColors, validate_lines};
pub use options::{
    DeprecationNotice, ImmediateOptions, LINEBATCH_GIZMO, LINEBATCH_OVERLAY, LINEBATCH_WORLD,
};
pub use vertex::LineVertex;
