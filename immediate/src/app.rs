//! The application frame loop and its immediate draw API.

use std::sync::Arc;

use glam::{Mat4, Vec3};
use lumen_graphics::materials::Material;
use lumen_graphics::mesh::Mesh;
use lumen_graphics::scene::{GraphNode, LayerComposition, LayerId, MeshInstance};
use lumen_graphics::{Color, GraphicsDevice};

use crate::config::ImmediateConfig;
use crate::context::{ImmediateContext, wire_cube_lines};
use crate::events::{FrameEvent, FrameEvents};
use crate::line_batch::{LineColors, validate_lines};
use crate::options::{ImmediateOptions, LEGACY_LINE_BATCH};

/// Immediate draw state of an [`Application`].
#[derive(Debug, Default)]
pub enum ImmediateState {
    /// No immediate draw call has been made yet.
    #[default]
    Dormant,
    /// Initialized by the first draw call; handlers are subscribed.
    Active(ImmediateContext),
}

/// Owns the device, the layer composition and the frame events.
///
/// Immediate draw calls accumulate geometry during frame construction.
/// [`FrameEvent::PreRender`] uploads line batches and registers them with
/// their layers; [`FrameEvent::PostRender`] clears every layer that
/// received immediate geometry. Nothing persists into the next frame.
///
/// # Example
///
/// ```ignore
/// let mut app = Application::new(device, LayerComposition::default());
///
/// // Each frame:
/// app.render_line(Vec3::ZERO, Vec3::X, Color::RED, ImmediateOptions::default());
/// app.render_wire_cube(&Mat4::IDENTITY, Color::WHITE, ImmediateOptions::default());
/// app.fire(FrameEvent::PreRender);
/// renderer.draw(app.layers());
/// app.fire(FrameEvent::PostRender);
/// ```
#[derive(Debug)]
pub struct Application {
    device: Arc<GraphicsDevice>,
    layers: LayerComposition,
    events: FrameEvents,
    immediate: ImmediateState,
    config: ImmediateConfig,
}

impl Application {
    pub fn new(device: Arc<GraphicsDevice>, layers: LayerComposition) -> Self {
        Self::with_config(device, layers, ImmediateConfig::default())
    }

    pub fn with_config(
        device: Arc<GraphicsDevice>,
        layers: LayerComposition,
        config: ImmediateConfig,
    ) -> Self {
        Self {
            device,
            layers,
            events: FrameEvents::new(),
            immediate: ImmediateState::Dormant,
            config,
        }
    }

    pub fn device(&self) -> &Arc<GraphicsDevice> {
        &self.device
    }

    pub fn layers(&self) -> &LayerComposition {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut LayerComposition {
        &mut self.layers
    }

    pub fn events(&self) -> &FrameEvents {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut FrameEvents {
        &mut self.events
    }

    /// The immediate context, once the first draw call created it.
    pub fn immediate(&self) -> Option<&ImmediateContext> {
        match &self.immediate {
            ImmediateState::Active(ctx) => Some(ctx),
            ImmediateState::Dormant => None,
        }
    }

    /// Run every handler subscribed to `event`.
    ///
    /// Handlers subscribed while the event runs take effect next time.
    pub fn fire(&mut self, event: FrameEvent) {
        let handlers = self.events.handlers(event).to_vec();
        for handler in handlers {
            handler(self);
        }
    }

    // --- Lines ---

    /// Draw one flat-colored line.
    pub fn render_line(&mut self, start: Vec3, end: Vec3, color: Color, options: ImmediateOptions) {
        self.add_lines(&[start, end], LineColors::Flat(color), options);
    }

    /// Draw one line shaded from `start_color` to `end_color`.
    pub fn render_gradient_line(
        &mut self,
        start: Vec3,
        end: Vec3,
        start_color: Color,
        end_color: Color,
        options: ImmediateOptions,
    ) {
        self.add_lines(
            &[start, end],
            LineColors::PerVertex(&[start_color, end_color]),
            options,
        );
    }

    /// Draw lines between consecutive pairs of `positions`.
    ///
    /// An odd number of positions, or per-vertex colors that do not match
    /// the positions in length, rejects the whole call.
    pub fn render_lines(&mut self, positions: &[Vec3], colors: LineColors<'_>, options: ImmediateOptions) {
        self.add_lines(positions, colors, options);
    }

    /// [`render_line`](Self::render_line) with a numeric line batch id.
    #[deprecated(note = "use render_line or render_gradient_line with ImmediateOptions")]
    pub fn render_line_legacy(
        &mut self,
        start: Vec3,
        end: Vec3,
        color: Color,
        end_color: Option<Color>,
        batch: u32,
    ) {
        LEGACY_LINE_BATCH.warn();
        let options = ImmediateOptions::from_legacy_batch(batch);
        let end_color = end_color.unwrap_or(color);
        self.add_lines(&[start, end], LineColors::PerVertex(&[color, end_color]), options);
    }

    /// [`render_lines`](Self::render_lines) with a numeric line batch id.
    #[deprecated(note = "use render_lines with ImmediateOptions")]
    pub fn render_lines_legacy(&mut self, positions: &[Vec3], colors: LineColors<'_>, batch: u32) {
        LEGACY_LINE_BATCH.warn();
        self.add_lines(positions, colors, ImmediateOptions::from_legacy_batch(batch));
    }

    /// Draw the 12 edges of a unit cube transformed by `matrix`.
    pub fn render_wire_cube(&mut self, matrix: &Mat4, color: Color, options: ImmediateOptions) {
        let lines = wire_cube_lines(matrix);
        self.add_lines(&lines, LineColors::Flat(color), options);
    }

    fn add_lines(&mut self, positions: &[Vec3], colors: LineColors<'_>, options: ImmediateOptions) {
        if let Err(err) = validate_lines(positions, colors) {
            log::error!("render_lines: {}", err);
            return;
        }
        let Some(layer) = self.resolve_layer(options) else {
            return;
        };
        if !self.activate() {
            return;
        }
        let Application {
            device,
            immediate: ImmediateState::Active(ctx),
            ..
        } = self
        else {
            return;
        };

        let batch = match ctx.batch_for_layer(device, layer, positions.len() / 2) {
            Ok(batch) => batch,
            Err(err) => {
                log::error!("render_lines: cannot prepare line batch for {:?}: {}", layer, err);
                return;
            }
        };
        batch.set_depth_test(options.depth_test);
        if let Some(mask) = options.visibility_mask() {
            batch.set_mask(mask);
        }
        if let Err(err) = batch.add_lines(positions, colors) {
            log::error!("render_lines: {}", err);
            return;
        }
        ctx.mark_layer_active(layer);
    }

    // --- Meshes ---

    /// Draw an existing mesh instance this frame.
    ///
    /// The instance is copied into the layer as given, apart from the mask
    /// when the options carry a non-zero one.
    pub fn render_mesh_instance(&mut self, instance: &MeshInstance, options: ImmediateOptions) {
        match options.visibility_mask() {
            Some(mask) => {
                let instance = instance.clone().with_mask(mask);
                self.submit_instance(&instance, options);
            }
            None => self.submit_instance(instance, options),
        }
    }

    /// Draw `mesh` with `material` at `matrix` this frame.
    pub fn render_mesh(
        &mut self,
        mesh: Arc<Mesh>,
        material: Arc<Material>,
        matrix: &Mat4,
        options: ImmediateOptions,
    ) {
        let instance = one_off_instance(mesh, material, matrix, options);
        self.submit_instance(&instance, options);
    }

    /// Draw a unit quad (`-0.5..0.5` in X and Y) at `matrix` this frame.
    pub fn render_quad(&mut self, matrix: &Mat4, material: Arc<Material>, options: ImmediateOptions) {
        if !self.activate() {
            return;
        }
        let Some(quad) = self.immediate().map(|ctx| ctx.quad_mesh().clone()) else {
            return;
        };
        let instance = one_off_instance(quad, material, matrix, options);
        self.submit_instance(&instance, options);
    }

    fn submit_instance(&mut self, instance: &MeshInstance, options: ImmediateOptions) {
        let Some(layer) = self.resolve_layer(options) else {
            return;
        };
        if !self.activate() {
            return;
        }
        let Application {
            layers,
            immediate: ImmediateState::Active(ctx),
            ..
        } = self
        else {
            return;
        };
        let Some(target) = layers.get_layer_by_id_mut(layer) else {
            return;
        };
        ctx.mark_layer_active(layer);
        target.add_mesh_instances(std::slice::from_ref(instance), false);
    }

    // --- Frame ---

    /// Target layer of a draw call, if it exists in the composition.
    fn resolve_layer(&self, options: ImmediateOptions) -> Option<LayerId> {
        let layer = options.layer.unwrap_or(self.config.default_layer);
        if self.layers.get_layer_by_id(layer).is_none() {
            log::error!("Immediate draw: layer {:?} is not in the composition", layer);
            return None;
        }
        Some(layer)
    }

    /// Create the immediate context on first use. Returns whether it exists.
    fn activate(&mut self) -> bool {
        if let ImmediateState::Active(_) = self.immediate {
            return true;
        }
        match ImmediateContext::new(&self.device, self.config) {
            Ok(ctx) => {
                self.immediate = ImmediateState::Active(ctx);
                self.events.on(FrameEvent::PreRender, prerender_immediate);
                self.events.on(FrameEvent::PostRender, postrender_immediate);
                log::debug!("Application: immediate drawing initialized");
                true
            }
            Err(err) => {
                log::error!("Application: cannot initialize immediate drawing: {}", err);
                false
            }
        }
    }
}

fn one_off_instance(
    mesh: Arc<Mesh>,
    material: Arc<Material>,
    matrix: &Mat4,
    options: ImmediateOptions,
) -> MeshInstance {
    let mut instance =
        MeshInstance::new(GraphNode::from_world_transform(*matrix), mesh, material).without_culling();
    if let Some(mask) = options.visibility_mask() {
        instance.mask = mask;
    }
    instance
}

fn prerender_immediate(app: &mut Application) {
    if let Application {
        layers,
        immediate: ImmediateState::Active(ctx),
        ..
    } = app
    {
        ctx.prerender(layers);
    }
}

fn postrender_immediate(app: &mut Application) {
    if let Application {
        layers,
        immediate: ImmediateState::Active(ctx),
        ..
    } = app
    {
        ctx.postrender(layers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{LINEBATCH_OVERLAY, LINEBATCH_WORLD};
    use lumen_graphics::DeviceCapabilities;

    #[test]
    #[allow(deprecated)]
    fn test_legacy_entry_points_share_one_notice() {
        let (device, _backend) = GraphicsDevice::dummy(DeviceCapabilities::default());
        let mut app = Application::new(device, LayerComposition::default());

        app.render_line_legacy(Vec3::ZERO, Vec3::X, Color::WHITE, None, LINEBATCH_WORLD);
        assert!(LEGACY_LINE_BATCH.has_fired());
        app.render_lines_legacy(
            &[Vec3::ZERO, Vec3::Y],
            LineColors::Flat(Color::RED),
            LINEBATCH_OVERLAY,
        );
        // Already logged by the first call; nothing left to warn about
        assert!(!LEGACY_LINE_BATCH.warn());

        let ctx = app.immediate().unwrap();
        assert_eq!(ctx.line_batches().len(), 1);
        assert_eq!(ctx.batch(LayerId::IMMEDIATE).unwrap().lines_used(), 2);
    }
}
