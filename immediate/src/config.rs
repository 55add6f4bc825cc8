use lumen_graphics::scene::LayerId;

/// Lines a batch can hold before its first reallocation.
pub const DEFAULT_LINE_CAPACITY: usize = 128;

/// Configuration of the immediate draw layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImmediateConfig {
    /// Lines allocated by a new batch. Must be non-zero; doubles on demand.
    pub initial_line_capacity: usize,
    /// Layer used when draw options do not name one.
    pub default_layer: LayerId,
}

impl Default for ImmediateConfig {
    fn default() -> Self {
        Self {
            initial_line_capacity: DEFAULT_LINE_CAPACITY,
            default_layer: LayerId::IMMEDIATE,
        }
    }
}

impl ImmediateConfig {
    pub fn with_initial_line_capacity(mut self, lines: usize) -> Self {
        self.initial_line_capacity = lines;
        self
    }

    pub fn with_default_layer(mut self, layer: LayerId) -> Self {
        self.default_layer = layer;
        self
    }
}
