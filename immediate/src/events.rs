use std::collections::HashMap;

use crate::app::Application;

/// Points in the frame where handlers run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameEvent {
    /// After frame construction, before the renderer consumes the layers.
    PreRender,
    /// After the renderer has consumed the layers.
    PostRender,
}

/// A frame event handler.
pub type FrameHandler = fn(&mut Application);

/// Handlers subscribed to frame events, run in subscription order.
#[derive(Debug, Default, Clone)]
pub struct FrameEvents {
    handlers: HashMap<FrameEvent, Vec<FrameHandler>>,
}

impl FrameEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `handler` to `event`.
    pub fn on(&mut self, event: FrameEvent, handler: FrameHandler) {
        self.handlers.entry(event).or_default().push(handler);
    }

    /// Unsubscribe every registration of `handler` from `event`.
    pub fn off(&mut self, event: FrameEvent, handler: FrameHandler) {
        if let Some(handlers) = self.handlers.get_mut(&event) {
            handlers.retain(|h| !std::ptr::fn_addr_eq(*h, handler));
        }
    }

    /// Handlers subscribed to `event`.
    pub fn handlers(&self, event: FrameEvent) -> &[FrameHandler] {
        self.handlers.get(&event).map_or(&[], Vec::as_slice)
    }

    pub fn has_handlers(&self, event: FrameEvent) -> bool {
        !self.handlers(event).is_empty()
    }
}
