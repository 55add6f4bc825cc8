use std::sync::atomic::{AtomicBool, Ordering};

use lumen_graphics::scene::LayerId;

/// Legacy batch id: depth-tested world lines.
pub const LINEBATCH_WORLD: u32 = 0;
/// Legacy batch id: lines drawn on top, without depth test.
pub const LINEBATCH_OVERLAY: u32 = 1;
/// Legacy batch id: gizmo lines, depth-tested.
pub const LINEBATCH_GIZMO: u32 = 2;

/// Per-call rendering options for immediate draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImmediateOptions {
    /// Target layer; the configured default layer when `None`.
    pub layer: Option<LayerId>,
    /// Depth test for line batches.
    pub depth_test: bool,
    /// Camera visibility mask; left unchanged when `None` or zero.
    pub mask: Option<u32>,
}

impl Default for ImmediateOptions {
    fn default() -> Self {
        Self {
            layer: None,
            depth_test: true,
            mask: None,
        }
    }
}

impl ImmediateOptions {
    pub fn on_layer(mut self, layer: LayerId) -> Self {
        self.layer = Some(layer);
        self
    }

    pub fn with_depth_test(mut self, depth_test: bool) -> Self {
        self.depth_test = depth_test;
        self
    }

    pub fn with_mask(mut self, mask: u32) -> Self {
        self.mask = Some(mask);
        self
    }

    /// The mask to apply, if any. A zero mask counts as unset.
    pub fn visibility_mask(&self) -> Option<u32> {
        self.mask.filter(|&mask| mask != 0)
    }

    /// Options equivalent to a legacy numeric line batch.
    ///
    /// Every legacy batch draws into the immediate layer; only
    /// [`LINEBATCH_OVERLAY`] turns the depth test off.
    pub fn from_legacy_batch(batch: u32) -> Self {
        Self {
            layer: Some(LayerId::IMMEDIATE),
            depth_test: batch != LINEBATCH_OVERLAY,
            mask: None,
        }
    }
}

/// A warning logged at most once.
#[derive(Debug)]
pub struct DeprecationNotice {
    message: &'static str,
    fired: AtomicBool,
}

impl DeprecationNotice {
    pub const fn new(message: &'static str) -> Self {
        Self {
            message,
            fired: AtomicBool::new(false),
        }
    }

    /// Log the notice if it has not been logged yet. Returns `true` when it was.
    pub fn warn(&self) -> bool {
        if self.fired.swap(true, Ordering::Relaxed) {
            return false;
        }
        log::warn!("{}", self.message);
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Relaxed)
    }
}

/// Shared by every legacy line entry point.
pub(crate) static LEGACY_LINE_BATCH: DeprecationNotice = DeprecationNotice::new(
    "lineBatch argument is deprecated for render_line / render_lines; use ImmediateOptions::layer instead",
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::world(LINEBATCH_WORLD, true)]
    #[case::overlay(LINEBATCH_OVERLAY, false)]
    #[case::gizmo(LINEBATCH_GIZMO, true)]
    #[case::unknown(7, true)]
    fn test_from_legacy_batch(#[case] batch: u32, #[case] depth_test: bool) {
        let options = ImmediateOptions::from_legacy_batch(batch);
        assert_eq!(options.layer, Some(LayerId::IMMEDIATE));
        assert_eq!(options.depth_test, depth_test);
        assert_eq!(options.mask, None);
    }

    #[test]
    fn test_defaults() {
        let options = ImmediateOptions::default();
        assert_eq!(options.layer, None);
        assert!(options.depth_test);
        let options = options.on_layer(LayerId::WORLD).with_mask(2).with_depth_test(false);
        assert_eq!(options.layer, Some(LayerId::WORLD));
        assert_eq!(options.mask, Some(2));
        assert!(!options.depth_test);
    }

    #[rstest]
    #[case::unset(None, None)]
    #[case::zero(Some(0), None)]
    #[case::set(Some(0b101), Some(0b101))]
    fn test_visibility_mask(#[case] mask: Option<u32>, #[case] expected: Option<u32>) {
        let options = ImmediateOptions {
            mask,
            ..ImmediateOptions::default()
        };
        assert_eq!(options.visibility_mask(), expected);
    }

    #[test]
    fn test_notice_fires_once() {
        let notice = DeprecationNotice::new("old api");
        assert!(!notice.has_fired());
        assert!(notice.warn());
        assert!(!notice.warn());
        assert!(notice.has_fired());
    }
}
