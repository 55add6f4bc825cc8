use thiserror::Error;

/// Reasons a line draw call is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    /// Lines need an even number of positions.
    #[error("array length is not divisible by 2 (got {0} positions)")]
    OddPositionCount(usize),
    /// Per-vertex colors must pair up with positions.
    #[error("position/color arrays have different lengths ({positions} positions, {colors} colors)")]
    ColorCountMismatch { positions: usize, colors: usize },
    /// The batch was not sized for the lines being added.
    #[error("batch holds {allocated} lines, {needed} needed")]
    CapacityExceeded { needed: usize, allocated: usize },
}
