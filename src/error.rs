use thiserror::Error;

/// Errors surfaced by the drawing engine.
///
/// Only configuration-time calls (brush parameters, adding symmetry lines,
/// document creation) reject outright, and rejection leaves all state
/// unchanged. Per-pixel bounds problems inside the tool pipeline are clipped
/// locally and never propagate; undo/redo on an empty history is a benign
/// no-op rather than an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Coordinate outside the canvas grid.
    #[error("coordinate ({x}, {y}) is outside the canvas")]
    OutOfBounds { x: i32, y: i32 },

    /// Zero-sized canvas requested.
    #[error("canvas dimensions must be non-zero")]
    InvalidDimensions,

    /// Brush size or shape rejected at configuration time.
    #[error("invalid brush parameter: {0}")]
    InvalidBrushParameter(String),

    /// The symmetry set already holds the maximum number of lines.
    #[error("symmetry set is full")]
    SymmetryLineLimitExceeded,
}
