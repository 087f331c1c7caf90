//! Tool operations: the closed set of editing behaviors selected by the
//! controller. Each variant has one evaluation path, matched exhaustively, so
//! adding a tool is a compile-checked change rather than a dynamic dispatch
//! site.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::color::{BlendMode, Rgba};
use crate::geometry::PixelPoint;
use crate::symmetry::SymmetrySet;

mod fill;
pub use fill::flood_fill;

/// The active editing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Brush,
    Eraser,
    Bucket,
    Eyedropper,
}

impl ToolKind {
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Brush => "brush",
            ToolKind::Eraser => "eraser",
            ToolKind::Bucket => "bucket",
            ToolKind::Eyedropper => "eyedropper",
        }
    }

    /// Whether pointer-move events continue the operation (stroke tools) or
    /// the whole operation happens at pointer-down.
    pub fn is_stroke_tool(&self) -> bool {
        matches!(self, ToolKind::Brush | ToolKind::Eraser)
    }
}

/// Blend a rasterized pixel set into the buffer, expanding each pixel through
/// the symmetry set first. Out-of-bounds mirrored pixels are silently dropped.
///
/// `written` carries the per-stroke set of already-touched pixels so one
/// stroke blends each pixel at most once across all its pointer events; this
/// is what keeps translucent paint from compounding and partial-strength
/// erases from multiply-subtracting at segment joints.
///
/// Returns whether any stored pixel value changed.
pub fn blend_mirrored(
    buffer: &mut PixelBuffer,
    symmetry: &SymmetrySet,
    pixels: &[PixelPoint],
    color: Rgba,
    mode: BlendMode,
    written: &mut HashSet<PixelPoint>,
) -> bool {
    let mut changed = false;
    for &p in pixels {
        for m in symmetry.mirror(p) {
            if !buffer.contains(m.x, m.y) || !written.insert(m) {
                continue;
            }
            // Bounds were checked above, so the blend cannot fail.
            if let Ok(wrote) = buffer.blend(m.x, m.y, color, mode) {
                changed |= wrote;
            }
        }
    }
    changed
}
