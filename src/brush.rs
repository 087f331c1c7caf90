use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub const MIN_BRUSH_SIZE: u8 = 1;
pub const MAX_BRUSH_SIZE: u8 = 50;

/// Footprint shape of the brush and eraser tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrushShape {
    Circle,
    Square,
}

/// Immutable brush configuration.
///
/// The editor snapshots the descriptor at stroke start; changing the brush
/// mid-stroke does not retroactively affect pixels already committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrushDescriptor {
    size: u8,
    shape: BrushShape,
    pixel_perfect: bool,
}

impl Default for BrushDescriptor {
    fn default() -> Self {
        Self {
            size: 1,
            shape: BrushShape::Circle,
            pixel_perfect: false,
        }
    }
}

impl BrushDescriptor {
    /// Validates the size range (1–50). Rejection is atomic; callers keep
    /// their previous descriptor on error.
    pub fn new(size: u8, shape: BrushShape, pixel_perfect: bool) -> Result<Self, EngineError> {
        if !(MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE).contains(&size) {
            return Err(EngineError::InvalidBrushParameter(format!(
                "size {size} outside {MIN_BRUSH_SIZE}..={MAX_BRUSH_SIZE}"
            )));
        }
        Ok(Self {
            size,
            shape,
            pixel_perfect,
        })
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn shape(&self) -> BrushShape {
        self.shape
    }

    /// Pixel-perfect path cleanup only ever applies at size 1.
    pub fn pixel_perfect(&self) -> bool {
        self.pixel_perfect && self.size == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_range_is_enforced() {
        assert!(BrushDescriptor::new(0, BrushShape::Circle, false).is_err());
        assert!(BrushDescriptor::new(51, BrushShape::Square, false).is_err());
        assert!(BrushDescriptor::new(1, BrushShape::Circle, true).is_ok());
        assert!(BrushDescriptor::new(50, BrushShape::Square, false).is_ok());
    }

    #[test]
    fn pixel_perfect_only_bites_at_size_one() {
        let small = BrushDescriptor::new(1, BrushShape::Circle, true).unwrap();
        let big = BrushDescriptor::new(3, BrushShape::Circle, true).unwrap();
        assert!(small.pixel_perfect());
        assert!(!big.pixel_perfect());
    }
}
