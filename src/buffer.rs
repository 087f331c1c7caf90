use crate::color::{BlendMode, Rgba};
use crate::error::EngineError;
use crate::geometry::{DirtyRect, PixelPoint};

/// A dense RGBA raster with bounds-checked access and alpha-aware blending.
///
/// Width and height are fixed at creation; the buffer is replaced wholesale
/// on undo/redo restore rather than resized. Every successful write is folded
/// into an internal dirty rectangle that the controller drains with
/// [`PixelBuffer::take_dirty`] to drive incremental redraw.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    dirty: Option<DirtyRect>,
}

/// Equality is over the raster contents only; the pending dirty rectangle is
/// bookkeeping, not image state.
impl PartialEq for PixelBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.pixels == other.pixels
    }
}

impl Eq for PixelBuffer {}

// Widened before multiplying so large canvases cannot wrap in u32.
fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

impl PixelBuffer {
    /// Create a fully transparent buffer. Zero-sized canvases are rejected.
    pub fn new(width: u32, height: u32) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        Ok(Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; pixel_count(width, height)],
            dirty: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Result<usize, EngineError> {
        if self.contains(x, y) {
            Ok((y as u32 * self.width + x as u32) as usize)
        } else {
            Err(EngineError::OutOfBounds { x, y })
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Result<Rgba, EngineError> {
        Ok(self.pixels[self.index(x, y)?])
    }

    /// Overwrite all four channels of one pixel.
    pub fn set(&mut self, x: i32, y: i32, color: Rgba) -> Result<(), EngineError> {
        let idx = self.index(x, y)?;
        self.pixels[idx] = color;
        self.mark_dirty(PixelPoint::new(x, y));
        Ok(())
    }

    /// Composite `color` onto the existing pixel. Returns whether the stored
    /// value actually changed.
    pub fn blend(&mut self, x: i32, y: i32, color: Rgba, mode: BlendMode) -> Result<bool, EngineError> {
        let idx = self.index(x, y)?;
        let before = self.pixels[idx];
        let after = before.blend(color, mode);
        if after == before {
            return Ok(false);
        }
        self.pixels[idx] = after;
        self.mark_dirty(PixelPoint::new(x, y));
        Ok(true)
    }

    /// Refill the whole canvas transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(Rgba::TRANSPARENT);
        self.dirty = Some(DirtyRect {
            min_x: 0,
            min_y: 0,
            max_x: self.width as i32 - 1,
            max_y: self.height as i32 - 1,
        });
    }

    /// Read-only row-major view of the raster, for rendering.
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    fn mark_dirty(&mut self, p: PixelPoint) {
        self.dirty = Some(match self.dirty {
            Some(rect) => rect.union(&DirtyRect::from_point(p)),
            None => DirtyRect::from_point(p),
        });
    }

    /// Drain the accumulated dirty rectangle, if any write happened since the
    /// last drain.
    pub fn take_dirty(&mut self) -> Option<DirtyRect> {
        self.dirty.take()
    }
}
