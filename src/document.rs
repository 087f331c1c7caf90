use crate::buffer::PixelBuffer;
use crate::error::EngineError;
use crate::symmetry::SymmetrySet;

/// One open drawing: the pixel grid plus its symmetry configuration.
///
/// The document is the exclusive owner of both; there are no shared globals,
/// so several documents can coexist in one process. The buffer is swapped
/// wholesale on undo/redo restore.
pub struct Document {
    buffer: PixelBuffer,
    symmetry: SymmetrySet,
}

impl Document {
    pub fn new(width: u32, height: u32) -> Result<Self, EngineError> {
        Ok(Self {
            buffer: PixelBuffer::new(width, height)?,
            symmetry: SymmetrySet::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    pub fn symmetry(&self) -> &SymmetrySet {
        &self.symmetry
    }

    pub fn symmetry_mut(&mut self) -> &mut SymmetrySet {
        &mut self.symmetry
    }

    /// Split borrow for the tool pipeline: mutate the raster while reading
    /// the symmetry configuration.
    pub fn buffer_and_symmetry(&mut self) -> (&mut PixelBuffer, &SymmetrySet) {
        (&mut self.buffer, &self.symmetry)
    }

    /// Replace the raster with a restored snapshot (undo/redo).
    pub fn replace_buffer(&mut self, buffer: PixelBuffer) {
        debug_assert_eq!(buffer.width(), self.buffer.width());
        debug_assert_eq!(buffer.height(), self.buffer.height());
        self.buffer = buffer;
    }
}
