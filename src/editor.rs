//! The canvas controller: routes pointer events into tool operations, owns
//! the active document and its history, and broadcasts change notifications.
//! This is the only module that knows about every other component.

use std::collections::HashSet;

use crate::brush::{BrushDescriptor, BrushShape};
use crate::buffer::PixelBuffer;
use crate::color::{BlendMode, Rgba};
use crate::document::Document;
use crate::error::EngineError;
use crate::event::{EngineEvent, EventBus};
use crate::geometry::{DirtyRect, PixelPoint};
use crate::history::HistoryManager;
use crate::raster::{self, PixelPerfectPath};
use crate::symmetry::{LineId, SymmetryPreset};
use crate::tools::{self, ToolKind};

/// In-flight state of one brush or eraser stroke.
///
/// The brush descriptor and blend mode are snapshotted at pointer-down, so
/// configuration changes mid-stroke do not retroactively affect committed
/// pixels. `written` records every pixel the stroke has already blended; one
/// stroke touches each pixel at most once. Pixel-perfect strokes route the
/// traced path through a [`PixelPerfectPath`] filter that spans pointer
/// events, since a staircase elbow and the pixel that condemns it can arrive
/// in different events.
struct StrokeInProgress {
    brush: BrushDescriptor,
    color: Rgba,
    mode: BlendMode,
    last_point: PixelPoint,
    written: HashSet<PixelPoint>,
    changed: bool,
    perfect: Option<PixelPerfectPath>,
}

/// What the held pointer button is currently doing.
enum PointerOp {
    Stroke(StrokeInProgress),
    /// Bucket already ran at pointer-down; remembers whether it changed
    /// anything so pointer-up can commit or discard the transaction.
    Fill { changed: bool },
    /// The press landed on a symmetry center handle and is dragging it.
    DragCenter,
}

/// A drawing session over one document (spec'd as `DocumentHandle`).
pub struct Editor {
    document: Document,
    history: HistoryManager,
    bus: EventBus,
    tool: ToolKind,
    brush: BrushDescriptor,
    foreground: Rgba,
    fill_tolerance: u8,
    active: Option<PointerOp>,
}

impl Editor {
    /// Open a new document of the given size.
    pub fn new(width: u32, height: u32) -> Result<Self, EngineError> {
        let document = Document::new(width, height)?;
        log::info!("new document: {width}x{height}");
        Ok(Self {
            document,
            history: HistoryManager::new(),
            bus: EventBus::new(),
            tool: ToolKind::default(),
            brush: BrushDescriptor::default(),
            foreground: Rgba::BLACK,
            fill_tolerance: 0,
            active: None,
        })
    }

    /// Cap the history depth (snapshot memory is `w * h * 4` bytes each).
    pub fn with_history_depth(width: u32, height: u32, depth: usize) -> Result<Self, EngineError> {
        let mut editor = Self::new(width, height)?;
        editor.history = HistoryManager::with_depth(depth);
        Ok(editor)
    }

    // --- configuration -----------------------------------------------------

    pub fn set_tool(&mut self, tool: ToolKind) {
        if tool == self.tool {
            return;
        }
        log::info!("tool selected: {}", tool.name());
        self.tool = tool;
        self.bus.emit(EngineEvent::ToolChanged(tool));
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Atomic: on rejection the previous brush configuration is retained.
    pub fn set_brush(
        &mut self,
        size: u8,
        shape: BrushShape,
        pixel_perfect: bool,
    ) -> Result<(), EngineError> {
        match BrushDescriptor::new(size, shape, pixel_perfect) {
            Ok(brush) => {
                self.brush = brush;
                Ok(())
            }
            Err(err) => {
                log::warn!("brush config rejected: {err}");
                Err(err)
            }
        }
    }

    pub fn brush(&self) -> BrushDescriptor {
        self.brush
    }

    pub fn set_foreground_color(&mut self, color: Rgba) {
        self.foreground = color;
        self.bus.emit(EngineEvent::ForegroundChanged(color));
    }

    pub fn foreground_color(&self) -> Rgba {
        self.foreground
    }

    pub fn set_fill_tolerance(&mut self, tolerance: u8) {
        self.fill_tolerance = tolerance;
    }

    // --- symmetry ----------------------------------------------------------

    pub fn add_symmetry_line(
        &mut self,
        center: (f32, f32),
        angle_deg: f32,
    ) -> Result<LineId, EngineError> {
        self.document.symmetry_mut().add_line(center, angle_deg)
    }

    pub fn move_symmetry_line(&mut self, id: LineId, center: (f32, f32)) {
        self.document.symmetry_mut().move_line(id, center);
    }

    pub fn remove_symmetry_line(&mut self, id: LineId) {
        self.document.symmetry_mut().remove_line(id);
    }

    pub fn set_symmetry_line_angle(&mut self, id: LineId, angle_deg: f32) {
        self.document.symmetry_mut().set_line_angle(id, angle_deg);
    }

    pub fn toggle_symmetry_line(&mut self, id: LineId) {
        self.document.symmetry_mut().toggle_line(id);
    }

    pub fn clear_symmetry_lines(&mut self) {
        self.document.symmetry_mut().clear_lines();
    }

    pub fn set_symmetry_enabled(&mut self, enabled: bool) {
        self.document.symmetry_mut().set_enabled(enabled);
    }

    pub fn apply_preset(&mut self, preset: SymmetryPreset) {
        let (w, h) = (self.document.width(), self.document.height());
        self.document.symmetry_mut().apply_preset(preset, w, h);
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Subscription point for change notifications.
    pub fn events(&self) -> &EventBus {
        &self.bus
    }

    // --- pointer pipeline --------------------------------------------------

    /// Pointer button pressed at canvas coordinates.
    pub fn pointer_down(&mut self, x: i32, y: i32) {
        if self.active.is_some() {
            return; // stray second press mid-gesture
        }
        let p = PixelPoint::new(x, y);

        // Symmetry center handles capture the press before any tool runs.
        if self.document.symmetry().is_enabled()
            && self.document.symmetry_mut().press((x as f32, y as f32))
        {
            self.active = Some(PointerOp::DragCenter);
            return;
        }

        match self.tool {
            ToolKind::Brush => self.begin_stroke(p, BlendMode::Paint, self.foreground),
            ToolKind::Eraser => {
                self.begin_stroke(p, BlendMode::Erase { strength: 255 }, Rgba::TRANSPARENT)
            }
            ToolKind::Bucket => {
                self.history.begin_transaction(self.document.buffer());
                let (buffer, symmetry) = self.document.buffer_and_symmetry();
                let changed = tools::flood_fill(buffer, symmetry, p, self.foreground, self.fill_tolerance);
                self.active = Some(PointerOp::Fill { changed });
                self.flush_dirty();
            }
            ToolKind::Eyedropper => {
                if let Ok(color) = self.document.buffer().get(x, y) {
                    self.foreground = color;
                    self.bus.emit(EngineEvent::ColorPicked(color));
                    self.bus.emit(EngineEvent::ForegroundChanged(color));
                }
            }
        }
    }

    /// Pointer moved. Continues a stroke or a center drag when the button is
    /// held; otherwise updates the symmetry hover state.
    pub fn pointer_move(&mut self, x: i32, y: i32) {
        let mut touched_canvas = false;
        match &mut self.active {
            Some(PointerOp::DragCenter) => {
                self.document.symmetry_mut().drag_to((x as f32, y as f32));
            }
            Some(PointerOp::Stroke(stroke)) => {
                let p = PixelPoint::new(x, y);
                let pixels = match &mut stroke.perfect {
                    Some(filter) => {
                        let mut ready = Vec::new();
                        for q in raster::bresenham(stroke.last_point, p).into_iter().skip(1) {
                            ready.extend(filter.push(q));
                        }
                        ready
                    }
                    None => raster::rasterize(&stroke.brush, &[stroke.last_point, p]),
                };
                stroke.last_point = p;
                let (buffer, symmetry) = self.document.buffer_and_symmetry();
                let changed = tools::blend_mirrored(
                    buffer,
                    symmetry,
                    &pixels,
                    stroke.color,
                    stroke.mode,
                    &mut stroke.written,
                );
                stroke.changed |= changed;
                touched_canvas = true;
            }
            Some(PointerOp::Fill { .. }) => {} // bucket acts only on press
            None => {
                if self.document.symmetry().is_enabled() {
                    self.document.symmetry_mut().hover((x as f32, y as f32));
                }
            }
        }
        if touched_canvas {
            self.flush_dirty();
        }
    }

    /// Pointer button released: finalizes the current gesture. Always returns
    /// the history machine to idle.
    pub fn pointer_up(&mut self, _x: i32, _y: i32) {
        match self.active.take() {
            Some(PointerOp::Stroke(mut stroke)) => {
                // A pixel-perfect stroke still holds its trailing pixel.
                if let Some(tail) = stroke.perfect.as_mut().and_then(PixelPerfectPath::finish) {
                    let (buffer, symmetry) = self.document.buffer_and_symmetry();
                    stroke.changed |= tools::blend_mirrored(
                        buffer,
                        symmetry,
                        &[tail],
                        stroke.color,
                        stroke.mode,
                        &mut stroke.written,
                    );
                    self.flush_dirty();
                }
                self.history.commit_transaction(stroke.changed);
                if stroke.changed {
                    self.bus.emit(EngineEvent::StrokeCompleted);
                    self.bus.emit(EngineEvent::HistoryChanged);
                }
            }
            Some(PointerOp::Fill { changed }) => {
                self.history.commit_transaction(changed);
                if changed {
                    self.bus.emit(EngineEvent::HistoryChanged);
                }
            }
            Some(PointerOp::DragCenter) => {
                self.document.symmetry_mut().release();
            }
            None => {}
        }
    }

    fn begin_stroke(&mut self, p: PixelPoint, mode: BlendMode, color: Rgba) {
        self.history.begin_transaction(self.document.buffer());
        let mut stroke = StrokeInProgress {
            brush: self.brush,
            color,
            mode,
            last_point: p,
            written: HashSet::new(),
            changed: false,
            perfect: self.brush.pixel_perfect().then(PixelPerfectPath::new),
        };
        if let Some(filter) = &mut stroke.perfect {
            // The first pixel stays held; it lands with its successor or at
            // pointer-up.
            filter.push(p);
        } else {
            let pixels = raster::rasterize(&stroke.brush, &[p]);
            let (buffer, symmetry) = self.document.buffer_and_symmetry();
            stroke.changed = tools::blend_mirrored(
                buffer,
                symmetry,
                &pixels,
                stroke.color,
                stroke.mode,
                &mut stroke.written,
            );
        }
        self.active = Some(PointerOp::Stroke(stroke));
        self.flush_dirty();
    }

    // --- history -----------------------------------------------------------

    /// Undo the last committed stroke. Returns false when there is nothing to
    /// undo (benign) or a gesture is still in flight.
    pub fn undo(&mut self) -> bool {
        if self.active.is_some() {
            log::warn!("undo ignored mid-gesture");
            return false;
        }
        let Some(snapshot) = self.history.undo(self.document.buffer()) else {
            return false;
        };
        self.restore((*snapshot).clone());
        true
    }

    /// Mirror of [`Editor::undo`].
    pub fn redo(&mut self) -> bool {
        if self.active.is_some() {
            log::warn!("redo ignored mid-gesture");
            return false;
        }
        let Some(snapshot) = self.history.redo(self.document.buffer()) else {
            return false;
        };
        self.restore((*snapshot).clone());
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn restore(&mut self, buffer: PixelBuffer) {
        self.document.replace_buffer(buffer);
        self.bus.emit(EngineEvent::HistoryChanged);
        self.bus.emit(EngineEvent::DirtyRegion(self.full_rect()));
    }

    /// Wipe the canvas transparent as one undoable transaction. Clearing an
    /// already blank canvas consumes no undo slot.
    pub fn clear_canvas(&mut self) {
        let blank = self
            .document
            .buffer()
            .pixels()
            .iter()
            .all(|p| p.is_transparent());
        self.history.begin_transaction(self.document.buffer());
        self.document.buffer_mut().clear();
        self.history.commit_transaction(!blank);
        self.flush_dirty();
        if !blank {
            self.bus.emit(EngineEvent::HistoryChanged);
        }
    }

    // --- rendering ---------------------------------------------------------

    /// Read-only view of the raster for the UI layer to render.
    pub fn snapshot(&self) -> &PixelBuffer {
        self.document.buffer()
    }

    /// Hollow cursor footprint for the eraser preview at `center`.
    pub fn eraser_outline(&self, center: PixelPoint) -> Vec<PixelPoint> {
        raster::footprint_outline(&self.brush, center)
    }

    fn full_rect(&self) -> DirtyRect {
        DirtyRect {
            min_x: 0,
            min_y: 0,
            max_x: self.document.width() as i32 - 1,
            max_y: self.document.height() as i32 - 1,
        }
    }

    fn flush_dirty(&mut self) {
        if let Some(rect) = self.document.buffer_mut().take_dirty() {
            self.bus.emit(EngineEvent::DirtyRegion(rect));
        }
    }
}
