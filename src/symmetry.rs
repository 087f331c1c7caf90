//! Mirroring of edited points across a stack of rotatable reflection lines.
//!
//! A reflection line is defined by a draggable center and an angle; the set
//! holds up to [`LINE_LIMIT`] lines in insertion order. Expansion applies each
//! enabled line to the whole accumulated point set, which is what reaches all
//! quadrants when lines are stacked (a cross needs the doubly-reflected point,
//! which only appears by re-reflecting an already-reflected one).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::geometry::PixelPoint;

/// Maximum number of reflection lines in one set.
pub const LINE_LIMIT: usize = 8;

/// Pick-up distance around a line's center handle, in canvas units.
pub const CENTER_HIT_RADIUS: f32 = 6.0;

/// Stable identity for a reflection line across reorders and removals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineId(Uuid);

impl LineId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// A single mirror line: a center point (unconstrained, may sit outside the
/// canvas) and a direction angle in degrees, normalized to [0, 360).
///
/// Angle is measured from the +x axis, so 0° is a horizontal line and 90° a
/// vertical one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReflectionLine {
    id: LineId,
    cx: f32,
    cy: f32,
    angle_deg: f32,
    enabled: bool,
}

impl ReflectionLine {
    fn new(cx: f32, cy: f32, angle_deg: f32) -> Self {
        Self {
            id: LineId::generate(),
            cx,
            cy,
            angle_deg: normalize_angle(angle_deg),
            enabled: true,
        }
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn center(&self) -> (f32, f32) {
        (self.cx, self.cy)
    }

    pub fn angle_deg(&self) -> f32 {
        self.angle_deg
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Reflect `p` across this line: translate to the center, apply the 2x2
    /// reflection matrix for the line direction, translate back, round to the
    /// nearest pixel.
    pub fn reflect(&self, p: PixelPoint) -> PixelPoint {
        let two_theta = 2.0 * (self.angle_deg as f64).to_radians();
        let (sin2, cos2) = two_theta.sin_cos();
        let dx = p.x as f64 - self.cx as f64;
        let dy = p.y as f64 - self.cy as f64;
        let rx = cos2 * dx + sin2 * dy;
        let ry = sin2 * dx - cos2 * dy;
        PixelPoint::new(
            (self.cx as f64 + rx).round() as i32,
            (self.cy as f64 + ry).round() as i32,
        )
    }

    /// Endpoints of the line extended past the canvas on both sides, for the
    /// UI layer to draw the guide.
    pub fn span(&self, canvas_width: u32, canvas_height: u32) -> ((f32, f32), (f32, f32)) {
        let theta = (self.angle_deg as f64).to_radians();
        let (dy, dx) = theta.sin_cos();
        let reach = ((canvas_width as f64).powi(2) + (canvas_height as f64).powi(2)).sqrt();
        let (sx, sy) = (self.cx as f64 - dx * reach, self.cy as f64 - dy * reach);
        let (ex, ey) = (self.cx as f64 + dx * reach, self.cy as f64 + dy * reach);
        ((sx as f32, sy as f32), (ex as f32, ey as f32))
    }
}

fn normalize_angle(deg: f32) -> f32 {
    deg.rem_euclid(360.0)
}

/// Fixed line arrangements, all centered on the canvas center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymmetryPreset {
    Vertical,
    Horizontal,
    Cross,
    DiagonalX,
    Star8,
}

impl SymmetryPreset {
    fn angles(&self) -> &'static [f32] {
        match self {
            SymmetryPreset::Vertical => &[90.0],
            SymmetryPreset::Horizontal => &[0.0],
            SymmetryPreset::Cross => &[0.0, 90.0],
            SymmetryPreset::DiagonalX => &[45.0, 135.0],
            SymmetryPreset::Star8 => &[0.0, 45.0, 90.0, 135.0],
        }
    }
}

/// Pointer interaction state for the line center handles.
///
/// Explicit machine instead of hover/drag booleans so every transition is
/// checkable: Idle → HoverCenter on approach, HoverCenter → Dragging on
/// press, Dragging → Idle on release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    HoverCenter(LineId),
    Dragging(LineId),
}

/// Ordered collection of reflection lines plus the global on/off flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymmetrySet {
    lines: Vec<ReflectionLine>,
    enabled: bool,
    #[serde(skip)]
    drag: DragState,
}

impl Default for SymmetrySet {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            enabled: false,
            drag: DragState::Idle,
        }
    }
}

impl SymmetrySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[ReflectionLine] {
        &self.lines
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Add a line. Fails without mutating anything once the set is full.
    pub fn add_line(&mut self, center: (f32, f32), angle_deg: f32) -> Result<LineId, EngineError> {
        if self.lines.len() >= LINE_LIMIT {
            return Err(EngineError::SymmetryLineLimitExceeded);
        }
        let line = ReflectionLine::new(center.0, center.1, angle_deg);
        let id = line.id();
        self.lines.push(line);
        Ok(id)
    }

    pub fn remove_line(&mut self, id: LineId) {
        self.lines.retain(|l| l.id() != id);
        match self.drag {
            DragState::HoverCenter(d) | DragState::Dragging(d) if d == id => {
                self.drag = DragState::Idle;
            }
            _ => {}
        }
    }

    pub fn clear_lines(&mut self) {
        self.lines.clear();
        self.drag = DragState::Idle;
    }

    fn line_mut(&mut self, id: LineId) -> Option<&mut ReflectionLine> {
        self.lines.iter_mut().find(|l| l.id() == id)
    }

    /// Move a line's center. The drag is unconstrained; centers may leave the
    /// canvas.
    pub fn move_line(&mut self, id: LineId, center: (f32, f32)) {
        if let Some(line) = self.line_mut(id) {
            line.cx = center.0;
            line.cy = center.1;
        }
    }

    pub fn set_line_angle(&mut self, id: LineId, angle_deg: f32) {
        if let Some(line) = self.line_mut(id) {
            line.angle_deg = normalize_angle(angle_deg);
        }
    }

    pub fn toggle_line(&mut self, id: LineId) {
        if let Some(line) = self.line_mut(id) {
            line.enabled = !line.enabled;
        }
    }

    /// Replace all lines with a preset arrangement centered on the canvas.
    pub fn apply_preset(&mut self, preset: SymmetryPreset, canvas_width: u32, canvas_height: u32) {
        self.clear_lines();
        let cx = (canvas_width as f32 - 1.0) / 2.0;
        let cy = (canvas_height as f32 - 1.0) / 2.0;
        for &angle in preset.angles() {
            // Cannot overflow: no preset carries more than LINE_LIMIT angles.
            let _ = self.add_line((cx, cy), angle);
        }
        self.enabled = true;
        log::debug!("applied symmetry preset {preset:?} ({} lines)", self.lines.len());
    }

    /// Expand one edited point into its mirrored set.
    ///
    /// Single left-to-right pass: each enabled line reflects every point
    /// accumulated so far and the results are unioned. This is the intended
    /// final semantics; it covers all documented presets but does not chase
    /// the full group closure for arbitrary angle stacks. Output order is
    /// stable (original point first), duplicates collapse.
    pub fn mirror(&self, p: PixelPoint) -> Vec<PixelPoint> {
        if !self.enabled || self.lines.is_empty() {
            return vec![p];
        }
        let mut points = vec![p];
        let mut seen: HashSet<PixelPoint> = points.iter().copied().collect();
        for line in self.lines.iter().filter(|l| l.is_enabled()) {
            let mut reflected = Vec::new();
            for &q in &points {
                let m = line.reflect(q);
                if seen.insert(m) {
                    reflected.push(m);
                }
            }
            points.extend(reflected);
        }
        points
    }

    fn center_at(&self, pos: (f32, f32)) -> Option<LineId> {
        self.lines
            .iter()
            .find(|l| {
                let (cx, cy) = l.center();
                let (dx, dy) = (pos.0 - cx, pos.1 - cy);
                dx * dx + dy * dy <= CENTER_HIT_RADIUS * CENTER_HIT_RADIUS
            })
            .map(|l| l.id())
    }

    /// Pointer moved without a button held: update hover highlight.
    pub fn hover(&mut self, pos: (f32, f32)) {
        if let DragState::Dragging(_) = self.drag {
            return;
        }
        self.drag = match self.center_at(pos) {
            Some(id) => DragState::HoverCenter(id),
            None => DragState::Idle,
        };
    }

    /// Pointer pressed. Starts a center drag when over a handle; returns
    /// whether the press was captured (so the editor does not also paint).
    pub fn press(&mut self, pos: (f32, f32)) -> bool {
        match self.center_at(pos) {
            Some(id) => {
                self.drag = DragState::Dragging(id);
                true
            }
            None => {
                self.drag = DragState::Idle;
                false
            }
        }
    }

    /// Pointer moved with the button held during a center drag.
    pub fn drag_to(&mut self, pos: (f32, f32)) {
        if let DragState::Dragging(id) = self.drag {
            self.move_line(id, pos);
        }
    }

    /// Pointer released: a drag ends, hover state is re-derived on the next
    /// move.
    pub fn release(&mut self) {
        if let DragState::Dragging(_) = self.drag {
            self.drag = DragState::Idle;
        }
    }
}
