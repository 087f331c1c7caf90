//! Stroke rasterization: turns a sparse stream of pointer positions plus a
//! brush descriptor into the exact, gap-free set of pixels the stroke covers.
//!
//! Pointer-move events arrive rate-limited, so consecutive samples can be many
//! pixels apart; every consecutive pair is bridged with a Bresenham trace and
//! the brush footprint is stamped at each traced point.

use std::collections::HashSet;

use crate::brush::{BrushDescriptor, BrushShape};
use crate::geometry::PixelPoint;

/// Integer line trace from `a` to `b`, endpoints inclusive.
pub fn bresenham(a: PixelPoint, b: PixelPoint) -> Vec<PixelPoint> {
    let mut out = Vec::new();
    let dx = (b.x - a.x).abs();
    let sx = if a.x < b.x { 1 } else { -1 };
    let dy = -(b.y - a.y).abs();
    let sy = if a.y < b.y { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (a.x, a.y);
    loop {
        out.push(PixelPoint::new(x, y));
        if x == b.x && y == b.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    out
}

/// Footprint of the brush as offsets from its center pixel.
///
/// Circle membership uses a squared-distance compare on integers, so there is
/// no floating-point drift between stamps. Size 1 is a single pixel for both
/// shapes; even square sizes bias toward the top-left half-pixel.
pub fn footprint_offsets(brush: &BrushDescriptor) -> Vec<(i32, i32)> {
    let s = brush.size() as i32;
    let mut offsets = Vec::new();
    match brush.shape() {
        BrushShape::Circle => {
            let r2 = s * s;
            for dy in -(s - 1)..=(s - 1) {
                for dx in -(s - 1)..=(s - 1) {
                    if dx * dx + dy * dy < r2 {
                        offsets.push((dx, dy));
                    }
                }
            }
        }
        BrushShape::Square => {
            let lo = -(s / 2);
            let hi = (s - 1) / 2;
            for dy in lo..=hi {
                for dx in lo..=hi {
                    offsets.push((dx, dy));
                }
            }
        }
    }
    offsets
}

/// Perimeter pixels of the footprint centered at `center` — the eraser's
/// outline cursor, drawn hollow so it reads differently from the paint brush.
pub fn footprint_outline(brush: &BrushDescriptor, center: PixelPoint) -> Vec<PixelPoint> {
    let offsets = footprint_offsets(brush);
    let lookup: HashSet<(i32, i32)> = offsets.iter().copied().collect();
    let mut outline = Vec::new();
    for &(dx, dy) in &offsets {
        let interior = [(1, 0), (-1, 0), (0, 1), (0, -1)]
            .iter()
            .all(|(nx, ny)| lookup.contains(&(dx + nx, dy + ny)));
        if !interior {
            outline.push(PixelPoint::new(center.x + dx, center.y + dy));
        }
    }
    outline
}

/// Streaming filter that drops the elbow pixel of every L-shaped step so a
/// 1-pixel path walks diagonals as single pixels instead of doubled staircase
/// corners.
///
/// The filter holds the most recent pixel back by one step: when the held
/// pixel turns out to be the elbow of an L (edge-adjacent to both its
/// neighbors while those are diagonal to each other), it is discarded and
/// only the most recent pixel survives. Holding state across calls is what
/// lets the cleanup work across rate-limited pointer-move events, where the
/// elbow and the pixel that condemns it arrive in different events.
#[derive(Debug, Default)]
pub struct PixelPerfectPath {
    prev: Option<PixelPoint>,
    pending: Option<PixelPoint>,
}

impl PixelPerfectPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next traced pixel. Returns the pixel that is now safe to
    /// emit, if any; the newest pixel stays held until its successor proves
    /// it is not an elbow.
    pub fn push(&mut self, next: PixelPoint) -> Option<PixelPoint> {
        if self.pending == Some(next) {
            return None;
        }
        if let (Some(prev), Some(pend)) = (self.prev, self.pending) {
            if prev.is_corner_adjacent(&next)
                && pend.is_edge_adjacent(&prev)
                && pend.is_edge_adjacent(&next)
            {
                // The held pixel is a staircase elbow; drop it.
                self.pending = Some(next);
                return None;
            }
        }
        let emitted = self.pending.take();
        if emitted.is_some() {
            self.prev = emitted;
        }
        self.pending = Some(next);
        emitted
    }

    /// Release the trailing pixel at stroke end.
    pub fn finish(&mut self) -> Option<PixelPoint> {
        self.prev = None;
        self.pending.take()
    }
}

/// Expand a stream of pointer positions into every canvas pixel the brush
/// covers, deduplicated across the whole call.
///
/// Deduplication is not just an optimization: the erase blend subtracts alpha,
/// so stamping the same pixel twice within one event would multiply-subtract.
/// Output order follows first touch, which keeps paths checkable for
/// adjacency in tests.
pub fn rasterize(brush: &BrushDescriptor, points: &[PixelPoint]) -> Vec<PixelPoint> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };
    let mut path = vec![first];
    for pair in points.windows(2) {
        // Skip the segment start, already emitted by the previous segment.
        path.extend(bresenham(pair[0], pair[1]).into_iter().skip(1));
    }
    if brush.pixel_perfect() {
        let mut filter = PixelPerfectPath::new();
        let mut cleaned = Vec::with_capacity(path.len());
        for p in path {
            cleaned.extend(filter.push(p));
        }
        cleaned.extend(filter.finish());
        path = cleaned;
    }

    let offsets = footprint_offsets(brush);
    let mut seen = HashSet::with_capacity(path.len() * offsets.len());
    let mut out = Vec::new();
    for p in path {
        for &(dx, dy) in &offsets {
            let q = PixelPoint::new(p.x + dx, p.y + dy);
            if seen.insert(q) {
                out.push(q);
            }
        }
    }
    out
}
