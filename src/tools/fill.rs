use std::collections::{HashSet, VecDeque};

use crate::buffer::PixelBuffer;
use crate::color::{BlendMode, Rgba};
use crate::geometry::PixelPoint;
use crate::symmetry::SymmetrySet;

/// 4-connected region of pixels matching the seed's color within `tolerance`.
fn region(buffer: &PixelBuffer, seed: PixelPoint, tolerance: u8) -> Vec<PixelPoint> {
    let Ok(target) = buffer.get(seed.x, seed.y) else {
        return Vec::new();
    };
    let mut queue = VecDeque::from([seed]);
    let mut visited: HashSet<PixelPoint> = HashSet::new();
    let mut out = Vec::new();
    while let Some(p) = queue.pop_front() {
        if !buffer.contains(p.x, p.y) || !visited.insert(p) {
            continue;
        }
        match buffer.get(p.x, p.y) {
            Ok(c) if c.matches(&target, tolerance) => {}
            _ => continue,
        }
        out.push(p);
        queue.extend([
            PixelPoint::new(p.x + 1, p.y),
            PixelPoint::new(p.x - 1, p.y),
            PixelPoint::new(p.x, p.y + 1),
            PixelPoint::new(p.x, p.y - 1),
        ]);
    }
    out
}

/// Bucket fill at `seed`, mirrored through the symmetry set.
///
/// Each mirrored seed runs its own flood fill against the buffer as it stands
/// at that moment; mirroring the already-computed region would be wrong on an
/// asymmetric canvas, where the reachable area differs per seed. A seed whose
/// target color already equals the fill color is skipped (nothing to do, and
/// re-blending would only churn alpha). Returns whether anything changed.
pub fn flood_fill(
    buffer: &mut PixelBuffer,
    symmetry: &SymmetrySet,
    seed: PixelPoint,
    fill: Rgba,
    tolerance: u8,
) -> bool {
    let mut changed = false;
    for s in symmetry.mirror(seed) {
        let Ok(target) = buffer.get(s.x, s.y) else {
            continue; // mirrored seed landed off-canvas
        };
        if target == fill {
            continue;
        }
        let pixels = region(buffer, s, tolerance);
        log::debug!("bucket fill at ({}, {}): {} pixels", s.x, s.y, pixels.len());
        for p in &pixels {
            if let Ok(wrote) = buffer.blend(p.x, p.y, fill, BlendMode::Paint) {
                changed |= wrote;
            }
        }
    }
    changed
}
