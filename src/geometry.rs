/// An integer canvas coordinate.
///
/// Canvas space has its origin at the top-left pixel; x grows rightward and
/// y grows downward. Points may lie outside the canvas (mirrored points are
/// produced unclipped and clipped only at the blend boundary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True when `other` shares an edge with `self` (4-connectivity).
    pub fn is_edge_adjacent(&self, other: &PixelPoint) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }

    /// True when `other` touches `self` diagonally only.
    pub fn is_corner_adjacent(&self, other: &PixelPoint) -> bool {
        (self.x - other.x).abs() == 1 && (self.y - other.y).abs() == 1
    }
}

impl From<(i32, i32)> for PixelPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Inclusive axis-aligned bounding rectangle in canvas coordinates.
///
/// Used to report which region of the buffer an operation touched, so the UI
/// layer can redraw incrementally instead of re-uploading the whole bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl DirtyRect {
    pub fn from_point(p: PixelPoint) -> Self {
        Self {
            min_x: p.x,
            min_y: p.y,
            max_x: p.x,
            max_y: p.y,
        }
    }

    /// Smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &DirtyRect) -> DirtyRect {
        DirtyRect {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn include(&mut self, p: PixelPoint) {
        *self = self.union(&DirtyRect::from_point(p));
    }

    pub fn contains(&self, p: PixelPoint) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    pub fn width(&self) -> u32 {
        (self.max_x - self.min_x + 1) as u32
    }

    pub fn height(&self) -> u32 {
        (self.max_y - self.min_y + 1) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_grows_to_cover_both_rects() {
        let a = DirtyRect::from_point(PixelPoint::new(2, 3));
        let b = DirtyRect::from_point(PixelPoint::new(-1, 7));
        let u = a.union(&b);
        assert_eq!(u.min_x, -1);
        assert_eq!(u.max_x, 2);
        assert_eq!(u.min_y, 3);
        assert_eq!(u.max_y, 7);
        assert!(u.contains(PixelPoint::new(0, 5)));
        assert_eq!(u.width(), 4);
        assert_eq!(u.height(), 5);
    }

    #[test]
    fn adjacency_predicates() {
        let p = PixelPoint::new(4, 4);
        assert!(p.is_edge_adjacent(&PixelPoint::new(5, 4)));
        assert!(!p.is_edge_adjacent(&PixelPoint::new(5, 5)));
        assert!(p.is_corner_adjacent(&PixelPoint::new(5, 5)));
        assert!(!p.is_corner_adjacent(&PixelPoint::new(4, 5)));
    }
}
