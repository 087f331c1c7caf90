use serde::{Deserialize, Serialize};

/// A straight (non-premultiplied) RGBA color, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Per-channel distance check used by the bucket tool's tolerance match.
    pub fn matches(&self, other: &Rgba, tolerance: u8) -> bool {
        self.r.abs_diff(other.r) <= tolerance
            && self.g.abs_diff(other.g) <= tolerance
            && self.b.abs_diff(other.b) <= tolerance
            && self.a.abs_diff(other.a) <= tolerance
    }

    /// Composite `src` onto `self` under the given blend mode, returning the
    /// new stored value. Pure; buffer bookkeeping lives in `PixelBuffer`.
    pub fn blend(&self, src: Rgba, mode: BlendMode) -> Rgba {
        match mode {
            BlendMode::Paint => {
                if self.a == 0 || src.a == 255 {
                    return src;
                }
                // Alpha-weighted lerp of RGB. Alpha takes the max of the two
                // values rather than accumulating, so overlapping stamps
                // within one stroke do not progressively dim the edges.
                let w = src.a as u32;
                let inv = 255 - w;
                Rgba {
                    r: ((src.r as u32 * w + self.r as u32 * inv) / 255) as u8,
                    g: ((src.g as u32 * w + self.g as u32 * inv) / 255) as u8,
                    b: ((src.b as u32 * w + self.b as u32 * inv) / 255) as u8,
                    a: self.a.max(src.a),
                }
            }
            BlendMode::Erase { strength } => {
                // RGB channels are deliberately left alone even at alpha 0.
                // Zeroing them turns a re-painted pixel's edge blend black,
                // which reads as a dark halo on the next stroke.
                Rgba {
                    r: self.r,
                    g: self.g,
                    b: self.b,
                    a: self.a.saturating_sub(strength),
                }
            }
        }
    }
}

/// How an incoming color is composited onto an existing pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Standard alpha-over with max-alpha accumulation.
    Paint,
    /// Subtract `strength` from the destination alpha, leaving RGB intact.
    Erase { strength: u8 },
}
