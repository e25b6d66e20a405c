//! Quadrilaterals as immutable values.
//!
//! Corners are `A, B, C, D` (indices 0..3), clockwise on screen with `A` at the
//! top-left. Every transform returns a new `Quad`; nothing aliases.
//!
//! Invariants
//! - Corner order is preserved by `translate`, `scale`, `expand` and the snapping ops.
//! - `is_convex` holds iff the four corner turns share a strict sign.

use std::ops::Index;

use crate::primitives::{perp_dot, pt, Pt2, Rect2, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    corners: [Pt2; 4],
}

impl Default for Quad {
    fn default() -> Self {
        Self {
            corners: [Pt2::origin(); 4],
        }
    }
}

impl Quad {
    #[inline]
    pub fn new(a: Pt2, b: Pt2, c: Pt2, d: Pt2) -> Self {
        Self {
            corners: [a, b, c, d],
        }
    }

    /// Axis-aligned `width × height` quad with `A` at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(
            pt(0.0, 0.0),
            pt(width, 0.0),
            pt(width, height),
            pt(0.0, height),
        )
    }

    pub fn from_rect(r: Rect2) -> Self {
        Self::new(
            pt(r.left(), r.top()),
            pt(r.right(), r.top()),
            pt(r.right(), r.bottom()),
            pt(r.left(), r.bottom()),
        )
    }

    #[inline]
    pub fn unit_square() -> Self {
        Self::from_size(1.0, 1.0)
    }

    /// `(-1,1), (1,1), (1,-1), (-1,-1)`: the square around the unit circle.
    pub fn centered_unit_square() -> Self {
        Self::new(pt(-1.0, 1.0), pt(1.0, 1.0), pt(1.0, -1.0), pt(-1.0, -1.0))
    }

    #[inline]
    pub fn a(&self) -> Pt2 {
        self.corners[0]
    }
    #[inline]
    pub fn b(&self) -> Pt2 {
        self.corners[1]
    }
    #[inline]
    pub fn c(&self) -> Pt2 {
        self.corners[2]
    }
    #[inline]
    pub fn d(&self) -> Pt2 {
        self.corners[3]
    }

    /// Corner `i` (0=A .. 3=D). Panics on any other index.
    #[inline]
    pub fn corner(&self, i: usize) -> Pt2 {
        self[i]
    }

    /// Copy with corner `i` replaced. Panics on an index outside 0..3.
    pub fn with_corner(&self, i: usize, p: Pt2) -> Self {
        check_index(i);
        let mut out = *self;
        out.corners[i] = p;
        out
    }

    #[inline]
    pub fn corners(&self) -> [Pt2; 4] {
        self.corners
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Pt2> + '_ {
        self.corners.iter().copied()
    }

    /// Vertex centroid.
    pub fn centroid(&self) -> Pt2 {
        let sum = self.corners.iter().fold(Vec2::zeros(), |acc, p| acc + p.coords);
        Pt2::from(sum / 4.0)
    }

    /// Strict convexity: the cross products of consecutive edges are all
    /// positive or all negative. A straight or folded corner is never convex.
    pub fn is_convex(&self) -> bool {
        let c = &self.corners;
        let turns: [f64; 4] = std::array::from_fn(|i| {
            let (p, q, r) = (c[i], c[(i + 1) % 4], c[(i + 2) % 4]);
            perp_dot(q - p, r - q)
        });
        turns.iter().all(|&t| t > 0.0) || turns.iter().all(|&t| t < 0.0)
    }

    /// Axis-aligned rectangle test (exact comparisons).
    pub fn is_rectangle(&self) -> bool {
        let [a, b, c, d] = self.corners;
        a.y == b.y && b.x == c.x && c.y == d.y && d.x == a.x
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        self.map_corners(|p| pt(p.x + dx, p.y + dy))
    }

    /// Scale coordinates about the origin.
    pub fn scale(&self, sx: f64, sy: f64) -> Self {
        self.map_corners(|p| pt(p.x * sx, p.y * sy))
    }

    /// Push every corner outward along its own axes by `(width, height)`.
    pub fn expand(&self, width: f64, height: f64) -> Self {
        let [a, b, c, d] = self.corners;
        Self::new(
            pt(a.x - width, a.y - height),
            pt(b.x + width, b.y - height),
            pt(c.x + width, c.y + height),
            pt(d.x - width, d.y + height),
        )
    }

    /// Axis-aligned rectangle spanned by corner `anchor` and its opposite corner.
    ///
    /// Both of those corners keep their positions; the two others move.
    pub fn make_rectangle(&self, anchor: usize) -> Self {
        check_index(anchor);
        let [a, b, c, d] = self.corners;
        match anchor {
            0 | 2 => Self::new(a, pt(c.x, a.y), c, pt(a.x, c.y)),
            _ => Self::new(pt(d.x, b.y), b, pt(b.x, d.y), d),
        }
    }

    /// Square anchored at corner `anchor`, side `min(width, height)` where the
    /// extent is measured from the anchor to its opposite corner.
    ///
    /// The square grows from the anchor toward the opposite corner's quadrant,
    /// so corner order and orientation are preserved.
    pub fn make_square(&self, anchor: usize) -> Self {
        check_index(anchor);
        let [a, b, c, d] = self.corners;
        match anchor {
            0 => {
                let side = (c.x - a.x).min(c.y - a.y);
                Self::new(
                    a,
                    pt(a.x + side, a.y),
                    pt(a.x + side, a.y + side),
                    pt(a.x, a.y + side),
                )
            }
            1 => {
                let side = (b.x - d.x).min(d.y - b.y);
                Self::new(
                    pt(b.x - side, b.y),
                    b,
                    pt(b.x, b.y + side),
                    pt(b.x - side, b.y + side),
                )
            }
            2 => {
                let side = (c.x - a.x).min(c.y - a.y);
                Self::new(
                    pt(c.x - side, c.y - side),
                    pt(c.x, c.y - side),
                    c,
                    pt(c.x - side, c.y),
                )
            }
            _ => {
                let side = (b.x - d.x).min(d.y - b.y);
                Self::new(
                    pt(d.x, d.y - side),
                    pt(d.x + side, d.y - side),
                    pt(d.x + side, d.y),
                    d,
                )
            }
        }
    }

    /// Point-in-quad test for convex quads (boundary counts as inside).
    ///
    /// Concave or self-intersecting quads never contain anything.
    pub fn contains(&self, p: Pt2) -> bool {
        if !self.is_convex() {
            return false;
        }
        let mut sign = 0.0f64;
        for k in 0..4 {
            let e0 = self.corners[k];
            let e1 = self.corners[(k + 1) % 4];
            let side = perp_dot(e1 - e0, p - e0);
            if side == 0.0 {
                continue;
            }
            if sign == 0.0 {
                sign = side.signum();
            } else if side.signum() != sign {
                return false;
            }
        }
        true
    }

    pub fn bounding_box(&self) -> Rect2 {
        let mut left = f64::INFINITY;
        let mut top = f64::INFINITY;
        let mut right = f64::NEG_INFINITY;
        let mut bottom = f64::NEG_INFINITY;
        for p in self.corners {
            left = left.min(p.x);
            top = top.min(p.y);
            right = right.max(p.x);
            bottom = bottom.max(p.y);
        }
        Rect2::new(left, top, right - left, bottom - top)
    }

    /// Apply `f` to each corner, keeping the order.
    #[inline]
    pub fn map_corners<F: FnMut(Pt2) -> Pt2>(&self, f: F) -> Self {
        Self {
            corners: self.corners.map(f),
        }
    }
}

impl Index<usize> for Quad {
    type Output = Pt2;

    fn index(&self, i: usize) -> &Pt2 {
        check_index(i);
        &self.corners[i]
    }
}

impl From<[Pt2; 4]> for Quad {
    fn from(corners: [Pt2; 4]) -> Self {
        Self { corners }
    }
}

#[inline]
#[track_caller]
fn check_index(i: usize) {
    assert!(i < 4, "quad corner index out of range: {i} (expected 0..=3)");
}
