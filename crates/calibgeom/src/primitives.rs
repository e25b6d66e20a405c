//! 2D vector/point primitives.
//!
//! - `Vec2` is a displacement, `Pt2` a location; `Pt2 - Pt2 = Vec2`, `Pt2 + Vec2 = Pt2`.
//! - `Rect2`: axis-aligned box with a top-left origin (screen layout).

use nalgebra::{Point2, Vector2};

pub type Vec2 = Vector2<f64>;
pub type Pt2 = Point2<f64>;

/// Shorthand constructor for points.
#[inline]
pub fn pt(x: f64, y: f64) -> Pt2 {
    Pt2::new(x, y)
}

/// Vector from `a` to `b`.
#[inline]
pub fn vector(a: Pt2, b: Pt2) -> Vec2 {
    b - a
}

/// Perp-dot (2D cross) product `u.x v.y - u.y v.x`.
///
/// Positive for u→v counterclockwise in a Y-up frame.
#[inline]
pub fn perp_dot(u: Vec2, v: Vec2) -> f64 {
    u.perp(&v)
}

/// Unit vector along `v`, or the zero vector when `v` has no length.
#[inline]
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    v.try_normalize(0.0).unwrap_or_else(Vec2::zeros)
}

/// Signed area of the parallelogram spanned by `a` and `b`.
#[inline]
pub fn parallelogram_area(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Point reflection of `p` through `center`.
#[inline]
pub fn reflect_through(center: Pt2, p: Pt2) -> Pt2 {
    center - (p - center)
}

/// Axis-aligned rectangle `{x, y, width, height}`; `(x, y)` is the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect2 {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect2 {
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square box enclosing the circle `(center, radius)`.
    #[inline]
    pub fn around(center: Pt2, radius: f64) -> Self {
        Self::new(center.x - radius, center.y - radius, 2.0 * radius, 2.0 * radius)
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }
    #[inline]
    pub fn top(&self) -> f64 {
        self.y
    }
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
    #[inline]
    pub fn center(&self) -> Pt2 {
        pt(self.x + 0.5 * self.width, self.y + 0.5 * self.height)
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
    #[inline]
    pub fn contains(&self, p: Pt2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn point_vector_algebra() {
        let a = pt(1.0, 2.0);
        let b = pt(4.0, 6.0);
        let v = vector(a, b);
        assert_eq!(v, vector![3.0, 4.0]);
        assert!((v.norm() - 5.0).abs() < 1e-12);
        assert_eq!(a + v, b);
        assert!((normalize_or_zero(v).norm() - 1.0).abs() < 1e-12);
        assert_eq!(normalize_or_zero(Vec2::zeros()), Vec2::zeros());
    }

    #[test]
    fn perp_dot_orientation() {
        let x = vector![1.0, 0.0];
        let y = vector![0.0, 1.0];
        assert_eq!(perp_dot(x, y), 1.0);
        assert_eq!(perp_dot(y, x), -1.0);
        assert_eq!(parallelogram_area(x * 2.0, y * 2.5), 5.0);
    }

    #[test]
    fn rect_queries() {
        let r = Rect2::around(pt(10.0, 10.0), 5.0);
        assert_eq!(r, Rect2::new(5.0, 5.0, 10.0, 10.0));
        assert_eq!(r.center(), pt(10.0, 10.0));
        assert!(r.contains(pt(15.0, 5.0)));
        assert!(!r.contains(pt(15.1, 5.0)));
        assert!(Rect2::default().is_empty());
        assert_eq!(reflect_through(pt(1.0, 1.0), pt(3.0, 0.0)), pt(-1.0, 2.0));
    }
}
