//! Homogeneous-coordinate helpers around `nalgebra::Matrix3`.
//!
//! Conventions
//! - Points are column vectors `(x, y, 1)`; a 3×3 matrix `H` maps `p ↦ H p`.
//! - Matrices are only defined up to scale, so every projection divides by `w`.

use nalgebra::{Matrix3, Vector3};

use crate::cfg::W_EPS;
use crate::primitives::Pt2;

pub type Mat3 = Matrix3<f64>;
pub type Vec3 = Vector3<f64>;

/// Determinant of the 2×2 matrix `[a b; c d]`.
#[inline]
pub fn det2(a: f64, b: f64, c: f64, d: f64) -> f64 {
    a * d - b * c
}

/// Adjugate (transpose of the cofactor matrix): `adj(M) M = det(M) I`.
pub fn adjugate(m: &Mat3) -> Mat3 {
    let a = |r: usize, c: usize| m[(r, c)];
    Mat3::new(
        det2(a(1, 1), a(1, 2), a(2, 1), a(2, 2)),
        det2(a(2, 1), a(2, 2), a(0, 1), a(0, 2)),
        det2(a(0, 1), a(0, 2), a(1, 1), a(1, 2)),
        det2(a(1, 2), a(1, 0), a(2, 2), a(2, 0)),
        det2(a(2, 2), a(2, 0), a(0, 2), a(0, 0)),
        det2(a(0, 2), a(0, 0), a(1, 2), a(1, 0)),
        det2(a(1, 0), a(1, 1), a(2, 0), a(2, 1)),
        det2(a(2, 0), a(2, 1), a(0, 0), a(0, 1)),
        det2(a(0, 0), a(0, 1), a(1, 0), a(1, 1)),
    )
}

/// True inverse, or the identity when `m` is singular.
#[inline]
pub fn inverse_or_identity(m: &Mat3) -> Mat3 {
    m.try_inverse().unwrap_or_else(Mat3::identity)
}

#[inline]
pub fn to_homogeneous(p: Pt2) -> Vec3 {
    Vec3::new(p.x, p.y, 1.0)
}

/// Divide by `w`; `None` for points at (or numerically near) infinity.
#[inline]
pub fn from_homogeneous(v: Vec3) -> Option<Pt2> {
    if !(v.z.abs() > W_EPS) {
        return None;
    }
    let p = Pt2::new(v.x / v.z, v.y / v.z);
    (p.x.is_finite() && p.y.is_finite()).then_some(p)
}

/// Apply `m` to a point and normalize by `w` without checks.
///
/// Points on the vanishing line come out non-finite; use `try_apply` when the
/// input may be anywhere in the plane.
#[inline]
pub fn apply(m: &Mat3, p: Pt2) -> Pt2 {
    let w = m[(2, 0)] * p.x + m[(2, 1)] * p.y + m[(2, 2)];
    let x = (m[(0, 0)] * p.x + m[(0, 1)] * p.y + m[(0, 2)]) / w;
    let y = (m[(1, 0)] * p.x + m[(1, 1)] * p.y + m[(1, 2)]) / w;
    Pt2::new(x, y)
}

/// Checked `apply`: `None` when `w` cancels out relative to the size of its
/// terms, i.e. for points on (or rounding-close to) the vanishing line.
#[inline]
pub fn try_apply(m: &Mat3, p: Pt2) -> Option<Pt2> {
    let v = m * to_homogeneous(p);
    let scale = (m[(2, 0)] * p.x).abs() + (m[(2, 1)] * p.y).abs() + m[(2, 2)].abs();
    if !(v.z.abs() > W_EPS * scale) {
        return None;
    }
    from_homogeneous(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::matrix;

    #[test]
    fn adjugate_times_matrix_is_det_identity() {
        let m = matrix![2.0, -1.0, 0.5; 0.3, 4.0, 1.0; 0.01, 0.02, 1.0];
        let adj = adjugate(&m);
        let prod = adj * m;
        let expected = Mat3::identity() * m.determinant();
        assert!((prod - expected).amax() < 1e-12);
        // Proportional to the inverse.
        let inv = m.try_inverse().unwrap();
        assert!((adj / m.determinant() - inv).amax() < 1e-12);
    }

    #[test]
    fn adjugate_of_singular_matrix_is_finite() {
        let m = matrix![1.0, 2.0, 3.0; 2.0, 4.0, 6.0; 0.0, 0.0, 1.0];
        let adj = adjugate(&m);
        assert!(adj.iter().all(|v| v.is_finite()));
        assert!((adj * m).amax() < 1e-12);
        assert_eq!(inverse_or_identity(&m), Mat3::identity());
    }

    #[test]
    fn projection_divides_by_w() {
        let m = matrix![2.0, 0.0, 0.0; 0.0, 2.0, 0.0; 0.0, 0.0, 2.0];
        let p = Pt2::new(3.0, -4.0);
        assert_eq!(apply(&m, p), p);
        assert_eq!(try_apply(&m, p), Some(p));
        // w = 0 on the line x = 1.
        let persp = matrix![1.0, 0.0, 0.0; 0.0, 1.0, 0.0; -1.0, 0.0, 1.0];
        assert!(try_apply(&persp, Pt2::new(1.0, 5.0)).is_none());
        // Large terms that cancel to a rounding residue are still on the line.
        let big = matrix![1.0, 0.0, 0.0; 0.0, 1.0, 0.0; 0.0, 13333.333333333332, 666666.6666666674];
        assert!(try_apply(&big, Pt2::new(300.0, -50.0)).is_none());
        assert!(try_apply(&big, Pt2::new(300.0, 10.0)).is_some());
        assert!(from_homogeneous(Vec3::new(1.0, 1.0, 0.0)).is_none());
        assert_eq!(det2(1.0, 2.0, 3.0, 4.0), -2.0);
    }
}
