//! Conic → ellipse parameters.
//!
//! The plane-space unit circle `x'² + y'² − w'² = 0` pulled back through the
//! image → plane matrix gives an image-space conic
//! `a x² + 2b xy + c y² + 2d x + 2f y + g = 0`; the closed forms below recover
//! center, semi-axes and rotation (Weisstein, "Ellipse", eqs. 19–23).

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use crate::homog::Mat3;
use crate::primitives::Pt2;

/// General conic with the doubled cross/linear terms folded into `b`, `d`, `f`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Conic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub f: f64,
    pub g: f64,
}

impl Conic {
    /// Image-space conic of the plane unit circle, given the image → plane matrix.
    pub fn unit_circle_through(unmap: &Mat3) -> Self {
        let (j, k, l) = (unmap[(0, 0)], unmap[(0, 1)], unmap[(0, 2)]);
        let (m, n, o) = (unmap[(1, 0)], unmap[(1, 1)], unmap[(1, 2)]);
        let (p, q, r) = (unmap[(2, 0)], unmap[(2, 1)], unmap[(2, 2)]);
        Self {
            a: j * j + m * m - p * p,
            b: j * k + m * n - p * q,
            c: k * k + n * n - q * q,
            d: j * l + m * o - p * r,
            f: k * l + n * o - q * r,
            g: l * l + o * o - r * r,
        }
    }

    /// Conic value at `p` (zero on the curve).
    pub fn eval(&self, p: Pt2) -> f64 {
        let (x, y) = (p.x, p.y);
        self.a * x * x
            + 2.0 * self.b * x * y
            + self.c * y * y
            + 2.0 * self.d * x
            + 2.0 * self.f * y
            + self.g
    }
}

/// Ellipse in image space.
///
/// `rotation` (radians) is the direction of the `semi_major` axis measured from
/// +X toward +Y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
    pub center: Pt2,
    pub semi_major: f64,
    pub semi_minor: f64,
    pub rotation: f64,
}

impl Ellipse {
    pub fn circle(center: Pt2, radius: f64) -> Self {
        Self {
            center,
            semi_major: radius,
            semi_minor: radius,
            rotation: 0.0,
        }
    }

    /// Point at parameter `t` (radians) along the outline.
    pub fn point_at(&self, t: f64) -> Pt2 {
        let (s, c) = self.rotation.sin_cos();
        let u = self.semi_major * t.cos();
        let v = self.semi_minor * t.sin();
        Pt2::new(self.center.x + u * c - v * s, self.center.y + u * s + v * c)
    }
}

/// Closed-form ellipse of a conic; `None` unless every parameter is finite.
///
/// The rotation branch is corrected by ±90° in `(π/4, π/2)` and `(3π/4, π)`:
/// there the half-arccot lands on the other eigen-direction.
pub fn conic_to_ellipse(k: &Conic) -> Option<Ellipse> {
    let Conic { a, b, c, d, f, g } = *k;

    let factor = b * b - a * c;
    let x0 = (c * d - b * f) / factor;
    let y0 = (a * f - b * d) / factor;

    let num = 2.0 * (a * f * f + c * d * d + g * b * b - 2.0 * b * d * f - a * c * g);
    let root = ((a - c) * (a - c) + 4.0 * b * b).sqrt();
    let semi_major = (num / (factor * (root - (a + c)))).sqrt();
    let semi_minor = (num / (factor * (-root - (a + c)))).sqrt();

    let rotation = if b == 0.0 {
        if a < c {
            0.0
        } else {
            FRAC_PI_2
        }
    } else {
        let base = 0.5 * arccot((a - c) / (2.0 * b));
        let mut r = if a < c { base } else { FRAC_PI_2 + base };
        if r > FRAC_PI_4 && r < FRAC_PI_2 {
            r += FRAC_PI_2;
        } else if r > 0.75 * PI && r < PI {
            r -= FRAC_PI_2;
        }
        r
    };

    let all_finite = [x0, y0, semi_major, semi_minor, rotation]
        .iter()
        .all(|v| v.is_finite());
    all_finite.then_some(Ellipse {
        center: Pt2::new(x0, y0),
        semi_major,
        semi_minor,
        rotation,
    })
}

#[inline]
fn arccot(x: f64) -> f64 {
    FRAC_PI_2 - x.atan()
}
