//! Stateless 2D geometry helpers for measurement tools.
//!
//! Two angle conventions live here and must not be merged:
//! - `signed_angle*`: math orientation, radians in `(−π, π]`, positive for a
//!   counterclockwise turn when Y points up.
//! - `bearing`: drawing orientation, degrees, measured from +X with Y pointing
//!   down, so positive is clockwise on screen.

use std::f64::consts::{PI, TAU};

use nalgebra::Rotation2;

use crate::primitives::{perp_dot, Pt2, Vec2};

/// Where a projected point is allowed to land relative to segment `[a, b]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointLinePosition {
    BeforeSegment,
    BeforeAndOnSegment,
    OnSegment,
    AfterAndOnSegment,
    AfterSegment,
}

/// Euclidean distance.
#[inline]
pub fn distance(a: Pt2, b: Pt2) -> f64 {
    nalgebra::distance(&a, &b)
}

/// Closest point to `c` on line `(a, b)`, constrained by `position`.
///
/// `margin` (same units as the points) keeps the result away from the segment
/// ends. A zero-length segment returns `a`.
pub fn closest_point_on_segment(
    a: Pt2,
    b: Pt2,
    c: Pt2,
    position: PointLinePosition,
    margin: f64,
) -> Pt2 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 <= 0.0 {
        return a;
    }
    let t = (c - a).dot(&ab) / len2;
    let m = margin / len2.sqrt();
    let t = match position {
        PointLinePosition::BeforeSegment => t.min(-m),
        PointLinePosition::BeforeAndOnSegment => t.min(1.0 - m),
        PointLinePosition::OnSegment => {
            // Margins wider than the segment collapse onto its midpoint.
            if m >= 0.5 {
                0.5
            } else {
                t.clamp(m, 1.0 - m)
            }
        }
        PointLinePosition::AfterAndOnSegment => t.max(m),
        PointLinePosition::AfterSegment => t.max(1.0 + m),
    };
    a + ab * t
}

/// Point on the ray `a → b` at `distance` from `a` (may extrapolate past `b`).
pub fn point_at_distance(a: Pt2, b: Pt2, distance: f64) -> Pt2 {
    let ab = b - a;
    let len = ab.norm();
    if len <= 0.0 {
        return a;
    }
    a + ab * (distance / len)
}

/// Signed angle from `oa` to `ob`.
#[inline]
pub fn signed_angle(o: Pt2, a: Pt2, b: Pt2) -> f64 {
    signed_angle_between(o, a, o, b)
}

/// Signed angle from vector `ab` to vector `cd`, `atan2(perp, dot)`.
///
/// Coincident endpoints give `0`.
#[inline]
pub fn signed_angle_between(a: Pt2, b: Pt2, c: Pt2, d: Pt2) -> f64 {
    signed_angle_vec(b - a, d - c)
}

/// `atan2(perp, dot)` folded into `(−π, π]`: opposite vectors give `+π`
/// whatever the sign of the zero cross product.
#[inline]
pub fn signed_angle_vec(u: Vec2, v: Vec2) -> f64 {
    let r = perp_dot(u, v).atan2(u.dot(&v));
    if r <= -PI {
        PI
    } else {
        r
    }
}

/// Unsigned angle between `oa` and `ob`, in `[0, π]`.
#[inline]
pub fn angle_between(o: Pt2, a: Pt2, b: Pt2) -> f64 {
    signed_angle(o, a, b).abs()
}

/// Screen bearing of `o → p` in degrees, `(−180, 180]`, clockwise-positive (Y down).
#[inline]
pub fn bearing(o: Pt2, p: Pt2) -> f64 {
    let v = p - o;
    v.y.atan2(v.x).to_degrees()
}

/// Point at `distance` from `o` along the screen bearing `degrees`.
#[inline]
pub fn point_at_bearing(o: Pt2, distance: f64, degrees: f64) -> Pt2 {
    let (s, c) = degrees.to_radians().sin_cos();
    o + Vec2::new(c, s) * distance
}

/// Wrap an angle in degrees into `[0, 360)`.
#[inline]
pub fn wrap_degrees(deg: f64) -> f64 {
    let w = deg.rem_euclid(360.0);
    if w >= 360.0 {
        0.0
    } else {
        w
    }
}

/// Wrap an angle in radians into `[0, 2π)`.
#[inline]
pub fn wrap_tau(rad: f64) -> f64 {
    let w = rad.rem_euclid(TAU);
    if w >= TAU {
        0.0
    } else {
        w
    }
}

/// Rotate `p` around `pivot` by `radians` (standard rotation matrix).
#[inline]
pub fn rotate(pivot: Pt2, p: Pt2, radians: f64) -> Pt2 {
    pivot + Rotation2::new(radians) * (p - pivot)
}

/// Snap `point` to the closest of `subdivisions` rotation steps around `pivot`,
/// measured from the `pivot → leg1` direction.
///
/// The result keeps the distance `|pivot point|`. Zero subdivisions or a
/// degenerate reference leg return `point` unchanged.
pub fn point_at_closest_rotation_step(pivot: Pt2, leg1: Pt2, point: Pt2, subdivisions: u32) -> Pt2 {
    if subdivisions == 0 || leg1 == pivot || point == pivot {
        return point;
    }
    let angle = wrap_tau(signed_angle(pivot, leg1, point));
    let step = TAU / subdivisions as f64;
    let index = (angle / step).round();
    let radius = distance(pivot, point);
    let reference = point_at_distance(pivot, leg1, radius);
    rotate(pivot, reference, index * step)
}

/// Same as `point_at_closest_rotation_step` with the +X image axis as reference.
#[inline]
pub fn point_at_closest_rotation_step_cardinal(pivot: Pt2, point: Pt2, subdivisions: u32) -> Pt2 {
    let leg1 = pivot + Vec2::new(1.0, 0.0);
    point_at_closest_rotation_step(pivot, leg1, point, subdivisions)
}

/// `leg` rotated around `pivot` by `radians`.
#[inline]
pub fn point_at_angle(pivot: Pt2, leg: Pt2, radians: f64) -> Pt2 {
    rotate(pivot, leg, radians)
}

/// Point at `distance` from `pivot`, `radians` away from the `pivot → leg` direction.
pub fn point_at_angle_and_distance(pivot: Pt2, leg: Pt2, radians: f64, distance: f64) -> Pt2 {
    let on_leg = point_at_distance(pivot, leg, distance);
    rotate(pivot, on_leg, radians)
}

/// Point at signed `distance` from `p` on the line through `p` parallel to `ab`.
pub fn point_on_parallel(a: Pt2, b: Pt2, p: Pt2, distance: f64) -> Pt2 {
    let ab = b - a;
    let len = ab.norm();
    if len <= 0.0 {
        return p;
    }
    p + ab * (distance / len)
}

/// Linear interpolation `a (1 − alpha) + b alpha`.
#[inline]
pub fn mix(a: f64, b: f64, alpha: f64) -> f64 {
    a * (1.0 - alpha) + b * alpha
}

/// Component-wise linear interpolation between two points.
#[inline]
pub fn mix_point(a: Pt2, b: Pt2, alpha: f64) -> Pt2 {
    Pt2::new(mix(a.x, b.x, alpha), mix(a.y, b.y, alpha))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::pt;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn close(a: Pt2, b: Pt2) -> bool {
        (a - b).norm() < 1e-9
    }

    #[test]
    fn signed_angle_quarter_turn() {
        let o = pt(0.0, 0.0);
        let a = pt(10.0, 0.0);
        let b = pt(0.0, 10.0);
        assert!((signed_angle(o, a, b) - FRAC_PI_2).abs() < 1e-12);
        assert!((signed_angle(o, b, a) + FRAC_PI_2).abs() < 1e-12);
        assert_eq!(signed_angle(o, o, b), 0.0);
    }

    #[test]
    fn signed_angle_symmetric_legs() {
        let o = pt(1.0, -2.0);
        for &theta in &[0.1, 0.7, 1.2, 1.5] {
            let a = rotate(o, o + Vec2::new(3.0, 0.0), -theta);
            let b = rotate(o, o + Vec2::new(3.0, 0.0), theta);
            assert!((signed_angle(o, a, b) - 2.0 * theta).abs() < 1e-9);
            assert!((signed_angle(o, b, a) + 2.0 * theta).abs() < 1e-9);
        }
    }

    #[test]
    fn signed_angle_half_turn_is_positive_pi() {
        let v = signed_angle(pt(0.0, 0.0), pt(1.0, 0.0), pt(-1.0, 0.0));
        assert!((v - PI).abs() < 1e-12);
        // Cross product comes out as -0.0 in this order.
        assert_eq!(signed_angle(pt(0.0, 0.0), pt(-1.0, 0.0), pt(1.0, 0.0)), PI);
        assert_eq!(signed_angle_vec(Vec2::new(0.0, -2.0), Vec2::new(0.0, 3.0)), PI);
    }

    #[test]
    fn bearing_is_clockwise_on_screen() {
        let o = pt(0.0, 0.0);
        assert_eq!(bearing(o, pt(1.0, 0.0)), 0.0);
        // Y down: a point below the origin is a quarter turn clockwise.
        assert!((bearing(o, pt(0.0, 1.0)) - 90.0).abs() < 1e-12);
        assert!((wrap_degrees(bearing(o, pt(0.0, -1.0))) - 270.0).abs() < 1e-12);
        assert_eq!(wrap_degrees(-360.0), 0.0);
        assert!(close(point_at_bearing(o, 2.0, 90.0), pt(0.0, 2.0)));
        assert!((bearing(o, point_at_bearing(o, 5.0, -135.0)) + 135.0).abs() < 1e-9);
        assert!((wrap_tau(-FRAC_PI_2) - 1.5 * PI).abs() < 1e-12);
    }

    #[test]
    fn closest_point_positions() {
        let a = pt(0.0, 0.0);
        let b = pt(10.0, 0.0);
        let on = |c, pos, m| closest_point_on_segment(a, b, c, pos, m);
        assert!(close(on(pt(5.0, 3.0), PointLinePosition::OnSegment, 0.0), pt(5.0, 0.0)));
        assert!(close(on(pt(-4.0, 3.0), PointLinePosition::OnSegment, 0.0), a));
        assert!(close(on(pt(14.0, 3.0), PointLinePosition::OnSegment, 1.0), pt(9.0, 0.0)));
        assert!(close(on(pt(5.0, 1.0), PointLinePosition::BeforeSegment, 2.0), pt(-2.0, 0.0)));
        assert!(close(on(pt(-5.0, 1.0), PointLinePosition::BeforeSegment, 2.0), pt(-5.0, 0.0)));
        assert!(close(on(pt(12.0, 1.0), PointLinePosition::BeforeAndOnSegment, 0.0), b));
        assert!(close(on(pt(-3.0, 1.0), PointLinePosition::AfterAndOnSegment, 1.0), pt(1.0, 0.0)));
        assert!(close(on(pt(5.0, 1.0), PointLinePosition::AfterSegment, 2.0), pt(12.0, 0.0)));
        assert!(close(on(pt(20.0, 1.0), PointLinePosition::AfterSegment, 2.0), pt(20.0, 0.0)));
        // Degenerate segment.
        assert!(close(closest_point_on_segment(a, a, b, PointLinePosition::OnSegment, 0.0), a));
    }

    #[test]
    fn point_at_distance_extrapolates() {
        let a = pt(1.0, 1.0);
        let b = pt(4.0, 5.0);
        assert!(close(point_at_distance(a, b, 10.0), pt(7.0, 9.0)));
        assert!(close(point_at_distance(a, a, 10.0), a));
    }

    #[test]
    fn rotation_and_angle_placement() {
        let pivot = pt(1.0, 1.0);
        assert!(close(rotate(pivot, pt(2.0, 1.0), FRAC_PI_2), pt(1.0, 2.0)));
        let p = point_at_angle_and_distance(pivot, pt(5.0, 1.0), FRAC_PI_2, 2.0);
        assert!(close(p, pt(1.0, 3.0)));
        assert!(close(point_at_angle(pivot, pt(3.0, 1.0), PI), pt(-1.0, 1.0)));
        let q = point_on_parallel(pt(0.0, 0.0), pt(0.0, 2.0), pt(5.0, 5.0), -3.0);
        assert!(close(q, pt(5.0, 2.0)));
    }

    #[test]
    fn rotation_step_rounds_to_nearest() {
        let pivot = pt(0.0, 0.0);
        let leg1 = pt(1.0, 0.0);
        // 40° snaps to 45° with 8 subdivisions (not floored to 0°).
        let p = rotate(pivot, pt(2.0, 0.0), 40f64.to_radians());
        let snapped = point_at_closest_rotation_step(pivot, leg1, p, 8);
        assert!(close(snapped, rotate(pivot, pt(2.0, 0.0), FRAC_PI_4)));
        // Negative raw angles are normalized first: −10° snaps back to 0°.
        let n = rotate(pivot, pt(3.0, 0.0), (-10f64).to_radians());
        assert!(close(point_at_closest_rotation_step(pivot, leg1, n, 8), pt(3.0, 0.0)));
        // −30° snaps to 315°.
        let m = rotate(pivot, pt(1.0, 0.0), (-30f64).to_radians());
        let s = point_at_closest_rotation_step_cardinal(pivot, m, 8);
        assert!(close(s, rotate(pivot, pt(1.0, 0.0), -FRAC_PI_4)));
        assert_eq!(point_at_closest_rotation_step(pivot, leg1, m, 0), m);
    }

    #[test]
    fn mix_scalar_and_point() {
        assert_eq!(mix(2.0, 4.0, 0.25), 2.5);
        assert!(close(mix_point(pt(0.0, 0.0), pt(4.0, -8.0), 0.5), pt(2.0, -4.0)));
    }

    #[test]
    fn angles_randomized_seeded() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..64 {
            let o = pt(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0));
            let a = pt(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0));
            let b = pt(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0));
            let s = signed_angle(o, a, b);
            assert!(s > -PI - 1e-12 && s <= PI + 1e-12);
            assert!((angle_between(o, a, b) - s.abs()).abs() < 1e-12);
        }
    }

    proptest! {
        #[test]
        fn signed_angle_is_antisymmetric(
            ox in -50.0..50.0f64, oy in -50.0..50.0f64,
            ax in -50.0..50.0f64, ay in -50.0..50.0f64,
            bx in -50.0..50.0f64, by in -50.0..50.0f64,
        ) {
            let o = pt(ox, oy);
            let a = pt(ax, ay);
            let b = pt(bx, by);
            prop_assume!((a - o).norm() > 1e-3 && (b - o).norm() > 1e-3);
            let ab = signed_angle(o, a, b);
            let ba = signed_angle(o, b, a);
            // Exactly opposite legs sit on the ±π branch cut.
            prop_assume!((ab.abs() - PI).abs() > 1e-9);
            prop_assert!((ab + ba).abs() < 1e-9);
        }

        #[test]
        fn rotation_step_lands_on_grid(px in -20.0..20.0f64, py in -20.0..20.0f64, n in 1u32..24) {
            let pivot = pt(0.0, 0.0);
            let p = pt(px, py);
            prop_assume!(p.coords.norm() > 1e-3);
            let s = point_at_closest_rotation_step_cardinal(pivot, p, n);
            prop_assert!((s.coords.norm() - p.coords.norm()).abs() < 1e-9);
            let step = TAU / n as f64;
            let k = wrap_tau(signed_angle(pivot, pt(1.0, 0.0), s)) / step;
            prop_assert!((k - k.round()).abs() < 1e-6 || (k - n as f64).abs() < 1e-6);
        }
    }
}
