//! Angle measurement: calibrated value plus on-screen sweep geometry.
//!
//! Purpose
//! - Turn three image points (vertex `o`, legs `a` and `b`) into the angle value
//!   measured in world space and the arc/arrow/label geometry drawn on screen.
//!
//! Model
//! - The value is a math-orientation angle computed on calibrated points.
//! - The sweep is a screen-orientation arc (degrees, clockwise with Y down)
//!   computed on raw image points, so perspective never bends the drawing.
//! - With a Y-flipping calibration the two agree: a counterclockwise value
//!   of θ draws as a sweep of θ degrees.

mod helper;
mod sweep;

use std::f64::consts::TAU;

use crate::geometry::signed_angle;
use crate::primitives::{reflect_through, Pt2};

pub use helper::AngleHelper;
pub use sweep::{effective_radius, Sector, SweepAngle};

/// How the angle between the two legs is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AngleOptions {
    /// Allow negative values; the sweep then takes the short way round.
    pub signed: bool,
    /// Measure from `a` to `b` counterclockwise (otherwise clockwise).
    pub ccw: bool,
    /// Measure the supplementary angle (`a` reflected through `o`).
    pub supplementary: bool,
}

impl Default for AngleOptions {
    fn default() -> Self {
        Self {
            signed: false,
            ccw: true,
            supplementary: false,
        }
    }
}

impl AngleOptions {
    pub fn new(signed: bool, ccw: bool, supplementary: bool) -> Self {
        Self {
            signed,
            ccw,
            supplementary,
        }
    }

    /// Legs after the supplementary swap: `a' = b`, `b' = 2o − a`.
    #[inline]
    pub fn legs(&self, o: Pt2, a: Pt2, b: Pt2) -> (Pt2, Pt2) {
        if self.supplementary {
            (b, reflect_through(o, a))
        } else {
            (a, b)
        }
    }

    /// Angle between legs that already went through `legs`, in radians.
    ///
    /// `(−π, π]` when signed, `[0, 2π)` otherwise.
    pub fn oriented_angle(&self, o: Pt2, a: Pt2, b: Pt2) -> f64 {
        let angle = if self.ccw {
            signed_angle(o, a, b)
        } else {
            signed_angle(o, b, a)
        };
        if !self.signed && angle < 0.0 {
            angle + TAU
        } else {
            angle
        }
    }
}
