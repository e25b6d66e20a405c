//! Screen-space arc of an angle drawing.

use crate::cfg::{ARROW_ARC_LENGTH, MIN_RELATIVE_RADIUS_OFFSET, MIN_SWEEP_RADIUS};
use crate::geometry::{bearing, distance, point_at_bearing, wrap_degrees};
use crate::primitives::{Pt2, Rect2};

use super::AngleOptions;

/// Pie slice `(origin, radius)` from bearing `start` over `sweep` degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sector {
    pub origin: Pt2,
    pub radius: f64,
    pub start: f64,
    pub sweep: f64,
}

impl Sector {
    pub fn contains(&self, p: Pt2) -> bool {
        let d = distance(self.origin, p);
        if d > self.radius {
            return false;
        }
        if d == 0.0 {
            return true;
        }
        wrap_degrees(bearing(self.origin, p) - self.start) <= self.sweep
    }
}

/// Arc, bounding box and arrow of an angle drawing, in image space.
///
/// Invariants:
/// - `start ∈ [0, 360)`, `sweep ∈ [0, 360)`; `sweep ≤ 180` in signed mode.
/// - The hit region is rebuilt on every successful update.
#[derive(Clone, Copy, Debug)]
pub struct SweepAngle {
    origin: Pt2,
    radius: f64,
    start: f64,
    sweep: f64,
    bounding_box: Rect2,
    arrow_start: Pt2,
    arrow_end: Pt2,
    hit_region: Option<Sector>,
}

impl Default for SweepAngle {
    fn default() -> Self {
        Self {
            origin: Pt2::origin(),
            radius: 0.0,
            start: 0.0,
            sweep: 0.0,
            bounding_box: Rect2::default(),
            arrow_start: Pt2::origin(),
            arrow_end: Pt2::origin(),
            hit_region: None,
        }
    }
}

impl SweepAngle {
    /// Recompute from image points. Coincident vertex and leg leave everything
    /// untouched and return `false`.
    ///
    /// `radius > 0` is absolute; otherwise it is an offset from the shortest
    /// leg (see `effective_radius`).
    pub fn update(&mut self, o: Pt2, a: Pt2, b: Pt2, radius: f64, options: AngleOptions) -> bool {
        if o == a || o == b {
            return false;
        }
        let (a, b) = options.legs(o, a, b);
        let (from, to) = if options.ccw { (b, a) } else { (a, b) };

        let mut start = bearing(o, from);
        let mut sweep = wrap_degrees(bearing(o, to) - start);
        let mut flipped = false;
        if options.signed && sweep > 180.0 {
            start = bearing(o, to);
            sweep = 360.0 - sweep;
            flipped = true;
        }
        let start = wrap_degrees(start);
        let r = effective_radius(radius, o, a, b);

        self.origin = o;
        self.radius = r;
        self.start = start;
        self.sweep = sweep;
        self.bounding_box = Rect2::around(o, r);

        // The arrow points at leg `b`; it sits at `start` when exactly one of
        // ccw/flipped holds.
        let tip_at_end = options.ccw == flipped;
        let delta = sweep.min((ARROW_ARC_LENGTH / r).to_degrees());
        let (tip, tail) = if tip_at_end {
            (start + sweep, start + sweep - delta)
        } else {
            (start, start + delta)
        };
        self.arrow_end = point_at_bearing(o, r, tip);
        self.arrow_start = point_at_bearing(o, r, tail);

        let finite = [o.x, o.y, r, start, sweep].iter().all(|v| v.is_finite());
        self.hit_region = (finite && r > 0.0).then_some(Sector {
            origin: o,
            radius: r,
            start,
            sweep,
        });
        true
    }

    #[inline]
    pub fn origin(&self) -> Pt2 {
        self.origin
    }
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }
    /// Start bearing in degrees (screen orientation).
    #[inline]
    pub fn start(&self) -> f64 {
        self.start
    }
    /// Clockwise extent in degrees.
    #[inline]
    pub fn sweep(&self) -> f64 {
        self.sweep
    }
    #[inline]
    pub fn bounding_box(&self) -> Rect2 {
        self.bounding_box
    }
    #[inline]
    pub fn arrow_start(&self) -> Pt2 {
        self.arrow_start
    }
    #[inline]
    pub fn arrow_end(&self) -> Pt2 {
        self.arrow_end
    }
    /// Bearing halfway through the arc.
    #[inline]
    pub fn bisector(&self) -> f64 {
        self.start + 0.5 * self.sweep
    }
    #[inline]
    pub fn hit_region(&self) -> Option<&Sector> {
        self.hit_region.as_ref()
    }

    pub fn hit(&self, p: Pt2) -> bool {
        self.hit_region.is_some_and(|s| s.contains(p))
    }
}

/// Arc radius for a requested `radius`.
///
/// Positive values are used as is. Otherwise the radius is offset from the
/// shortest leg, with offsets in `(−10, 0]` aliased to `−10` and a floor of 10.
pub fn effective_radius(radius: f64, o: Pt2, a: Pt2, b: Pt2) -> f64 {
    if radius > 0.0 {
        return radius;
    }
    let offset = radius.min(MIN_RELATIVE_RADIUS_OFFSET);
    let shortest = distance(o, a).min(distance(o, b));
    (shortest + offset).max(MIN_SWEEP_RADIUS)
}
