//! Tolerances and drawing defaults shared across modules.

/// Alternating corner sum below which a quad is treated as a parallelogram.
pub const PARALLELOGRAM_EPS: f64 = 1e-13;
/// Smallest homogeneous `w` accepted by the checked projections.
pub const W_EPS: f64 = 1e-12;
/// Relative sweep radius offsets in `(−10, 0]` are aliased to this value.
pub const MIN_RELATIVE_RADIUS_OFFSET: f64 = -10.0;
/// Smallest effective sweep radius in relative mode.
pub const MIN_SWEEP_RADIUS: f64 = 10.0;
/// Arc length (image units) between arrow tail and tip.
pub const ARROW_ARC_LENGTH: f64 = 8.0;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Parallelogram detection in the square-to-quad solve.
    pub eps_parallelogram: f64,
    /// Homogeneous `w` rejection threshold.
    pub eps_w: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_parallelogram: PARALLELOGRAM_EPS,
            eps_w: W_EPS,
        }
    }
}

/// Style knobs for angle drawings.
///
/// `radius <= 0` selects the relative mode of `SweepAngle` (offset from the
/// shortest leg).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleStyle {
    pub radius: f64,
    /// Distance of the label from the vertex, in screen pixels.
    pub text_distance_px: f64,
}

impl Default for AngleStyle {
    fn default() -> Self {
        Self {
            radius: 40.0,
            text_distance_px: 60.0,
        }
    }
}
