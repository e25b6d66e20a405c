//! Angle value, sweep and label placement for one angle drawing.

use crate::calibration::{AngleUnit, Calibration, ViewTransform};
use crate::cfg::AngleStyle;
use crate::geometry::point_at_bearing;
use crate::primitives::Pt2;

use super::{AngleOptions, SweepAngle};

#[derive(Clone, Copy, Debug)]
pub struct AngleHelper {
    sweep: SweepAngle,
    options: AngleOptions,
    style: AngleStyle,
    /// Radians, see `AngleOptions::oriented_angle` for the range.
    calibrated_angle: f64,
    text_position: Pt2,
    text_scale: f64,
}

impl Default for AngleHelper {
    fn default() -> Self {
        Self::new(AngleStyle::default())
    }
}

impl AngleHelper {
    pub fn new(style: AngleStyle) -> Self {
        Self {
            sweep: SweepAngle::default(),
            options: AngleOptions::default(),
            style,
            calibrated_angle: 0.0,
            text_position: Pt2::origin(),
            text_scale: 1.0,
        }
    }

    /// Recompute everything from image points.
    ///
    /// The value is measured on calibrated points; sweep and label stay in
    /// image space. Coincident vertex and leg, or a point the calibration
    /// cannot map (horizon of a perspective plane), leave the helper untouched
    /// and return `false`.
    pub fn update<C, V>(
        &mut self,
        o: Pt2,
        a: Pt2,
        b: Pt2,
        options: AngleOptions,
        calibration: &C,
        view: &V,
    ) -> bool
    where
        C: Calibration + ?Sized,
        V: ViewTransform + ?Sized,
    {
        let (la, lb) = options.legs(o, a, b);
        let world = (
            calibration.try_to_world(o),
            calibration.try_to_world(la),
            calibration.try_to_world(lb),
        );
        let (Some(wo), Some(wa), Some(wb)) = world else {
            return false;
        };
        if !self.sweep.update(o, a, b, self.style.radius, options) {
            return false;
        }
        self.options = options;
        self.calibrated_angle = options.oriented_angle(wo, wa, wb);

        let d = view.untransform_distance(self.style.text_distance_px * self.text_scale);
        self.text_position = point_at_bearing(o, d, self.sweep.bisector());
        true
    }

    /// Scale the label distance, typically with the font size.
    ///
    /// Ignored unless positive and finite; takes effect on the next update.
    pub fn set_text_scale(&mut self, k: f64) {
        if k > 0.0 && k.is_finite() {
            self.text_scale = k;
        }
    }

    #[inline]
    pub fn sweep(&self) -> &SweepAngle {
        &self.sweep
    }
    #[inline]
    pub fn options(&self) -> AngleOptions {
        self.options
    }
    #[inline]
    pub fn style(&self) -> AngleStyle {
        self.style
    }
    /// Calibrated value in radians.
    #[inline]
    pub fn calibrated_angle(&self) -> f64 {
        self.calibrated_angle
    }
    /// Label anchor in image space.
    #[inline]
    pub fn text_position(&self) -> Pt2 {
        self.text_position
    }

    #[inline]
    pub fn value(&self, unit: AngleUnit) -> f64 {
        unit.convert(self.calibrated_angle)
    }

    #[inline]
    pub fn symbol(&self, unit: AngleUnit) -> &'static str {
        unit.abbreviation()
    }

    /// `"42.0°"`, `"0.73 rad"`.
    pub fn label(&self, unit: AngleUnit, decimals: usize) -> String {
        let v = self.value(unit);
        match unit {
            AngleUnit::Degree => format!("{v:.decimals$}{}", self.symbol(unit)),
            AngleUnit::Radian => format!("{v:.decimals$} {}", self.symbol(unit)),
        }
    }

    #[inline]
    pub fn hit(&self, p: Pt2) -> bool {
        self.sweep.hit(p)
    }
}
