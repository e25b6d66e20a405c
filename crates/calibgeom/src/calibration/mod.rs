//! Image ↔ world coordinate systems used by the measurement tools.
//!
//! Conventions
//! - Image space: pixels, Y pointing down.
//! - World space: user units, Y pointing up, relative to a user origin.
//! - `Calibration` is the only seam the angle and kinematics code depends on.

mod plane;

use crate::mapping::ProjectiveMapping;
use crate::primitives::{pt, Pt2};

pub use plane::{CalibrationAxis, PlaneCalibration};

/// Image ↔ world point conversion.
pub trait Calibration {
    fn to_world(&self, p: Pt2) -> Pt2;
    fn to_image(&self, p: Pt2) -> Pt2;

    /// `to_world` for points that may have no world image (beyond the horizon
    /// of a perspective calibration). `None` instead of non-finite coordinates.
    fn try_to_world(&self, p: Pt2) -> Option<Pt2> {
        let w = self.to_world(p);
        (w.x.is_finite() && w.y.is_finite()).then_some(w)
    }
}

/// Both directions are the identity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IdentityCalibration;

impl Calibration for IdentityCalibration {
    #[inline]
    fn to_world(&self, p: Pt2) -> Pt2 {
        p
    }
    #[inline]
    fn to_image(&self, p: Pt2) -> Pt2 {
        p
    }
}

/// One world unit per pixel with the Y axis flipped around `origin`.
///
/// This is the "no calibration" system: world angles keep the orientation
/// they have on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PixelCalibration {
    pub origin: Pt2,
}

impl PixelCalibration {
    pub fn new(origin: Pt2) -> Self {
        Self { origin }
    }
}

impl Calibration for PixelCalibration {
    #[inline]
    fn to_world(&self, p: Pt2) -> Pt2 {
        pt(p.x - self.origin.x, self.origin.y - p.y)
    }
    #[inline]
    fn to_image(&self, p: Pt2) -> Pt2 {
        pt(self.origin.x + p.x, self.origin.y - p.y)
    }
}

/// Raw plane coordinates: no origin and no axis flip.
impl Calibration for ProjectiveMapping {
    #[inline]
    fn to_world(&self, p: Pt2) -> Pt2 {
        self.backward(p)
    }
    #[inline]
    fn to_image(&self, p: Pt2) -> Pt2 {
        self.forward(p)
    }
    #[inline]
    fn try_to_world(&self, p: Pt2) -> Option<Pt2> {
        self.try_backward(p)
    }
}

impl<C: Calibration + ?Sized> Calibration for &C {
    #[inline]
    fn to_world(&self, p: Pt2) -> Pt2 {
        (**self).to_world(p)
    }
    #[inline]
    fn to_image(&self, p: Pt2) -> Pt2 {
        (**self).to_image(p)
    }
    #[inline]
    fn try_to_world(&self, p: Pt2) -> Option<Pt2> {
        (**self).try_to_world(p)
    }
}

/// Display unit for angles. Values are always computed in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AngleUnit {
    #[default]
    Degree,
    Radian,
}

impl AngleUnit {
    /// Radians → this unit.
    #[inline]
    pub fn convert(self, radians: f64) -> f64 {
        match self {
            AngleUnit::Degree => radians.to_degrees(),
            AngleUnit::Radian => radians,
        }
    }

    /// Degrees → this unit.
    #[inline]
    pub fn from_degrees(self, degrees: f64) -> f64 {
        match self {
            AngleUnit::Degree => degrees,
            AngleUnit::Radian => degrees.to_radians(),
        }
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            AngleUnit::Degree => "°",
            AngleUnit::Radian => "rad",
        }
    }
}

/// Screen ↔ image distance conversion of the viewport (zoom).
pub trait ViewTransform {
    /// Screen pixels → image units.
    fn untransform_distance(&self, px: f64) -> f64;
    /// Image units → screen pixels.
    fn transform_distance(&self, d: f64) -> f64;
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IdentityView;

impl ViewTransform for IdentityView {
    #[inline]
    fn untransform_distance(&self, px: f64) -> f64 {
        px
    }
    #[inline]
    fn transform_distance(&self, d: f64) -> f64 {
        d
    }
}

/// Uniform zoom; non-positive or non-finite zoom behaves as 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewZoom {
    pub zoom: f64,
}

impl ViewZoom {
    #[inline]
    fn factor(&self) -> f64 {
        if self.zoom > 0.0 && self.zoom.is_finite() {
            self.zoom
        } else {
            1.0
        }
    }
}

impl ViewTransform for ViewZoom {
    #[inline]
    fn untransform_distance(&self, px: f64) -> f64 {
        px / self.factor()
    }
    #[inline]
    fn transform_distance(&self, d: f64) -> f64 {
        d * self.factor()
    }
}
