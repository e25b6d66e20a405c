//! Calibration by plane: a projected reference rectangle of known size.
//!
//! Model
//! - Plane coordinates come from the mapping `Quad::from_size(w, h) ↔ quad_image`;
//!   they have `A` at the origin and Y pointing down like the image.
//! - World coordinates are plane coordinates relative to a user origin (stored
//!   in plane coordinates) with Y flipped up.
//! - A single segment can stand in for the rectangle: it becomes one edge of a
//!   square of side `length`.

use crate::homog::Vec3;
use crate::mapping::{Ellipse, MappingError, ProjectiveMapping};
use crate::primitives::{pt, Pt2, Vec2};
use crate::quad::Quad;

use super::Calibration;

/// How a segment is turned into the reference square.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CalibrationAxis {
    /// The segment is the bottom edge `D → C` and maps to +X.
    #[default]
    LineHorizontal,
    /// The segment is the left edge `D → A` and maps to +Y.
    LineVertical,
    /// Only the segment length counts; the square is aligned to the image axes.
    ImageAxes,
}

#[derive(Clone, Copy, Debug)]
pub struct PlaneCalibration {
    /// Real-world size of the reference rectangle (`x` = width, `y` = height).
    size: Vec2,
    quad_image: Quad,
    mapping: ProjectiveMapping,
    /// User origin in plane coordinates.
    origin: Pt2,
    /// `Some` when initialised from a segment.
    axis: Option<CalibrationAxis>,
    valid: bool,
    perspective: bool,
    initialized: bool,
}

impl Default for PlaneCalibration {
    fn default() -> Self {
        Self {
            size: Vec2::zeros(),
            quad_image: Quad::default(),
            mapping: ProjectiveMapping::default(),
            origin: Pt2::origin(),
            axis: None,
            valid: false,
            perspective: false,
            initialized: false,
        }
    }
}

impl PlaneCalibration {
    pub fn from_plane(size: Vec2, quad_image: Quad) -> Result<Self, MappingError> {
        let mut c = Self::default();
        c.initialize_plane(size, quad_image)?;
        Ok(c)
    }

    pub fn from_line(
        length: f64,
        start: Pt2,
        end: Pt2,
        axis: CalibrationAxis,
    ) -> Result<Self, MappingError> {
        let mut c = Self::default();
        c.initialize_line(length, start, end, axis)?;
        Ok(c)
    }

    /// Set up from the image projection of a `size.x × size.y` rectangle.
    ///
    /// The world origin goes to the image corner `D`. A degenerate quad leaves
    /// an identity mapping behind and the calibration invalid.
    pub fn initialize_plane(&mut self, size: Vec2, quad_image: Quad) -> Result<(), MappingError> {
        self.size = size;
        self.quad_image = quad_image;
        self.axis = None;
        self.initialized = true;
        self.perspective = !quad_image.is_rectangle();
        let res = self.mapping.update(&plane_quad(size), &quad_image);
        self.origin = self.mapping.backward(quad_image.d());
        self.valid = res.is_ok() && quad_image.is_convex();
        res
    }

    /// Set up from a single segment of real-world `length`.
    pub fn initialize_line(
        &mut self,
        length: f64,
        start: Pt2,
        end: Pt2,
        axis: CalibrationAxis,
    ) -> Result<(), MappingError> {
        let res = self.initialize_plane(Vec2::new(length, length), make_quad(start, end, axis));
        self.axis = Some(axis);
        self.perspective = false;
        res
    }

    /// New image quad; size and user origin are kept.
    pub fn update(&mut self, quad_image: Quad) -> Result<(), MappingError> {
        if !self.initialized || !(self.size.x > 0.0 && self.size.y > 0.0) {
            self.valid = false;
            return Ok(());
        }
        self.quad_image = quad_image;
        let res = self.mapping.update(&plane_quad(self.size), &quad_image);
        self.valid = res.is_ok() && quad_image.is_convex();
        res
    }

    /// New segment for a line calibration, same axis convention.
    pub fn update_line(&mut self, start: Pt2, end: Pt2) -> Result<(), MappingError> {
        let axis = self.axis.unwrap_or_default();
        self.update(make_quad(start, end, axis))
    }

    /// Image → world with the stored origin.
    pub fn transform(&self, p: Pt2) -> Pt2 {
        if !self.initialized {
            return p;
        }
        calibrated_to_world(self.mapping.backward(p), self.origin)
    }

    /// Image → world; `None` on or beyond the horizon of the plane.
    pub fn try_transform(&self, p: Pt2) -> Option<Pt2> {
        if !self.initialized {
            return Some(p);
        }
        let c = self.mapping.try_backward(p)?;
        Some(calibrated_to_world(c, self.origin))
    }

    /// Image → world relative to an origin given in image space.
    pub fn transform_with_origin(&self, p: Pt2, origin_image: Pt2) -> Pt2 {
        if !self.initialized {
            return p;
        }
        let origin = self.mapping.backward(origin_image);
        calibrated_to_world(self.mapping.backward(p), origin)
    }

    /// World → image with the stored origin.
    pub fn untransform(&self, p: Pt2) -> Pt2 {
        self.untransform_with_origin(p, self.origin)
    }

    /// World → image relative to an origin given in plane coordinates.
    pub fn untransform_with_origin(&self, p: Pt2, origin: Pt2) -> Pt2 {
        if !self.initialized {
            return p;
        }
        self.mapping.forward(world_to_calibrated(p, origin))
    }

    /// World point → homogeneous image vector (not normalized).
    pub fn project(&self, p: Pt2) -> Vec3 {
        if !self.initialized {
            return Vec3::new(p.x, p.y, 1.0);
        }
        let c = world_to_calibrated(p, self.origin);
        self.mapping.forward_h(Vec3::new(c.x, c.y, 1.0))
    }

    /// Move the world origin to an image point.
    pub fn set_origin(&mut self, p_image: Pt2) {
        if self.initialized {
            self.origin = self.mapping.backward(p_image);
        }
    }

    /// Image origin of the world coordinate system.
    pub fn origin_image(&self) -> Pt2 {
        self.untransform(Pt2::origin())
    }

    /// World length of an image-space horizontal run `v` starting at the image origin.
    pub fn scalar(&self, v: f64) -> f64 {
        let d = (self.transform(pt(v, 0.0)) - self.transform(pt(0.0, 0.0))).norm();
        if v < 0.0 {
            -d
        } else {
            d
        }
    }

    /// Image length of a world-space run `v` along +X from the world origin.
    pub fn image_scalar(&self, v: f64) -> f64 {
        let d = (self.untransform(pt(v, 0.0)) - self.untransform(pt(0.0, 0.0))).norm();
        if v < 0.0 {
            -d
        } else {
            d
        }
    }

    /// Image-space ellipse of a world-space circle.
    ///
    /// Line calibrations have no perspective and give a circle.
    pub fn ellipse_from_circle(&self, center: Pt2, radius: f64) -> Option<Ellipse> {
        if self.axis.is_some() {
            return Some(Ellipse::circle(self.untransform(center), self.image_scalar(radius)));
        }
        let corner = |dx: f64, dy: f64| self.untransform(pt(center.x + dx * radius, center.y + dy * radius));
        let unit = Quad::centered_unit_square();
        let quad = unit.map_corners(|p| corner(p.x, p.y));
        ProjectiveMapping::from_quads(&unit, &quad).ok()?.ellipse()
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }
    #[inline]
    pub fn quad_image(&self) -> &Quad {
        &self.quad_image
    }
    #[inline]
    pub fn mapping(&self) -> &ProjectiveMapping {
        &self.mapping
    }
    /// User origin in plane coordinates.
    #[inline]
    pub fn origin(&self) -> Pt2 {
        self.origin
    }
    #[inline]
    pub fn axis(&self) -> Option<CalibrationAxis> {
        self.axis
    }
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }
    #[inline]
    pub fn is_perspective(&self) -> bool {
        self.perspective
    }
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl Calibration for PlaneCalibration {
    #[inline]
    fn to_world(&self, p: Pt2) -> Pt2 {
        self.transform(p)
    }
    #[inline]
    fn to_image(&self, p: Pt2) -> Pt2 {
        self.untransform(p)
    }
    #[inline]
    fn try_to_world(&self, p: Pt2) -> Option<Pt2> {
        self.try_transform(p)
    }
}

#[inline]
fn plane_quad(size: Vec2) -> Quad {
    Quad::from_size(size.x, size.y)
}

#[inline]
fn calibrated_to_world(p: Pt2, origin: Pt2) -> Pt2 {
    pt(p.x - origin.x, origin.y - p.y)
}

#[inline]
fn world_to_calibrated(p: Pt2, origin: Pt2) -> Pt2 {
    pt(origin.x + p.x, origin.y - p.y)
}

/// Square `ABCD` (clockwise from the top-left on screen) built on a segment.
pub(crate) fn make_quad(start: Pt2, end: Pt2, axis: CalibrationAxis) -> Quad {
    match axis {
        CalibrationAxis::LineHorizontal => square_above(start, end),
        CalibrationAxis::LineVertical => {
            let (d, a) = (start, end);
            let c = pt(d.x + (d.y - a.y), d.y + (a.x - d.x));
            let b = a + (c - d);
            Quad::new(a, b, c, d)
        }
        CalibrationAxis::ImageAxes => {
            let length = (end - start).norm();
            square_above(start, pt(start.x + length, start.y))
        }
    }
}

/// Square with `d → c` as its bottom edge, left to right.
fn square_above(d: Pt2, c: Pt2) -> Quad {
    let a = pt(d.x + (c.y - d.y), d.y - (c.x - d.x));
    let b = a + (c - d);
    Quad::new(a, b, c, d)
}
