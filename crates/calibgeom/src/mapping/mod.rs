//! Projective mapping between a reference plane and the image.
//!
//! Purpose
//! - Map a quadrilateral in plane space (the real-world reference rectangle)
//!   onto its image-space projection and back.
//!
//! Model
//! - Paul Heckbert, "Projective Mappings for Image Warping": compose
//!   `square → image` with the adjugate of `square → plane`.
//! - `matrix` maps plane → image; its adjugate maps image → plane up to scale.
//! - A never-updated or failed mapping is the identity.

mod ellipse;

use std::fmt;

use crate::cfg::GeomCfg;
use crate::homog::{adjugate, apply, det2, inverse_or_identity, try_apply, Mat3, Vec3};
use crate::primitives::Pt2;
use crate::quad::Quad;

pub use ellipse::{conic_to_ellipse, Conic, Ellipse};

/// Which side of the correspondence failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuadRole {
    Plane,
    Image,
}

/// Mapping construction failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MappingError {
    /// The square-to-quad system is singular (colinear corners).
    DegenerateQuad { role: QuadRole },
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingError::DegenerateQuad { role } => {
                write!(f, "{role:?} quadrilateral is degenerate (singular square-to-quad solve)")
            }
        }
    }
}

impl std::error::Error for MappingError {}

/// Homography between plane space and image space.
///
/// Invariants:
/// - `adjugate == adj(matrix)`; `inverse` is `matrix⁻¹` or the identity.
/// - `valid` is false until an `update` succeeds and after any failed one.
#[derive(Clone, Copy, Debug)]
pub struct ProjectiveMapping {
    matrix: Mat3,
    adjugate: Mat3,
    inverse: Mat3,
    valid: bool,
    cfg: GeomCfg,
}

impl Default for ProjectiveMapping {
    fn default() -> Self {
        Self::with_cfg(GeomCfg::default())
    }
}

impl ProjectiveMapping {
    pub fn with_cfg(cfg: GeomCfg) -> Self {
        Self {
            matrix: Mat3::identity(),
            adjugate: Mat3::identity(),
            inverse: Mat3::identity(),
            valid: false,
            cfg,
        }
    }

    /// Build a mapping in one step.
    pub fn from_quads(plane: &Quad, image: &Quad) -> Result<Self, MappingError> {
        let mut m = Self::default();
        m.update(plane, image)?;
        Ok(m)
    }

    /// Recompute the homography for a new plane/image pair.
    ///
    /// On failure the mapping resets to the identity and is marked invalid.
    pub fn update(&mut self, plane: &Quad, image: &Quad) -> Result<(), MappingError> {
        let solved = square_to_quad(plane, self.cfg.eps_parallelogram)
            .ok_or(MappingError::DegenerateQuad {
                role: QuadRole::Plane,
            })
            .and_then(|to_plane| {
                square_to_quad(image, self.cfg.eps_parallelogram)
                    .map(|to_image| (to_plane, to_image))
                    .ok_or(MappingError::DegenerateQuad {
                        role: QuadRole::Image,
                    })
            });
        match solved {
            Ok((to_plane, to_image)) => {
                self.matrix = to_image * adjugate(&to_plane);
                self.adjugate = adjugate(&self.matrix);
                self.inverse = inverse_or_identity(&self.matrix);
                self.valid = true;
                Ok(())
            }
            Err(e) => {
                self.reset();
                Err(e)
            }
        }
    }

    /// Back to the identity mapping.
    pub fn reset(&mut self) {
        *self = Self::with_cfg(self.cfg);
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Plane → image matrix.
    #[inline]
    pub fn matrix(&self) -> &Mat3 {
        &self.matrix
    }

    /// Image → plane matrix (adjugate of `matrix`, defined up to scale).
    #[inline]
    pub fn adjugate(&self) -> &Mat3 {
        &self.adjugate
    }

    /// True inverse of `matrix`, identity if it was singular.
    #[inline]
    pub fn inverse(&self) -> &Mat3 {
        &self.inverse
    }

    /// Plane → image.
    #[inline]
    pub fn forward(&self, p: Pt2) -> Pt2 {
        apply(&self.matrix, p)
    }

    /// Image → plane.
    #[inline]
    pub fn backward(&self, p: Pt2) -> Pt2 {
        apply(&self.adjugate, p)
    }

    /// Plane → image; `None` on the vanishing line.
    #[inline]
    pub fn try_forward(&self, p: Pt2) -> Option<Pt2> {
        try_apply(&self.matrix, p)
    }

    /// Image → plane; `None` on the horizon.
    #[inline]
    pub fn try_backward(&self, p: Pt2) -> Option<Pt2> {
        try_apply(&self.adjugate, p)
    }

    pub fn forward_quad(&self, q: &Quad) -> Quad {
        q.map_corners(|p| self.forward(p))
    }

    pub fn backward_quad(&self, q: &Quad) -> Quad {
        q.map_corners(|p| self.backward(p))
    }

    /// Homogeneous plane → image (no normalization).
    #[inline]
    pub fn forward_h(&self, v: Vec3) -> Vec3 {
        self.matrix * v
    }

    /// Homogeneous image → plane (no normalization).
    #[inline]
    pub fn backward_h(&self, v: Vec3) -> Vec3 {
        self.adjugate * v
    }

    /// Image-space ellipse of the plane-space unit circle.
    pub fn ellipse(&self) -> Option<Ellipse> {
        conic_to_ellipse(&Conic::unit_circle_through(&self.adjugate))
    }
}

/// Matrix mapping the unit square `(0,0),(1,0),(1,1),(0,1)` onto `quad`.
///
/// Parallelograms take the affine branch; otherwise the two perspective terms
/// come from a 2×2 solve, and an exactly singular system yields `None`.
fn square_to_quad(quad: &Quad, eps: f64) -> Option<Mat3> {
    let [q0, q1, q2, q3] = quad.corners();
    let px = q0.x - q1.x + q2.x - q3.x;
    let py = q0.y - q1.y + q2.y - q3.y;

    if px.abs() < eps && py.abs() < eps {
        return Some(Mat3::new(
            q1.x - q0.x,
            q2.x - q1.x,
            q0.x,
            q1.y - q0.y,
            q2.y - q1.y,
            q0.y,
            0.0,
            0.0,
            1.0,
        ));
    }

    let dx1 = q1.x - q2.x;
    let dx2 = q3.x - q2.x;
    let dy1 = q1.y - q2.y;
    let dy2 = q3.y - q2.y;
    let del = det2(dx1, dx2, dy1, dy2);
    if del == 0.0 {
        return None;
    }
    let g = det2(px, dx2, py, dy2) / del;
    let h = det2(dx1, px, dy1, py) / del;
    Some(Mat3::new(
        q1.x - q0.x + g * q1.x,
        q3.x - q0.x + h * q3.x,
        q0.x,
        q1.y - q0.y + g * q1.y,
        q3.y - q0.y + h * q3.y,
        q0.y,
        g,
        h,
        1.0,
    ))
}
