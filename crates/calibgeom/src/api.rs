//! Curated API surface (UNSTABLE).
//!
//! - One import path for the CLI and benches. Breaking changes follow the
//!   modules they re-export.

// Values and primitives
pub use crate::homog::{from_homogeneous, to_homogeneous, Mat3, Vec3};
pub use crate::primitives::{pt, reflect_through, Pt2, Rect2, Vec2};
pub use crate::quad::Quad;
// Geometry helpers
pub use crate::geometry::{
    bearing, closest_point_on_segment, distance, point_at_angle, point_at_angle_and_distance,
    point_at_closest_rotation_step, point_at_closest_rotation_step_cardinal, point_at_distance,
    point_on_parallel, rotate, signed_angle, PointLinePosition,
};
// Projective mapping
pub use crate::mapping::{
    conic_to_ellipse, Conic, Ellipse, MappingError, ProjectiveMapping, QuadRole,
};
// Calibration
pub use crate::calibration::{
    AngleUnit, Calibration, CalibrationAxis, IdentityCalibration, IdentityView, PixelCalibration,
    PlaneCalibration, ViewTransform, ViewZoom,
};
// Angles
pub use crate::angle::{effective_radius, AngleHelper, AngleOptions, Sector, SweepAngle};
pub use crate::cfg::{AngleStyle, GeomCfg};
// Kinematics
pub use crate::kinematics::{angular_kinematics, AngleSample, AngularSeries, KinematicsError};
// Random quads
pub use crate::rand::{draw_points_inside, draw_quad_radial, QuadCfg, ReplayToken};
