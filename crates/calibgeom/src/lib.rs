//! Calibrated plane geometry for video measurement tools.
//!
//! Image points (pixels, Y down) are turned into world measurements through a
//! `Calibration`; drawings (angle arcs, ellipses) stay in image space.
//!
//! API Policy
//! - Modules are public for tests, benches and the CLI. The curated surface
//!   is `api`; `prelude` covers the common imports.

pub mod angle;
pub mod api;
pub mod calibration;
pub mod cfg;
pub mod geometry;
pub mod homog;
pub mod kinematics;
pub mod mapping;
pub mod primitives;
pub mod quad;
pub mod rand;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::GeomCfg;
pub use primitives::{pt, Pt2, Vec2};
pub use quad::Quad;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::angle::{AngleHelper, AngleOptions, SweepAngle};
    pub use crate::calibration::{
        AngleUnit, Calibration, IdentityCalibration, IdentityView, PixelCalibration,
        PlaneCalibration, ViewTransform,
    };
    pub use crate::mapping::{Ellipse, ProjectiveMapping};
    pub use crate::primitives::{pt, Pt2, Rect2, Vec2};
    pub use crate::quad::Quad;
}
