//! JSON measurement configuration: calibration, angle unit, angle options.
//!
//! ```json
//! { "calibration": { "kind": "plane", "width": 10, "height": 5,
//!                    "quad": [[120,80],[520,90],[600,400],[40,380]] },
//!   "angle_unit": "degree",
//!   "angle": { "signed": false, "ccw": true, "supplementary": false } }
//! ```
//! Missing fields fall back to their defaults (no calibration, degrees,
//! unsigned counterclockwise).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use calibgeom::api::{
    AngleOptions, AngleUnit, Calibration, CalibrationAxis, Ellipse, PixelCalibration,
    PlaneCalibration, Pt2, Quad, Vec2,
};
use calibgeom::pt;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub calibration: CalibrationSpec,
    pub angle_unit: UnitSpec,
    pub angle: AngleSpec,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalibrationSpec {
    /// Pixels with Y flipped around `origin`.
    None {
        #[serde(default)]
        origin: [f64; 2],
    },
    /// `width × height` rectangle seen as `quad` (A, B, C, D clockwise from top-left).
    Plane {
        width: f64,
        height: f64,
        quad: [[f64; 2]; 4],
        /// Image point used as world origin; corner D when absent.
        #[serde(default)]
        origin: Option<[f64; 2]>,
    },
    /// Segment of real `length` between two image points.
    Line {
        length: f64,
        start: [f64; 2],
        end: [f64; 2],
        #[serde(default)]
        axis: AxisSpec,
        #[serde(default)]
        origin: Option<[f64; 2]>,
    },
}

impl Default for CalibrationSpec {
    fn default() -> Self {
        CalibrationSpec::None { origin: [0.0, 0.0] }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisSpec {
    #[default]
    Horizontal,
    Vertical,
    ImageAxes,
}

impl From<AxisSpec> for CalibrationAxis {
    fn from(a: AxisSpec) -> Self {
        match a {
            AxisSpec::Horizontal => CalibrationAxis::LineHorizontal,
            AxisSpec::Vertical => CalibrationAxis::LineVertical,
            AxisSpec::ImageAxes => CalibrationAxis::ImageAxes,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSpec {
    #[default]
    Degree,
    Radian,
}

impl From<UnitSpec> for AngleUnit {
    fn from(u: UnitSpec) -> Self {
        match u {
            UnitSpec::Degree => AngleUnit::Degree,
            UnitSpec::Radian => AngleUnit::Radian,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AngleSpec {
    pub signed: bool,
    pub ccw: bool,
    pub supplementary: bool,
}

impl Default for AngleSpec {
    fn default() -> Self {
        let o = AngleOptions::default();
        Self {
            signed: o.signed,
            ccw: o.ccw,
            supplementary: o.supplementary,
        }
    }
}

impl From<AngleSpec> for AngleOptions {
    fn from(s: AngleSpec) -> Self {
        AngleOptions::new(s.signed, s.ccw, s.supplementary)
    }
}

impl Config {
    /// Read from `path`, or the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_slice(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn unit(&self) -> AngleUnit {
        self.angle_unit.into()
    }

    pub fn options(&self) -> AngleOptions {
        self.angle.into()
    }

    /// Build the configured calibration.
    ///
    /// A degenerate quad keeps the identity fallback of the mapping and is
    /// reported through `tracing`, so that callers still get numbers.
    pub fn calibration(&self) -> Calib {
        match &self.calibration {
            CalibrationSpec::None { origin } => Calib::Pixel(PixelCalibration::new(point(*origin))),
            CalibrationSpec::Plane {
                width,
                height,
                quad,
                origin,
            } => {
                let mut c = PlaneCalibration::default();
                let q = Quad::new(point(quad[0]), point(quad[1]), point(quad[2]), point(quad[3]));
                if let Err(e) = c.initialize_plane(Vec2::new(*width, *height), q) {
                    tracing::warn!(error = %e, "plane mapping degenerated; using identity");
                }
                finish_plane(c, *origin)
            }
            CalibrationSpec::Line {
                length,
                start,
                end,
                axis,
                origin,
            } => {
                let mut c = PlaneCalibration::default();
                if let Err(e) = c.initialize_line(*length, point(*start), point(*end), (*axis).into()) {
                    tracing::warn!(error = %e, "line mapping degenerated; using identity");
                }
                finish_plane(c, *origin)
            }
        }
    }
}

fn finish_plane(mut c: PlaneCalibration, origin: Option<[f64; 2]>) -> Calib {
    if let Some(o) = origin {
        c.set_origin(point(o));
    }
    if !c.is_valid() {
        tracing::warn!(quad = ?c.quad_image().corners(), "calibration is invalid");
    }
    Calib::Plane(Box::new(c))
}

#[inline]
fn point(p: [f64; 2]) -> Pt2 {
    pt(p[0], p[1])
}

/// Calibration selected by the configuration.
#[derive(Clone, Debug)]
pub enum Calib {
    Pixel(PixelCalibration),
    Plane(Box<PlaneCalibration>),
}

impl Calib {
    pub fn kind(&self) -> &'static str {
        match self {
            Calib::Pixel(_) => "none",
            Calib::Plane(c) if c.axis().is_some() => "line",
            Calib::Plane(_) => "plane",
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Calib::Pixel(_) => true,
            Calib::Plane(c) => c.is_valid(),
        }
    }

    /// Image outline of a world circle.
    pub fn ellipse_from_circle(&self, center: Pt2, radius: f64) -> Option<Ellipse> {
        match self {
            Calib::Pixel(c) => Some(Ellipse::circle(c.to_image(center), radius)),
            Calib::Plane(c) => c.ellipse_from_circle(center, radius),
        }
    }
}

impl Calibration for Calib {
    fn to_world(&self, p: Pt2) -> Pt2 {
        match self {
            Calib::Pixel(c) => c.to_world(p),
            Calib::Plane(c) => c.to_world(p),
        }
    }

    fn to_image(&self, p: Pt2) -> Pt2 {
        match self {
            Calib::Pixel(c) => c.to_image(p),
            Calib::Plane(c) => c.to_image(p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn empty_config_is_default() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.options(), AngleOptions::default());
        assert_eq!(cfg.unit(), AngleUnit::Degree);
        assert_eq!(cfg.calibration().kind(), "none");
    }

    #[test]
    fn plane_config_maps_corner_d_to_origin() {
        let cfg: Config = serde_json::from_str(
            r#"{"calibration": {"kind": "plane", "width": 10, "height": 5,
                "quad": [[120,80],[520,90],[600,400],[40,380]]},
                "angle_unit": "radian", "angle": {"signed": true}}"#,
        )
        .unwrap();
        assert_eq!(cfg.unit(), AngleUnit::Radian);
        assert!(cfg.options().signed && cfg.options().ccw);
        let cal = cfg.calibration();
        assert_eq!(cal.kind(), "plane");
        assert!(cal.is_valid());
        let d = cal.to_world(pt(40.0, 380.0));
        assert!(d.coords.norm() < 1e-9);
        let b = cal.to_world(pt(520.0, 90.0));
        assert!((b.x - 10.0).abs() < 1e-9 && (b.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn line_config_with_origin() {
        let cfg: Config = serde_json::from_str(
            r#"{"calibration": {"kind": "line", "length": 50,
                "start": [100,300], "end": [300,300], "origin": [100,300]}}"#,
        )
        .unwrap();
        let cal = cfg.calibration();
        assert_eq!(cal.kind(), "line");
        let p = cal.to_world(pt(300.0, 200.0));
        assert!((p.x - 50.0).abs() < 1e-9 && (p.y - 25.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_quad_still_builds() {
        let cfg = Config {
            calibration: CalibrationSpec::Plane {
                width: 1.0,
                height: 1.0,
                quad: [[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [3.0, 0.0]],
                origin: None,
            },
            ..Config::default()
        };
        assert!(!cfg.calibration().is_valid());
    }

    #[test]
    fn pixel_ellipse_is_a_circle_in_image_space() {
        let cal = Calib::Pixel(PixelCalibration::new(pt(0.0, 100.0)));
        let e = cal.ellipse_from_circle(pt(10.0, 20.0), 5.0).unwrap();
        assert_eq!(e.center, pt(10.0, 80.0));
        assert_eq!(e.semi_major, 5.0);
    }

    #[test]
    fn load_reports_bad_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, "{ not json").unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("parsing config"));
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }
}
