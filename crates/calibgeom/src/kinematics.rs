//! Angular kinematics of a tracked angle.
//!
//! Purpose
//! - Turn a sequence of `(o, a, b)` image triplets, one per frame, into angular
//!   position, displacement, velocity and acceleration series, plus the linear
//!   quantities of the point `b` rotating around `o`.
//!
//! Model
//! - Points go through the calibration first; the angle rules are the ones of
//!   `AngleOptions` (supplementary swap, orientation, unsigned folding).
//! - Derivatives are central differences over two frames. The first and last
//!   samples copy their interior neighbour; series with no interior are zero.
//! - Displacements are raw differences: an unsigned angle crossing 0 jumps by 2π.
//!
//! Units: radians, seconds, world units.

use std::fmt;

use crate::angle::AngleOptions;
use crate::calibration::{AngleUnit, Calibration};
use crate::geometry::distance;
use crate::primitives::Pt2;

/// One frame of a tracked angle, in image space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleSample {
    pub o: Pt2,
    pub a: Pt2,
    pub b: Pt2,
}

impl AngleSample {
    pub fn new(o: Pt2, a: Pt2, b: Pt2) -> Self {
        Self { o, a, b }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KinematicsError {
    Empty,
    /// Frame interval must be positive and finite.
    InvalidFrameInterval(f64),
    /// Sample index with a point the calibration cannot map to world space.
    Unmappable(usize),
}

impl fmt::Display for KinematicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KinematicsError::Empty => write!(f, "no samples"),
            KinematicsError::InvalidFrameInterval(dt) => {
                write!(f, "invalid frame interval {dt} (expected > 0)")
            }
            KinematicsError::Unmappable(i) => {
                write!(f, "sample {i} lies on the calibration horizon")
            }
        }
    }
}

impl std::error::Error for KinematicsError {}

/// Column-oriented result; every column has one entry per sample.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AngularSeries {
    pub time: Vec<f64>,
    /// Distance `|o b|` after the supplementary swap.
    pub radius: Vec<f64>,
    pub angular_position: Vec<f64>,
    pub angular_displacement: Vec<f64>,
    pub total_angular_displacement: Vec<f64>,
    pub angular_velocity: Vec<f64>,
    pub tangential_velocity: Vec<f64>,
    pub angular_acceleration: Vec<f64>,
    pub tangential_acceleration: Vec<f64>,
    pub centripetal_acceleration: Vec<f64>,
    pub resultant_acceleration: Vec<f64>,
}

impl AngularSeries {
    #[inline]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Copy with the angular columns expressed in `unit` (per second, per second²).
    pub fn in_unit(&self, unit: AngleUnit) -> Self {
        let conv = |v: &[f64]| v.iter().map(|&x| unit.convert(x)).collect::<Vec<_>>();
        Self {
            angular_position: conv(&self.angular_position),
            angular_displacement: conv(&self.angular_displacement),
            total_angular_displacement: conv(&self.total_angular_displacement),
            angular_velocity: conv(&self.angular_velocity),
            angular_acceleration: conv(&self.angular_acceleration),
            ..self.clone()
        }
    }
}

/// Compute the angular series of `samples` taken every `frame_interval` seconds.
pub fn angular_kinematics<C>(
    samples: &[AngleSample],
    frame_interval: f64,
    options: AngleOptions,
    calibration: &C,
) -> Result<AngularSeries, KinematicsError>
where
    C: Calibration + ?Sized,
{
    if samples.is_empty() {
        return Err(KinematicsError::Empty);
    }
    if !(frame_interval > 0.0 && frame_interval.is_finite()) {
        return Err(KinematicsError::InvalidFrameInterval(frame_interval));
    }
    let n = samples.len();
    let mut s = AngularSeries {
        time: (0..n).map(|i| i as f64 * frame_interval).collect(),
        ..AngularSeries::default()
    };

    for (i, sample) in samples.iter().enumerate() {
        let world = |q: Pt2| calibration.try_to_world(q).ok_or(KinematicsError::Unmappable(i));
        let o = world(sample.o)?;
        let (a, b) = options.legs(o, world(sample.a)?, world(sample.b)?);
        s.angular_position.push(options.oriented_angle(o, a, b));
        s.radius.push(distance(o, b));
    }
    let p = &s.angular_position;
    s.angular_displacement = (0..n).map(|i| if i == 0 { 0.0 } else { p[i] - p[i - 1] }).collect();
    s.total_angular_displacement = p.iter().map(|&x| x - p[0]).collect();

    let two_dt = 2.0 * frame_interval;
    s.angular_velocity = central_difference(&s.angular_position, two_dt);
    s.tangential_velocity = interior(n, |i| s.radius[i] * s.angular_velocity[i]);

    s.angular_acceleration = central_difference(&s.angular_velocity, two_dt);
    s.tangential_acceleration = interior(n, |i| s.radius[i] * s.angular_acceleration[i]);
    s.centripetal_acceleration = interior(n, |i| {
        let omega = s.angular_velocity[i];
        s.radius[i] * omega * omega
    });
    s.resultant_acceleration = interior(n, |i| {
        s.tangential_acceleration[i].hypot(s.centripetal_acceleration[i])
    });
    Ok(s)
}

/// `(x[i+1] − x[i−1]) / span` on the interior, padded.
fn central_difference(x: &[f64], span: f64) -> Vec<f64> {
    interior(x.len(), |i| (x[i + 1] - x[i - 1]) / span)
}

/// Evaluate `f` on indices `1..n-1` and pad both ends from their neighbour.
fn interior<F: FnMut(usize) -> f64>(n: usize, mut f: F) -> Vec<f64> {
    let mut out = vec![0.0; n];
    if n <= 2 {
        return out;
    }
    for (i, v) in out.iter_mut().enumerate().take(n - 1).skip(1) {
        *v = f(i);
    }
    out[0] = out[1];
    out[n - 1] = out[n - 2];
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::{IdentityCalibration, PixelCalibration, PlaneCalibration, CalibrationAxis};
    use crate::geometry::rotate;
    use crate::primitives::{pt, Vec2};
    use crate::quad::Quad;
    use std::f64::consts::{FRAC_PI_2, PI};

    /// Leg `b` turning counterclockwise (world) around `o` at `omega` rad/frame.
    fn rotating(n: usize, omega: f64, radius: f64) -> Vec<AngleSample> {
        let o = pt(100.0, 100.0);
        let a = pt(200.0, 100.0);
        (0..n)
            .map(|i| {
                // Screen Y is down, so a world CCW turn is a negative screen rotation.
                let b = rotate(o, pt(100.0 + radius, 100.0), -(0.1 + omega * i as f64));
                AngleSample::new(o, a, b)
            })
            .collect()
    }

    #[test]
    fn constant_rate_has_constant_velocity() {
        let dt = 0.04;
        let omega = 0.05;
        let s = angular_kinematics(&rotating(10, omega, 20.0), dt, AngleOptions::default(), &PixelCalibration::default())
            .unwrap();
        assert_eq!(s.len(), 10);
        assert!((s.time[9] - 0.36).abs() < 1e-12);
        for i in 0..10 {
            assert!((s.angular_position[i] - (0.1 + omega * i as f64)).abs() < 1e-9);
            assert!((s.angular_velocity[i] - omega / dt).abs() < 1e-6, "frame {i}");
            assert!((s.tangential_velocity[i] - 20.0 * omega / dt).abs() < 1e-4);
            assert!(s.angular_acceleration[i].abs() < 1e-6);
            assert!(s.tangential_acceleration[i].abs() < 1e-4);
            let centripetal = 20.0 * (omega / dt).powi(2);
            assert!((s.centripetal_acceleration[i] - centripetal).abs() < 1e-3);
            assert!((s.resultant_acceleration[i] - centripetal).abs() < 1e-3);
        }
        assert_eq!(s.angular_displacement[0], 0.0);
        assert!((s.angular_displacement[3] - omega).abs() < 1e-9);
        assert!((s.total_angular_displacement[9] - 9.0 * omega).abs() < 1e-9);
        assert!((s.radius[0] - 20.0).abs() < 1e-9);
    }

    #[test]
    fn constant_acceleration_in_the_interior() {
        // θ(t) = ½ α t², sampled per frame.
        let dt = 0.5;
        let alpha = 0.2;
        let o = pt(0.0, 0.0);
        let samples: Vec<_> = (0..8)
            .map(|i| {
                let t = i as f64 * dt;
                let b = rotate(o, pt(1.0, 0.0), 0.5 * alpha * t * t);
                AngleSample::new(o, pt(1.0, 0.0), b)
            })
            .collect();
        let s = angular_kinematics(&samples, dt, AngleOptions::new(true, true, false), &IdentityCalibration).unwrap();
        for i in 1..7 {
            assert!((s.angular_velocity[i] - alpha * i as f64 * dt).abs() < 1e-9);
        }
        for i in 2..6 {
            assert!((s.angular_acceleration[i] - alpha).abs() < 1e-9, "frame {i}");
        }
    }

    #[test]
    fn short_series_pad_with_zero() {
        let s = angular_kinematics(&rotating(2, 0.1, 10.0), 0.1, AngleOptions::default(), &PixelCalibration::default())
            .unwrap();
        assert_eq!(s.angular_velocity, vec![0.0, 0.0]);
        assert_eq!(s.resultant_acceleration, vec![0.0, 0.0]);
        assert!((s.angular_displacement[1] - 0.1).abs() < 1e-9);
        let one = angular_kinematics(&rotating(1, 0.1, 10.0), 0.1, AngleOptions::default(), &PixelCalibration::default())
            .unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one.total_angular_displacement, vec![0.0]);
    }

    #[test]
    fn rejects_bad_input() {
        let cal = IdentityCalibration;
        assert_eq!(
            angular_kinematics(&[], 0.1, AngleOptions::default(), &cal),
            Err(KinematicsError::Empty)
        );
        let samples = rotating(3, 0.1, 10.0);
        assert!(matches!(
            angular_kinematics(&samples, 0.0, AngleOptions::default(), &cal),
            Err(KinematicsError::InvalidFrameInterval(_))
        ));
        assert!(angular_kinematics(&samples, f64::NAN, AngleOptions::default(), &cal).is_err());
        assert!(KinematicsError::Empty.to_string().contains("no samples"));
    }

    #[test]
    fn horizon_sample_is_reported() {
        let trapezoid = Quad::new(pt(200.0, 100.0), pt(400.0, 100.0), pt(600.0, 400.0), pt(0.0, 400.0));
        let cal = PlaneCalibration::from_plane(Vec2::new(10.0, 10.0), trapezoid).unwrap();
        let o = pt(300.0, 300.0);
        let mut samples = vec![AngleSample::new(o, pt(400.0, 300.0), pt(300.0, 200.0)); 3];
        assert!(angular_kinematics(&samples, 0.1, AngleOptions::default(), &cal).is_ok());
        // Legs of this trapezoid meet at (300, -50).
        samples[2].b = pt(300.0, -50.0);
        assert_eq!(
            angular_kinematics(&samples, 0.1, AngleOptions::default(), &cal),
            Err(KinematicsError::Unmappable(2))
        );
        assert!(KinematicsError::Unmappable(2).to_string().contains("sample 2"));
    }

    #[test]
    fn supplementary_and_units() {
        let o = pt(0.0, 0.0);
        let samples = vec![AngleSample::new(o, pt(10.0, 0.0), pt(0.0, -10.0)); 3];
        let supp = AngleOptions::new(false, true, true);
        let s = angular_kinematics(&samples, 1.0, supp, &PixelCalibration::default()).unwrap();
        assert!((s.angular_position[0] - FRAC_PI_2).abs() < 1e-12);
        // Radius follows the reflected leg.
        assert!((s.radius[0] - 10.0).abs() < 1e-12);
        let deg = s.in_unit(AngleUnit::Degree);
        assert!((deg.angular_position[1] - 90.0).abs() < 1e-9);
        assert_eq!(deg.radius, s.radius);
    }

    #[test]
    fn unsigned_wrap_is_a_raw_jump() {
        let o = pt(0.0, 0.0);
        let a = pt(1.0, 0.0);
        // World angles 350° then 10°.
        let samples = [
            AngleSample::new(o, a, rotate(o, a, (10.0f64).to_radians())),
            AngleSample::new(o, a, rotate(o, a, (-10.0f64).to_radians())),
        ];
        let s = angular_kinematics(&samples, 1.0, AngleOptions::default(), &PixelCalibration::default()).unwrap();
        assert!((s.angular_displacement[1] - (20.0f64.to_radians() - 2.0 * PI)).abs() < 1e-9);
    }

    #[test]
    fn calibrated_radius_uses_world_units() {
        let cal = PlaneCalibration::from_line(1.0, pt(0.0, 100.0), pt(100.0, 100.0), CalibrationAxis::LineHorizontal)
            .unwrap();
        let s = angular_kinematics(&rotating(5, 0.1, 50.0), 0.1, AngleOptions::default(), &cal).unwrap();
        assert!((s.radius[2] - 0.5).abs() < 1e-9);
        assert!((s.angular_velocity[2] - 1.0).abs() < 1e-9);
    }
}
