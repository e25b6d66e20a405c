//! Measure a few angles on a perspective court and compare with the screen arc.
//!
//! Usage:
//!   cargo run -p calibgeom --example court_angles -- [seed]
//!
//! Prints, per sampled triplet, the calibrated angle (world) and the sweep
//! drawn on screen. They differ by the perspective distortion of the court.

use calibgeom::prelude::*;
use calibgeom::rand::{draw_points_inside, ReplayToken};

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(2025);
    let court = Quad::new(
        pt(120.0, 80.0),
        pt(520.0, 90.0),
        pt(600.0, 400.0),
        pt(40.0, 380.0),
    );
    let cal = match PlaneCalibration::from_plane(Vec2::new(10.0, 5.0), court) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("calibration failed: {e}");
            return;
        }
    };
    if let Some(e) = cal.ellipse_from_circle(pt(5.0, 2.5), 1.0) {
        println!(
            "unit circle at court center -> ellipse a={:.1} b={:.1} rot={:.3}",
            e.semi_major, e.semi_minor, e.rotation
        );
    }

    let pts = draw_points_inside(&court, 15, ReplayToken { seed, index: 0 });
    let mut helper = AngleHelper::default();
    for t in pts.chunks_exact(3) {
        if !helper.update(t[0], t[1], t[2], AngleOptions::default(), &cal, &IdentityView) {
            continue;
        }
        println!(
            "o=({:.0},{:.0}) world={:>7} screen={:>6.1}°",
            t[0].x,
            t[0].y,
            helper.label(AngleUnit::Degree, 1),
            helper.sweep().sweep()
        );
    }
}
