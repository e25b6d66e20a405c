//! Random convex quadrilaterals (radial jitter + replay tokens).
//!
//! Purpose
//! - Deterministic sampler for image-space quads used by property tests and
//!   benches of the projective mapping.
//!
//! Model
//! - Start from the four diagonal directions of a square (A top-left, then
//!   clockwise in screen space), add bounded angular and radial jitter.
//! - Concave draws are rejected and redrawn from the same stream; after a
//!   bounded number of attempts the unjittered square is returned.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geometry::mix_point;
use crate::primitives::{pt, Pt2};
use crate::quad::Quad;

const MAX_ATTEMPTS: usize = 16;

/// Radial-jitter sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct QuadCfg {
    pub center: Pt2,
    pub base_radius: f64,
    /// Angular jitter as a fraction of the corner spacing π/2. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radii = `base_radius * (1 + u)`, with `u∈[-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
    /// Random global rotation in [-π/4, π/4)?
    pub random_phase: bool,
}

impl Default for QuadCfg {
    fn default() -> Self {
        Self {
            center: pt(320.0, 240.0),
            base_radius: 150.0,
            angle_jitter_frac: 0.2,
            radial_jitter: 0.25,
            random_phase: false,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a random convex quad, corners clockwise in screen space.
pub fn draw_quad_radial(cfg: QuadCfg, tok: ReplayToken) -> Quad {
    let mut rng = tok.to_std_rng();
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.99);
    let r0 = cfg.base_radius.max(1e-9);
    let phase = if cfg.random_phase {
        (rng.gen::<f64>() * 2.0 - 1.0) * FRAC_PI_4
    } else {
        0.0
    };
    let corner_at = |theta: f64, r: f64| pt(cfg.center.x + r * theta.cos(), cfg.center.y + r * theta.sin());

    for _ in 0..MAX_ATTEMPTS {
        let mut corners = [Pt2::origin(); 4];
        for (k, c) in corners.iter_mut().enumerate() {
            let base = phase - 3.0 * FRAC_PI_4 + (k as f64) * FRAC_PI_2;
            let theta = base + (rng.gen::<f64>() * 2.0 - 1.0) * aj * FRAC_PI_2;
            let r = (1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * rj) * r0;
            *c = corner_at(theta, r);
        }
        let q = Quad::from(corners);
        if q.is_convex() {
            return q;
        }
    }
    let mut corners = [Pt2::origin(); 4];
    for (k, c) in corners.iter_mut().enumerate() {
        *c = corner_at(phase - 3.0 * FRAC_PI_4 + (k as f64) * FRAC_PI_2, r0);
    }
    Quad::from(corners)
}

/// `n` points inside `quad` via bilinear interpolation of its corners.
///
/// Uniform in the unit square, not in the quad's area.
pub fn draw_points_inside(quad: &Quad, n: usize, tok: ReplayToken) -> Vec<Pt2> {
    let mut rng = tok.to_std_rng();
    (0..n)
        .map(|_| {
            let (u, v) = (rng.gen::<f64>(), rng.gen::<f64>());
            let top = mix_point(quad.a(), quad.b(), u);
            let bottom = mix_point(quad.d(), quad.c(), u);
            mix_point(top, bottom, v)
        })
        .collect()
}
