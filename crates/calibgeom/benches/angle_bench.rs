//! Criterion benchmarks for angle updates (sweep only vs. calibrated helper).

use calibgeom::angle::{AngleHelper, AngleOptions, SweepAngle};
use calibgeom::calibration::{IdentityView, PlaneCalibration};
use calibgeom::primitives::{pt, Pt2, Vec2};
use calibgeom::rand::{draw_points_inside, draw_quad_radial, QuadCfg, ReplayToken};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

fn triplets(n: usize, seed: u64) -> Vec<[Pt2; 3]> {
    let q = draw_quad_radial(QuadCfg::default(), ReplayToken { seed, index: 0 });
    draw_points_inside(&q, 3 * n, ReplayToken { seed, index: 1 })
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect()
}

fn bench_angle(c: &mut Criterion) {
    let mut group = c.benchmark_group("angle");
    let options = AngleOptions::new(true, true, false);

    group.bench_function("sweep_update", |b| {
        b.iter_batched(
            || triplets(64, 11),
            |ts| {
                let mut s = SweepAngle::default();
                for [o, a, p] in ts {
                    s.update(o, a, p, -20.0, options);
                }
                s
            },
            BatchSize::SmallInput,
        )
    });

    let court = draw_quad_radial(QuadCfg::default(), ReplayToken { seed: 12, index: 0 });
    let cal = PlaneCalibration::from_plane(Vec2::new(10.0, 5.0), court).unwrap();
    group.bench_function("helper_update_perspective", |b| {
        b.iter_batched(
            || triplets(64, 13),
            |ts| {
                let mut h = AngleHelper::default();
                for [o, a, p] in ts {
                    h.update(o, a, p, options, &cal, &IdentityView);
                }
                h.calibrated_angle()
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("helper_coincident_noop", |b| {
        let o = pt(10.0, 10.0);
        b.iter(|| {
            let mut h = AngleHelper::default();
            h.update(o, o, pt(20.0, 10.0), options, &cal, &IdentityView)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_angle);
criterion_main!(benches);
