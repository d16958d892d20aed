use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use vizij_groom_core::{evaluate_curve_cache, Bundle, BundleId, Config, Groom};

/// A groom of `bundles` helix-like guide curves with `sections` sections each.
fn build_groom(bundles: u32, sections: usize, curve_resolution: u32) -> Groom {
    let cfg = Config {
        curve_resolution,
        ..Config::default()
    };
    let list = (0..bundles)
        .map(|b| {
            let phase = b as f32 * 0.37;
            let centers: Vec<[f32; 3]> = (0..sections)
                .map(|i| {
                    let t = i as f32 * 0.6 + phase;
                    [t.cos() + b as f32, t.sin(), i as f32 * 0.25]
                })
                .collect();
            Bundle::from_centers(BundleId(b), format!("bundle{b}"), &centers)
        })
        .collect();
    Groom::from_bundles("bench", cfg, list).expect("valid groom")
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_curve_cache");
    for (bundles, sections, res) in [(1, 8, 12), (64, 8, 12), (64, 32, 4), (512, 6, 12)] {
        let mut groom = build_groom(bundles, sections, res);
        group.bench_function(
            BenchmarkId::from_parameter(format!("{bundles}x{sections}@{res}")),
            |b| b.iter(|| evaluate_curve_cache(black_box(&mut groom))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
