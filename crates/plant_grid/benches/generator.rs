use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use glam::Vec2;
use plant_grid::prelude::*;

const SPACINGS: [f32; 4] = [8.0, 4.0, 2.0, 1.0];
const ZONE_COUNTS: [usize; 3] = [0, 4, 16];

fn bench_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(30)
        .warm_up_time(Duration::from_millis(500))
        .measurement_time(Duration::from_secs(2))
}

fn field_config(spacing: f32, zones: usize) -> GridConfig {
    let bed = Bed::new(1024.0, 512.0);
    let step = bed.length / (zones.max(1) as f32 + 1.0);
    GridConfig::new(bed, spacing)
        .with_edge_buffer(spacing)
        .with_exclusions((0..zones).map(|i| {
            ExclusionZone::new(Vec2::new(step * (i as f32 + 1.0), bed.width / 2.0), 24.0)
        }))
}

fn generator_benches(c: &mut Criterion) {
    for &zones in &ZONE_COUNTS {
        let mut group = c.benchmark_group(format!("generator/zones_{zones}"));

        for &spacing in &SPACINGS {
            let config = field_config(spacing, zones);
            let sites = StaggeredLattice::from_config(&config).len();
            group.throughput(Throughput::Elements(sites.max(1) as u64));

            group.bench_with_input(BenchmarkId::from_parameter(spacing), &spacing, |b, _| {
                b.iter(|| {
                    let layout = generate(black_box(&config)).expect("valid config");
                    black_box(layout.len());
                });
            });
        }

        group.finish();
    }
}

fn garlic_bed_bench(c: &mut Criterion) {
    let config = GridConfig::garlic_bed();
    c.bench_function("generator/garlic_bed", |b| {
        b.iter(|| black_box(generate(black_box(&config)).map(|l| l.len())))
    });
}

criterion_group! {
    name = benches;
    config = bench_criterion();
    targets = generator_benches, garlic_bed_bench
}
criterion_main!(benches);
