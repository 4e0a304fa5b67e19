use cellpeak::steps::make_step_table;
use cellpeak::summary::{make_summary, SummaryOptions};
use cellpeak::synthetic::SyntheticCell;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Benchmark the summary with and without step table lookups
fn bench_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("summary");

    for cycles in [10, 100, 500] {
        let mut dataset = SyntheticCell {
            cycles,
            points_per_step: 50,
            ..Default::default()
        }
        .build_dataset("bench");
        make_step_table(&mut dataset, None).unwrap();
        group.throughput(Throughput::Elements(cycles as u64));

        for (label, options) in [
            ("minimal", SummaryOptions::minimal()),
            ("full", SummaryOptions::full()),
        ] {
            group.bench_with_input(
                BenchmarkId::new(label, format!("{}cycles", cycles)),
                &options,
                |b, options| {
                    b.iter(|| {
                        let mut dataset = dataset.clone();
                        make_summary(&mut dataset, black_box(options)).unwrap();
                        black_box(dataset.summary);
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_summary);
criterion_main!(benches);
