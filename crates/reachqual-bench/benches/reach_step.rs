//! Criterion benchmarks for whole-reach runs.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use reachqual_bench::{batch_profile, reference_profile, stress_profile, YEAR_HOURS};
use reachqual_engine::{run, run_batch, BatchConfig, RunPlan};

fn bench_reference_day(c: &mut Criterion) {
    let (config, forcing) = reference_profile(24);
    c.bench_function("reference_day", |b| {
        b.iter(|| {
            let result = run(&config, &forcing).unwrap();
            black_box(&result);
        });
    });
}

fn bench_reference_year(c: &mut Criterion) {
    let (config, forcing) = reference_profile(YEAR_HOURS);
    let mut group = c.benchmark_group("reference_year");
    group.sample_size(10);
    group.bench_function("compile", |b| {
        b.iter(|| {
            let plan = RunPlan::compile(&config, &forcing).unwrap();
            black_box(&plan);
        });
    });
    let (plan, counts) = RunPlan::compile(&config, &forcing).unwrap();
    group.bench_function("execute", |b| {
        b.iter(|| {
            let result = plan.execute(counts.clone()).unwrap();
            black_box(&result);
        });
    });
    group.finish();
}

fn bench_chain_32(c: &mut Criterion) {
    let (config, forcing) = stress_profile(720, 32);
    let mut group = c.benchmark_group("chain_32");
    group.sample_size(10);
    group.bench_function("month", |b| {
        b.iter(|| {
            let result = run(&config, &forcing).unwrap();
            black_box(&result);
        });
    });
    group.finish();
}

fn bench_batch_64(c: &mut Criterion) {
    let jobs = batch_profile(64, 720);
    let mut group = c.benchmark_group("batch_64");
    group.sample_size(10);
    for workers in [1, 4] {
        let config = BatchConfig {
            worker_count: Some(workers),
        };
        group.bench_function(format!("workers_{workers}"), |b| {
            b.iter(|| {
                let results = run_batch(&jobs, &config).unwrap();
                black_box(&results);
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_reference_day,
    bench_reference_year,
    bench_chain_32,
    bench_batch_64
);
criterion_main!(benches);
