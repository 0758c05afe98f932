//! Transform Benchmarks
//!
//! In-place `abs`, `add` and `sqrt`, plus `filter` into a preallocated buffer,
//! with the scalar loop, the SIMD kernels, the parallel SIMD path and ndarray
//! as baseline.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use simdarr::ops::{filter, math};
use simdarr::{CmpOp, OpConfig, Operand};

const VECTOR_SIZES: &[usize] = &[
    1_024,     // 4 KiB
    16_384,    // 64 KiB
    262_144,   // 1 MiB
    4_194_304, // 16 MiB
];

const PARALLEL_SIZE_THRESHOLD: usize = 65_536;

fn configs() -> [(&'static str, OpConfig); 3] {
    [
        ("scalar", OpConfig::scalar_only()),
        (
            "simd",
            OpConfig::default()
                .with_simd_threshold(0)
                .with_parallel_threshold(None),
        ),
        (
            "parallel_simd",
            OpConfig::default()
                .with_simd_threshold(0)
                .with_parallel_threshold(Some(0)),
        ),
    ]
}

fn generate_i32(len: usize) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..len).map(|_| rng.random_range(-1_000_000..1_000_000)).collect()
}

fn generate_f32(len: usize) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..len).map(|_| rng.random_range(0.0..100.0)).collect()
}

fn benchmark_abs(c: &mut Criterion) {
    for &size in VECTOR_SIZES {
        let mut group = c.benchmark_group(format!("abs_i32_{}", size));
        group.throughput(Throughput::Elements(size as u64));

        let src = generate_i32(size);
        let mut dst = vec![0; size];
        for (name, cfg) in configs() {
            if name == "parallel_simd" && size < PARALLEL_SIZE_THRESHOLD {
                continue;
            }
            group.bench_with_input(BenchmarkId::new(name, size), &src, |b, src| {
                b.iter(|| black_box(math::abs_into(black_box(src), &mut dst, &cfg)))
            });
        }

        let array = Array1::from_vec(src.clone());
        group.bench_with_input(BenchmarkId::new("ndarray", size), &array, |b, array| {
            b.iter(|| black_box(array.mapv(i32::abs)))
        });

        group.finish();
    }
}

fn benchmark_add(c: &mut Criterion) {
    for &size in VECTOR_SIZES {
        let mut group = c.benchmark_group(format!("add_i32_{}", size));
        group.throughput(Throughput::Elements(size as u64));

        let lhs = generate_i32(size);
        let rhs = generate_i32(size);
        let mut dst = vec![0; size];
        for (name, cfg) in configs() {
            if name == "parallel_simd" && size < PARALLEL_SIZE_THRESHOLD {
                continue;
            }
            // Unchecked so the SIMD kernels run instead of the checked loop.
            let cfg = cfg.with_overflow_checks(false);
            group.bench_with_input(BenchmarkId::new(name, size), &lhs, |b, lhs| {
                b.iter(|| {
                    black_box(math::add_into(
                        black_box(lhs),
                        Operand::Array(&rhs),
                        &mut dst,
                        &cfg,
                    ))
                })
            });
        }
        group.bench_with_input(BenchmarkId::new("checked", size), &lhs, |b, lhs| {
            b.iter(|| {
                black_box(math::add_into(
                    black_box(lhs),
                    Operand::Array(&rhs),
                    &mut dst,
                    &OpConfig::default(),
                ))
            })
        });

        let a = Array1::from_vec(lhs.clone());
        let b_arr = Array1::from_vec(rhs.clone());
        group.bench_with_input(BenchmarkId::new("ndarray", size), &(&a, &b_arr), |b, (a, rhs)| {
            b.iter(|| black_box(*a + *rhs))
        });

        group.finish();
    }
}

fn benchmark_sqrt(c: &mut Criterion) {
    for &size in VECTOR_SIZES {
        let mut group = c.benchmark_group(format!("sqrt_f32_{}", size));
        group.throughput(Throughput::Elements(size as u64));

        let src = generate_f32(size);
        let mut dst = vec![0.0; size];
        for (name, cfg) in configs() {
            if name == "parallel_simd" && size < PARALLEL_SIZE_THRESHOLD {
                continue;
            }
            group.bench_with_input(BenchmarkId::new(name, size), &src, |b, src| {
                b.iter(|| black_box(math::sqrt_into(black_box(src), &mut dst, &cfg)))
            });
        }

        let array = Array1::from_vec(src.clone());
        group.bench_with_input(BenchmarkId::new("ndarray", size), &array, |b, array| {
            b.iter(|| black_box(array.mapv(f32::sqrt)))
        });

        group.finish();
    }
}

fn benchmark_filter(c: &mut Criterion) {
    for &size in VECTOR_SIZES {
        let mut group = c.benchmark_group(format!("filter_f32_{}", size));
        group.throughput(Throughput::Elements(size as u64));

        let src = generate_f32(size);
        let mut out = vec![0.0; size];
        for (name, cfg) in configs().into_iter().take(2) {
            group.bench_with_input(BenchmarkId::new(name, size), &src, |b, src| {
                b.iter(|| {
                    black_box(filter::filter(CmpOp::Lt, black_box(src), 50.0, &mut out, &cfg))
                })
            });
        }

        group.bench_with_input(BenchmarkId::new("iterator", size), &src, |b, src| {
            b.iter(|| {
                let kept: Vec<f32> = src.iter().copied().filter(|&x| x < 50.0).collect();
                black_box(kept)
            })
        });

        group.finish();
    }
}

criterion_group!(
    benches,
    benchmark_abs,
    benchmark_add,
    benchmark_sqrt,
    benchmark_filter
);
criterion_main!(benches);
