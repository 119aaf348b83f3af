//! Benchmarks for the core matrix kernels.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use matkern::factory::identity_matrix;
use matkern::{matrix, FactoryCache, IdentityMatrix, Matrix, MatrixFactory};

fn bench_construct(c: &mut Criterion) {
    c.bench_function("matrix_construct_3x3", |b| {
        b.iter(|| Matrix::<f64>::zeros(black_box(3), black_box(3)))
    });
    c.bench_function("identity_cached_3x3", |b| {
        let cache = FactoryCache::new();
        b.iter(|| IdentityMatrix::<f64>::make(&cache, black_box(3)))
    });
}

fn bench_multiply(c: &mut Criterion) {
    let unit = identity_matrix::<f64>(3);
    let mat = matrix![[2.0, 3.0, 4.0], [6.0, 1.0, 7.0], [3.0, 4.0, 5.0]];
    c.bench_function("matrix_multiply_3x3", |b| {
        b.iter(|| black_box(&unit) * black_box(&mat))
    });
}

fn bench_determinant(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_determinant");
    group.bench_function("2x2", |b| {
        let mat = matrix![[2.0, 4.0], [1.0, 7.0]];
        b.iter(|| black_box(&mat).det())
    });
    for size in [3usize, 5, 8, 16].iter() {
        let mut mat = identity_matrix::<f64>(*size);
        for r in 0..*size {
            for col in 0..*size {
                *mat.element_mut(r, col) += ((r * 7 + col * 3) % 5) as f64;
            }
        }
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(&mat).det())
        });
    }
    group.finish();
}

fn bench_inverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_inverse");
    let small = matrix![[2.0, 4.0], [1.0, 7.0]];
    let unit = identity_matrix::<f64>(3);
    let general = matrix![[3.0, 2.0, 4.0], [2.0, 7.0, 2.0], [-1.0, 2.0, 5.0]];
    group.bench_function("2x2", |b| b.iter(|| black_box(&small).inverted()));
    group.bench_function("unit", |b| b.iter(|| black_box(&unit).inverted()));
    group.bench_function("general", |b| b.iter(|| black_box(&general).inverted()));
    group.finish();
}

fn bench_elementwise(c: &mut Criterion) {
    let lhs = identity_matrix::<f64>(3);
    let rhs = identity_matrix::<f64>(3);
    c.bench_function("matrix_add_3x3", |b| b.iter(|| black_box(&lhs) + black_box(&rhs)));
    c.bench_function("matrix_subtract_3x3", |b| b.iter(|| black_box(&lhs) - black_box(&rhs)));
    c.bench_function("matrix_scalar_multiply_3x3", |b| b.iter(|| black_box(&lhs) * black_box(5.0)));
    c.bench_function("matrix_scalar_divide_3x3", |b| b.iter(|| black_box(&lhs) / black_box(5.0)));
}

fn bench_impose(c: &mut Criterion) {
    let block = matrix![[2.0, 3.0], [4.0, 5.0]];
    c.bench_function("matrix_impose_2x2_into_3x3", |b| {
        b.iter(|| {
            let mut target = identity_matrix::<f64>(3);
            target.impose(black_box(&block), 1, 1);
            target
        })
    });
}

criterion_group!(
    benches,
    bench_construct,
    bench_multiply,
    bench_determinant,
    bench_inverse,
    bench_elementwise,
    bench_impose
);
criterion_main!(benches);
