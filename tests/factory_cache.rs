//! Integration tests for the memoized factory matrices and batch helpers.

use std::sync::Arc;

use matkern::batch::{par_determinants, par_multiply, par_prewarm_identities};
use matkern::factory::{identity_matrix, offset_matrix, rotation_matrix, Rotation};
use matkern::linalg::transpose_with_offsets;
use matkern::{
    matrix, vector, FactoryCache, IdentityMatrix, KernelConfig, MatrixFactory, OffsetMatrix,
    RotationMatrix,
};
use rayon::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

#[test]
fn identity_has_unit_diagonal() {
    assert!(identity_matrix::<f64>(5).is_identity());
    assert_eq!(identity_matrix::<i32>(0).len(), 0);
}

#[test]
fn repeated_requests_share_one_matrix() {
    init_logging();
    let cache = FactoryCache::new();
    let a = IdentityMatrix::<f64>::make(&cache, 4);
    let b = IdentityMatrix::<f64>::make(&cache, 4);
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(cache.len(), 1);
}

#[test]
fn element_types_are_cached_separately() {
    let cache = FactoryCache::new();
    let f = IdentityMatrix::<f64>::make(&cache, 3);
    let i = IdentityMatrix::<i64>::make(&cache, 3);
    assert!(f.is_identity());
    assert!(i.is_identity());
    assert_eq!(cache.len(), 2);
}

#[test]
fn clear_drops_entries_but_not_handles() {
    let cache = FactoryCache::new();
    let held = IdentityMatrix::<f32>::make(&cache, 2);
    cache.clear();
    assert!(cache.is_empty());
    let rebuilt = IdentityMatrix::<f32>::make(&cache, 2);
    assert!(!Arc::ptr_eq(&held, &rebuilt));
    assert_eq!(*held, *rebuilt);
}

#[test]
fn global_cache_is_shared() {
    let a = IdentityMatrix::<f64>::make_global(7);
    let b = IdentityMatrix::<f64>::make(FactoryCache::global(), 7);
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn concurrent_population_converges() {
    init_logging();
    let cache = FactoryCache::new();
    let handles: Vec<_> = (0..64)
        .into_par_iter()
        .map(|i| IdentityMatrix::<f64>::make(&cache, 2 + i % 4))
        .collect();
    assert_eq!(cache.len(), 4);
    for (i, handle) in handles.iter().enumerate() {
        let canonical = IdentityMatrix::<f64>::make(&cache, 2 + i % 4);
        assert!(Arc::ptr_eq(handle, &canonical));
    }
}

// ---------------------------------------------------------------------------
// Rotation
// ---------------------------------------------------------------------------

#[test]
fn quarter_turn_maps_x_to_y() {
    let rot: matkern::Matrix<f64> = rotation_matrix(&Rotation::degrees(90.0));
    let mut v = vector![1.0, 0.0];
    rot.apply(&mut v);
    assert!(v.approx_eq(&vector![0.0, 1.0], 1e-12), "{v}");
}

#[test]
fn clockwise_quarter_turn_maps_x_to_negative_y() {
    let rot: matkern::Matrix<f64> = rotation_matrix(&Rotation::degrees(90.0).clockwise());
    let v = &rot * &vector![1.0, 0.0];
    assert!(v.approx_eq(&vector![0.0, -1.0], 1e-12), "{v}");
}

#[test]
fn rotation_is_orthogonal() {
    let rot: matkern::Matrix<f64> = rotation_matrix(&Rotation::radians(0.3).with_size(4));
    let product = &rot * &rot.transposed();
    assert!(product.approx_eq(&identity_matrix(4), 1e-12));
    assert!((rot.det() - 1.0).abs() < 1e-12);
}

#[test]
fn rotation_below_two_dimensions_is_identity() {
    let rot: matkern::Matrix<f64> = rotation_matrix(&Rotation::degrees(45.0).with_size(1));
    assert!(rot.is_identity());
}

#[test]
fn rotations_are_memoized_by_angle_and_size() {
    let cache = FactoryCache::new();
    let a = RotationMatrix::<f64>::make(&cache, Rotation::degrees(30.0));
    let b = RotationMatrix::<f64>::make(&cache, Rotation::degrees(30.0));
    let c = RotationMatrix::<f64>::make(&cache, Rotation::degrees(30.0).with_size(3));
    assert!(Arc::ptr_eq(&a, &b));
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(cache.len(), 2);
}

// ---------------------------------------------------------------------------
// Offsets & cached transpose
// ---------------------------------------------------------------------------

#[test]
fn offsets_drive_transpose() {
    let m = matrix![[2, 3, 5], [6, 1, 9]];
    let offsets = offset_matrix(m.width(), m.height());
    let t = transpose_with_offsets(&m, &offsets).unwrap();
    assert_eq!(t, m.transposed());
}

#[test]
fn offsets_must_match_shape() {
    let m = matrix![[1, 2], [3, 4]];
    assert!(transpose_with_offsets(&m, &offset_matrix(3, 2)).is_err());
}

#[test]
fn cached_transpose_reuses_offsets() {
    let cache = FactoryCache::new();
    let m = matrix![[1.0, 2.0, 3.0, 4.0], [5.0, 6.0, 7.0, 8.0]];
    assert_eq!(m.transposed_cached(&cache), m.transposed());
    assert_eq!(m.transposed_cached(&cache), m.transposed());
    assert_eq!(cache.len(), 1);
    let offsets = OffsetMatrix::make(&cache, (4, 2));
    assert_eq!(offsets.shape(), (2, 4));
}

// ---------------------------------------------------------------------------
// Batch helpers
// ---------------------------------------------------------------------------

#[test]
fn batch_products_and_determinants() {
    init_logging();
    let pairs: Vec<_> = (1..=8)
        .map(|k| {
            let k = k as f64;
            (matrix![[k, 0.0], [0.0, 1.0]], matrix![[1.0, 0.0], [0.0, k]])
        })
        .collect();
    let products = par_multiply(&pairs).unwrap();
    let dets = par_determinants(&products, &KernelConfig::default());
    for (k, det) in (1..=8).zip(dets) {
        assert_eq!(det, (k * k) as f64);
    }
}

#[test]
fn prewarm_fills_cache_once_per_size() {
    let cache = FactoryCache::new();
    let warmed = par_prewarm_identities::<f64>(&cache, &[2, 3, 2, 3, 4]);
    assert_eq!(warmed.len(), 5);
    assert_eq!(cache.len(), 3);
    assert!(Arc::ptr_eq(&warmed[0], &warmed[2]));
}
