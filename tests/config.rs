//! Integration tests for `KernelConfig` parsing and its effect on the kernels.

use matkern::config::load_kernel_config;
use matkern::{matrix, KernelConfig, Pivoting};

// ---------------------------------------------------------------------------
// Defaults & parsing
// ---------------------------------------------------------------------------

#[test]
fn default_values() {
    let cfg = KernelConfig::default();
    assert_eq!(cfg.cofactor_limit, 5);
    assert_eq!(cfg.pivoting, Pivoting::Partial);
    assert_eq!(cfg.cleanup_epsilon, None);
}

#[test]
fn pivoting_from_str() {
    assert_eq!("none".parse::<Pivoting>(), Ok(Pivoting::None));
    assert_eq!("Partial".parse::<Pivoting>(), Ok(Pivoting::Partial));
    assert!("full".parse::<Pivoting>().is_err());
}

#[test]
fn round_trips_json() {
    let cfg = KernelConfig::new(4, Pivoting::None).with_cleanup(1e-10);
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(json.contains("\"pivoting\":\"none\""));
    let back: KernelConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn missing_fields_take_defaults() {
    let cfg: KernelConfig = serde_json::from_str(r#"{ "pivoting": "none" }"#).unwrap();
    assert_eq!(cfg.cofactor_limit, KernelConfig::DEFAULT_COFACTOR_LIMIT);
    assert_eq!(cfg.pivoting, Pivoting::None);
}

// ---------------------------------------------------------------------------
// Loading from disk
// ---------------------------------------------------------------------------

#[test]
fn loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kernel.json");
    std::fs::write(&path, r#"{ "cofactor_limit": 8, "cleanup_epsilon": 1e-9 }"#).unwrap();

    let cfg = load_kernel_config(&path).unwrap();
    assert_eq!(cfg.cofactor_limit, 8);
    assert_eq!(cfg.pivoting, Pivoting::Partial);
    assert_eq!(cfg.cleanup_epsilon, Some(1e-9));
}

#[test]
fn missing_file_errors_with_path() {
    let err = load_kernel_config("/nonexistent/kernel.json").unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/kernel.json"));
}

#[test]
fn malformed_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kernel.json");
    std::fs::write(&path, "{ cofactor_limit: }").unwrap();
    assert!(load_kernel_config(&path).is_err());
}

// ---------------------------------------------------------------------------
// Effect on kernels
// ---------------------------------------------------------------------------

#[test]
fn cleanup_epsilon_snaps_product_noise() {
    let a = matrix![[0.1, 0.2], [0.3, 0.4]];
    let b = matrix![[10.0, 0.0], [0.0, 10.0]];
    let c = matrix![[1.0, 0.0], [0.0, 1.0]];
    let noisy = matrix![[1e-14, 1.0], [1.0, 1e-14]];

    let plain = KernelConfig::default();
    let clean = KernelConfig::default().with_cleanup(1e-9);
    assert_eq!(noisy.mul_with(&c, &plain).unwrap(), noisy);
    assert_eq!(
        noisy.mul_with(&c, &clean).unwrap(),
        matrix![[0.0, 1.0], [1.0, 0.0]]
    );
    assert!(a.mul_with(&b, &clean).unwrap().approx_eq(&matrix![[1.0, 2.0], [3.0, 4.0]], 1e-12));
}

#[test]
fn pivoting_choice_changes_zero_pivot_outcome() {
    let m: matkern::Matrix<f64> = matrix![[0.0, 1.0, 2.0], [1.0, 0.0, 3.0], [4.0, -3.0, 8.0]];
    let partial = KernelConfig::new(3, Pivoting::Partial);
    let none = KernelConfig::new(3, Pivoting::None);
    assert!((m.det_with(&partial) - m.det()).abs() < 1e-12);
    assert_eq!(m.det_with(&none), 0.0);
}
