//! Tuning knobs for the kernel algorithms.
//!
//! `KernelConfig` is plain serde data so callers can keep it next to the rest
//! of their configuration. Every algorithm has a `*_with(&KernelConfig)` form;
//! the short form uses `KernelConfig::default()`.
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Row selection strategy used by elimination based algorithms.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Pivoting {
    /// Use rows in their natural order. A zero pivot stops elimination.
    None,
    /// Swap in the row with the largest magnitude in the active column.
    #[default]
    Partial,
}

impl FromStr for Pivoting {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Pivoting::None),
            "partial" => Ok(Pivoting::Partial),
            _ => Err(format!(
                "Unknown pivoting strategy: {}. Expected `none` or `partial`",
                s
            )),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct KernelConfig {
    /// Square matrices smaller than this use cofactor expansion for the
    /// determinant; larger ones use Gaussian elimination.
    pub cofactor_limit: usize,
    pub pivoting: Pivoting,
    /// When set, products computed through `mul_with` have every element
    /// smaller than this in magnitude snapped to zero.
    pub cleanup_epsilon: Option<f64>,
}

impl KernelConfig {
    pub const DEFAULT_COFACTOR_LIMIT: usize = 5;

    pub fn new(cofactor_limit: usize, pivoting: Pivoting) -> Self {
        Self {
            cofactor_limit,
            pivoting,
            cleanup_epsilon: None,
        }
    }

    pub fn with_cleanup(mut self, epsilon: f64) -> Self {
        self.cleanup_epsilon = Some(epsilon);
        self
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            cofactor_limit: Self::DEFAULT_COFACTOR_LIMIT,
            pivoting: Pivoting::Partial,
            cleanup_epsilon: None,
        }
    }
}

/// Load a kernel configuration from a JSON file.
pub fn load_kernel_config<P: AsRef<Path>>(path: P) -> Result<KernelConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: KernelConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    if config.cofactor_limit < 3 {
        log::warn!(
            "cofactor_limit {} disables cofactor expansion; every determinant above 2x2 will use elimination",
            config.cofactor_limit
        );
    }
    Ok(config)
}
