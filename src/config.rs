//! Quality acceptance thresholds
//!
//! Reads TOML threshold files and provides structured cutoffs for deciding
//! when a batch of elements is good enough to hand to a solver. Every field
//! has a default, so a partial (or empty) file is valid.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Acceptance thresholds for element quality screening
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QualityThresholds {
    /// Scaled Jacobian at or below which the batch is rejected outright
    #[serde(default = "default_min_scaled_jacobian")]
    pub min_scaled_jacobian: f64,
    /// Scaled Jacobian below which an element counts as near-degenerate
    #[serde(default = "default_degenerate_scaled_jacobian")]
    pub degenerate_scaled_jacobian: f64,
    /// Shape score at or below which the batch is rejected outright
    #[serde(default = "default_min_shape")]
    pub min_shape: f64,
}

fn default_min_scaled_jacobian() -> f64 {
    0.01
}

fn default_degenerate_scaled_jacobian() -> f64 {
    0.1
}

fn default_min_shape() -> f64 {
    0.0
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_scaled_jacobian: default_min_scaled_jacobian(),
            degenerate_scaled_jacobian: default_degenerate_scaled_jacobian(),
            min_shape: default_min_shape(),
        }
    }
}

impl QualityThresholds {
    /// Load thresholds from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read thresholds file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse thresholds file: {}", e))
    }
}
