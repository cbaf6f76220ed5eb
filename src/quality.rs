//! Batch quality assessment
//!
//! Sweeps a collection of pyramid elements and condenses the per-element
//! metrics into summary statistics a meshing or simulation pipeline can
//! gate on before solving.

use nalgebra::Point3;

use crate::config::QualityThresholds;
use crate::metrics::pyramid;

/// Quality statistics for a batch of pyramid elements
#[derive(Debug, Clone)]
pub struct QualityReport {
    /// Minimum scaled Jacobian over the batch
    pub min_scaled_jacobian: f64,
    /// Average scaled Jacobian
    pub avg_scaled_jacobian: f64,
    /// Maximum scaled Jacobian
    pub max_scaled_jacobian: f64,
    /// Minimum shape score over the batch
    pub min_shape: f64,
    /// Number of inverted elements (raw Jacobian < 0)
    pub num_inverted: usize,
    /// Number of near-degenerate elements (scaled Jacobian below the
    /// configured cutoff)
    pub num_degenerate: usize,
    /// Total elements assessed
    pub total_elements: usize,
}

impl QualityReport {
    /// Check whether the batch is acceptable for simulation
    pub fn is_acceptable(&self, thresholds: &QualityThresholds) -> bool {
        self.num_inverted == 0
            && self.min_scaled_jacobian > thresholds.min_scaled_jacobian
            && self.min_shape > thresholds.min_shape
    }

    /// Human-readable quality summary
    pub fn summary(&self) -> String {
        format!(
            "Pyramid quality: min_sj={:.3}, avg_sj={:.3}, min_shape={:.3}, inverted={}/{}, degenerate={}/{}",
            self.min_scaled_jacobian,
            self.avg_scaled_jacobian,
            self.min_shape,
            self.num_inverted,
            self.total_elements,
            self.num_degenerate,
            self.total_elements
        )
    }
}

/// Assess a batch of pyramid elements.
///
/// Serial sweep; every element is an independent pure-function evaluation,
/// so callers that want parallelism can split the slice however they like.
pub fn assess_pyramids(
    elements: &[[Point3<f64>; 5]],
    thresholds: &QualityThresholds,
) -> QualityReport {
    if elements.is_empty() {
        return QualityReport {
            min_scaled_jacobian: 0.0,
            avg_scaled_jacobian: 0.0,
            max_scaled_jacobian: 0.0,
            min_shape: 0.0,
            num_inverted: 0,
            num_degenerate: 0,
            total_elements: 0,
        };
    }

    let mut min_scaled_jacobian = f64::INFINITY;
    let mut max_scaled_jacobian = f64::NEG_INFINITY;
    let mut sum_scaled_jacobian = 0.0;
    let mut min_shape = f64::INFINITY;
    let mut num_inverted = 0;
    let mut num_degenerate = 0;

    for coordinates in elements {
        let scaled_jacobian = pyramid::scaled_jacobian(coordinates);

        if pyramid::jacobian(coordinates) < 0.0 {
            num_inverted += 1;
        } else if scaled_jacobian < thresholds.degenerate_scaled_jacobian {
            num_degenerate += 1;
        }

        min_scaled_jacobian = min_scaled_jacobian.min(scaled_jacobian);
        max_scaled_jacobian = max_scaled_jacobian.max(scaled_jacobian);
        sum_scaled_jacobian += scaled_jacobian;

        min_shape = min_shape.min(pyramid::shape(coordinates));
    }

    if num_inverted > 0 {
        log::warn!(
            "{} of {} pyramid elements are inverted",
            num_inverted,
            elements.len()
        );
    }

    QualityReport {
        min_scaled_jacobian,
        avg_scaled_jacobian: sum_scaled_jacobian / elements.len() as f64,
        max_scaled_jacobian,
        min_shape,
        num_inverted,
        num_degenerate,
        total_elements: elements.len(),
    }
}
