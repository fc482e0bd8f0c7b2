//! Numerical tolerances for the dense algorithms

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Tolerances and iteration limits, passed explicitly to the `*_with` forms
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct LinalgConfig {
    /// Pivot magnitudes `<=` this count as zero in solve, determinant, inverse and LU
    pub singular_tolerance: f64,
    /// Pivot threshold for rank, kernel and image
    pub rank_tolerance: f64,
    /// Iteration cap for the QR eigen iteration
    pub eigen_max_iterations: usize,
    /// Largest subdiagonal magnitude accepted as converged
    pub eigen_tolerance: f64,
}

impl Default for LinalgConfig {
    fn default() -> Self {
        Self {
            singular_tolerance: 0.0,
            rank_tolerance: 1e-10,
            eigen_max_iterations: 500,
            eigen_tolerance: 1e-10,
        }
    }
}

impl LinalgConfig {
    pub fn with_singular_tolerance(mut self, tolerance: f64) -> Self {
        self.singular_tolerance = tolerance;
        self
    }

    pub fn with_rank_tolerance(mut self, tolerance: f64) -> Self {
        self.rank_tolerance = tolerance;
        self
    }

    pub fn with_eigen_max_iterations(mut self, iterations: usize) -> Self {
        self.eigen_max_iterations = iterations;
        self
    }

    pub fn with_eigen_tolerance(mut self, tolerance: f64) -> Self {
        self.eigen_tolerance = tolerance;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LinalgConfig::default();
        assert_eq!(config.singular_tolerance, 0.0);
        assert_eq!(config.rank_tolerance, 1e-10);
        assert_eq!(config.eigen_max_iterations, 500);
    }

    #[test]
    fn test_builder_setters() {
        let config = LinalgConfig::default()
            .with_singular_tolerance(1e-12)
            .with_eigen_max_iterations(10);
        assert_eq!(config.singular_tolerance, 1e-12);
        assert_eq!(config.eigen_max_iterations, 10);
        assert_eq!(config.rank_tolerance, 1e-10);
    }
}
