use super::{Matrix, QrAlgorithm};
use crate::config::LinalgConfig;
use crate::scalar::Scalar;
use crate::vector::Vector;
use crate::Result;
use log::{debug, warn};
use num_traits::{One, Zero};

/// Diagonal read-off produced by [`Matrix::eigen_approx`]
#[derive(Debug, Clone, PartialEq)]
pub struct EigenApprox {
    pub eigenvalues: Vec<Scalar>,
    pub eigenvectors: Vec<Vector>,
}

/// Result of the unshifted QR iteration
#[derive(Debug, Clone, PartialEq)]
pub struct EigenDecomposition {
    /// Diagonal of the final iterate
    pub eigenvalues: Vec<Scalar>,
    /// Columns of the accumulated `Q₁·Q₂·…`; eigenvectors for Hermitian input
    pub eigenvectors: Vec<Vector>,
    pub iterations: usize,
    /// False when the iteration cap was reached first
    pub converged: bool,
}

impl Matrix {
    /// Approximate eigenpairs of a nearly diagonal matrix.
    ///
    /// This is a heuristic, not an eigensolver. For each `i` the eigenvalue
    /// is `A[i][i]` and the eigenvector has `v[i] = 1` and
    /// `v[j] = -(A[j][i] - A[i][j]) / A[i][i]` for `j != i`. The answer is
    /// exact for diagonal and symmetric-diagonal-dominated input only; use
    /// [`eigen_qr`](Self::eigen_qr) for anything else.
    pub fn eigen_approx(&self) -> Result<EigenApprox> {
        const OP: &str = "eigen_approx";
        let n = self.require_square(OP)?;
        let mut eigenvalues = Vec::with_capacity(n);
        let mut eigenvectors = Vec::with_capacity(n);

        for i in 0..n {
            let lambda = self.at(i, i);
            let mut v = vec![Scalar::zero(); n];
            v[i] = Scalar::one();
            for j in (0..n).filter(|&j| j != i) {
                let numerator = self.at(j, i) - self.at(i, j);
                if !numerator.is_zero() {
                    v[j] = -numerator
                        .checked_div(&lambda)
                        .map_err(|e| e.in_operation(OP))?;
                }
            }
            eigenvalues.push(lambda);
            eigenvectors.push(Vector::from_scalars(v)?);
        }

        Ok(EigenApprox {
            eigenvalues,
            eigenvectors,
        })
    }

    /// Unshifted QR iteration with default tolerances
    pub fn eigen_qr(&self) -> Result<EigenDecomposition> {
        self.eigen_qr_with(&LinalgConfig::default())
    }

    /// Iterate `A ← R·Q`, `V ← V·Q` until the strict lower triangle of `A`
    /// falls below `eigen_tolerance` or `eigen_max_iterations` is reached.
    pub fn eigen_qr_with(&self, config: &LinalgConfig) -> Result<EigenDecomposition> {
        const OP: &str = "eigen_qr";
        let n = self.require_square(OP)?;
        let mut a = self.clone();
        let mut v = Matrix::identity(n)?;
        let mut iterations = 0;
        let mut converged = a.max_subdiagonal() <= config.eigen_tolerance;

        while !converged && iterations < config.eigen_max_iterations {
            let (q, r) = a
                .qr_factorization(QrAlgorithm::Givens)
                .map_err(|e| e.in_operation(OP))?;
            a = r.multiply(&q)?;
            v = v.multiply(&q)?;
            iterations += 1;
            converged = a.max_subdiagonal() <= config.eigen_tolerance;
        }

        if converged {
            debug!("{OP}: converged after {iterations} iterations");
        } else {
            warn!(
                "{OP}: no convergence after {iterations} iterations (subdiagonal {:e})",
                a.max_subdiagonal()
            );
        }

        let eigenvalues = (0..n).map(|i| a.at(i, i)).collect();
        let eigenvectors = (0..n).map(|j| v.column(j)).collect::<Result<Vec<_>>>()?;
        Ok(EigenDecomposition {
            eigenvalues,
            eigenvectors,
            iterations,
            converged,
        })
    }

    fn max_subdiagonal(&self) -> f64 {
        let mut max = 0.0_f64;
        for i in 1..self.rows() {
            for j in 0..i.min(self.cols()) {
                max = max.max(self.at(i, j).magnitude());
            }
        }
        max
    }
}
