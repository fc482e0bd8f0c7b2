//! QR factorizations
//!
//! Givens rotations give a full `Q (m × m)` and `R (m × n)`. Gram-Schmidt
//! gives `Q (m × n)` and `R = Qᴴ·A (n × n)`; an input column that depends
//! on earlier ones leaves a zero column in `Q`.

use super::Matrix;
use crate::config::LinalgConfig;
use crate::scalar::Scalar;
use crate::{LinalgError, Result};
use log::trace;
use num_traits::Zero;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum QrAlgorithm {
    #[default]
    Givens,
    GramSchmidt,
}

impl QrAlgorithm {
    pub const NAMES: [&'static str; 2] = ["givens", "gram_schmidt"];
}

impl FromStr for QrAlgorithm {
    type Err = LinalgError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "givens" => Ok(QrAlgorithm::Givens),
            "gram_schmidt" | "gram-schmidt" => Ok(QrAlgorithm::GramSchmidt),
            other => Err(LinalgError::invalid_selector("qr_factorization", other, &Self::NAMES)),
        }
    }
}

impl Matrix {
    /// Factor `A = Q·R` with `Qᴴ·Q ≈ I`
    pub fn qr_factorization(&self, algorithm: QrAlgorithm) -> Result<(Matrix, Matrix)> {
        self.qr_factorization_with(algorithm, &LinalgConfig::default())
    }

    pub fn qr_factorization_with(
        &self,
        algorithm: QrAlgorithm,
        config: &LinalgConfig,
    ) -> Result<(Matrix, Matrix)> {
        match algorithm {
            QrAlgorithm::Givens => self.givens_qr(),
            QrAlgorithm::GramSchmidt => self.gram_schmidt_qr(config.rank_tolerance),
        }
    }

    /// Zero the subdiagonal column by column, bottom row first.
    ///
    /// Each rotation acts on rows `i-1` and `i` of `R` (`R ← Gᴴ·R`) and on
    /// the matching columns of `Q` (`Q ← Q·G`), where
    /// `G = [[c, -conj(s)], [s, conj(c)]]` embedded at `(i-1, i)`.
    fn givens_qr(&self) -> Result<(Matrix, Matrix)> {
        const OP: &str = "givens_qr";
        let (m, n) = (self.rows(), self.cols());
        let mut q = Matrix::identity(m)?.data().to_vec();
        let mut r = self.data().to_vec();

        for j in 0..m.min(n) {
            for i in ((j + 1)..m).rev() {
                let a = r[(i - 1) * n + j];
                let b = r[i * n + j];
                let norm = (a.norm_sqr() + b.norm_sqr()).sqrt();
                if norm == 0.0 {
                    continue;
                }
                let norm = Scalar::Real(norm);
                let c = a.checked_div(&norm).map_err(|e| e.in_operation(OP))?;
                let s = b.checked_div(&norm).map_err(|e| e.in_operation(OP))?;
                trace!("{OP}: rotate rows {} and {i} for column {j}", i - 1);

                for col in 0..n {
                    let upper = r[(i - 1) * n + col];
                    let lower = r[i * n + col];
                    r[(i - 1) * n + col] = c.conjugate() * upper + s.conjugate() * lower;
                    r[i * n + col] = -s * upper + c * lower;
                }
                r[i * n + j] = Scalar::zero();

                for row in 0..m {
                    let left = q[row * m + i - 1];
                    let right = q[row * m + i];
                    q[row * m + i - 1] = left * c + right * s;
                    q[row * m + i] = -(left * s.conjugate()) + right * c.conjugate();
                }
            }
        }

        Ok((Matrix::from_parts(m, m, q)?, Matrix::from_parts(m, n, r)?))
    }

    /// Modified Gram-Schmidt over the columns, projecting with the
    /// Hermitian inner product.
    fn gram_schmidt_qr(&self, tolerance: f64) -> Result<(Matrix, Matrix)> {
        const OP: &str = "gram_schmidt_qr";
        let (m, n) = (self.rows(), self.cols());
        let mut basis: Vec<Vec<Scalar>> = Vec::with_capacity(n);

        for j in 0..n {
            let mut v: Vec<Scalar> = (0..m).map(|i| self.at(i, j)).collect();
            let original = column_norm(&v);

            for u in &basis {
                let denominator = hermitian(u, u);
                if denominator.is_zero() {
                    continue;
                }
                let coefficient = hermitian(u, &v)
                    .checked_div(&denominator)
                    .map_err(|e| e.in_operation(OP))?;
                for (vi, ui) in v.iter_mut().zip(u) {
                    *vi = *vi - coefficient * *ui;
                }
            }

            let norm = column_norm(&v);
            if norm <= tolerance * original.max(1.0) {
                trace!("{OP}: column {j} is dependent, leaving a zero column");
                basis.push(vec![Scalar::zero(); m]);
                continue;
            }
            let norm = Scalar::Real(norm);
            let unit = v
                .iter()
                .map(|x| x.checked_div(&norm))
                .collect::<Result<Vec<_>>>()
                .map_err(|e| e.in_operation(OP))?;
            basis.push(unit);
        }

        let mut q = Vec::with_capacity(m * n);
        for i in 0..m {
            q.extend(basis.iter().map(|column| column[i]));
        }
        let q = Matrix::from_parts(m, n, q)?;
        let r = q.conjugate_transpose().multiply(self)?;
        Ok((q, r))
    }
}

/// `Σ conj(u_i)·v_i`
fn hermitian(u: &[Scalar], v: &[Scalar]) -> Scalar {
    u.iter().zip(v).map(|(a, b)| a.conjugate() * *b).sum()
}

fn column_norm(v: &[Scalar]) -> f64 {
    v.iter().map(Scalar::norm_sqr).sum::<f64>().sqrt()
}
