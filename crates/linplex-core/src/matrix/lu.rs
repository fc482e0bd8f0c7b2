//! LU factorizations without row exchange
//!
//! - Doolittle: unit-diagonal `L`
//! - Crout: unit-diagonal `U`
//! - Cholesky: Hermitian positive-definite input, `U = Lᴴ`
//!
//! With `partial = true` Crout and Doolittle accept an `m × n` matrix and
//! return trapezoidal factors `L (m × k)` and `U (k × n)`, `k = min(m, n)`.

use super::Matrix;
use crate::config::LinalgConfig;
use crate::scalar::Scalar;
use crate::{LinalgError, Result};
use log::trace;
use num_traits::{One, Zero};
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const HERMITIAN_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum LuAlgorithm {
    #[default]
    Crout,
    Doolittle,
    Cholesky,
}

impl LuAlgorithm {
    pub const NAMES: [&'static str; 3] = ["crout", "doolittle", "cholesky"];
}

impl FromStr for LuAlgorithm {
    type Err = LinalgError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "crout" => Ok(LuAlgorithm::Crout),
            "doolittle" => Ok(LuAlgorithm::Doolittle),
            "cholesky" => Ok(LuAlgorithm::Cholesky),
            other => Err(LinalgError::invalid_selector("lu_factorization", other, &Self::NAMES)),
        }
    }
}

/// Dense scratch factor, row-major
struct Factor {
    data: Vec<Scalar>,
    cols: usize,
}

impl Factor {
    fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![Scalar::zero(); rows * cols],
            cols,
        }
    }

    fn get(&self, i: usize, j: usize) -> Scalar {
        self.data[i * self.cols + j]
    }

    fn set(&mut self, i: usize, j: usize, value: Scalar) {
        self.data[i * self.cols + j] = value;
    }

    fn into_matrix(self, rows: usize) -> Result<Matrix> {
        Matrix::from_parts(rows, self.cols, self.data)
    }
}

/// `Σ_{p < upto} L[i][p]·U[p][j]`
fn partial_sum(l: &Factor, u: &Factor, i: usize, j: usize, upto: usize) -> Scalar {
    (0..upto).map(|p| l.get(i, p) * u.get(p, j)).sum()
}

fn divide_by_pivot(value: Scalar, pivot: Scalar, column: usize, tolerance: f64, op: &str) -> Result<Scalar> {
    if pivot.magnitude() <= tolerance {
        return Err(LinalgError::singular_matrix(op, column));
    }
    value.checked_div(&pivot).map_err(|e| e.in_operation(op))
}

impl Matrix {
    /// Factor `A = L·U` with the chosen algorithm
    pub fn lu_factorization(&self, algorithm: LuAlgorithm, partial: bool) -> Result<(Matrix, Matrix)> {
        self.lu_factorization_with(algorithm, partial, &LinalgConfig::default())
    }

    pub fn lu_factorization_with(
        &self,
        algorithm: LuAlgorithm,
        partial: bool,
        config: &LinalgConfig,
    ) -> Result<(Matrix, Matrix)> {
        const OP: &str = "lu_factorization";
        if !partial || algorithm == LuAlgorithm::Cholesky {
            self.require_square(OP)?;
        }
        trace!("{OP}: {algorithm:?} on {}x{} (partial = {partial})", self.rows(), self.cols());

        match algorithm {
            LuAlgorithm::Doolittle => self.doolittle(config.singular_tolerance),
            LuAlgorithm::Crout => self.crout(config.singular_tolerance),
            LuAlgorithm::Cholesky => self.cholesky(),
        }
    }

    fn doolittle(&self, tolerance: f64) -> Result<(Matrix, Matrix)> {
        const OP: &str = "doolittle";
        let (m, n) = (self.rows(), self.cols());
        let k = m.min(n);
        let mut l = Factor::zeros(m, k);
        let mut u = Factor::zeros(k, n);

        for i in 0..k {
            l.set(i, i, Scalar::one());
            for j in i..n {
                let value = self.at(i, j) - partial_sum(&l, &u, i, j, i);
                u.set(i, j, value);
            }
            let pivot = u.get(i, i);
            for r in (i + 1)..m {
                let value = self.at(r, i) - partial_sum(&l, &u, r, i, i);
                l.set(r, i, divide_by_pivot(value, pivot, i, tolerance, OP)?);
            }
        }

        Ok((l.into_matrix(m)?, u.into_matrix(k)?))
    }

    fn crout(&self, tolerance: f64) -> Result<(Matrix, Matrix)> {
        const OP: &str = "crout";
        let (m, n) = (self.rows(), self.cols());
        let k = m.min(n);
        let mut l = Factor::zeros(m, k);
        let mut u = Factor::zeros(k, n);

        for j in 0..k {
            for r in j..m {
                let value = self.at(r, j) - partial_sum(&l, &u, r, j, j);
                l.set(r, j, value);
            }
            u.set(j, j, Scalar::one());
            let pivot = l.get(j, j);
            for c in (j + 1)..n {
                let value = self.at(j, c) - partial_sum(&l, &u, j, c, j);
                u.set(j, c, divide_by_pivot(value, pivot, j, tolerance, OP)?);
            }
        }

        Ok((l.into_matrix(m)?, u.into_matrix(k)?))
    }

    fn cholesky(&self) -> Result<(Matrix, Matrix)> {
        const OP: &str = "cholesky";
        let n = self.rows();

        for i in 0..n {
            for j in 0..=i {
                let (a, b) = (self.at(i, j), self.at(j, i).conjugate());
                let scale = a.magnitude().max(b.magnitude()).max(1.0);
                if !a.approx_eq(&b, HERMITIAN_TOLERANCE * scale) {
                    return Err(LinalgError::not_positive_definite(
                        OP,
                        format!("matrix is not symmetric/Hermitian at ({i}, {j})"),
                    ));
                }
            }
        }

        let mut l = Factor::zeros(n, n);
        for j in 0..n {
            let radicand = self.at(j, j)
                - (0..j)
                    .map(|p| l.get(j, p) * l.get(j, p).conjugate())
                    .sum::<Scalar>();
            if radicand.re() <= 0.0 {
                return Err(LinalgError::not_positive_definite(
                    OP,
                    format!("diagonal term {j} would be sqrt({radicand})"),
                ));
            }
            let diagonal = Scalar::Real(radicand.re().sqrt());
            l.set(j, j, diagonal);

            for i in (j + 1)..n {
                let sum: Scalar = (0..j).map(|p| l.get(i, p) * l.get(j, p).conjugate()).sum();
                let value = (self.at(i, j) - sum)
                    .checked_div(&diagonal)
                    .map_err(|e| e.in_operation(OP))?;
                l.set(i, j, value);
            }
        }

        let l = l.into_matrix(n)?;
        let u = l.conjugate_transpose();
        Ok((l, u))
    }
}
